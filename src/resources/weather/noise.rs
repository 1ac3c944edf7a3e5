use noise::{NoiseFn, Value};

/// Seeded coherent value noise over continuous (x, y, z) coordinates.
#[derive(Clone)]
pub struct NoiseSource {
    noise: Value,
    seed: u32,
}

impl NoiseSource {
    pub fn new(seed: u32) -> Self {
        Self {
            noise: Value::new(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Single octave sample, roughly in [-1, 1].
    pub fn get(&self, point: [f64; 3]) -> f64 {
        self.noise.get(point)
    }

    /// Sum of octaves, each `lacunarity` times finer and `persistence` times weaker
    /// than the last, normalized back into the single octave range.
    pub fn fractal(&self, point: [f64; 3], octaves: u32, persistence: f64, lacunarity: f64) -> f64 {
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut noise_value = 0.0;
        let mut weight = 0.0;

        for _ in 0..octaves.max(1) {
            let sample = [
                point[0] * frequency,
                point[1] * frequency,
                point[2] * frequency,
            ];
            noise_value += self.noise.get(sample) * amplitude;

            weight += amplitude;
            amplitude *= persistence;
            frequency *= lacunarity;
        }

        noise_value / weight
    }
}

impl std::fmt::Debug for NoiseSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseSource").field("seed", &self.seed).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_for_seed() {
        let a = NoiseSource::new(11);
        let b = NoiseSource::new(11);
        let point = [1.37, -4.2, 0.05];

        assert_eq!(a.get(point), b.get(point));
        assert_eq!(a.fractal(point, 3, 0.25, 8.0), b.fractal(point, 3, 0.25, 8.0));
    }

    #[test]
    fn test_seeds_differ() {
        let a = NoiseSource::new(1);
        let b = NoiseSource::new(2);
        let differs = (0..32).any(|i| {
            let point = [i as f64 * 0.731, i as f64 * 0.377, 0.5];
            a.get(point) != b.get(point)
        });
        assert!(differs);
    }

    #[test]
    fn test_fractal_stays_in_range() {
        let source = NoiseSource::new(99);
        for i in 0..500 {
            let point = [i as f64 * 0.173, (i * 7) as f64 * 0.091, i as f64 * 0.002];
            let value = source.fractal(point, 3, 0.25, 8.0);
            assert!(value.is_finite());
            assert!((-1.0..=1.0).contains(&value), "value {} out of range", value);
        }
    }

    #[test]
    fn test_coherent_over_small_steps() {
        let source = NoiseSource::new(5);
        let a = source.fractal([3.2, 7.1, 0.4], 2, 0.5, 2.0);
        let b = source.fractal([3.2001, 7.1, 0.4], 2, 0.5, 2.0);
        assert!((a - b).abs() < 0.01);
    }
}
