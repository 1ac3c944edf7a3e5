use bevy::log::{debug, info};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use super::noise::NoiseSource;
use crate::resources::blend::{BlendScheduler, MeanWind};
use crate::resources::config::FixedWind;
use crate::utils::{
    bearing_degrees, wrap_degrees, MAX_NOISE_PROBABILITY, MIN_ENABLED_MEDIAN_SPEED, WEATHER_BLEND_DURATION,
    WEATHER_CELL_DEGREES, WEATHER_TIME_BUCKET,
};

// Speed noise: three octaves, rough at large scale, fine detail kept faint
const SPEED_SPATIAL_SCALE: f64 = 0.1;
const SPEED_OCTAVES: u32 = 3;
const SPEED_PERSISTENCE: f64 = 0.25;
const SPEED_LACUNARITY: f64 = 8.0;

// Direction potential
const DIRECTION_SPATIAL_SCALE: f64 = 0.05;
const DIRECTION_OFFSET: f64 = 10.0;
const DIRECTION_OCTAVES: u32 = 2;
const DIRECTION_PERSISTENCE: f64 = 0.5;
const DIRECTION_LACUNARITY: f64 = 2.0;
const CURL_EPSILON: f64 = 0.01;

const TIME_SCALE: f64 = 0.002;

/// Quantized (latitude, longitude, time) key of one weather cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeatherCell {
    pub latitude_index: i64,
    pub longitude_index: i64,
    pub time_cell: i64,
}

impl WeatherCell {
    pub fn containing(latitude: f64, longitude: f64, game_time: f64) -> Self {
        Self {
            latitude_index: quantize(latitude, WEATHER_CELL_DEGREES),
            longitude_index: quantize(longitude, WEATHER_CELL_DEGREES),
            time_cell: quantize(game_time, WEATHER_TIME_BUCKET),
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude_index as f64 * WEATHER_CELL_DEGREES
    }

    pub fn longitude(&self) -> f64 {
        self.longitude_index as f64 * WEATHER_CELL_DEGREES
    }
}

// Non finite inputs land in cell zero rather than poisoning the noise lookups
fn quantize(value: f64, step: f64) -> i64 {
    let index = (value / step).floor();
    if index.is_finite() {
        index as i64
    } else {
        0
    }
}

/// Mean wind for one weather cell. Superseded by the next sample, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    /// Southern edge of the cell, degrees.
    pub latitude_cell: f64,
    /// Western edge of the cell, degrees.
    pub longitude_cell: f64,
    pub time_cell: i64,
    /// m/s, never negative.
    pub speed: f64,
    /// Bearing the air moves toward, degrees in [0, 360).
    pub direction: f64,
}

impl WeatherSample {
    pub fn mean_wind(&self) -> MeanWind {
        MeanWind::new(self.speed, self.direction)
    }
}

/// Convert a probability in [0, 1) to a Rayleigh distributed speed with the given median.
pub fn rayleigh_speed(probability: f64, median: f64) -> f64 {
    let p = probability.clamp(0.0, MAX_NOISE_PROBABILITY);
    let sigma_sq = -(median * median) / (2.0 * 0.5_f64.ln());
    (-2.0 * sigma_sq * (1.0 - p).ln()).sqrt()
}

/// Slowly evolving mean wind derived from coherent noise over location and time.
///
/// Samples are memoized per [`WeatherCell`]; a new cell (or a forced refresh
/// after a settings change) starts a transition on the weather blend.
#[derive(Debug, Clone)]
pub struct WeatherField {
    noise: NoiseSource,
    median_speed: f64,
    fixed_wind: Option<FixedWind>,
    blend_duration: f64,
    cell: Option<WeatherCell>,
    current: Option<WeatherSample>,
    blend: BlendScheduler<MeanWind>,
    enabled: bool,
    needs_refresh: bool,
    recomputes: u64,
}

impl WeatherField {
    pub fn new(noise: NoiseSource, median_speed: f64) -> Self {
        Self {
            noise,
            median_speed: median_speed.max(0.0),
            fixed_wind: None,
            blend_duration: WEATHER_BLEND_DURATION,
            cell: None,
            current: None,
            blend: BlendScheduler::settled(MeanWind::CALM),
            enabled: false,
            needs_refresh: true,
            recomputes: 0,
        }
    }

    pub fn with_blend_duration(mut self, duration: f64) -> Self {
        self.blend_duration = duration.max(0.0);
        self
    }

    pub fn with_fixed_wind(mut self, fixed_wind: Option<FixedWind>) -> Self {
        self.fixed_wind = fixed_wind;
        self
    }

    /// Memoized sample for the cell containing the given location and time.
    pub fn sample(&mut self, latitude: f64, longitude: f64, game_time: f64) -> WeatherSample {
        let cell = WeatherCell::containing(latitude, longitude, game_time);
        match self.current {
            Some(current) if !self.needs_refresh && self.cell == Some(cell) => current,
            _ => self.recompute(cell, game_time),
        }
    }

    fn recompute(&mut self, cell: WeatherCell, game_time: f64) -> WeatherSample {
        let was_enabled = self.enabled;
        let sample = match self.fixed_wind {
            Some(fixed) => WeatherSample {
                latitude_cell: cell.latitude(),
                longitude_cell: cell.longitude(),
                time_cell: cell.time_cell,
                speed: fixed.speed.max(0.0),
                direction: wrap_degrees(fixed.direction),
            },
            None => self.compute(cell),
        };

        self.enabled = self.target_speed() >= MIN_ENABLED_MEDIAN_SPEED;

        let duration = if was_enabled { self.blend_duration } else { 0.0 };
        let old = self.blend.value(game_time);
        self.blend.start(old, sample.mean_wind(), game_time, duration);

        debug!(
            "Weather cell ({}, {}, {}): speed {:.2} m/s toward {:.1} deg, blend {:.1} s",
            sample.latitude_cell,
            sample.longitude_cell,
            sample.time_cell,
            sample.speed,
            sample.direction,
            duration
        );

        self.cell = Some(cell);
        self.current = Some(sample);
        self.needs_refresh = false;
        self.recomputes += 1;
        sample
    }

    fn compute(&self, cell: WeatherCell) -> WeatherSample {
        let latitude = cell.latitude();
        let longitude = cell.longitude();
        let time = cell.time_cell as f64 * TIME_SCALE;

        WeatherSample {
            latitude_cell: latitude,
            longitude_cell: longitude,
            time_cell: cell.time_cell,
            speed: rayleigh_speed(self.speed_probability(latitude, longitude, time), self.median_speed),
            direction: self.curl_direction(latitude, longitude, time),
        }
    }

    fn speed_probability(&self, latitude: f64, longitude: f64, time: f64) -> f64 {
        let n = self.noise.fractal(
            [latitude * SPEED_SPATIAL_SCALE, longitude * SPEED_SPATIAL_SCALE, time],
            SPEED_OCTAVES,
            SPEED_PERSISTENCE,
            SPEED_LACUNARITY,
        );
        (0.5 * (n + 1.0)).clamp(0.0, MAX_NOISE_PROBABILITY)
    }

    /// Direction of the 2D curl of a noise potential. Finite differences keep
    /// the field smooth across cell boundaries.
    fn curl_direction(&self, latitude: f64, longitude: f64, time: f64) -> f64 {
        let x = latitude * DIRECTION_SPATIAL_SCALE + DIRECTION_OFFSET;
        let y = longitude * DIRECTION_SPATIAL_SCALE;
        let potential = |x: f64, y: f64| {
            self.noise.fractal(
                [x, y, time],
                DIRECTION_OCTAVES,
                DIRECTION_PERSISTENCE,
                DIRECTION_LACUNARITY,
            )
        };

        let d_dx = (potential(x + CURL_EPSILON, y) - potential(x - CURL_EPSILON, y))
            / (2.0 * CURL_EPSILON);
        let d_dy = (potential(x, y + CURL_EPSILON) - potential(x, y - CURL_EPSILON))
            / (2.0 * CURL_EPSILON);

        // x runs north and y runs east, so the curl is (d/dy, -d/dx) in (north, east)
        match Vector2::new(d_dy, -d_dx).try_normalize(f64::EPSILON) {
            Some(direction) => bearing_degrees(direction.x, direction.y),
            None => 0.0,
        }
    }

    /// Blended mean wind at `now`.
    pub fn mean_wind(&mut self, now: f64) -> MeanWind {
        self.blend.value(now)
    }

    /// Change the target median; the next `sample` recomputes even inside the same cell.
    pub fn set_median_speed(&mut self, median_speed: f64) {
        let median_speed = median_speed.max(0.0);
        if median_speed != self.median_speed {
            info!(
                "Median wind speed changed {:.2} -> {:.2} m/s",
                self.median_speed, median_speed
            );
            self.median_speed = median_speed;
            self.needs_refresh = true;
        }
    }

    pub fn set_fixed_wind(&mut self, fixed_wind: Option<FixedWind>) {
        if fixed_wind != self.fixed_wind {
            self.fixed_wind = fixed_wind;
            self.needs_refresh = true;
        }
    }

    pub fn set_blend_duration(&mut self, duration: f64) {
        self.blend_duration = duration.max(0.0);
    }

    /// Swap the noise source, e.g. after a reseed.
    pub fn set_noise(&mut self, noise: NoiseSource) {
        self.noise = noise;
        self.needs_refresh = true;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn current(&self) -> Option<&WeatherSample> {
        self.current.as_ref()
    }

    pub fn median_speed(&self) -> f64 {
        self.median_speed
    }

    /// Number of samples computed so far.
    pub fn recomputes(&self) -> u64 {
        self.recomputes
    }

    fn target_speed(&self) -> f64 {
        match self.fixed_wind {
            Some(fixed) => fixed.speed,
            None => self.median_speed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::RngManager;
    use approx::assert_relative_eq;
    use rand::Rng;

    fn field(median: f64) -> WeatherField {
        WeatherField::new(NoiseSource::new(1234), median)
    }

    #[test]
    fn test_rayleigh_median_maps_to_half() {
        assert_relative_eq!(rayleigh_speed(0.5, 7.0), 7.0, epsilon = 1e-9);
        assert_relative_eq!(rayleigh_speed(0.0, 7.0), 0.0);
    }

    #[test]
    fn test_rayleigh_empirical_median() {
        let median = 9.0;
        let mut rng = RngManager::new(3).get_rng("rayleigh");
        let mut speeds: Vec<f64> = (0..20_000)
            .map(|_| rayleigh_speed(rng.gen::<f64>(), median))
            .collect();
        speeds.sort_by(|a, b| a.total_cmp(b));

        let empirical = speeds[speeds.len() / 2];
        assert!(
            (empirical - median).abs() < 0.25,
            "empirical median {} vs {}",
            empirical,
            median
        );
    }

    #[test]
    fn test_noise_driven_speeds_have_configured_median() {
        let median = 9.0;
        let field = field(median);
        let mut speeds: Vec<f64> = (0..100)
            .flat_map(|i| (0..100).map(move |j| (i, j)))
            .map(|(i, j)| {
                let latitude = i as f64 * 17.3 - 860.0;
                let longitude = j as f64 * 23.9 - 1190.0;
                let time = (i * 100 + j) as f64 * 0.61;
                let probability = field.speed_probability(latitude, longitude, time);
                assert!((0.0..=MAX_NOISE_PROBABILITY).contains(&probability));
                rayleigh_speed(probability, median)
            })
            .collect();
        speeds.sort_by(|a, b| a.total_cmp(b));

        assert!(speeds.iter().all(|speed| speed.is_finite() && *speed >= 0.0));
        let empirical = speeds[speeds.len() / 2];
        assert!(
            (empirical - median).abs() < 0.1 * median,
            "empirical median {} vs {}",
            empirical,
            median
        );
    }

    #[test]
    fn test_rayleigh_boundary_is_finite() {
        let speed = rayleigh_speed(1.0, 10.0);
        assert!(speed.is_finite());
        assert_relative_eq!(speed, rayleigh_speed(MAX_NOISE_PROBABILITY, 10.0));
    }

    #[test]
    fn test_sample_is_memoized_per_cell() {
        let mut field = field(10.0);
        let first = field.sample(12.1, 45.1, 30.0);
        let second = field.sample(12.2, 45.2, 600.0);

        assert_eq!(first, second);
        assert_eq!(field.recomputes(), 1);
    }

    #[test]
    fn test_new_cell_recomputes() {
        let mut field = field(10.0);
        field.sample(12.1, 45.1, 30.0);
        field.sample(12.3, 45.1, 30.0);
        assert_eq!(field.recomputes(), 2);
        field.sample(12.3, 45.1, 1300.0);
        assert_eq!(field.recomputes(), 3);
    }

    #[test]
    fn test_median_change_forces_refresh() {
        let mut field = field(10.0);
        field.sample(0.0, 0.0, 0.0);
        field.set_median_speed(10.0);
        field.sample(0.0, 0.0, 0.0);
        assert_eq!(field.recomputes(), 1);

        field.set_median_speed(20.0);
        let sample = field.sample(0.0, 0.0, 0.0);
        assert_eq!(field.recomputes(), 2);
        assert!(sample.speed >= 0.0);
    }

    #[test]
    fn test_sample_values_in_range() {
        let mut field = field(10.0);
        for i in 0..200 {
            let sample = field.sample(i as f64 * 0.37 - 40.0, i as f64 * 1.3 - 120.0, i as f64 * 1500.0);
            assert!(sample.speed.is_finite() && sample.speed >= 0.0);
            assert!((0.0..360.0).contains(&sample.direction));
        }
    }

    #[test]
    fn test_calm_below_floor() {
        let mut field = field(0.05);
        field.sample(1.0, 1.0, 0.0);
        assert!(!field.is_enabled());

        field.set_median_speed(5.0);
        field.sample(1.0, 1.0, 0.0);
        assert!(field.is_enabled());
    }

    #[test]
    fn test_first_enable_snaps_then_blends() {
        let mut field = field(10.0);
        let first = field.sample(1.0, 1.0, 0.0);
        assert_relative_eq!(field.mean_wind(0.0).speed, first.speed);

        // move one cell east and watch the transition
        let second = field.sample(1.0, 1.3, 10.0);
        assert_relative_eq!(field.mean_wind(10.0).speed, first.speed);
        assert_relative_eq!(field.mean_wind(15.0).speed, second.speed);
    }

    #[test]
    fn test_fixed_wind_overrides_noise() {
        let mut field = field(10.0).with_fixed_wind(Some(FixedWind::new(6.0, -90.0)));
        let sample = field.sample(3.0, 3.0, 0.0);

        assert_relative_eq!(sample.speed, 6.0);
        assert_relative_eq!(sample.direction, 270.0);
        assert!(field.is_enabled());
    }

    #[test]
    fn test_neighbouring_directions_are_smooth() {
        let mut field = field(10.0);
        let pairs = 20;
        let total: f64 = (0..pairs)
            .map(|i| {
                let latitude = 20.0 + i as f64 * 3.1;
                let a = field.sample(latitude, 20.0, 0.0).direction;
                let b = field.sample(latitude, 20.25, 0.0).direction;
                crate::utils::shortest_arc(a, b).abs()
            })
            .sum();
        let mean_delta = total / pairs as f64;
        assert!(mean_delta < 30.0, "adjacent cells differ by {} deg on average", mean_delta);
    }

    #[test]
    fn test_non_finite_position_falls_back() {
        let mut field = field(10.0);
        let sample = field.sample(f64::NAN, f64::INFINITY, 0.0);
        assert!(sample.speed.is_finite());
    }
}
