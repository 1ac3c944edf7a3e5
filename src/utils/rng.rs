use bevy::log::warn;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Hands out independent, reproducible random streams derived from one master seed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngManager {
    master_seed: u64,
}

impl RngManager {
    pub fn new(seed: u64) -> Self {
        Self { master_seed: seed }
    }

    /// Use the configured seed, or draw one from entropy when none is set.
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::new(seed),
            None => {
                let seed = rand::random();
                warn!("No wind seed provided, using entropy seed {}", seed);
                Self::new(seed)
            }
        }
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    // Get a new RNG for a consumer by hashing its name with master seed
    pub fn get_rng(&self, name: &str) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.derive_seed(name))
    }

    /// 32 bit seed for consumers such as noise functions that take a narrower seed
    pub fn get_seed_u32(&self, name: &str) -> u32 {
        let seed = self.derive_seed(name);
        (seed ^ (seed >> 32)) as u32
    }

    fn derive_seed(&self, name: &str) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.master_seed.hash(&mut hasher);
        name.hash(&mut hasher);
        hasher.finish()
    }
}

/// Standard normal draw using the Box-Muller transform.
pub fn gaussian<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // gen() is in [0, 1), flip it so ln never sees zero
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}
