pub mod constants;
pub mod errors;
pub mod math;
pub mod rng;

pub use constants::*;
pub use errors::*;
pub use math::*;
pub use rng::{gaussian, RngManager};
