mod field;
mod noise;

pub use field::{rayleigh_speed, WeatherCell, WeatherField, WeatherSample};
pub use self::noise::NoiseSource;
