mod sample;
mod tick;

pub use sample::wind_sample_system;
pub use tick::{wind_config_system, wind_tick_system};
