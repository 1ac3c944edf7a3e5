pub mod wind;

pub use wind::{wind_config_system, wind_sample_system, wind_tick_system};
