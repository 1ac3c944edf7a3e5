mod blend;
pub mod config;
mod engine;
mod telemetry;
pub mod turbulence;
pub mod weather;

pub use blend::{Blend, BlendScheduler, Heading, MeanWind};
pub use config::{CompassPoint, FixedWind, WindConfig};
pub use engine::{
    gust_speed_factor, EntityId, Telemetry, VesselState, WindBasis, WindEngine, WindSource,
};
pub use telemetry::WindTelemetry;
pub use turbulence::{GustModel, GustProcessState, TurbulenceParameters, TurbulenceProfile};
pub use weather::{NoiseSource, WeatherField, WeatherSample};
