pub mod components;
pub mod plugins;
pub mod resources;
pub mod systems;
pub mod utils;

pub use components::{PrimaryVessel, WindBody, WindSample};
pub use plugins::{WindPlugin, WindSet};
pub use resources::{
    EntityId, Telemetry, VesselState, WindBasis, WindConfig, WindEngine, WindSource, WindTelemetry,
};
pub use utils::{Result, WindError};
