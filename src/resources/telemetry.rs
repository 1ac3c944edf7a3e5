use bevy::prelude::Resource;

use super::engine::VesselState;

/// Latest vessel state, written by the host every physics step.
///
/// `None` means no vessel is active and the wind goes calm.
#[derive(Resource, Debug, Clone, Default)]
pub struct WindTelemetry {
    pub vessel: Option<VesselState>,
}

impl WindTelemetry {
    pub fn new(vessel: VesselState) -> Self {
        Self {
            vessel: Some(vessel),
        }
    }
}
