use bevy::prelude::*;

use crate::components::{PrimaryVessel, WindBody};
use crate::resources::{EntityId, Telemetry, WindConfig, WindEngine, WindTelemetry};

/// Push edited settings into the engine.
pub fn wind_config_system(config: Res<WindConfig>, mut engine: ResMut<WindEngine>) {
    if config.is_changed() && !config.is_added() {
        engine.set_config(config.clone());
    }
}

/// Advance the engine one physics step from the host telemetry.
///
/// Without telemetry or without exactly one primary vessel the wind goes calm.
pub fn wind_tick_system(
    telemetry: Res<WindTelemetry>,
    vessels: Query<Entity, With<PrimaryVessel>>,
    bodies: Query<(Entity, &WindBody)>,
    mut engine: ResMut<WindEngine>,
) {
    let telemetry = match (telemetry.vessel, vessels.get_single()) {
        (Some(vessel), Ok(entity)) => Some(Telemetry {
            entity: EntityId::from(entity),
            vessel,
            submerged: bodies
                .iter()
                .filter(|(_, body)| body.submerged)
                .map(|(entity, _)| EntityId::from(entity))
                .collect(),
        }),
        _ => None,
    };

    engine.tick(telemetry.as_ref());
}
