use bevy::prelude::*;

use crate::components::{WindBody, WindSample};
use crate::resources::{EntityId, WindEngine, WindSource};

/// Write the wind felt by every body this step.
pub fn wind_sample_system(
    engine: Res<WindEngine>,
    mut bodies: Query<(Entity, &WindBody, &mut WindSample)>,
) {
    for (entity, body, mut sample) in bodies.iter_mut() {
        sample.velocity = engine.wind_at(&body.position, EntityId::from(entity));
    }
}
