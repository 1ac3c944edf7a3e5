use bevy::prelude::*;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::resources::EntityId;

/// A body the wind acts on.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct WindBody {
    /// Position in world space [m]
    pub position: Vector3<f64>,
    /// Resting in water, sheltered from the wind
    pub submerged: bool,
}

impl Default for WindBody {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            submerged: false,
        }
    }
}

/// Wind velocity at a body for the current physics step.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct WindSample {
    /// World space [m/s]
    pub velocity: Vector3<f64>,
}

impl Default for WindSample {
    fn default() -> Self {
        Self {
            velocity: Vector3::zeros(),
        }
    }
}

/// Marks the vessel the telemetry describes, the only body that feels gusts.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PrimaryVessel;

impl From<Entity> for EntityId {
    fn from(entity: Entity) -> Self {
        EntityId(entity.to_bits())
    }
}
