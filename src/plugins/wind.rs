use bevy::log::warn;
use bevy::prelude::*;
use std::path::Path;

use crate::resources::{WindConfig, WindEngine, WindTelemetry};
use crate::systems::{wind_config_system, wind_sample_system, wind_tick_system};

/// Wind update stages
#[derive(Debug, Hash, PartialEq, Eq, Clone, SystemSet)]
pub enum WindSet {
    Tick,
    Sample,
}

/// Registers the wind engine with the host app.
///
/// A disabled plugin registers nothing but the telemetry slot, so hosts keep
/// running without wind when the settings could not be loaded.
pub struct WindPlugin {
    pub config: Option<WindConfig>,
    pub enabled: bool,
}

impl Default for WindPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl WindPlugin {
    pub fn new() -> Self {
        Self {
            config: None,
            enabled: true,
        }
    }

    pub fn with_config(config: WindConfig) -> Self {
        Self {
            config: Some(config),
            enabled: true,
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Self {
        match WindConfig::from_file(path.as_ref()) {
            Ok(config) => Self::with_config(config),
            Err(err) => {
                warn!(
                    "Failed to load wind config from {}: {}, wind disabled",
                    path.as_ref().display(),
                    err
                );
                Self {
                    config: None,
                    enabled: false,
                }
            }
        }
    }

    fn setup_config(mut commands: Commands, config: Option<WindConfig>) {
        commands.insert_resource(config.unwrap_or_default());
    }

    fn setup_engine(mut commands: Commands, config: Option<Res<WindConfig>>) {
        let config = config.map(|cfg| cfg.clone()).unwrap_or_default();
        commands.insert_resource(WindEngine::new(config));
    }

    fn setup_config_with_initial(
        config: Option<WindConfig>,
    ) -> impl FnMut(Commands) + Send + Sync + 'static {
        move |commands: Commands| {
            Self::setup_config(commands, config.clone());
        }
    }
}

impl Plugin for WindPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WindTelemetry>();

        if !self.enabled {
            return;
        }

        let config = self.config.clone();
        app.add_systems(
            Startup,
            (Self::setup_config_with_initial(config), Self::setup_engine).chain(),
        );

        app.configure_sets(FixedUpdate, (WindSet::Tick, WindSet::Sample).chain());

        app.add_systems(
            FixedUpdate,
            (
                (wind_config_system, wind_tick_system)
                    .chain()
                    .in_set(WindSet::Tick),
                wind_sample_system.in_set(WindSet::Sample),
            )
                .run_if(resource_exists::<WindEngine>),
        );
    }
}
