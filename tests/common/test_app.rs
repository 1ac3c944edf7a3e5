use bevy::prelude::*;
use gustwind::{
    components::{PrimaryVessel, WindBody, WindSample},
    plugins::WindPlugin,
    resources::{VesselState, WindConfig, WindTelemetry},
};
use nalgebra::Vector3;

// Builder for creating a test application with customizable configuration
pub struct TestAppBuilder {
    config: Option<WindConfig>,
    plugin: Option<WindPlugin>,
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self {
            config: None,
            plugin: None,
        }
    }
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: WindConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_plugin(mut self, plugin: WindPlugin) -> Self {
        self.plugin = Some(plugin);
        self
    }

    pub fn build(self) -> TestApp {
        let mut app = App::new();

        let plugin = match (self.plugin, self.config) {
            (Some(plugin), _) => plugin,
            (None, Some(config)) => WindPlugin::with_config(config),
            (None, None) => WindPlugin::new(),
        };
        app.add_plugins(plugin);

        // Run an initial update to initialize everything
        app.update();

        TestApp { app }
    }
}

/// Main test application wrapper
pub struct TestApp {
    pub app: App,
}

impl TestApp {
    pub fn spawn_body(&mut self, position: Vector3<f64>, submerged: bool) -> Entity {
        self.app
            .world_mut()
            .spawn((WindBody { position, submerged }, WindSample::default()))
            .id()
    }

    pub fn spawn_vessel(&mut self) -> Entity {
        self.app
            .world_mut()
            .spawn((WindBody::default(), WindSample::default(), PrimaryVessel))
            .id()
    }

    pub fn set_vessel(&mut self, vessel: Option<VesselState>) {
        self.app.world_mut().resource_mut::<WindTelemetry>().vessel = vessel;
    }

    /// Run one physics step. A disabled plugin registers no fixed systems at all
    pub fn step(&mut self) {
        let _ = self.app.world_mut().try_run_schedule(FixedUpdate);
    }

    pub fn run_steps(&mut self, steps: usize, dt: f64, airspeed: f64) {
        for step in 0..steps {
            let vessel = crate::common::create_test_vessel(step as f64 * dt, airspeed);
            self.set_vessel(Some(vessel));
            self.step();
        }
    }

    pub fn get_state<T: Resource>(&self) -> Option<&T> {
        self.app.world().get_resource::<T>()
    }

    pub fn get_state_mut<T: Resource>(&mut self) -> Option<Mut<T>> {
        self.app.world_mut().get_resource_mut::<T>()
    }

    pub fn wind(&self, entity: Entity) -> Vector3<f64> {
        self.app
            .world()
            .get::<WindSample>(entity)
            .map(|sample| sample.velocity)
            .unwrap_or_else(|| panic!("No wind sample on {:?}", entity))
    }
}
