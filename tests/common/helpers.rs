use gustwind::resources::{
    EntityId, FixedWind, Telemetry, VesselState, WindBasis, WindConfig, WindEngine,
};
use nalgebra::Vector3;

pub const PRIMARY: EntityId = EntityId(1);
pub const OTHER: EntityId = EntityId(2);
pub const SUBMERGED: EntityId = EntityId(3);

/// Vessel flying north at the given airspeed, 500 m above flat ground at sea level
pub fn create_test_vessel(time: f64, airspeed: f64) -> VesselState {
    let basis = WindBasis::default();
    VesselState {
        time,
        latitude: 51.25,
        longitude: -1.1,
        altitude: 500.0,
        altitude_above_ground: 500.0,
        velocity: basis.to_world(airspeed, 0.0, 0.0),
        basis,
    }
}

pub fn create_test_telemetry(time: f64, airspeed: f64) -> Telemetry {
    Telemetry {
        entity: PRIMARY,
        vessel: create_test_vessel(time, airspeed),
        submerged: vec![SUBMERGED],
    }
}

/// Procedural weather with the given median
pub fn create_weather_config(median_speed: f64, seed: u64) -> WindConfig {
    WindConfig::default()
        .with_median_speed(median_speed)
        .with_seed(seed)
}

/// Pinned 10 m/s wind blowing toward the east
pub fn create_fixed_config(seed: u64) -> WindConfig {
    WindConfig::default()
        .with_seed(seed)
        .with_fixed_wind(FixedWind::new(10.0, 90.0))
}

/// Tick the engine at a fixed step, returning the primary vessel's wind for each tick
pub fn run_engine(engine: &mut WindEngine, steps: usize, dt: f64, airspeed: f64) -> Vec<Vector3<f64>> {
    (0..steps)
        .map(|step| {
            let telemetry = create_test_telemetry(step as f64 * dt, airspeed);
            engine.tick(Some(&telemetry));
            engine.total()
        })
        .collect()
}
