use bevy::log::{debug, info};
use bevy::prelude::Resource;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::blend::BlendScheduler;
use super::config::WindConfig;
use super::turbulence::{GustModel, TurbulenceProfile};
use super::weather::{NoiseSource, WeatherField};
use crate::utils::{
    RngManager, GUST_BLEND_FRACTION, GUST_DURATION_JITTER, GUST_REFERENCE_SPEED,
    MAX_GUST_SPEED_FACTOR, MIN_GUST_DURATION, MIN_GUST_SPEED_FACTOR,
};

const WEATHER_STREAM: &str = "weather";
const GUST_STREAM: &str = "gusts";

/// Host side identifier of a body that can be pushed around by the wind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u64);

/// Orthonormal local surface frame expressed in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindBasis {
    pub north: Vector3<f64>,
    pub up: Vector3<f64>,
    pub east: Vector3<f64>,
}

impl Default for WindBasis {
    /// World x north, y up, z east.
    fn default() -> Self {
        Self {
            north: Vector3::x(),
            up: Vector3::y(),
            east: Vector3::z(),
        }
    }
}

impl WindBasis {
    pub fn new(north: Vector3<f64>, up: Vector3<f64>, east: Vector3<f64>) -> Self {
        Self { north, up, east }
    }

    pub fn to_world(&self, north: f64, up: f64, east: f64) -> Vector3<f64> {
        self.north * north + self.up * up + self.east * east
    }

    fn is_finite(&self) -> bool {
        self.north.iter().chain(self.up.iter()).chain(self.east.iter()).all(|c| c.is_finite())
    }
}

/// Vehicle state for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VesselState {
    /// Simulation time (s), monotonic.
    pub time: f64,
    /// Degrees.
    pub latitude: f64,
    /// Degrees.
    pub longitude: f64,
    /// Above the datum (m).
    pub altitude: f64,
    /// Above terrain (m).
    pub altitude_above_ground: f64,
    /// World frame (m/s).
    pub velocity: Vector3<f64>,
    pub basis: WindBasis,
}

impl Default for VesselState {
    fn default() -> Self {
        Self {
            time: 0.0,
            latitude: 0.0,
            longitude: 0.0,
            altitude: 0.0,
            altitude_above_ground: 0.0,
            velocity: Vector3::zeros(),
            basis: WindBasis::default(),
        }
    }
}

/// Everything the host hands the engine each tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Telemetry {
    /// The tracked vessel, the only body that feels gusts.
    pub entity: EntityId,
    pub vessel: VesselState,
    /// Bodies resting in water, which get no wind at all.
    pub submerged: Vec<EntityId>,
}

/// Point query answered by the engine once per body per tick.
pub trait WindSource {
    fn wind_at(&self, position: &Vector3<f64>, entity: EntityId) -> Vector3<f64>;
}

/// Scale on burst and blend durations, shorter gusts at higher airspeed.
pub fn gust_speed_factor(airspeed: f64) -> f64 {
    let factor = GUST_REFERENCE_SPEED / airspeed.abs();
    if factor.is_nan() {
        MAX_GUST_SPEED_FACTOR
    } else {
        factor.clamp(MIN_GUST_SPEED_FACTOR, MAX_GUST_SPEED_FACTOR)
    }
}

/// Composes the weather field and gust bursts into a world frame wind vector.
#[derive(Resource)]
pub struct WindEngine {
    config: WindConfig,
    rng_manager: RngManager,
    profile: Arc<TurbulenceProfile>,
    weather: WeatherField,
    gusts: GustModel,
    gust_blend: BlendScheduler<Vector3<f64>>,
    burst_start: f64,
    burst_duration: f64,
    last_gust_time: Option<f64>,
    primary: Option<EntityId>,
    submerged: Vec<EntityId>,
    mean_wind_world: Vector3<f64>,
    gust_world: Vector3<f64>,
    total: Vector3<f64>,
    last_time: f64,
}

impl WindEngine {
    pub fn new(config: WindConfig) -> Self {
        Self::with_profile(config, Arc::new(TurbulenceProfile::standard()))
    }

    pub fn with_profile(config: WindConfig, profile: Arc<TurbulenceProfile>) -> Self {
        let config = config.sanitized();
        let rng_manager = RngManager::from_optional_seed(config.seed);

        let weather = WeatherField::new(
            NoiseSource::new(rng_manager.get_seed_u32(WEATHER_STREAM)),
            config.median_speed,
        )
        .with_blend_duration(config.weather_blend_duration)
        .with_fixed_wind(config.fixed_wind);

        let mut gusts = GustModel::with_profile(Arc::clone(&profile), rng_manager.get_rng(GUST_STREAM));
        gusts.init();

        info!(
            "Wind engine ready: seed {}, median speed {:.2} m/s, gust duration {:.2} s, gust strength {:.2}",
            rng_manager.master_seed(),
            config.median_speed,
            config.gust_duration,
            config.gust_strength
        );

        Self {
            config,
            rng_manager,
            profile,
            weather,
            gusts,
            gust_blend: BlendScheduler::settled(Vector3::zeros()),
            burst_start: 0.0,
            burst_duration: 0.0,
            last_gust_time: None,
            primary: None,
            submerged: Vec::new(),
            mean_wind_world: Vector3::zeros(),
            gust_world: Vector3::zeros(),
            total: Vector3::zeros(),
            last_time: 0.0,
        }
    }

    /// Apply new settings. Durations and strength take effect from the next burst.
    pub fn set_config(&mut self, config: WindConfig) {
        let config = config.sanitized();

        if config.seed != self.config.seed {
            self.rng_manager = RngManager::from_optional_seed(config.seed);
            info!("Wind reseeded with {}", self.rng_manager.master_seed());
            self.weather
                .set_noise(NoiseSource::new(self.rng_manager.get_seed_u32(WEATHER_STREAM)));
            self.gusts.reseed(self.rng_manager.get_rng(GUST_STREAM));
        }

        self.weather.set_median_speed(config.median_speed);
        self.weather.set_fixed_wind(config.fixed_wind);
        self.weather.set_blend_duration(config.weather_blend_duration);
        self.config = config;
    }

    /// Replace the turbulence curves, restarting the gust process.
    pub fn load_profile(&mut self, profile: Arc<TurbulenceProfile>) {
        self.profile = Arc::clone(&profile);
        self.gusts.load_profile(profile);
    }

    /// Advance one physics step. Without telemetry every output is zero.
    pub fn tick(&mut self, telemetry: Option<&Telemetry>) {
        let telemetry = match telemetry {
            Some(telemetry) => telemetry,
            None => {
                self.primary = None;
                self.submerged.clear();
                self.go_calm();
                return;
            }
        };

        self.primary = Some(telemetry.entity);
        self.submerged.clone_from(&telemetry.submerged);

        let vessel = &telemetry.vessel;
        let now = if vessel.time.is_finite() {
            vessel.time
        } else {
            self.last_time
        };
        self.last_time = now;

        self.weather.sample(vessel.latitude, vessel.longitude, now);
        let mean = self.weather.mean_wind(now);
        if !self.weather.is_enabled() {
            self.go_calm();
            return;
        }

        let basis = if vessel.basis.is_finite() {
            vessel.basis
        } else {
            WindBasis::default()
        };
        let velocity = if vessel.velocity.iter().all(|c| c.is_finite()) {
            vessel.velocity
        } else {
            Vector3::zeros()
        };
        let altitude = finite_or_zero(vessel.altitude);
        let altitude_above_ground = finite_or_zero(vessel.altitude_above_ground);

        let (north, east) = mean.components();
        let multiplier = self.profile.altitude_multiplier(altitude_above_ground);
        let mean_world = basis.to_world(north * multiplier, 0.0, east * multiplier);

        if now - self.burst_start >= self.burst_duration {
            self.start_burst(now, &basis, (north, east), &mean_world, &velocity, altitude, altitude_above_ground);
        }

        self.mean_wind_world = mean_world;
        self.gust_world = self.gust_blend.value(now);
        self.total = self.mean_wind_world + self.gust_world;
    }

    #[allow(clippy::too_many_arguments)]
    fn start_burst(
        &mut self,
        now: f64,
        basis: &WindBasis,
        mean_components: (f64, f64),
        mean_world: &Vector3<f64>,
        velocity: &Vector3<f64>,
        altitude: f64,
        altitude_above_ground: f64,
    ) {
        let dt = match self.last_gust_time {
            Some(previous) => now - previous,
            None => self.config.gust_duration,
        };
        let sample = self
            .gusts
            .update(dt, mean_world, velocity, altitude, altitude_above_ground)
            * self.config.gust_strength;

        // u along the horizontal mean wind, w up, v completes the right handed frame
        let (north, east) = mean_components;
        let along = basis
            .to_world(north, 0.0, east)
            .try_normalize(f64::EPSILON)
            .unwrap_or(basis.north);
        let up = basis.up;
        let lateral = up.cross(&along);
        let gust_world = along * sample.x + lateral * sample.y + up * sample.z;

        let nominal = self.config.gust_duration;
        let jittered =
            (nominal + self.gusts.gauss() * nominal * GUST_DURATION_JITTER).max(MIN_GUST_DURATION);
        let factor = gust_speed_factor(velocity.norm());
        let duration = jittered * factor;
        let blend_duration = duration * GUST_BLEND_FRACTION;

        let old = self.gust_blend.value(now);
        self.gust_blend.start(old, gust_world, now, blend_duration);
        self.burst_start = now;
        self.burst_duration = duration;
        self.last_gust_time = Some(now);

        debug!(
            "Gust burst at {:.2}: {:.2} s, blend {:.2} s, magnitude {:.2} m/s",
            now,
            duration,
            blend_duration,
            gust_world.norm()
        );
    }

    fn go_calm(&mut self) {
        self.mean_wind_world = Vector3::zeros();
        self.gust_world = Vector3::zeros();
        self.total = Vector3::zeros();
        self.gust_blend = BlendScheduler::settled(Vector3::zeros());
        self.burst_duration = 0.0;
        self.last_gust_time = None;
    }

    pub fn config(&self) -> &WindConfig {
        &self.config
    }

    pub fn master_seed(&self) -> u64 {
        self.rng_manager.master_seed()
    }

    pub fn profile(&self) -> &TurbulenceProfile {
        &self.profile
    }

    pub fn weather(&self) -> &WeatherField {
        &self.weather
    }

    pub fn gusts(&self) -> &GustModel {
        &self.gusts
    }

    pub fn is_enabled(&self) -> bool {
        self.weather.is_enabled()
    }

    pub fn primary(&self) -> Option<EntityId> {
        self.primary
    }

    pub fn is_submerged(&self, entity: EntityId) -> bool {
        self.submerged.contains(&entity)
    }

    pub fn mean_wind_world(&self) -> Vector3<f64> {
        self.mean_wind_world
    }

    pub fn gust_world(&self) -> Vector3<f64> {
        self.gust_world
    }

    pub fn total(&self) -> Vector3<f64> {
        self.total
    }

    pub fn burst_start(&self) -> f64 {
        self.burst_start
    }

    pub fn burst_duration(&self) -> f64 {
        self.burst_duration
    }
}

impl WindSource for WindEngine {
    // uniform over space for a tick, so the position only matters to callers
    fn wind_at(&self, _position: &Vector3<f64>, entity: EntityId) -> Vector3<f64> {
        if self.is_submerged(entity) {
            Vector3::zeros()
        } else if self.primary == Some(entity) {
            self.total
        } else {
            self.mean_wind_world
        }
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
