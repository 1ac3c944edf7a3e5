//! Dryden style gust generation.
//!
//! Each axis is a discrete filter driven by white noise and stepped by the
//! frozen turbulence distance, the distance flown through the (wind advected)
//! turbulence field since the previous update. The along-wind axis is a
//! single pole low-pass with the exponential autocorrelation of the Dryden
//! longitudinal spectrum. The lateral and vertical axes run two single pole
//! stages in cascade: the first at 1.2 L driven by fresh noise, the second at
//! 3 L driven by the first stage's previous output. Mixing them 9/8 and -1/8
//! approximates the flatter Dryden transverse spectrum without the
//! instability of the exact second order recurrence at short sampling
//! distances.

use bevy::log::debug;
use nalgebra::Vector3;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::profile::{TurbulenceParameters, TurbulenceProfile};
use crate::utils::{gaussian, MIN_TRAVEL_FRACTION};

const SHORT_LENGTH_FACTOR: f64 = 1.2;
const LONG_LENGTH_FACTOR: f64 = 3.0;
const SHORT_MIX: f64 = 9.0 / 8.0;
const LONG_MIX: f64 = -1.0 / 8.0;

/// Filter memory of a lateral or vertical axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CascadeState {
    /// Stage outputs: `[0]` at 1.2 L fed by noise, `[1]` at 3 L fed by `[0]`.
    pub stages: [f64; 2],
}

/// Filter memory of all three axes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GustProcessState {
    pub u: f64,
    pub v: CascadeState,
    pub w: CascadeState,
    /// Last unit variance output per axis, held while an axis is frozen.
    pub unit: [f64; 3],
}

/// Gains `(a, b)` of a single pole stage `y' = b x + a y`, where `b` carries
/// the normalization `gain`.
fn stage_gains(length: f64, travel: f64, gain: f64) -> (f64, f64) {
    let denominator = travel + length;
    (length / denominator, gain * travel / denominator)
}

/// One step of the along-wind process. Unit variance while `travel << length`.
pub fn step_longitudinal(y: f64, noise: f64, length: f64, travel: f64) -> f64 {
    let b = (2.0 * length * travel).sqrt() / (travel + length);
    let a = length / (travel + length);
    b * noise + a * y
}

/// One step of a lateral or vertical process, returning the unit variance output.
pub fn step_transverse(state: &mut CascadeState, noise: f64, length: f64, travel: f64) -> f64 {
    let short_length = SHORT_LENGTH_FACTOR * length;
    let long_length = LONG_LENGTH_FACTOR * length;
    let (a1, b1) = stage_gains(short_length, travel, (2.0 * short_length).sqrt());
    let (a2, b2) = stage_gains(long_length, travel, (2.0 * long_length).sqrt().sqrt());

    let previous = state.stages[0];
    state.stages[0] = b1 * noise + a1 * state.stages[0];
    state.stages[1] = b2 * previous + a2 * state.stages[1];

    (SHORT_MIX * state.stages[0] + LONG_MIX * state.stages[1]) / travel.sqrt()
}

/// Sigma of a sample that averages over `travel`; longer than one length scale
/// loses variance as L / T.
pub fn averaged_sigma(sigma: f64, length: f64, travel: f64) -> f64 {
    if travel > length && length > 0.0 {
        sigma * (length / travel).sqrt()
    } else {
        sigma
    }
}

/// Stochastic three axis gust generator.
///
/// Output axes are wind aligned: u along the mean wind, v lateral, w vertical.
pub struct GustModel {
    profile: Option<Arc<TurbulenceProfile>>,
    state: GustProcessState,
    parameters: TurbulenceParameters,
    last_travel: f64,
    rng: ChaCha8Rng,
}

impl GustModel {
    /// Model without curves; they are loaded by [`GustModel::init`] or the first update.
    pub fn new(rng: ChaCha8Rng) -> Self {
        Self {
            profile: None,
            state: GustProcessState::default(),
            parameters: TurbulenceParameters::default(),
            last_travel: 0.0,
            rng,
        }
    }

    pub fn with_profile(profile: Arc<TurbulenceProfile>, rng: ChaCha8Rng) -> Self {
        Self {
            profile: Some(profile),
            ..Self::new(rng)
        }
    }

    /// Load the standard curves if none are loaded yet. Repeated calls do nothing.
    pub fn init(&mut self) {
        self.shared_profile();
    }

    /// Replace the curves and restart the filters.
    pub fn load_profile(&mut self, profile: Arc<TurbulenceProfile>) {
        self.profile = Some(profile);
        self.reset();
    }

    /// Swap the random stream and restart the filters.
    pub fn reseed(&mut self, rng: ChaCha8Rng) {
        self.rng = rng;
        self.reset();
    }

    pub fn reset(&mut self) {
        self.state = GustProcessState::default();
        self.parameters = TurbulenceParameters::default();
        self.last_travel = 0.0;
    }

    /// Standard normal draw from the model's stream.
    pub fn gauss(&mut self) -> f64 {
        gaussian(&mut self.rng)
    }

    pub fn profile(&mut self) -> &TurbulenceProfile {
        self.profile
            .get_or_insert_with(|| Arc::new(TurbulenceProfile::standard()))
    }

    fn shared_profile(&mut self) -> Arc<TurbulenceProfile> {
        Arc::clone(
            self.profile
                .get_or_insert_with(|| Arc::new(TurbulenceProfile::standard())),
        )
    }

    pub fn is_initialized(&self) -> bool {
        self.profile.is_some()
    }

    pub fn state(&self) -> &GustProcessState {
        &self.state
    }

    pub fn parameters(&self) -> &TurbulenceParameters {
        &self.parameters
    }

    /// Frozen turbulence distance used by the last update (m).
    pub fn last_travel(&self) -> f64 {
        self.last_travel
    }

    /// Advance the filters by `dt` and return a new (u, v, w) gust sample in m/s.
    pub fn update(
        &mut self,
        dt: f64,
        wind_velocity: &Vector3<f64>,
        vehicle_velocity: &Vector3<f64>,
        altitude: f64,
        altitude_above_ground: f64,
    ) -> Vector3<f64> {
        let profile = self.shared_profile();
        let params = profile.parameters(altitude_above_ground, altitude, wind_velocity.norm());
        self.parameters = params;

        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let mut travel = dt * (wind_velocity + vehicle_velocity).norm();
        if !travel.is_finite() {
            travel = 0.0;
        }
        if dt > 0.0 {
            // keeps the filters from sticking after a drop from high to low airspeed
            travel = travel.max(MIN_TRAVEL_FRACTION * params.length_scale_v);
        }
        self.last_travel = travel;

        if travel > 0.0 {
            if params.length_scale_u > 0.0 {
                let noise = self.gauss();
                self.state.u = step_longitudinal(self.state.u, noise, params.length_scale_u, travel);
                self.state.unit[0] = self.state.u;
            }
            if params.length_scale_v > 0.0 {
                let noise = self.gauss();
                self.state.unit[1] =
                    step_transverse(&mut self.state.v, noise, params.length_scale_v, travel);
            }
            if params.length_scale_w > 0.0 {
                let noise = self.gauss();
                self.state.unit[2] =
                    step_transverse(&mut self.state.w, noise, params.length_scale_w, travel);
            }
        }

        let gust = Vector3::new(
            self.state.unit[0] * averaged_sigma(params.sigma_u, params.length_scale_u, travel),
            self.state.unit[1] * averaged_sigma(params.sigma_v, params.length_scale_v, travel),
            self.state.unit[2] * averaged_sigma(params.sigma_w, params.length_scale_w, travel),
        );

        debug!(
            "Gust update: T={:.2} m, L=({:.1}, {:.1}, {:.1}) m, gust={:?}",
            travel, params.length_scale_u, params.length_scale_v, params.length_scale_w, gust
        );

        gust
    }
}
