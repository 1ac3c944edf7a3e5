//! Altitude and severity dependent turbulence intensities.
//!
//! Below [`LOW_ALTITUDE_LIMIT`] the MIL-F-8785C low altitude power law sets
//! length scales from height above ground. Above [`HIGH_ALTITUDE_LIMIT`] the
//! length scales are fixed and intensity comes from the high altitude
//! exceedance tables, cross-faded by mean wind severity. Between the two the
//! parameters are blended linearly.

use serde::{Deserialize, Serialize};

use super::curve::ProfileCurve;
use crate::utils::{
    feet_to_metres, lerp, metres_to_feet, Result, HIGH_ALTITUDE_LENGTH_U,
    HIGH_ALTITUDE_LENGTH_V, HIGH_ALTITUDE_LENGTH_W, HIGH_ALTITUDE_LIMIT, LOW_ALTITUDE_LIMIT,
    MIN_SIGMA, SEVERITY_LIGHT, SEVERITY_MODERATE, SEVERITY_SEVERE,
};

/// Length scales (m) and intensities (m/s) for the three gust axes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TurbulenceParameters {
    pub length_scale_u: f64,
    pub length_scale_v: f64,
    pub length_scale_w: f64,
    pub sigma_u: f64,
    pub sigma_v: f64,
    pub sigma_w: f64,
}

impl TurbulenceParameters {
    fn blend(&self, other: &Self, factor: f64) -> Self {
        Self {
            length_scale_u: lerp(self.length_scale_u, other.length_scale_u, factor),
            length_scale_v: lerp(self.length_scale_v, other.length_scale_v, factor),
            length_scale_w: lerp(self.length_scale_w, other.length_scale_w, factor),
            sigma_u: lerp(self.sigma_u, other.sigma_u, factor),
            sigma_v: lerp(self.sigma_v, other.sigma_v, factor),
            sigma_w: lerp(self.sigma_w, other.sigma_w, factor),
        }
    }
}

/// The four lookup curves behind the gust model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurbulenceProfile {
    /// Sigma (ft/s) against altitude (ft), 10^-2 exceedance.
    pub light: ProfileCurve,
    /// Sigma (ft/s) against altitude (ft), 10^-3 exceedance.
    pub moderate: ProfileCurve,
    /// Sigma (ft/s) against altitude (ft), 10^-5 exceedance.
    pub severe: ProfileCurve,
    /// Mean wind multiplier against height above ground (m).
    pub altitude_multiplier: ProfileCurve,
}

impl Default for TurbulenceProfile {
    fn default() -> Self {
        Self::standard()
    }
}

impl TurbulenceProfile {
    /// MIL-F-8785C high altitude intensities plus the stock ground attenuation curve.
    pub fn standard() -> Self {
        Self {
            light: ProfileCurve::from_points(&[
                (500.0, 3.2),
                (1750.0, 2.2),
                (3750.0, 1.5),
                (7500.0, 0.0),
                (80000.0, 0.0),
            ]),
            moderate: ProfileCurve::from_points(&[
                (500.0, 6.6),
                (1750.0, 6.9),
                (3750.0, 7.4),
                (7500.0, 6.7),
                (15000.0, 4.6),
                (25000.0, 2.7),
                (35000.0, 0.4),
                (45000.0, 0.0),
                (80000.0, 0.0),
            ]),
            severe: ProfileCurve::from_points(&[
                (500.0, 15.6),
                (1750.0, 17.6),
                (3750.0, 23.0),
                (7500.0, 28.2),
                (15000.0, 30.2),
                (25000.0, 30.7),
                (35000.0, 31.0),
                (45000.0, 25.2),
                (55000.0, 18.5),
                (65000.0, 14.4),
                (75000.0, 10.8),
                (80000.0, 9.8),
            ]),
            altitude_multiplier: ProfileCurve::from_points(&[
                (0.0, 0.0),
                (2.0, 0.35),
                (10.0, 0.6),
                (50.0, 0.85),
                (300.0, 1.0),
                (10000.0, 1.0),
                (25000.0, 0.6),
                (70000.0, 0.2),
            ]),
        }
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Mean wind attenuation at the given height above ground.
    pub fn altitude_multiplier(&self, altitude_above_ground: f64) -> f64 {
        self.altitude_multiplier
            .evaluate(altitude_above_ground.max(0.0))
            .max(0.0)
    }

    /// Parameters at the given height above ground (m), altitude (m) and
    /// severity, the mean wind speed in m/s.
    pub fn parameters(
        &self,
        altitude_above_ground: f64,
        altitude: f64,
        severity: f64,
    ) -> TurbulenceParameters {
        // max() also maps NaN to zero
        let agl = altitude_above_ground.max(0.0);
        let severity = severity.max(0.0);

        if agl <= LOW_ALTITUDE_LIMIT {
            return Self::low_altitude(agl, severity);
        }
        let high = self.high_altitude(altitude, severity);
        if agl >= HIGH_ALTITUDE_LIMIT {
            return high;
        }

        let low = Self::low_altitude(LOW_ALTITUDE_LIMIT, severity);
        let factor = (agl - LOW_ALTITUDE_LIMIT) / (HIGH_ALTITUDE_LIMIT - LOW_ALTITUDE_LIMIT);
        low.blend(&high, factor)
    }

    fn low_altitude(agl: f64, severity: f64) -> TurbulenceParameters {
        let h = metres_to_feet(agl);
        let base = 0.177 + 0.000823 * h;

        let length_scale_u = feet_to_metres(h / base.powf(1.2));
        let sigma_w = severity.max(MIN_SIGMA);
        let sigma_u = sigma_w / base.powf(0.4);

        TurbulenceParameters {
            length_scale_u,
            length_scale_v: 0.5 * length_scale_u,
            length_scale_w: 0.5 * agl,
            sigma_u,
            sigma_v: sigma_u,
            sigma_w,
        }
    }

    fn high_altitude(&self, altitude: f64, severity: f64) -> TurbulenceParameters {
        let sigma = self.high_altitude_sigma(altitude, severity);
        TurbulenceParameters {
            length_scale_u: HIGH_ALTITUDE_LENGTH_U,
            length_scale_v: HIGH_ALTITUDE_LENGTH_V,
            length_scale_w: HIGH_ALTITUDE_LENGTH_W,
            sigma_u: sigma,
            sigma_v: sigma,
            sigma_w: sigma,
        }
    }

    /// Intensity in m/s, cross-faded between the named curves by severity.
    pub fn high_altitude_sigma(&self, altitude: f64, severity: f64) -> f64 {
        let h = metres_to_feet(altitude.max(0.0));
        let curve = |curve: &ProfileCurve| curve.evaluate(h).max(0.0);

        let sigma_ft = if severity <= SEVERITY_LIGHT {
            lerp(0.0, curve(&self.light), severity / SEVERITY_LIGHT)
        } else if severity <= SEVERITY_MODERATE {
            let factor = (severity - SEVERITY_LIGHT) / (SEVERITY_MODERATE - SEVERITY_LIGHT);
            lerp(curve(&self.light), curve(&self.moderate), factor)
        } else {
            let factor = (severity - SEVERITY_MODERATE) / (SEVERITY_SEVERE - SEVERITY_MODERATE);
            lerp(curve(&self.moderate), curve(&self.severe), factor)
        };

        feet_to_metres(sigma_ft).max(MIN_SIGMA)
    }
}
