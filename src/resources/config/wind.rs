use bevy::log::warn;
use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::utils::{
    Result, WindError, MIN_GUST_DURATION, MIN_GUST_STRENGTH, WEATHER_BLEND_DURATION,
};

/// User facing wind settings.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindConfig {
    /// Median of the Rayleigh distributed weather wind speed (m/s).
    pub median_speed: f64,
    /// Nominal duration of a single gust burst (s).
    pub gust_duration: f64,
    /// Multiplier applied to every gust burst.
    pub gust_strength: f64,
    /// Seed for the weather noise and gust streams, entropy when unset.
    pub seed: Option<u64>,
    /// Length of a weather transition once wind is already blowing (s).
    pub weather_blend_duration: f64,
    /// Pins the mean wind instead of sampling the weather field.
    pub fixed_wind: Option<FixedWind>,
}

impl Default for WindConfig {
    fn default() -> Self {
        Self {
            median_speed: 0.0,
            gust_duration: 2.0,
            gust_strength: 2.0,
            seed: None,
            weather_blend_duration: WEATHER_BLEND_DURATION,
            fixed_wind: None,
        }
    }
}

impl WindConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: WindConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    pub fn with_median_speed(mut self, median_speed: f64) -> Self {
        self.median_speed = median_speed;
        self
    }

    pub fn with_gust_duration(mut self, gust_duration: f64) -> Self {
        self.gust_duration = gust_duration;
        self
    }

    pub fn with_gust_strength(mut self, gust_strength: f64) -> Self {
        self.gust_strength = gust_strength;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_fixed_wind(mut self, fixed_wind: FixedWind) -> Self {
        self.fixed_wind = Some(fixed_wind);
        self
    }

    /// Rejects values no floor can make sense of.
    fn validate(&self) -> Result<()> {
        let fields = [
            ("median_speed", self.median_speed),
            ("gust_duration", self.gust_duration),
            ("gust_strength", self.gust_strength),
            ("weather_blend_duration", self.weather_blend_duration),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(WindError::InvalidConfig(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Copy with every value floored to something the engine can run with.
    pub fn sanitized(&self) -> Self {
        let mut config = self.clone();

        if !config.median_speed.is_finite() || config.median_speed < 0.0 {
            warn!("Median wind speed {} floored to 0", config.median_speed);
            config.median_speed = 0.0;
        }
        if !(config.gust_duration >= MIN_GUST_DURATION) {
            warn!(
                "Gust duration {} floored to {}",
                config.gust_duration, MIN_GUST_DURATION
            );
            config.gust_duration = MIN_GUST_DURATION;
        }
        if !(config.gust_strength >= MIN_GUST_STRENGTH) {
            warn!(
                "Gust strength {} floored to {}",
                config.gust_strength, MIN_GUST_STRENGTH
            );
            config.gust_strength = MIN_GUST_STRENGTH;
        }
        if !(config.weather_blend_duration >= 0.0) {
            warn!(
                "Weather blend duration {} floored to 0",
                config.weather_blend_duration
            );
            config.weather_blend_duration = 0.0;
        }
        if let Some(fixed) = config.fixed_wind.as_mut() {
            if !fixed.speed.is_finite() || fixed.speed < 0.0 {
                warn!("Fixed wind speed {} floored to 0", fixed.speed);
                fixed.speed = 0.0;
            }
            if !fixed.direction.is_finite() {
                fixed.direction = 0.0;
            }
        }

        config
    }
}

/// A user pinned mean wind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedWind {
    /// m/s
    pub speed: f64,
    /// Compass bearing the air moves toward, degrees.
    pub direction: f64,
}

impl FixedWind {
    pub fn new(speed: f64, direction: f64) -> Self {
        Self { speed, direction }
    }

    /// Wind blowing from the given compass point.
    pub fn from_compass(from: CompassPoint, speed: f64) -> Self {
        Self {
            speed,
            direction: crate::utils::wrap_degrees(from.bearing() + 180.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompassPoint {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl CompassPoint {
    pub fn bearing(&self) -> f64 {
        match self {
            CompassPoint::North => 0.0,
            CompassPoint::NorthEast => 45.0,
            CompassPoint::East => 90.0,
            CompassPoint::SouthEast => 135.0,
            CompassPoint::South => 180.0,
            CompassPoint::SouthWest => 225.0,
            CompassPoint::West => 270.0,
            CompassPoint::NorthWest => 315.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = WindConfig::default();
        assert_eq!(config.median_speed, 0.0);
        assert_eq!(config.gust_duration, 2.0);
        assert_eq!(config.gust_strength, 2.0);
        assert_eq!(config.seed, None);
        assert_eq!(config.fixed_wind, None);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = WindConfig::from_yaml_str("median_speed: 8.5\nseed: 12\n").unwrap();
        assert_eq!(
            config,
            WindConfig::default().with_median_speed(8.5).with_seed(12)
        );
    }

    #[test]
    fn test_yaml_fixed_wind() {
        let yaml = "fixed_wind:\n  speed: 4.0\n  direction: 270.0\n";
        let config = WindConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.fixed_wind, Some(FixedWind::new(4.0, 270.0)));
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        assert!(matches!(
            WindConfig::from_yaml_str("median_speed: [1, 2]"),
            Err(WindError::Yaml(_))
        ));
        assert!(matches!(
            WindConfig::from_yaml_str("gust_strength: .nan"),
            Err(WindError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_sanitized_floors_values() {
        let config = WindConfig {
            median_speed: -3.0,
            gust_duration: -1.0,
            gust_strength: 0.0,
            weather_blend_duration: -5.0,
            fixed_wind: Some(FixedWind::new(-2.0, 90.0)),
            ..Default::default()
        }
        .sanitized();

        assert_eq!(config.median_speed, 0.0);
        assert_eq!(config.gust_duration, MIN_GUST_DURATION);
        assert_eq!(config.gust_strength, MIN_GUST_STRENGTH);
        assert_eq!(config.weather_blend_duration, 0.0);
        assert_eq!(config.fixed_wind, Some(FixedWind::new(0.0, 90.0)));
    }

    #[test]
    fn test_from_compass_blows_away_from_source() {
        assert_relative_eq!(
            FixedWind::from_compass(CompassPoint::North, 5.0).direction,
            180.0
        );
        assert_relative_eq!(
            FixedWind::from_compass(CompassPoint::SouthWest, 5.0).direction,
            45.0
        );
    }
}
