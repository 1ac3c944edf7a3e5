use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::utils::{lerp, lerp_degrees, wrap_degrees};

/// Values that can be interpolated toward a target.
pub trait Blend: Clone {
    /// `progress` is in [0, 1]; 0 yields `self`, 1 yields `target`.
    fn blend(&self, target: &Self, progress: f64) -> Self;
}

impl Blend for f64 {
    fn blend(&self, target: &Self, progress: f64) -> Self {
        lerp(*self, *target, progress)
    }
}

impl Blend for Vector3<f64> {
    fn blend(&self, target: &Self, progress: f64) -> Self {
        self + (target - self) * progress.clamp(0.0, 1.0)
    }
}

/// Compass angle in degrees, blended along the shorter arc.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Heading(f64);

impl Heading {
    pub fn new(degrees: f64) -> Self {
        Self(wrap_degrees(degrees))
    }

    pub fn degrees(&self) -> f64 {
        self.0
    }
}

impl Blend for Heading {
    fn blend(&self, target: &Self, progress: f64) -> Self {
        Heading(lerp_degrees(self.0, target.0, progress))
    }
}

/// Mean wind in the local surface frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeanWind {
    /// m/s
    pub speed: f64,
    /// Bearing the air moves toward.
    pub direction: Heading,
}

impl MeanWind {
    pub const CALM: MeanWind = MeanWind {
        speed: 0.0,
        direction: Heading(0.0),
    };

    pub fn new(speed: f64, direction: f64) -> Self {
        Self {
            speed,
            direction: Heading::new(direction),
        }
    }

    /// (north, east) velocity components.
    pub fn components(&self) -> (f64, f64) {
        let bearing = self.direction.degrees().to_radians();
        (self.speed * bearing.cos(), self.speed * bearing.sin())
    }
}

impl Blend for MeanWind {
    fn blend(&self, target: &Self, progress: f64) -> Self {
        Self {
            speed: self.speed.blend(&target.speed, progress),
            direction: self.direction.blend(&target.direction, progress),
        }
    }
}

/// Linear transition from an old value to a new one over a time window.
///
/// Once the window has elapsed the transition is settled and `value` returns
/// the new value without further interpolation.
#[derive(Debug, Clone, PartialEq)]
pub struct BlendScheduler<T> {
    old: T,
    new: T,
    start_time: f64,
    duration: f64,
}

impl<T: Blend> BlendScheduler<T> {
    pub fn settled(value: T) -> Self {
        Self {
            old: value.clone(),
            new: value,
            start_time: 0.0,
            duration: 0.0,
        }
    }

    /// Begin a transition. Durations at or below zero snap straight to `new`.
    pub fn start(&mut self, old: T, new: T, now: f64, duration: f64) {
        self.old = old;
        self.new = new;
        self.start_time = now;
        self.duration = if duration.is_finite() && duration > 0.0 {
            duration
        } else {
            0.0
        };
    }

    /// Interpolated value at `now`, settling the transition once complete.
    pub fn value(&mut self, now: f64) -> T {
        if self.duration <= 0.0 {
            return self.new.clone();
        }
        let progress = self.progress(now);
        if progress >= 1.0 {
            self.duration = 0.0;
            return self.new.clone();
        }
        self.old.blend(&self.new, progress)
    }

    /// Same as `value` without settling.
    pub fn peek(&self, now: f64) -> T {
        if self.duration <= 0.0 {
            return self.new.clone();
        }
        let progress = self.progress(now);
        if progress >= 1.0 {
            self.new.clone()
        } else {
            self.old.blend(&self.new, progress)
        }
    }

    pub fn progress(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        // out of order ticks clamp to the start of the window
        let now = now.max(self.start_time);
        ((now - self.start_time) / self.duration).clamp(0.0, 1.0)
    }

    pub fn is_settled(&self) -> bool {
        self.duration <= 0.0
    }

    pub fn target(&self) -> &T {
        &self.new
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }
}

impl<T: Blend + Default> Default for BlendScheduler<T> {
    fn default() -> Self {
        Self::settled(T::default())
    }
}
