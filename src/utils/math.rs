use super::constants::{FEET_PER_METRE, METRES_PER_FOOT};

/// Linear interpolation between two values
#[inline]
pub fn lerp(start: f64, end: f64, factor: f64) -> f64 {
    start + (end - start) * factor.clamp(0.0, 1.0)
}

/// Wrap an angle in degrees into [0, 360)
#[inline]
pub fn wrap_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Signed difference `to - from` in degrees along the shorter arc, in [-180, 180)
#[inline]
pub fn shortest_arc(from: f64, to: f64) -> f64 {
    (to - from + 180.0).rem_euclid(360.0) - 180.0
}

/// Interpolate between two compass angles along the shorter arc
pub fn lerp_degrees(start: f64, end: f64, factor: f64) -> f64 {
    wrap_degrees(start + shortest_arc(start, end) * factor.clamp(0.0, 1.0))
}

/// Compass bearing in degrees of a (north, east) pair
#[inline]
pub fn bearing_degrees(north: f64, east: f64) -> f64 {
    wrap_degrees(east.atan2(north).to_degrees())
}

#[inline]
pub fn metres_to_feet(metres: f64) -> f64 {
    metres * FEET_PER_METRE
}

#[inline]
pub fn feet_to_metres(feet: f64) -> f64 {
    feet * METRES_PER_FOOT
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_wrap_degrees() {
        assert_relative_eq!(wrap_degrees(370.0), 10.0);
        assert_relative_eq!(wrap_degrees(-10.0), 350.0);
        assert_relative_eq!(wrap_degrees(0.0), 0.0);
        assert!(wrap_degrees(-1e-15) < 360.0);
    }

    #[test]
    fn test_shortest_arc() {
        assert_relative_eq!(shortest_arc(350.0, 10.0), 20.0);
        assert_relative_eq!(shortest_arc(10.0, 350.0), -20.0);
        assert_relative_eq!(shortest_arc(90.0, 180.0), 90.0);
    }

    #[test]
    fn test_lerp_degrees_crosses_north() {
        assert_relative_eq!(lerp_degrees(350.0, 10.0, 0.5), 0.0, epsilon = 1e-9);
        assert_relative_eq!(lerp_degrees(350.0, 10.0, 0.25), 355.0, epsilon = 1e-9);
        assert_relative_eq!(lerp_degrees(10.0, 350.0, 0.75), 355.0, epsilon = 1e-9);
    }

    #[test]
    fn test_bearing_degrees() {
        assert_relative_eq!(bearing_degrees(1.0, 0.0), 0.0);
        assert_relative_eq!(bearing_degrees(0.0, 1.0), 90.0);
        assert_relative_eq!(bearing_degrees(-1.0, 0.0), 180.0);
        assert_relative_eq!(bearing_degrees(0.0, -1.0), 270.0);
    }

    #[test]
    fn test_feet_round_trip() {
        assert_relative_eq!(feet_to_metres(metres_to_feet(123.4)), 123.4, epsilon = 1e-9);
        assert_relative_eq!(metres_to_feet(0.3048), 1.0, epsilon = 1e-12);
    }
}
