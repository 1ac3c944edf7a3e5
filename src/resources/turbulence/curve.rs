use serde::{Deserialize, Serialize};

/// One breakpoint of a [`ProfileCurve`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveKey {
    pub x: f64,
    pub value: f64,
    /// dValue/dx at the breakpoint.
    pub slope: f64,
}

impl CurveKey {
    pub fn new(x: f64, value: f64, slope: f64) -> Self {
        Self { x, value, slope }
    }
}

/// Immutable breakpoint table evaluated with cubic Hermite segments.
///
/// Inputs outside the table clamp to the first or last value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<CurveKey>", into = "Vec<CurveKey>")]
pub struct ProfileCurve {
    keys: Vec<CurveKey>,
}

impl ProfileCurve {
    pub fn new(mut keys: Vec<CurveKey>) -> Self {
        keys.retain(|key| key.x.is_finite() && key.value.is_finite());
        keys.sort_by(|a, b| a.x.total_cmp(&b.x));
        keys.dedup_by(|next, previous| next.x == previous.x);
        for key in keys.iter_mut() {
            if !key.slope.is_finite() {
                key.slope = 0.0;
            }
        }
        Self { keys }
    }

    /// Build from (x, value) points with Fritsch-Carlson slopes, so the curve
    /// never overshoots its breakpoints between monotone runs.
    pub fn from_points(points: &[(f64, f64)]) -> Self {
        let mut keys: Vec<CurveKey> = points
            .iter()
            .map(|&(x, value)| CurveKey::new(x, value, 0.0))
            .collect();
        keys.retain(|key| key.x.is_finite() && key.value.is_finite());
        keys.sort_by(|a, b| a.x.total_cmp(&b.x));
        keys.dedup_by(|next, previous| next.x == previous.x);

        let n = keys.len();
        if n < 2 {
            return Self { keys };
        }

        let secants: Vec<f64> = keys
            .windows(2)
            .map(|pair| (pair[1].value - pair[0].value) / (pair[1].x - pair[0].x))
            .collect();

        keys[0].slope = secants[0];
        keys[n - 1].slope = secants[n - 2];
        for i in 1..n - 1 {
            let (left, right) = (secants[i - 1], secants[i]);
            keys[i].slope = if left * right <= 0.0 {
                0.0
            } else {
                0.5 * (left + right)
            };
        }

        for i in 0..n - 1 {
            let secant = secants[i];
            if secant == 0.0 {
                keys[i].slope = 0.0;
                keys[i + 1].slope = 0.0;
                continue;
            }
            let alpha = keys[i].slope / secant;
            let beta = keys[i + 1].slope / secant;
            let magnitude = alpha * alpha + beta * beta;
            if magnitude > 9.0 {
                let tau = 3.0 / magnitude.sqrt();
                keys[i].slope = tau * alpha * secant;
                keys[i + 1].slope = tau * beta * secant;
            }
        }

        Self { keys }
    }

    pub fn keys(&self) -> &[CurveKey] {
        &self.keys
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return 0.0,
        };
        if x.is_nan() || x <= first.x {
            return first.value;
        }
        if x >= last.x {
            return last.value;
        }

        // first key strictly right of x, guaranteed to be in 1..len
        let upper = self.keys.partition_point(|key| key.x <= x);
        let k0 = &self.keys[upper - 1];
        let k1 = &self.keys[upper];

        let h = k1.x - k0.x;
        let t = (x - k0.x) / h;
        let t2 = t * t;
        let t3 = t2 * t;

        let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
        let h10 = t3 - 2.0 * t2 + t;
        let h01 = -2.0 * t3 + 3.0 * t2;
        let h11 = t3 - t2;

        h00 * k0.value + h10 * h * k0.slope + h01 * k1.value + h11 * h * k1.slope
    }
}

impl From<Vec<CurveKey>> for ProfileCurve {
    fn from(keys: Vec<CurveKey>) -> Self {
        Self::new(keys)
    }
}

impl From<ProfileCurve> for Vec<CurveKey> {
    fn from(curve: ProfileCurve) -> Self {
        curve.keys
    }
}
