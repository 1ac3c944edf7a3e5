mod wind;

pub use wind::{CompassPoint, FixedWind, WindConfig};
