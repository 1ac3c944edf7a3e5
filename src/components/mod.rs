mod wind;

pub use wind::{PrimaryVessel, WindBody, WindSample};
