mod curve;
mod gust;
mod profile;

pub use curve::{CurveKey, ProfileCurve};
pub use gust::{
    averaged_sigma, step_longitudinal, step_transverse, CascadeState, GustModel, GustProcessState,
};
pub use profile::{TurbulenceParameters, TurbulenceProfile};
