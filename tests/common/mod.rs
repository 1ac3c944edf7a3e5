#![allow(dead_code)]

mod assertions;
mod helpers;
mod test_app;

// Re-export
pub use assertions::{assert_vector_eq, assert_vector_finite, assert_vector_zero};
pub use helpers::*;
pub use test_app::{TestApp, TestAppBuilder};
