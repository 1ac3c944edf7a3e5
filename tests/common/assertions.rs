use approx::assert_relative_eq;
use nalgebra::Vector3;

/// Assert that every component of a wind vector is finite
#[track_caller]
pub fn assert_vector_finite(vector: &Vector3<f64>) {
    assert!(vector.x.is_finite(), "x is not finite: {:?}", vector);
    assert!(vector.y.is_finite(), "y is not finite: {:?}", vector);
    assert!(vector.z.is_finite(), "z is not finite: {:?}", vector);
}

/// Assert that a wind vector is exactly zero
#[track_caller]
pub fn assert_vector_zero(vector: &Vector3<f64>) {
    assert_eq!(vector, &Vector3::zeros(), "expected calm, got {:?}", vector);
}

/// Assert that two wind vectors match within tolerance
#[track_caller]
pub fn assert_vector_eq(actual: &Vector3<f64>, expected: &Vector3<f64>, epsilon: f64) {
    assert_relative_eq!(actual.x, expected.x, epsilon = epsilon);
    assert_relative_eq!(actual.y, expected.y, epsilon = epsilon);
    assert_relative_eq!(actual.z, expected.z, epsilon = epsilon);
}
