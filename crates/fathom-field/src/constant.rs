//! Uniform vector fields.

use std::sync::Arc;

use glam::{DVec2, DVec3};

use crate::field::{Field, VectorField2, VectorField3, VectorSampler2, VectorSampler3};

/// A 2-D field with the same value at every point.
///
/// Divergence and curl use the trait defaults (zero), which is exact here.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantVectorField2 {
    value: DVec2,
}

impl ConstantVectorField2 {
    /// Field equal to `value` everywhere.
    pub fn new(value: DVec2) -> Self {
        Self { value }
    }

    /// The constant value.
    pub fn value(&self) -> DVec2 {
        self.value
    }
}

impl Field for ConstantVectorField2 {}

impl VectorField2 for ConstantVectorField2 {
    fn sample(&self, _x: DVec2) -> DVec2 {
        self.value
    }

    fn sampler(self: Arc<Self>) -> VectorSampler2 {
        let value = self.value;
        Arc::new(move |_| value)
    }
}

/// A 3-D field with the same value at every point.
///
/// # Examples
///
/// ```
/// use fathom_field::{ConstantVectorField3, VectorField3, VectorField3Ptr};
/// use glam::DVec3;
/// use std::sync::Arc;
///
/// let gravity: VectorField3Ptr = Arc::new(ConstantVectorField3::new(DVec3::new(0.0, -9.8, 0.0)));
/// assert_eq!(gravity.sample(DVec3::new(1.0, 2.0, 3.0)).y, -9.8);
/// assert_eq!(gravity.divergence(DVec3::ZERO), 0.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantVectorField3 {
    value: DVec3,
}

impl ConstantVectorField3 {
    /// Field equal to `value` everywhere.
    pub fn new(value: DVec3) -> Self {
        Self { value }
    }

    /// The constant value.
    pub fn value(&self) -> DVec3 {
        self.value
    }
}

impl Field for ConstantVectorField3 {}

impl VectorField3 for ConstantVectorField3 {
    fn sample(&self, _x: DVec3) -> DVec3 {
        self.value
    }

    // Captures the value, not the field.
    fn sampler(self: Arc<Self>) -> VectorSampler3 {
        let value = self.value;
        Arc::new(move |_| value)
    }
}
