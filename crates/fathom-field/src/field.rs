//! The field trait hierarchy: [`Field`] and the vector-field traits.

use glam::{DVec2, DVec3};
use std::sync::Arc;

/// Shared function object evaluating a 2-D vector field.
pub type VectorSampler2 = Arc<dyn Fn(DVec2) -> DVec2 + Send + Sync>;

/// Shared function object evaluating a 3-D vector field.
pub type VectorSampler3 = Arc<dyn Fn(DVec3) -> DVec3 + Send + Sync>;

/// Shared handle to any 2-D vector field.
pub type VectorField2Ptr = Arc<dyn VectorField2>;

/// Shared handle to any 3-D vector field.
pub type VectorField3Ptr = Arc<dyn VectorField3>;

/// Root of the field hierarchy. Carries no state and no methods.
///
/// `Send + Sync` is required because fields are evaluated from the workers
/// of parallel grid iteration.
pub trait Field: Send + Sync + 'static {}

/// A 2-D vector field with optional derivative operators.
///
/// Only [`sample`](Self::sample) is required. A field that does not override
/// [`divergence`](Self::divergence) or [`curl`](Self::curl) is treated as
/// divergence-free and irrotational: both default to zero.
pub trait VectorField2: Field {
    /// Value of the field at `x`.
    fn sample(&self, x: DVec2) -> DVec2;

    /// Divergence at `x`. Default: `0.0`.
    fn divergence(&self, _x: DVec2) -> f64 {
        0.0
    }

    /// Scalar curl (`∂Vy/∂x − ∂Vx/∂y`) at `x`. Default: `0.0`.
    fn curl(&self, _x: DVec2) -> f64 {
        0.0
    }

    /// A function object forwarding to [`sample`](Self::sample).
    ///
    /// The returned sampler holds its own handle, so it can outlive the
    /// caller's `Arc`.
    fn sampler(self: Arc<Self>) -> VectorSampler2 {
        Arc::new(move |x| self.sample(x))
    }
}

/// A 3-D vector field with optional derivative operators.
///
/// Only [`sample`](Self::sample) is required. A field that does not override
/// [`divergence`](Self::divergence) or [`curl`](Self::curl) is treated as
/// divergence-free and irrotational: both default to zero.
///
/// # Examples
///
/// ```
/// use fathom_field::{Field, VectorField3};
/// use glam::DVec3;
/// use std::sync::Arc;
///
/// struct Swirl;
///
/// impl Field for Swirl {}
///
/// impl VectorField3 for Swirl {
///     fn sample(&self, x: DVec3) -> DVec3 {
///         DVec3::new(-x.y, x.x, 0.0)
///     }
/// }
///
/// let field = Arc::new(Swirl);
/// assert_eq!(field.divergence(DVec3::ONE), 0.0);
/// assert_eq!(field.curl(DVec3::ONE), DVec3::ZERO);
///
/// let sampler = field.sampler();
/// assert_eq!(sampler(DVec3::X), DVec3::Y);
/// ```
pub trait VectorField3: Field {
    /// Value of the field at `x`.
    fn sample(&self, x: DVec3) -> DVec3;

    /// Divergence at `x`. Default: `0.0`.
    fn divergence(&self, _x: DVec3) -> f64 {
        0.0
    }

    /// Curl at `x`. Default: [`DVec3::ZERO`].
    fn curl(&self, _x: DVec3) -> DVec3 {
        DVec3::ZERO
    }

    /// A function object forwarding to [`sample`](Self::sample).
    ///
    /// The returned sampler holds its own handle, so it can outlive the
    /// caller's `Arc`.
    fn sampler(self: Arc<Self>) -> VectorSampler3 {
        Arc::new(move |x| self.sample(x))
    }
}
