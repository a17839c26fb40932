//! Central finite differences over vector-valued functions.
//!
//! Every partial derivative uses the second-order central formula
//!
//! ```text
//! ∂V/∂a (x) ≈ (V(x + h·e_a) − V(x − h·e_a)) / (2h)
//! ```
//!
//! so one partial costs two evaluations of the sampled function. Divergence
//! and curl reuse the partials along each axis: `2·dim` evaluations each.

use crate::error::FieldError;
use glam::{DVec2, DVec3};

/// Step used when a field is built without an explicit resolution.
pub const DEFAULT_DERIVATIVE_RESOLUTION: f64 = 1e-3;

/// A validated finite-difference step `h`.
///
/// # Examples
///
/// ```
/// use fathom_field::FiniteDifference;
/// use glam::DVec3;
///
/// let fd = FiniteDifference::new(1e-4).unwrap();
/// let div = fd.divergence3(&|p: DVec3| p * 2.0, DVec3::new(1.0, -2.0, 5.0));
/// assert!((div - 6.0).abs() < 1e-8);
///
/// assert!(FiniteDifference::new(0.0).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FiniteDifference {
    resolution: f64,
}

impl Default for FiniteDifference {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_DERIVATIVE_RESOLUTION,
        }
    }
}

impl FiniteDifference {
    /// Create a differencing step.
    ///
    /// Returns `Err(FieldError::InvalidResolution)` unless `resolution` is
    /// finite and strictly positive: it is used as a denominator.
    pub fn new(resolution: f64) -> Result<Self, FieldError> {
        if !resolution.is_finite() || resolution <= 0.0 {
            return Err(FieldError::InvalidResolution { value: resolution });
        }
        Ok(Self { resolution })
    }

    /// The step `h`.
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// `∂V/∂a` at `x` for a 2-D field.
    ///
    /// # Panics
    ///
    /// Panics if `axis >= 2`.
    pub fn partial2<F>(&self, f: &F, x: DVec2, axis: usize) -> DVec2
    where
        F: Fn(DVec2) -> DVec2 + ?Sized,
    {
        let offset = DVec2::AXES[axis] * self.resolution;
        (f(x + offset) - f(x - offset)) / (2.0 * self.resolution)
    }

    /// `∂V/∂a` at `x` for a 3-D field.
    ///
    /// # Panics
    ///
    /// Panics if `axis >= 3`.
    pub fn partial3<F>(&self, f: &F, x: DVec3, axis: usize) -> DVec3
    where
        F: Fn(DVec3) -> DVec3 + ?Sized,
    {
        let offset = DVec3::AXES[axis] * self.resolution;
        (f(x + offset) - f(x - offset)) / (2.0 * self.resolution)
    }

    /// `∂Vx/∂x + ∂Vy/∂y`.
    pub fn divergence2<F>(&self, f: &F, x: DVec2) -> f64
    where
        F: Fn(DVec2) -> DVec2 + ?Sized,
    {
        self.partial2(f, x, 0).x + self.partial2(f, x, 1).y
    }

    /// `∂Vy/∂x − ∂Vx/∂y`.
    pub fn curl2<F>(&self, f: &F, x: DVec2) -> f64
    where
        F: Fn(DVec2) -> DVec2 + ?Sized,
    {
        self.partial2(f, x, 0).y - self.partial2(f, x, 1).x
    }

    /// `∂Vx/∂x + ∂Vy/∂y + ∂Vz/∂z`.
    pub fn divergence3<F>(&self, f: &F, x: DVec3) -> f64
    where
        F: Fn(DVec3) -> DVec3 + ?Sized,
    {
        self.partial3(f, x, 0).x + self.partial3(f, x, 1).y + self.partial3(f, x, 2).z
    }

    /// `(∂Vz/∂y − ∂Vy/∂z, ∂Vx/∂z − ∂Vz/∂x, ∂Vy/∂x − ∂Vx/∂y)`.
    pub fn curl3<F>(&self, f: &F, x: DVec3) -> DVec3
    where
        F: Fn(DVec3) -> DVec3 + ?Sized,
    {
        let dx = self.partial3(f, x, 0);
        let dy = self.partial3(f, x, 1);
        let dz = self.partial3(f, x, 2);
        DVec3::new(dy.z - dz.y, dz.x - dx.z, dx.y - dy.x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn rejects_bad_resolutions() {
        for h in [0.0, -1e-3, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(
                matches!(FiniteDifference::new(h), Err(FieldError::InvalidResolution { .. })),
                "resolution {h} should be rejected"
            );
        }
    }

    #[test]
    fn default_step() {
        assert_eq!(
            FiniteDifference::default().resolution(),
            DEFAULT_DERIVATIVE_RESOLUTION
        );
    }

    #[test]
    fn linear_field_is_exact_up_to_rounding() {
        let fd = FiniteDifference::default();
        let f = |p: DVec2| DVec2::new(3.0 * p.x + p.y, -p.y);
        let x = DVec2::new(0.3, -1.7);
        assert!((fd.divergence2(&f, x) - 2.0).abs() < 1e-9);
        assert!((fd.curl2(&f, x) - (0.0 - 1.0)).abs() < 1e-9);
    }

    #[test]
    fn rigid_rotation_curl_3d() {
        // V = ω × x with ω = (0, 0, 2): curl V = 2ω.
        let omega = DVec3::new(0.0, 0.0, 2.0);
        let f = move |p: DVec3| omega.cross(p);
        let fd = FiniteDifference::default();
        let c = fd.curl3(&f, DVec3::new(1.0, 2.0, 3.0));
        assert!((c - 2.0 * omega).abs().max_element() < 1e-9);
        assert!(fd.divergence3(&f, DVec3::ONE).abs() < 1e-9);
    }

    #[test]
    fn evaluation_count_is_two_per_axis() {
        let calls = AtomicUsize::new(0);
        let f = |p: DVec3| {
            calls.fetch_add(1, Ordering::Relaxed);
            p
        };
        let fd = FiniteDifference::default();
        fd.divergence3(&f, DVec3::ZERO);
        assert_eq!(calls.swap(0, Ordering::Relaxed), 6);
        fd.curl3(&f, DVec3::ZERO);
        assert_eq!(calls.swap(0, Ordering::Relaxed), 6);
    }

    #[test]
    fn error_shrinks_with_step() {
        // V = (sin x, 0): ∂Vx/∂x = cos x, central error ~ h²/6.
        let f = |p: DVec2| DVec2::new(p.x.sin(), 0.0);
        let x = DVec2::new(0.7, 0.0);
        let exact = 0.7f64.cos();
        let coarse = FiniteDifference::new(1e-1).unwrap().divergence2(&f, x);
        let fine = FiniteDifference::new(1e-2).unwrap().divergence2(&f, x);
        let coarse_err = (coarse - exact).abs();
        let fine_err = (fine - exact).abs();
        assert!(fine_err < coarse_err);
        // Second order: a 10x smaller step gives roughly 100x less error.
        assert!(fine_err < coarse_err / 50.0);
    }
}
