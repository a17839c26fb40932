//! Reusable vector-field test fixtures.
//!
//! - [`RigidRotation3`]: `ω × x`, with analytic divergence (0) and curl (2ω).
//! - [`CountingField3`]: wraps a sample function and counts evaluations.
//! - [`random_points`]: deterministic sample positions from a seed.

use std::sync::atomic::{AtomicUsize, Ordering};

use fathom_field::{Field, VectorField3};
use glam::DVec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Rigid-body rotation with angular velocity `omega`.
///
/// Overrides both derivatives with their exact values, so it can serve as
/// the reference for differenced results.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RigidRotation3 {
    pub omega: DVec3,
}

impl RigidRotation3 {
    pub fn new(omega: DVec3) -> Self {
        Self { omega }
    }
}

impl Field for RigidRotation3 {}

impl VectorField3 for RigidRotation3 {
    fn sample(&self, x: DVec3) -> DVec3 {
        self.omega.cross(x)
    }

    fn divergence(&self, _x: DVec3) -> f64 {
        0.0
    }

    fn curl(&self, _x: DVec3) -> DVec3 {
        2.0 * self.omega
    }
}

/// Counts calls to `sample`. Divergence and curl are left to the trait
/// defaults.
///
/// Uses `AtomicUsize` for the counter so it satisfies `Sync`.
pub struct CountingField3<F> {
    sample: F,
    calls: AtomicUsize,
}

impl<F> CountingField3<F>
where
    F: Fn(DVec3) -> DVec3 + Send + Sync + 'static,
{
    pub fn new(sample: F) -> Self {
        Self {
            sample,
            calls: AtomicUsize::new(0),
        }
    }

    /// How many times `sample()` has been called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    /// Reset the call counter.
    pub fn reset(&self) {
        self.calls.store(0, Ordering::Relaxed);
    }
}

impl<F> Field for CountingField3<F> where F: Fn(DVec3) -> DVec3 + Send + Sync + 'static {}

impl<F> VectorField3 for CountingField3<F>
where
    F: Fn(DVec3) -> DVec3 + Send + Sync + 'static,
{
    fn sample(&self, x: DVec3) -> DVec3 {
        self.calls.fetch_add(1, Ordering::Relaxed);
        (self.sample)(x)
    }
}

/// `n` points drawn uniformly from `[-extent, extent)^3`, reproducible
/// from `seed`.
pub fn random_points(seed: u64, n: usize, extent: f64) -> Vec<DVec3> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            DVec3::new(
                rng.random_range(-extent..extent),
                rng.random_range(-extent..extent),
                rng.random_range(-extent..extent),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_points_are_reproducible() {
        let a = random_points(7, 16, 2.0);
        let b = random_points(7, 16, 2.0);
        assert_eq!(a, b);
        assert_ne!(a, random_points(8, 16, 2.0));
        assert!(a.iter().all(|p| p.abs().max_element() < 2.0));
    }

    #[test]
    fn counting_field_counts_samples() {
        let f = CountingField3::new(|p: DVec3| p);
        f.sample(DVec3::ONE);
        f.sample(DVec3::ZERO);
        assert_eq!(f.calls(), 2);
        f.reset();
        assert_eq!(f.calls(), 0);
    }
}
