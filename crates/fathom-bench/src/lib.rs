//! Benchmark profiles for the Fathom grid and field crates.
//!
//! - [`reference_shape`]: 64×64×64 grid (262K cells) over the unit cube
//! - [`swirl_sampled`]: swirl field with differenced derivatives
//! - [`swirl_analytic`]: the same swirl with exact divergence and curl

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use fathom_field::{CustomVectorField3, VectorField3Ptr};
use fathom_grid::GridShape3;
use glam::{DVec3, UVec3};

/// Cells per axis in [`reference_shape`].
pub const REFERENCE_RESOLUTION: u32 = 64;

/// Build the reference shape: `n`³ cells spanning `[0, 1]`³.
///
/// # Panics
///
/// Panics if `n == 0`.
pub fn reference_shape(n: u32) -> GridShape3 {
    assert!(n > 0, "reference shape needs at least one cell per axis");
    GridShape3::new(UVec3::splat(n), DVec3::splat(1.0 / n as f64), DVec3::ZERO)
        .unwrap_or_else(|e| panic!("reference shape: {e}"))
}

fn swirl(p: DVec3) -> DVec3 {
    DVec3::new(-p.y * p.z, p.x * p.z, p.x * p.y)
}

/// Nonlinear swirl; every derivative costs six samples.
pub fn swirl_sampled() -> VectorField3Ptr {
    std::sync::Arc::new(CustomVectorField3::from_fn(swirl))
}

/// [`swirl_sampled`] with divergence `0` and curl `(0, -2y, 2z)` given
/// exactly.
pub fn swirl_analytic() -> VectorField3Ptr {
    std::sync::Arc::new(CustomVectorField3::with_derivatives(
        swirl,
        |_| 0.0,
        |p| DVec3::new(0.0, -2.0 * p.y, 2.0 * p.z),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fathom_field::VectorField3;

    #[test]
    fn analytic_and_sampled_agree() {
        let (a, s) = (swirl_analytic(), swirl_sampled());
        for p in [DVec3::ZERO, DVec3::new(0.3, 0.6, 0.9), DVec3::splat(-2.0)] {
            assert!((a.curl(p) - s.curl(p)).abs().max_element() < 1e-6);
            assert!((a.divergence(p) - s.divergence(p)).abs() < 1e-6);
        }
    }

    #[test]
    fn reference_shape_spans_unit_cube() {
        let shape = reference_shape(REFERENCE_RESOLUTION);
        assert_eq!(shape.cell_count(), 64 * 64 * 64);
        assert_eq!(shape.bounding_box().upper_corner, DVec3::ONE);
    }
}
