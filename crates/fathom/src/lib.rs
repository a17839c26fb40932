//! Fathom: cartesian grids and vector fields.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Fathom sub-crates. For most users, adding `fathom` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use fathom::prelude::*;
//! use std::sync::Mutex;
//!
//! // A swirl around the z axis; curl is differenced from the samples.
//! let field: VectorField3Ptr = CustomVectorField3::builder(|p: DVec3| DVec3::new(-p.y, p.x, 0.0))
//!     .build_shared()
//!     .unwrap();
//!
//! // 8×8×8 cells spanning [-1, 1]^3.
//! let shape = GridShape3::new(UVec3::splat(8), DVec3::splat(0.25), DVec3::splat(-1.0)).unwrap();
//! let position = shape.cell_center_position();
//!
//! // Largest curl error over all cell centers, computed on rayon workers.
//! let worst = Mutex::new(0.0f64);
//! shape.par_for_each_cell_index(|i, j, k| {
//!     let err = (field.curl(position(i, j, k)) - DVec3::new(0.0, 0.0, 2.0)).length();
//!     let mut worst = worst.lock().unwrap();
//!     *worst = worst.max(err);
//! });
//! assert!(worst.into_inner().unwrap() < 1e-6);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`grid`] | `fathom-grid` | Grid shapes, grid traits, cell iteration, shape codec |
//! | [`field`] | `fathom-field` | Field traits, custom and constant fields, differencing |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Grid shapes, the grid traits, and cell iteration (`fathom-grid`).
///
/// Provides [`grid::GridShape3`], the [`grid::Grid3`] trait that
/// data-backed containers implement, and [`grid::ParallelConfig`].
pub use fathom_grid as grid;

/// Vector fields and finite differencing (`fathom-field`).
///
/// The [`field::VectorField3`] trait is the main extension point for
/// user-defined fields; [`field::CustomVectorField3`] wraps plain closures.
pub use fathom_field as field;

/// Common imports for typical Fathom usage.
///
/// ```rust
/// use fathom::prelude::*;
/// ```
///
/// This imports the shape and grid types, the field traits and concrete
/// fields, both error types, and the `glam` vector types they are built on.
pub mod prelude {
    // Grid
    pub use fathom_grid::{
        BoundingBox2, BoundingBox3, Grid2, Grid3, GridShape2, GridShape3, ParallelConfig,
    };

    // Field
    pub use fathom_field::{
        ConstantVectorField2, ConstantVectorField3, CustomVectorField2, CustomVectorField3, Field,
        FiniteDifference, VectorField2, VectorField2Ptr, VectorField3, VectorField3Ptr,
    };

    // Errors
    pub use fathom_field::FieldError;
    pub use fathom_grid::GridError;

    // Math
    pub use glam::{DVec2, DVec3, UVec2, UVec3};
}
