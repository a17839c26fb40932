//! Cartesian grid shapes and cell-index iteration for Fathom.
//!
//! This crate defines the [`Grid2`] and [`Grid3`] traits, the index space
//! through which data-backed fields map cells to world positions, along
//! with the [`GridShape2`]/[`GridShape3`] value types they compose and the
//! binary helpers concrete grids use to (de)serialize their shape.
//!
//! # Shapes
//!
//! A shape is a per-axis resolution, spacing, and origin. Its
//! [`BoundingBox3`] is always derived from those three values.
//!
//! # Iteration
//!
//! - `for_each_cell_index`: single-threaded, lexicographic, last index fastest
//! - `parallel_for_each_cell_index`: every index once, unordered, on rayon
//!   workers (see [`ParallelConfig`])

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bbox;
pub mod codec;
pub mod config;
pub mod error;
pub mod grid;
mod iter;
pub mod shape;

pub use bbox::{BoundingBox2, BoundingBox3};
pub use codec::{read_shape2, read_shape3, write_shape2, write_shape3};
pub use config::ParallelConfig;
pub use error::GridError;
pub use grid::{Grid2, Grid3};
pub use shape::{DataPositionFunc2, DataPositionFunc3, GridShape2, GridShape3};
