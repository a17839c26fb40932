//! Grid shape value types: resolution, spacing, origin, and the derived
//! bounding box.
//!
//! A shape never stores a bounding box that was set independently. Every
//! constructor and mutator recomputes it from the three primitives, so the
//! four values cannot drift apart.

use crate::bbox::{BoundingBox2, BoundingBox3};
use crate::config::ParallelConfig;
use crate::error::GridError;
use crate::iter;
use glam::{DVec2, DVec3, UVec2, UVec3};

/// Maps a 2-D cell index to a world-space position.
///
/// Owns a copy of the shape it was created from, so it stays valid after the
/// originating grid is resized or dropped.
pub type DataPositionFunc2 = Box<dyn Fn(usize, usize) -> DVec2 + Send + Sync>;

/// Maps a 3-D cell index to a world-space position.
///
/// Owns a copy of the shape it was created from, so it stays valid after the
/// originating grid is resized or dropped.
pub type DataPositionFunc3 = Box<dyn Fn(usize, usize, usize) -> DVec3 + Send + Sync>;

/// Reject non-positive or non-finite spacing, non-finite origins, an
/// upper corner that overflows, and a cell count that does not fit `usize`.
fn validate_geometry(
    resolution: &[u32],
    spacing: &[f64],
    origin: &[f64],
) -> Result<(), GridError> {
    for (axis, &value) in spacing.iter().enumerate() {
        if !value.is_finite() || value <= 0.0 {
            return Err(GridError::InvalidSpacing { axis, value });
        }
    }
    for (axis, &value) in origin.iter().enumerate() {
        if !value.is_finite() {
            return Err(GridError::NonFiniteOrigin { axis, value });
        }
    }
    for (axis, ((&o, &s), &n)) in origin.iter().zip(spacing).zip(resolution).enumerate() {
        let value = o + s * n as f64;
        if !value.is_finite() {
            return Err(GridError::NonFiniteExtent { axis, value });
        }
    }
    let fits = resolution
        .iter()
        .try_fold(1usize, |acc, &n| acc.checked_mul(n as usize))
        .is_some();
    if !fits {
        let mut padded = [1u32; 3];
        padded[..resolution.len()].copy_from_slice(resolution);
        return Err(GridError::CellCountOverflow { resolution: padded });
    }
    Ok(())
}

// ── GridShape2 ──────────────────────────────────────────────────

/// Shape of an axis-aligned 2-D cartesian grid.
///
/// # Examples
///
/// ```
/// use fathom_grid::GridShape2;
/// use glam::{DVec2, UVec2};
///
/// let shape = GridShape2::new(UVec2::new(4, 2), DVec2::new(0.5, 1.0), DVec2::new(-1.0, 0.0)).unwrap();
/// assert_eq!(shape.bounding_box().upper_corner, DVec2::new(1.0, 2.0));
/// assert_eq!(shape.cell_center(0, 0), DVec2::new(-0.75, 0.5));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridShape2 {
    resolution: UVec2,
    spacing: DVec2,
    origin: DVec2,
    bounding_box: BoundingBox2,
}

impl Default for GridShape2 {
    fn default() -> Self {
        Self {
            resolution: UVec2::ZERO,
            spacing: DVec2::ONE,
            origin: DVec2::ZERO,
            bounding_box: BoundingBox2::default(),
        }
    }
}

impl GridShape2 {
    /// Create a validated shape.
    ///
    /// Returns `Err(GridError::InvalidSpacing)` if any spacing component is
    /// not finite and positive, `Err(GridError::NonFiniteOrigin)` if the
    /// origin is not finite, `Err(GridError::NonFiniteExtent)` if the upper
    /// corner overflows, or `Err(GridError::CellCountOverflow)` if the cell
    /// count does not fit in `usize`.
    pub fn new(resolution: UVec2, spacing: DVec2, origin: DVec2) -> Result<Self, GridError> {
        let mut shape = Self::default();
        shape.set_size_parameters(resolution, spacing, origin)?;
        Ok(shape)
    }

    /// Cell counts per axis.
    pub fn resolution(&self) -> UVec2 {
        self.resolution
    }

    /// Cell size per axis.
    pub fn grid_spacing(&self) -> DVec2 {
        self.spacing
    }

    /// World-space position of the grid's lower corner.
    pub fn origin(&self) -> DVec2 {
        self.origin
    }

    /// World-space extent: `[origin, origin + spacing * resolution]`.
    pub fn bounding_box(&self) -> BoundingBox2 {
        self.bounding_box
    }

    /// Total number of cells. Validation guarantees the product fits.
    pub fn cell_count(&self) -> usize {
        self.resolution.x as usize * self.resolution.y as usize
    }

    /// Center of cell `(i, j)`: `origin + spacing * (index + 0.5)`.
    pub fn cell_center(&self, i: usize, j: usize) -> DVec2 {
        self.origin + self.spacing * DVec2::new(i as f64 + 0.5, j as f64 + 0.5)
    }

    /// A position function owning a copy of this shape.
    pub fn cell_center_position(&self) -> DataPositionFunc2 {
        let shape = *self;
        Box::new(move |i, j| shape.cell_center(i, j))
    }

    /// Replace resolution, spacing, and origin and recompute the bounding box.
    ///
    /// On error the shape is left unchanged.
    pub fn set_size_parameters(
        &mut self,
        resolution: UVec2,
        spacing: DVec2,
        origin: DVec2,
    ) -> Result<(), GridError> {
        validate_geometry(&resolution.to_array(), &spacing.to_array(), &origin.to_array())?;
        self.resolution = resolution;
        self.spacing = spacing;
        self.origin = origin;
        self.bounding_box = BoundingBox2::new(origin, origin + spacing * resolution.as_dvec2());
        tracing::debug!(?resolution, ?spacing, ?origin, "grid shape replaced");
        Ok(())
    }

    /// Exchange shape state with `other`.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    /// Copy the shape state of `other` into `self`.
    pub fn set(&mut self, other: &Self) {
        *self = *other;
    }

    /// Exact equality of resolution, spacing, and origin.
    pub fn has_same_shape(&self, other: &Self) -> bool {
        self.resolution == other.resolution
            && self.spacing == other.spacing
            && self.origin == other.origin
    }

    /// Visit every `(i, j)` once on the calling thread, `j` fastest.
    pub fn for_each_cell_index(&self, f: impl FnMut(usize, usize)) {
        iter::for_each_index2(self.resolution.x as usize, self.resolution.y as usize, f);
    }

    /// Visit every `(i, j)` once across the current rayon pool, in no
    /// particular order.
    pub fn par_for_each_cell_index(&self, f: impl Fn(usize, usize) + Sync + Send) {
        self.par_for_each_cell_index_with(&ParallelConfig::default(), f);
    }

    /// Like [`par_for_each_cell_index`](Self::par_for_each_cell_index) with
    /// explicit chunking.
    pub fn par_for_each_cell_index_with(
        &self,
        config: &ParallelConfig,
        f: impl Fn(usize, usize) + Sync + Send,
    ) {
        tracing::trace!(cells = self.cell_count(), "parallel 2-D cell iteration");
        iter::par_for_each_index2(
            self.resolution.x as usize,
            self.resolution.y as usize,
            config.resolved_min_chunk_len(),
            f,
        );
    }
}

// ── GridShape3 ──────────────────────────────────────────────────

/// Shape of an axis-aligned 3-D cartesian grid.
///
/// # Examples
///
/// ```
/// use fathom_grid::GridShape3;
/// use glam::{DVec3, UVec3};
///
/// let shape = GridShape3::new(UVec3::new(2, 2, 2), DVec3::splat(0.5), DVec3::ZERO).unwrap();
/// assert_eq!(shape.cell_count(), 8);
/// assert_eq!(shape.bounding_box().upper_corner, DVec3::ONE);
///
/// let mut order = Vec::new();
/// shape.for_each_cell_index(|i, j, k| order.push((i, j, k)));
/// assert_eq!(order[1], (0, 0, 1));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridShape3 {
    resolution: UVec3,
    spacing: DVec3,
    origin: DVec3,
    bounding_box: BoundingBox3,
}

impl Default for GridShape3 {
    fn default() -> Self {
        Self {
            resolution: UVec3::ZERO,
            spacing: DVec3::ONE,
            origin: DVec3::ZERO,
            bounding_box: BoundingBox3::default(),
        }
    }
}

impl GridShape3 {
    /// Create a validated shape.
    ///
    /// Returns `Err(GridError::InvalidSpacing)` if any spacing component is
    /// not finite and positive, `Err(GridError::NonFiniteOrigin)` if the
    /// origin is not finite, `Err(GridError::NonFiniteExtent)` if the upper
    /// corner overflows, or `Err(GridError::CellCountOverflow)` if the cell
    /// count does not fit in `usize`.
    pub fn new(resolution: UVec3, spacing: DVec3, origin: DVec3) -> Result<Self, GridError> {
        let mut shape = Self::default();
        shape.set_size_parameters(resolution, spacing, origin)?;
        Ok(shape)
    }

    /// Cell counts per axis.
    pub fn resolution(&self) -> UVec3 {
        self.resolution
    }

    /// Cell size per axis.
    pub fn grid_spacing(&self) -> DVec3 {
        self.spacing
    }

    /// World-space position of the grid's lower corner.
    pub fn origin(&self) -> DVec3 {
        self.origin
    }

    /// World-space extent: `[origin, origin + spacing * resolution]`.
    pub fn bounding_box(&self) -> BoundingBox3 {
        self.bounding_box
    }

    /// Total number of cells. Validation guarantees the product fits.
    pub fn cell_count(&self) -> usize {
        self.resolution.x as usize * self.resolution.y as usize * self.resolution.z as usize
    }

    /// Center of cell `(i, j, k)`: `origin + spacing * (index + 0.5)`.
    pub fn cell_center(&self, i: usize, j: usize, k: usize) -> DVec3 {
        self.origin + self.spacing * DVec3::new(i as f64 + 0.5, j as f64 + 0.5, k as f64 + 0.5)
    }

    /// A position function owning a copy of this shape.
    pub fn cell_center_position(&self) -> DataPositionFunc3 {
        let shape = *self;
        Box::new(move |i, j, k| shape.cell_center(i, j, k))
    }

    /// Replace resolution, spacing, and origin and recompute the bounding box.
    ///
    /// On error the shape is left unchanged.
    pub fn set_size_parameters(
        &mut self,
        resolution: UVec3,
        spacing: DVec3,
        origin: DVec3,
    ) -> Result<(), GridError> {
        validate_geometry(&resolution.to_array(), &spacing.to_array(), &origin.to_array())?;
        self.resolution = resolution;
        self.spacing = spacing;
        self.origin = origin;
        self.bounding_box = BoundingBox3::new(origin, origin + spacing * resolution.as_dvec3());
        tracing::debug!(?resolution, ?spacing, ?origin, "grid shape replaced");
        Ok(())
    }

    /// Exchange shape state with `other`.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    /// Copy the shape state of `other` into `self`.
    pub fn set(&mut self, other: &Self) {
        *self = *other;
    }

    /// Exact equality of resolution, spacing, and origin.
    pub fn has_same_shape(&self, other: &Self) -> bool {
        self.resolution == other.resolution
            && self.spacing == other.spacing
            && self.origin == other.origin
    }

    /// Visit every `(i, j, k)` once on the calling thread, `k` fastest and
    /// `i` slowest.
    pub fn for_each_cell_index(&self, f: impl FnMut(usize, usize, usize)) {
        let r = self.resolution;
        iter::for_each_index3(r.x as usize, r.y as usize, r.z as usize, f);
    }

    /// Visit every `(i, j, k)` once across the current rayon pool, in no
    /// particular order.
    pub fn par_for_each_cell_index(&self, f: impl Fn(usize, usize, usize) + Sync + Send) {
        self.par_for_each_cell_index_with(&ParallelConfig::default(), f);
    }

    /// Like [`par_for_each_cell_index`](Self::par_for_each_cell_index) with
    /// explicit chunking.
    pub fn par_for_each_cell_index_with(
        &self,
        config: &ParallelConfig,
        f: impl Fn(usize, usize, usize) + Sync + Send,
    ) {
        tracing::trace!(cells = self.cell_count(), "parallel 3-D cell iteration");
        let r = self.resolution;
        iter::par_for_each_index3(
            r.x as usize,
            r.y as usize,
            r.z as usize,
            config.resolved_min_chunk_len(),
            f,
        );
    }
}
