//! The `Grid2`/`Grid3` traits and `dyn Grid` downcast support.

use std::any::Any;
use std::io::{Read, Write};

use glam::{DVec2, DVec3, UVec2, UVec3};

use crate::bbox::{BoundingBox2, BoundingBox3};
use crate::config::ParallelConfig;
use crate::error::GridError;
use crate::shape::{DataPositionFunc2, DataPositionFunc3, GridShape2, GridShape3};

/// Axis-aligned 2-D cartesian grid.
///
/// Implementors own exactly one [`GridShape2`] and expose it through
/// [`shape`](Self::shape); every other accessor is provided on top of it.
/// See [`Grid3`] for the serialization and swap contracts, which are
/// identical in two dimensions.
pub trait Grid2: Any + Send + Sync + 'static {
    /// The grid's shape.
    fn shape(&self) -> &GridShape2;

    /// Write the shape with [`write_shape2`](crate::write_shape2), then the
    /// implementor's payload.
    fn serialize(&self, w: &mut dyn Write) -> Result<(), GridError>;

    /// Read back what [`serialize`](Self::serialize) wrote, in the same order.
    fn deserialize(&mut self, r: &mut dyn Read) -> Result<(), GridError>;

    /// Exchange shape and payload with `other`, which must have the same
    /// concrete type.
    fn swap(&mut self, other: &mut dyn Grid2) -> Result<(), GridError>;

    /// Cell counts per axis.
    fn resolution(&self) -> UVec2 {
        self.shape().resolution()
    }

    /// World-space position of the lower corner.
    fn origin(&self) -> DVec2 {
        self.shape().origin()
    }

    /// Cell size per axis.
    fn grid_spacing(&self) -> DVec2 {
        self.shape().grid_spacing()
    }

    /// World-space extent of the grid.
    fn bounding_box(&self) -> BoundingBox2 {
        self.shape().bounding_box()
    }

    /// Index-to-cell-center mapping owning a copy of the current shape.
    fn cell_center_position(&self) -> DataPositionFunc2 {
        self.shape().cell_center_position()
    }

    /// Visit every `(i, j)` once on the calling thread, `j` fastest.
    fn for_each_cell_index(&self, func: &mut dyn FnMut(usize, usize)) {
        self.shape().for_each_cell_index(func);
    }

    /// Visit every `(i, j)` once across the current rayon pool.
    fn parallel_for_each_cell_index(&self, func: &(dyn Fn(usize, usize) + Sync)) {
        self.shape().par_for_each_cell_index(func);
    }

    /// Like [`parallel_for_each_cell_index`](Self::parallel_for_each_cell_index)
    /// with explicit chunking.
    fn parallel_for_each_cell_index_with(
        &self,
        config: &ParallelConfig,
        func: &(dyn Fn(usize, usize) + Sync),
    ) {
        self.shape().par_for_each_cell_index_with(config, func);
    }

    /// Returns `true` if resolution, spacing, and origin are exactly equal.
    fn has_same_shape(&self, other: &dyn Grid2) -> bool {
        self.shape().has_same_shape(other.shape())
    }
}

impl dyn Grid2 {
    /// Attempt to downcast a trait object to a concrete grid type.
    pub fn downcast_ref<T: Grid2>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }

    /// Mutable variant of [`downcast_ref`](Self::downcast_ref).
    pub fn downcast_mut<T: Grid2>(&mut self) -> Option<&mut T> {
        (self as &mut dyn Any).downcast_mut::<T>()
    }
}

/// Axis-aligned 3-D cartesian grid.
///
/// The trait carries only the shape; concrete grids add per-cell payload.
///
/// # Serialization
///
/// [`serialize`](Self::serialize) must begin with
/// [`write_shape3`](crate::write_shape3) and [`deserialize`](Self::deserialize)
/// with [`read_shape3`](crate::read_shape3), so every concrete format starts
/// with a self-describing shape (resolution, spacing, origin). A failed
/// `deserialize` leaves the grid in an unspecified state that the caller
/// should discard.
///
/// # Swapping
///
/// [`swap`](Self::swap) takes `&mut dyn Grid3` so it stays object safe.
/// Implementors downcast `other` to `Self` and return
/// [`GridError::GridTypeMismatch`] when the concrete types differ; the shape
/// half of the exchange is [`GridShape3::swap`].
///
/// # Thread Safety
///
/// `Sync` is required so `&dyn Grid3` can be shared with the workers of
/// [`parallel_for_each_cell_index`](Self::parallel_for_each_cell_index).
pub trait Grid3: Any + Send + Sync + 'static {
    /// The grid's shape.
    fn shape(&self) -> &GridShape3;

    /// Write the shape with [`write_shape3`](crate::write_shape3), then the
    /// implementor's payload.
    fn serialize(&self, w: &mut dyn Write) -> Result<(), GridError>;

    /// Read back what [`serialize`](Self::serialize) wrote, in the same order.
    fn deserialize(&mut self, r: &mut dyn Read) -> Result<(), GridError>;

    /// Exchange shape and payload with `other`, which must have the same
    /// concrete type.
    fn swap(&mut self, other: &mut dyn Grid3) -> Result<(), GridError>;

    /// Cell counts per axis.
    fn resolution(&self) -> UVec3 {
        self.shape().resolution()
    }

    /// World-space position of the lower corner.
    fn origin(&self) -> DVec3 {
        self.shape().origin()
    }

    /// Cell size per axis.
    fn grid_spacing(&self) -> DVec3 {
        self.shape().grid_spacing()
    }

    /// World-space extent of the grid.
    fn bounding_box(&self) -> BoundingBox3 {
        self.shape().bounding_box()
    }

    /// Index-to-cell-center mapping owning a copy of the current shape.
    fn cell_center_position(&self) -> DataPositionFunc3 {
        self.shape().cell_center_position()
    }

    /// Visit every `(i, j, k)` once on the calling thread.
    ///
    /// Order is lexicographic with `k` fastest and `i` slowest, so callers
    /// may accumulate sequentially without synchronization.
    fn for_each_cell_index(&self, func: &mut dyn FnMut(usize, usize, usize)) {
        self.shape().for_each_cell_index(func);
    }

    /// Visit every `(i, j, k)` once across the current rayon pool.
    ///
    /// Order is unspecified and calls run concurrently; `func` must
    /// synchronize any shared state it touches.
    fn parallel_for_each_cell_index(&self, func: &(dyn Fn(usize, usize, usize) + Sync)) {
        self.shape().par_for_each_cell_index(func);
    }

    /// Like [`parallel_for_each_cell_index`](Self::parallel_for_each_cell_index)
    /// with explicit chunking.
    fn parallel_for_each_cell_index_with(
        &self,
        config: &ParallelConfig,
        func: &(dyn Fn(usize, usize, usize) + Sync),
    ) {
        self.shape().par_for_each_cell_index_with(config, func);
    }

    /// Returns `true` if resolution, spacing, and origin are exactly equal.
    fn has_same_shape(&self, other: &dyn Grid3) -> bool {
        self.shape().has_same_shape(other.shape())
    }
}

impl dyn Grid3 {
    /// Attempt to downcast a trait object to a concrete grid type.
    pub fn downcast_ref<T: Grid3>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }

    /// Mutable variant of [`downcast_ref`](Self::downcast_ref).
    pub fn downcast_mut<T: Grid3>(&mut self) -> Option<&mut T> {
        (self as &mut dyn Any).downcast_mut::<T>()
    }
}
