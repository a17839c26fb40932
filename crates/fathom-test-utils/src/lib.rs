//! Test utilities and mock types for Fathom development.
//!
//! Provides data-backed mock grids ([`MockGrid2`], [`MockGrid3`]) that
//! implement the grid traits the way a real field container would, a
//! thread-safe [`VisitCounter`] for checking iteration coverage, grid
//! [`compliance`] assertions, and reusable field [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod compliance;
pub mod fixtures;

use std::io::{Read, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

use fathom_grid::codec::{read_f64_le, read_u64_le, write_f64_le, write_u64_le};
use fathom_grid::{
    read_shape2, read_shape3, write_shape2, write_shape3, Grid2, Grid3, GridError, GridShape2,
    GridShape3,
};
use indexmap::IndexMap;

/// Write a `u64` length prefix followed by the values.
fn write_payload(w: &mut dyn Write, data: &[f64]) -> Result<(), GridError> {
    write_u64_le(w, data.len() as u64)?;
    for &v in data {
        write_f64_le(w, v)?;
    }
    Ok(())
}

/// Read a payload written by [`write_payload`], requiring exactly
/// `expected` values.
fn read_payload(r: &mut dyn Read, expected: usize) -> Result<Vec<f64>, GridError> {
    let len = read_u64_le(r)?;
    if len != expected as u64 {
        return Err(GridError::MalformedStream {
            detail: format!("payload has {len} values, shape has {expected} cells"),
        });
    }
    (0..expected).map(|_| read_f64_le(r)).collect()
}

// ── MockGrid2 ───────────────────────────────────────────────────

/// 2-D grid holding one `f64` per cell, row-major with `j` fastest.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MockGrid2 {
    shape: GridShape2,
    data: Vec<f64>,
}

impl MockGrid2 {
    /// Zero-filled grid over `shape`.
    pub fn new(shape: GridShape2) -> Self {
        Self {
            shape,
            data: vec![0.0; shape.cell_count()],
        }
    }

    /// Grid filled with `f(i, j)` for every cell.
    pub fn from_fn(shape: GridShape2, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(shape.cell_count());
        shape.for_each_cell_index(|i, j| data.push(f(i, j)));
        Self { shape, data }
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[self.index(i, j)]
    }

    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        let idx = self.index(i, j);
        self.data[idx] = value;
    }

    fn index(&self, i: usize, j: usize) -> usize {
        i * self.shape.resolution().y as usize + j
    }
}

impl Grid2 for MockGrid2 {
    fn shape(&self) -> &GridShape2 {
        &self.shape
    }

    fn serialize(&self, w: &mut dyn Write) -> Result<(), GridError> {
        write_shape2(w, &self.shape)?;
        write_payload(w, &self.data)
    }

    fn deserialize(&mut self, r: &mut dyn Read) -> Result<(), GridError> {
        let shape = read_shape2(r)?;
        let data = read_payload(r, shape.cell_count())?;
        self.shape = shape;
        self.data = data;
        Ok(())
    }

    fn swap(&mut self, other: &mut dyn Grid2) -> Result<(), GridError> {
        let other = other
            .downcast_mut::<Self>()
            .ok_or(GridError::GridTypeMismatch)?;
        self.shape.swap(&mut other.shape);
        std::mem::swap(&mut self.data, &mut other.data);
        Ok(())
    }
}

// ── MockGrid3 ───────────────────────────────────────────────────

/// 3-D grid holding one `f64` per cell, with `k` fastest.
///
/// Payload layout matches the serial iteration order, so
/// [`from_fn`](Self::from_fn) and `data()` line up with
/// `for_each_cell_index`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MockGrid3 {
    shape: GridShape3,
    data: Vec<f64>,
}

impl MockGrid3 {
    /// Zero-filled grid over `shape`.
    pub fn new(shape: GridShape3) -> Self {
        Self {
            shape,
            data: vec![0.0; shape.cell_count()],
        }
    }

    /// Grid filled with `f(i, j, k)` for every cell.
    pub fn from_fn(shape: GridShape3, mut f: impl FnMut(usize, usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(shape.cell_count());
        shape.for_each_cell_index(|i, j, k| data.push(f(i, j, k)));
        Self { shape, data }
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn get(&self, i: usize, j: usize, k: usize) -> f64 {
        self.data[self.index(i, j, k)]
    }

    pub fn set(&mut self, i: usize, j: usize, k: usize, value: f64) {
        let idx = self.index(i, j, k);
        self.data[idx] = value;
    }

    fn index(&self, i: usize, j: usize, k: usize) -> usize {
        let res = self.shape.resolution();
        (i * res.y as usize + j) * res.z as usize + k
    }
}

impl Grid3 for MockGrid3 {
    fn shape(&self) -> &GridShape3 {
        &self.shape
    }

    fn serialize(&self, w: &mut dyn Write) -> Result<(), GridError> {
        write_shape3(w, &self.shape)?;
        write_payload(w, &self.data)
    }

    fn deserialize(&mut self, r: &mut dyn Read) -> Result<(), GridError> {
        let shape = read_shape3(r)?;
        let data = read_payload(r, shape.cell_count())?;
        self.shape = shape;
        self.data = data;
        Ok(())
    }

    fn swap(&mut self, other: &mut dyn Grid3) -> Result<(), GridError> {
        let other = other
            .downcast_mut::<Self>()
            .ok_or(GridError::GridTypeMismatch)?;
        self.shape.swap(&mut other.shape);
        std::mem::swap(&mut self.data, &mut other.data);
        Ok(())
    }
}

// ── VisitCounter ────────────────────────────────────────────────

/// Thread-safe tally of `(i, j, k)` visits, in first-visit order.
///
/// 2-D callers record `k = 0`.
#[derive(Debug, Default)]
pub struct VisitCounter {
    visits: Mutex<IndexMap<(usize, usize, usize), usize>>,
}

impl VisitCounter {
    pub fn new() -> Self {
        Self::default()
    }

    // A panicking callback must not hide the visits recorded before it.
    fn lock(&self) -> MutexGuard<'_, IndexMap<(usize, usize, usize), usize>> {
        self.visits.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record one visit. Callable from any worker.
    pub fn record(&self, i: usize, j: usize, k: usize) {
        let mut visits = self.lock();
        *visits.entry((i, j, k)).or_insert(0) += 1;
    }

    /// Visits recorded for one index.
    pub fn count(&self, i: usize, j: usize, k: usize) -> usize {
        let visits = self.lock();
        visits.get(&(i, j, k)).copied().unwrap_or(0)
    }

    /// Number of distinct indices visited.
    pub fn distinct(&self) -> usize {
        self.lock().len()
    }

    /// Total visits across all indices.
    pub fn total(&self) -> usize {
        self.lock().values().sum()
    }

    /// Returns `true` if every recorded index was visited exactly once.
    pub fn all_once(&self) -> bool {
        self.lock().values().all(|&n| n == 1)
    }

    /// Indices in the order they were first visited.
    pub fn first_visit_order(&self) -> Vec<(usize, usize, usize)> {
        self.lock().keys().copied().collect()
    }
}
