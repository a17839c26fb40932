//! Grid trait compliance test helpers.
//!
//! These functions verify that a `Grid2`/`Grid3` implementation satisfies
//! the iteration, position, and serialization contracts. Reused by the
//! mock grids' own tests and by any downstream data-backed grid.

use fathom_grid::{Grid2, Grid3};
use glam::{DVec2, DVec3};
use indexmap::IndexSet;

/// Assert that serial iteration is lexicographic with `k` fastest and
/// covers every cell exactly once.
pub fn assert_serial_order_lexicographic(grid: &dyn Grid3) {
    let res = grid.resolution();
    let mut visited = Vec::new();
    grid.for_each_cell_index(&mut |i, j, k| visited.push((i, j, k)));

    let mut expected = Vec::with_capacity(visited.len());
    for i in 0..res.x as usize {
        for j in 0..res.y as usize {
            for k in 0..res.z as usize {
                expected.push((i, j, k));
            }
        }
    }
    assert_eq!(visited, expected, "serial iteration order for resolution {res}");
}

/// Assert that parallel iteration visits every cell exactly once.
///
/// Visits are sent over a channel from the workers and collected after
/// the call returns.
pub fn assert_parallel_visits_each_once(grid: &dyn Grid3) {
    let (tx, rx) = crossbeam_channel::unbounded();
    grid.parallel_for_each_cell_index(&|i, j, k| {
        tx.send((i, j, k)).unwrap();
    });
    drop(tx);

    let visits: Vec<_> = rx.iter().collect();
    let cell_count = grid.shape().cell_count();
    assert_eq!(
        visits.len(),
        cell_count,
        "parallel iteration made {} calls for {cell_count} cells",
        visits.len()
    );
    let unique: IndexSet<_> = visits.iter().collect();
    assert_eq!(unique.len(), cell_count, "parallel iteration repeated an index");

    let res = grid.resolution();
    for &(i, j, k) in &visits {
        assert!(
            i < res.x as usize && j < res.y as usize && k < res.z as usize,
            "index ({i}, {j}, {k}) outside resolution {res}"
        );
    }
}

/// Assert that the position function maps each cell to
/// `origin + spacing * (index + 0.5)`.
pub fn assert_position_is_cell_center(grid: &dyn Grid3) {
    let pos = grid.cell_center_position();
    let (origin, spacing) = (grid.origin(), grid.grid_spacing());
    grid.for_each_cell_index(&mut |i, j, k| {
        let expected = origin + spacing * (DVec3::new(i as f64, j as f64, k as f64) + 0.5);
        let actual = pos(i, j, k);
        assert!(
            (actual - expected).abs().max_element() <= 1e-12 * expected.abs().max_element().max(1.0),
            "position({i}, {j}, {k}) = {actual}, expected {expected}"
        );
    });
}

/// Assert that the bounding box is `[origin, origin + spacing * resolution]`.
pub fn assert_bounding_box_derived(grid: &dyn Grid3) {
    let bbox = grid.bounding_box();
    let upper = grid.origin() + grid.grid_spacing() * grid.resolution().as_dvec3();
    assert_eq!(bbox.lower_corner, grid.origin(), "bounding box lower corner");
    assert_eq!(bbox.upper_corner, upper, "bounding box upper corner");
}

/// Assert that `has_same_shape(g, g)` holds.
pub fn assert_same_shape_reflexive(grid: &dyn Grid3) {
    assert!(grid.has_same_shape(grid), "has_same_shape is not reflexive");
}

/// Assert that serializing `grid` and deserializing into `G::default()`
/// yields the same shape and a byte-identical re-serialization.
pub fn assert_serialize_roundtrip<G: Grid3 + Default>(grid: &G) {
    let mut bytes = Vec::new();
    grid.serialize(&mut bytes).unwrap();

    let mut restored = G::default();
    restored.deserialize(&mut bytes.as_slice()).unwrap();
    assert!(
        restored.has_same_shape(grid),
        "deserialized shape differs from the original"
    );

    let mut again = Vec::new();
    restored.serialize(&mut again).unwrap();
    assert_eq!(bytes, again, "re-serialization is not byte-identical");
}

/// Run all 3-D compliance checks on a grid.
pub fn run_full_compliance<G: Grid3 + Default>(grid: &G) {
    assert_serial_order_lexicographic(grid);
    assert_parallel_visits_each_once(grid);
    assert_position_is_cell_center(grid);
    assert_bounding_box_derived(grid);
    assert_same_shape_reflexive(grid);
    assert_serialize_roundtrip(grid);
}

// ── 2-D ─────────────────────────────────────────────────────────

/// 2-D variant of [`assert_serial_order_lexicographic`].
pub fn assert_serial_order_lexicographic_2d(grid: &dyn Grid2) {
    let res = grid.resolution();
    let mut visited = Vec::new();
    grid.for_each_cell_index(&mut |i, j| visited.push((i, j)));

    let expected: Vec<_> = (0..res.x as usize)
        .flat_map(|i| (0..res.y as usize).map(move |j| (i, j)))
        .collect();
    assert_eq!(visited, expected, "serial iteration order for resolution {res}");
}

/// 2-D variant of [`assert_parallel_visits_each_once`].
pub fn assert_parallel_visits_each_once_2d(grid: &dyn Grid2) {
    let (tx, rx) = crossbeam_channel::unbounded();
    grid.parallel_for_each_cell_index(&|i, j| {
        tx.send((i, j)).unwrap();
    });
    drop(tx);

    let visits: IndexSet<_> = rx.iter().collect();
    assert_eq!(
        visits.len(),
        grid.shape().cell_count(),
        "parallel iteration missed or repeated an index"
    );
}

/// 2-D variant of [`assert_position_is_cell_center`].
pub fn assert_position_is_cell_center_2d(grid: &dyn Grid2) {
    let pos = grid.cell_center_position();
    let (origin, spacing) = (grid.origin(), grid.grid_spacing());
    grid.for_each_cell_index(&mut |i, j| {
        let expected = origin + spacing * (DVec2::new(i as f64, j as f64) + 0.5);
        let actual = pos(i, j);
        assert!(
            (actual - expected).abs().max_element() <= 1e-12 * expected.abs().max_element().max(1.0),
            "position({i}, {j}) = {actual}, expected {expected}"
        );
    });
}

/// 2-D variant of [`assert_serialize_roundtrip`].
pub fn assert_serialize_roundtrip_2d<G: Grid2 + Default>(grid: &G) {
    let mut bytes = Vec::new();
    grid.serialize(&mut bytes).unwrap();

    let mut restored = G::default();
    restored.deserialize(&mut bytes.as_slice()).unwrap();
    assert!(restored.has_same_shape(grid));

    let mut again = Vec::new();
    restored.serialize(&mut again).unwrap();
    assert_eq!(bytes, again, "re-serialization is not byte-identical");
}

/// Run all 2-D compliance checks on a grid.
pub fn run_full_compliance_2d<G: Grid2 + Default>(grid: &G) {
    assert_serial_order_lexicographic_2d(grid);
    assert_parallel_visits_each_once_2d(grid);
    assert_position_is_cell_center_2d(grid);
    assert_serialize_roundtrip_2d(grid);
    assert!(grid.has_same_shape(grid), "has_same_shape is not reflexive");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MockGrid2, MockGrid3};
    use fathom_grid::{GridShape2, GridShape3};
    use glam::{UVec2, UVec3};

    #[test]
    fn mock_grid3_compliance() {
        let shape =
            GridShape3::new(UVec3::new(3, 4, 5), DVec3::new(0.5, 1.0, 2.0), DVec3::splat(-1.0))
                .unwrap();
        run_full_compliance(&MockGrid3::from_fn(shape, |i, j, k| (i + j + k) as f64));
    }

    #[test]
    fn mock_grid3_empty_compliance() {
        let shape = GridShape3::new(UVec3::new(0, 4, 5), DVec3::ONE, DVec3::ZERO).unwrap();
        run_full_compliance(&MockGrid3::new(shape));
    }

    #[test]
    fn mock_grid2_compliance() {
        let shape = GridShape2::new(UVec2::new(7, 3), DVec2::new(0.25, 4.0), DVec2::new(10.0, -2.0))
            .unwrap();
        run_full_compliance_2d(&MockGrid2::from_fn(shape, |i, j| (i * j) as f64));
    }
}
