//! Parallel cell iteration on bare shapes, across chunk sizes and extents.

use fathom_grid::{GridShape2, GridShape3, ParallelConfig};
use glam::{DVec2, DVec3, UVec2, UVec3};
use indexmap::IndexSet;
use proptest::prelude::*;

fn collect3(shape: &GridShape3, config: &ParallelConfig) -> Vec<(usize, usize, usize)> {
    let (tx, rx) = crossbeam_channel::unbounded();
    shape.par_for_each_cell_index_with(config, |i, j, k| {
        tx.send((i, j, k)).unwrap();
    });
    drop(tx);
    rx.iter().collect()
}

#[test]
fn chunk_sizes_do_not_change_coverage() {
    let shape = GridShape3::new(UVec3::new(6, 5, 4), DVec3::ONE, DVec3::ZERO).unwrap();
    for min_chunk_len in [0, 1, 7, 64, 1_000] {
        let config = ParallelConfig {
            worker_count: None,
            min_chunk_len,
        };
        let visits = collect3(&shape, &config);
        let unique: IndexSet<_> = visits.iter().copied().collect();
        assert_eq!(visits.len(), 120, "chunk {min_chunk_len}");
        assert_eq!(unique.len(), 120, "chunk {min_chunk_len}");
    }
}

#[test]
fn parallel_2d_covers_domain() {
    let shape = GridShape2::new(UVec2::new(33, 17), DVec2::ONE, DVec2::ZERO).unwrap();
    let (tx, rx) = crossbeam_channel::unbounded();
    shape.par_for_each_cell_index(|i, j| tx.send((i, j)).unwrap());
    drop(tx);

    let unique: IndexSet<_> = rx.iter().collect();
    assert_eq!(unique.len(), 33 * 17);
    assert!(unique.iter().all(|&(i, j)| i < 33 && j < 17));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn parallel_set_equals_serial_set(
        nx in 0u32..12,
        ny in 0u32..12,
        nz in 0u32..12,
        chunk in 1usize..200,
    ) {
        let shape = GridShape3::new(UVec3::new(nx, ny, nz), DVec3::ONE, DVec3::ZERO).unwrap();
        let mut serial = IndexSet::new();
        shape.for_each_cell_index(|i, j, k| {
            serial.insert((i, j, k));
        });

        let config = ParallelConfig { worker_count: None, min_chunk_len: chunk };
        let parallel = collect3(&shape, &config);
        prop_assert_eq!(parallel.len(), serial.len());
        let parallel: IndexSet<_> = parallel.into_iter().collect();
        prop_assert_eq!(parallel.len(), serial.len());
        prop_assert!(parallel.iter().all(|idx| serial.contains(idx)));
    }
}
