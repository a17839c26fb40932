//! Configuration for parallel cell iteration.

use crate::error::GridError;

/// Controls how [`parallel_for_each_cell_index`](crate::Grid3::parallel_for_each_cell_index)
/// splits the cell domain across workers.
///
/// The iteration itself always runs on the *current* rayon pool. Callers that
/// want a bounded number of threads build a dedicated pool with
/// [`build_pool`](Self::build_pool) and enter it with
/// [`rayon::ThreadPool::install`].
///
/// # Examples
///
/// ```
/// use fathom_grid::{GridShape3, ParallelConfig};
/// use glam::{DVec3, UVec3};
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// let shape = GridShape3::new(UVec3::new(4, 4, 4), DVec3::ONE, DVec3::ZERO).unwrap();
/// let config = ParallelConfig {
///     worker_count: Some(2),
///     min_chunk_len: 8,
/// };
/// let pool = config.build_pool().unwrap();
/// let visits = AtomicUsize::new(0);
/// pool.install(|| {
///     shape.par_for_each_cell_index_with(&config, |_, _, _| {
///         visits.fetch_add(1, Ordering::Relaxed);
///     })
/// });
/// assert_eq!(visits.into_inner(), 64);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Number of worker threads for [`build_pool`](Self::build_pool).
    /// `None` = auto-detect from `available_parallelism`.
    pub worker_count: Option<usize>,
    /// Smallest number of consecutive cells handed to one worker. Default: 64.
    pub min_chunk_len: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            worker_count: None,
            min_chunk_len: 64,
        }
    }
}

impl ParallelConfig {
    /// Resolve the actual worker count, applying auto-detection if `None`.
    ///
    /// Explicit values are clamped to `[1, 256]`.
    pub fn resolved_worker_count(&self) -> usize {
        match self.worker_count {
            Some(n) => n.clamp(1, 256),
            None => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
        }
    }

    /// Chunk length actually used; zero is treated as one.
    pub fn resolved_min_chunk_len(&self) -> usize {
        self.min_chunk_len.max(1)
    }

    /// Build a dedicated rayon pool sized by
    /// [`resolved_worker_count`](Self::resolved_worker_count).
    pub fn build_pool(&self) -> Result<rayon::ThreadPool, GridError> {
        let workers = self.resolved_worker_count();
        tracing::debug!(workers, "building cell iteration pool");
        rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("fathom-cells-{i}"))
            .build()
            .map_err(|e| GridError::ThreadPool {
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_worker_count_is_clamped() {
        let zero = ParallelConfig {
            worker_count: Some(0),
            ..Default::default()
        };
        assert_eq!(zero.resolved_worker_count(), 1);

        let huge = ParallelConfig {
            worker_count: Some(10_000),
            ..Default::default()
        };
        assert_eq!(huge.resolved_worker_count(), 256);
    }

    #[test]
    fn auto_worker_count_is_positive() {
        assert!(ParallelConfig::default().resolved_worker_count() >= 1);
    }

    #[test]
    fn zero_chunk_len_resolves_to_one() {
        let config = ParallelConfig {
            min_chunk_len: 0,
            ..Default::default()
        };
        assert_eq!(config.resolved_min_chunk_len(), 1);
    }

    #[test]
    fn build_pool_honours_worker_count() {
        let config = ParallelConfig {
            worker_count: Some(3),
            ..Default::default()
        };
        let pool = config.build_pool().unwrap();
        assert_eq!(pool.current_num_threads(), 3);
    }
}
