//! Rayon-based parallelisation utilities.
//!
//! Batches below [`ParallelConfig::parallel_threshold`] run on the calling
//! thread; larger ones are split into chunks of
//! [`ParallelConfig::batch_size`] and spread over the Rayon pool.

use rayon::prelude::*;

/// Batch size for parallel processing.
pub const DEFAULT_BATCH_SIZE: usize = 64;

/// Item count at which parallel evaluation starts.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 100;

/// Processes items in parallel chunks and concatenates the per-chunk outputs.
///
/// Output order matches input order.
pub fn process_in_batches<T, R, F>(items: &[T], batch_size: usize, processor: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&[T]) -> Vec<R> + Sync + Send,
{
    items
        .par_chunks(batch_size.max(1))
        .map(processor)
        .collect::<Vec<Vec<R>>>()
        .into_iter()
        .flatten()
        .collect()
}

/// Configuration for parallel execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Batch size for chunked processing
    pub batch_size: usize,
    /// Minimum items before using parallelism
    pub parallel_threshold: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl ParallelConfig {
    /// Creates a new parallel configuration.
    pub fn new(batch_size: usize, parallel_threshold: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
            parallel_threshold,
        }
    }

    /// Returns whether to use parallel processing for the given item count.
    #[inline]
    pub fn should_parallelize(&self, n_items: usize) -> bool {
        n_items >= self.parallel_threshold
    }
}
