//! Batch distribution for parallel search.
//!
//! The modifier-combination dimension is split into contiguous batches, one per
//! worker request, so batch order matches the sequential enumeration order.

/// Batch size that spreads `total` items over `workers` batches, rounding up.
///
/// # Example
/// ```
/// # use skillforge::parallel::auto_batch_size;
/// assert_eq!(auto_batch_size(100, 4), 25);
/// assert_eq!(auto_batch_size(10, 3), 4);
/// ```
pub fn auto_batch_size(total: usize, workers: usize) -> usize {
    if total == 0 || workers == 0 {
        return 1;
    }
    total.div_ceil(workers)
}
