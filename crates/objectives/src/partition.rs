use std::num::NonZeroUsize;

/// Splits `items` into contiguous batches of `batch_size`, in order.
///
/// Every batch holds exactly `batch_size` candidates except possibly the
/// last, which holds the remainder. No candidate is dropped or repeated, so
/// concatenating the batches reproduces `items`. An empty population yields
/// no batches.
#[must_use]
pub fn partition<C>(items: &[C], batch_size: NonZeroUsize) -> Vec<&[C]> {
    items.chunks(batch_size.get()).collect()
}
