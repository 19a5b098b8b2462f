//! Slicing helpers for shaping input before it is processed in batches.

/// Error related to array operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArrayError {
    #[error("Chunk size must be a positive integer, got {0}")]
    InvalidChunkSize(usize),

    #[error("Sequence size must be a non-negative integer, got {0}")]
    InvalidSequenceSize(i64),
}

/// Splits `items` into chunks of `chunk_size` elements; the last chunk may be shorter.
///
/// # Errors
/// Returns `ArrayError::InvalidChunkSize` if `chunk_size` is zero.
pub fn chunk_array<T: Clone>(items: &[T], chunk_size: usize) -> Result<Vec<Vec<T>>, ArrayError> {
    if chunk_size == 0 {
        log::debug!("chunk_array: rejected chunk size 0 for {} items", items.len());
        return Err(ArrayError::InvalidChunkSize(chunk_size));
    }
    Ok(items.chunks(chunk_size).map(<[T]>::to_vec).collect())
}

/// Returns `0..size` as a vector.
pub fn get_sequence(size: usize) -> Vec<usize> {
    (0..size).collect()
}

/// Signed variant of [`get_sequence`] for sizes coming from untrusted arithmetic.
///
/// # Errors
/// Returns `ArrayError::InvalidSequenceSize` if `size` is negative or does not fit in `usize`.
pub fn try_get_sequence(size: i64) -> Result<Vec<usize>, ArrayError> {
    usize::try_from(size)
        .map(get_sequence)
        .map_err(|_| ArrayError::InvalidSequenceSize(size))
}
