use std::slice;

use crate::error::CombinatoricsError;

/// Split `items` into contiguous pieces of at most `size` elements, in order.
///
/// A zero `size` is rejected rather than clamped.
///
/// # Example
/// ```
/// # use skillforge::combinatorics::chunks;
/// let pieces: Vec<&[u8]> = chunks(&[1, 2, 3, 4, 5], 2).unwrap().collect();
/// assert_eq!(pieces, vec![&[1, 2][..], &[3, 4][..], &[5][..]]);
/// ```
pub fn chunks<T>(items: &[T], size: usize) -> Result<slice::Chunks<'_, T>, CombinatoricsError> {
    if size == 0 {
        return Err(CombinatoricsError::InvalidChunkSize(size));
    }
    Ok(items.chunks(size))
}
