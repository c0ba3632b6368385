//! Batched reporting of run results.

/// Number of entries per report unit.
pub const REPORT_CHUNK_SIZE: usize = 30;

/// Partitions `items` into consecutive non-overlapping groups of at most
/// `size` elements, preserving the original order. The last group may be
/// shorter; an empty input yields no groups. Concatenating the groups in
/// order reproduces the input exactly.
pub fn chunk<T: Clone>(items: &[T], size: usize) -> Vec<Vec<T>> {
    debug_assert!(size >= 1, "chunk size must be at least 1");

    if items.is_empty() {
        return Vec::new();
    }
    if size == 0 {
        return vec![items.to_vec()];
    }

    items.chunks(size).map(<[T]>::to_vec).collect()
}
