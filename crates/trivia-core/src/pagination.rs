//! Fixed-size page slicing.

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Return page `page` (1-based) of `items`.
///
/// Out-of-range pages yield an empty slice rather than an error; callers
/// decide whether an empty page means "not found". Page 0 is treated as page 1.
pub fn paginate<T>(page: usize, page_size: usize, items: &[T]) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Number of pages needed to show `total` items.
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}
