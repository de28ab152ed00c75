//! Window placement over the backing file
//!
//! The placement rules are kept free of any I/O so the tie-breaks can be
//! tested on their own. [`reposition`] only decides *where* the window goes;
//! the buffer does the refill.

/// A cached byte range `[offset, offset + length)` of the backing file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowRange {
    /// File offset of the first cached byte
    pub offset: u64,
    /// Number of cached bytes (never more than the window capacity)
    pub length: usize,
}

impl WindowRange {
    pub fn new(offset: u64, length: usize) -> Self {
        Self { offset, length }
    }

    /// Window covering as much of `[offset, file_size)` as `capacity` allows
    pub fn filled(offset: u64, capacity: usize, file_size: u64) -> Self {
        let available = file_size.saturating_sub(offset);
        let length = if available < capacity as u64 {
            available as usize
        } else {
            capacity
        };
        Self { offset, length }
    }

    /// Offset one past the last cached byte
    pub fn end(&self) -> u64 {
        self.offset + self.length as u64
    }

    /// Whether `[offset, offset + length)` lies entirely inside this window
    pub fn contains(&self, offset: u64, length: usize) -> bool {
        offset >= self.offset && offset + length as u64 <= self.end()
    }

    /// Whether `[offset, offset + length)` shares at least one byte with this window
    pub fn overlaps(&self, offset: u64, length: usize) -> bool {
        length > 0 && offset < self.end() && offset + length as u64 > self.offset
    }
}

/// Where the window must start so that `[offset, offset + length)` is cached.
///
/// `current` is the valid window, or `None` when the window is invalid.
/// Callers only reposition when the request is not already contained.
///
/// - invalid window: start exactly at `offset`
/// - backward access (request starts before the window): align the window end
///   with the request end, clamped at 0
/// - forward access: start at `offset`, unless that would run past the end of
///   the file, in which case align the window end with `file_size`
pub fn reposition(
    current: Option<WindowRange>,
    offset: u64,
    length: usize,
    capacity: usize,
    file_size: u64,
) -> u64 {
    match current {
        None => offset,
        Some(window) if offset < window.offset => {
            (offset + length as u64).saturating_sub(capacity as u64)
        }
        Some(_) => {
            if offset.saturating_add(capacity as u64) > file_size {
                file_size.saturating_sub(capacity as u64)
            } else {
                offset
            }
        }
    }
}
