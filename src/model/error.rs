//! Errors reported by the windowed buffer

use std::io;

/// Result type for all buffer operations
pub type Result<T> = std::result::Result<T, BufferError>;

/// Errors that can occur while accessing or editing a windowed buffer
#[derive(Debug)]
pub enum BufferError {
    /// The request violates an offset/length precondition.
    ///
    /// This is a caller error: it is always reported and never retried.
    OutOfRange {
        offset: u64,
        length: u64,
        file_size: u64,
        capacity: usize,
    },
    /// The underlying seek/read/write/truncate failed
    Io(io::Error),
    /// The window memory could not be obtained at creation
    AllocationFailure { capacity: usize },
}

impl BufferError {
    pub(crate) fn out_of_range(offset: u64, length: u64, file_size: u64, capacity: usize) -> Self {
        BufferError::OutOfRange {
            offset,
            length,
            file_size,
            capacity,
        }
    }

    /// True for `OutOfRange`
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, BufferError::OutOfRange { .. })
    }

    /// True for `Io`
    pub fn is_io(&self) -> bool {
        matches!(self, BufferError::Io(_))
    }
}

impl std::fmt::Display for BufferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BufferError::OutOfRange {
                offset,
                length,
                file_size,
                capacity,
            } => write!(
                f,
                "Out of range: {length} bytes at offset {offset:#x} (file size {file_size}, window capacity {capacity})"
            ),
            BufferError::Io(e) => write!(f, "IO error: {e}"),
            BufferError::AllocationFailure { capacity } => {
                write!(f, "Could not allocate a {capacity} byte window")
            }
        }
    }
}

impl std::error::Error for BufferError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BufferError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for BufferError {
    fn from(e: io::Error) -> Self {
        BufferError::Io(e)
    }
}
