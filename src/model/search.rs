//! Byte pattern search on top of the window
//!
//! Candidates are tested one offset at a time. Patterns longer than the
//! window are compared in window-sized chunks, each fetched with `access`.

use super::buffer::WindowedBuffer;
use super::error::Result;
use super::store::ByteStore;
use serde::{Deserialize, Serialize};

/// Direction in which candidate offsets are walked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchDirection {
    Forward,
    Backward,
}

impl<S: ByteStore> WindowedBuffer<S> {
    /// Find the first occurrence of `pattern` starting at `start`.
    ///
    /// Forward walks `start, start + 1, ...` up to the last offset where the
    /// pattern still fits; backward walks down from `start` (clamped to that
    /// same last offset) and always tests offset 0. An empty pattern never
    /// matches.
    ///
    /// # Errors
    ///
    /// `Io` if a chunk cannot be read.
    pub fn search(
        &mut self,
        start: u64,
        pattern: &[u8],
        direction: SearchDirection,
    ) -> Result<Option<u64>> {
        if pattern.is_empty() || pattern.len() as u64 > self.file_size {
            return Ok(None);
        }
        let last = self.file_size - pattern.len() as u64;

        match direction {
            SearchDirection::Forward => {
                let mut candidate = start;
                while candidate <= last {
                    if self.matches_at(candidate, pattern)? {
                        return Ok(Some(candidate));
                    }
                    candidate += 1;
                }
            }
            SearchDirection::Backward => {
                let mut candidate = start.min(last);
                loop {
                    if self.matches_at(candidate, pattern)? {
                        return Ok(Some(candidate));
                    }
                    if candidate == 0 {
                        break;
                    }
                    candidate -= 1;
                }
            }
        }
        Ok(None)
    }

    fn matches_at(&mut self, candidate: u64, pattern: &[u8]) -> Result<bool> {
        let mut compared = 0u64;
        for chunk in pattern.chunks(self.capacity) {
            if self.access(candidate + compared, chunk.len())? != chunk {
                return Ok(false);
            }
            compared += chunk.len() as u64;
        }
        Ok(true)
    }
}

/// Last search pattern of an editing session, reused by find next/previous.
///
/// Owned by the session, never global.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pattern: Option<Vec<u8>>,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The remembered pattern, if any non-empty one was set
    pub fn pattern(&self) -> Option<&[u8]> {
        self.pattern.as_deref()
    }

    /// Remember a pattern; an empty one clears the state
    pub fn set_pattern(&mut self, pattern: Vec<u8>) {
        self.pattern = if pattern.is_empty() { None } else { Some(pattern) };
    }

    /// Search forward for the remembered pattern starting at `from`
    ///
    /// # Errors
    ///
    /// `Io` if the buffer cannot be read.
    pub fn find_next<S: ByteStore>(
        &self,
        buffer: &mut WindowedBuffer<S>,
        from: u64,
    ) -> Result<Option<u64>> {
        match &self.pattern {
            Some(pattern) => buffer.search(from, pattern, SearchDirection::Forward),
            None => Ok(None),
        }
    }

    /// Search backward for the remembered pattern starting at `from`
    ///
    /// # Errors
    ///
    /// `Io` if the buffer cannot be read.
    pub fn find_previous<S: ByteStore>(
        &self,
        buffer: &mut WindowedBuffer<S>,
        from: u64,
    ) -> Result<Option<u64>> {
        match &self.pattern {
            Some(pattern) => buffer.search(from, pattern, SearchDirection::Backward),
            None => Ok(None),
        }
    }
}
