//! Windowed file buffer
//!
//! A single fixed-capacity window caches part of a file that may be far
//! larger than memory. All reads go through [`WindowedBuffer::access`], which
//! moves and refills the window as needed; writes go straight to the file and
//! refresh the window when they touch it.
//!
//! The slice returned by `access` borrows the buffer, so it cannot outlive the
//! next call that may move or invalidate the window.

use super::error::{BufferError, Result};
use super::store::ByteStore;
use super::window::{reposition, WindowRange};
use std::fs::File;

/// Default window capacity (4 KB)
pub const DEFAULT_WINDOW_CAPACITY: usize = 4 * 1024;

/// A fixed-size cache window over a byte store
pub struct WindowedBuffer<S: ByteStore = File> {
    /// The open file; owned for the duration of the edit session
    pub(super) store: S,

    /// Total length of the file as currently known
    pub(super) file_size: u64,

    /// Fixed window capacity in bytes
    pub(super) capacity: usize,

    /// Cached range, `None` when the window content must not be trusted
    pub(super) window: Option<WindowRange>,

    /// Window bytes; always `capacity` long
    pub(super) data: Vec<u8>,
}

impl<S: ByteStore> WindowedBuffer<S> {
    /// Bind a buffer to an already open store and read the initial window.
    ///
    /// # Errors
    ///
    /// `OutOfRange` for a zero capacity, `AllocationFailure` if the window
    /// memory cannot be reserved, `Io` if the size query or the first read fails.
    pub fn create(capacity: usize, mut store: S) -> Result<Self> {
        if capacity == 0 {
            return Err(BufferError::out_of_range(0, 0, 0, capacity));
        }

        let file_size = store.len()?;

        let mut data = Vec::new();
        data.try_reserve_exact(capacity)
            .map_err(|_| BufferError::AllocationFailure { capacity })?;
        data.resize(capacity, 0);

        let mut buffer = Self {
            store,
            file_size,
            capacity,
            window: None,
            data,
        };
        if file_size > 0 {
            buffer.refill(0)?;
        }

        tracing::debug!(
            "Created windowed buffer: capacity={}, file_size={}",
            capacity,
            file_size
        );
        Ok(buffer)
    }

    /// Release the window and give the store back to the caller
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Total length of the file in bytes
    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    /// Window capacity in bytes
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The currently cached range, `None` if the window is invalid
    pub fn window(&self) -> Option<WindowRange> {
        self.window
    }

    /// Borrow the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Return `length` bytes at `offset`, moving the window if needed.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if `length` exceeds the capacity or the range is not
    /// inside the file. `Io` if the refill fails; the window is then invalid.
    pub fn access(&mut self, offset: u64, length: usize) -> Result<&[u8]> {
        let start = self.position_window(offset, length)?;
        Ok(&self.data[start..start + length])
    }

    /// Write `data` to the file at `offset`.
    ///
    /// The window is refreshed from the file if the write overlaps it, so
    /// cached bytes never go stale. The file size never changes.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if the write would end past the end of the file, `Io` if
    /// the write or the refresh read fails.
    pub fn write(&mut self, offset: u64, data: &[u8]) -> Result<()> {
        self.check_in_file(offset, data.len() as u64)?;
        self.store.store_at(offset, data)?;
        self.refresh_if_overlapping(offset, data.len())
    }

    /// Mark the window content as meaningless without touching it
    pub fn invalidate(&mut self) {
        self.window = None;
    }

    /// Copy an arbitrary in-file range, going through the window in
    /// capacity-sized chunks.
    ///
    /// # Errors
    ///
    /// Same as [`WindowedBuffer::access`].
    pub fn read_to_vec(&mut self, offset: u64, length: u64) -> Result<Vec<u8>> {
        self.check_in_file(offset, length)?;
        let mut out = Vec::with_capacity(usize::try_from(length).unwrap_or(0));
        let mut done = 0u64;
        while done < length {
            let chunk = self.chunk_len(length - done);
            out.extend_from_slice(self.access(offset + done, chunk)?);
            done += chunk as u64;
        }
        Ok(out)
    }

    /// Make sure `[offset, offset + length)` is cached and return its index
    /// into the window data.
    pub(super) fn position_window(&mut self, offset: u64, length: usize) -> Result<usize> {
        if length > self.capacity || offset >= self.file_size {
            return Err(self.out_of_range(offset, length as u64));
        }
        self.check_in_file(offset, length as u64)?;

        let window = match self.window {
            Some(window) if window.contains(offset, length) => window,
            current => {
                let start = reposition(current, offset, length, self.capacity, self.file_size);
                self.refill(start)?
            }
        };
        Ok((offset - window.offset) as usize)
    }

    /// Read the window from the file starting at `offset`
    pub(super) fn refill(&mut self, offset: u64) -> Result<WindowRange> {
        self.window = None;
        let range = WindowRange::filled(offset, self.capacity, self.file_size);
        tracing::trace!("Refilling window at {:#x} ({} bytes)", offset, range.length);
        self.store.load_at(offset, &mut self.data[..range.length])?;
        self.window = Some(range);
        Ok(range)
    }

    /// Write `length` window bytes starting at `start` to the file at `offset`
    pub(super) fn write_from_window(&mut self, start: usize, length: usize, offset: u64) -> Result<()> {
        self.check_in_file(offset, length as u64)?;
        let (store, data) = (&mut self.store, &self.data);
        store.store_at(offset, &data[start..start + length])?;
        self.refresh_if_overlapping(offset, length)
    }

    fn refresh_if_overlapping(&mut self, offset: u64, length: usize) -> Result<()> {
        match self.window {
            Some(window) if window.overlaps(offset, length) => {
                self.refill(window.offset)?;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Chunk size for walking `remaining` bytes one window at a time
    pub(super) fn chunk_len(&self, remaining: u64) -> usize {
        if remaining < self.capacity as u64 {
            remaining as usize
        } else {
            self.capacity
        }
    }

    /// Re-read the real file length after a failed mutation
    pub(super) fn resync_file_size(&mut self) {
        self.window = None;
        match self.store.len() {
            Ok(len) => self.file_size = len,
            Err(e) => tracing::warn!("Could not re-read file size: {}", e),
        }
    }

    fn check_in_file(&self, offset: u64, length: u64) -> Result<()> {
        match offset.checked_add(length) {
            Some(end) if end <= self.file_size => Ok(()),
            _ => Err(self.out_of_range(offset, length)),
        }
    }

    fn out_of_range(&self, offset: u64, length: u64) -> BufferError {
        BufferError::out_of_range(offset, length, self.file_size, self.capacity)
    }
}

impl<S: ByteStore> std::fmt::Debug for WindowedBuffer<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowedBuffer")
            .field("file_size", &self.file_size)
            .field("capacity", &self.capacity)
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}
