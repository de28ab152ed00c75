//! Insertion and removal of byte ranges directly on the file
//!
//! Both operations shift the tail of the file in place, one window-sized
//! chunk at a time, without any storage beyond the window itself. The chunk
//! order is what keeps them correct:
//!
//! - insert grows the file first, then relocates the tail **from the highest
//!   chunk down**, so every chunk is read before a later chunk overwrites its
//!   old location;
//! - remove relocates the tail **from the lowest chunk up**, then shrinks the
//!   file, since every chunk is read from a higher offset than it is written to.
//!
//! Reversing either direction silently corrupts data.

use super::buffer::WindowedBuffer;
use super::error::Result;
use super::store::ByteStore;

impl<S: ByteStore> WindowedBuffer<S> {
    /// Insert `count` zero bytes at `offset`, growing the file.
    ///
    /// `offset` is clamped to the file size and `count` so the new size still
    /// fits in a `u64`.
    ///
    /// # Errors
    ///
    /// `Io` if any chunk read or write fails. Chunks already written stay
    /// written; the file size is re-read from the file before returning.
    pub fn insert(&mut self, offset: u64, count: u64) -> Result<()> {
        let offset = offset.min(self.file_size);
        let count = count.min(u64::MAX - self.file_size);
        if count == 0 {
            return Ok(());
        }

        let old_size = self.file_size;
        tracing::debug!(
            "Inserting {} bytes at {:#x} (file size {})",
            count,
            offset,
            old_size
        );

        let result = self
            .extend_with_zeros(old_size, count)
            .and_then(|()| self.relocate_tail_forward(offset, old_size, count))
            .and_then(|()| self.zero_fill(offset, count));
        if result.is_err() {
            self.resync_file_size();
        }
        result
    }

    /// Remove up to `count` bytes at `offset`, shrinking the file.
    ///
    /// `offset` is clamped to the file size and `count` to the bytes left
    /// after `offset`.
    ///
    /// # Errors
    ///
    /// `Io` if relocation fails (the file is not truncated then) or if the
    /// truncation itself fails; the file size is re-read in both cases.
    pub fn remove(&mut self, offset: u64, count: u64) -> Result<()> {
        let offset = offset.min(self.file_size);
        let count = count.min(self.file_size - offset);
        if count == 0 {
            return Ok(());
        }

        tracing::debug!(
            "Removing {} bytes at {:#x} (file size {})",
            count,
            offset,
            self.file_size
        );

        if let Err(e) = self.relocate_tail_backward(offset, count) {
            self.resync_file_size();
            return Err(e);
        }

        self.file_size -= count;
        self.invalidate();
        if let Err(e) = self.store.truncate(self.file_size) {
            self.resync_file_size();
            return Err(e.into());
        }
        Ok(())
    }

    /// Insert phase 1: bump the size and append `count` zero bytes at the old
    /// end of file, lowest offset first.
    fn extend_with_zeros(&mut self, old_size: u64, count: u64) -> Result<()> {
        self.invalidate();
        self.data.fill(0);
        self.file_size += count;

        let mut done = 0u64;
        while done < count {
            let chunk = self.chunk_len(count - done);
            self.write_from_window(0, chunk, old_size + done)?;
            done += chunk as u64;
        }
        Ok(())
    }

    /// Insert phase 2: move `[offset, old_size)` up by `count` bytes.
    ///
    /// Chunks are processed from the end of the tail toward `offset`. The
    /// file size has already grown, so every source range is inside the file.
    fn relocate_tail_forward(&mut self, offset: u64, old_size: u64, count: u64) -> Result<()> {
        let tail_size = old_size - offset;
        let mut done = 0u64;
        while done < tail_size {
            let chunk = self.chunk_len(tail_size - done);
            let source = old_size - done - chunk as u64;
            self.relocate(source, source + count, chunk)?;
            done += chunk as u64;
        }
        Ok(())
    }

    /// Insert phase 3: zero `[offset, offset + count)`.
    ///
    /// The window still holds tail bytes from phase 2, so it is invalidated
    /// before being reused as the zero chunk.
    fn zero_fill(&mut self, offset: u64, count: u64) -> Result<()> {
        let mut done = 0u64;
        while done < count {
            let chunk = self.chunk_len(count - done);
            self.invalidate();
            self.data[..chunk].fill(0);
            self.write_from_window(0, chunk, offset + done)?;
            done += chunk as u64;
        }
        Ok(())
    }

    /// Remove phase 1: move `[offset + count, file_size)` down by `count`
    /// bytes, lowest chunk first.
    fn relocate_tail_backward(&mut self, offset: u64, count: u64) -> Result<()> {
        let mut source = offset + count;
        while source < self.file_size {
            let chunk = self.chunk_len(self.file_size - source);
            self.relocate(source, source - count, chunk)?;
            source += chunk as u64;
        }
        Ok(())
    }

    /// Copy `length` bytes from `source` to `target` through the window
    fn relocate(&mut self, source: u64, target: u64, length: usize) -> Result<()> {
        let start = self.position_window(source, length)?;
        self.write_from_window(start, length, target)
    }
}
