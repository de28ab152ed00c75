//! Positioned byte storage backing a windowed buffer
//!
//! The buffer never assumes it is talking to a real file: anything that can
//! load, store and truncate bytes at absolute offsets can back it. `File` is
//! the production store, `Vec<u8>` is used by tests and tools that want an
//! in-memory file with the same semantics.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};

/// Seekable, readable and writable byte storage
pub trait ByteStore {
    /// Current length of the stored data in bytes
    fn len(&mut self) -> io::Result<u64>;

    /// Check if the store is empty
    fn is_empty(&mut self) -> io::Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Fill `buf` completely with the bytes starting at `offset`
    fn load_at(&mut self, offset: u64, buf: &mut [u8]) -> io::Result<()>;

    /// Write all of `data` starting at `offset`, growing the store if the
    /// write ends past the current length
    fn store_at(&mut self, offset: u64, data: &[u8]) -> io::Result<()>;

    /// Shrink or grow the store to exactly `len` bytes
    fn truncate(&mut self, len: u64) -> io::Result<()>;
}

impl ByteStore for File {
    fn len(&mut self) -> io::Result<u64> {
        self.seek(SeekFrom::End(0))
    }

    fn load_at(&mut self, offset: u64, buf: &mut [u8]) -> io::Result<()> {
        self.seek(SeekFrom::Start(offset))?;
        self.read_exact(buf)
    }

    fn store_at(&mut self, offset: u64, data: &[u8]) -> io::Result<()> {
        self.seek(SeekFrom::Start(offset))?;
        self.write_all(data)
    }

    fn truncate(&mut self, len: u64) -> io::Result<()> {
        self.set_len(len)
    }
}

impl ByteStore for Vec<u8> {
    fn len(&mut self) -> io::Result<u64> {
        Ok(Vec::len(self) as u64)
    }

    fn load_at(&mut self, offset: u64, buf: &mut [u8]) -> io::Result<()> {
        let start = to_index(offset)?;
        let end = start
            .checked_add(buf.len())
            .filter(|end| *end <= Vec::len(self))
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::UnexpectedEof, "read past end of store")
            })?;
        buf.copy_from_slice(&self[start..end]);
        Ok(())
    }

    fn store_at(&mut self, offset: u64, data: &[u8]) -> io::Result<()> {
        let start = to_index(offset)?;
        let end = start + data.len();
        if end > Vec::len(self) {
            self.resize(end, 0);
        }
        self[start..end].copy_from_slice(data);
        Ok(())
    }

    fn truncate(&mut self, len: u64) -> io::Result<()> {
        self.resize(to_index(len)?, 0);
        Ok(())
    }
}

impl<S: ByteStore + ?Sized> ByteStore for &mut S {
    fn len(&mut self) -> io::Result<u64> {
        (**self).len()
    }

    fn load_at(&mut self, offset: u64, buf: &mut [u8]) -> io::Result<()> {
        (**self).load_at(offset, buf)
    }

    fn store_at(&mut self, offset: u64, data: &[u8]) -> io::Result<()> {
        (**self).store_at(offset, data)
    }

    fn truncate(&mut self, len: u64) -> io::Result<()> {
        (**self).truncate(len)
    }
}

fn to_index(offset: u64) -> io::Result<usize> {
    usize::try_from(offset)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "offset exceeds memory range"))
}
