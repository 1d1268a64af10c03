//! File loading
//!
//! Reads the served file into memory exactly once. The resulting
//! [`FileBuffer`] is immutable and shared by reference count, so handing it
//! to concurrent requests never copies the bytes.

use hyper::body::Bytes;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};

/// Immutable in-memory copy of the served file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBuffer {
    data: Bytes,
}

impl FileBuffer {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Shared handle to the contents; clones the reference, not the data
    pub fn bytes(&self) -> Bytes {
        self.data.clone()
    }
}

impl From<Vec<u8>> for FileBuffer {
    fn from(data: Vec<u8>) -> Self {
        Self {
            data: Bytes::from(data),
        }
    }
}

/// Load `path` fully into memory.
///
/// The size is taken from the file's metadata before reading and the buffer
/// is allocated to exactly that size. A file that yields fewer bytes than
/// reported fails with [`Error::TruncatedRead`]. The descriptor is closed on
/// every path when `file` goes out of scope.
pub fn load(path: &Path) -> Result<FileBuffer> {
    let io_err = |op: &'static str| {
        move |source: std::io::Error| Error::Io {
            path: path.to_path_buf(),
            op,
            source,
        }
    };

    let file = File::open(path).map_err(io_err("open"))?;
    let expected = file.metadata().map_err(io_err("fstat"))?.len();
    let data = read_to_len(file, expected, path)?;

    crate::logger::log_file_loaded(path, data.len());
    Ok(FileBuffer::from(data))
}

/// Read up to `expected` bytes, stopping early only at EOF.
///
/// The buffer is reserved up front; a size the allocator cannot satisfy is
/// an error, not an abort.
fn read_to_len(reader: impl Read, expected: u64, path: &Path) -> Result<Vec<u8>> {
    let capacity = usize::try_from(expected).unwrap_or(usize::MAX);

    let mut data = Vec::new();
    data.try_reserve_exact(capacity).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        op: "malloc",
        source: std::io::Error::new(std::io::ErrorKind::OutOfMemory, e),
    })?;
    reader
        .take(expected)
        .read_to_end(&mut data)
        .map_err(|source| Error::Io {
            path: path.to_path_buf(),
            op: "read",
            source,
        })?;

    if data.len() < capacity {
        return Err(Error::TruncatedRead {
            path: path.to_path_buf(),
            expected,
            actual: data.len() as u64,
        });
    }
    Ok(data)
}
