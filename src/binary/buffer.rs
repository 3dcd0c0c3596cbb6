//! Read-only database buffer, either memory-mapped or held in memory.

use flate2::read::GzDecoder;
use memmap2::Mmap;
use std::fs::File;
use std::io::Read;
use std::ops::Deref;
use std::path::Path;

use crate::config::LoadMode;
use crate::{Error, Result};

/// Immutable bytes backing an open database.
///
/// Both variants deref to `[u8]`, so the search code never knows which
/// one it is reading from.
pub enum DatabaseBuffer {
    /// Zero-copy view of the file. Owns the mapping, which keeps the
    /// underlying file descriptor alive until drop.
    Mapped(Mmap),
    /// Full in-memory copy.
    Owned(Vec<u8>),
}

impl DatabaseBuffer {
    /// Load `path` using the requested mode.
    ///
    /// Gzip files (`.gz`) are always decompressed into memory. A failed
    /// mapping falls back to reading the file.
    pub fn load(path: &Path, mode: LoadMode) -> Result<Self> {
        let open_err = |source| Error::Open {
            path: path.to_path_buf(),
            source,
        };

        let mut file = File::open(path).map_err(open_err)?;

        if is_gzip_path(path) {
            let mut data = Vec::new();
            GzDecoder::new(file).read_to_end(&mut data).map_err(open_err)?;
            log::debug!("Decompressed {:?} into {} bytes", path, data.len());
            return Ok(DatabaseBuffer::Owned(data));
        }

        if mode == LoadMode::Mmap {
            match unsafe { Mmap::map(&file) } {
                Ok(mmap) => return Ok(DatabaseBuffer::Mapped(mmap)),
                Err(e) => {
                    log::warn!("Failed to mmap {:?}, reading into memory: {}", path, e);
                }
            }
        }

        let mut data = Vec::new();
        file.read_to_end(&mut data).map_err(open_err)?;
        Ok(DatabaseBuffer::Owned(data))
    }

    pub fn is_mapped(&self) -> bool {
        matches!(self, DatabaseBuffer::Mapped(_))
    }

    /// Bounds-checked slice of `len` bytes at `offset`.
    pub fn slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        checked_slice(self, offset, len)
    }
}

impl Deref for DatabaseBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            DatabaseBuffer::Mapped(mmap) => &mmap[..],
            DatabaseBuffer::Owned(data) => &data[..],
        }
    }
}

impl std::fmt::Debug for DatabaseBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = if self.is_mapped() { "Mapped" } else { "Owned" };
        write!(f, "DatabaseBuffer::{}({} bytes)", kind, self.len())
    }
}

/// Bounds-checked slicing shared by every reader of the raw bytes.
pub(crate) fn checked_slice(data: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    offset
        .checked_add(len)
        .and_then(|end| data.get(offset..end))
        .ok_or(Error::Corrupt {
            offset,
            len,
            size: data.len(),
        })
}

fn is_gzip_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false)
}
