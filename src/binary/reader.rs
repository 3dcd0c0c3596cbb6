//! Carrier database handle with memory-mapping support.

use std::net::Ipv4Addr;
use std::ops::Range;
use std::path::Path;

use super::buffer::DatabaseBuffer;
use super::format::*;
use super::search;
use crate::config::{DatabaseConfig, LoadMode};
use crate::{Error, Lookup, Result};

/// Open carrier database.
///
/// Lookups borrow the underlying buffer directly; no record is copied
/// out of it. The handle is `Sync`, so one instance can serve lookups
/// from many threads. [`close`](Self::close) takes `&mut self` and so
/// cannot overlap with them.
#[derive(Debug)]
pub struct CarrierDatabase {
    buffer: Option<DatabaseBuffer>,
    version: [u8; VERSION_SIZE],
    size: usize,
}

impl CarrierDatabase {
    /// Open a database file, memory-mapping it.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_mode(path, LoadMode::Mmap)
    }

    /// Open the database at the default location.
    pub fn open_default() -> Result<Self> {
        Self::open_with_config(&DatabaseConfig::default())
    }

    /// Open a database as described by `config`.
    pub fn open_with_config(config: &DatabaseConfig) -> Result<Self> {
        Self::open_with_mode(&config.path, config.load_mode)
    }

    /// Open a database file with an explicit load mode.
    pub fn open_with_mode(path: impl AsRef<Path>, mode: LoadMode) -> Result<Self> {
        let path = path.as_ref();
        let buffer = DatabaseBuffer::load(path, mode)?;
        let db = Self::from_buffer(buffer)?;

        log::debug!(
            "Opened carrier database {:?} ({} bytes, {}, version {:?})",
            path,
            db.size,
            if db.is_mapped() { "mmap" } else { "memory" },
            db.version_string()
        );

        Ok(db)
    }

    /// Open a database from bytes already in memory.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_buffer(DatabaseBuffer::Owned(data))
    }

    fn from_buffer(buffer: DatabaseBuffer) -> Result<Self> {
        if buffer.len() < HEADER_SIZE {
            return Err(Error::TooSmall {
                expected: HEADER_SIZE,
                actual: buffer.len(),
            });
        }

        let mut version = [0u8; VERSION_SIZE];
        version.copy_from_slice(buffer.slice(0, VERSION_SIZE)?);

        Ok(Self {
            size: buffer.len(),
            buffer: Some(buffer),
            version,
        })
    }

    /// Raw 8-byte version tag, exactly as stored.
    pub fn version(&self) -> &[u8; VERSION_SIZE] {
        &self.version
    }

    /// Version tag as text, with trailing NULs and whitespace removed.
    pub fn version_string(&self) -> String {
        String::from_utf8_lossy(&self.version)
            .trim_end_matches(|c: char| c == '\0' || c.is_whitespace())
            .to_string()
    }

    /// Size of the database in bytes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the database is backed by a memory mapping.
    pub fn is_mapped(&self) -> bool {
        self.buffer.as_ref().map_or(false, DatabaseBuffer::is_mapped)
    }

    pub fn is_closed(&self) -> bool {
        self.buffer.is_none()
    }

    /// Release the buffer. Further lookups fail with [`Error::Closed`].
    pub fn close(&mut self) {
        if let Some(buffer) = self.buffer.take() {
            log::debug!("Closed carrier database ({} bytes)", buffer.len());
        }
    }

    fn data(&self) -> Result<&[u8]> {
        self.buffer.as_deref().ok_or(Error::Closed)
    }

    /// Look up a dotted-quad IPv4 address.
    pub fn lookup(&self, ip: &str) -> Result<Lookup> {
        let addr = parse_ipv4(ip)?;
        self.lookup_octets(addr.octets())
    }

    /// Look up an IPv4 address.
    pub fn lookup_addr(&self, addr: Ipv4Addr) -> Result<Lookup> {
        self.lookup_octets(addr.octets())
    }

    /// Look up a raw network-order address.
    pub fn lookup_octets(&self, octets: [u8; 4]) -> Result<Lookup> {
        search::search(self.data()?, octets)
    }

    /// Look up a raw network-order address given as a byte slice.
    pub fn lookup_bytes(&self, bytes: &[u8]) -> Result<Lookup> {
        let octets: [u8; 4] = bytes.try_into().map_err(|_| {
            Error::InvalidAddress(format!("expected 4 bytes, got {}", bytes.len()))
        })?;
        self.lookup_octets(octets)
    }

    /// Number of record slots after the header, auxiliary tail included.
    pub fn record_count(&self) -> Result<usize> {
        Ok(max_records(self.data()?.len()))
    }

    /// First octets that have at least one indexed range.
    pub fn populated_buckets(&self) -> Result<Vec<u8>> {
        search::populated_buckets(self.data()?)
    }

    /// Record range of the bucket for `octet`.
    pub fn bucket_range(&self, octet: u8) -> Result<Option<Range<usize>>> {
        search::bucket_range(self.data()?, octet)
    }
}

/// Parse a strict dotted-quad IPv4 address.
pub fn parse_ipv4(ip: &str) -> Result<Ipv4Addr> {
    ip.trim()
        .parse::<Ipv4Addr>()
        .map_err(|_| Error::InvalidAddress(ip.to_string()))
}
