//! Binary format constants and record views.

use std::cmp::Ordering;

/// Size of the opaque version tag at the start of the file.
pub const VERSION_SIZE: usize = 8;

/// Offset of the first-octet index.
pub const INDEX_OFFSET: usize = VERSION_SIZE;

/// Number of first-octet index entries.
pub const INDEX_ENTRIES: usize = 256;

/// Size of one first-octet index entry (i32 LE).
pub const INDEX_ENTRY_SIZE: usize = 4;

/// Header size in bytes: version tag + first-octet index.
pub const HEADER_SIZE: usize = INDEX_OFFSET + INDEX_ENTRIES * INDEX_ENTRY_SIZE;

/// Range record size in bytes.
pub const RECORD_SIZE: usize = 20;

/// Index entry value marking an octet with no ranges.
pub const EMPTY_BUCKET: i32 = -1;

const START_OFFSET: usize = 0;
const END_OFFSET: usize = 4;
const CODE_OFFSET: usize = 8;

/// Byte offset of the index entry for `octet`.
pub fn index_entry_offset(octet: u8) -> usize {
    INDEX_OFFSET + octet as usize * INDEX_ENTRY_SIZE
}

/// Byte offset of record `pos` in the range table.
pub fn record_offset(pos: usize) -> usize {
    HEADER_SIZE + pos * RECORD_SIZE
}

/// Number of whole records that fit after the header, counting the
/// auxiliary tail as well.
pub fn max_records(total_len: usize) -> usize {
    total_len.saturating_sub(HEADER_SIZE) / RECORD_SIZE
}

pub(crate) fn read_i32_le(bytes: &[u8]) -> i32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&bytes[..4]);
    i32::from_le_bytes(buf)
}

/// Borrowed view of one 20-byte range record.
///
/// Fields are read straight out of the database buffer on access.
#[derive(Debug, Clone, Copy)]
pub struct RangeRecord<'a> {
    bytes: &'a [u8; RECORD_SIZE],
}

impl<'a> RangeRecord<'a> {
    pub fn new(bytes: &'a [u8; RECORD_SIZE]) -> Self {
        Self { bytes }
    }

    /// Start address in network byte order.
    pub fn start(&self) -> [u8; 4] {
        self.octets(START_OFFSET)
    }

    /// End address (inclusive) in network byte order.
    pub fn end(&self) -> [u8; 4] {
        self.octets(END_OFFSET)
    }

    /// Raw carrier code.
    pub fn code(&self) -> i32 {
        read_i32_le(&self.bytes[CODE_OFFSET..])
    }

    /// Whether `addr` lies within `[start, end]`, compared byte-wise.
    pub fn contains(&self, addr: &[u8; 4]) -> bool {
        self.start() <= *addr && *addr <= self.end()
    }

    /// Position of `addr` relative to this range.
    pub fn compare(&self, addr: &[u8; 4]) -> Ordering {
        if *addr < self.start() {
            Ordering::Less
        } else if *addr > self.end() {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    fn octets(&self, at: usize) -> [u8; 4] {
        [
            self.bytes[at],
            self.bytes[at + 1],
            self.bytes[at + 2],
            self.bytes[at + 3],
        ]
    }
}
