//! Two-level range search over the raw database bytes.
//!
//! The first-octet index narrows the search to one bucket of the range
//! table; a binary search inside the bucket then finds the record whose
//! inclusive `[start, end]` interval contains the address. Every read
//! goes through [`checked_slice`], so corrupt offsets fail instead of
//! reading past the buffer.

use std::cmp::Ordering;
use std::ops::Range;

use super::buffer::checked_slice;
use super::format::*;
use crate::{Error, Lookup, Result};

/// Look up a network-order IPv4 address.
pub fn search(data: &[u8], addr: [u8; 4]) -> Result<Lookup> {
    match find_record(data, addr)? {
        Some(pos) => Ok(Lookup::from_code(record_at(data, pos)?.code())),
        None => Ok(Lookup::Unknown),
    }
}

/// Find the index of the record containing `addr`.
pub fn find_record(data: &[u8], addr: [u8; 4]) -> Result<Option<usize>> {
    let bucket = match bucket_range(data, addr[0])? {
        Some(bucket) => bucket,
        None => return Ok(None),
    };

    let total = max_records(data.len());
    let (mut count, mut n_count) = (bucket.start, bucket.end);

    // Both current bounds are probed before the midpoint. The upper bound
    // is exclusive, so it only hits when a neighbouring bucket's first
    // record overlaps; it is skipped once it sits at the end of the table.
    while count < n_count {
        if record_at(data, count)?.contains(&addr) {
            return Ok(Some(count));
        }
        if n_count < total && record_at(data, n_count)?.contains(&addr) {
            return Ok(Some(n_count));
        }

        let mid = (count + n_count) / 2;
        match record_at(data, mid)?.compare(&addr) {
            Ordering::Equal => return Ok(Some(mid)),
            Ordering::Less => n_count = mid,
            Ordering::Greater => count = mid + 1,
        }
    }

    Ok(None)
}

/// Half-open record range of the bucket for `octet`, or `None` if the
/// octet has no ranges.
///
/// The upper bound is the next populated index entry, or the end of the
/// table when no later octet is populated.
pub fn bucket_range(data: &[u8], octet: u8) -> Result<Option<Range<usize>>> {
    let lower = match index_entry(data, octet)? {
        None => return Ok(None),
        Some(lower) => lower,
    };

    let total = max_records(data.len());
    let mut upper = total;
    for next in octet.checked_add(1).into_iter().flat_map(|o| o..=u8::MAX) {
        if let Some(pos) = index_entry(data, next)? {
            upper = pos;
            if upper > total {
                return Err(Error::InvalidIndex {
                    octet: next,
                    value: pos as i32,
                });
            }
            break;
        }
    }

    Ok(Some(lower..upper))
}

/// Read the first-octet index entry for `octet`.
///
/// `None` for the empty-bucket marker; any other negative value is
/// rejected.
pub fn index_entry(data: &[u8], octet: u8) -> Result<Option<usize>> {
    let bytes = checked_slice(data, index_entry_offset(octet), INDEX_ENTRY_SIZE)?;
    match read_i32_le(bytes) {
        EMPTY_BUCKET => Ok(None),
        value if value < 0 => Err(Error::InvalidIndex { octet, value }),
        value => Ok(Some(value as usize)),
    }
}

/// Borrow record `pos` of the range table.
pub fn record_at(data: &[u8], pos: usize) -> Result<RangeRecord<'_>> {
    let offset = record_offset(pos);
    let bytes = checked_slice(data, offset, RECORD_SIZE)?;
    let bytes: &[u8; RECORD_SIZE] = bytes.try_into().map_err(|_| Error::Corrupt {
        offset,
        len: RECORD_SIZE,
        size: data.len(),
    })?;
    Ok(RangeRecord::new(bytes))
}

/// Octets whose index entry is populated.
pub fn populated_buckets(data: &[u8]) -> Result<Vec<u8>> {
    let mut octets = Vec::new();
    for octet in 0..=u8::MAX {
        if index_entry(data, octet)?.is_some() {
            octets.push(octet);
        }
    }
    Ok(octets)
}
