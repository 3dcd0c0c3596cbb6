//! Binary carrier database format and range search.
//!
//! The database is a flat, little-endian file searched in place,
//! either memory-mapped or read into memory.
//!
//! # File Structure
//!
//! ```text
//! +----------------------+
//! |    VERSION TAG       |  8 bytes, opaque
//! +----------------------+
//! |  FIRST-OCTET INDEX   |  256 x i32 LE, -1 = no ranges
//! +----------------------+
//! |    RANGE TABLE       |  N x 20 bytes, sorted by start address
//! +----------------------+
//! |   AUXILIARY DATA     |  not read by lookups
//! +----------------------+
//! ```
//!
//! Each range record holds a network-order start and end address (both
//! inclusive), a little-endian i32 carrier code and 8 reserved bytes.

mod buffer;
mod cached_reader;
mod format;
mod reader;
pub mod search;

#[doc(hidden)]
pub mod fixture;
#[cfg(test)]
mod tests;

pub use buffer::DatabaseBuffer;
pub use cached_reader::{CacheStats, CachedCarrierDatabase};
pub use format::*;
pub use reader::{parse_ipv4, CarrierDatabase};
