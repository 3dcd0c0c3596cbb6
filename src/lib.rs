//! ipcarrier - IPv4 to network carrier lookup.
//!
//! This crate resolves IPv4 addresses to the carrier that operates them,
//! using a pre-built, read-only range index searched in place.
//!
//! # Features
//!
//! - **Two-level search**: a 256-way first-octet index selects a bucket,
//!   then a binary search finds the containing range
//! - **Zero-copy**: records are read straight out of the mapped file
//! - **Memory-mapped or in-memory loading**: chosen by configuration
//! - **Thread-safe**: an open database can serve concurrent lookups
//! - **Cached front-end**: LRU result cache with hot reload
//!
//! # Quick Start
//!
//! ```ignore
//! use ipcarrier::{CarrierDatabase, Carrier, Lookup};
//!
//! let mut db = CarrierDatabase::open("zzipsdb.dat")?;
//! println!("version: {}", db.version_string());
//!
//! match db.lookup("223.242.2.1")? {
//!     Lookup::Carrier(carrier) => println!("{}", carrier.label()),
//!     Lookup::Unmapped(code) => println!("unmapped carrier code {}", code),
//!     Lookup::Unknown => println!("unknown"),
//! }
//!
//! db.close();
//! ```
//!
//! # Convenience Lookup
//!
//! [`find`] resolves a hostname first and searches a process-wide
//! database opened from [`DatabaseConfig::default`]:
//!
//! ```ignore
//! let result = ipcarrier::find("www.example.cn")?;
//! ```
//!
//! # Results
//!
//! - [`Lookup::Carrier`]: the address is in a range with a known carrier
//! - [`Lookup::Unmapped`]: the address is in a range whose carrier code
//!   is not one of the known codes
//! - [`Lookup::Unknown`]: no indexed range covers the address

mod carrier;
mod config;
mod error;
mod global;

pub mod binary;

// Re-export core types
pub use carrier::{Carrier, Lookup, UNKNOWN_LABEL};
pub use config::{default_db_path, DatabaseConfig, LoadMode, DB_PATH_ENV, DEFAULT_DB_FILE};
pub use error::{Error, Result};

// Re-export database types
pub use binary::{CacheStats, CachedCarrierDatabase, CarrierDatabase};

// Re-export global API functions
pub use global::{find, init_database, is_initialized, resolve_ipv4, set_database};
