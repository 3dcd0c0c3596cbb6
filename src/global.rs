//! Global database and convenience lookup API.

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::net::{Ipv4Addr, SocketAddr, ToSocketAddrs};
use std::sync::Arc;

use crate::binary::CarrierDatabase;
use crate::config::DatabaseConfig;
use crate::error::{Error, Result};
use crate::Lookup;

/// Global database, opened on first use.
static GLOBAL_DATABASE: Lazy<RwLock<Option<Arc<CarrierDatabase>>>> =
    Lazy::new(|| RwLock::new(None));

/// Open the database described by `config` and install it globally,
/// replacing any previous one.
pub fn init_database(config: &DatabaseConfig) -> Result<()> {
    let db = CarrierDatabase::open_with_config(config)?;
    *GLOBAL_DATABASE.write() = Some(Arc::new(db));
    log::debug!("Initialized global carrier database from {:?}", config.path);
    Ok(())
}

/// Install an already opened database globally.
pub fn set_database(db: CarrierDatabase) {
    *GLOBAL_DATABASE.write() = Some(Arc::new(db));
}

/// Check if the global database is initialized.
pub fn is_initialized() -> bool {
    GLOBAL_DATABASE.read().is_some()
}

fn global_database() -> Result<Arc<CarrierDatabase>> {
    if let Some(db) = GLOBAL_DATABASE.read().as_ref() {
        return Ok(Arc::clone(db));
    }

    let mut guard = GLOBAL_DATABASE.write();
    if let Some(db) = guard.as_ref() {
        return Ok(Arc::clone(db));
    }

    let db = Arc::new(CarrierDatabase::open_default()?);
    *guard = Some(Arc::clone(&db));
    Ok(db)
}

/// Resolve a hostname or dotted quad to its first IPv4 address.
pub fn resolve_ipv4(host: &str) -> Result<Ipv4Addr> {
    let host = host.trim();
    if let Ok(addr) = host.parse::<Ipv4Addr>() {
        return Ok(addr);
    }

    let addrs = (host, 0)
        .to_socket_addrs()
        .map_err(|e| Error::Resolve(format!("{}: {}", host, e)))?;

    addrs
        .filter_map(|addr| match addr {
            SocketAddr::V4(v4) => Some(*v4.ip()),
            SocketAddr::V6(_) => None,
        })
        .next()
        .ok_or_else(|| Error::Resolve(format!("{}: no IPv4 address", host)))
}

/// Resolve `host` and look it up in the global database.
///
/// The global database is opened from the default configuration on the
/// first call unless [`init_database`] ran before.
///
/// # Examples
/// ```ignore
/// use ipcarrier::find;
///
/// let result = find("223.242.2.1")?;
/// println!("{}", result.label().unwrap_or("-"));
/// ```
pub fn find(host: &str) -> Result<Lookup> {
    let addr = resolve_ipv4(host)?;
    global_database()?.lookup_addr(addr)
}
