//! Cached carrier database with hot reload support.
//!
//! This module provides a lookup front-end with:
//! - Concurrent LRU cache for lookup results
//! - Atomic hot reload for swapping in a new database without downtime
//! - Thread-safe concurrent access

use arc_swap::ArcSwap;
use quick_cache::sync::Cache;
use std::net::Ipv4Addr;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::reader::{parse_ipv4, CarrierDatabase};
use crate::config::{DatabaseConfig, LoadMode, DEFAULT_CACHE_CAPACITY};
use crate::{Lookup, Result};

/// Cached carrier database with hot reload support.
///
/// Wraps [`CarrierDatabase`] and adds a result cache keyed by address
/// plus atomic replacement of the underlying database.
///
/// # Example
///
/// ```ignore
/// use ipcarrier::CachedCarrierDatabase;
///
/// let db = CachedCarrierDatabase::open("zzipsdb.dat")?;
/// let result = db.lookup("223.242.2.1")?;
///
/// // Swap in a newer database
/// db.reload("zzipsdb-new.dat")?;
/// ```
pub struct CachedCarrierDatabase {
    /// The underlying database, wrapped in ArcSwap for atomic replacement.
    inner: ArcSwap<CarrierDatabase>,
    /// Lookup results keyed by the address as a big-endian u32, tagged
    /// with the generation of the database that produced them.
    cache: Option<Cache<u32, (u64, Lookup)>>,
    capacity: usize,
    load_mode: LoadMode,
    /// Generation counter, bumped on every reload.
    generation: AtomicU64,
}

impl CachedCarrierDatabase {
    /// Open a database file with default configuration.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_config(&DatabaseConfig::new(path.as_ref()))
    }

    /// Open a database with custom configuration.
    pub fn open_with_config(config: &DatabaseConfig) -> Result<Self> {
        let db = CarrierDatabase::open_with_config(config)?;
        Ok(Self::with_database(db, config.cache_capacity, config.load_mode))
    }

    /// Create from bytes with the default cache capacity.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_bytes_with_capacity(data, DEFAULT_CACHE_CAPACITY)
    }

    /// Create from bytes; a capacity of 0 disables caching.
    pub fn from_bytes_with_capacity(data: Vec<u8>, capacity: usize) -> Result<Self> {
        let db = CarrierDatabase::from_bytes(data)?;
        Ok(Self::with_database(db, capacity, LoadMode::Memory))
    }

    fn with_database(db: CarrierDatabase, capacity: usize, load_mode: LoadMode) -> Self {
        let cache = if capacity > 0 {
            Some(Cache::new(capacity))
        } else {
            None
        };

        Self {
            inner: ArcSwap::from_pointee(db),
            cache,
            capacity,
            load_mode,
            generation: AtomicU64::new(0),
        }
    }

    /// Hot reload from a new file.
    ///
    /// In-flight lookups complete against the old database; new lookups
    /// see the new one. The cache is cleared.
    pub fn reload(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let db = CarrierDatabase::open_with_mode(path, self.load_mode)?;
        self.swap(db);
        log::info!("Hot reloaded carrier database from {:?}", path);
        Ok(())
    }

    /// Hot reload from bytes.
    pub fn reload_from_bytes(&self, data: Vec<u8>) -> Result<()> {
        let db = CarrierDatabase::from_bytes(data)?;
        self.swap(db);
        log::info!("Hot reloaded carrier database from bytes");
        Ok(())
    }

    fn swap(&self, db: CarrierDatabase) {
        self.inner.store(Arc::new(db));
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.clear_cache();
    }

    /// Look up a dotted-quad address with caching.
    pub fn lookup(&self, ip: &str) -> Result<Lookup> {
        self.lookup_addr(parse_ipv4(ip)?)
    }

    /// Look up an address with caching. Errors are never cached.
    pub fn lookup_addr(&self, addr: Ipv4Addr) -> Result<Lookup> {
        let key = u32::from(addr);

        // Read before loading the database. `swap` stores the new database
        // before bumping the generation, so an entry tagged with this value
        // never outlives a reload that started after it was computed.
        let generation = self.generation();

        if let Some(ref cache) = self.cache {
            if let Some((cached_gen, result)) = cache.get(&key) {
                if cached_gen == generation {
                    return Ok(result);
                }
            }
        }

        let result = self.inner.load().lookup_addr(addr)?;

        if let Some(ref cache) = self.cache {
            cache.insert(key, (generation, result));
        }

        Ok(result)
    }

    /// Clear the cache.
    pub fn clear_cache(&self) {
        if let Some(ref cache) = self.cache {
            cache.clear();
        }
    }

    /// Get cache statistics.
    pub fn cache_stats(&self) -> CacheStats {
        match self.cache {
            Some(ref cache) => CacheStats {
                capacity: self.capacity,
                len: cache.len(),
                enabled: true,
            },
            None => CacheStats {
                capacity: 0,
                len: 0,
                enabled: false,
            },
        }
    }

    /// Get the current generation (incremented on each reload).
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Get a reference to the current database.
    ///
    /// The returned guard may become stale after a hot reload.
    pub fn inner(&self) -> arc_swap::Guard<Arc<CarrierDatabase>> {
        self.inner.load()
    }
}

/// Cache statistics.
#[derive(Debug, Clone, Copy)]
pub struct CacheStats {
    /// Maximum cache capacity.
    pub capacity: usize,
    /// Current number of entries in the cache.
    pub len: usize,
    /// Whether caching is enabled.
    pub enabled: bool,
}
