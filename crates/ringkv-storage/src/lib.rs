//! # RingKV Storage Engine
//!
//! Memory-backed storage engine for RingKV.
//!
//! ## ⚠️ Internal Implementation Detail
//!
//! **This crate is an internal implementation detail of RingKV.**
//!
//! Users should depend on the main [`ringkv`](https://crates.io/crates/ringkv)
//! crate instead, which provides the stable public API. This crate's API may
//! change without notice between minor versions.
//!
//! ```toml
//! # In your Cargo.toml - use the main crate, not this one:
//! [dependencies]
//! ringkv = "0.3"
//! ```
//!
//! ---
//!
//! This crate provides the memory engine behind the RingKV adapter:
//!
//! - **RingBuffer**: slot arena + key index + free list, with a wrapping
//!   write cursor and circular eviction in bounded mode
//! - **MemoryStorage**: thread-safe engine handle that serializes access to
//!   one ring buffer and carries the connection handle it was created under
//!
//! ## Architecture
//!
//! ```text
//! store/set → claim slot (free list, then cursor) → arena
//!                  ↓                                  ↓
//!          displaced occupant                  key → slot index
//!          loses its mapping                   (one live mapping per key)
//! ```

use std::sync::{Arc, RwLock};

use ringkv_core::{ConnectionHandle, Error, Result, Storage};

pub mod ring;

pub use ring::{Entry, RingBuffer};

/// Default slot capacity for bounded storages.
pub const DEFAULT_CAPACITY: usize = 10_000;

/// Resolved storage engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageConfig {
    /// Grow without bound instead of wrapping at `capacity`
    pub infinite: bool,
    /// Slot capacity in bounded mode (zero falls back to the default)
    pub capacity: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            infinite: false,
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl StorageConfig {
    /// Bounded configuration with the given slot capacity.
    pub fn bounded(capacity: usize) -> Self {
        Self {
            infinite: false,
            capacity,
        }
    }

    /// Unbounded configuration; the buffer grows without eviction.
    pub fn unbounded() -> Self {
        Self {
            infinite: true,
            ..Default::default()
        }
    }

    /// Applies the fields present in `options` over this configuration.
    pub fn with_overrides(self, options: StorageOptions) -> Self {
        Self {
            infinite: options.infinite.unwrap_or(self.infinite),
            capacity: options.capacity.unwrap_or(self.capacity),
        }
    }
}

/// Partial configuration overrides.
///
/// Used where callers supply only the fields they care about: adapter
/// construction and per-call `storage()` options. Absent fields inherit the
/// receiver's defaults via [`StorageConfig::with_overrides`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StorageOptions {
    /// Override for [`StorageConfig::infinite`]
    pub infinite: Option<bool>,
    /// Override for [`StorageConfig::capacity`]
    pub capacity: Option<usize>,
}

impl StorageOptions {
    /// Options overriding only the capacity.
    pub fn capacity(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Default::default()
        }
    }

    /// Options switching the storage to unbounded growth.
    pub fn infinite() -> Self {
        Self {
            infinite: Some(true),
            ..Default::default()
        }
    }
}

/// Thread-safe memory storage engine.
///
/// Clones share the same underlying buffer, so an engine handed out by an
/// adapter registry can be cloned freely; all clones observe the same data.
/// Operations serialize through an internal lock and run to completion
/// before the caller sees a result, so per-caller issuance order is
/// observation order.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    config: StorageConfig,
    connection: Option<ConnectionHandle>,
    inner: Arc<RwLock<RingBuffer>>,
}

impl MemoryStorage {
    /// Creates an engine with no connection context.
    pub fn new(config: StorageConfig) -> Self {
        Self::with_connection(config, None)
    }

    /// Creates an engine carrying the connection it was opened under.
    pub fn with_connection(config: StorageConfig, connection: Option<ConnectionHandle>) -> Self {
        Self {
            config,
            connection,
            inner: Arc::new(RwLock::new(RingBuffer::new(config))),
        }
    }

    /// The configuration this engine was built with.
    pub fn config(&self) -> StorageConfig {
        self.config
    }

    /// The connection handle this engine was opened under, if any.
    pub fn connection(&self) -> Option<&ConnectionHandle> {
        self.connection.as_ref()
    }

    /// Unconditionally writes a new entry for `key`.
    ///
    /// In bounded mode this may displace the oldest slot's occupant; use
    /// [`MemoryStorage::set`] for update-or-insert semantics.
    pub fn store(&self, key: &[u8], value: &[u8]) -> Result<()> {
        check_key(key)?;
        let mut ring = self.inner.write().map_err(|_| Error::LockPoisoned)?;
        ring.store(key, value);
        Ok(())
    }

    /// Retrieves the value for `key`, or `None` when absent.
    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        check_key(key)?;
        let ring = self.inner.read().map_err(|_| Error::LockPoisoned)?;
        Ok(ring.get(key).map(|value| value.to_vec()))
    }

    /// Updates an existing key's value in place, or inserts it.
    pub fn set(&self, key: &[u8], value: &[u8]) -> Result<()> {
        check_key(key)?;
        let mut ring = self.inner.write().map_err(|_| Error::LockPoisoned)?;
        ring.set(key, value);
        Ok(())
    }

    /// Whether `key` currently has a live entry.
    pub fn has(&self, key: &[u8]) -> Result<bool> {
        check_key(key)?;
        let ring = self.inner.read().map_err(|_| Error::LockPoisoned)?;
        Ok(ring.has(key))
    }

    /// Number of occupied slots.
    ///
    /// In bounded mode this saturates at the capacity once the buffer has
    /// filled; eviction replaces entries without shrinking the buffer.
    pub fn count(&self) -> Result<usize> {
        let ring = self.inner.read().map_err(|_| Error::LockPoisoned)?;
        Ok(ring.len())
    }

    /// Removes the entry for `key`; absent keys are a safe no-op.
    pub fn remove(&self, key: &[u8]) -> Result<()> {
        check_key(key)?;
        let mut ring = self.inner.write().map_err(|_| Error::LockPoisoned)?;
        ring.remove(key);
        Ok(())
    }

    /// Drops every entry.
    pub fn clear(&self) -> Result<()> {
        let mut ring = self.inner.write().map_err(|_| Error::LockPoisoned)?;
        ring.clear();
        Ok(())
    }

    /// Snapshot of the engine's buffer state.
    pub fn stats(&self) -> StorageStats {
        match self.inner.read() {
            Ok(ring) => StorageStats {
                occupied: ring.len(),
                allocated: ring.allocated(),
                free_slots: ring.free_slots(),
                cursor: ring.cursor(),
                capacity: ring.capacity(),
                infinite: ring.is_infinite(),
            },
            Err(_) => StorageStats::default(),
        }
    }
}

impl Storage for MemoryStorage {
    fn store(&self, key: &[u8], value: &[u8]) -> Result<()> {
        MemoryStorage::store(self, key, value)
    }

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        MemoryStorage::get(self, key)
    }

    fn set(&self, key: &[u8], value: &[u8]) -> Result<()> {
        MemoryStorage::set(self, key, value)
    }

    fn has(&self, key: &[u8]) -> Result<bool> {
        MemoryStorage::has(self, key)
    }

    fn count(&self) -> Result<usize> {
        MemoryStorage::count(self)
    }

    fn remove(&self, key: &[u8]) -> Result<()> {
        MemoryStorage::remove(self, key)
    }
}

/// Empty keys are the one malformed-input condition; everything else is a
/// valid key.
fn check_key(key: &[u8]) -> Result<()> {
    if key.is_empty() {
        return Err(Error::InvalidKey);
    }
    Ok(())
}

/// Buffer statistics snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageStats {
    /// Occupied slots
    pub occupied: usize,
    /// Slots allocated so far (occupied plus vacated)
    pub allocated: usize,
    /// Slots on the free list
    pub free_slots: usize,
    /// Next fresh cursor position
    pub cursor: usize,
    /// Configured capacity
    pub capacity: usize,
    /// Whether the buffer grows without bound
    pub infinite: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_basic() {
        let storage = MemoryStorage::new(StorageConfig::bounded(5));

        storage.store(b"key1", b"value1").unwrap();
        storage.store(b"key2", b"value2").unwrap();

        assert_eq!(storage.get(b"key1").unwrap(), Some(b"value1".to_vec()));
        assert_eq!(storage.get(b"key2").unwrap(), Some(b"value2".to_vec()));
        assert_eq!(storage.get(b"key3").unwrap(), None);
        assert_eq!(storage.count().unwrap(), 2);
    }

    #[test]
    fn test_memory_storage_set_then_get() {
        let storage = MemoryStorage::new(StorageConfig::bounded(5));

        storage.store(b"key", b"value").unwrap();
        storage.set(b"key", b"updated").unwrap();

        assert_eq!(storage.get(b"key").unwrap(), Some(b"updated".to_vec()));
        assert_eq!(storage.count().unwrap(), 1);
    }

    #[test]
    fn test_memory_storage_remove() {
        let storage = MemoryStorage::new(StorageConfig::bounded(5));

        storage.store(b"key", b"value").unwrap();
        assert!(storage.has(b"key").unwrap());

        storage.remove(b"key").unwrap();
        assert!(!storage.has(b"key").unwrap());
        assert_eq!(storage.get(b"key").unwrap(), None);

        // Removing again stays a no-op
        storage.remove(b"key").unwrap();
        assert_eq!(storage.count().unwrap(), 0);
    }

    #[test]
    fn test_memory_storage_rejects_empty_key() {
        let storage = MemoryStorage::new(StorageConfig::default());

        assert_eq!(storage.store(b"", b"value"), Err(Error::InvalidKey));
        assert_eq!(storage.get(b""), Err(Error::InvalidKey));
        assert_eq!(storage.set(b"", b"value"), Err(Error::InvalidKey));
        assert_eq!(storage.has(b""), Err(Error::InvalidKey));
        assert_eq!(storage.remove(b""), Err(Error::InvalidKey));
    }

    #[test]
    fn test_memory_storage_clones_share_data() {
        let storage = MemoryStorage::new(StorageConfig::bounded(5));
        let other = storage.clone();

        storage.store(b"shared", b"data").unwrap();

        assert_eq!(other.get(b"shared").unwrap(), Some(b"data".to_vec()));
        assert_eq!(other.count().unwrap(), 1);
    }

    #[test]
    fn test_memory_storage_bounded_eviction() {
        let storage = MemoryStorage::new(StorageConfig::bounded(3));

        for i in 0..4u8 {
            storage.store(&[i], &[i]).unwrap();
        }

        assert_eq!(storage.count().unwrap(), 3);
        assert!(!storage.has(&[0u8]).unwrap());
        assert!(storage.has(&[3u8]).unwrap());
    }

    #[test]
    fn test_memory_storage_stats() {
        let storage = MemoryStorage::new(StorageConfig::bounded(4));

        storage.store(b"a", b"1").unwrap();
        storage.store(b"b", b"2").unwrap();
        storage.remove(b"a").unwrap();

        let stats = storage.stats();
        assert_eq!(stats.occupied, 1);
        assert_eq!(stats.allocated, 2);
        assert_eq!(stats.free_slots, 1);
        assert_eq!(stats.capacity, 4);
        assert!(!stats.infinite);
    }

    #[test]
    fn test_memory_storage_clear() {
        let storage = MemoryStorage::new(StorageConfig::bounded(4));

        storage.store(b"a", b"1").unwrap();
        storage.store(b"b", b"2").unwrap();
        storage.clear().unwrap();

        assert_eq!(storage.count().unwrap(), 0);
        assert!(!storage.has(b"a").unwrap());
    }

    #[test]
    fn test_memory_storage_through_trait_object() {
        let storage = MemoryStorage::new(StorageConfig::bounded(5));
        let dyn_storage: &dyn Storage = &storage;

        dyn_storage.store(b"key", b"value").unwrap();
        assert!(dyn_storage.has(b"key").unwrap());
        assert_eq!(dyn_storage.get(b"key").unwrap(), Some(b"value".to_vec()));
        assert_eq!(dyn_storage.count().unwrap(), 1);
        dyn_storage.remove(b"key").unwrap();
        assert_eq!(dyn_storage.count().unwrap(), 0);
    }

    #[test]
    fn test_config_overrides() {
        let config = StorageConfig::default().with_overrides(StorageOptions::capacity(5));
        assert_eq!(config.capacity, 5);
        assert!(!config.infinite);

        let config = StorageConfig::bounded(5).with_overrides(StorageOptions::infinite());
        assert!(config.infinite);
        assert_eq!(config.capacity, 5);

        let untouched = StorageConfig::bounded(7).with_overrides(StorageOptions::default());
        assert_eq!(untouched, StorageConfig::bounded(7));
    }

    #[test]
    fn test_engine_carries_connection_handle() {
        let storage = MemoryStorage::with_connection(
            StorageConfig::default(),
            Some(ConnectionHandle::memory()),
        );
        assert_eq!(storage.connection().unwrap().backend(), "memory");

        let detached = MemoryStorage::new(StorageConfig::default());
        assert!(detached.connection().is_none());
    }
}
