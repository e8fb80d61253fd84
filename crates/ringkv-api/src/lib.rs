//! # RingKV
//!
//! An in-process, ephemeral key-value store behind a pluggable
//! storage-adapter contract.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ringkv::MemoryAdapter;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let adapter = MemoryAdapter::default();
//!     adapter.connect()?;
//!
//!     // Independent named storages share one logical connection
//!     let users = adapter.storage("users", None)?;
//!
//!     users.store(b"user:1", b"Alice")?;
//!     users.set(b"user:1", b"Alice Cooper")?;
//!
//!     if let Some(name) = users.get(b"user:1")? {
//!         println!("Name: {}", String::from_utf8_lossy(&name));
//!     }
//!
//!     users.remove(b"user:1")?;
//!     adapter.disconnect()?;
//!     Ok(())
//! }
//! ```
//!
//! ## Bounded and unbounded storages
//!
//! ```rust
//! use ringkv::{MemoryAdapter, StorageOptions};
//!
//! let adapter = MemoryAdapter::default();
//!
//! // Bounded: the oldest slot is overwritten once capacity is reached
//! let recent = adapter.storage("recent", Some(StorageOptions::capacity(1000)))?;
//!
//! // Unbounded: grows until the process exits
//! let archive = adapter.storage("archive", Some(StorageOptions::infinite()))?;
//! # Ok::<(), ringkv::Error>(())
//! ```
//!
//! Every storage handed out by an adapter implements the uniform
//! [`Storage`] contract, so code written against `&dyn Storage` works
//! unchanged with any sibling backend.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::{debug, info};

pub mod logging;

// Re-export core types
pub use ringkv_core::{Connection, ConnectionHandle, Error, Result, Storage};

// Storage engine components
pub use ringkv_storage::{
    Entry, MemoryStorage, RingBuffer, StorageConfig, StorageOptions, StorageStats,
    DEFAULT_CAPACITY,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The memory storage adapter.
///
/// Owns the connection lifecycle and a registry of named
/// [`MemoryStorage`] engines that all share the adapter's connection
/// context. Cloning the adapter is cheap and clones share the registry.
///
/// # Examples
///
/// ```rust
/// use ringkv::MemoryAdapter;
///
/// let adapter = MemoryAdapter::default();
/// assert!(adapter.connection().is_none());
///
/// let handle = adapter.connect()?;
/// assert_eq!(adapter.connection(), Some(handle));
/// # Ok::<(), ringkv::Error>(())
/// ```
#[derive(Clone)]
pub struct MemoryAdapter {
    inner: Arc<AdapterInner>,
}

struct AdapterInner {
    /// Defaults applied to every storage this adapter creates
    config: StorageConfig,
    /// Tagged connection state, never a magic sentinel
    connection: RwLock<Connection>,
    /// Name to engine registry; entries live until an explicit reset
    storages: RwLock<HashMap<String, MemoryStorage>>,
}

impl MemoryAdapter {
    /// Creates an adapter whose storages default to the given options.
    ///
    /// Fields absent from `options` fall back to the global defaults
    /// (bounded, [`DEFAULT_CAPACITY`] slots).
    pub fn new(options: StorageOptions) -> Self {
        Self::build(
            StorageConfig::default().with_overrides(options),
            Connection::Disconnected,
        )
    }

    /// Creates an adapter that adopts an externally supplied connection.
    ///
    /// The handle is left untouched by later [`MemoryAdapter::connect`]
    /// calls.
    pub fn with_connection(options: StorageOptions, handle: ConnectionHandle) -> Self {
        Self::build(
            StorageConfig::default().with_overrides(options),
            Connection::Connected(handle),
        )
    }

    fn build(config: StorageConfig, connection: Connection) -> Self {
        Self {
            inner: Arc::new(AdapterInner {
                config,
                connection: RwLock::new(connection),
                storages: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// The storage defaults this adapter was configured with.
    pub fn config(&self) -> StorageConfig {
        self.inner.config
    }

    /// The currently held connection handle, if any.
    ///
    /// Never performs I/O; before the first [`MemoryAdapter::connect`] this
    /// is `None`.
    pub fn connection(&self) -> Option<ConnectionHandle> {
        self.inner
            .connection
            .read()
            .ok()
            .and_then(|connection| connection.handle().cloned())
    }

    /// Whether a connection is currently held.
    pub fn is_connected(&self) -> bool {
        self.connection().is_some()
    }

    /// Establishes the connection and returns its handle.
    ///
    /// The memory backend needs no external resource, so connecting just
    /// adopts a unit handle. Idempotent: once connected, every later call
    /// returns the same handle, including one supplied at construction.
    pub fn connect(&self) -> Result<ConnectionHandle> {
        let mut connection = self
            .inner
            .connection
            .write()
            .map_err(|_| Error::LockPoisoned)?;

        if let Some(handle) = connection.handle() {
            return Ok(handle.clone());
        }

        let handle = ConnectionHandle::memory();
        *connection = Connection::Connected(handle.clone());
        info!("memory adapter connected");
        Ok(handle)
    }

    /// Drops the held connection.
    ///
    /// Safe to call at any time; disconnecting when never connected is a
    /// no-op.
    pub fn disconnect(&self) -> Result<()> {
        let mut connection = self
            .inner
            .connection
            .write()
            .map_err(|_| Error::LockPoisoned)?;

        if connection.is_connected() {
            info!("memory adapter disconnected");
        }
        *connection = Connection::Disconnected;
        Ok(())
    }

    /// Returns the named storage, creating it on first use.
    ///
    /// A new storage is configured from the adapter defaults
    /// shallow-overridden by `options`, and carries the adapter's current
    /// connection handle. Later calls for the same name return the cached
    /// engine unchanged - `options` passed then are silently ignored.
    ///
    /// # Arguments
    ///
    /// * `name` - Registry key identifying the storage namespace
    /// * `options` - Overrides applied only when the storage is created
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ringkv::MemoryAdapter;
    ///
    /// let adapter = MemoryAdapter::default();
    /// let users = adapter.storage("users", None)?;
    /// let same = adapter.storage("users", None)?;
    ///
    /// users.store(b"user:1", b"Alice")?;
    /// assert_eq!(same.get(b"user:1")?, Some(b"Alice".to_vec()));
    /// # Ok::<(), ringkv::Error>(())
    /// ```
    pub fn storage(&self, name: &str, options: Option<StorageOptions>) -> Result<MemoryStorage> {
        {
            let storages = self.inner.storages.read().map_err(|_| Error::LockPoisoned)?;
            if let Some(existing) = storages.get(name) {
                return Ok(existing.clone());
            }
        }

        let mut storages = self
            .inner
            .storages
            .write()
            .map_err(|_| Error::LockPoisoned)?;

        // A racing caller may have registered the name in between
        if let Some(existing) = storages.get(name) {
            return Ok(existing.clone());
        }

        let config = self
            .inner
            .config
            .with_overrides(options.unwrap_or_default());
        let storage = MemoryStorage::with_connection(config, self.connection());
        debug!(name, "registering storage");
        storages.insert(name.to_string(), storage.clone());
        Ok(storage)
    }

    /// Number of storages currently registered.
    pub fn storage_count(&self) -> Result<usize> {
        let storages = self.inner.storages.read().map_err(|_| Error::LockPoisoned)?;
        Ok(storages.len())
    }

    /// Clears the storage registry.
    ///
    /// Engines already handed out keep working; the next `storage()` call
    /// for any name creates a fresh engine.
    pub fn reset(&self) -> Result<()> {
        let mut storages = self
            .inner
            .storages
            .write()
            .map_err(|_| Error::LockPoisoned)?;
        storages.clear();
        Ok(())
    }
}

impl Default for MemoryAdapter {
    fn default() -> Self {
        Self::new(StorageOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, "0.3.0");
    }

    #[test]
    fn test_connect_is_idempotent() {
        let adapter = MemoryAdapter::default();
        assert!(adapter.connection().is_none());

        let first = adapter.connect().unwrap();
        let second = adapter.connect().unwrap();

        assert_eq!(first, second);
        assert_eq!(adapter.connection(), Some(first));
    }

    #[test]
    fn test_disconnect_without_connect_is_noop() {
        let adapter = MemoryAdapter::default();
        adapter.disconnect().unwrap();
        assert!(!adapter.is_connected());
    }

    #[test]
    fn test_external_connection_left_untouched() {
        let handle = ConnectionHandle::new("external");
        let adapter = MemoryAdapter::with_connection(StorageOptions::default(), handle.clone());

        assert_eq!(adapter.connect().unwrap(), handle);
        assert_eq!(adapter.connection(), Some(handle));
    }

    #[test]
    fn test_storage_registry_returns_same_engine() {
        let adapter = MemoryAdapter::default();

        let first = adapter.storage("users", None).unwrap();
        let second = adapter.storage("users", None).unwrap();

        first.store(b"user:1", b"Alice").unwrap();
        assert_eq!(second.get(b"user:1").unwrap(), Some(b"Alice".to_vec()));
        assert_eq!(adapter.storage_count().unwrap(), 1);
    }

    #[test]
    fn test_storage_options_ignored_after_creation() {
        let adapter = MemoryAdapter::default();

        let created = adapter
            .storage("users", Some(StorageOptions::capacity(5)))
            .unwrap();
        let cached = adapter
            .storage("users", Some(StorageOptions::capacity(50)))
            .unwrap();

        assert_eq!(created.config().capacity, 5);
        assert_eq!(cached.config().capacity, 5);
    }

    #[test]
    fn test_storage_inherits_adapter_defaults() {
        let adapter = MemoryAdapter::new(StorageOptions::capacity(42));
        let storage = adapter.storage("anything", None).unwrap();
        assert_eq!(storage.config().capacity, 42);
        assert!(!storage.config().infinite);
    }

    #[test]
    fn test_storage_carries_current_connection() {
        let adapter = MemoryAdapter::default();

        let before = adapter.storage("early", None).unwrap();
        assert!(before.connection().is_none());

        adapter.connect().unwrap();
        let after = adapter.storage("late", None).unwrap();
        assert_eq!(after.connection().unwrap().backend(), "memory");
    }

    #[test]
    fn test_reset_clears_registry() {
        let adapter = MemoryAdapter::default();

        let storage = adapter.storage("users", None).unwrap();
        storage.store(b"user:1", b"Alice").unwrap();

        adapter.reset().unwrap();
        assert_eq!(adapter.storage_count().unwrap(), 0);

        let fresh = adapter.storage("users", None).unwrap();
        assert_eq!(fresh.count().unwrap(), 0);

        // The old engine keeps working for whoever still holds it
        assert_eq!(storage.get(b"user:1").unwrap(), Some(b"Alice".to_vec()));
    }
}
