//! Connection state for storage adapters.
//!
//! An adapter holds an explicit tagged state rather than a magic sentinel
//! value: it is either [`Connection::Disconnected`] or
//! [`Connection::Connected`] with an opaque handle. The memory backend's
//! handle carries no underlying resource, only a backend label; adapters for
//! real external engines would wrap their session token in the same type.

use std::fmt;

/// Opaque handle representing an established adapter connection.
///
/// Handles are cheap to clone and comparable, so callers can verify that
/// repeated `connect` calls hand back the same connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionHandle {
    backend: String,
}

impl ConnectionHandle {
    /// Create a handle labeled with the backend that produced it.
    pub fn new(backend: impl Into<String>) -> Self {
        Self {
            backend: backend.into(),
        }
    }

    /// Handle for the built-in memory backend, which needs no resource.
    pub fn memory() -> Self {
        Self::new("memory")
    }

    /// The label of the backend this handle belongs to.
    pub fn backend(&self) -> &str {
        &self.backend
    }
}

impl fmt::Display for ConnectionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.backend)
    }
}

/// Connection state held by an adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Connection {
    /// No connection has been established (or it was dropped).
    #[default]
    Disconnected,
    /// An established connection and its handle.
    Connected(ConnectionHandle),
}

impl Connection {
    /// Returns true when a connection is established.
    pub fn is_connected(&self) -> bool {
        matches!(self, Connection::Connected(_))
    }

    /// The current handle, if connected.
    pub fn handle(&self) -> Option<&ConnectionHandle> {
        match self {
            Connection::Connected(handle) => Some(handle),
            Connection::Disconnected => None,
        }
    }
}
