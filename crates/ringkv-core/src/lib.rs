//! # RingKV Core
//!
//! Core types and traits for the RingKV storage adapter: the error type,
//! the connection state machine, and the [`Storage`] contract that every
//! backend implements.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod connection;
pub mod error;
pub mod storage;

pub use connection::{Connection, ConnectionHandle};
pub use error::{Error, Result};
pub use storage::Storage;
