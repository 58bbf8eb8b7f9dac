//! Durable client-local key-value storage.
//!
//! Mirrors the browser `localStorage` contract: string keys, string values,
//! last write wins. Every value the client persists goes through
//! [`KeyValueStore`] so controllers can run against [`MemoryStore`] in tests
//! and [`FileStore`] in the binary.

pub mod errors;
pub mod file;
pub mod memory;

pub use errors::{StorageError, StorageResult};
pub use file::FileStore;
pub use memory::MemoryStore;

/// Storage key holding the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key holding the cached user summary as JSON.
pub const USER_KEY: &str = "user";
/// Storage key holding the garage as a JSON array of cars.
pub const GARAGE_KEY: &str = "garage";

/// Trait for durable key-value stores
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;
}
