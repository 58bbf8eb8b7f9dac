//! Garage: the client-local comparison list.
//!
//! Cars are stored as full snapshots taken when they were added, keyed by
//! car id, in insertion order. The list never touches the backend.

pub mod manager;

pub use manager::Garage;
