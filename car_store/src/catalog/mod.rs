//! Car listings and the catalog filter.
//!
//! Cars are server-owned snapshots. The catalog filter splits into the part the
//! backend understands (exact-match query parameters) and the price range,
//! which is always applied locally.

pub mod filter;
pub mod models;

pub use filter::CatalogFilter;
pub use models::{Car, CarId, CarInput};
