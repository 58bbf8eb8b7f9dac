//! # Car Store
//!
//! Client-side core of a car listing storefront.
//!
//! The backend owns cars, users, favorites and reviews. This library owns
//! everything the client keeps for itself and the rules for keeping it in step
//! with the server:
//!
//! - **Catalog**: the last fetched set of cars plus the active filter
//! - **Garage**: a locally persisted comparison list of car snapshots
//! - **Favorites**: the server-backed favorite marks for the logged-in user
//! - **Reviews**: a per-car reviews panel driven by a small state machine
//! - **Session**: bearer token and cached user summary in durable storage
//!
//! All mutable client state lives in one [`AppState`] container owned by the
//! [`Storefront`] controller. Front ends render it through the pure functions
//! in [`view`].
//!
//! ## Example
//!
//! ```
//! use car_store::storage::MemoryStore;
//! use car_store::{AppState, Page};
//! use std::sync::Arc;
//!
//! let state = AppState::load(Arc::new(MemoryStore::new()));
//! assert_eq!(state.page, Page::Catalog);
//! assert_eq!(state.garage.count(), 0);
//! ```

/// Backend contract consumed by the client.
pub mod api;
/// Car listings and catalog filtering.
pub mod catalog;
/// Favorite marks.
pub mod favorites;
/// Add/edit car forms.
pub mod forms;
/// Local comparison list.
pub mod garage;
/// Reviews models and panel state machine.
pub mod reviews;
/// Session persistence and expiry handling.
pub mod session;
/// Application state container.
pub mod state;
/// Durable key-value storage.
pub mod storage;
/// Controller tying state to the backend.
pub mod storefront;
/// Pure view models.
pub mod view;

pub use api::{ApiError, ApiResult, StoreApi};
pub use catalog::{Car, CarId, CarInput, CatalogFilter};
pub use garage::Garage;
pub use reviews::{Rating, Review, ReviewsPanel};
pub use session::{ExpiryMode, Session, UserSummary};
pub use state::{Alert, AlertKind, AppState, Page};
pub use storefront::{CatalogLoad, StoreError, StoreResult, Storefront};
