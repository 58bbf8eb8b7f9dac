//! Favorite marks.
//!
//! Favorites are owned by the server. The client keeps the ids it knows are
//! favorited (to draw heart buttons), the last fetched favorites page and the
//! badge count.

pub mod models;

pub use models::{AddFavoriteRequest, FavoriteCount, FavoriteWithCar, FavoritesState};
