//! Reviews: per-car rated comments.
//!
//! The reviews view is modelled by [`ReviewsPanel`]:
//!
//! ```text
//! Closed -> Loading -> Loaded -> Editing -> Loaded
//!              \-> Failed
//! ```
//!
//! Every mutation re-fetches the full list, so the panel goes back through
//! `Loading` after each submit, update or delete.

pub mod models;
pub mod panel;

pub use models::{Rating, RatingError, RatingSummary, Review, ReviewInput, ReviewsResponse};
pub use panel::{ReviewDraft, ReviewsPanel};
