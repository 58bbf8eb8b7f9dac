//! Pure view models.
//!
//! Each `render_*` function reads an [`AppState`](crate::AppState) and
//! returns plain data describing what to draw. Front ends never inspect state
//! directly, so rendering the same state twice yields the same output.

pub mod cards;
pub mod format;
pub mod nav;
pub mod reviews;

pub use cards::{
    CarCard, GarageButton, GarageCard, ListView, render_catalog, render_favorites, render_garage,
};
pub use format::{format_mileage, format_price, group_thousands};
pub use nav::{NavBar, render_nav};
pub use reviews::{ReviewRow, ReviewsView, SummaryLine, render_reviews};
