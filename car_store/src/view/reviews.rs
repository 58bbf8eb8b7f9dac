//! Reviews panel view.

use crate::catalog::CarId;
use crate::reviews::{Rating, ReviewDraft, ReviewsPanel};
use crate::state::AppState;

pub const NO_REVIEWS: &str = "No reviews yet. Be the first to review this car!";
pub const REVIEWS_FAILED: &str = "Failed to load reviews";

/// Aggregate line above the list
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryLine {
    pub stars: String,
    /// e.g. `"4.3 / 5"`
    pub average: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewRow {
    pub id: String,
    pub author: String,
    pub stars: String,
    pub comment: String,
    pub date: Option<String>,
    /// Edit and delete buttons are drawn only for the author
    pub can_modify: bool,
    /// Set on the single row in edit mode
    pub draft: Option<ReviewDraft>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReviewsView {
    Hidden,
    Loading,
    Failed(String),
    Loaded {
        car_id: CarId,
        summary: Option<SummaryLine>,
        rows: Vec<ReviewRow>,
        empty_message: Option<&'static str>,
        /// The add-review form is shown only with a session
        can_post: bool,
        rating_choices: [Rating; 5],
    },
}

/// Render the reviews panel for the current viewer
pub fn render_reviews(state: &AppState) -> ReviewsView {
    let (car_id, data) = match &state.reviews {
        ReviewsPanel::Closed => return ReviewsView::Hidden,
        ReviewsPanel::Loading { .. } => return ReviewsView::Loading,
        ReviewsPanel::Failed { .. } => return ReviewsView::Failed(REVIEWS_FAILED.to_string()),
        ReviewsPanel::Loaded { car_id, data } | ReviewsPanel::Editing { car_id, data, .. } => {
            (car_id, data)
        }
    };

    let viewer = state.viewer();
    let editing = state.reviews.editing();

    let rows: Vec<ReviewRow> = data
        .reviews
        .iter()
        .map(|review| ReviewRow {
            id: review.id.clone(),
            author: review.author_label().to_string(),
            stars: review.rating.stars(),
            comment: review.comment.clone(),
            date: review
                .created_at
                .map(|at| at.format("%Y-%m-%d").to_string()),
            can_modify: review.can_modify(viewer),
            draft: editing
                .filter(|(id, _)| *id == review.id)
                .map(|(_, draft)| draft.clone()),
        })
        .collect();

    let summary = data.summary().map(|s| SummaryLine {
        stars: "★".repeat(usize::from(s.star_count())),
        average: s.average_label(),
        count: s.count,
    });

    ReviewsView::Loaded {
        car_id: car_id.clone(),
        summary,
        empty_message: rows.is_empty().then_some(NO_REVIEWS),
        rows,
        can_post: state.is_logged_in(),
        rating_choices: Rating::choices(),
    }
}
