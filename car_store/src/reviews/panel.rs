//! Reviews panel state machine.

use super::models::{Rating, ReviewsResponse};
use crate::catalog::CarId;
use crate::session::UserSummary;

/// Working copy of a review being edited
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewDraft {
    pub rating: Rating,
    pub comment: String,
}

/// State of the reviews view for one car
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ReviewsPanel {
    #[default]
    Closed,
    Loading {
        car_id: CarId,
    },
    Loaded {
        car_id: CarId,
        data: ReviewsResponse,
    },
    /// Exactly one review is in edit mode
    Editing {
        car_id: CarId,
        data: ReviewsResponse,
        review_id: String,
        draft: ReviewDraft,
    },
    Failed {
        car_id: CarId,
        message: String,
    },
}

impl ReviewsPanel {
    /// Start loading reviews for `car_id`, discarding whatever was shown
    pub fn open(&mut self, car_id: &str) {
        *self = Self::Loading {
            car_id: car_id.to_string(),
        };
    }

    /// Re-enter `Loading` for the car currently shown
    ///
    /// # Returns
    ///
    /// * `Some(car_id)` - The panel is open and now loading
    /// * `None` - The panel is closed
    pub fn reload(&mut self) -> Option<CarId> {
        let car_id = self.car_id()?.to_string();
        self.open(&car_id);
        Some(car_id)
    }

    /// Apply a successful load
    ///
    /// Ignored unless the panel is still loading the same car.
    pub fn loaded(&mut self, car_id: &str, data: ReviewsResponse) -> bool {
        if !self.is_loading(car_id) {
            return false;
        }
        *self = Self::Loaded {
            car_id: car_id.to_string(),
            data,
        };
        true
    }

    /// Apply a failed load
    ///
    /// Ignored unless the panel is still loading the same car.
    pub fn failed(&mut self, car_id: &str, message: impl Into<String>) -> bool {
        if !self.is_loading(car_id) {
            return false;
        }
        *self = Self::Failed {
            car_id: car_id.to_string(),
            message: message.into(),
        };
        true
    }

    /// Put one review into edit mode
    ///
    /// Allowed from `Loaded`, or from `Editing` to switch to another review.
    /// The viewer must be the review's author.
    pub fn begin_edit(&mut self, review_id: &str, viewer: Option<&UserSummary>) -> bool {
        let (car_id, data) = match self {
            Self::Loaded { car_id, data } | Self::Editing { car_id, data, .. } => {
                (car_id.clone(), data.clone())
            }
            _ => return false,
        };

        let Some(review) = data.find(review_id) else {
            return false;
        };
        if !review.can_modify(viewer) {
            return false;
        }

        let draft = ReviewDraft {
            rating: review.rating,
            comment: review.comment.clone(),
        };
        *self = Self::Editing {
            car_id,
            data,
            review_id: review_id.to_string(),
            draft,
        };
        true
    }

    /// Leave edit mode without saving
    pub fn cancel_edit(&mut self) {
        if let Self::Editing { car_id, data, .. } = self {
            *self = Self::Loaded {
                car_id: car_id.clone(),
                data: data.clone(),
            };
        }
    }

    pub fn close(&mut self) {
        *self = Self::Closed;
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    pub fn car_id(&self) -> Option<&str> {
        match self {
            Self::Closed => None,
            Self::Loading { car_id }
            | Self::Loaded { car_id, .. }
            | Self::Editing { car_id, .. }
            | Self::Failed { car_id, .. } => Some(car_id),
        }
    }

    /// Reviews currently on screen
    pub fn data(&self) -> Option<&ReviewsResponse> {
        match self {
            Self::Loaded { data, .. } | Self::Editing { data, .. } => Some(data),
            _ => None,
        }
    }

    pub fn editing(&self) -> Option<(&str, &ReviewDraft)> {
        match self {
            Self::Editing {
                review_id, draft, ..
            } => Some((review_id, draft)),
            _ => None,
        }
    }

    fn is_loading(&self, expected: &str) -> bool {
        matches!(self, Self::Loading { car_id } if car_id == expected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reviews::models::Review;

    fn user(id: &str) -> UserSummary {
        UserSummary {
            id: id.to_string(),
            username: format!("user-{id}"),
        }
    }

    fn data() -> ReviewsResponse {
        let review = |id: &str, user_id: &str| Review {
            id: id.to_string(),
            car_id: "car1".to_string(),
            user_id: user_id.to_string(),
            username: format!("user-{user_id}"),
            rating: Rating::new(4).unwrap(),
            comment: format!("comment {id}"),
            created_at: None,
            updated_at: None,
        };
        ReviewsResponse {
            reviews: vec![review("r1", "u1"), review("r2", "u2"), review("r3", "u1")],
            average_rating: Some(4.0),
            total_reviews: Some(3),
        }
    }

    fn loaded() -> ReviewsPanel {
        let mut panel = ReviewsPanel::default();
        panel.open("car1");
        assert!(panel.loaded("car1", data()));
        panel
    }

    #[test]
    fn test_open_then_load() {
        let mut panel = ReviewsPanel::default();
        assert!(!panel.is_open());

        panel.open("car1");
        assert_eq!(panel.car_id(), Some("car1"));
        assert!(panel.data().is_none());

        assert!(panel.loaded("car1", data()));
        assert_eq!(panel.data().unwrap().reviews.len(), 3);
    }

    #[test]
    fn test_load_for_other_car_is_discarded() {
        let mut panel = ReviewsPanel::default();
        panel.open("car1");
        panel.open("car2");

        assert!(!panel.loaded("car1", data()));
        assert!(matches!(panel, ReviewsPanel::Loading { ref car_id } if car_id == "car2"));
    }

    #[test]
    fn test_load_after_close_is_discarded() {
        let mut panel = ReviewsPanel::default();
        panel.open("car1");
        panel.close();

        assert!(!panel.loaded("car1", data()));
        assert!(!panel.failed("car1", "boom"));
        assert_eq!(panel, ReviewsPanel::Closed);
    }

    #[test]
    fn test_author_can_edit_one_review_at_a_time() {
        let mut panel = loaded();
        let author = user("u1");

        assert!(panel.begin_edit("r1", Some(&author)));
        let (id, draft) = panel.editing().unwrap();
        assert_eq!(id, "r1");
        assert_eq!(draft.comment, "comment r1");

        assert!(panel.begin_edit("r3", Some(&author)));
        assert_eq!(panel.editing().unwrap().0, "r3");
    }

    #[test]
    fn test_non_author_cannot_edit() {
        let mut panel = loaded();

        assert!(!panel.begin_edit("r2", Some(&user("u1"))));
        assert!(!panel.begin_edit("r1", None));
        assert!(!panel.begin_edit("missing", Some(&user("u1"))));
        assert!(matches!(panel, ReviewsPanel::Loaded { .. }));
    }

    #[test]
    fn test_cannot_edit_while_loading() {
        let mut panel = ReviewsPanel::default();
        panel.open("car1");
        assert!(!panel.begin_edit("r1", Some(&user("u1"))));
    }

    #[test]
    fn test_cancel_edit_returns_to_loaded() {
        let mut panel = loaded();
        panel.begin_edit("r1", Some(&user("u1")));

        panel.cancel_edit();
        assert!(matches!(panel, ReviewsPanel::Loaded { .. }));
        assert!(panel.editing().is_none());
    }

    #[test]
    fn test_reload_keeps_car() {
        let mut panel = loaded();
        panel.begin_edit("r1", Some(&user("u1")));

        assert_eq!(panel.reload().as_deref(), Some("car1"));
        assert!(matches!(panel, ReviewsPanel::Loading { .. }));

        let mut closed = ReviewsPanel::Closed;
        assert_eq!(closed.reload(), None);
    }

    #[test]
    fn test_failed_load() {
        let mut panel = ReviewsPanel::default();
        panel.open("car1");

        assert!(panel.failed("car1", "Failed to load reviews"));
        assert_eq!(panel.car_id(), Some("car1"));
        assert!(panel.data().is_none());
    }
}
