//! Review data models.

use crate::catalog::models::deserialize_id;
use crate::session::UserSummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use thiserror::Error;

/// Star rating, always within 1..=5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

/// Rejected rating value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Rating must be between 1 and 5, got {0}")]
pub struct RatingError(pub i64);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Options offered by the rating selector, best first
    pub fn choices() -> [Rating; 5] {
        [Rating(5), Rating(4), Rating(3), Rating(2), Rating(1)]
    }

    pub fn new(value: u8) -> Result<Self, RatingError> {
        Self::try_from(i64::from(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// One star per point
    pub fn stars(self) -> String {
        "★".repeat(self.0 as usize)
    }
}

impl TryFrom<i64> for Rating {
    type Error = RatingError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(RatingError(value))
        }
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A review as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub car_id: String,
    #[serde(deserialize_with = "deserialize_id")]
    pub user_id: String,
    #[serde(default)]
    pub username: String,
    pub rating: Rating,
    #[serde(default)]
    pub comment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Review {
    pub fn author_label(&self) -> &str {
        if self.username.is_empty() {
            "Anonymous"
        } else {
            &self.username
        }
    }

    /// Only the author may edit or delete a review
    pub fn can_modify(&self, viewer: Option<&UserSummary>) -> bool {
        viewer.is_some_and(|v| v.id == self.user_id)
    }
}

/// Body of review create and update requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewInput {
    pub rating: Rating,
    pub comment: String,
}

/// Body of `GET /cars/{id}/reviews`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewsResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub total_reviews: Option<u64>,
}

impl ReviewsResponse {
    /// Aggregate for the panel header, `None` when there is nothing to show
    pub fn summary(&self) -> Option<RatingSummary> {
        let average = match self.average_rating {
            Some(avg) if avg > 0.0 => avg,
            _ if self.reviews.is_empty() => return None,
            _ => {
                let total: u32 = self.reviews.iter().map(|r| u32::from(r.rating.value())).sum();
                f64::from(total) / self.reviews.len() as f64
            }
        };

        Some(RatingSummary {
            average,
            count: self.reviews.len(),
        })
    }

    pub fn find(&self, review_id: &str) -> Option<&Review> {
        self.reviews.iter().find(|r| r.id == review_id)
    }
}

/// Average rating of a car's reviews
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingSummary {
    pub average: f64,
    pub count: usize,
}

impl RatingSummary {
    /// Whole stars to draw: the average rounded half away from zero
    pub fn star_count(&self) -> u8 {
        self.average.round().clamp(0.0, f64::from(Rating::MAX)) as u8
    }

    /// Unrounded average to one decimal, e.g. "4.3 / 5"
    pub fn average_label(&self) -> String {
        format!("{:.1} / {}", self.average, Rating::MAX)
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
