//! Favorite data models and client-side favorites state.

use crate::catalog::{Car, CarId};
use crate::state::LoadStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A favorite with the full car embedded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteWithCar {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    pub car_id: CarId,
    pub car: Car,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of `POST /favorites`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddFavoriteRequest {
    pub car_id: CarId,
}

/// Body of `GET /favorites/count`
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FavoriteCount {
    #[serde(default)]
    pub count: u64,
}

/// What the client knows about the user's favorites
#[derive(Debug, Clone, Default)]
pub struct FavoritesState {
    ids: HashSet<CarId>,
    entries: Vec<FavoriteWithCar>,
    pub status: LoadStatus,
    pub count: Option<u64>,
}

impl FavoritesState {
    pub fn is_favorite(&self, car_id: &str) -> bool {
        self.ids.contains(car_id)
    }

    /// Record the outcome of a successful add or remove
    pub fn set_favorite(&mut self, car_id: &str, favorite: bool) {
        if favorite {
            self.ids.insert(car_id.to_string());
        } else {
            self.ids.remove(car_id);
            self.entries.retain(|f| f.car_id != car_id);
        }
    }

    /// Replace the favorites page with a fresh server listing
    pub fn replace(&mut self, entries: Vec<FavoriteWithCar>) {
        self.ids = entries.iter().map(|f| f.car_id.clone()).collect();
        self.count = Some(entries.len() as u64);
        self.entries = entries;
        self.status = LoadStatus::Ready;
    }

    pub fn entries(&self) -> &[FavoriteWithCar] {
        &self.entries
    }

    /// Forget everything, e.g. after logout
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
