//! Car cards for the catalog, garage and favorites pages.

use super::format::{NO_DESCRIPTION, PLACEHOLDER_IMAGE, format_mileage, format_price};
use crate::catalog::{Car, CarId};
use crate::state::{AppState, LoadStatus};

pub const NO_CARS: &str = "No cars found";
pub const EMPTY_GARAGE: &str = "Your garage is empty. Add some cars!";
pub const NO_FAVORITES: &str = "No favorites yet. Add some cars to your favorites!";
pub const CATALOG_FAILED: &str = "Failed to load cars";
pub const FAVORITES_FAILED: &str = "Failed to load favorites";

/// A list page in one of its display states
#[derive(Debug, Clone, PartialEq)]
pub enum ListView<T> {
    Loading,
    Empty(&'static str),
    Failed(String),
    Items(Vec<T>),
}

impl<T> ListView<T> {
    pub fn items(&self) -> &[T] {
        match self {
            Self::Items(items) => items,
            _ => &[],
        }
    }
}

/// Garage affordance on a catalog card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GarageButton {
    AddToGarage,
    InGarage,
}

impl GarageButton {
    pub fn label(self) -> &'static str {
        match self {
            Self::AddToGarage => "Add to Garage",
            Self::InGarage => "In Garage",
        }
    }
}

/// Everything a card shows
#[derive(Debug, Clone, PartialEq)]
pub struct CarCard {
    pub id: CarId,
    pub title: String,
    pub year: i32,
    pub price: String,
    pub specs: Vec<String>,
    pub description: String,
    pub image_url: String,
    pub garage: GarageButton,
    /// Heart state; `None` when logged out, so no heart is drawn
    pub favorite: Option<bool>,
}

impl CarCard {
    /// Build a card from current membership state
    pub fn new(car: &Car, state: &AppState) -> Self {
        let garage = if state.garage.contains(&car.id) {
            GarageButton::InGarage
        } else {
            GarageButton::AddToGarage
        };
        let favorite = state
            .is_logged_in()
            .then(|| state.favorites.is_favorite(&car.id));

        Self {
            id: car.id.clone(),
            title: car.title(),
            year: car.year,
            price: format_price(car.price),
            specs: specs(car),
            description: if car.description.trim().is_empty() {
                NO_DESCRIPTION.to_string()
            } else {
                car.description.clone()
            },
            image_url: image_url(car),
            garage,
            favorite,
        }
    }
}

/// Garage entry; the only action is removal
#[derive(Debug, Clone, PartialEq)]
pub struct GarageCard {
    pub id: CarId,
    pub title: String,
    pub year: i32,
    pub price: String,
    pub specs: Vec<String>,
    pub image_url: String,
}

impl From<&Car> for GarageCard {
    fn from(car: &Car) -> Self {
        Self {
            id: car.id.clone(),
            title: car.title(),
            year: car.year,
            price: format_price(car.price),
            specs: specs(car),
            image_url: image_url(car),
        }
    }
}

fn specs(car: &Car) -> Vec<String> {
    vec![
        format_mileage(car.mileage),
        car.fuel_type.clone(),
        car.transmission.clone(),
    ]
}

fn image_url(car: &Car) -> String {
    car.image_url
        .as_deref()
        .filter(|url| !url.is_empty())
        .unwrap_or(PLACEHOLDER_IMAGE)
        .to_string()
}

/// Render the catalog page
///
/// Pure and idempotent: every affordance is recomputed from the current
/// garage, favorites and session.
pub fn render_catalog(state: &AppState) -> ListView<CarCard> {
    match &state.catalog.status {
        LoadStatus::Idle | LoadStatus::Loading => ListView::Loading,
        LoadStatus::Failed(message) => ListView::Failed(message.clone()),
        LoadStatus::Ready if state.catalog.items.is_empty() => ListView::Empty(NO_CARS),
        LoadStatus::Ready => ListView::Items(
            state
                .catalog
                .items
                .iter()
                .map(|car| CarCard::new(car, state))
                .collect(),
        ),
    }
}

/// Render the garage page from local state
pub fn render_garage(state: &AppState) -> ListView<GarageCard> {
    if state.garage.is_empty() {
        return ListView::Empty(EMPTY_GARAGE);
    }
    ListView::Items(state.garage.entries().iter().map(GarageCard::from).collect())
}

/// Render the favorites page
pub fn render_favorites(state: &AppState) -> ListView<CarCard> {
    match &state.favorites.status {
        LoadStatus::Idle | LoadStatus::Loading => ListView::Loading,
        LoadStatus::Failed(_) => ListView::Failed(FAVORITES_FAILED.to_string()),
        LoadStatus::Ready if state.favorites.entries().is_empty() => {
            ListView::Empty(NO_FAVORITES)
        }
        LoadStatus::Ready => ListView::Items(
            state
                .favorites
                .entries()
                .iter()
                .map(|f| CarCard::new(&f.car, state))
                .collect(),
        ),
    }
}
