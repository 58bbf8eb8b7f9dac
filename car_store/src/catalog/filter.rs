//! Catalog filtering.

use super::models::Car;

/// Active catalog filter
///
/// The four attribute filters are sent to the backend as query parameters and
/// re-checked locally. The price range is local only; both bounds are
/// inclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogFilter {
    pub make: Option<String>,
    pub body_type: Option<String>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl CatalogFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_make(mut self, make: &str) -> Self {
        self.make = non_blank(make);
        self
    }

    pub fn with_body_type(mut self, body_type: &str) -> Self {
        self.body_type = non_blank(body_type);
        self
    }

    pub fn with_fuel_type(mut self, fuel_type: &str) -> Self {
        self.fuel_type = non_blank(fuel_type);
        self
    }

    pub fn with_transmission(mut self, transmission: &str) -> Self {
        self.transmission = non_blank(transmission);
        self
    }

    pub fn with_price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    /// True when no criterion is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Query parameters understood by `GET /cars`, in a stable order
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        [
            ("make", &self.make),
            ("body_type", &self.body_type),
            ("fuel_type", &self.fuel_type),
            ("transmission", &self.transmission),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_ref().map(|v| (key, v.clone())))
        .collect()
    }

    /// Whether the car's price lies within the configured range
    pub fn matches_price(&self, car: &Car) -> bool {
        self.min_price.is_none_or(|min| car.price >= min)
            && self.max_price.is_none_or(|max| car.price <= max)
    }

    /// Whether the car satisfies every criterion
    pub fn matches(&self, car: &Car) -> bool {
        field_matches(&self.make, &car.make)
            && field_matches(&self.body_type, &car.body_type)
            && field_matches(&self.fuel_type, &car.fuel_type)
            && field_matches(&self.transmission, &car.transmission)
            && self.matches_price(car)
    }

    /// Keep only the cars satisfying the filter, preserving order
    pub fn apply(&self, cars: Vec<Car>) -> Vec<Car> {
        cars.into_iter().filter(|car| self.matches(car)).collect()
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn field_matches(wanted: &Option<String>, actual: &str) -> bool {
    wanted.as_deref().is_none_or(|w| w == actual)
}
