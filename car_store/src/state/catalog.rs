//! Catalog state and the request-generation guard.

use crate::catalog::{Car, CatalogFilter};

/// Progress of a server-backed list
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

impl LoadStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Monotonic tag for overlapping catalog fetches
///
/// Every fetch takes a new number. Only a response carrying the latest number
/// may replace the displayed list.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestSequence {
    latest: u64,
}

impl RequestSequence {
    pub fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.latest
    }

    pub fn latest(&self) -> u64 {
        self.latest
    }
}

/// Displayed catalog
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    pub items: Vec<Car>,
    pub filter: CatalogFilter,
    pub status: LoadStatus,
    sequence: RequestSequence,
}

impl CatalogState {
    /// Record a new fetch for `filter` and return its sequence number
    pub fn begin(&mut self, filter: CatalogFilter) -> u64 {
        self.filter = filter;
        self.status = LoadStatus::Loading;
        self.sequence.issue()
    }

    /// Replace the list if `seq` is still the latest fetch
    ///
    /// # Returns
    ///
    /// * `true` - The list was replaced
    /// * `false` - A newer fetch was issued; `cars` is dropped
    pub fn finish(&mut self, seq: u64, cars: Vec<Car>) -> bool {
        if !self.sequence.is_current(seq) {
            return false;
        }
        self.items = cars;
        self.status = LoadStatus::Ready;
        true
    }

    /// Record a failed fetch if `seq` is still the latest
    pub fn fail(&mut self, seq: u64, message: impl Into<String>) -> bool {
        if !self.sequence.is_current(seq) {
            return false;
        }
        self.status = LoadStatus::Failed(message.into());
        true
    }

    pub fn find(&self, id: &str) -> Option<&Car> {
        self.items.iter().find(|car| car.id == id)
    }

    /// Drop a car the backend no longer has
    pub fn remove(&mut self, id: &str) {
        self.items.retain(|car| car.id != id);
    }
}
