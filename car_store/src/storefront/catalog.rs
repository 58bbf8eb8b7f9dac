//! Catalog and garage operations.

use super::{StoreError, StoreResult, Storefront};
use crate::catalog::CatalogFilter;
use crate::view::cards::CATALOG_FAILED;
use log::{debug, warn};

const GARAGE_SAVE_FAILED: &str = "Failed to save garage";

/// Outcome of a catalog fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogLoad {
    /// The displayed list was replaced with this many cars
    Applied(usize),
    /// A newer fetch was issued meanwhile; this response was dropped
    Stale,
}

impl Storefront {
    /// Fetch the catalog for `filter` and replace the displayed list
    ///
    /// Attribute filters go to the backend; the price range is applied
    /// locally with inclusive bounds. Overlapping calls are resolved by
    /// issue order: only the most recently issued fetch may update state.
    ///
    /// # Returns
    ///
    /// * `Ok(CatalogLoad::Applied(n))` - `n` cars are now displayed
    /// * `Ok(CatalogLoad::Stale)` - Superseded; state untouched
    /// * `Err(StoreError::Api)` - The fetch failed and was the latest
    pub async fn load_catalog(&self, filter: CatalogFilter) -> StoreResult<CatalogLoad> {
        let seq = self.state.lock().await.catalog.begin(filter.clone());
        debug!("Catalog fetch #{} with {:?}", seq, filter);

        let result = self.api.list_cars(&filter).await;

        let mut state = self.state.lock().await;
        match result {
            Ok(cars) => {
                let cars = filter.apply(cars);
                let count = cars.len();
                if state.catalog.finish(seq, cars) {
                    Ok(CatalogLoad::Applied(count))
                } else {
                    debug!("Dropping stale catalog response #{}", seq);
                    Ok(CatalogLoad::Stale)
                }
            }
            Err(e) => {
                if !state.catalog.fail(seq, CATALOG_FAILED) {
                    debug!("Dropping stale catalog failure #{}: {}", seq, e);
                    return Ok(CatalogLoad::Stale);
                }
                warn!("Catalog fetch failed: {}", e);
                Err(e.into())
            }
        }
    }

    /// Fetch again with the current filter
    pub async fn reload_catalog(&self) -> StoreResult<CatalogLoad> {
        let filter = self.state.lock().await.catalog.filter.clone();
        self.load_catalog(filter).await
    }

    /// Clear every filter and reload
    pub async fn reset_filters(&self) -> StoreResult<CatalogLoad> {
        self.load_catalog(CatalogFilter::default()).await
    }

    /// Add a displayed car to the garage
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - Added
    /// * `Ok(false)` - Already in the garage
    pub async fn add_to_garage(&self, car_id: &str) -> StoreResult<bool> {
        let mut state = self.state.lock().await;
        let Some(car) = state.find_car(car_id).cloned() else {
            state.alert_error("Car not found");
            return Err(StoreError::UnknownCar(car_id.to_string()));
        };

        match state.garage.add(car) {
            Ok(added) => {
                debug!("Garage add {}: {}", car_id, added);
                Ok(added)
            }
            Err(e) => {
                warn!("Failed to save garage: {}", e);
                state.alert_error(GARAGE_SAVE_FAILED);
                Err(e.into())
            }
        }
    }

    /// Remove a car from the garage. Absent ids are a no-op.
    pub async fn remove_from_garage(&self, car_id: &str) -> StoreResult<bool> {
        let mut state = self.state.lock().await;
        match state.garage.remove(car_id) {
            Ok(removed) => {
                debug!("Garage remove {}: {}", car_id, removed);
                Ok(removed)
            }
            Err(e) => {
                warn!("Failed to save garage: {}", e);
                state.alert_error(GARAGE_SAVE_FAILED);
                Err(e.into())
            }
        }
    }
}
