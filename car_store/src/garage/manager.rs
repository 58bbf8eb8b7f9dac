//! Garage persistence and membership.

use crate::catalog::{Car, CarId};
use crate::storage::{GARAGE_KEY, KeyValueStore, StorageResult};
use log::warn;
use std::fmt;
use std::sync::Arc;

/// Ordered, duplicate-free set of car snapshots persisted under `garage`
#[derive(Clone)]
pub struct Garage {
    entries: Vec<Car>,
    store: Arc<dyn KeyValueStore>,
}

impl fmt::Debug for Garage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Garage")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

impl Garage {
    /// Load the garage from storage
    ///
    /// A missing key, unreadable store or malformed value yields an empty
    /// garage; the previous value is left in place until the next write.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let entries = match store.get(GARAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Car>>(&raw) {
                Ok(cars) => dedup(cars),
                Err(e) => {
                    warn!("Ignoring malformed garage in storage: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to read garage from storage: {}", e);
                Vec::new()
            }
        };

        Self { entries, store }
    }

    /// Add a snapshot of `car`
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The car was appended and the garage persisted
    /// * `Ok(false)` - A car with the same id is already present; nothing changed
    ///
    /// A failed write leaves the garage unchanged.
    pub fn add(&mut self, car: Car) -> StorageResult<bool> {
        if self.contains(&car.id) {
            return Ok(false);
        }
        let mut entries = self.entries.clone();
        entries.push(car);
        self.commit(entries)?;
        Ok(true)
    }

    /// Remove the car with `id`
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The car was removed and the garage persisted
    /// * `Ok(false)` - No such car; storage is not touched
    pub fn remove(&mut self, id: &str) -> StorageResult<bool> {
        if !self.contains(id) {
            return Ok(false);
        }
        let entries = self
            .entries
            .iter()
            .filter(|car| car.id != id)
            .cloned()
            .collect();
        self.commit(entries)?;
        Ok(true)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|car| car.id == id)
    }

    /// Number of cars, shown as the garage badge
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cars in insertion order
    pub fn entries(&self) -> &[Car] {
        &self.entries
    }

    pub fn ids(&self) -> Vec<CarId> {
        self.entries.iter().map(|car| car.id.clone()).collect()
    }

    /// Persist `entries`, adopting them only once the write succeeded
    fn commit(&mut self, entries: Vec<Car>) -> StorageResult<()> {
        let raw = serde_json::to_string(&entries)?;
        self.store.set(GARAGE_KEY, &raw)?;
        self.entries = entries;
        Ok(())
    }
}

fn dedup(cars: Vec<Car>) -> Vec<Car> {
    let mut seen = Vec::with_capacity(cars.len());
    cars.into_iter()
        .filter(|car| {
            if seen.contains(&car.id) {
                false
            } else {
                seen.push(car.id.clone());
                true
            }
        })
        .collect()
}
