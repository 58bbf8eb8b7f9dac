//! Car add, edit and delete.

use super::{StoreError, StoreResult, Storefront};
use crate::catalog::CarInput;
use crate::forms::{CarForm, FormResult};
use crate::state::Page;
use log::{info, warn};

impl Storefront {
    /// Set one field of the car form
    pub async fn update_form(&self, field: &str, value: &str) -> FormResult<()> {
        let mut state = self.state.lock().await;
        let result = state.form.set_field(field, value);
        if let Err(e) = &result {
            state.alert_error(e.to_string());
        }
        result
    }

    /// Submit the form as a new car
    ///
    /// On success the form is cleared, the catalog reloaded and shown.
    /// Rejections show the server's text verbatim.
    pub async fn submit_new_car(&self) -> StoreResult<()> {
        let token = self.require_session().await?;
        let input = self.form_input().await?;

        if let Err(e) = self.api.create_car(&token, &input).await {
            return Err(self.report_rejection(e, "Failed to add car").await);
        }
        info!("Added car {} {}", input.make, input.model);

        self.finish_form("Car added successfully!").await;
        Ok(())
    }

    /// Submit the form for whichever form page is showing
    ///
    /// # Errors
    ///
    /// * `StoreError::Cancelled` - Neither the add nor the edit page is showing
    pub async fn submit_form(&self) -> StoreResult<()> {
        let page = self.state.lock().await.page.clone();
        match page {
            Page::AddCar => self.submit_new_car().await,
            Page::EditCar(id) => self.submit_car_edit(&id).await,
            _ => {
                self.state
                    .lock()
                    .await
                    .alert_error("Open the add or edit page first");
                Err(StoreError::Cancelled)
            }
        }
    }

    /// Open the edit page for a car, pre-filled from the held snapshot
    ///
    /// Falls back to fetching the car when the client holds no snapshot.
    pub async fn begin_edit_car(&self, car_id: &str) -> StoreResult<()> {
        self.require_session().await?;

        let held = self.state.lock().await.find_car(car_id).cloned();
        let car = match held {
            Some(car) => car,
            None => match self.api.get_car(car_id).await {
                Ok(car) => car,
                Err(e) => {
                    warn!("Cannot edit car {}: {}", car_id, e);
                    let mut state = self.state.lock().await;
                    state.alert_error("Car not found");
                    return Err(StoreError::UnknownCar(car_id.to_string()));
                }
            },
        };

        let mut state = self.state.lock().await;
        state.form = CarForm::from_car(&car);
        state.navigate(Page::EditCar(car.id));
        Ok(())
    }

    /// Submit the form as a full replacement of `car_id`
    pub async fn submit_car_edit(&self, car_id: &str) -> StoreResult<()> {
        let token = self.require_session().await?;
        let input = self.form_input().await?;

        if let Err(e) = self.api.update_car(&token, car_id, &input).await {
            return Err(self.report_rejection(e, "Failed to update car").await);
        }
        info!("Updated car {}", car_id);

        self.finish_form("Car updated successfully!").await;
        Ok(())
    }

    /// Delete a car after explicit confirmation
    ///
    /// A matching garage entry is removed too.
    pub async fn delete_car(&self, car_id: &str, confirmed: bool) -> StoreResult<()> {
        if !confirmed {
            return Err(StoreError::Cancelled);
        }
        let token = self.require_session().await?;

        if let Err(e) = self.api.delete_car(&token, car_id).await {
            return Err(self.report_rejection(e, "Failed to delete car").await);
        }
        info!("Deleted car {}", car_id);

        let on_favorites_page = {
            let mut state = self.state.lock().await;
            state.catalog.remove(car_id);
            state.favorites.set_favorite(car_id, false);
            if let Err(e) = state.garage.remove(car_id) {
                warn!("Failed to drop deleted car {} from garage: {}", car_id, e);
                state.alert_error("Failed to save garage");
            }
            if state.page == Page::EditCar(car_id.to_string()) {
                state.navigate(Page::Catalog);
            }
            state.alert_info("Car deleted");
            state.page == Page::Favorites
        };

        if let Err(e) = self.reload_catalog().await {
            warn!("Catalog reload after delete failed: {}", e);
        }
        if let Err(e) = self.load_favorites_count().await {
            warn!("Favorites count refresh after delete failed: {}", e);
        }
        if on_favorites_page && let Err(e) = self.load_favorites_page().await {
            warn!("Favorites reload after delete failed: {}", e);
        }
        Ok(())
    }

    async fn form_input(&self) -> StoreResult<CarInput> {
        let mut state = self.state.lock().await;
        match state.form.to_input() {
            Ok(input) => Ok(input),
            Err(e) => {
                state.alert_error(e.to_string());
                Err(e.into())
            }
        }
    }

    async fn finish_form(&self, message: &str) {
        {
            let mut state = self.state.lock().await;
            state.alert_info(message);
            state.form.reset();
            state.navigate(Page::Catalog);
        }
        if let Err(e) = self.reload_catalog().await {
            warn!("Catalog reload failed: {}", e);
        }
    }
}
