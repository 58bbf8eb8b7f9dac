//! Favorites operations.

use super::{StoreResult, Storefront};
use crate::session::ExpiryMode;
use crate::state::{LoadStatus, Page};
use log::{debug, warn};

const TOGGLE_FAILED: &str = "Failed to update favorites";

impl Storefront {
    /// Flip the favorite mark on a car
    ///
    /// The mark changes only after the backend accepts the change. The badge
    /// count is then refreshed, and the favorites page reloaded if showing.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The car is now a favorite
    /// * `Ok(false)` - The car is no longer a favorite
    pub async fn toggle_favorite(&self, car_id: &str) -> StoreResult<bool> {
        let token = self.require_session().await?;
        let was_favorite = self.state.lock().await.favorites.is_favorite(car_id);

        let result = if was_favorite {
            self.api.remove_favorite(&token, car_id).await
        } else {
            self.api.add_favorite(&token, car_id).await
        };
        if let Err(e) = result {
            return Err(self.report(e, TOGGLE_FAILED).await);
        }

        let on_favorites_page = {
            let mut state = self.state.lock().await;
            state.favorites.set_favorite(car_id, !was_favorite);
            state.page == Page::Favorites
        };
        debug!("Favorite {} -> {}", car_id, !was_favorite);

        if let Err(e) = self.load_favorites_count().await {
            warn!("Favorites count refresh failed: {}", e);
        }
        if on_favorites_page {
            self.load_favorites_page().await?;
        }
        Ok(!was_favorite)
    }

    /// Refresh the favorites badge in the background
    ///
    /// Skipped without a session. Failures are never alerted; a 401 clears
    /// the session without leaving the current page.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(count))` - Badge updated
    /// * `Ok(None)` - No session, nothing fetched
    pub async fn load_favorites_count(&self) -> StoreResult<Option<u64>> {
        let Some(token) = self.state.lock().await.token().map(str::to_string) else {
            debug!("No session, skipping favorites count");
            return Ok(None);
        };

        match self.api.favorites_count(&token).await {
            Ok(count) => {
                self.state.lock().await.favorites.count = Some(count);
                Ok(Some(count))
            }
            Err(e) => {
                let mut state = self.state.lock().await;
                if !state.handle_expiry(&e, ExpiryMode::Background) {
                    warn!("Failed to load favorites count: {}", e);
                }
                Err(e.into())
            }
        }
    }

    /// Fetch the favorites page and rebuild the favorite marks from it
    ///
    /// # Returns
    ///
    /// * `Ok(n)` - `n` favorites are displayed
    pub async fn load_favorites_page(&self) -> StoreResult<usize> {
        let token = self.require_session().await?;
        self.state.lock().await.favorites.status = LoadStatus::Loading;

        match self.api.list_favorites(&token).await {
            Ok(entries) => {
                let count = entries.len();
                self.state.lock().await.favorites.replace(entries);
                Ok(count)
            }
            Err(e) => {
                let mut state = self.state.lock().await;
                if !state.handle_expiry(&e, ExpiryMode::Foreground) {
                    warn!("Failed to load favorites: {}", e);
                    state.favorites.status = LoadStatus::Failed(e.to_string());
                }
                Err(e.into())
            }
        }
    }
}
