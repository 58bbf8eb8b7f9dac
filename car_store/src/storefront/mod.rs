//! Storefront controller.
//!
//! [`Storefront`] ties the [`AppState`] to a [`StoreApi`] backend. Every
//! operation follows the same shape: read what it needs from state, release
//! the lock, await the backend, then lock again to apply the outcome. The
//! state lock is never held across a network call, so front ends can render
//! while requests are in flight.
//!
//! Foreground operations report failures as alerts and return the error, so
//! front ends may drop the `Err`. Failed page loads also show on the page they
//! concern. Background refreshes only log.

pub mod errors;

mod cars;
mod catalog;
mod favorites;
mod reviews;

pub use catalog::CatalogLoad;
pub use errors::{StoreError, StoreResult};

use crate::api::{ApiError, ApiResult, StoreApi};
use crate::forms::FormError;
use crate::session::{AuthResponse, ExpiryMode, LoginRequest, RegisterRequest, Session};
use crate::state::{Alert, AppState, Page};
use crate::storage::KeyValueStore;
use log::{info, warn};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Confirmation prompt for deleting a review
pub const DELETE_REVIEW_PROMPT: &str = "Are you sure you want to delete this review?";
/// Confirmation prompt for deleting a car
pub const DELETE_CAR_PROMPT: &str = "Are you sure you want to delete this car?";

/// Client controller
///
/// Cheap to clone; clones share the same state and backend.
#[derive(Clone)]
pub struct Storefront {
    api: Arc<dyn StoreApi>,
    state: Arc<Mutex<AppState>>,
}

impl Storefront {
    /// Create a controller with state loaded from `store`
    pub fn new(api: Arc<dyn StoreApi>, store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_state(api, AppState::load(store))
    }

    pub fn with_state(api: Arc<dyn StoreApi>, state: AppState) -> Self {
        Self {
            api,
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Copy of the current state for rendering
    pub async fn snapshot(&self) -> AppState {
        self.state.lock().await.clone()
    }

    /// Remove and return pending alerts
    pub async fn take_alerts(&self) -> Vec<Alert> {
        self.state.lock().await.take_alerts()
    }

    /// Initial fetches: the catalog, plus the favorites badge with a session
    pub async fn start(&self) {
        if let Err(e) = self.reload_catalog().await {
            warn!("Initial catalog load failed: {}", e);
        }
        if let Err(e) = self.load_favorites_count().await {
            warn!("Initial favorites count failed: {}", e);
        }
    }

    /// Show a page, running whatever the page needs first
    ///
    /// Pages that need a session alert and redirect to login without one.
    /// The favorites page is fetched on every visit; the garage renders from
    /// local state.
    pub async fn show_page(&self, page: Page) -> StoreResult<()> {
        match page {
            Page::Favorites => {
                self.require_session().await?;
                self.state.lock().await.navigate(Page::Favorites);
                self.load_favorites_page().await.map(|_| ())
            }
            Page::EditCar(id) => self.begin_edit_car(&id).await,
            page => {
                let mut state = self.state.lock().await;
                if page.requires_session() && state.require_session().is_none() {
                    return Err(StoreError::NotLoggedIn);
                }
                state.navigate(page);
                Ok(())
            }
        }
    }

    /// Log in and persist the session
    ///
    /// # Errors
    ///
    /// * `StoreError::Api` - Bad credentials or backend failure
    /// * `StoreError::Storage` - The session could not be persisted
    pub async fn login(&self, username: &str, password: &str) -> StoreResult<()> {
        let request = LoginRequest {
            username: username.trim().to_string(),
            password: password.to_string(),
        };
        let result = self.api.login(&request).await;
        self.finish_auth(result, "Login failed").await
    }

    /// Create an account and log in with it
    pub async fn register(&self, username: &str, email: &str, password: &str) -> StoreResult<()> {
        let request = RegisterRequest {
            username: username.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
        };

        let missing = [
            ("username", request.username.as_str()),
            ("email", request.email.as_str()),
            ("password", request.password.as_str()),
        ]
        .into_iter()
        .find(|(_, value)| value.is_empty());
        if let Some((field, _)) = missing {
            let error = FormError::Missing(field);
            self.state.lock().await.alert_error(error.to_string());
            return Err(error.into());
        }

        let result = self.api.register(&request).await;
        self.finish_auth(result, "Registration failed").await
    }

    async fn finish_auth(&self, result: ApiResult<AuthResponse>, fallback: &str) -> StoreResult<()> {
        {
            let mut state = self.state.lock().await;
            let response = match result {
                Ok(response) => response,
                Err(e) => {
                    state.alert_error(rejection_message(&e, fallback));
                    return Err(e.into());
                }
            };
            info!("Logged in as {}", response.user.username);
            if let Err(e) = state.set_session(Session::from(response)) {
                warn!("Failed to persist session: {}", e);
                state.alert_error("Failed to save session");
                return Err(e.into());
            }
            state.navigate(Page::Catalog);
        }

        if let Err(e) = self.load_favorites_count().await {
            warn!("Favorites count refresh after login failed: {}", e);
        }
        Ok(())
    }

    /// Drop the session locally
    pub async fn logout(&self) {
        let mut state = self.state.lock().await;
        state.clear_session();
        state.navigate(Page::Catalog);
        info!("Logged out");
    }

    /// Token for an action that needs a session
    ///
    /// Alerts and navigates to login when there is none.
    async fn require_session(&self) -> StoreResult<String> {
        self.state
            .lock()
            .await
            .require_session()
            .ok_or(StoreError::NotLoggedIn)
    }

    /// Report a failed foreground call with a fixed message
    async fn report(&self, error: ApiError, message: &str) -> StoreError {
        let mut state = self.state.lock().await;
        if !state.handle_expiry(&error, ExpiryMode::Foreground) {
            warn!("{}: {}", message, error);
            state.alert_error(message);
        }
        error.into()
    }

    /// Report a failed foreground call, showing the server's text when it
    /// sent one
    async fn report_rejection(&self, error: ApiError, fallback: &str) -> StoreError {
        let mut state = self.state.lock().await;
        if !state.handle_expiry(&error, ExpiryMode::Foreground) {
            warn!("{}: {}", fallback, error);
            state.alert_error(rejection_message(&error, fallback));
        }
        error.into()
    }
}

fn rejection_message(error: &ApiError, fallback: &str) -> String {
    match error.server_message() {
        Some(text) => format!("Error: {text}"),
        None => fallback.to_string(),
    }
}
