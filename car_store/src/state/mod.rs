//! Application state container.
//!
//! Everything the client knows lives in one [`AppState`]. Controllers mutate
//! it; front ends render clones of it.

pub mod catalog;

pub use catalog::{CatalogState, LoadStatus, RequestSequence};

use crate::catalog::{Car, CarId};
use crate::favorites::FavoritesState;
use crate::forms::CarForm;
use crate::garage::Garage;
use crate::reviews::ReviewsPanel;
use crate::session::{Session, SessionStore, UserSummary};
use crate::storage::{KeyValueStore, StorageResult};
use log::{debug, warn};
use std::fmt;
use std::sync::Arc;

/// Top-level views
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Page {
    #[default]
    Catalog,
    Garage,
    AddCar,
    EditCar(CarId),
    Favorites,
    Login,
}

impl Page {
    /// Whether the page can only be shown with a session
    pub fn requires_session(&self) -> bool {
        matches!(self, Self::AddCar | Self::EditCar(_) | Self::Favorites)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Catalog => write!(f, "Catalog"),
            Self::Garage => write!(f, "Garage"),
            Self::AddCar => write!(f, "Add Car"),
            Self::EditCar(id) => write!(f, "Edit Car {id}"),
            Self::Favorites => write!(f, "Favorites"),
            Self::Login => write!(f, "Login"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Info,
    Error,
}

/// User-facing message, shown once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

/// All client state
#[derive(Debug, Clone)]
pub struct AppState {
    pub page: Page,
    pub session: Option<Session>,
    pub garage: Garage,
    pub catalog: CatalogState,
    pub favorites: FavoritesState,
    pub reviews: ReviewsPanel,
    pub form: CarForm,
    sessions: SessionStore,
    alerts: Vec<Alert>,
}

impl AppState {
    /// Build the initial state from durable storage
    ///
    /// Reads the stored session and garage. Nothing is fetched.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let sessions = SessionStore::new(store.clone());
        let session = sessions.load();
        let garage = Garage::load(store);

        debug!(
            "Loaded state: logged_in={}, garage={}",
            session.is_some(),
            garage.count()
        );

        Self {
            page: Page::default(),
            session,
            garage,
            catalog: CatalogState::default(),
            favorites: FavoritesState::default(),
            reviews: ReviewsPanel::default(),
            form: CarForm::default(),
            sessions,
            alerts: Vec::new(),
        }
    }

    /// Switch page. Leaving a page closes the reviews panel.
    pub fn navigate(&mut self, page: Page) {
        if self.page != page {
            self.reviews.close();
        }
        self.page = page;
    }

    pub fn alert_info(&mut self, message: impl Into<String>) {
        self.push_alert(AlertKind::Info, message.into());
    }

    pub fn alert_error(&mut self, message: impl Into<String>) {
        self.push_alert(AlertKind::Error, message.into());
    }

    fn push_alert(&mut self, kind: AlertKind, message: String) {
        self.alerts.push(Alert { kind, message });
    }

    /// Pending alerts, oldest first
    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    /// Remove and return pending alerts
    pub fn take_alerts(&mut self) -> Vec<Alert> {
        std::mem::take(&mut self.alerts)
    }

    /// Persist and adopt a new session
    pub fn set_session(&mut self, session: Session) -> StorageResult<()> {
        self.sessions.save(&session)?;
        self.session = Some(session);
        self.favorites.reset();
        Ok(())
    }

    /// Forget the session and everything tied to it
    pub fn clear_session(&mut self) {
        if let Err(e) = self.sessions.clear() {
            warn!("Failed to clear stored session: {}", e);
        }
        self.session = None;
        self.favorites.reset();
    }

    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    /// The logged-in user, when known
    pub fn viewer(&self) -> Option<&UserSummary> {
        self.session.as_ref().and_then(|s| s.user.as_ref())
    }

    /// Find a car snapshot the client already holds
    ///
    /// Looks in the catalog, then the favorites page, then the garage.
    pub fn find_car(&self, id: &str) -> Option<&Car> {
        self.catalog
            .find(id)
            .or_else(|| {
                self.favorites
                    .entries()
                    .iter()
                    .map(|f| &f.car)
                    .find(|car| car.id == id)
            })
            .or_else(|| self.garage.entries().iter().find(|car| car.id == id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{GARAGE_KEY, MemoryStore, TOKEN_KEY, USER_KEY};

    fn session() -> Session {
        Session {
            token: "tok".to_string(),
            user: Some(UserSummary {
                id: "u1".to_string(),
                username: "aliya".to_string(),
            }),
        }
    }

    #[test]
    fn test_load_reads_session_and_garage() {
        let store = Arc::new(MemoryStore::new());
        store.set(TOKEN_KEY, "tok").unwrap();
        store
            .set(USER_KEY, r#"{"id":"u1","username":"aliya"}"#)
            .unwrap();
        store
            .set(
                GARAGE_KEY,
                r#"[{"id":"c1","make":"Kia","model":"Rio","year":2020,"price":1}]"#,
            )
            .unwrap();

        let state = AppState::load(store);
        assert_eq!(state.session, Some(session()));
        assert_eq!(state.garage.ids(), vec!["c1"]);
        assert!(state.find_car("c1").is_some());
        assert_eq!(state.page, Page::Catalog);
    }

    #[test]
    fn test_set_and_clear_session() {
        let store = Arc::new(MemoryStore::new());
        let mut state = AppState::load(store.clone());

        state.set_session(session()).unwrap();
        assert_eq!(state.token(), Some("tok"));
        assert_eq!(state.viewer().map(|u| u.username.as_str()), Some("aliya"));
        assert!(store.get(TOKEN_KEY).unwrap().is_some());

        state.favorites.set_favorite("c1", true);
        state.clear_session();
        assert!(!state.is_logged_in());
        assert!(!state.favorites.is_favorite("c1"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_alerts_are_taken_once() {
        let mut state = AppState::load(Arc::new(MemoryStore::new()));
        state.alert_info("hello");
        state.alert_error("oops");

        let alerts = state.take_alerts();
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[1].kind, AlertKind::Error);
        assert!(state.alerts().is_empty());
    }

    #[test]
    fn test_navigate_closes_reviews() {
        let mut state = AppState::load(Arc::new(MemoryStore::new()));
        state.reviews.open("c1");

        state.navigate(Page::Catalog);
        assert!(state.reviews.is_open());

        state.navigate(Page::Garage);
        assert!(!state.reviews.is_open());
    }

    #[test]
    fn test_page_session_requirement() {
        assert!(Page::Favorites.requires_session());
        assert!(Page::EditCar("c1".into()).requires_session());
        assert!(!Page::Garage.requires_session());
        assert_eq!(Page::AddCar.to_string(), "Add Car");
    }
}
