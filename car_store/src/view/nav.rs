//! Navigation bar.

use crate::state::{AppState, Page};

/// Header shown above every page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavBar {
    pub page: Page,
    pub garage_count: usize,
    /// `None` when logged out or not yet loaded
    pub favorites_count: Option<u64>,
    /// e.g. `"Hello, aliya!"`; `None` shows login and register actions
    pub greeting: Option<String>,
}

pub fn render_nav(state: &AppState) -> NavBar {
    let greeting = state.session.as_ref().map(|session| match &session.user {
        Some(user) => format!("Hello, {}!", user.username),
        None => "Logged in".to_string(),
    });

    NavBar {
        page: state.page.clone(),
        garage_count: state.garage.count(),
        favorites_count: state
            .is_logged_in()
            .then_some(state.favorites.count)
            .flatten(),
        greeting,
    }
}
