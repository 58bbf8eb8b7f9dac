//! Session requirements and expiry handling.

use crate::api::ApiError;
use crate::state::{AppState, Page};
use log::info;

/// Shown when an action needs a session and there is none
pub const LOGIN_REQUIRED: &str = "You must be logged in to perform this action";
/// Shown when the backend rejects the stored token
pub const SESSION_EXPIRED: &str = "Session expired. Please login again";

/// Who triggered the request that hit a 401
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryMode {
    /// A user action: alert and send the user to the login page
    Foreground,
    /// A periodic refresh: clear the session quietly
    Background,
}

impl AppState {
    /// Return the bearer token, or alert and navigate to login
    ///
    /// # Returns
    ///
    /// * `Some(token)` - Proceed with the action
    /// * `None` - No session; the caller must abort
    pub fn require_session(&mut self) -> Option<String> {
        if let Some(token) = self.token() {
            return Some(token.to_string());
        }
        self.alert_error(LOGIN_REQUIRED);
        self.navigate(Page::Login);
        None
    }

    /// React to an expired session
    ///
    /// Does nothing unless `error` is a 401. Otherwise the stored token and
    /// user are removed, and in foreground mode the user is alerted and sent
    /// to the login page.
    ///
    /// # Returns
    ///
    /// * `true` - The error was a session expiry and has been handled
    /// * `false` - Any other error; the caller reports it
    pub fn handle_expiry(&mut self, error: &ApiError, mode: ExpiryMode) -> bool {
        if !error.is_unauthorized() {
            return false;
        }

        self.clear_session();
        match mode {
            ExpiryMode::Foreground => {
                self.alert_error(SESSION_EXPIRED);
                self.navigate(Page::Login);
            }
            ExpiryMode::Background => {
                info!("Session expired during background refresh");
            }
        }
        true
    }
}
