//! Session persistence and expiry handling.
//!
//! A session is a bearer token plus a cached user summary, stored under the
//! `token` and `user` keys. The session ends on logout or when the backend
//! answers 401. How the client reacts to a 401 depends on who asked:
//!
//! - **Foreground** actions (user clicked something) alert and navigate to the
//!   login page.
//! - **Background** refreshes (badge polling) clear the session quietly and
//!   leave the user where they are.

pub mod guard;
pub mod models;
pub mod store;

pub use guard::ExpiryMode;
pub use models::{AuthResponse, LoginRequest, RegisterRequest, Session, UserId, UserSummary};
pub use store::SessionStore;
