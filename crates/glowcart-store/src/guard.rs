//! Route guarding for views that require a signed-in user.

use crate::auth::AuthStore;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

/// Views that redirect to login when nobody is signed in.
const PROTECTED_PATHS: &[&str] = &["/checkout"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    /// Send the user to [`LOGIN_PATH`], remembering where they were headed.
    RedirectToLogin { from: String },
}

#[must_use]
pub fn is_protected(path: &str) -> bool {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    PROTECTED_PATHS.iter().any(|p| *p == path)
}

/// Decides whether `destination` may be shown to the current session.
#[must_use]
pub fn require_auth(auth: &AuthStore, destination: &str) -> RouteDecision {
    if !is_protected(destination) || auth.is_authenticated() {
        RouteDecision::Allow
    } else {
        tracing::debug!(destination, "redirecting unauthenticated visitor to login");
        RouteDecision::RedirectToLogin {
            from: destination.to_owned(),
        }
    }
}

/// Where to go after a successful login or registration.
#[must_use]
pub fn post_login_destination(from: Option<&str>) -> String {
    match from {
        Some(path) if !path.is_empty() && path != LOGIN_PATH => path.to_owned(),
        _ => HOME_PATH.to_owned(),
    }
}
