use serde::{Deserialize, Serialize};

/// The signed-in session user. At most one exists at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub name: String,
    pub email: String,
}

impl AuthUser {
    /// Derives a display name from the local part of an email address,
    /// falling back to `"User"` when the local part is empty.
    #[must_use]
    pub fn display_name_from_email(email: &str) -> String {
        match email.split('@').next() {
            Some(local) if !local.is_empty() => local.to_owned(),
            _ => "User".to_owned(),
        }
    }
}
