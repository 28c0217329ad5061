//! Session state and the credential-service seam.
//!
//! [`SimulatedAuthenticator`] is a placeholder: it sleeps, then accepts any
//! credentials. It is not a security boundary. A real service only needs to
//! implement [`Authenticator`].

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use glowcart_core::AuthUser;
use thiserror::Error;

use crate::persist;
use crate::storage::KeyValueStorage;

pub const AUTH_KEY: &str = "auth-user";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Form-level validation failure; the message is shown next to the form.
    #[error("{0}")]
    InvalidInput(&'static str),

    #[error("credentials rejected: {0}")]
    Rejected(String),

    #[error("authentication service unavailable: {0}")]
    Unavailable(String),
}

/// Credential service used by [`AuthStore`].
pub trait Authenticator: Send + Sync {
    fn login<'a>(
        &'a self,
        email: &'a str,
        password: &'a str,
    ) -> BoxFuture<'a, Result<AuthUser, AuthError>>;

    fn register<'a>(
        &'a self,
        name: &'a str,
        email: &'a str,
        password: &'a str,
    ) -> BoxFuture<'a, Result<AuthUser, AuthError>>;
}

/// Mock credential service: waits, then succeeds unconditionally.
#[derive(Debug, Clone)]
pub struct SimulatedAuthenticator {
    login_delay: Duration,
    register_delay: Duration,
}

impl SimulatedAuthenticator {
    /// Registration takes 200 ms longer than login.
    #[must_use]
    pub fn new(login_delay: Duration) -> Self {
        Self {
            login_delay,
            register_delay: login_delay + Duration::from_millis(200),
        }
    }

    #[must_use]
    pub fn instant() -> Self {
        Self {
            login_delay: Duration::ZERO,
            register_delay: Duration::ZERO,
        }
    }
}

impl Default for SimulatedAuthenticator {
    fn default() -> Self {
        Self::new(Duration::from_millis(300))
    }
}

impl Authenticator for SimulatedAuthenticator {
    fn login<'a>(
        &'a self,
        email: &'a str,
        _password: &'a str,
    ) -> BoxFuture<'a, Result<AuthUser, AuthError>> {
        Box::pin(async move {
            tokio::time::sleep(self.login_delay).await;
            Ok(AuthUser {
                name: AuthUser::display_name_from_email(email),
                email: email.to_owned(),
            })
        })
    }

    fn register<'a>(
        &'a self,
        name: &'a str,
        email: &'a str,
        _password: &'a str,
    ) -> BoxFuture<'a, Result<AuthUser, AuthError>> {
        Box::pin(async move {
            tokio::time::sleep(self.register_delay).await;
            let name = if name.is_empty() {
                AuthUser::display_name_from_email(email)
            } else {
                name.to_owned()
            };
            Ok(AuthUser {
                name,
                email: email.to_owned(),
            })
        })
    }
}

/// The single signed-in user, persisted so a restart keeps the session.
pub struct AuthStore {
    storage: Arc<dyn KeyValueStorage>,
    authenticator: Arc<dyn Authenticator>,
    user: Option<AuthUser>,
}

impl AuthStore {
    /// Restores the stored session. Missing, `null` or corrupt data means
    /// signed out.
    #[must_use]
    pub fn load(storage: Arc<dyn KeyValueStorage>, authenticator: Arc<dyn Authenticator>) -> Self {
        let user: Option<AuthUser> = persist::load_or_default(storage.as_ref(), AUTH_KEY);
        Self {
            storage,
            authenticator,
            user,
        }
    }

    #[must_use]
    pub fn user(&self) -> Option<&AuthUser> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// # Errors
    ///
    /// Whatever the [`Authenticator`] reports. The simulated one never fails.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        let user = self.authenticator.login(email, password).await?;
        tracing::info!(email = %user.email, "signed in");
        self.set_user(Some(user.clone()));
        Ok(user)
    }

    /// # Errors
    ///
    /// Whatever the [`Authenticator`] reports. The simulated one never fails.
    pub async fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthUser, AuthError> {
        let user = self.authenticator.register(name, email, password).await?;
        tracing::info!(email = %user.email, "registered");
        self.set_user(Some(user.clone()));
        Ok(user)
    }

    pub fn logout(&mut self) {
        if let Some(user) = &self.user {
            tracing::info!(email = %user.email, "signed out");
        }
        self.set_user(None);
    }

    fn set_user(&mut self, user: Option<AuthUser>) {
        match &user {
            Some(u) => persist::save(self.storage.as_ref(), AUTH_KEY, u),
            None => persist::remove(self.storage.as_ref(), AUTH_KEY),
        }
        self.user = user;
    }
}

/// Login form check: both fields required.
///
/// # Errors
///
/// [`AuthError::InvalidInput`] with the message to show.
pub fn validate_login(email: &str, password: &str) -> Result<(), AuthError> {
    if email.is_empty() || password.is_empty() {
        return Err(AuthError::InvalidInput("Please fill in email and password."));
    }
    Ok(())
}

/// Registration form check: all fields required, passwords must match.
///
/// # Errors
///
/// [`AuthError::InvalidInput`] with the message to show.
pub fn validate_registration(
    name: &str,
    email: &str,
    password: &str,
    confirm: &str,
) -> Result<(), AuthError> {
    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Err(AuthError::InvalidInput("Please fill in all fields."));
    }
    if password != confirm {
        return Err(AuthError::InvalidInput("Passwords do not match."));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn store(storage: &Arc<MemoryStorage>) -> AuthStore {
        AuthStore::load(storage.clone(), Arc::new(SimulatedAuthenticator::instant()))
    }

    #[tokio::test]
    async fn login_derives_name_from_email_and_persists() {
        let storage = Arc::new(MemoryStorage::new());
        let mut auth = store(&storage);
        assert!(!auth.is_authenticated());

        let user = auth.login("bia@example.com", "whatever").await.unwrap();
        assert_eq!(user.name, "bia");
        assert!(auth.is_authenticated());

        let restored = store(&storage);
        assert_eq!(restored.user(), Some(&user));
    }

    #[tokio::test]
    async fn register_keeps_supplied_name() {
        let storage = Arc::new(MemoryStorage::new());
        let mut auth = store(&storage);
        let user = auth.register("Bianca", "bia@example.com", "pw").await.unwrap();
        assert_eq!(user.name, "Bianca");
    }

    #[tokio::test]
    async fn register_without_name_falls_back_to_email() {
        let storage = Arc::new(MemoryStorage::new());
        let mut auth = store(&storage);
        let user = auth.register("", "@example.com", "pw").await.unwrap();
        assert_eq!(user.name, "User");
    }

    #[tokio::test]
    async fn logout_clears_session_and_storage() {
        let storage = Arc::new(MemoryStorage::new());
        let mut auth = store(&storage);
        auth.login("bia@example.com", "pw").await.unwrap();
        auth.logout();
        assert!(auth.user().is_none());
        assert!(storage.get(AUTH_KEY).unwrap().is_none());
        assert!(!store(&storage).is_authenticated());
    }

    #[tokio::test]
    async fn simulated_login_waits_for_delay() {
        let authenticator = SimulatedAuthenticator::new(Duration::from_millis(30));
        let started = std::time::Instant::now();
        authenticator.login("a@b.c", "pw").await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn corrupt_session_loads_signed_out() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(AUTH_KEY, "{\"name\": 1").unwrap();
        assert!(!store(&storage).is_authenticated());

        storage.set(AUTH_KEY, "null").unwrap();
        assert!(!store(&storage).is_authenticated());
    }

    #[test]
    fn login_validation_requires_both_fields() {
        assert_eq!(
            validate_login("", "pw"),
            Err(AuthError::InvalidInput("Please fill in email and password."))
        );
        assert!(validate_login("a@b.c", "pw").is_ok());
    }

    #[test]
    fn registration_validation() {
        assert_eq!(
            validate_registration("Ana", "", "pw", "pw"),
            Err(AuthError::InvalidInput("Please fill in all fields."))
        );
        assert_eq!(
            validate_registration("Ana", "a@b.c", "pw", "px"),
            Err(AuthError::InvalidInput("Passwords do not match."))
        );
        assert!(validate_registration("Ana", "a@b.c", "pw", "pw").is_ok());
    }
}
