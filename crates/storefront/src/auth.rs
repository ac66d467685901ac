//! Demo single-user authentication session.
//!
//! The app ships with exactly one hardcoded credential and no identity
//! backend; "authentication" gates the UI and nothing else. The session
//! follows the same `loading -> ready` pattern as the cart store: the
//! persisted profile (if any) restores a signed-in user, and load failures
//! recover to signed-out.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::storage::KeyValueStorage;

/// Storage key the signed-in profile lives under.
pub const AUTH_STORAGE_KEY: &str = "KopiKU_Auth";

const DEMO_EMAIL: &str = "user@gmail.com";
const DEMO_PASSWORD: &str = "password";
const DEMO_NAME: &str = "Bakti";

/// Errors that can occur during sign-in.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email/password pair does not match the demo credential.
    #[error("invalid credentials")]
    InvalidCredentials,
}

/// The signed-in user's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name.
    pub name: String,
    /// Sign-in email.
    pub email: String,
}

/// Owns the signed-in state and mirrors it to a storage key.
pub struct AuthSession {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
    user: Option<UserProfile>,
    ready: bool,
}

impl AuthSession {
    /// Create a session in the `loading` state, signed out.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            storage,
            key: AUTH_STORAGE_KEY.to_string(),
            user: None,
            ready: false,
        }
    }

    /// Construct and immediately load: the session is `ready` on return.
    pub async fn open(storage: Arc<dyn KeyValueStorage>) -> Self {
        let mut session = Self::new(storage);
        session.load().await;
        session
    }

    /// Restore the persisted profile, if any. Failures are logged and
    /// leave the session signed out. A no-op once `ready`.
    pub async fn load(&mut self) {
        if self.ready {
            return;
        }

        match self.storage.get(&self.key).await {
            Ok(Some(bytes)) => match serde_json::from_slice::<UserProfile>(&bytes) {
                Ok(user) => self.user = Some(user),
                Err(e) => {
                    warn!(error = %e, key = %self.key, "Stored profile is malformed, staying signed out");
                }
            },
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, key = %self.key, "Failed to read profile from storage, staying signed out");
            }
        }

        self.ready = true;
    }

    /// Sign in with the demo credential.
    ///
    /// On success the profile is set and persisted; a failed persist is
    /// logged but does not fail the sign-in (the session simply will not
    /// survive a restart).
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] when the pair does not
    /// match.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<UserProfile, AuthError> {
        if email != DEMO_EMAIL || password != DEMO_PASSWORD {
            return Err(AuthError::InvalidCredentials);
        }

        let user = UserProfile {
            name: DEMO_NAME.to_string(),
            email: DEMO_EMAIL.to_string(),
        };

        match serde_json::to_vec(&user) {
            Ok(bytes) => {
                if let Err(e) = self.storage.set(&self.key, bytes).await {
                    warn!(error = %e, key = %self.key, "Failed to persist profile, session will not survive restart");
                }
            }
            Err(e) => {
                warn!(error = %e, key = %self.key, "Failed to serialize profile for persistence");
            }
        }

        self.user = Some(user.clone());
        Ok(user)
    }

    /// Sign out and remove the persisted profile. Removal failures are
    /// logged and swallowed.
    pub async fn logout(&mut self) {
        self.user = None;
        if let Err(e) = self.storage.remove(&self.key).await {
            warn!(error = %e, key = %self.key, "Failed to remove persisted profile");
        }
    }

    /// The signed-in profile, or `None` when signed out.
    #[must_use]
    pub const fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    /// Whether the initial load has completed.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[tokio::test]
    async fn fresh_session_is_signed_out_and_ready_after_load() {
        let session = AuthSession::open(Arc::new(MemoryStorage::new())).await;
        assert!(session.is_ready());
        assert!(session.user().is_none());
    }

    #[tokio::test]
    async fn login_rejects_wrong_credentials() {
        let mut session = AuthSession::open(Arc::new(MemoryStorage::new())).await;

        let result = session.login("user@gmail.com", "wrong").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
        assert!(session.user().is_none());
    }

    #[tokio::test]
    async fn login_sets_and_persists_the_profile() {
        let storage = Arc::new(MemoryStorage::new());
        let mut session = AuthSession::open(Arc::clone(&storage) as Arc<dyn KeyValueStorage>).await;

        let user = session
            .login("user@gmail.com", "password")
            .await
            .expect("demo credential");
        assert_eq!(user.name, "Bakti");

        let blob = storage
            .get(AUTH_STORAGE_KEY)
            .await
            .expect("get")
            .expect("profile persisted");
        let persisted: UserProfile = serde_json::from_slice(&blob).expect("parse");
        assert_eq!(persisted.email, "user@gmail.com");
    }

    #[tokio::test]
    async fn session_survives_a_restart() {
        let storage = Arc::new(MemoryStorage::new());

        let mut first = AuthSession::open(Arc::clone(&storage) as Arc<dyn KeyValueStorage>).await;
        first
            .login("user@gmail.com", "password")
            .await
            .expect("demo credential");
        drop(first);

        let second = AuthSession::open(storage).await;
        assert_eq!(
            second.user().map(|u| u.name.as_str()),
            Some("Bakti")
        );
    }

    #[tokio::test]
    async fn logout_clears_state_and_storage() {
        let storage = Arc::new(MemoryStorage::new());
        let mut session = AuthSession::open(Arc::clone(&storage) as Arc<dyn KeyValueStorage>).await;

        session
            .login("user@gmail.com", "password")
            .await
            .expect("demo credential");
        session.logout().await;

        assert!(session.user().is_none());
        assert!(storage.get(AUTH_STORAGE_KEY).await.expect("get").is_none());
    }

    #[tokio::test]
    async fn malformed_profile_recovers_to_signed_out() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .set(AUTH_STORAGE_KEY, b"{broken".to_vec())
            .await
            .expect("seed");

        let session = AuthSession::open(storage).await;
        assert!(session.is_ready());
        assert!(session.user().is_none());
    }
}
