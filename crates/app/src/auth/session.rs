//! Session state.

use std::{fmt, sync::Arc};

use tokio::sync::watch;
use tracing::{debug, info, warn};
use validator::Validate;

use crate::{
    auth::{
        errors::{AccessDenied, AuthError},
        models::{Credentials, Session, User},
        roles::Screen,
        service::AuthService,
        storage::SessionStorage,
    },
    gateway::ApiError,
};

/// Where the client is in the login lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Nobody is logged in.
    Anonymous,
    /// A login call is in flight.
    Authenticating,
    /// Logged in with this user and token.
    Authenticated(Session),
}

/// Owns the current session and keeps the persisted copy in step with it.
///
/// State changes are published on a watch channel so long-running views can
/// stop when the session ends.
pub struct SessionManager {
    state: watch::Sender<SessionState>,
    storage: Arc<dyn SessionStorage>,
}

impl fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &*self.state.borrow() {
            SessionState::Anonymous => "anonymous",
            SessionState::Authenticating => "authenticating",
            SessionState::Authenticated(_) => "authenticated",
        };

        f.debug_struct("SessionManager")
            .field("state", &state)
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    /// A manager that starts anonymous. Call [`SessionManager::rehydrate`] to restore a saved session.
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            state: watch::Sender::new(SessionState::Anonymous),
            storage,
        }
    }

    /// Restore a persisted session. A corrupt one is discarded.
    pub fn rehydrate(&self) -> bool {
        match self.storage.load() {
            Ok(Some(session)) => {
                debug!(user = %session.user.email, "session restored");
                self.state.send_replace(SessionState::Authenticated(session));
                true
            }
            Ok(None) => false,
            Err(error) => {
                warn!(%error, "discarding unreadable session");
                self.forget();
                false
            }
        }
    }

    /// Log in with the auth service and persist the new session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Rejected`] with the server's message when the
    /// credentials are refused, or [`AuthError::Api`] if the form is invalid
    /// or the server cannot be reached. The state is left anonymous.
    pub async fn login(
        &self,
        auth: &dyn AuthService,
        credentials: &Credentials,
    ) -> Result<User, AuthError> {
        credentials.validate().map_err(ApiError::from)?;

        self.state.send_replace(SessionState::Authenticating);

        match auth.login(credentials).await {
            Ok(session) => {
                if let Err(error) = self.storage.save(&session) {
                    warn!(%error, "session could not be persisted");
                }

                info!(user = %session.user.email, role = %session.user.role, "logged in");

                let user = session.user.clone();
                self.state.send_replace(SessionState::Authenticated(session));

                Ok(user)
            }
            Err(error) => {
                self.state.send_replace(SessionState::Anonymous);

                Err(error.into())
            }
        }
    }

    /// End the session on request.
    pub fn logout(&self) {
        if self.forget() {
            info!("logged out");
        }
    }

    /// End the session because the server rejected it. Returns whether one was active.
    pub fn expire(&self) -> bool {
        self.forget()
    }

    fn forget(&self) -> bool {
        if let Err(error) = self.storage.clear() {
            warn!(%error, "persisted session could not be removed");
        }

        let previous = self.state.send_replace(SessionState::Anonymous);

        matches!(previous, SessionState::Authenticated(_))
    }

    /// Replace the session's user with fresher data for the same user.
    pub fn update_user(&self, user: User) -> bool {
        let mut updated = None;

        self.state.send_if_modified(|state| match state {
            SessionState::Authenticated(session) if session.user.id == user.id => {
                session.user = user;
                updated = Some(session.clone());
                true
            }
            _ => false,
        });

        let Some(session) = updated else {
            return false;
        };

        if let Err(error) = self.storage.save(&session) {
            warn!(%error, "session could not be persisted");
        }

        true
    }

    /// A snapshot of the current state.
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Watch the state for changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Whether someone is logged in.
    pub fn is_authenticated(&self) -> bool {
        matches!(*self.state.borrow(), SessionState::Authenticated(_))
    }

    /// Bearer token of the logged-in user.
    pub fn token(&self) -> Option<String> {
        match &*self.state.borrow() {
            SessionState::Authenticated(session) => Some(session.token.clone()),
            _ => None,
        }
    }

    /// The logged-in user.
    pub fn user(&self) -> Option<User> {
        match &*self.state.borrow() {
            SessionState::Authenticated(session) => Some(session.user.clone()),
            _ => None,
        }
    }

    /// The current user, if they may open `screen`.
    ///
    /// # Errors
    ///
    /// Returns [`AccessDenied::LoginRequired`] when nobody is logged in and
    /// [`AccessDenied::Forbidden`] when the user's role is not allowed.
    pub fn authorize(&self, screen: Screen) -> Result<User, AccessDenied> {
        let user = self.user().ok_or(AccessDenied::LoginRequired)?;

        if !screen.allows(user.role) {
            return Err(AccessDenied::Forbidden(screen));
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::{
        auth::{
            errors::SessionStorageError, roles::Role, service::MockAuthService,
            storage::{MemorySessionStorage, MockSessionStorage},
        },
        test::helpers::{admin_session, cashier_session},
    };

    fn credentials() -> Credentials {
        Credentials {
            email: "admin@revenge.pe".to_string(),
            password: "secret".to_string(),
        }
    }

    #[tokio::test]
    async fn login_persists_and_authenticates() -> TestResult {
        let storage = Arc::new(MemorySessionStorage::default());
        let manager = SessionManager::new(storage.clone());
        let mut auth = MockAuthService::new();

        auth.expect_login()
            .times(1)
            .returning(|_| Ok(admin_session("tok")));

        let user = manager.login(&auth, &credentials()).await?;

        assert_eq!(user.role, Role::Administrator);
        assert_eq!(manager.token().as_deref(), Some("tok"));
        assert_eq!(storage.load()?, Some(admin_session("tok")));

        Ok(())
    }

    #[tokio::test]
    async fn rejected_login_keeps_server_message_and_stays_anonymous() {
        let manager = SessionManager::new(Arc::new(MemorySessionStorage::default()));
        let mut auth = MockAuthService::new();

        auth.expect_login().returning(|_| {
            Err(ApiError::Unauthorized {
                message: "Credenciales inválidas".to_string(),
            })
        });

        let result = manager.login(&auth, &credentials()).await;

        assert!(matches!(result, Err(AuthError::Rejected(m)) if m == "Credenciales inválidas"));
        assert_eq!(manager.state(), SessionState::Anonymous);
    }

    #[tokio::test]
    async fn invalid_form_is_never_sent() {
        let manager = SessionManager::new(Arc::new(MemorySessionStorage::default()));
        let mut auth = MockAuthService::new();

        auth.expect_login().never();

        let result = manager
            .login(
                &auth,
                &Credentials {
                    email: "admin".to_string(),
                    password: String::new(),
                },
            )
            .await;

        assert!(matches!(result, Err(AuthError::Api(ApiError::Validation(_)))));
    }

    #[test]
    fn rehydrate_restores_persisted_session() -> TestResult {
        let storage = Arc::new(MemorySessionStorage::default());
        storage.save(&cashier_session("tok"))?;

        let manager = SessionManager::new(storage);

        assert!(manager.rehydrate());
        assert_eq!(manager.user().map(|u| u.role), Some(Role::Cashier));

        Ok(())
    }

    #[test]
    fn rehydrate_discards_corrupt_session() {
        let mut storage = MockSessionStorage::new();

        storage.expect_load().returning(|| {
            Err(SessionStorageError::Corrupt(serde_json::Error::io(
                std::io::Error::other("truncated"),
            )))
        });
        storage.expect_clear().times(1).returning(|| Ok(()));

        let manager = SessionManager::new(Arc::new(storage));

        assert!(!manager.rehydrate());
        assert!(!manager.is_authenticated());
    }

    #[test]
    fn logout_clears_storage_and_notifies() -> TestResult {
        let storage = Arc::new(MemorySessionStorage::default());
        storage.save(&admin_session("tok"))?;

        let manager = SessionManager::new(storage.clone());
        manager.rehydrate();

        let mut receiver = manager.subscribe();
        receiver.mark_unchanged();

        manager.logout();

        assert!(receiver.has_changed()?);
        assert_eq!(*receiver.borrow_and_update(), SessionState::Anonymous);
        assert_eq!(storage.load()?, None);
        assert!(!manager.expire());

        Ok(())
    }

    #[test]
    fn update_user_only_applies_to_same_user() -> TestResult {
        let storage = Arc::new(MemorySessionStorage::default());
        storage.save(&admin_session("tok"))?;

        let manager = SessionManager::new(storage.clone());
        manager.rehydrate();

        let mut renamed = admin_session("tok").user;
        renamed.name = "Renamed".to_string();

        assert!(manager.update_user(renamed));
        assert_eq!(manager.user().map(|u| u.name), Some("Renamed".to_string()));
        assert_eq!(storage.load()?.map(|s| s.user.name), Some("Renamed".to_string()));

        assert!(!manager.update_user(cashier_session("x").user));

        Ok(())
    }

    #[test]
    fn authorize_distinguishes_login_and_role() -> TestResult {
        let storage = Arc::new(MemorySessionStorage::default());
        let manager = SessionManager::new(storage.clone());

        assert_eq!(
            manager.authorize(Screen::Checkout),
            Err(AccessDenied::LoginRequired)
        );

        storage.save(&cashier_session("tok"))?;
        manager.rehydrate();

        assert!(manager.authorize(Screen::Checkout).is_ok());
        assert_eq!(
            manager.authorize(Screen::Users),
            Err(AccessDenied::Forbidden(Screen::Users))
        );

        Ok(())
    }
}
