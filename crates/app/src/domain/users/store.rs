//! Users store.

use std::{fmt, sync::Arc};

use validator::Validate;

use crate::{
    auth::{Role, SessionManager, User, UserId},
    domain::{
        result::{ActionFailure, ActionResult},
        store::{Fetched, Insertion, Store},
        users::{
            models::{UserAccount, UserForm},
            service::UsersService,
        },
    },
};

/// User accounts, in server order.
pub struct UsersStore {
    service: Arc<dyn UsersService>,
    session: Arc<SessionManager>,
    store: Store<UserAccount>,
}

impl fmt::Debug for UsersStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UsersStore")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl UsersStore {
    /// An empty store over `service`. Edits to the logged-in account are pushed to `session`.
    pub fn new(service: Arc<dyn UsersService>, session: Arc<SessionManager>) -> Self {
        Self {
            service,
            session,
            store: Store::new("users", Insertion::Append),
        }
    }

    /// Reload every user.
    ///
    /// # Errors
    ///
    /// Returns the failure of the request; cached users are kept.
    pub async fn fetch_all(&self) -> ActionResult<Fetched> {
        self.store.fetch_all(self.service.list_users()).await
    }

    /// Load one user as the current detail.
    ///
    /// # Errors
    ///
    /// Returns the failure of the request.
    pub async fn fetch_one(&self, user: UserId) -> ActionResult<UserAccount> {
        self.store.fetch_one(self.service.get_user(user)).await
    }

    /// Create a user. The form must carry a password.
    ///
    /// # Errors
    ///
    /// Returns a validation failure or the failure of the request.
    pub async fn create(&self, form: UserForm) -> ActionResult<UserAccount> {
        if form.password.as_deref().is_none_or(str::is_empty) {
            return Err(ActionFailure::validation("la contraseña es requerida"));
        }

        form.validate()?;

        self.store.create(self.service.create_user(form)).await
    }

    /// Update a user. Editing yourself refreshes the session's copy.
    ///
    /// # Errors
    ///
    /// Returns a validation failure or the failure of the request.
    pub async fn update(&self, user: UserId, form: UserForm) -> ActionResult<UserAccount> {
        form.validate()?;

        let updated = self
            .store
            .update(user, self.service.update_user(user, form))
            .await?;

        self.session.update_user(User::from(&updated));

        Ok(updated)
    }

    /// Delete a user.
    ///
    /// # Errors
    ///
    /// Returns the failure of the request.
    pub async fn delete(&self, user: UserId) -> ActionResult<()> {
        self.store.delete(user, self.service.delete_user(user)).await
    }

    /// Cached accounts.
    pub fn users(&self) -> Vec<UserAccount> {
        self.store.items()
    }

    /// Cached accounts with `role`.
    pub fn by_role(&self, role: Role) -> Vec<UserAccount> {
        self.store.filter(|user| user.role == role)
    }

    /// Active accounts.
    pub fn active(&self) -> Vec<UserAccount> {
        self.store.filter(|user| user.status.is_active())
    }

    /// The cached account with this id.
    pub fn find(&self, user: UserId) -> Option<UserAccount> {
        self.store.find(user)
    }

    /// The account loaded last by `fetch_one`.
    pub fn current(&self) -> Option<UserAccount> {
        self.store.current()
    }

    /// Whether an action is in flight.
    pub fn is_loading(&self) -> bool {
        self.store.is_loading()
    }

    /// Message of the last failed action.
    pub fn error(&self) -> Option<String> {
        self.store.error()
    }

    /// Forget everything, e.g. on logout.
    pub fn reset(&self) {
        self.store.reset();
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::{
        domain::{result::FailureKind, users::service::MockUsersService},
        test::helpers::{admin_account, authenticated_session},
    };

    fn form(password: Option<&str>) -> UserForm {
        UserForm {
            name: "Admin Renombrado".to_string(),
            email: "admin@revenge.pe".to_string(),
            password: password.map(ToString::to_string),
            role: Role::Administrator,
            status: None,
        }
    }

    #[tokio::test]
    async fn create_requires_password() {
        let mut service = MockUsersService::new();
        service.expect_create_user().never();

        let store = UsersStore::new(Arc::new(service), authenticated_session("tok"));
        let result = store.create(form(None)).await;

        assert!(matches!(result, Err(failure) if failure.kind == FailureKind::Validation));
    }

    #[tokio::test]
    async fn editing_yourself_refreshes_session_user() -> TestResult {
        let session = authenticated_session("tok");
        let mut service = MockUsersService::new();
        service.expect_update_user().returning(|_, form| {
            let mut account = admin_account();
            account.name = form.name;
            Ok(account)
        });

        let store = UsersStore::new(Arc::new(service), Arc::clone(&session));
        store.update(admin_account().id, form(None)).await?;

        assert_eq!(
            session.user().map(|user| user.name),
            Some("Admin Renombrado".to_string())
        );

        Ok(())
    }
}
