//! Auth service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::models::{Credentials, LoginData, Session},
    gateway::{ApiClient, ApiError},
};

/// Login against the backend.
#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchange credentials for a user and bearer token.
    async fn login(&self, credentials: &Credentials) -> Result<Session, ApiError>;
}

/// [`AuthService`] backed by `POST auth/login`.
#[derive(Debug, Clone)]
pub struct HttpAuthService {
    api: ApiClient,
}

impl HttpAuthService {
    /// A service over `api`.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AuthService for HttpAuthService {
    async fn login(&self, credentials: &Credentials) -> Result<Session, ApiError> {
        let data: LoginData = self.api.post("auth/login", credentials).await?;

        Ok(data.into())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use testresult::TestResult;

    use super::*;
    use crate::{
        auth::{SessionManager, roles::Role, storage::MemorySessionStorage},
        gateway::transport::{Method, MockTransport},
        test::helpers::json_response,
    };

    #[tokio::test]
    async fn posts_credentials_without_bearer_and_reads_flat_user() -> TestResult {
        let mut transport = MockTransport::new();

        transport
            .expect_send()
            .withf(|request| {
                request.method == Method::Post
                    && request.path == "auth/login"
                    && request.bearer.is_none()
                    && request
                        .body
                        .as_ref()
                        .is_some_and(|body| body["email"] == "caja@revenge.pe")
            })
            .times(1)
            .returning(|_| {
                Ok(json_response(
                    200,
                    &json!({
                        "id": 2,
                        "nombre": "Caja Uno",
                        "email": "caja@revenge.pe",
                        "rol_id": 2,
                        "rol_nombre": "Cajero",
                        "estado": "Activo",
                        "token": "jwt-2"
                    }),
                ))
            });

        let session = Arc::new(SessionManager::new(Arc::new(
            MemorySessionStorage::default(),
        )));
        let service = HttpAuthService::new(ApiClient::new(Arc::new(transport), session));

        let login = service
            .login(&Credentials {
                email: "caja@revenge.pe".to_string(),
                password: "secret".to_string(),
            })
            .await?;

        assert_eq!(login.token, "jwt-2");
        assert_eq!(login.user.role, Role::Cashier);

        Ok(())
    }
}
