//! API client.

use std::{fmt, sync::Arc};

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{error, warn};

use crate::{
    auth::SessionManager,
    gateway::{
        envelope::{Envelope, failure_message},
        errors::ApiError,
        transport::{ApiRequest, ApiResponse, Method, Transport},
    },
};

/// Every backend call goes through here.
///
/// Adds the bearer token of the current session, unwraps the response
/// envelope and expires the session when the server answers 401, whichever
/// caller triggered it.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    session: Arc<SessionManager>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// A client sending through `transport` with the token of `session`.
    pub fn new(transport: Arc<dyn Transport>, session: Arc<SessionManager>) -> Self {
        Self { transport, session }
    }

    /// `GET` a resource.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] when the call fails at any level.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let mut request = ApiRequest::new(Method::Get, path);
        request.query = owned_query(query);

        self.call(request).await
    }

    /// `POST` a body.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] when the call fails at any level. A 2xx answer
    /// that cannot be read is [`ApiError::Unconfirmed`], since the write
    /// already happened.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = ApiRequest::new(Method::Post, path);
        request.body = Some(encode(body)?);

        self.call(request).await.map_err(|error| match error {
            ApiError::Decode(message) => {
                warn!(%path, %message, "accepted write with an unreadable answer");
                ApiError::Unconfirmed(message)
            }
            other => other,
        })
    }

    /// `PUT` a body.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] when the call fails at any level.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = ApiRequest::new(Method::Put, path);
        request.body = Some(encode(body)?);

        self.call(request).await
    }

    /// `DELETE` a resource, ignoring any payload.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] when the call fails at any level.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self.dispatch(ApiRequest::new(Method::Delete, path)).await?;

        Envelope::parse(&response.body)?
            .into_data(response.status)
            .map(|_data| ())
    }

    /// `GET` a binary resource such as a PDF.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] when the call fails at any level.
    pub async fn download(&self, path: &str, query: &[(&str, String)]) -> Result<Vec<u8>, ApiError> {
        let mut request = ApiRequest::new(Method::Get, path);
        request.query = owned_query(query);

        Ok(self.dispatch(request).await?.body)
    }

    async fn call<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let response = self.dispatch(request).await?;
        let data = Envelope::parse(&response.body)?.into_data(response.status)?;

        serde_json::from_value(data).map_err(|error| ApiError::Decode(error.to_string()))
    }

    async fn dispatch(&self, mut request: ApiRequest) -> Result<ApiResponse, ApiError> {
        request.bearer = self.session.token();

        let path = request.path.clone();
        let response = self.transport.send(request).await.inspect_err(|error| {
            warn!(%path, %error, "request did not reach the server");
        })?;

        if (200..300).contains(&response.status) {
            return Ok(response);
        }

        let status = response.status;
        let message = Envelope::parse(&response.body)
            .ok()
            .and_then(|envelope| envelope.message().map(ToString::to_string))
            .unwrap_or_else(|| failure_message(status).to_string());

        if status == 401 {
            if self.session.expire() {
                warn!(%path, "session rejected by the server, logged out");
            }

            return Err(ApiError::Unauthorized { message });
        }

        if status >= 500 {
            error!(%path, status, %message, "server error");
        } else {
            warn!(%path, status, %message, "request rejected");
        }

        Err(ApiError::Rejected { status, message })
    }
}

fn owned_query(query: &[(&str, String)]) -> Vec<(String, String)> {
    query
        .iter()
        .map(|(key, value)| ((*key).to_string(), value.clone()))
        .collect()
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|error| ApiError::Encode(error.to_string()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;
    use crate::{
        auth::SessionState,
        gateway::{errors::TransportError, transport::MockTransport},
        test::helpers::{authenticated_session, json_response},
    };

    #[tokio::test]
    async fn sends_bearer_token_and_unwraps_data() -> TestResult {
        let session = authenticated_session("tok-1");
        let mut transport = MockTransport::new();

        transport
            .expect_send()
            .withf(|request| {
                request.method == Method::Get
                    && request.path == "categorias"
                    && request.bearer.as_deref() == Some("tok-1")
            })
            .times(1)
            .returning(|_| Ok(json_response(200, &json!({"success": true, "data": [1, 2, 3]}))));

        let client = ApiClient::new(Arc::new(transport), session);
        let data: Vec<u32> = client.get("categorias", &[]).await?;

        assert_eq!(data, [1, 2, 3]);

        Ok(())
    }

    #[tokio::test]
    async fn unauthorized_response_expires_session() -> TestResult {
        let session = authenticated_session("stale");
        let mut transport = MockTransport::new();

        transport.expect_send().returning(|_| {
            Ok(json_response(401, &json!({"error": true, "message": "Token expirado"})))
        });

        let client = ApiClient::new(Arc::new(transport), Arc::clone(&session));
        let result: Result<Value, _> = client.get("productos", &[]).await;

        assert!(matches!(
            result,
            Err(ApiError::Unauthorized { message }) if message == "Token expirado"
        ));
        assert!(matches!(session.state(), SessionState::Anonymous));
        assert_eq!(session.token(), None);

        Ok(())
    }

    #[tokio::test]
    async fn business_rejection_keeps_server_message() -> TestResult {
        let mut transport = MockTransport::new();

        transport.expect_send().returning(|_| {
            Ok(json_response(400, &json!({"success": false, "message": "El código de barras ya existe"})))
        });

        let client = ApiClient::new(Arc::new(transport), authenticated_session("tok"));
        let result: Result<Value, _> = client.post("productos", &json!({})).await;

        assert!(matches!(
            result,
            Err(ApiError::Rejected { status: 400, message }) if message == "El código de barras ya existe"
        ));

        Ok(())
    }

    #[tokio::test]
    async fn accepted_post_with_unreadable_answer_is_unconfirmed() -> TestResult {
        let mut transport = MockTransport::new();

        transport.expect_send().times(1).returning(|_| {
            Ok(json_response(201, &json!({"success": true, "data": {"venta_id": 15}})))
        });

        let client = ApiClient::new(Arc::new(transport), authenticated_session("tok"));
        let result: Result<Vec<u32>, _> = client.post("ventas", &json!({})).await;

        assert!(matches!(result, Err(ApiError::Unconfirmed(_))));

        Ok(())
    }

    #[tokio::test]
    async fn server_error_without_body_gets_generic_message() -> TestResult {
        let mut transport = MockTransport::new();

        transport.expect_send().returning(|_| {
            Ok(ApiResponse {
                status: 502,
                body: b"Bad Gateway".to_vec(),
            })
        });

        let client = ApiClient::new(Arc::new(transport), authenticated_session("tok"));
        let result = client.delete("usuarios/2").await;

        assert!(matches!(
            result,
            Err(ApiError::Rejected { status: 502, message }) if message == failure_message(502)
        ));

        Ok(())
    }

    #[tokio::test]
    async fn transport_failure_is_surfaced() -> TestResult {
        let mut transport = MockTransport::new();

        transport
            .expect_send()
            .returning(|_| Err(TransportError::Timeout));

        let client = ApiClient::new(Arc::new(transport), authenticated_session("tok"));
        let result: Result<Value, _> = client.get("ventas", &[]).await;

        assert!(matches!(
            result,
            Err(ApiError::Transport(TransportError::Timeout))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn query_parameters_are_forwarded() -> TestResult {
        let mut transport = MockTransport::new();

        transport
            .expect_send()
            .withf(|request| request.query == [("codigo".to_string(), "775001".to_string())])
            .returning(|_| Ok(json_response(200, &json!({"success": true, "data": null}))));

        let client = ApiClient::new(Arc::new(transport), authenticated_session("tok"));
        let data: Option<Value> = client
            .get("productos/buscar", &[("codigo", "775001".to_string())])
            .await?;

        assert_eq!(data, None);

        Ok(())
    }

    #[tokio::test]
    async fn download_returns_raw_bytes() -> TestResult {
        let mut transport = MockTransport::new();

        transport.expect_send().returning(|_| {
            Ok(ApiResponse {
                status: 200,
                body: b"%PDF-1.4".to_vec(),
            })
        });

        let client = ApiClient::new(Arc::new(transport), authenticated_session("tok"));

        assert_eq!(client.download("reportes/inventario/pdf", &[]).await?, b"%PDF-1.4");

        Ok(())
    }
}
