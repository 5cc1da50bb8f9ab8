//! HTTP transport.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::{config::ApiConfig, gateway::errors::TransportError};

/// HTTP verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

/// A request relative to the API base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP verb
    pub method: Method,
    /// Path under the base URL, e.g. `productos/7`
    pub path: String,
    /// Query parameters, in order
    pub query: Vec<(String, String)>,
    /// JSON body, if any
    pub body: Option<Value>,
    /// Session token, set by the client just before sending
    pub bearer: Option<String>,
}

impl ApiRequest {
    /// A bodiless request without query parameters.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            bearer: None,
        }
    }
}

/// Raw status and body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status
    pub status: u16,
    /// Body bytes, unparsed
    pub body: Vec<u8>,
}

/// Sends requests to the backend. The seam the gateway tests mock.
#[automock]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and return whatever the server answered, error statuses included.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

/// [`Transport`] over `reqwest`, with the configured timeout on every request.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
    base_url: String,
}

impl HttpTransport {
    /// Build a transport for the configured API.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, TransportError> {
        let http = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = self.url(&request.path);

        let mut builder = match request.method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
            Method::Put => self.http.put(&url),
            Method::Delete => self.http.delete(&url),
        };

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        debug!(method = ?request.method, %url, "sending request");

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        debug!(%url, status, bytes = body.len(), "response received");

        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn joins_base_url_and_path_with_single_slash() -> TestResult {
        let transport = HttpTransport::new(&ApiConfig {
            base_url: "http://localhost:5000/api/".to_string(),
            request_timeout_secs: 10,
        })?;

        assert_eq!(
            transport.url("/productos/3"),
            "http://localhost:5000/api/productos/3"
        );
        assert_eq!(transport.url("ventas"), "http://localhost:5000/api/ventas");

        Ok(())
    }
}
