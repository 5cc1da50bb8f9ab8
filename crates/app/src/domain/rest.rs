//! REST resource helper.
//!
//! Create and update routes answer with the new id or a bare message, never
//! the record itself, so both reload the record before handing it back.

use std::fmt::Display;

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::debug;

use crate::gateway::{ApiClient, ApiError};

/// One backend collection, e.g. `categorias`, with the usual CRUD routes.
#[derive(Debug, Clone)]
pub(crate) struct Resource {
    api: ApiClient,
    path: &'static str,
    id_key: &'static str,
}

impl Resource {
    /// `id_key` names the id field of the create response, e.g. `categoria_id`.
    pub(crate) fn new(api: ApiClient, path: &'static str, id_key: &'static str) -> Self {
        Self { api, path, id_key }
    }

    pub(crate) fn api(&self) -> &ApiClient {
        &self.api
    }

    pub(crate) fn path(&self, suffix: impl Display) -> String {
        format!("{}/{suffix}", self.path)
    }

    pub(crate) async fn list<T: DeserializeOwned>(
        &self,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, ApiError> {
        self.api.get(self.path, query).await
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, id: impl Display) -> Result<T, ApiError> {
        self.api.get(&self.path(id), &[]).await
    }

    /// `POST` a form and return the raw response payload.
    pub(crate) async fn post<B, T>(&self, form: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        self.api.post(self.path, form).await
    }

    /// `POST` a form, then load the record it created.
    pub(crate) async fn create<B, T>(&self, form: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let created: Value = self.post(form).await?;
        let id = created_id(&created, self.id_key)?;

        debug!(resource = self.path, id, "created, reloading");

        self.get(id).await
    }

    /// `PUT` a form, then load the record again.
    pub(crate) async fn update<B, T>(&self, id: impl Display, form: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let path = self.path(&id);
        let _ignored: Value = self.api.put(&path, form).await?;

        self.api.get(&path, &[]).await
    }

    pub(crate) async fn delete(&self, id: impl Display) -> Result<(), ApiError> {
        self.api.delete(&self.path(id)).await
    }
}

/// The id in a create response: `{<key>: n}`, `{id: n}` or a bare number.
/// Without one the record was created but cannot be located.
pub(crate) fn created_id(data: &Value, key: &str) -> Result<u64, ApiError> {
    let id = match data {
        Value::Object(map) => map.get(key).or_else(|| map.get("id")),
        other => Some(other),
    };

    id.and_then(|id| {
        id.as_u64()
            .or_else(|| id.as_str().and_then(|text| text.parse().ok()))
    })
    .ok_or_else(|| ApiError::Unconfirmed(format!("the response did not include `{key}`")))
}
