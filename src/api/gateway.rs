use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::envelope::{Page, Reply};
use super::error::ApiResult;
use super::form::FormPayload;

/// The one seam every controller talks through. [`super::ApiClient`] is the
/// real implementation; tests drive controllers with recorded fakes.
#[async_trait]
pub trait ApiGateway: Send + Sync {
    /// GET a single-entity (or plain-array) endpoint.
    async fn fetch<T: DeserializeOwned + Send>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<Reply<T>>;

    /// GET a list endpoint carrying pagination fields beside `data`.
    async fn fetch_page<T: DeserializeOwned + Send>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<Page<T>>;

    async fn create<B: Serialize + Send + Sync, T: DeserializeOwned + Send>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<Reply<T>>;

    async fn replace<B: Serialize + Send + Sync, T: DeserializeOwned + Send>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<Reply<T>>;

    async fn remove(&self, path: &str) -> ApiResult<Reply<serde_json::Value>>;

    async fn create_form(&self, path: &str, form: FormPayload)
    -> ApiResult<Reply<serde_json::Value>>;

    async fn replace_form(
        &self,
        path: &str,
        form: FormPayload,
    ) -> ApiResult<Reply<serde_json::Value>>;
}
