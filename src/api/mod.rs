//! Gateway client for the LexiMon REST API.
//!
//! Normalizes every response into [`Reply`]/[`Page`] or an [`ApiError`],
//! attaches the bearer credential, and owns the 401 side effect: clear the
//! session once, bounce to login once. There is no retry policy; callers
//! decide what a failure means for their own state.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

mod envelope;
pub use envelope::{Page, Reply};
pub(crate) use envelope::{RawEnvelope, RawPagedEnvelope};

mod error;
pub use error::{ApiError, ApiResult};

mod form;
pub use form::{FilePart, FormPayload, MAX_IMAGE_BYTES};

mod gateway;
pub use gateway::ApiGateway;

use crate::nav::Navigator;
use crate::notice::Notices;
use crate::session::Session;

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<Session>,
    navigator: Arc<Navigator>,
    notices: Arc<Notices>,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        session: Arc<Session>,
        navigator: Arc<Navigator>,
        notices: Arc<Notices>,
    ) -> ApiResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
            navigator,
            notices,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.session.token() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Send, read the body, and run the 401 interception before anyone looks
    /// at the payload.
    async fn dispatch(&self, req: reqwest::RequestBuilder) -> ApiResult<(u16, String)> {
        let response = self.authorize(req).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        if status == 401 {
            self.session_expired();
        }

        Ok((status, body))
    }

    fn session_expired(&self) {
        if self.session.clear_once() && self.navigator.force_login() {
            self.notices.error("Session expired. Please log in again!");
        }
    }

    /// Non-2xx: salvage the server's message if the body still looks like an
    /// envelope, otherwise synthesize the transport-style text.
    fn rejection(status: u16, body: &str) -> ApiError {
        let message = serde_json::from_str::<RawEnvelope<serde_json::Value>>(body)
            .ok()
            .and_then(|env| env.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("Request failed with status code {status}"));
        ApiError::rejected(status, message)
    }

    fn parse_reply<T: DeserializeOwned>(status: u16, body: &str) -> ApiResult<Reply<T>> {
        if !(200..300).contains(&status) {
            return Err(Self::rejection(status, body));
        }
        let raw: RawEnvelope<T> = serde_json::from_str(body).map_err(ApiError::Decode)?;
        raw.into_reply(status)
    }

    fn parse_page<T: DeserializeOwned>(status: u16, body: &str) -> ApiResult<Page<T>> {
        if !(200..300).contains(&status) {
            return Err(Self::rejection(status, body));
        }
        let raw: RawPagedEnvelope<T> = serde_json::from_str(body).map_err(ApiError::Decode)?;
        raw.into_page(status)
    }
}

#[async_trait]
impl ApiGateway for ApiClient {
    async fn fetch<T: DeserializeOwned + Send>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<Reply<T>> {
        tracing::debug!(%path, "GET");
        let (status, body) = self.dispatch(self.http.get(self.url(path)).query(query)).await?;
        Self::parse_reply(status, &body)
    }

    async fn fetch_page<T: DeserializeOwned + Send>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<Page<T>> {
        tracing::debug!(%path, "GET (paged)");
        let (status, body) = self.dispatch(self.http.get(self.url(path)).query(query)).await?;
        Self::parse_page(status, &body)
    }

    async fn create<B: Serialize + Send + Sync, T: DeserializeOwned + Send>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<Reply<T>> {
        tracing::debug!(%path, "POST");
        let (status, text) = self.dispatch(self.http.post(self.url(path)).json(body)).await?;
        Self::parse_reply(status, &text)
    }

    async fn replace<B: Serialize + Send + Sync, T: DeserializeOwned + Send>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<Reply<T>> {
        tracing::debug!(%path, "PUT");
        let (status, text) = self.dispatch(self.http.put(self.url(path)).json(body)).await?;
        Self::parse_reply(status, &text)
    }

    async fn remove(&self, path: &str) -> ApiResult<Reply<serde_json::Value>> {
        tracing::debug!(%path, "DELETE");
        let (status, body) = self.dispatch(self.http.delete(self.url(path))).await?;
        Self::parse_reply(status, &body)
    }

    async fn create_form(
        &self,
        path: &str,
        form: FormPayload,
    ) -> ApiResult<Reply<serde_json::Value>> {
        tracing::debug!(%path, "POST (multipart)");
        let req = self.http.post(self.url(path)).multipart(form.into_multipart()?);
        let (status, body) = self.dispatch(req).await?;
        Self::parse_reply(status, &body)
    }

    async fn replace_form(
        &self,
        path: &str,
        form: FormPayload,
    ) -> ApiResult<Reply<serde_json::Value>> {
        tracing::debug!(%path, "PUT (multipart)");
        let req = self.http.put(self.url(path)).multipart(form.into_multipart()?);
        let (status, body) = self.dispatch(req).await?;
        Self::parse_reply(status, &body)
    }
}
