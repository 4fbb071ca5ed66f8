//! The uniform response envelope every endpoint answers with, and its
//! normalized client-side forms.

use serde::Deserialize;

use super::error::{ApiError, ApiResult};

/// Normalized successful response for single-entity and command endpoints.
///
/// `confirmed` records whether the server explicitly sent `succeeded: true`.
/// Some delete endpoints return bodies without the flag; callers that care
/// (the delete flows) downgrade their notice to a warning when it is absent.
#[derive(Debug, Clone)]
pub struct Reply<T> {
    pub status: u16,
    pub message: Option<String>,
    pub data: Option<T>,
    pub confirmed: bool,
}

impl<T> Reply<T> {
    /// The server's message, or the given fallback. Success notices prefer
    /// the server's wording.
    pub fn message_or(&self, fallback: &str) -> String {
        match &self.message {
            Some(m) if !m.is_empty() => m.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn require_data(self) -> ApiResult<T> {
        let status = self.status;
        let message = self.message.unwrap_or_default();
        self.data.ok_or(ApiError::Rejected { status, message })
    }
}

/// Normalized page of a list endpoint.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_number: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub total_count: i64,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub(crate) struct RawEnvelope<T> {
    #[serde(default)]
    pub succeeded: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> RawEnvelope<T> {
    pub(crate) fn into_reply(self, status: u16) -> ApiResult<Reply<T>> {
        if self.succeeded == Some(false) {
            return Err(ApiError::rejected(status, self.message.unwrap_or_default()));
        }
        Ok(Reply {
            status,
            confirmed: self.succeeded.is_some(),
            message: self.message,
            data: self.data,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub(crate) struct RawPagedEnvelope<T> {
    #[serde(default)]
    pub succeeded: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Vec<T>>,
    #[serde(default)]
    pub page_number: Option<u32>,
    #[serde(default)]
    pub page_size: Option<u32>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub total_count: Option<i64>,
    #[serde(default)]
    pub has_previous_page: Option<bool>,
    #[serde(default)]
    pub has_next_page: Option<bool>,
}

impl<T> RawPagedEnvelope<T> {
    /// A list response must both succeed and actually carry an array;
    /// anything else is a rejection the caller surfaces while keeping its
    /// previous items.
    pub(crate) fn into_page(self, status: u16) -> ApiResult<Page<T>> {
        if self.succeeded == Some(false) || self.data.is_none() {
            return Err(ApiError::rejected(status, self.message.unwrap_or_default()));
        }
        let items = self.data.unwrap_or_default();
        Ok(Page {
            page_number: self.page_number.unwrap_or(1),
            page_size: self.page_size.unwrap_or(items.len() as u32),
            total_pages: self.total_pages.unwrap_or(0),
            total_count: self.total_count.unwrap_or(0),
            has_previous_page: self.has_previous_page.unwrap_or(false),
            has_next_page: self.has_next_page.unwrap_or(false),
            items,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn explicit_failure_becomes_rejected() {
        let raw: RawEnvelope<serde_json::Value> =
            serde_json::from_str(r#"{"succeeded":false,"message":"nope"}"#).unwrap();
        let err = raw.into_reply(200).unwrap_err();
        assert_eq!(err.status(), 200);
        assert_eq!(err.user_message(), "nope");
    }

    #[test]
    fn missing_flag_is_unconfirmed_success() {
        let raw: RawEnvelope<serde_json::Value> = serde_json::from_str(r#"{}"#).unwrap();
        let reply = raw.into_reply(200).unwrap();
        assert!(!reply.confirmed);
        assert_eq!(reply.message_or("fallback"), "fallback");
    }

    #[test]
    fn page_requires_a_data_array() {
        let raw: RawPagedEnvelope<serde_json::Value> =
            serde_json::from_str(r#"{"succeeded":true,"message":"hi"}"#).unwrap();
        assert!(raw.into_page(200).is_err());

        let raw: RawPagedEnvelope<serde_json::Value> = serde_json::from_str(
            r#"{"succeeded":true,"data":[1,2],"totalPages":7,"totalCount":50,"pageNumber":2}"#,
        )
        .unwrap();
        let page = raw.into_page(200).unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total_pages, 7);
        assert_eq!(page.page_number, 2);
    }
}
