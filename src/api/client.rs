// src/api/client.rs
//! Thin HTTP client for the Notion block-children endpoint.
//!
//! Handles authentication headers, query parameters and status mapping.
//! It makes exactly one request per call; retries live one level up.

use super::block_adapter::convert_block;
use super::responses::{ApiErrorBody, PaginatedResponse, RawBlock};
use crate::constants::{
    ERROR_BODY_PREVIEW_LENGTH, NOTION_API_BASE_URL, NOTION_API_PAGE_SIZE, NOTION_API_VERSION,
    NOTION_CONNECT_TIMEOUT_SECS, NOTION_REQUEST_TIMEOUT_SECS,
};
use crate::error::{AppError, NetworkFailure, NotionErrorCode};
use crate::model::Block;
use crate::types::{ApiKey, NotionId};
use reqwest::{header, Client, Response, StatusCode};
use std::time::Duration;

/// A thin wrapper around reqwest Client for Notion API requests.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
    base_url: String,
}

impl std::fmt::Debug for NotionHttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotionHttpClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl NotionHttpClient {
    /// Creates a client for the public Notion API.
    pub fn new(api_key: &ApiKey) -> Result<Self, AppError> {
        Self::with_base_url(api_key, NOTION_API_BASE_URL)
    }

    /// Creates a client against another base URL, such as a local stand-in.
    pub fn with_base_url(api_key: &ApiKey, base_url: &str) -> Result<Self, AppError> {
        Self::with_timeouts(
            api_key,
            base_url,
            Duration::from_secs(NOTION_CONNECT_TIMEOUT_SECS),
            Duration::from_secs(NOTION_REQUEST_TIMEOUT_SECS),
        )
    }

    /// Creates a client whose requests give up after the given limits.
    ///
    /// An expired limit surfaces as a transient `Timeout` failure.
    pub fn with_timeouts(
        api_key: &ApiKey,
        base_url: &str,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(api_key)?)
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()
            .map_err(NetworkFailure::from)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Creates the default headers for Notion API requests.
    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        let mut auth_value = header::HeaderValue::from_str(&auth_header).map_err(|e| {
            AppError::MissingConfiguration(format!("Invalid API token format: {}", e))
        })?;
        auth_value.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth_value);

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_API_VERSION),
        );

        Ok(headers)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Lists one page of a block's direct children.
    pub async fn list_children(
        &self,
        parent: &NotionId,
        cursor: Option<&str>,
    ) -> Result<PaginatedResponse<Block>, AppError> {
        let url = format!("{}/blocks/{}/children", self.base_url, parent.as_str());
        let page_size = NOTION_API_PAGE_SIZE.to_string();

        let mut query: Vec<(&str, &str)> = vec![("page_size", page_size.as_str())];
        if let Some(cursor) = cursor {
            query.push(("start_cursor", cursor));
        }

        log::debug!("GET {} (cursor: {:?})", url, cursor);
        let response = self.client.get(&url).query(&query).send().await?;
        let response = check_status(response, parent).await?;

        let text = response.text().await?;
        let page: PaginatedResponse<RawBlock> = serde_json::from_str(&text).map_err(|e| {
            AppError::MalformedResponse(format!(
                "children of {}: {} (body: {})",
                parent,
                e,
                preview(&text)
            ))
        })?;

        log::debug!(
            "Received {} blocks under {} (more: {})",
            page.results.len(),
            parent,
            page.next_cursor.is_some()
        );
        Ok(page.map(convert_block))
    }
}

#[async_trait::async_trait]
impl super::BlockSource for NotionHttpClient {
    async fn list_children(
        &self,
        parent: &NotionId,
        cursor: Option<&str>,
    ) -> Result<PaginatedResponse<Block>, AppError> {
        NotionHttpClient::list_children(self, parent, cursor).await
    }
}

/// Turns a non-success status into the matching error.
async fn check_status(response: Response, parent: &NotionId) -> Result<Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(status_error(status, &body, parent))
}

/// Maps an HTTP error status and body onto the error vocabulary.
///
/// The message comes from the body's `message` field when present, else
/// `HTTP <status>`.
pub fn status_error(status: StatusCode, body: &str, parent: &NotionId) -> AppError {
    let parsed: Option<ApiErrorBody> = serde_json::from_str(body).ok();
    let message = parsed
        .as_ref()
        .and_then(|b| b.message.clone())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

    log::debug!(
        "Notion answered {} for {}: {}",
        status.as_u16(),
        parent,
        preview(body)
    );

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AppError::Auth {
            status: status.as_u16(),
            message,
        },
        StatusCode::NOT_FOUND => AppError::NotFound {
            id: parent.to_string(),
            message,
        },
        _ => AppError::Api {
            status: status.as_u16(),
            code: parsed
                .and_then(|b| b.code)
                .map(|code| NotionErrorCode::from_api_response(&code))
                .unwrap_or_else(|| NotionErrorCode::from_http_status(status.as_u16())),
            message,
        },
    }
}

fn preview(body: &str) -> String {
    if body.chars().count() <= ERROR_BODY_PREVIEW_LENGTH {
        body.to_string()
    } else {
        let cut: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        format!("{}...", cut)
    }
}
