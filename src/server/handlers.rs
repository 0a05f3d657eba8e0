// src/server/handlers.rs
//! Request handlers.

use super::error::ServerError;
use super::AppState;
use crate::constants::{BACKGROUND_FILE_NAME, BACKGROUND_MAX_BYTES};
use crate::error::AppError;
use crate::output::{deliver, DeliveryTarget, OutputPlan};
use crate::pipeline::{parse_page_input, PageSnapshot};
use axum::extract::multipart::{Multipart, MultipartError};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Shown at any unmatched path when no front-end build exists.
pub const MISSING_BUILD_MESSAGE: &str =
    "Run \"npm run build\" then \"npm run dev\", or use Vite dev server with proxy.";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page_url: Option<String>,
    pub page_id: Option<String>,
}

impl PageQuery {
    /// The first non-empty of `pageUrl`, `pageId`.
    fn requested_page(self) -> Option<String> {
        [self.page_url, self.page_id]
            .into_iter()
            .flatten()
            .find(|value| !value.trim().is_empty())
    }
}

/// GET /api/page-content
pub async fn page_content(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageSnapshot>, ServerError> {
    let page = query
        .requested_page()
        .or_else(|| state.default_page.clone())
        .ok_or(ServerError::MissingPage)?;
    let pipeline = state.pipeline.as_ref().ok_or(ServerError::MissingToken)?;
    let id = parse_page_input(&page).map_err(|_| ServerError::InvalidPage)?;

    match tokio::time::timeout(state.fetch_timeout, pipeline.snapshot(&id)).await {
        Ok(result) => Ok(Json(result?)),
        Err(_) => Err(AppError::FetchTimeout {
            id: id.to_string(),
            seconds: state.fetch_timeout.as_secs(),
        }
        .into()),
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BackgroundResponse {
    pub url: String,
}

/// POST /api/background (multipart, field `file`, `image/*` only)
pub async fn upload_background(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<BackgroundResponse>, ServerError> {
    let mut image = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let is_image = field
            .content_type()
            .is_some_and(|mime| mime.starts_with("image/"));
        if field.name() != Some("file") || !is_image || image.is_some() {
            continue;
        }

        let bytes = field.bytes().await.map_err(multipart_error)?;
        if bytes.len() > BACKGROUND_MAX_BYTES {
            return Err(ServerError::ImageTooLarge(BACKGROUND_MAX_BYTES));
        }
        image = Some(bytes);
    }

    let bytes = image.ok_or(ServerError::NoImage)?;
    let path = state.public_dir.join(BACKGROUND_FILE_NAME);
    log::info!("Storing {} byte background at {}", bytes.len(), path.display());

    let plan = OutputPlan::new().with_operation(DeliveryTarget::ReplaceFile {
        path,
        bytes: bytes.to_vec(),
    });
    let report = tokio::task::spawn_blocking(move || deliver(plan))
        .await
        .map_err(|e| AppError::Server(format!("upload task failed: {}", e)))?;
    if !report.is_success() {
        let reasons: Vec<String> = report.failed.into_iter().map(|f| f.error).collect();
        return Err(AppError::Server(format!(
            "could not store background: {}",
            reasons.join("; ")
        ))
        .into());
    }

    Ok(Json(BackgroundResponse {
        url: format!(
            "/{}?{}",
            BACKGROUND_FILE_NAME,
            chrono::Utc::now().timestamp_millis()
        ),
    }))
}

fn multipart_error(err: MultipartError) -> ServerError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ServerError::ImageTooLarge(BACKGROUND_MAX_BYTES)
    } else {
        AppError::Upload(err.body_text()).into()
    }
}

/// Serves the front-end entry point for client-side routes.
pub async fn spa_index(index: PathBuf) -> Response {
    match tokio::fs::read_to_string(&index).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            log::debug!("No front-end build at {}: {}", index.display(), e);
            Html(MISSING_BUILD_MESSAGE).into_response()
        }
    }
}
