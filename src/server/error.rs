// src/server/error.rs
//! Request-level failures and their JSON responses.

use crate::config::{PAGE_VARIABLES, TOKEN_VARIABLES};
use crate::error::AppError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Everything a handler can fail with.
///
/// Every variant renders as `{"error": "<message>"}` with its own status.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Missing pageUrl or pageId (query or env {} / {})", PAGE_VARIABLES[0], PAGE_VARIABLES[1])]
    MissingPage,

    #[error("{} not set", TOKEN_VARIABLES[0])]
    MissingToken,

    #[error("Invalid pageUrl or pageId")]
    InvalidPage,

    #[error("No image file (use field name \"file\")")]
    NoImage,

    #[error("Image larger than {0} bytes")]
    ImageTooLarge(usize),

    #[error(transparent)]
    App(#[from] AppError),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::MissingPage | ServerError::InvalidPage | ServerError::NoImage => {
                StatusCode::BAD_REQUEST
            }
            ServerError::ImageTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ServerError::MissingToken => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::App(AppError::FetchTimeout { .. }) => StatusCode::GATEWAY_TIMEOUT,
            ServerError::App(AppError::MalformedIdentifier(_)) => StatusCode::BAD_REQUEST,
            ServerError::App(AppError::Upload(_)) => StatusCode::BAD_REQUEST,
            ServerError::App(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{}", self);
        } else {
            log::warn!("{}", self);
        }

        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
