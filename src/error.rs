// src/error.rs
//! Application error types with structured error handling.
//!
//! Error types form the vocabulary for failure modes in the system.
//! Each variant says what went wrong and where; whether a failure is worth
//! retrying is decided from its structure, never from its message text.

use std::fmt;
use thiserror::Error;

/// Notion API error codes as a typed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotionErrorCode {
    /// API rate limit exceeded
    RateLimited,
    /// The requested object does not exist or is not shared with the integration
    ObjectNotFound,
    /// API key is invalid or expired
    Unauthorized,
    /// API key lacks permission for this resource
    RestrictedResource,
    /// Request parameters failed Notion's validation
    ValidationFailed,
    /// Notion internal server error
    InternalError,
    /// Notion is temporarily unavailable
    ServiceUnavailable,
    /// HTTP status code fallback when the error body is unparseable
    HttpStatus(u16),
    /// An error code this client doesn't recognize yet
    Unknown(String),
}

impl NotionErrorCode {
    /// Parse a Notion API error code string into the typed vocabulary.
    pub fn from_api_response(code: &str) -> Self {
        match code {
            "rate_limited" => Self::RateLimited,
            "object_not_found" => Self::ObjectNotFound,
            "unauthorized" => Self::Unauthorized,
            "restricted_resource" => Self::RestrictedResource,
            "validation_error" => Self::ValidationFailed,
            "internal_server_error" => Self::InternalError,
            "service_unavailable" => Self::ServiceUnavailable,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Create from an HTTP status code when the error body is unparseable.
    pub fn from_http_status(status: u16) -> Self {
        Self::HttpStatus(status)
    }
}

impl fmt::Display for NotionErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited => write!(f, "rate_limited"),
            Self::ObjectNotFound => write!(f, "object_not_found"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::RestrictedResource => write!(f, "restricted_resource"),
            Self::ValidationFailed => write!(f, "validation_error"),
            Self::InternalError => write!(f, "internal_server_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// How a request failed below the HTTP layer.
///
/// The first five kinds are transient: the same request may succeed when
/// repeated. The rest fail immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkFailureKind {
    /// The request or connect phase timed out
    Timeout,
    /// The peer reset or aborted an established connection
    ConnectionReset,
    /// No connection could be established
    ConnectionRefused,
    /// A socket operation was interrupted or would have blocked
    Socket,
    /// The connection closed while the response body was being read
    BodyInterrupted,
    /// The request could not be built (bad URL, bad header)
    InvalidRequest,
    /// Redirect policy violated
    Redirect,
    /// Anything the networking layer reports that fits none of the above
    Other,
}

impl NetworkFailureKind {
    /// Whether repeating the request may succeed.
    pub fn is_transient(self) -> bool {
        matches!(
            self,
            Self::Timeout
                | Self::ConnectionReset
                | Self::ConnectionRefused
                | Self::Socket
                | Self::BodyInterrupted
        )
    }

    /// Classifies an I/O error kind found in a failure's source chain.
    pub fn from_io_kind(kind: std::io::ErrorKind) -> Self {
        use std::io::ErrorKind;

        match kind {
            ErrorKind::TimedOut => Self::Timeout,
            ErrorKind::ConnectionReset | ErrorKind::ConnectionAborted | ErrorKind::BrokenPipe => {
                Self::ConnectionReset
            }
            ErrorKind::ConnectionRefused | ErrorKind::NotConnected | ErrorKind::AddrNotAvailable => {
                Self::ConnectionRefused
            }
            ErrorKind::UnexpectedEof => Self::BodyInterrupted,
            ErrorKind::Interrupted | ErrorKind::WouldBlock => Self::Socket,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for NetworkFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Timeout => "timeout",
            Self::ConnectionReset => "connection reset",
            Self::ConnectionRefused => "connection refused",
            Self::Socket => "socket error",
            Self::BodyInterrupted => "response body interrupted",
            Self::InvalidRequest => "invalid request",
            Self::Redirect => "redirect error",
            Self::Other => "network error",
        };
        f.write_str(label)
    }
}

/// A classified failure of a single request attempt.
#[derive(Error, Debug)]
#[error("{kind}: {source}")]
pub struct NetworkFailure {
    pub kind: NetworkFailureKind,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

impl NetworkFailure {
    pub fn new(
        kind: NetworkFailureKind,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            kind,
            source: source.into(),
        }
    }

    pub fn is_transient(&self) -> bool {
        self.kind.is_transient()
    }
}

impl From<reqwest::Error> for NetworkFailure {
    fn from(err: reqwest::Error) -> Self {
        let kind = classify_reqwest_error(&err);
        Self::new(kind, err)
    }
}

/// Maps a reqwest failure onto the explicit transient/fatal vocabulary.
fn classify_reqwest_error(err: &reqwest::Error) -> NetworkFailureKind {
    if err.is_timeout() {
        return NetworkFailureKind::Timeout;
    }
    if err.is_builder() {
        return NetworkFailureKind::InvalidRequest;
    }
    if err.is_redirect() {
        return NetworkFailureKind::Redirect;
    }
    if let Some(kind) = io_kind_in_chain(err) {
        return NetworkFailureKind::from_io_kind(kind);
    }
    if err.is_connect() {
        return NetworkFailureKind::ConnectionRefused;
    }
    if err.is_body() {
        return NetworkFailureKind::BodyInterrupted;
    }
    if err.is_decode() {
        return NetworkFailureKind::Other;
    }
    if err.is_request() {
        return NetworkFailureKind::Socket;
    }
    NetworkFailureKind::Other
}

/// Finds the first `std::io::Error` in an error's source chain.
fn io_kind_in_chain(err: &(dyn std::error::Error + 'static)) -> Option<std::io::ErrorKind> {
    let mut current = err.source();
    while let Some(cause) = current {
        if let Some(io) = cause.downcast_ref::<std::io::Error>() {
            return Some(io.kind());
        }
        current = cause.source();
    }
    None
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Malformed page identifier: {0}")]
    MalformedIdentifier(String),

    #[error("Notion rejected the credential ({status}): {message}")]
    Auth { status: u16, message: String },

    #[error("Block {id} not found or not shared with the integration: {message}")]
    NotFound { id: String, message: String },

    #[error("Network failure persisted after {attempts} attempts: {source}")]
    TransientNetwork {
        attempts: u32,
        #[source]
        source: NetworkFailure,
    },

    #[error("Network failure: {0}")]
    Network(#[from] NetworkFailure),

    #[error("Notion API returned an error ({status}, {code}): {message}")]
    Api {
        status: u16,
        code: NotionErrorCode,
        message: String,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Fetching page {id} exceeded {seconds}s")]
    FetchTimeout { id: String, seconds: u64 },

    #[error("Upload rejected: {0}")]
    Upload(String),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Server error: {0}")]
    Server(String),

    #[error(transparent)]
    Validation(#[from] crate::types::ValidationError),
}

impl AppError {
    /// Whether the failed request is worth repeating.
    pub fn is_transient(&self) -> bool {
        matches!(self, AppError::Network(failure) if failure.is_transient())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Network(NetworkFailure::from(err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}
