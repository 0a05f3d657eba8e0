// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role. Reading these constants should tell you how the system
//! talks to Notion, how it retries, and what the rendered Markdown looks like.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// Base URL of the public Notion REST API.
pub const NOTION_API_BASE_URL: &str = "https://api.notion.com/v1";

/// Protocol version sent in the `Notion-Version` header on every request.
pub const NOTION_API_VERSION: &str = "2022-06-28";

/// How many child blocks the Notion API returns per page of results.
///
/// The Notion API maximum is 100. We use the maximum to minimize
/// round-trips during recursive fetching.
pub const NOTION_API_PAGE_SIZE: usize = 100;

/// Time allowed to establish a connection to the Notion API.
pub const NOTION_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Time allowed for one Notion request, from sending to the end of the body.
pub const NOTION_REQUEST_TIMEOUT_SECS: u64 = 30;

// ---------------------------------------------------------------------------
// Retry policy
// ---------------------------------------------------------------------------

/// Total attempts made for one page request when the failure is transient.
pub const FETCH_MAX_ATTEMPTS: u32 = 3;

/// Backoff unit; the wait after attempt `n` is `n * FETCH_BACKOFF_UNIT_MS`.
pub const FETCH_BACKOFF_UNIT_MS: u64 = 1000;

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// One level of list indentation in the rendered Markdown.
pub const INDENT_UNIT: &str = "  ";

/// Emoji used for callouts without an emoji icon.
pub const CALLOUT_DEFAULT_EMOJI: &str = "💡";

/// Placeholder emitted for a table with no renderable rows.
pub const TABLE_PLACEHOLDER: &str = "[表格]";

/// Link text used for link previews, which carry no caption.
pub const LINK_PREVIEW_LABEL: &str = "链接";

/// Alt text used for images without a caption.
pub const IMAGE_DEFAULT_ALT: &str = "image";

/// Estimated characters per block, used to pre-allocate output strings.
///
/// This is a performance hint, not a constraint.
pub const CHARS_PER_BLOCK_ESTIMATE: usize = 256;

// ---------------------------------------------------------------------------
// HTTP collaborator
// ---------------------------------------------------------------------------

/// Default listening port for `serve`.
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Default upper bound on one fetch-render pass triggered by a request.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 60;

/// File name under the public directory where the uploaded background lives.
pub const BACKGROUND_FILE_NAME: &str = "background.jpg";

/// Largest accepted background upload.
pub const BACKGROUND_MAX_BYTES: usize = 10 * 1024 * 1024;

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
