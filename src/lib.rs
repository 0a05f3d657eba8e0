// src/lib.rs
//! notion-typewriter library: turns a Notion page into one Markdown document.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `NetworkFailure`, `ValidationError`
//! - **Configuration**: `CommandLineInput`, `ServeConfig`, `RenderConfig`
//! - **Domain model**: `Block` and its per-type structs
//! - **Domain types**: `NotionId`, `ApiKey`, `BlockId`, `RichTextItem`
//! - **API client**: `BlockSource`, `NotionHttpClient`, `NotionFetcher`
//! - **Formatting**: `render_blocks`, `render_block`, `TableBuilder`
//! - **Pipeline**: `MarkdownPipeline`, `PageSnapshot`
//! - **Server**: `AppState`, `router`, `run`

pub mod analytics;
pub mod api;
pub mod config;
pub mod constants;
mod error;
pub mod error_recovery;
pub mod formatting;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod server;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AppError, NetworkFailure, NetworkFailureKind, NotionErrorCode};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, Environment, RenderConfig, ServeConfig};

// --- Domain Model ---
pub use crate::model::{Block, BlockCommon};

// --- Block Types ---
pub use crate::model::blocks::{
    BookmarkBlock, BulletedListItemBlock, CalloutBlock, CodeBlock, ColumnBlock, ColumnListBlock,
    DividerBlock, EquationBlock, FileBlock, FileObject, Heading1Block, Heading2Block,
    Heading3Block, Icon, ImageBlock, LinkPreviewBlock, NumberedListItemBlock, ParagraphBlock,
    QuoteBlock, TableBlock, TableRowBlock, TextBlockContent, ToDoBlock, ToggleBlock,
    UnsupportedBlock, VideoBlock,
};

// --- Domain Types ---
pub use crate::types::{Annotations, ApiKey, BlockId, NotionId, RichTextItem};

// --- API Client ---
pub use crate::api::{BlockSource, FetchMetadata, NotionFetcher, NotionHttpClient};

// --- Formatting ---
pub use crate::formatting::{render_block, render_blocks, TableBuilder};

// --- Pipeline ---
pub use crate::pipeline::{content_hash, MarkdownPipeline, PageSnapshot};

// --- Retry ---
pub use crate::error_recovery::RetryPolicy;
