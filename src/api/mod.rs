// src/api/mod.rs
//! Notion API interaction: the ability to retrieve a page's content tree.
//!
//! I/O, wire parsing and tree assembly are kept apart. Business logic
//! depends on [`BlockSource`], never on HTTP details.

mod block_adapter;
pub mod client;
mod fetcher;
mod responses;
mod simple_pagination;
mod types;

use crate::error::AppError;
use crate::model::Block;
use crate::types::NotionId;

/// The ability to list the direct children of a block, one page at a time.
///
/// A page id is a valid block id: listing a page's children yields its
/// top-level content.
#[async_trait::async_trait]
pub trait BlockSource: Send + Sync {
    async fn list_children(
        &self,
        parent: &NotionId,
        cursor: Option<&str>,
    ) -> Result<PaginatedResponse<Block>, AppError>;
}

// Re-export the public interface
pub use block_adapter::convert_block;
pub use client::NotionHttpClient;
pub use fetcher::NotionFetcher;
pub use responses::{PaginatedResponse, RawBlock};
pub use simple_pagination::fetch_all_pages_simple;
pub use types::{FetchMetadata, FetchResult, PaginationResult};
