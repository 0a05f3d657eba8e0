// src/pipeline.rs
//! Pipeline stages: fetch a page's block tree, then render it to Markdown.
//!
//! Each trait describes a single capability, enabling testing each stage in
//! isolation. One pass shares no state with any other pass.

use crate::analytics::measure_content;
use crate::api::{BlockSource, FetchMetadata, NotionFetcher};
use crate::error::AppError;
use crate::error_recovery::RetryPolicy;
use crate::formatting::render_blocks;
use crate::model::Block;
use crate::types::NotionId;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::sync::Arc;

/// Retrieves a page's complete block tree.
#[async_trait::async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch(&self, id: &NotionId) -> Result<(Vec<Block>, FetchMetadata), AppError>;
}

/// Turns a block tree into a document.
pub trait MarkdownComposer: Send + Sync {
    fn compose(&self, blocks: &[Block]) -> String;
}

#[async_trait::async_trait]
impl ContentSource for NotionFetcher {
    async fn fetch(&self, id: &NotionId) -> Result<(Vec<Block>, FetchMetadata), AppError> {
        let result = self.fetch_tree(id).await?;
        Ok((result.data, result.metadata))
    }
}

/// The standard renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardComposer;

impl MarkdownComposer for StandardComposer {
    fn compose(&self, blocks: &[Block]) -> String {
        render_blocks(blocks)
    }
}

/// A rendered page and the digest clients compare to detect changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSnapshot {
    pub markdown: String,
    pub content_hash: String,
}

impl PageSnapshot {
    pub fn new(markdown: String) -> Self {
        let content_hash = content_hash(&markdown);
        Self {
            markdown,
            content_hash,
        }
    }
}

/// Lowercase hex SHA-256 of the document.
pub fn content_hash(markdown: &str) -> String {
    format!("{:x}", Sha256::digest(markdown.as_bytes()))
}

/// Fetch-then-render over any content source.
#[derive(Clone)]
pub struct MarkdownPipeline {
    source: Arc<dyn ContentSource>,
    composer: Arc<dyn MarkdownComposer>,
}

impl MarkdownPipeline {
    /// A pipeline fetching from `source` with the default retry policy.
    pub fn new(source: Arc<dyn BlockSource>) -> Self {
        Self::with_policy(source, RetryPolicy::default())
    }

    pub fn with_policy(source: Arc<dyn BlockSource>, policy: RetryPolicy) -> Self {
        Self::from_stages(
            Arc::new(NotionFetcher::with_policy(source, policy)),
            Arc::new(StandardComposer),
        )
    }

    pub fn from_stages(source: Arc<dyn ContentSource>, composer: Arc<dyn MarkdownComposer>) -> Self {
        Self { source, composer }
    }

    /// Resolves a page URL or id, then fetches and renders it.
    ///
    /// A malformed identifier fails before any request is made.
    pub async fn snapshot_input(&self, page: &str) -> Result<PageSnapshot, AppError> {
        let id = parse_page_input(page)?;
        self.snapshot(&id).await
    }

    /// Fetches and renders the page.
    pub async fn snapshot(&self, id: &NotionId) -> Result<PageSnapshot, AppError> {
        let (blocks, metadata) = self.source.fetch(id).await?;
        let measured = measure_content(&blocks);
        log::debug!(
            "Page {}: {} blocks, nesting depth {}, {} requests, {} retries",
            id,
            measured.total_blocks,
            measured.deepest_nesting,
            metadata.requests,
            metadata.retries
        );
        if measured.unsupported > 0 || measured.unexpanded > 0 {
            log::debug!(
                "Page {}: {} unsupported, {} unexpanded, types {:?}",
                id,
                measured.unsupported,
                measured.unexpanded,
                measured.by_type
            );
        }

        let snapshot = PageSnapshot::new(self.composer.compose(&blocks));
        log::info!(
            "Rendered page {} ({} chars, hash {})",
            id,
            snapshot.markdown.chars().count(),
            &snapshot.content_hash[..12]
        );
        Ok(snapshot)
    }
}

/// Normalizes user input into a page id.
pub fn parse_page_input(input: &str) -> Result<NotionId, AppError> {
    NotionId::parse(input).map_err(|e| AppError::MalformedIdentifier(e.to_string()))
}
