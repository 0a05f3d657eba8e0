// src/api/fetcher.rs
//! Recursive retrieval of a page's block tree.
//!
//! Children are fetched one subtree at a time, depth first, so the order of
//! the assembled tree always matches the order the API served. Nesting is
//! walked with an explicit work list instead of recursion; arbitrarily deep
//! pages cannot exhaust the call stack.

use super::simple_pagination::fetch_all_pages_simple;
use super::types::{FetchCounters, FetchResult};
use super::BlockSource;
use crate::error::AppError;
use crate::error_recovery::{retry_transient, RetryPolicy};
use crate::model::Block;
use crate::types::NotionId;
use std::sync::Arc;

/// Fetches complete block trees from a [`BlockSource`].
#[derive(Clone)]
pub struct NotionFetcher {
    source: Arc<dyn BlockSource>,
    policy: RetryPolicy,
}

/// A block whose children are being collected.
struct Frame {
    parent: Option<Block>,
    pending: std::vec::IntoIter<Block>,
    done: Vec<Block>,
    depth: usize,
}

impl Frame {
    fn new(parent: Option<Block>, children: Vec<Block>, depth: usize) -> Self {
        Self {
            parent,
            done: Vec::with_capacity(children.len()),
            pending: children.into_iter(),
            depth,
        }
    }
}

impl NotionFetcher {
    pub fn new(source: Arc<dyn BlockSource>) -> Self {
        Self::with_policy(source, RetryPolicy::default())
    }

    pub fn with_policy(source: Arc<dyn BlockSource>, policy: RetryPolicy) -> Self {
        Self { source, policy }
    }

    /// Fetches the top-level blocks of `root` with every descendant attached.
    ///
    /// Any failure that survives the retry policy aborts the whole fetch.
    pub async fn fetch_tree(&self, root: &NotionId) -> Result<FetchResult<Vec<Block>>, AppError> {
        log::info!("Fetching block tree of {}", root);
        let counters = FetchCounters::default();

        let top_level = self.fetch_children(root, &counters).await?;
        let mut stack = vec![Frame::new(None, top_level, 0)];

        while let Some(frame) = stack.last_mut() {
            if let Some(block) = frame.pending.next() {
                let depth = frame.depth;
                counters.record_block(depth);

                if !block.has_children() {
                    frame.done.push(block);
                    continue;
                }

                let id = block.id().to_notion_id().map_err(|e| {
                    AppError::MalformedResponse(format!(
                        "block {} has children but an unusable id: {}",
                        block.id(),
                        e
                    ))
                })?;
                let children = self.fetch_children(&id, &counters).await?;
                stack.push(Frame::new(Some(block), children, depth + 1));
                continue;
            }

            let Some(Frame { parent, done, .. }) = stack.pop() else {
                break;
            };
            match parent {
                Some(mut parent) => {
                    parent.set_children(done);
                    if let Some(outer) = stack.last_mut() {
                        outer.done.push(parent);
                    }
                }
                None => {
                    let metadata = counters.snapshot();
                    log::info!(
                        "Fetched {} blocks in {} requests ({} retries, depth {})",
                        metadata.blocks_fetched,
                        metadata.requests,
                        metadata.retries,
                        metadata.max_depth_reached
                    );
                    return Ok(FetchResult {
                        data: done,
                        metadata,
                    });
                }
            }
        }

        Ok(FetchResult {
            data: Vec::new(),
            metadata: counters.snapshot(),
        })
    }

    /// Fetches every page of `parent`'s direct children, retrying each page.
    async fn fetch_children(
        &self,
        parent: &NotionId,
        counters: &FetchCounters,
    ) -> Result<Vec<Block>, AppError> {
        let source = self.source.as_ref();
        let policy = self.policy;

        let result = fetch_all_pages_simple(|cursor: Option<String>| async move {
            let page = retry_transient(
                || source.list_children(parent, cursor.as_deref()),
                policy,
                counters,
            )
            .await?;
            counters.record_request();
            Ok(page)
        })
        .await?;

        log::debug!(
            "{} children under {} across {} pages",
            result.items.len(),
            parent,
            result.pages_fetched
        );
        Ok(result.items)
    }
}
