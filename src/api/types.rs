// src/api/types.rs
//! Type definitions for the Notion API module.

use crate::error::AppError;
use crate::error_recovery::RetryObserver;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::time::Duration;

/// Result of a fetch operation with metadata.
#[derive(Debug, Clone)]
pub struct FetchResult<T> {
    /// The fetched data
    pub data: T,
    /// Metadata about the fetch operation
    pub metadata: FetchMetadata,
}

/// Metadata about a fetch operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchMetadata {
    /// Page requests that succeeded
    pub requests: u32,
    /// Attempts repeated after a transient failure
    pub retries: u32,
    /// Blocks in the assembled tree
    pub blocks_fetched: usize,
    /// Deepest nesting level reached; top-level blocks are level 0
    pub max_depth_reached: usize,
}

/// Counters shared by one fetch while it runs.
#[derive(Debug, Default)]
pub(crate) struct FetchCounters {
    requests: AtomicU32,
    retries: AtomicU32,
    blocks: AtomicUsize,
    max_depth: AtomicUsize,
}

impl FetchCounters {
    pub fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_block(&self, depth: usize) {
        self.blocks.fetch_add(1, Ordering::Relaxed);
        self.max_depth.fetch_max(depth, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> FetchMetadata {
        FetchMetadata {
            requests: self.requests.load(Ordering::Relaxed),
            retries: self.retries.load(Ordering::Relaxed),
            blocks_fetched: self.blocks.load(Ordering::Relaxed),
            max_depth_reached: self.max_depth.load(Ordering::Relaxed),
        }
    }
}

impl RetryObserver for FetchCounters {
    fn on_retry(&self, _attempt: u32, _delay: Duration, _error: &AppError) {
        self.retries.fetch_add(1, Ordering::Relaxed);
    }
}

/// Result of a pagination operation.
#[derive(Debug, Clone)]
pub struct PaginationResult<T> {
    pub items: Vec<T>,
    pub pages_fetched: u32,
}
