// src/analytics/mod.rs
//! Content measurement and statistics for block trees.

use crate::model::Block;
use std::collections::BTreeMap;

/// Content breakdown logged after each fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentMeasurement {
    pub total_blocks: usize,
    pub deepest_nesting: usize,
    /// Blocks per API type tag
    pub by_type: BTreeMap<String, usize>,
    /// Blocks without a dedicated rendering rule
    pub unsupported: usize,
    /// Blocks reported with children where none were attached
    pub unexpanded: usize,
}

/// Measures a block forest. Top-level blocks are nesting level 0.
pub fn measure_content(blocks: &[Block]) -> ContentMeasurement {
    let mut metrics = ContentMeasurement::default();
    let mut stack: Vec<(&Block, usize)> = blocks.iter().rev().map(|b| (b, 0)).collect();

    while let Some((block, depth)) = stack.pop() {
        metrics.total_blocks += 1;
        metrics.deepest_nesting = metrics.deepest_nesting.max(depth);
        *metrics.by_type.entry(block.block_type().to_string()).or_default() += 1;

        if matches!(block, Block::Unsupported(_)) {
            metrics.unsupported += 1;
        }
        if block.has_children() && block.children().is_empty() {
            metrics.unexpanded += 1;
        }

        stack.extend(block.children().iter().rev().map(|child| (child, depth + 1)));
    }

    metrics
}
