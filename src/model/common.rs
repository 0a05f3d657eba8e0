use super::Block;
use crate::types::BlockId;

/// Common fields for all blocks
#[derive(Debug, Clone, PartialEq)]
pub struct BlockCommon {
    pub id: BlockId,
    /// Set by the API; children themselves arrive through a separate request.
    pub has_children: bool,
    /// Empty until the fetcher expands this block.
    pub children: Vec<Block>,
}

impl BlockCommon {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: BlockId::new(id),
            has_children: false,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<Block>) -> Self {
        self.has_children = !children.is_empty();
        self.children = children;
        self
    }
}
