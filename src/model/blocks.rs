use super::common::BlockCommon;
use crate::types::RichTextItem;
use serde::Deserialize;

/// Text content block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextBlockContent {
    pub rich_text: Vec<RichTextItem>,
}

impl TextBlockContent {
    pub fn new(rich_text: Vec<RichTextItem>) -> Self {
        Self { rich_text }
    }
}

/// Paragraph block
#[derive(Debug, Clone, PartialEq)]
pub struct ParagraphBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

/// Heading 1 block
#[derive(Debug, Clone, PartialEq)]
pub struct Heading1Block {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

/// Heading 2 block
#[derive(Debug, Clone, PartialEq)]
pub struct Heading2Block {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

/// Heading 3 block
#[derive(Debug, Clone, PartialEq)]
pub struct Heading3Block {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

/// Bulleted list item block
#[derive(Debug, Clone, PartialEq)]
pub struct BulletedListItemBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

/// Numbered list item block
#[derive(Debug, Clone, PartialEq)]
pub struct NumberedListItemBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

/// Toggle block
#[derive(Debug, Clone, PartialEq)]
pub struct ToggleBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

/// To-do block
#[derive(Debug, Clone, PartialEq)]
pub struct ToDoBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
    pub checked: bool,
}

/// Quote block
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

/// Callout block
#[derive(Debug, Clone, PartialEq)]
pub struct CalloutBlock {
    pub common: BlockCommon,
    pub icon: Option<Icon>,
    pub content: TextBlockContent,
}

/// Icon types
#[derive(Debug, Clone, PartialEq)]
pub enum Icon {
    Emoji(String),
    /// An uploaded or external image; has no Markdown rendering of its own.
    Image { url: String },
}

impl Icon {
    pub fn emoji(&self) -> Option<&str> {
        match self {
            Icon::Emoji(emoji) => Some(emoji),
            Icon::Image { .. } => None,
        }
    }
}

/// Code block
#[derive(Debug, Clone, PartialEq)]
pub struct CodeBlock {
    pub common: BlockCommon,
    pub language: String,
    pub content: TextBlockContent,
}

/// Equation block
#[derive(Debug, Clone, PartialEq)]
pub struct EquationBlock {
    pub common: BlockCommon,
    pub expression: String,
}

/// Divider block
#[derive(Debug, Clone, PartialEq)]
pub struct DividerBlock {
    pub common: BlockCommon,
}

/// Image block
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBlock {
    pub common: BlockCommon,
    pub source: FileObject,
    pub caption: Vec<RichTextItem>,
}

/// Video block
#[derive(Debug, Clone, PartialEq)]
pub struct VideoBlock {
    pub common: BlockCommon,
    pub source: FileObject,
    pub caption: Vec<RichTextItem>,
}

/// File block
#[derive(Debug, Clone, PartialEq)]
pub struct FileBlock {
    pub common: BlockCommon,
    pub source: FileObject,
    pub caption: Vec<RichTextItem>,
}

/// Bookmark block
#[derive(Debug, Clone, PartialEq)]
pub struct BookmarkBlock {
    pub common: BlockCommon,
    pub url: String,
    pub caption: Vec<RichTextItem>,
}

/// Link preview block
#[derive(Debug, Clone, PartialEq)]
pub struct LinkPreviewBlock {
    pub common: BlockCommon,
    pub url: String,
}

/// Table block. Its rows arrive as `TableRow` children.
#[derive(Debug, Clone, PartialEq)]
pub struct TableBlock {
    pub common: BlockCommon,
    pub table_width: usize,
    pub has_column_header: bool,
    pub has_row_header: bool,
}

/// Table row block
#[derive(Debug, Clone, PartialEq)]
pub struct TableRowBlock {
    pub common: BlockCommon,
    pub cells: Vec<Vec<RichTextItem>>,
}

/// Column list block
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnListBlock {
    pub common: BlockCommon,
}

/// Column block
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnBlock {
    pub common: BlockCommon,
}

/// Any block type without a dedicated variant.
#[derive(Debug, Clone, PartialEq)]
pub struct UnsupportedBlock {
    pub common: BlockCommon,
    pub block_type: String,
    /// The untouched type-specific data.
    pub raw: serde_json::Value,
}

impl UnsupportedBlock {
    /// The payload's `rich_text` runs, if it carries a well-formed array.
    pub fn rich_text(&self) -> Option<Vec<RichTextItem>> {
        let value = self.raw.get("rich_text")?;
        Vec::<RichTextItem>::deserialize(value).ok()
    }
}

/// Where a media block's bytes live.
///
/// Notion reports either a hosted file (with an expiring signed URL) or an
/// external link; a hosted URL wins when both are present.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FileObject {
    pub hosted_url: Option<String>,
    pub external_url: Option<String>,
}

impl FileObject {
    pub fn external(url: &str) -> Self {
        Self {
            hosted_url: None,
            external_url: Some(url.to_string()),
        }
    }

    pub fn hosted(url: &str) -> Self {
        Self {
            hosted_url: Some(url.to_string()),
            external_url: None,
        }
    }

    pub fn url(&self) -> Option<&str> {
        [self.hosted_url.as_deref(), self.external_url.as_deref()]
            .into_iter()
            .flatten()
            .find(|url| !url.is_empty())
    }
}
