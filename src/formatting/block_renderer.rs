// src/formatting/block_renderer.rs
//! Block rendering engine: converts a block tree to Markdown.
//!
//! Rendering is a pure function of the tree. Every block type has exactly
//! one rule; nesting is handled uniformly by appending rendered children
//! below the block's own line, except for tables, which consume their rows.

use super::rich_text::rich_text_to_markdown;
use super::table::{render_row, render_table};
use crate::constants::{
    CALLOUT_DEFAULT_EMOJI, CHARS_PER_BLOCK_ESTIMATE, IMAGE_DEFAULT_ALT, INDENT_UNIT,
    LINK_PREVIEW_LABEL,
};
use crate::model::{Block, FileObject, Icon};
use crate::types::RichTextItem;

// --- Public API ---

/// Renders top-level blocks into one Markdown document.
///
/// Blocks that render to whitespace only are dropped; the rest are separated
/// by a blank line.
pub fn render_blocks(blocks: &[Block]) -> String {
    log::debug!("Rendering {} top-level blocks", blocks.len());

    let mut output = String::with_capacity(blocks.len() * CHARS_PER_BLOCK_ESTIMATE);
    for rendered in blocks
        .iter()
        .map(|block| render_block(block, 0))
        .filter(|md| !md.trim().is_empty())
    {
        if !output.is_empty() {
            output.push_str("\n\n");
        }
        output.push_str(&rendered);
    }
    output
}

/// Renders one block and its descendants at the given nesting depth.
pub fn render_block(block: &Block, depth: usize) -> String {
    let own = render_own(block, depth);

    if matches!(block, Block::Table(_)) {
        return own;
    }

    let children = render_children(block.children(), depth + 1);
    match (own.is_empty(), children.is_empty()) {
        (_, true) => own,
        (true, false) => children,
        (false, false) => format!("{}\n{}", own, children),
    }
}

// --- Per-type rules ---

/// The block's own Markdown, without children.
fn render_own(block: &Block, depth: usize) -> String {
    let indent = if block.is_list_like() {
        INDENT_UNIT.repeat(depth)
    } else {
        String::new()
    };

    match block {
        Block::Paragraph(b) => rich_text_to_markdown(&b.content.rich_text),
        Block::Heading1(b) => format!("# {}", rich_text_to_markdown(&b.content.rich_text)),
        Block::Heading2(b) => format!("## {}", rich_text_to_markdown(&b.content.rich_text)),
        Block::Heading3(b) => format!("### {}", rich_text_to_markdown(&b.content.rich_text)),
        Block::BulletedListItem(b) => {
            format!("{}- {}", indent, rich_text_to_markdown(&b.content.rich_text))
        }
        Block::NumberedListItem(b) => {
            format!("{}1. {}", indent, rich_text_to_markdown(&b.content.rich_text))
        }
        Block::ToDo(b) => format!(
            "{}- [{}] {}",
            indent,
            if b.checked { "x" } else { " " },
            rich_text_to_markdown(&b.content.rich_text)
        ),
        Block::Toggle(b) => format!("{}- {}", indent, rich_text_to_markdown(&b.content.rich_text)),
        Block::Code(b) => format!(
            "```{}\n{}\n```",
            b.language,
            rich_text_to_markdown(&b.content.rich_text)
        ),
        Block::Quote(b) => format!("> {}", quote_lines(&b.content.rich_text)),
        Block::Callout(b) => {
            let emoji = b
                .icon
                .as_ref()
                .and_then(Icon::emoji)
                .filter(|emoji| !emoji.is_empty())
                .unwrap_or(CALLOUT_DEFAULT_EMOJI);
            format!("> {} {}", emoji, quote_lines(&b.content.rich_text))
        }
        Block::Divider(_) => "---".to_string(),
        Block::Table(b) => render_table(&b.common.children),
        Block::TableRow(b) => render_row(b),
        Block::Image(b) => format!(
            "![{}]({})",
            caption_or(&b.caption, IMAGE_DEFAULT_ALT),
            media_url(&b.source)
        ),
        Block::Video(b) => format!("[{}]({})", caption_or(&b.caption, "video"), media_url(&b.source)),
        Block::File(b) => format!("[{}]({})", caption_or(&b.caption, "file"), media_url(&b.source)),
        Block::Bookmark(b) => format!("[{}]({})", caption_or(&b.caption, &b.url), b.url),
        Block::LinkPreview(b) => format!("[{}]({})", LINK_PREVIEW_LABEL, b.url),
        Block::Equation(b) => format!("${}$", b.expression),
        Block::ColumnList(_) | Block::Column(_) => String::new(),
        Block::Unsupported(b) => match b.rich_text() {
            Some(rich_text) => rich_text_to_markdown(&rich_text),
            None => format!("[{}]", b.block_type),
        },
    }
}

/// Children rendered one level deeper, whitespace-only results dropped.
fn render_children(children: &[Block], depth: usize) -> String {
    children
        .iter()
        .map(|child| render_block(child, depth))
        .filter(|md| !md.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

// --- Helpers ---

/// Inline text with every line break continuing the blockquote.
fn quote_lines(rich_text: &[RichTextItem]) -> String {
    rich_text_to_markdown(rich_text).replace('\n', "\n> ")
}

fn caption_or(caption: &[RichTextItem], fallback: &str) -> String {
    let rendered = rich_text_to_markdown(caption);
    if rendered.is_empty() {
        fallback.to_string()
    } else {
        rendered
    }
}

fn media_url(source: &FileObject) -> &str {
    source.url().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::*;
    use crate::types::Annotations;

    fn text(s: &str) -> TextBlockContent {
        TextBlockContent::new(vec![RichTextItem::plain_text(s)])
    }

    fn bullet(id: &str, s: &str, children: Vec<Block>) -> Block {
        Block::BulletedListItem(BulletedListItemBlock {
            common: BlockCommon::new(id).with_children(children),
            content: text(s),
        })
    }

    #[test]
    fn test_nested_list_indents_by_depth() {
        let tree = bullet(
            "a",
            "outer",
            vec![bullet("b", "inner", vec![bullet("c", "innermost", vec![])])],
        );
        assert_eq!(
            render_block(&tree, 0),
            "- outer\n  - inner\n    - innermost"
        );
    }

    #[test]
    fn test_non_list_blocks_ignore_depth_for_prefix() {
        let para = Block::Paragraph(ParagraphBlock {
            common: BlockCommon::new("p"),
            content: text("flat"),
        });
        assert_eq!(render_block(&para, 3), "flat");
    }

    #[test]
    fn test_empty_own_text_yields_children_only() {
        let column = Block::Column(ColumnBlock {
            common: BlockCommon::new("col").with_children(vec![Block::Paragraph(ParagraphBlock {
                common: BlockCommon::new("p"),
                content: text("inside"),
            })]),
        });
        assert_eq!(render_block(&column, 0), "inside");
    }

    #[test]
    fn test_whitespace_children_are_dropped() {
        let tree = bullet(
            "a",
            "parent",
            vec![
                Block::Paragraph(ParagraphBlock {
                    common: BlockCommon::new("p"),
                    content: text("   "),
                }),
                bullet("b", "kept", vec![]),
            ],
        );
        assert_eq!(render_block(&tree, 0), "- parent\n  - kept");
    }

    #[test]
    fn test_quote_reflows_lines() {
        let quote = Block::Quote(QuoteBlock {
            common: BlockCommon::new("q"),
            content: text("one\ntwo"),
        });
        assert_eq!(render_block(&quote, 0), "> one\n> two");
    }

    #[test]
    fn test_callout_default_emoji() {
        let callout = Block::Callout(CalloutBlock {
            common: BlockCommon::new("c"),
            icon: Some(Icon::Image {
                url: "https://example.com/icon.png".to_string(),
            }),
            content: text("note"),
        });
        assert_eq!(render_block(&callout, 0), "> 💡 note");
    }

    #[test]
    fn test_table_ignores_generic_children_rule() {
        let table = Block::Table(TableBlock {
            common: BlockCommon::new("t").with_children(vec![
                Block::Paragraph(ParagraphBlock {
                    common: BlockCommon::new("stray"),
                    content: text("not a row"),
                }),
            ]),
            table_width: 2,
            has_column_header: false,
            has_row_header: false,
        });
        assert_eq!(render_block(&table, 0), "\n[表格]\n");
    }

    #[test]
    fn test_unsupported_with_empty_rich_text_renders_nothing() {
        let block = Block::Unsupported(UnsupportedBlock {
            common: BlockCommon::new("u"),
            block_type: "template".to_string(),
            raw: serde_json::json!({ "rich_text": [] }),
        });
        assert_eq!(render_block(&block, 0), "");
        assert_eq!(render_blocks(&[block]), "");
    }

    #[test]
    fn test_styled_code_run() {
        let para = Block::Paragraph(ParagraphBlock {
            common: BlockCommon::new("p"),
            content: TextBlockContent::new(vec![RichTextItem::plain_text("hi").with_annotations(
                Annotations {
                    bold: true,
                    code: true,
                    ..Default::default()
                },
            )]),
        });
        assert_eq!(render_blocks(&[para]), "`**hi**`");
    }
}
