// src/formatting/rich_text/mod.rs
//! Formats Notion RichTextItem arrays into inline Markdown.

mod annotations;

pub use annotations::MarkdownStyleRenderer;

use crate::types::RichTextItem;

/// Formats an array of RichTextItems into Markdown.
///
/// Runs are concatenated with no separator.
pub fn rich_text_to_markdown(items: &[RichTextItem]) -> String {
    items
        .iter()
        .map(|item| {
            MarkdownStyleRenderer::apply_styles(
                &item.plain_text,
                &item.annotations,
                item.href.as_deref(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Annotations;

    #[test]
    fn test_plain_text_formatting() {
        let items = vec![RichTextItem::plain_text("Hello World")];
        assert_eq!(rich_text_to_markdown(&items), "Hello World");
    }

    #[test]
    fn test_runs_concatenate_without_separator() {
        let items = vec![
            RichTextItem::plain_text("see "),
            RichTextItem::plain_text("docs")
                .with_annotations(Annotations {
                    italic: true,
                    ..Default::default()
                })
                .with_href("https://example.com"),
            RichTextItem::plain_text("."),
        ];
        assert_eq!(
            rich_text_to_markdown(&items),
            "see [*docs*](https://example.com)."
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(rich_text_to_markdown(&[]), "");
    }
}
