// src/formatting/rich_text/annotations.rs
//! Annotation processing for rich text.
//!
//! Markers are applied in a fixed order: bold, italic, strikethrough, code,
//! then the link. Each step wraps everything produced before it, so the
//! nesting for any combination of flags is deterministic.

use crate::types::Annotations;

/// Renderer for text styles to Markdown.
pub struct MarkdownStyleRenderer;

impl MarkdownStyleRenderer {
    /// Applies annotations and an optional link to text content.
    ///
    /// Underline has no Markdown form and is dropped.
    pub fn apply_styles(content: &str, annotations: &Annotations, href: Option<&str>) -> String {
        let mut result = content.to_string();

        if annotations.bold {
            result = format!("**{}**", result);
        }

        if annotations.italic {
            result = format!("*{}*", result);
        }

        if annotations.strikethrough {
            result = format!("~~{}~~", result);
        }

        if annotations.code {
            result = format!("`{}`", result);
        }

        if let Some(url) = href.filter(|url| !url.is_empty()) {
            result = format!("[{}]({})", result, url);
        }

        result
    }
}
