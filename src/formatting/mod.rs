// src/formatting/mod.rs
//! Renders Notion block trees into Markdown.

// Sub-modules
pub mod block_renderer;
mod rich_text;
mod table;

pub use self::block_renderer::{render_block, render_blocks};
pub use self::rich_text::{rich_text_to_markdown, MarkdownStyleRenderer};
pub use self::table::TableBuilder;
