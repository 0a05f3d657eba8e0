// src/formatting/table.rs
//! Pipe-table assembly from a table block's rows.

use super::rich_text::rich_text_to_markdown;
use crate::constants::TABLE_PLACEHOLDER;
use crate::model::{Block, TableRowBlock};

/// Accumulates rendered rows; the first non-empty row becomes the header.
#[derive(Debug, Default)]
pub struct TableBuilder {
    lines: Vec<String>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one row. Rows without cells are skipped and never become the header.
    pub fn push_row(&mut self, row: &TableRowBlock) {
        if row.cells.is_empty() {
            return;
        }

        let is_header = self.lines.is_empty();
        self.lines.push(render_row(row));

        if is_header {
            let separator = vec!["---"; row.cells.len()].join(" | ");
            self.lines.push(format!("| {} |", separator));
        }
    }

    /// Finishes the table, wrapped in a leading and trailing newline.
    pub fn finish(self) -> String {
        if self.lines.is_empty() {
            return format!("\n{}\n", TABLE_PLACEHOLDER);
        }
        format!("\n{}\n", self.lines.join("\n"))
    }
}

/// Renders a table from its children; only `table_row` children count.
pub fn render_table(children: &[Block]) -> String {
    let mut builder = TableBuilder::new();
    for child in children {
        if let Block::TableRow(row) = child {
            builder.push_row(row);
        }
    }
    builder.finish()
}

/// Renders one row as `| a | b |`.
pub fn render_row(row: &TableRowBlock) -> String {
    let cells: Vec<String> = row.cells.iter().map(|cell| rich_text_to_markdown(cell)).collect();
    format!("| {} |", cells.join(" | "))
}
