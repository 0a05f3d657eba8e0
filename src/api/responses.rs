// src/api/responses.rs
//! Wire shapes of the block-children endpoint.
//!
//! Only the fields the Markdown output needs are modelled. Every payload
//! struct tolerates missing fields, so a sparse or partially redacted block
//! still parses.

use crate::types::{null_as_default, RichTextItem};
use serde::Deserialize;
use serde_json::{Map, Value};

/// One page of results from a paginated endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginatedResponse<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_more: bool,
}

impl<T> PaginatedResponse<T> {
    /// Converts every result, keeping the cursor.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResponse<U> {
        PaginatedResponse {
            results: self.results.into_iter().map(f).collect(),
            next_cursor: self.next_cursor,
            has_more: self.has_more,
        }
    }
}

/// A block as the API returns it, before conversion to the domain model.
///
/// The type-specific payload lives under a key equal to `type`; it is kept
/// in `payloads` along with the other top-level fields nobody reads.
#[derive(Debug, Clone, Deserialize)]
pub struct RawBlock {
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_children: bool,
    #[serde(flatten)]
    pub payloads: Map<String, Value>,
}

impl RawBlock {
    /// The payload object for this block's own type, or `Null`.
    pub fn take_payload(&mut self) -> Value {
        self.payloads.remove(&self.block_type).unwrap_or(Value::Null)
    }
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiErrorBody {
    pub code: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TextPayload {
    #[serde(deserialize_with = "null_as_default")]
    pub rich_text: Vec<RichTextItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ToDoPayload {
    #[serde(deserialize_with = "null_as_default")]
    pub rich_text: Vec<RichTextItem>,
    #[serde(deserialize_with = "null_as_default")]
    pub checked: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CodePayload {
    #[serde(deserialize_with = "null_as_default")]
    pub rich_text: Vec<RichTextItem>,
    pub language: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CalloutPayload {
    #[serde(deserialize_with = "null_as_default")]
    pub rich_text: Vec<RichTextItem>,
    pub icon: Option<IconPayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IconPayload {
    pub emoji: Option<String>,
    pub external: Option<UrlHolder>,
    pub file: Option<UrlHolder>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UrlHolder {
    pub url: Option<String>,
}

/// Shared by image, video and file blocks.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MediaPayload {
    #[serde(deserialize_with = "null_as_default")]
    pub caption: Vec<RichTextItem>,
    pub file: Option<UrlHolder>,
    pub external: Option<UrlHolder>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BookmarkPayload {
    pub url: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub caption: Vec<RichTextItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LinkPreviewPayload {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EquationPayload {
    #[serde(deserialize_with = "null_as_default")]
    pub expression: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TablePayload {
    #[serde(deserialize_with = "null_as_default")]
    pub table_width: usize,
    #[serde(deserialize_with = "null_as_default")]
    pub has_column_header: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub has_row_header: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TableRowPayload {
    #[serde(deserialize_with = "null_as_default")]
    pub cells: Vec<Vec<RichTextItem>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_block_keeps_payload_under_type_key() {
        let json = r#"{
            "object": "block",
            "id": "59833787-2cf9-4fdf-8782-e53db20768a5",
            "type": "heading_2",
            "has_children": false,
            "archived": false,
            "heading_2": { "rich_text": [{ "plain_text": "Lacinato kale" }], "color": "default" }
        }"#;
        let mut raw: RawBlock = serde_json::from_str(json).unwrap();
        assert_eq!(raw.block_type, "heading_2");
        let payload: TextPayload = serde_json::from_value(raw.take_payload()).unwrap();
        assert_eq!(payload.rich_text[0].plain_text, "Lacinato kale");
    }

    #[test]
    fn test_paginated_response_defaults() {
        let page: PaginatedResponse<Value> = serde_json::from_str(r#"{"results": []}"#).unwrap();
        assert!(page.results.is_empty());
        assert!(page.next_cursor.is_none());
        assert!(!page.has_more);
    }
}
