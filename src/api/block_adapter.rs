// src/api/block_adapter.rs
//! Adapter layer converting wire blocks into the domain model.
//!
//! Conversion never fails: a block whose payload does not match the expected
//! shape is kept as `Block::Unsupported` with its raw data, so one odd block
//! cannot sink a whole page.

use super::responses::*;
use crate::model::blocks::*;
use crate::model::common::BlockCommon;
use crate::model::Block;
use crate::types::RichTextItem;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Convert a wire block to a domain block.
pub fn convert_block(mut raw: RawBlock) -> Block {
    let common = BlockCommon {
        id: crate::types::BlockId::new(raw.id.as_str()),
        has_children: raw.has_children,
        children: Vec::new(),
    };
    let payload = raw.take_payload();

    match convert_known(&raw.block_type, &common, &payload) {
        Ok(Some(block)) => block,
        Ok(None) => unsupported(common, raw.block_type, payload),
        Err(e) => {
            log::warn!(
                "Block {} of type '{}' has an unexpected payload ({}); keeping raw data",
                raw.id,
                raw.block_type,
                e
            );
            unsupported(common, raw.block_type, payload)
        }
    }
}

/// Converts the block types with a dedicated variant; `None` for the rest.
fn convert_known(
    block_type: &str,
    common: &BlockCommon,
    payload: &Value,
) -> Result<Option<Block>, serde_json::Error> {
    let common = common.clone();

    let block = match block_type {
        "paragraph" => Block::Paragraph(ParagraphBlock {
            common,
            content: text_content(payload)?,
        }),
        "heading_1" => Block::Heading1(Heading1Block {
            common,
            content: text_content(payload)?,
        }),
        "heading_2" => Block::Heading2(Heading2Block {
            common,
            content: text_content(payload)?,
        }),
        "heading_3" => Block::Heading3(Heading3Block {
            common,
            content: text_content(payload)?,
        }),
        "bulleted_list_item" => Block::BulletedListItem(BulletedListItemBlock {
            common,
            content: text_content(payload)?,
        }),
        "numbered_list_item" => Block::NumberedListItem(NumberedListItemBlock {
            common,
            content: text_content(payload)?,
        }),
        "toggle" => Block::Toggle(ToggleBlock {
            common,
            content: text_content(payload)?,
        }),
        "quote" => Block::Quote(QuoteBlock {
            common,
            content: text_content(payload)?,
        }),
        "to_do" => {
            let to_do: ToDoPayload = parse_payload(payload)?;
            Block::ToDo(ToDoBlock {
                common,
                content: TextBlockContent::new(to_do.rich_text),
                checked: to_do.checked,
            })
        }
        "callout" => {
            let callout: CalloutPayload = parse_payload(payload)?;
            Block::Callout(CalloutBlock {
                common,
                icon: callout.icon.and_then(convert_icon),
                content: TextBlockContent::new(callout.rich_text),
            })
        }
        "code" => {
            let code: CodePayload = parse_payload(payload)?;
            Block::Code(CodeBlock {
                common,
                language: code.language.unwrap_or_default(),
                content: TextBlockContent::new(code.rich_text),
            })
        }
        "equation" => {
            let equation: EquationPayload = parse_payload(payload)?;
            Block::Equation(EquationBlock {
                common,
                expression: equation.expression,
            })
        }
        "divider" => Block::Divider(DividerBlock { common }),
        "image" => {
            let media: MediaPayload = parse_payload(payload)?;
            let (source, caption) = convert_media(media);
            Block::Image(ImageBlock {
                common,
                source,
                caption,
            })
        }
        "video" => {
            let media: MediaPayload = parse_payload(payload)?;
            let (source, caption) = convert_media(media);
            Block::Video(VideoBlock {
                common,
                source,
                caption,
            })
        }
        "file" => {
            let media: MediaPayload = parse_payload(payload)?;
            let (source, caption) = convert_media(media);
            Block::File(FileBlock {
                common,
                source,
                caption,
            })
        }
        "bookmark" => {
            let bookmark: BookmarkPayload = parse_payload(payload)?;
            Block::Bookmark(BookmarkBlock {
                common,
                url: bookmark.url.unwrap_or_default(),
                caption: bookmark.caption,
            })
        }
        "link_preview" => {
            let preview: LinkPreviewPayload = parse_payload(payload)?;
            Block::LinkPreview(LinkPreviewBlock {
                common,
                url: preview.url.unwrap_or_default(),
            })
        }
        "table" => {
            let table: TablePayload = parse_payload(payload)?;
            Block::Table(TableBlock {
                common,
                table_width: table.table_width,
                has_column_header: table.has_column_header,
                has_row_header: table.has_row_header,
            })
        }
        "table_row" => {
            let row: TableRowPayload = parse_payload(payload)?;
            Block::TableRow(TableRowBlock {
                common,
                cells: row.cells,
            })
        }
        "column_list" => Block::ColumnList(ColumnListBlock { common }),
        "column" => Block::Column(ColumnBlock { common }),
        _ => return Ok(None),
    };

    Ok(Some(block))
}

/// Deserializes a payload, treating an absent payload as all defaults.
fn parse_payload<T: DeserializeOwned + Default>(payload: &Value) -> Result<T, serde_json::Error> {
    if payload.is_null() {
        return Ok(T::default());
    }
    T::deserialize(payload)
}

fn text_content(payload: &Value) -> Result<TextBlockContent, serde_json::Error> {
    let text: TextPayload = parse_payload(payload)?;
    Ok(TextBlockContent::new(text.rich_text))
}

fn convert_icon(icon: IconPayload) -> Option<Icon> {
    if let Some(emoji) = icon.emoji {
        return Some(Icon::Emoji(emoji));
    }
    icon.external
        .or(icon.file)
        .and_then(|holder| holder.url)
        .map(|url| Icon::Image { url })
}

fn convert_media(media: MediaPayload) -> (FileObject, Vec<RichTextItem>) {
    let source = FileObject {
        hosted_url: media.file.and_then(|f| f.url),
        external_url: media.external.and_then(|e| e.url),
    };
    (source, media.caption)
}

fn unsupported(common: BlockCommon, block_type: String, payload: Value) -> Block {
    Block::Unsupported(UnsupportedBlock {
        common,
        block_type,
        raw: payload,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatting::render_block;
    use serde_json::json;

    fn raw(value: Value) -> RawBlock {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_converts_to_do() {
        let block = convert_block(raw(json!({
            "id": "b1",
            "type": "to_do",
            "has_children": true,
            "to_do": { "rich_text": [{ "plain_text": "ship" }], "checked": true }
        })));

        match block {
            Block::ToDo(to_do) => {
                assert!(to_do.checked);
                assert!(to_do.common.has_children);
                assert_eq!(to_do.content.rich_text[0].plain_text, "ship");
            }
            other => panic!("expected to_do, got {:?}", other),
        }
    }

    #[test]
    fn test_image_prefers_hosted_file() {
        let block = convert_block(raw(json!({
            "id": "b2",
            "type": "image",
            "image": {
                "type": "file",
                "file": { "url": "https://files.example/a.png", "expiry_time": "2024-01-01T00:00:00.000Z" },
                "caption": []
            }
        })));

        match block {
            Block::Image(image) => {
                assert_eq!(image.source.url(), Some("https://files.example/a.png"));
                assert!(image.caption.is_empty());
            }
            other => panic!("expected image, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_type_keeps_rich_text() {
        let block = convert_block(raw(json!({
            "id": "b3",
            "type": "template",
            "template": { "rich_text": [{ "plain_text": "Add a new to-do" }] }
        })));

        match block {
            Block::Unsupported(unsupported) => {
                assert_eq!(unsupported.block_type, "template");
                let rich_text = unsupported.rich_text().expect("rich text kept");
                assert_eq!(rich_text[0].plain_text, "Add a new to-do");
            }
            other => panic!("expected unsupported, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_payload_degrades_to_unsupported() {
        let block = convert_block(raw(json!({
            "id": "b4",
            "type": "to_do",
            "to_do": { "rich_text": "not an array" }
        })));

        assert_eq!(block.block_type(), "to_do");
        assert!(matches!(block, Block::Unsupported(ref b) if b.rich_text().is_none()));
    }

    #[test]
    fn test_callout_icon() {
        let block = convert_block(raw(json!({
            "id": "b5",
            "type": "callout",
            "callout": {
                "rich_text": [],
                "icon": { "type": "emoji", "emoji": "⚠️" }
            }
        })));

        match block {
            Block::Callout(callout) => {
                assert_eq!(callout.icon.as_ref().and_then(Icon::emoji), Some("⚠️"));
            }
            other => panic!("expected callout, got {:?}", other),
        }
    }

    #[test]
    fn test_null_payload_fields_keep_the_block_typed() {
        let image = convert_block(raw(json!({
            "id": "b6",
            "type": "image",
            "has_children": null,
            "image": {
                "type": "external",
                "external": { "url": "https://x/a.png" },
                "caption": null
            }
        })));
        assert_eq!(render_block(&image, 0), "![image](https://x/a.png)");

        let to_do = convert_block(raw(json!({
            "id": "b7",
            "type": "to_do",
            "to_do": { "rich_text": [{ "plain_text": null }, { "plain_text": "ok" }], "checked": null }
        })));
        match to_do {
            Block::ToDo(to_do) => {
                assert!(!to_do.checked);
                assert_eq!(to_do.content.rich_text.len(), 2);
            }
            other => panic!("expected to_do, got {:?}", other),
        }

        let paragraph = convert_block(raw(json!({
            "id": "b8",
            "type": "paragraph",
            "paragraph": { "rich_text": null }
        })));
        assert!(matches!(paragraph, Block::Paragraph(_)));
    }
}
