use serde::{Deserialize, Deserializer, Serialize};

/// Reads an explicit JSON `null` as the field's default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One styled span of text.
///
/// Only the fields the Markdown output depends on are modelled; the API's
/// `text`/`mention`/`equation` sub-objects are summarised by `plain_text`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RichTextItem {
    #[serde(deserialize_with = "null_as_default")]
    pub plain_text: String,
    #[serde(deserialize_with = "null_as_default")]
    pub annotations: Annotations,
    pub href: Option<String>,
}

impl RichTextItem {
    /// Create a plain text item, the most common rich text variant.
    ///
    /// ```ignore
    /// RichTextItem::plain_text("hello")
    /// ```
    pub fn plain_text(text: &str) -> Self {
        Self {
            plain_text: text.to_string(),
            ..Default::default()
        }
    }

    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn with_href(mut self, href: &str) -> Self {
        self.href = Some(href.to_string());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotations {
    #[serde(deserialize_with = "null_as_default")]
    pub bold: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub italic: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub strikethrough: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub underline: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub code: bool,
}
