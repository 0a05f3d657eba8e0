use super::ValidationError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;
use uuid::Uuid;

/// Identifier of a block as reported by the API.
///
/// Stored verbatim; the API already hands out hyphenated UUIDs, so no
/// normalization happens on the way in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validates this id as a request target.
    pub fn to_notion_id(&self) -> Result<NotionId, ValidationError> {
        NotionId::parse(&self.0)
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated Notion object id in canonical 8-4-4-4-12 form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NotionId(String);

impl NotionId {
    /// Parses a page URL, a bare 32-hex id, or a hyphenated UUID.
    ///
    /// URLs contribute only their final path segment, which may carry a
    /// title slug before the id (`Reporter-Dash-3049166f...`).
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let cleaned = input.trim();
        if cleaned.is_empty() {
            return Err(ValidationError::EmptyField("page id"));
        }

        if cleaned.starts_with("http://") || cleaned.starts_with("https://") {
            return Self::extract_from_url(cleaned);
        }

        Self::from_hex(&cleaned.replace('-', ""))
    }

    /// Returns the canonical hyphenated form expected by the API.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_hex(hex: &str) -> Result<Self, ValidationError> {
        if hex.len() != 32 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ValidationError::InvalidId(format!(
                "expected 32 hexadecimal characters, got '{}'",
                hex
            )));
        }
        let uuid = Uuid::parse_str(hex)
            .map_err(|e| ValidationError::InvalidId(format!("{}: {}", hex, e)))?;
        Ok(NotionId(uuid.hyphenated().to_string()))
    }

    fn extract_from_url(input: &str) -> Result<Self, ValidationError> {
        lazy_static::lazy_static! {
            static ref TRAILING_ID: Regex = Regex::new(
                r"([a-fA-F0-9]{8}-[a-fA-F0-9]{4}-[a-fA-F0-9]{4}-[a-fA-F0-9]{4}-[a-fA-F0-9]{12}|[a-fA-F0-9]{32})$"
            ).expect("Failed to compile Notion ID regex - this is a bug in the code");
        }

        let url = Url::parse(input)
            .map_err(|e| ValidationError::InvalidId(format!("{}: {}", input, e)))?;
        let last_segment = url
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            .unwrap_or_default();

        match TRAILING_ID.captures(last_segment).and_then(|c| c.get(1)) {
            Some(id) => Self::from_hex(&id.as_str().replace('-', "")),
            None => Err(ValidationError::InvalidId(format!(
                "No valid ID found in URL: {}",
                input
            ))),
        }
    }
}

impl fmt::Display for NotionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for NotionId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for NotionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NotionId::parse(&s).map_err(serde::de::Error::custom)
    }
}
