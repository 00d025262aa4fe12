//! Notion API wire types
//!
//! Only the parts of the block and page objects needed to carry an IP
//! string are modelled. Unknown fields are ignored on the way in.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Response of `GET /blocks/{id}/children`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlockList {
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub results: Vec<Block>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// A block as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragraph: Option<Paragraph>,
}

impl Block {
    /// Text of a paragraph block, `None` for every other block type
    pub fn paragraph_text(&self) -> Option<String> {
        match (self.kind.as_str(), &self.paragraph) {
            ("paragraph", Some(paragraph)) => Some(paragraph.text()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
}

impl Paragraph {
    /// A paragraph with a single plain text segment
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            rich_text: vec![RichText::text(content)],
        }
    }

    /// Concatenated content of all text segments
    pub fn text(&self) -> String {
        self.rich_text
            .iter()
            .filter_map(|segment| segment.text.as_ref())
            .map(|t| t.content.as_str())
            .collect()
    }
}

/// One rich-text segment. Mentions and equations carry no `text` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichText {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextContent>,
}

impl RichText {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: "text".to_string(),
            text: Some(TextContent::new(content)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextContent {
    pub content: String,
}

impl TextContent {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// Body of `PATCH /blocks/{id}/children`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppendChildren {
    pub children: Vec<ChildBlock>,
}

impl AppendChildren {
    /// Payload appending one paragraph containing `content`
    pub fn paragraph(content: impl Into<String>) -> Self {
        Self {
            children: vec![ChildBlock {
                object: "block".to_string(),
                kind: "paragraph".to_string(),
                paragraph: Some(Paragraph::plain(content)),
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChildBlock {
    pub object: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragraph: Option<Paragraph>,
}

/// Body of `PATCH /pages/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageUpdate {
    pub properties: BTreeMap<String, Vec<TitleText>>,
}

impl PageUpdate {
    /// Payload setting title property `property` to `content`
    pub fn title(property: impl Into<String>, content: impl Into<String>) -> Self {
        let mut properties = BTreeMap::new();
        properties.insert(
            property.into(),
            vec![TitleText {
                text: TextContent::new(content),
            }],
        );
        Self { properties }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleText {
    pub text: TextContent,
}

/// Error body returned by the API on failure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotionErrorResponse {
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub status: u16,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}
