use serde::{Deserialize, Serialize};

/// One content unit of a page.
///
/// `content` is opaque serialized rich-text markup (HTML from the block editor).
/// It is stored and shipped as-is; nothing in this crate parses it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: String,

    /// Catalog block type (`text`, `heading1`, `image`, ...). Open enumeration.
    #[serde(rename = "type")]
    pub block_type: String,

    #[serde(default)]
    pub content: String,

    /// Dense zero-based rank within the page. Derived from array position.
    #[serde(default)]
    pub order: u32,

    /// Owning page. Blocks created in the editor don't know it until saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_id: Option<String>,
}

impl Block {
    pub fn new(id: impl Into<String>, block_type: impl Into<String>, order: u32) -> Self {
        Self {
            id: id.into(),
            block_type: block_type.into(),
            content: String::new(),
            order,
            page_id: None,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub blocks: Vec<Block>,
    /// Unix milliseconds.
    pub updated_at: i64,
}

/// Save/create payload posted by the editor as the `data` form field.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl PageData {
    /// Blank title and no blocks: nothing worth persisting.
    pub fn is_empty(&self) -> bool {
        self.title.trim().is_empty() && self.blocks.is_empty()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageSummary {
    pub id: String,
    pub title: String,
    pub block_count: usize,
    pub updated_at: i64,
}

impl From<&Page> for PageSummary {
    fn from(page: &Page) -> Self {
        Self {
            id: page.id.clone(),
            title: page.title.clone(),
            block_count: page.blocks.len(),
            updated_at: page.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SaveResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SaveResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Reassign `order` from array position. Array order is authoritative.
pub fn renumber(blocks: &mut [Block]) {
    for (i, b) in blocks.iter_mut().enumerate() {
        b.order = i as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_block_contract_uses_type_and_camel_case() {
        let mut b = Block::new("1", "heading1", 0);
        b.page_id = Some("p1".to_string());
        let v = serde_json::to_value(&b).expect("should serialize");
        assert_eq!(v["type"], "heading1");
        assert_eq!(v["pageId"], "p1");
        assert!(v.get("block_type").is_none());
    }

    #[test]
    fn test_page_data_deserialize_tolerates_missing_fields() {
        // Editor posts blocks without `order`/`pageId`; the server recomputes both.
        let json = r#"{"title":"Hello","blocks":[{"id":"a","type":"text","content":"<p>x</p>"}]}"#;
        let parsed: PageData = serde_json::from_str(json).expect("payload should parse");
        assert_eq!(parsed.id, None);
        assert_eq!(parsed.blocks[0].order, 0);
        assert_eq!(parsed.blocks[0].page_id, None);
        assert_eq!(parsed.blocks[0].content, "<p>x</p>");
    }

    #[test]
    fn test_page_data_is_empty() {
        assert!(PageData::default().is_empty());
        assert!(PageData {
            title: "   ".to_string(),
            ..Default::default()
        }
        .is_empty());
        assert!(!PageData {
            title: "T".to_string(),
            ..Default::default()
        }
        .is_empty());
        assert!(!PageData {
            blocks: vec![Block::new("1", "text", 0)],
            ..Default::default()
        }
        .is_empty());
    }

    #[test]
    fn test_renumber_assigns_index() {
        let mut blocks = vec![
            Block::new("a", "text", 7),
            Block::new("b", "text", 7),
            Block::new("c", "text", 0),
        ];
        renumber(&mut blocks);
        let orders: Vec<u32> = blocks.iter().map(|b| b.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[test]
    fn test_summary_from_page() {
        let page = Page {
            id: "p".to_string(),
            title: "T".to_string(),
            blocks: vec![Block::new("a", "text", 0), Block::new("b", "image", 1)],
            updated_at: 42,
        };
        let s = PageSummary::from(&page);
        assert_eq!(s.block_count, 2);
        assert_eq!(s.updated_at, 42);
    }
}
