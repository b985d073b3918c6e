//! Confluence page types.

use serde::{Deserialize, Serialize};

/// Confluence page.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Page {
    /// Page ID.
    pub id: String,
    /// Page title.
    pub title: String,
    /// Content type (usually "page").
    #[serde(rename = "type", default)]
    pub content_type: Option<String>,
    /// Publication status ("current", "draft", ...).
    #[serde(default)]
    pub status: Option<String>,
    /// Parent page ID, if any.
    #[serde(rename = "parentId", default)]
    pub parent_id: Option<String>,
    /// Space the page belongs to.
    #[serde(default)]
    pub space: Option<Space>,
    /// Version information.
    pub version: Version,
    /// Page body content.
    #[serde(default)]
    pub body: Option<Body>,
    /// Hypermedia links.
    #[serde(rename = "_links", default)]
    pub links: Option<Links>,
}

impl Page {
    /// Storage-format body content, if it was expanded in the request.
    pub fn storage_body(&self) -> Option<&str> {
        self.body
            .as_ref()
            .and_then(|b| b.storage.as_ref())
            .map(|s| s.value.as_str())
    }
}

/// Space reference embedded in a page.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Space {
    /// Space key.
    pub key: String,
    /// Space name.
    #[serde(default)]
    pub name: Option<String>,
}

/// Page version.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Version {
    /// Version number.
    pub number: u32,
    /// Version message/comment.
    #[serde(default)]
    pub message: Option<String>,
}

/// Page body content.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Body {
    /// Storage format content.
    #[serde(default)]
    pub storage: Option<Storage>,
}

/// Storage format representation.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Storage {
    /// HTML content in Confluence storage format.
    pub value: String,
    /// Content representation (always "storage").
    pub representation: String,
}

/// Hypermedia links.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Links {
    /// Web UI link.
    #[serde(default)]
    pub webui: Option<String>,
    /// API self link.
    #[serde(rename = "self", default)]
    pub self_link: Option<String>,
}

/// Paged list of pages (v2 API).
#[derive(Debug, Clone, Deserialize)]
pub struct PageList {
    /// Pages in this batch.
    pub results: Vec<Page>,
}

/// Page label (v2 API).
#[derive(Debug, Clone, Deserialize)]
pub struct Label {
    /// Label ID.
    pub id: String,
    /// Label name.
    pub name: String,
    /// Label prefix ("global", "my", ...).
    #[serde(default)]
    pub prefix: Option<String>,
}

/// Paged list of labels (v2 API).
#[derive(Debug, Clone, Deserialize)]
pub struct LabelList {
    /// Labels in this batch.
    pub results: Vec<Label>,
}
