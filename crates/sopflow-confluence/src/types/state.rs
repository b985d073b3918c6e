//! Confluence content state types.

use serde::{Deserialize, Serialize};

/// A content state definition (approval stage label).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContentState {
    /// State ID (space-scoped).
    pub id: i64,
    /// State display name.
    pub name: String,
    /// State color.
    #[serde(default)]
    pub color: Option<String>,
}

/// Response of `GET /rest/api/content/{id}/state`.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentStateResponse {
    /// Current state of the page.
    #[serde(rename = "contentState")]
    pub content_state: ContentState,
}

/// Response of `GET /rest/api/space/{key}/state/settings`.
#[derive(Debug, Clone, Deserialize)]
pub struct SpaceStatesResponse {
    /// State definitions available in the space.
    #[serde(rename = "spaceContentStates")]
    pub space_content_states: Vec<ContentState>,
}
