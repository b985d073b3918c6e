//! Error types for the Confluence client.

/// Error from Confluence API operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfluenceError {
    /// HTTP request error (status 0 means the request never completed).
    #[error("HTTP error: {status} - {body}")]
    Http { status: u16, body: String },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// Client construction failed due to incomplete credentials.
    #[error("missing Confluence configuration: {0}")]
    Configuration(&'static str),

    /// A content state name has no definition in the target space.
    #[error("content state {name:?} not defined in space {space_key:?}")]
    StateNotFound { name: String, space_key: String },

    /// Group directory search returned no match.
    #[error("no group matching {query:?}")]
    GroupNotFound { query: String },
}

impl From<serde_json::Error> for ConfluenceError {
    fn from(e: serde_json::Error) -> Self {
        ConfluenceError::Json(e.to_string())
    }
}

impl From<ureq::Error> for ConfluenceError {
    fn from(e: ureq::Error) -> Self {
        ConfluenceError::Http {
            status: 0,
            body: e.to_string(),
        }
    }
}
