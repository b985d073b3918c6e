//! Comment operations for the Confluence API.

use serde_json::json;
use tracing::info;

use super::ConfluenceClient;
use crate::error::ConfluenceError;

impl ConfluenceClient {
    /// Add a footer comment to a page (v2 API).
    ///
    /// Used for audit notes on status transitions, e.g. recording why a
    /// document was sent back to draft.
    pub fn add_footer_comment(
        &self,
        page_id: &str,
        comment_body: &str,
    ) -> Result<(), ConfluenceError> {
        let url = format!("{}/footer-comments", self.v2_api_url());

        let payload = json!({
            "pageId": page_id,
            "body": {
                "storage": {
                    "value": comment_body,
                    "representation": "storage",
                }
            }
        });

        info!("Adding footer comment to page {}", page_id);

        let _: serde_json::Value = self.post_json(&url, &payload)?;
        Ok(())
    }
}
