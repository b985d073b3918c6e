//! Page operations for the Confluence API.

use tracing::info;

use super::ConfluenceClient;
use crate::error::ConfluenceError;
use crate::types::{LabelList, Page, PageList};

/// Optional query parameters for [`ConfluenceClient::get_page`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PageQuery<'a> {
    /// Fetch a specific historical version instead of the latest.
    pub version: Option<u32>,
    /// Body representation to expand (e.g. "storage").
    pub body_format: Option<&'a str>,
}

impl ConfluenceClient {
    /// List pages in the site (v2 API, first batch).
    pub fn list_pages(&self) -> Result<PageList, ConfluenceError> {
        let url = format!("{}/pages", self.v2_api_url());

        info!("Listing pages");

        self.get_json(&url)
    }

    /// Get a page by ID with body, version and space expanded.
    pub fn get_page(&self, page_id: &str, query: PageQuery<'_>) -> Result<Page, ConfluenceError> {
        let mut url = format!(
            "{}/content/{}?status=current&expand=body.storage,version,space",
            self.rest_api_url(),
            page_id
        );

        if let Some(version) = query.version {
            url.push_str(&format!("&version={version}"));
        }
        if let Some(format) = query.body_format {
            url.push_str(&format!("&body-format={format}"));
        }

        info!("Getting page {}", page_id);

        self.get_json(&url)
    }

    /// Web URL for a page, resolved from its hypermedia links.
    pub fn page_url(&self, page: &Page) -> String {
        if let Some(links) = &page.links
            && let Some(webui) = &links.webui
        {
            return format!("{}/wiki{}", self.base_url(), webui);
        }

        format!(
            "{}/wiki/pages/viewpage.action?pageId={}",
            self.base_url(),
            page.id
        )
    }

    /// List labels attached to a page (v2 API).
    pub fn get_page_labels(&self, page_id: &str) -> Result<LabelList, ConfluenceError> {
        let url = format!("{}/pages/{}/labels", self.v2_api_url(), page_id);

        info!("Getting labels for page {}", page_id);

        self.get_json(&url)
    }
}
