//! Confluence REST API client.
//!
//! Sync HTTP client for the Confluence Cloud REST API with basic
//! authentication. Endpoint groups live in their own modules: pages,
//! content states, groups and comments.

mod comments;
mod groups;
mod pages;
mod states;

use std::time::Duration;

use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use serde::de::DeserializeOwned;
use sopflow_config::ConfluenceConfig;
use ureq::Agent;

use crate::error::ConfluenceError;

pub use pages::PageQuery;

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Confluence REST API client.
#[derive(Debug)]
pub struct ConfluenceClient {
    agent: Agent,
    base_url: String,
    auth_header: String,
}

impl ConfluenceClient {
    /// Create a client from resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfluenceError::Configuration`] if any credential field
    /// is empty.
    pub fn from_config(config: &ConfluenceConfig) -> Result<Self, ConfluenceError> {
        if config.base_url.is_empty() {
            return Err(ConfluenceError::Configuration("base_url"));
        }
        if config.username.is_empty() {
            return Err(ConfluenceError::Configuration("username"));
        }
        if config.api_token.is_empty() {
            return Err(ConfluenceError::Configuration("api_token"));
        }

        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT)))
            .http_status_as_error(false)
            .build()
            .into();

        let credentials = format!("{}:{}", config.username, config.api_token);
        let auth_header = format!("Basic {}", BASE64_STANDARD.encode(credentials));

        Ok(Self {
            agent,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            auth_header,
        })
    }

    /// Get the site base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Base URL for the v1 REST API.
    fn rest_api_url(&self) -> String {
        format!("{}/wiki/rest/api", self.base_url)
    }

    /// Base URL for the v2 REST API.
    fn v2_api_url(&self) -> String {
        format!("{}/wiki/api/v2", self.base_url)
    }

    /// Issue a GET request and deserialize the JSON response.
    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ConfluenceError> {
        let response = self
            .agent
            .get(url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .call()
            .map_err(|e| ConfluenceError::Http {
                status: 0,
                body: e.to_string(),
            })?;

        Self::read_response(response)
    }

    /// Issue a PUT request with a JSON payload.
    fn put_json<T: DeserializeOwned>(
        &self,
        url: &str,
        payload: &serde_json::Value,
    ) -> Result<T, ConfluenceError> {
        let payload_bytes = serde_json::to_vec(payload)?;

        let response = self
            .agent
            .put(url)
            .header("Authorization", &self.auth_header)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .send(&payload_bytes[..])
            .map_err(|e| ConfluenceError::Http {
                status: 0,
                body: e.to_string(),
            })?;

        Self::read_response(response)
    }

    /// Issue a POST request with a JSON payload.
    fn post_json<T: DeserializeOwned>(
        &self,
        url: &str,
        payload: &serde_json::Value,
    ) -> Result<T, ConfluenceError> {
        let payload_bytes = serde_json::to_vec(payload)?;

        let response = self
            .agent
            .post(url)
            .header("Authorization", &self.auth_header)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .send(&payload_bytes[..])
            .map_err(|e| ConfluenceError::Http {
                status: 0,
                body: e.to_string(),
            })?;

        Self::read_response(response)
    }

    /// Check the response status and deserialize the body.
    fn read_response<T: DeserializeOwned>(
        response: ureq::http::Response<ureq::Body>,
    ) -> Result<T, ConfluenceError> {
        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(ConfluenceError::Http {
                status,
                body: error_body,
            });
        }

        Ok(body_reader.read_json()?)
    }
}
