//! Confluence REST API client for the sopflow approval workflow.
//!
//! Provides a sync HTTP client for the Confluence Cloud REST API using
//! basic authentication (service account username + API token). Covers
//! the endpoints the approval workflow consumes: pages, content states,
//! group directory lookups and footer comments.

mod client;
mod error;
pub mod types;

pub use client::{ConfluenceClient, PageQuery};
pub use error::ConfluenceError;
