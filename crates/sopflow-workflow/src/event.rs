//! Inbound webhook event types.

use serde::Deserialize;

use crate::status::{DocumentStatus, ReviewAction};

/// An inbound webhook event.
///
/// `event_type` is mandatory; its absence is a validation failure at the
/// dispatcher boundary. Every other field depends on the event type.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEvent {
    /// Event type tag.
    #[serde(default)]
    pub event_type: Option<String>,
    /// Page the event concerns.
    #[serde(default)]
    pub page: Option<PageRef>,
    /// User who triggered the event.
    #[serde(default)]
    pub user: Option<UserRef>,
    /// Group attached to the event.
    #[serde(default)]
    pub group: Option<GroupRef>,
    /// Review action requested by the page button.
    #[serde(default, deserialize_with = "lenient")]
    pub button_type: Option<ReviewAction>,
    /// Space key scoping state definitions.
    #[serde(default)]
    pub space_key: Option<String>,
    /// Status the page is transitioning from.
    #[serde(default, deserialize_with = "lenient")]
    pub origin_state: Option<DocumentStatus>,
    /// Display name of the page author.
    #[serde(default)]
    pub author_name: Option<String>,
    /// Explicit status change requested by the caller.
    #[serde(default)]
    pub actions: Option<RequestedActions>,
}

/// Page reference carried by an event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRef {
    /// Page ID.
    pub id: String,
    /// Page title (informational; the platform copy is authoritative).
    #[serde(default)]
    pub title: Option<String>,
    /// Page web URL.
    #[serde(default)]
    pub url: Option<String>,
}

/// User reference carried by an event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    /// Display name.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Platform user key.
    #[serde(default)]
    pub user_key: Option<String>,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
}

/// Group reference carried by an event.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupRef {
    /// Group ID.
    pub id: String,
    /// Group name.
    pub name: String,
}

/// Deserialize a value, mapping anything outside the expected enum to
/// `None` instead of rejecting the whole payload.
///
/// Statuses and actions the pipeline does not know flow into the
/// "not allowed" / empty-routing outcomes rather than a parse failure.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// Explicit status change requested alongside an update event.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestedActions {
    /// Target status the caller expects the page to move to.
    pub change_status_to: DocumentStatus,
}
