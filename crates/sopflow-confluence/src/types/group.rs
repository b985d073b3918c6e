//! Confluence group directory types.

use serde::Deserialize;

/// A user group.
#[derive(Debug, Clone, Deserialize)]
pub struct Group {
    /// Group ID.
    pub id: String,
    /// Group name.
    pub name: String,
}

/// Response of `GET /rest/api/group/picker`.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupPickerResponse {
    /// Matching groups.
    pub results: Vec<Group>,
}

/// A group member.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupMember {
    /// Member email address.
    pub email: String,
    /// Member display name.
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
}

/// Response of `GET /rest/api/group/{id}/membersByGroupId`.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupMembersResponse {
    /// Members in this batch.
    pub results: Vec<GroupMember>,
}
