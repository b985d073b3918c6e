//! Group directory operations for the Confluence API.

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::info;

use super::ConfluenceClient;
use crate::error::ConfluenceError;
use crate::types::{Group, GroupMember, GroupMembersResponse, GroupPickerResponse};

impl ConfluenceClient {
    /// Search the group directory and return the first match.
    ///
    /// # Errors
    ///
    /// Returns [`ConfluenceError::GroupNotFound`] if the search yields no
    /// results.
    pub fn find_group(&self, query: &str) -> Result<Group, ConfluenceError> {
        let url = format!(
            "{}/group/picker?query={}",
            self.rest_api_url(),
            utf8_percent_encode(query, NON_ALPHANUMERIC)
        );

        info!("Searching groups matching {:?}", query);

        let response: GroupPickerResponse = self.get_json(&url)?;
        response
            .results
            .into_iter()
            .next()
            .ok_or_else(|| ConfluenceError::GroupNotFound {
                query: query.to_owned(),
            })
    }

    /// List the members of a group by group ID.
    pub fn get_group_members(&self, group_id: &str) -> Result<Vec<GroupMember>, ConfluenceError> {
        let url = format!(
            "{}/group/{}/membersByGroupId",
            self.rest_api_url(),
            group_id
        );

        info!("Getting members of group {}", group_id);

        let response: GroupMembersResponse = self.get_json(&url)?;
        Ok(response.results)
    }

    /// Resolve a group name to its member email addresses.
    ///
    /// Two sequential calls: directory search by name, then member listing
    /// by the resolved group ID.
    pub fn group_emails(&self, group_name: &str) -> Result<Vec<String>, ConfluenceError> {
        let group = self.find_group(group_name)?;
        let members = self.get_group_members(&group.id)?;

        Ok(members.into_iter().map(|member| member.email).collect())
    }
}
