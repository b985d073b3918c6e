//! Content state operations for the Confluence API.
//!
//! Content states are space-scoped: setting a state by name first looks
//! up its ID in the space's state settings.

use serde_json::json;
use tracing::info;

use super::ConfluenceClient;
use crate::error::ConfluenceError;
use crate::types::{ContentState, ContentStateResponse, SpaceStatesResponse};

impl ConfluenceClient {
    /// Get the current content state of a page.
    pub fn get_page_state(&self, page_id: &str) -> Result<ContentStateResponse, ConfluenceError> {
        let url = format!("{}/content/{}/state", self.rest_api_url(), page_id);

        info!("Getting content state for page {}", page_id);

        self.get_json(&url)
    }

    /// List the content state definitions configured for a space.
    pub fn get_space_states(&self, space_key: &str) -> Result<Vec<ContentState>, ConfluenceError> {
        let url = format!("{}/space/{}/state/settings", self.rest_api_url(), space_key);

        info!("Getting content states for space {}", space_key);

        let response: SpaceStatesResponse = self.get_json(&url)?;
        Ok(response.space_content_states)
    }

    /// Set a page's content state by name.
    ///
    /// The state ID is resolved from the space's state settings with a
    /// case-insensitive name match.
    ///
    /// # Errors
    ///
    /// Returns [`ConfluenceError::StateNotFound`] if the space defines no
    /// state with the given name.
    pub fn set_page_state(
        &self,
        page_id: &str,
        state_name: &str,
        space_key: &str,
    ) -> Result<(), ConfluenceError> {
        let states = self.get_space_states(space_key)?;
        let id = state_id_by_name(&states, state_name).ok_or_else(|| {
            ConfluenceError::StateNotFound {
                name: state_name.to_owned(),
                space_key: space_key.to_owned(),
            }
        })?;

        let url = format!(
            "{}/content/{}/state?status=current",
            self.rest_api_url(),
            page_id
        );

        info!("Setting page {} state to {:?} (id {})", page_id, state_name, id);

        let _: serde_json::Value = self.put_json(&url, &json!({ "id": id }))?;
        Ok(())
    }
}

/// Find a state ID by case-insensitive name.
fn state_id_by_name(states: &[ContentState], name: &str) -> Option<i64> {
    states
        .iter()
        .find(|state| state.name.eq_ignore_ascii_case(name))
        .map(|state| state.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn states() -> Vec<ContentState> {
        vec![
            ContentState {
                id: 1,
                name: "Draft".to_owned(),
                color: None,
            },
            ContentState {
                id: 2,
                name: "Pending Internal Review".to_owned(),
                color: None,
            },
        ]
    }

    #[test]
    fn test_state_lookup_is_case_insensitive() {
        assert_eq!(
            state_id_by_name(&states(), "pending internal review"),
            Some(2)
        );
        assert_eq!(state_id_by_name(&states(), "DRAFT"), Some(1));
    }

    #[test]
    fn test_state_lookup_unknown_name() {
        assert_eq!(state_id_by_name(&states(), "Archived"), None);
    }
}
