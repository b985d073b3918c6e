//! Webhook event orchestration.
//!
//! One [`ApprovalWorkflow`] handles one event: it applies the requested
//! state transition through the platform, computes recipient groups off
//! the post-transition status, fans out to the group directory for
//! member emails, and assembles the notification plan. No email is sent
//! here; the plan carries recipients and body for an external mailer.

use rayon::prelude::*;
use serde::Serialize;
use sopflow_confluence::types::ContentState;
use sopflow_confluence::{ConfluenceClient, PageQuery};
use tracing::{debug, warn};

use crate::error::WorkflowError;
use crate::event::{PageRef, WebhookEvent};
use crate::routing::{ReviewGroups, exclude_matching_cc, recipient_groups};
use crate::status::{DocumentStatus, ReviewAction, Transition, transition};
use crate::templates::{render_template, select_template};

/// Processes webhook events against the content platform.
pub struct ApprovalWorkflow {
    client: ConfluenceClient,
}

/// Result of processing one event, serialized into the webhook response.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum EventOutcome {
    /// Recipients and body for a status-change notification.
    Notification(NotificationPlan),
    /// Content state definitions for a space.
    States {
        #[serde(rename = "allStates")]
        all_states: Vec<ContentState>,
    },
    /// Change-detection result.
    PageChanged {
        #[serde(rename = "isChanged")]
        is_changed: bool,
    },
    /// Conditional status revert result.
    StatusReverted {
        #[serde(rename = "statusChanged")]
        status_changed: bool,
    },
    /// The event type is not handled by this service (not an error).
    Unhandled { message: String },
}

/// Computed recipients and body for one notification.
///
/// Ephemeral: exists only for the duration of one webhook invocation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPlan {
    /// Primary recipient email addresses.
    pub to_emails: Vec<String>,
    /// Carbon-copy email addresses.
    pub cc_emails: Vec<String>,
    /// Group names whose directory lookup failed; the plan is partial.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unresolved_groups: Vec<String>,
    /// Author display name, passed through from the event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    /// Page title.
    pub page_title: String,
    /// Rendered email body (empty for unmapped action/status pairs).
    pub email_body: String,
}

impl ApprovalWorkflow {
    /// Create a workflow around a Confluence client.
    pub fn new(client: ConfluenceClient) -> Self {
        Self { client }
    }

    /// Dispatch an event by its type.
    ///
    /// Unknown event types are a successful no-op, not an error. The
    /// caller validates that `event_type` is present.
    pub fn handle_event(&self, event: &WebhookEvent) -> Result<EventOutcome, WorkflowError> {
        match event.event_type.as_deref().unwrap_or_default() {
            "page_updated_get_emails" => self.notify_on_update(event),
            "get_all_states" => {
                let space_key = require_space_key(event)?;
                let all_states = self.client.get_space_states(space_key)?;
                Ok(EventOutcome::States { all_states })
            }
            "is_page_changed" => {
                let page = require_page(event)?;
                let is_changed = self.is_page_changed(&page.id)?;
                Ok(EventOutcome::PageChanged { is_changed })
            }
            "change_status_if_page_changed" => self.revert_if_changed(event),
            other => Ok(EventOutcome::Unhandled {
                message: format!("Unhandled event type: {other}"),
            }),
        }
    }

    /// Handle `page_updated_get_emails`: apply the transition, then
    /// compute the notification plan.
    fn notify_on_update(&self, event: &WebhookEvent) -> Result<EventOutcome, WorkflowError> {
        let page_ref = require_page(event)?;

        if let (Some(action), Some(origin)) = (event.button_type, event.origin_state) {
            self.apply_transition(event, page_ref, action, origin)?;
        }

        // Recipients are selected from the page's *current* state as the
        // platform reports it after the transition.
        let state = self.client.get_page_state(&page_ref.id)?;
        let page = self.client.get_page(&page_ref.id, PageQuery::default())?;

        let groups = ReviewGroups::from_page_title(&page.title);
        let current = DocumentStatus::from_name(&state.content_state.name);
        if current.is_none() {
            warn!(
                state = %state.content_state.name,
                page = %page_ref.id,
                "Page is in a state outside the approval pipeline; no recipients"
            );
        }
        let recipients = current
            .map(|current| recipient_groups(current, event.origin_state, &groups))
            .unwrap_or_default();

        let (to_lists, mut unresolved_groups) = self.resolve_groups(&recipients.to);
        let (cc_lists, unresolved_cc) = self.resolve_groups(&recipients.cc);
        unresolved_groups.extend(unresolved_cc);

        let cc_lists = exclude_matching_cc(&to_lists, cc_lists);

        let link = match &page_ref.url {
            Some(url) => url.clone(),
            None => self.client.page_url(&page),
        };
        let template = event
            .button_type
            .map_or("", |action| select_template(action, event.origin_state));
        let email_body = render_template(template, &page.title, &link);

        Ok(EventOutcome::Notification(NotificationPlan {
            to_emails: flatten_unique(to_lists),
            cc_emails: flatten_unique(cc_lists),
            unresolved_groups,
            author_name: event.author_name.clone(),
            page_title: page.title,
            email_body,
        }))
    }

    /// Persist the transition the event requests, if the table allows it.
    ///
    /// The transition table is authoritative: an explicit
    /// `actions.changeStatusTo` that disagrees with it is logged and
    /// ignored, and a disallowed transition leaves the page untouched.
    fn apply_transition(
        &self,
        event: &WebhookEvent,
        page_ref: &PageRef,
        action: ReviewAction,
        origin: DocumentStatus,
    ) -> Result<(), WorkflowError> {
        match transition(origin, action) {
            Transition::Allowed(next) => {
                let space_key = require_space_key(event)?;

                if let Some(requested) = event.actions.map(|a| a.change_status_to)
                    && requested != next
                {
                    warn!(
                        requested = %requested,
                        computed = %next,
                        "Requested status differs from transition table; using computed status"
                    );
                }

                self.client
                    .set_page_state(&page_ref.id, next.name(), space_key)?;

                if action == ReviewAction::Reject {
                    self.record_rejection(page_ref, event, next);
                }
            }
            Transition::NotAllowed => {
                debug!(
                    origin = %origin,
                    action = ?action,
                    page = %page_ref.id,
                    "Transition not allowed; state unchanged"
                );
            }
        }
        Ok(())
    }

    /// Leave an audit note on the page when it is sent back. Best-effort:
    /// the notification plan is still produced if the comment fails.
    fn record_rejection(&self, page_ref: &PageRef, event: &WebhookEvent, next: DocumentStatus) {
        let author = event.author_name.as_deref().unwrap_or("the reviewer");
        let note = format!("<p>Returned to {next} by {author} after review.</p>");

        if let Err(error) = self.client.add_footer_comment(&page_ref.id, &note) {
            warn!(page = %page_ref.id, %error, "Failed to add rejection comment");
        }
    }

    /// Resolve group names to email lists with independent concurrent
    /// lookups.
    ///
    /// A failed lookup is a hard failure for that group only: it is
    /// logged, reported in the returned name list, and does not block
    /// the other groups.
    fn resolve_groups(&self, names: &[String]) -> (Vec<Vec<String>>, Vec<String>) {
        let results: Vec<(String, Result<Vec<String>, _>)> = names
            .par_iter()
            .map(|name| (name.clone(), self.client.group_emails(name)))
            .collect();

        let mut resolved = Vec::new();
        let mut unresolved = Vec::new();
        for (name, result) in results {
            match result {
                Ok(emails) => resolved.push(emails),
                Err(error) => {
                    warn!(group = %name, %error, "Group resolution failed");
                    unresolved.push(name);
                }
            }
        }
        (resolved, unresolved)
    }

    /// Compare the storage-format body of the current page version
    /// against the immediately preceding version.
    fn is_page_changed(&self, page_id: &str) -> Result<bool, WorkflowError> {
        let current = self.client.get_page(
            page_id,
            PageQuery {
                version: None,
                body_format: Some("storage"),
            },
        )?;

        // A first version has nothing to diff against.
        if current.version.number <= 1 {
            debug!(page = %page_id, "First version; treating as changed");
            return Ok(true);
        }

        let previous = self.client.get_page(
            page_id,
            PageQuery {
                version: Some(current.version.number - 1),
                body_format: Some("storage"),
            },
        )?;

        Ok(current.storage_body() != previous.storage_body())
    }

    /// Handle `change_status_if_page_changed`: force the page back to
    /// Draft when its content moved since the last version.
    fn revert_if_changed(&self, event: &WebhookEvent) -> Result<EventOutcome, WorkflowError> {
        let page = require_page(event)?;
        let status_changed = self.is_page_changed(&page.id)?;

        if status_changed {
            let space_key = require_space_key(event)?;
            self.client
                .set_page_state(&page.id, DocumentStatus::Draft.name(), space_key)?;
        }

        Ok(EventOutcome::StatusReverted { status_changed })
    }
}

fn require_page(event: &WebhookEvent) -> Result<&PageRef, WorkflowError> {
    event.page.as_ref().ok_or(WorkflowError::MissingField("page"))
}

fn require_space_key(event: &WebhookEvent) -> Result<&str, WorkflowError> {
    event
        .space_key
        .as_deref()
        .ok_or(WorkflowError::MissingField("spaceKey"))
}

/// Flatten per-group email lists into one deduplicated list, preserving
/// order.
fn flatten_unique(lists: Vec<Vec<String>>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    lists
        .into_iter()
        .flatten()
        .filter(|email| seen.insert(email.clone()))
        .collect()
}
