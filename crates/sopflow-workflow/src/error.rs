//! Error types for the approval workflow.

use sopflow_confluence::ConfluenceError;

/// Error from processing a webhook event.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    /// A Confluence API call failed.
    #[error(transparent)]
    Confluence(#[from] ConfluenceError),

    /// The event payload is missing a field required by its event type.
    #[error("missing {0} in webhook payload")]
    MissingField(&'static str),
}
