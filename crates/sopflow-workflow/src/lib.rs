//! Approval pipeline core for sopflow.
//!
//! Drives a document page through a linear approval pipeline
//! (draft → internal review → business review → published) and computes
//! which notification groups should be emailed at each transition.
//!
//! The pipeline is a small finite state machine ([`transition`]) wrapped
//! around sequential calls to the Confluence REST API. The wiki platform
//! is the system of record; nothing here persists state of its own, and
//! every entity except the page itself lives only for the duration of
//! one webhook event.

mod error;
mod event;
mod handler;
mod routing;
mod status;
mod templates;

pub use error::WorkflowError;
pub use event::{GroupRef, PageRef, RequestedActions, UserRef, WebhookEvent};
pub use handler::{ApprovalWorkflow, EventOutcome, NotificationPlan};
pub use routing::{
    RecipientGroups, ReviewGroups, exclude_matching_cc, extract_parenthesized, recipient_groups,
};
pub use status::{DocumentStatus, ReviewAction, Transition, transition};
pub use templates::{render_template, select_template};
