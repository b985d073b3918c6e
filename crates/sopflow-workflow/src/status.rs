//! Approval pipeline statuses, review actions and the transition table.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Approval stage of a document page.
///
/// Serde names match the Confluence content state names and the webhook
/// payload values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentStatus {
    /// Being edited by the author.
    #[serde(rename = "Draft")]
    Draft,
    /// Awaiting internal reviewer approval.
    #[serde(rename = "Pending Internal Review")]
    PendingInternalReview,
    /// Awaiting business-unit reviewer approval.
    #[serde(rename = "Pending Business Review")]
    PendingBusinessReview,
    /// Approved by all reviewers.
    #[serde(rename = "Published")]
    Published,
}

impl DocumentStatus {
    /// All statuses, in pipeline order.
    pub const ALL: [Self; 4] = [
        Self::Draft,
        Self::PendingInternalReview,
        Self::PendingBusinessReview,
        Self::Published,
    ];

    /// The content state name used by the platform.
    pub fn name(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::PendingInternalReview => "Pending Internal Review",
            Self::PendingBusinessReview => "Pending Business Review",
            Self::Published => "Published",
        }
    }

    /// Parse a platform content state name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A request to move a page along the approval pipeline.
///
/// Supplied by the inbound event (`buttonType`), never inferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewAction {
    /// Move forward one stage.
    #[serde(rename = "approve")]
    Approve,
    /// Send back to the previous stage.
    #[serde(rename = "reject")]
    Reject,
    /// Restart the review from the top, regardless of current stage.
    #[serde(rename = "re-review")]
    ReRequestReview,
}

impl ReviewAction {
    /// All actions.
    pub const ALL: [Self; 3] = [Self::Approve, Self::Reject, Self::ReRequestReview];
}

/// Outcome of applying a review action to a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The transition is allowed; the page moves to the given status.
    Allowed(DocumentStatus),
    /// The transition is a no-op; the page stays where it is.
    NotAllowed,
}

impl Transition {
    /// Whether the transition is allowed.
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed(_))
    }

    /// The next status, if the transition is allowed.
    pub fn next(self) -> Option<DocumentStatus> {
        match self {
            Self::Allowed(next) => Some(next),
            Self::NotAllowed => None,
        }
    }
}

/// Compute the transition for a (status, action) pair.
///
/// Pure and total over the full product of statuses and actions.
/// Re-requesting review restarts the pipeline at internal review from
/// any status; approving a published page and rejecting a draft are
/// no-ops; rejecting a published page retracts it to business review.
pub fn transition(current: DocumentStatus, action: ReviewAction) -> Transition {
    match (current, action) {
        (_, ReviewAction::ReRequestReview) => {
            Transition::Allowed(DocumentStatus::PendingInternalReview)
        }
        (DocumentStatus::Draft, ReviewAction::Approve) => {
            Transition::Allowed(DocumentStatus::PendingInternalReview)
        }
        (DocumentStatus::Draft, ReviewAction::Reject) => Transition::NotAllowed,
        (DocumentStatus::PendingInternalReview, ReviewAction::Approve) => {
            Transition::Allowed(DocumentStatus::PendingBusinessReview)
        }
        (DocumentStatus::PendingInternalReview, ReviewAction::Reject) => {
            Transition::Allowed(DocumentStatus::Draft)
        }
        (DocumentStatus::PendingBusinessReview, ReviewAction::Approve) => {
            Transition::Allowed(DocumentStatus::Published)
        }
        (DocumentStatus::PendingBusinessReview, ReviewAction::Reject) => {
            Transition::Allowed(DocumentStatus::PendingInternalReview)
        }
        (DocumentStatus::Published, ReviewAction::Approve) => Transition::NotAllowed,
        (DocumentStatus::Published, ReviewAction::Reject) => {
            Transition::Allowed(DocumentStatus::PendingBusinessReview)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::DocumentStatus::{
        Draft, PendingBusinessReview, PendingInternalReview, Published,
    };
    use super::ReviewAction::{Approve, ReRequestReview, Reject};
    use super::*;

    #[test]
    fn test_transition_table_exhaustive() {
        // Every cell of the 4x3 product, in one table.
        let expected = [
            (Draft, Approve, Transition::Allowed(PendingInternalReview)),
            (Draft, Reject, Transition::NotAllowed),
            (Draft, ReRequestReview, Transition::Allowed(PendingInternalReview)),
            (
                PendingInternalReview,
                Approve,
                Transition::Allowed(PendingBusinessReview),
            ),
            (PendingInternalReview, Reject, Transition::Allowed(Draft)),
            (
                PendingInternalReview,
                ReRequestReview,
                Transition::Allowed(PendingInternalReview),
            ),
            (PendingBusinessReview, Approve, Transition::Allowed(Published)),
            (
                PendingBusinessReview,
                Reject,
                Transition::Allowed(PendingInternalReview),
            ),
            (
                PendingBusinessReview,
                ReRequestReview,
                Transition::Allowed(PendingInternalReview),
            ),
            (Published, Approve, Transition::NotAllowed),
            (Published, Reject, Transition::Allowed(PendingBusinessReview)),
            (Published, ReRequestReview, Transition::Allowed(PendingInternalReview)),
        ];

        assert_eq!(
            expected.len(),
            DocumentStatus::ALL.len() * ReviewAction::ALL.len()
        );
        for (current, action, outcome) in expected {
            assert_eq!(
                transition(current, action),
                outcome,
                "transition({current:?}, {action:?})"
            );
        }
    }

    #[test]
    fn test_re_request_review_always_restarts_pipeline() {
        for status in DocumentStatus::ALL {
            assert_eq!(
                transition(status, ReRequestReview),
                Transition::Allowed(PendingInternalReview)
            );
        }
    }

    #[test]
    fn test_transition_accessors() {
        let allowed = transition(Draft, Approve);
        assert!(allowed.is_allowed());
        assert_eq!(allowed.next(), Some(PendingInternalReview));

        let refused = transition(Published, Approve);
        assert!(!refused.is_allowed());
        assert_eq!(refused.next(), None);
    }

    #[test]
    fn test_status_name_round_trip() {
        for status in DocumentStatus::ALL {
            assert_eq!(DocumentStatus::from_name(status.name()), Some(status));
        }
        assert_eq!(
            DocumentStatus::from_name("pending internal review"),
            Some(PendingInternalReview)
        );
        assert_eq!(DocumentStatus::from_name("Archived"), None);
    }

    #[test]
    fn test_action_wire_names() {
        assert_eq!(serde_json::to_string(&Approve).unwrap(), "\"approve\"");
        assert_eq!(
            serde_json::from_str::<ReviewAction>("\"re-review\"").unwrap(),
            ReRequestReview
        );
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&PendingBusinessReview).unwrap(),
            "\"Pending Business Review\""
        );
        assert_eq!(
            serde_json::from_str::<DocumentStatus>("\"Draft\"").unwrap(),
            Draft
        );
    }
}
