//! Email body templates for approval notifications.
//!
//! A side table maps (action, originating status) to a static body.
//! Bodies carry `[title]` and `[link]` placeholders which are
//! substituted first-occurrence-only.

use crate::status::{DocumentStatus, ReviewAction};

/// Placeholder for the page title.
const TITLE_TOKEN: &str = "[title]";
/// Placeholder for the page link.
const LINK_TOKEN: &str = "[link]";

const DRAFT_TO_INTERNAL_REVIEW: &str = "Dear internal reviewer,

Document \"[title]\" has been updated and sent for your review. Please approve or reject it for the workflow to proceed.
To reject, leave your comments on the page and click \"Reject\". To approve, click \"Approve\" to move it forward.

If you want to know where the changes are, confirm with the editor or look at the version history.

Review the document here:
[link]

Regards,
Knowledge Center";

const INTERNAL_TO_BUSINESS_REVIEW: &str = "Dear business reviewer,

Document \"[title]\" has been updated, approved by the internal reviewer and sent for your review. Please approve or reject it for the workflow to proceed.
To reject, leave your comments on the page and click \"Reject\". To approve, click \"Approve\" to move it forward.

If you want to know where the changes are, confirm with the editor or look at the version history.

Review the document here:
[link]

Regards,
Knowledge Center";

const INTERNAL_REJECTED_TO_DRAFT: &str = "Dear editor,

Document \"[title]\" has been rejected by the internal reviewer. Please review and update it before submitting it again.

The reviewer's comments are on the page; contact the reviewer if nothing was left.

Review the document here:
[link]

Regards,
Knowledge Center";

const BUSINESS_REJECTED_TO_DRAFT: &str = "Dear editor,

Document \"[title]\" has been rejected by the business reviewer. Please review and update it before submitting it again.

The reviewer's comments are on the page; contact the reviewer if nothing was left.

Review the document here:
[link]

Regards,
Knowledge Center";

const PUBLISHED: &str = "Dear all,

Document \"[title]\" has been updated and approved by all reviewers.

It is now officially published.

Visit the document here:
[link]

Regards,
Knowledge Center";

/// Select the email body template for an action and its originating
/// status.
///
/// Unmatched combinations resolve to an empty body, never an error.
/// Re-requesting review reuses the internal review body regardless of
/// origin.
pub fn select_template(action: ReviewAction, origin: Option<DocumentStatus>) -> &'static str {
    match (action, origin) {
        (ReviewAction::ReRequestReview, _) => DRAFT_TO_INTERNAL_REVIEW,
        (ReviewAction::Approve, Some(DocumentStatus::Draft)) => DRAFT_TO_INTERNAL_REVIEW,
        (ReviewAction::Approve, Some(DocumentStatus::PendingInternalReview)) => {
            INTERNAL_TO_BUSINESS_REVIEW
        }
        (ReviewAction::Approve, Some(DocumentStatus::PendingBusinessReview)) => PUBLISHED,
        (ReviewAction::Reject, Some(DocumentStatus::PendingInternalReview)) => {
            INTERNAL_REJECTED_TO_DRAFT
        }
        (ReviewAction::Reject, Some(DocumentStatus::PendingBusinessReview)) => {
            BUSINESS_REJECTED_TO_DRAFT
        }
        _ => "",
    }
}

/// Substitute the title and link placeholders (first occurrence only).
pub fn render_template(template: &str, page_title: &str, page_link: &str) -> String {
    template
        .replacen(TITLE_TOKEN, page_title, 1)
        .replacen(LINK_TOKEN, page_link, 1)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_select_template_covers_pipeline() {
        assert_eq!(
            select_template(ReviewAction::Approve, Some(DocumentStatus::Draft)),
            DRAFT_TO_INTERNAL_REVIEW
        );
        assert_eq!(
            select_template(
                ReviewAction::Approve,
                Some(DocumentStatus::PendingInternalReview)
            ),
            INTERNAL_TO_BUSINESS_REVIEW
        );
        assert_eq!(
            select_template(
                ReviewAction::Approve,
                Some(DocumentStatus::PendingBusinessReview)
            ),
            PUBLISHED
        );
        assert_eq!(
            select_template(
                ReviewAction::Reject,
                Some(DocumentStatus::PendingInternalReview)
            ),
            INTERNAL_REJECTED_TO_DRAFT
        );
        assert_eq!(
            select_template(
                ReviewAction::Reject,
                Some(DocumentStatus::PendingBusinessReview)
            ),
            BUSINESS_REJECTED_TO_DRAFT
        );
    }

    #[test]
    fn test_select_template_re_review_ignores_origin() {
        for origin in DocumentStatus::ALL {
            assert_eq!(
                select_template(ReviewAction::ReRequestReview, Some(origin)),
                DRAFT_TO_INTERNAL_REVIEW
            );
        }
        assert_eq!(
            select_template(ReviewAction::ReRequestReview, None),
            DRAFT_TO_INTERNAL_REVIEW
        );
    }

    #[test]
    fn test_select_template_unmatched_is_empty() {
        assert_eq!(select_template(ReviewAction::Approve, None), "");
        assert_eq!(
            select_template(ReviewAction::Reject, Some(DocumentStatus::Draft)),
            ""
        );
        assert_eq!(
            select_template(ReviewAction::Reject, Some(DocumentStatus::Published)),
            ""
        );
    }

    #[test]
    fn test_render_substitutes_each_token_once() {
        let template = select_template(
            ReviewAction::Approve,
            Some(DocumentStatus::PendingInternalReview),
        );
        let rendered = render_template(
            template,
            "Handling Procedure (ACME)",
            "https://wiki.example.com/pages/1",
        );

        assert!(!rendered.contains(TITLE_TOKEN));
        assert!(!rendered.contains(LINK_TOKEN));
        assert_eq!(rendered.matches("Handling Procedure (ACME)").count(), 1);
        assert_eq!(
            rendered.matches("https://wiki.example.com/pages/1").count(),
            1
        );
    }

    #[test]
    fn test_render_only_first_occurrence() {
        let rendered = render_template("[title] and [title]", "X", "Y");
        assert_eq!(rendered, "X and [title]");
    }
}
