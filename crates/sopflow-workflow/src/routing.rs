//! Notification routing: group naming and recipient selection.
//!
//! The routing key is the parenthesized segment of the page title
//! ("Handling Procedure (ACME)" → "ACME"); reviewer and editor group
//! names are derived from it with fixed suffixes. Recipient groups are
//! selected from the page's post-transition status, with the origin
//! status disambiguating rejections.

use std::sync::LazyLock;

use regex::Regex;

use crate::status::DocumentStatus;

static PARENTHESES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\((.*?)\)").unwrap());

/// Extract the content of the first parenthesized segment of a string.
///
/// Returns an empty string when no parentheses are present; when several
/// groups exist, only the first is returned.
pub fn extract_parenthesized(text: &str) -> &str {
    PARENTHESES_RE
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map_or("", |m| m.as_str())
}

/// The review group names derived from a page's routing token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewGroups {
    token: String,
}

impl ReviewGroups {
    /// Derive group names from a page title.
    pub fn from_page_title(title: &str) -> Self {
        Self {
            token: extract_parenthesized(title).to_owned(),
        }
    }

    /// The editor group name.
    pub fn editors(&self) -> String {
        format!("{}_Editor", self.token)
    }

    /// The internal reviewer group name.
    pub fn internal_reviewers(&self) -> String {
        format!("{}_Internal Reviewer", self.token)
    }

    /// The business-unit reviewer group name.
    pub fn business_reviewers(&self) -> String {
        format!("{}_Business Reviewer", self.token)
    }
}

/// Recipient group names for one notification, split into channels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipientGroups {
    /// Primary recipients.
    pub to: Vec<String>,
    /// Carbon-copy recipients.
    pub cc: Vec<String>,
}

/// Select recipient groups for a page's current (post-transition) status.
///
/// `origin` is the status the page transitioned from; it only matters
/// for Draft, where it identifies which review stage produced the
/// rejection. A Draft notification with no usable origin resolves to no
/// recipients.
pub fn recipient_groups(
    current: DocumentStatus,
    origin: Option<DocumentStatus>,
    groups: &ReviewGroups,
) -> RecipientGroups {
    match current {
        DocumentStatus::PendingInternalReview => RecipientGroups {
            to: vec![groups.internal_reviewers()],
            cc: vec![groups.editors()],
        },
        DocumentStatus::PendingBusinessReview => RecipientGroups {
            to: vec![groups.business_reviewers()],
            cc: vec![groups.internal_reviewers()],
        },
        DocumentStatus::Published => RecipientGroups {
            to: vec![
                groups.editors(),
                groups.internal_reviewers(),
                groups.business_reviewers(),
            ],
            cc: Vec::new(),
        },
        DocumentStatus::Draft => match origin {
            Some(DocumentStatus::PendingInternalReview) => RecipientGroups {
                to: vec![groups.editors()],
                cc: vec![groups.internal_reviewers()],
            },
            Some(DocumentStatus::PendingBusinessReview) => RecipientGroups {
                to: vec![groups.editors()],
                cc: vec![groups.business_reviewers(), groups.internal_reviewers()],
            },
            _ => RecipientGroups::default(),
        },
    }
}

/// Drop cc email lists that exactly match a "to" email list.
///
/// Prevents a group from being notified on both channels when the same
/// membership backs both.
pub fn exclude_matching_cc(to: &[Vec<String>], cc: Vec<Vec<String>>) -> Vec<Vec<String>> {
    cc.into_iter()
        .filter(|emails| !to.iter().any(|to_emails| to_emails == emails))
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_extract_parenthesized_none() {
        assert_eq!(extract_parenthesized("Handling Procedure"), "");
    }

    #[test]
    fn test_extract_parenthesized_single() {
        assert_eq!(extract_parenthesized("Handling Procedure (ACME)"), "ACME");
    }

    #[test]
    fn test_extract_parenthesized_multiple_takes_first() {
        assert_eq!(extract_parenthesized("Title (ONE) suffix (TWO)"), "ONE");
    }

    #[test]
    fn test_extract_parenthesized_empty_group() {
        assert_eq!(extract_parenthesized("Title ()"), "");
    }

    fn groups() -> ReviewGroups {
        ReviewGroups::from_page_title("Handling Procedure (ACME)")
    }

    #[test]
    fn test_group_names() {
        let groups = groups();
        assert_eq!(groups.editors(), "ACME_Editor");
        assert_eq!(groups.internal_reviewers(), "ACME_Internal Reviewer");
        assert_eq!(groups.business_reviewers(), "ACME_Business Reviewer");
    }

    #[test]
    fn test_recipients_pending_internal_review() {
        let recipients = recipient_groups(DocumentStatus::PendingInternalReview, None, &groups());
        assert_eq!(recipients.to, vec!["ACME_Internal Reviewer"]);
        assert_eq!(recipients.cc, vec!["ACME_Editor"]);
    }

    #[test]
    fn test_recipients_pending_business_review() {
        let recipients = recipient_groups(DocumentStatus::PendingBusinessReview, None, &groups());
        assert_eq!(recipients.to, vec!["ACME_Business Reviewer"]);
        assert_eq!(recipients.cc, vec!["ACME_Internal Reviewer"]);
    }

    #[test]
    fn test_recipients_published_notifies_everyone() {
        let recipients = recipient_groups(DocumentStatus::Published, None, &groups());
        assert_eq!(
            recipients.to,
            vec![
                "ACME_Editor",
                "ACME_Internal Reviewer",
                "ACME_Business Reviewer"
            ]
        );
        assert!(recipients.cc.is_empty());
    }

    #[test]
    fn test_recipients_draft_after_internal_rejection() {
        let recipients = recipient_groups(
            DocumentStatus::Draft,
            Some(DocumentStatus::PendingInternalReview),
            &groups(),
        );
        assert_eq!(recipients.to, vec!["ACME_Editor"]);
        assert_eq!(recipients.cc, vec!["ACME_Internal Reviewer"]);
    }

    #[test]
    fn test_recipients_draft_after_business_rejection() {
        let recipients = recipient_groups(
            DocumentStatus::Draft,
            Some(DocumentStatus::PendingBusinessReview),
            &groups(),
        );
        assert_eq!(recipients.to, vec!["ACME_Editor"]);
        assert_eq!(
            recipients.cc,
            vec!["ACME_Business Reviewer", "ACME_Internal Reviewer"]
        );
    }

    #[test]
    fn test_recipients_draft_without_origin() {
        let recipients = recipient_groups(DocumentStatus::Draft, None, &groups());
        assert_eq!(recipients, RecipientGroups::default());
    }

    #[test]
    fn test_exclude_matching_cc_drops_duplicates() {
        let to = vec![vec!["a@example.com".to_owned(), "b@example.com".to_owned()]];
        let cc = vec![
            vec!["a@example.com".to_owned(), "b@example.com".to_owned()],
            vec!["c@example.com".to_owned()],
        ];

        let filtered = exclude_matching_cc(&to, cc);
        assert_eq!(filtered, vec![vec!["c@example.com".to_owned()]]);
    }

    #[test]
    fn test_exclude_matching_cc_keeps_partial_overlap() {
        let to = vec![vec!["a@example.com".to_owned(), "b@example.com".to_owned()]];
        let cc = vec![vec!["a@example.com".to_owned()]];

        // Only exact list matches are excluded.
        let filtered = exclude_matching_cc(&to, cc.clone());
        assert_eq!(filtered, cc);
    }
}
