//! Candidate status workflow as seen by the client.
//!
//! ```text
//! pending      -> interviewed | approved | rejected
//! interviewed  -> offered
//! approved, rejected, offered: terminal
//! ```
//!
//! The table only decides which actions are offered. The backend remains
//! the authority on whether a transition is accepted.

use crate::models::candidate::{Candidate, CandidateStatus};
use crate::models::user::Role;
use std::fmt;

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this candidate?";

pub fn status_change_prompt(status: CandidateStatus) -> String {
    format!("Are you sure you want to change status to {}?", status)
}

/// Button label for moving a candidate into `status`. `pending` is never a
/// transition target, so it has none.
pub fn transition_label(status: CandidateStatus) -> Option<&'static str> {
    match status {
        CandidateStatus::Interviewed => Some("Interview"),
        CandidateStatus::Approved => Some("Approve"),
        CandidateStatus::Rejected => Some("Reject"),
        CandidateStatus::Offered => Some("Offer"),
        CandidateStatus::Pending => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateAction {
    ViewHistory,
    Edit,
    ChangeStatus(CandidateStatus),
    Delete,
}

impl fmt::Display for CandidateAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidateAction::ViewHistory => f.write_str("History"),
            CandidateAction::Edit => f.write_str("Edit"),
            CandidateAction::ChangeStatus(status) => match transition_label(*status) {
                Some(label) => f.write_str(label),
                None => write!(f, "Move to {}", status),
            },
            CandidateAction::Delete => f.write_str("Delete"),
        }
    }
}

/// Row actions offered for `candidate` to a user holding `role`.
pub fn actions_for(candidate: &Candidate, role: Role) -> Vec<CandidateAction> {
    let mut actions = vec![CandidateAction::ViewHistory, CandidateAction::Edit];
    actions.extend(
        candidate
            .status
            .next_states()
            .iter()
            .map(|next| CandidateAction::ChangeStatus(*next)),
    );
    if role.can_delete_candidates() {
        actions.push(CandidateAction::Delete);
    }
    actions
}
