use crate::models::id::EntityId;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateStatus {
    Pending,
    Interviewed,
    Approved,
    Rejected,
    Offered,
}

impl CandidateStatus {
    pub const ALL: [CandidateStatus; 5] = [
        CandidateStatus::Pending,
        CandidateStatus::Interviewed,
        CandidateStatus::Approved,
        CandidateStatus::Rejected,
        CandidateStatus::Offered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateStatus::Pending => "pending",
            CandidateStatus::Interviewed => "interviewed",
            CandidateStatus::Approved => "approved",
            CandidateStatus::Rejected => "rejected",
            CandidateStatus::Offered => "offered",
        }
    }

    /// States a recruiter may move a candidate to from here. Advisory only:
    /// the backend decides whether a transition is legal.
    pub fn next_states(&self) -> &'static [CandidateStatus] {
        match self {
            CandidateStatus::Pending => &[
                CandidateStatus::Interviewed,
                CandidateStatus::Approved,
                CandidateStatus::Rejected,
            ],
            CandidateStatus::Interviewed => &[CandidateStatus::Offered],
            CandidateStatus::Approved | CandidateStatus::Rejected | CandidateStatus::Offered => &[],
        }
    }

    pub fn can_transition_to(&self, next: CandidateStatus) -> bool {
        self.next_states().contains(&next)
    }
}

impl fmt::Display for CandidateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CandidateStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CandidateStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown candidate status: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub resume: Option<String>,
    #[serde(default, alias = "coverLetter")]
    pub cover_letter: Option<String>,
    pub status: CandidateStatus,
    #[serde(default, alias = "appliedDate")]
    pub applied_date: String,
}

/// One recorded status change, oldest first within a candidate's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateHistoryEntry {
    pub id: EntityId,
    pub status: CandidateStatus,
    #[serde(default, alias = "changedByName")]
    pub changed_by_name: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, alias = "createdAt")]
    pub created_at: String,
}

impl CandidateHistoryEntry {
    pub fn changed_by(&self) -> &str {
        self.changed_by_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or("System")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_offers_three_transitions() {
        assert_eq!(
            CandidateStatus::Pending.next_states(),
            &[
                CandidateStatus::Interviewed,
                CandidateStatus::Approved,
                CandidateStatus::Rejected
            ]
        );
    }

    #[test]
    fn interviewed_offers_only_offer() {
        assert_eq!(
            CandidateStatus::Interviewed.next_states(),
            &[CandidateStatus::Offered]
        );
        assert!(!CandidateStatus::Interviewed.can_transition_to(CandidateStatus::Approved));
    }

    #[test]
    fn decided_statuses_are_terminal() {
        for status in [
            CandidateStatus::Approved,
            CandidateStatus::Rejected,
            CandidateStatus::Offered,
        ] {
            assert!(status.next_states().is_empty(), "{} should be terminal", status);
        }
        assert!(!CandidateStatus::Pending.next_states().is_empty());
    }

    #[test]
    fn no_status_transitions_to_itself_or_back_to_pending() {
        for status in CandidateStatus::ALL {
            assert!(!status.can_transition_to(status));
            assert!(!status.can_transition_to(CandidateStatus::Pending));
        }
    }

    #[test]
    fn parses_wire_names() {
        assert_eq!("Offered".parse::<CandidateStatus>(), Ok(CandidateStatus::Offered));
        assert!("hired".parse::<CandidateStatus>().is_err());
    }

    #[test]
    fn deserializes_snake_and_camel_case() {
        let snake: Candidate = serde_json::from_str(
            r#"{"id": 3, "name": "Ann", "email": "a@x.com", "phone": "111",
                "position": "Dev", "status": "pending", "cover_letter": "hi",
                "applied_date": "2024-01-01"}"#,
        )
        .unwrap();
        let camel: Candidate = serde_json::from_str(
            r#"{"id": "3", "name": "Ann", "email": "a@x.com", "phone": "111",
                "position": "Dev", "status": "pending", "coverLetter": "hi",
                "appliedDate": "2024-01-01"}"#,
        )
        .unwrap();
        assert_eq!(snake, camel);
        assert_eq!(snake.cover_letter.as_deref(), Some("hi"));
    }

    #[test]
    fn history_without_author_reads_as_system() {
        let entry: CandidateHistoryEntry = serde_json::from_str(
            r#"{"id": 1, "status": "interviewed", "created_at": "2024-01-02T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(entry.changed_by(), "System");
    }
}
