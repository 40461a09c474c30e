use crate::dto::candidate_dto::CandidateFilter;
use crate::models::{
    AuditLogEntry, Candidate, CandidateHistoryEntry, DashboardStats, EntityId, Notification,
    Position, Role, SessionUser, User,
};
use crate::services::session_service::Session;
use crate::workflow::{self, CandidateAction};
use chrono::{DateTime, Utc};
use std::fmt;

pub const RECENT_CANDIDATES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Dashboard,
    Candidates,
    Notifications,
    Admin,
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tab::Dashboard => "dashboard",
            Tab::Candidates => "candidates",
            Tab::Notifications => "notifications",
            Tab::Admin => "admin",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dashboard" => Ok(Tab::Dashboard),
            "candidates" => Ok(Tab::Candidates),
            "notifications" => Ok(Tab::Notifications),
            "admin" => Ok(Tab::Admin),
            other => Err(format!("Unknown tab: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticating,
    Authenticated(Session),
}

impl SessionState {
    pub fn user(&self) -> Option<&SessionUser> {
        match self {
            SessionState::Authenticated(session) => Some(&session.user),
            _ => None,
        }
    }
}

/// Success message with the moment it was raised; it disappears once the
/// configured TTL has passed.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryView {
    pub candidate_id: EntityId,
    pub candidate_name: Option<String>,
    pub entries: Vec<CandidateHistoryEntry>,
}

/// Mutable application state owned by [`crate::app::App`].
#[derive(Debug, Default)]
pub struct AppData {
    pub session: SessionState,
    pub tab: Tab,
    pub filter: CandidateFilter,
    pub candidates: Vec<Candidate>,
    pub notifications: Vec<Notification>,
    pub stats: DashboardStats,
    pub positions: Vec<Position>,
    pub users: Vec<User>,
    pub audit_logs: Vec<AuditLogEntry>,
    pub history: Option<HistoryView>,
    pub error: Option<String>,
    pub notice: Option<Notice>,
    pub in_flight: usize,
}

/// Read-only copy of the state for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct AppSnapshot {
    pub session: SessionState,
    pub tab: Tab,
    pub filter: CandidateFilter,
    pub candidates: Vec<Candidate>,
    pub notifications: Vec<Notification>,
    pub stats: DashboardStats,
    pub positions: Vec<Position>,
    pub users: Vec<User>,
    pub audit_logs: Vec<AuditLogEntry>,
    pub history: Option<HistoryView>,
    pub error: Option<String>,
    pub notice: Option<String>,
    pub loading: bool,
}

impl AppSnapshot {
    pub(crate) fn capture(data: &AppData) -> Self {
        Self {
            session: data.session.clone(),
            tab: data.tab,
            filter: data.filter.clone(),
            candidates: data.candidates.clone(),
            notifications: data.notifications.clone(),
            stats: data.stats,
            positions: data.positions.clone(),
            users: data.users.clone(),
            audit_logs: data.audit_logs.clone(),
            history: data.history.clone(),
            error: data.error.clone(),
            notice: data.notice.as_ref().map(|n| n.message.clone()),
            loading: data.in_flight > 0,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.session, SessionState::Authenticated(_))
    }

    pub fn current_user(&self) -> Option<&SessionUser> {
        self.session.user()
    }

    pub fn role(&self) -> Option<Role> {
        self.current_user().map(|u| u.role)
    }

    pub fn recent_candidates(&self) -> &[Candidate] {
        &self.candidates[..self.candidates.len().min(RECENT_CANDIDATES)]
    }

    pub fn unread_notifications(&self) -> usize {
        crate::models::notification::unread_count(&self.notifications)
    }

    pub fn candidate(&self, id: &EntityId) -> Option<&Candidate> {
        self.candidates.iter().find(|c| &c.id == id)
    }

    pub fn actions_for(&self, id: &EntityId) -> Vec<CandidateAction> {
        match (self.candidate(id), self.role()) {
            (Some(candidate), Some(role)) => workflow::actions_for(candidate, role),
            _ => Vec::new(),
        }
    }
}
