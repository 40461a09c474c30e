pub mod audit_log;
pub mod candidate;
pub mod dashboard;
pub mod id;
pub mod notification;
pub mod position;
pub mod user;

pub use audit_log::AuditLogEntry;
pub use candidate::{Candidate, CandidateHistoryEntry, CandidateStatus};
pub use dashboard::DashboardStats;
pub use id::EntityId;
pub use notification::Notification;
pub use position::Position;
pub use user::{Role, SessionUser, User};
