use clap::{Args, Parser, Subcommand};

use crate::dto::candidate_dto::StatusFilter;
use crate::models::{CandidateStatus, EntityId, Role};

/// Terminal client for the candidate tracking service
#[derive(Parser, Debug)]
#[command(name = "candidate-console")]
#[command(version)]
#[command(about = "Track candidates, statuses and notifications from the terminal", long_about = None)]
pub struct Cli {
    /// Answer yes to every confirmation prompt
    #[arg(short = 'y', long = "yes", global = true)]
    pub yes: bool,

    /// Backend base URL (overrides API_BASE_URL)
    #[arg(long = "api-url", global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and remember the session
    Login {
        #[arg(long = "tenant")]
        tenant: String,
        #[arg(long = "username")]
        username: String,
        #[arg(long = "password", env = "CANDIDATE_CONSOLE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Status counters and recent applications
    Dashboard,
    /// Open positions
    Positions,
    #[command(subcommand)]
    Candidates(CandidateCommand),
    #[command(subcommand)]
    Notifications(NotificationCommand),
    #[command(subcommand)]
    Admin(AdminCommand),
}

#[derive(Subcommand, Debug)]
pub enum CandidateCommand {
    /// List candidates, optionally filtered server-side
    List(FilterArgs),
    /// Register a new candidate
    Add(NewCandidateArgs),
    /// Edit an existing candidate; omitted fields keep their current value
    Edit {
        id: EntityId,
        #[command(flatten)]
        fields: CandidateFieldArgs,
    },
    /// Move a candidate to another status
    Status {
        id: EntityId,
        status: CandidateStatus,
    },
    /// Show the actions available for a candidate
    Actions { id: EntityId },
    /// Delete a candidate
    Delete { id: EntityId },
    /// Show a candidate's status history
    History { id: EntityId },
    /// Save the listed candidates as CSV
    Export(FilterArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    #[arg(long = "status", default_value = "all")]
    pub status: StatusFilter,
    #[arg(long = "search", default_value = "")]
    pub search: String,
}

#[derive(Args, Debug)]
pub struct NewCandidateArgs {
    #[arg(long = "name")]
    pub name: String,
    #[arg(long = "email")]
    pub email: String,
    #[arg(long = "phone")]
    pub phone: String,
    #[arg(long = "position")]
    pub position: String,
    #[arg(long = "resume", default_value = "")]
    pub resume: String,
    #[arg(long = "cover-letter", default_value = "")]
    pub cover_letter: String,
}

#[derive(Args, Debug, Default)]
pub struct CandidateFieldArgs {
    #[arg(long = "name")]
    pub name: Option<String>,
    #[arg(long = "email")]
    pub email: Option<String>,
    #[arg(long = "phone")]
    pub phone: Option<String>,
    #[arg(long = "position")]
    pub position: Option<String>,
    #[arg(long = "resume")]
    pub resume: Option<String>,
    #[arg(long = "cover-letter")]
    pub cover_letter: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum NotificationCommand {
    /// List notifications
    List,
    /// Mark one notification as read
    Read { id: EntityId },
}

#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    /// List user accounts
    Users,
    /// Show recent audit log entries
    Audit,
    /// Create a user account
    CreateUser {
        #[arg(long = "username")]
        username: String,
        #[arg(long = "email")]
        email: String,
        #[arg(long = "password", env = "CANDIDATE_CONSOLE_NEW_USER_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long = "full-name")]
        full_name: String,
        #[arg(long = "role", default_value = "recruiter")]
        role: Role,
    },
    /// Re-enable a user account
    Activate { id: EntityId },
    /// Disable a user account
    Deactivate { id: EntityId },
}
