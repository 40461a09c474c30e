use crate::app::{ActionOutcome, App};
use crate::cli::args::{
    AdminCommand, CandidateCommand, CandidateFieldArgs, Command, FilterArgs, NewCandidateArgs,
    NotificationCommand,
};
use crate::cli::render;
use crate::dto::auth_dto::{LoginRequest, RegisterUserPayload};
use crate::dto::candidate_dto::{CandidateFilter, CandidatePayload};
use crate::error::{Error, Result};
use crate::models::EntityId;
use crate::state::Tab;
use tracing::debug;

/// Executes one command against `app` and returns the text to print.
pub async fn run(app: &App, command: Command) -> Result<String> {
    match command {
        Command::Login {
            tenant,
            username,
            password,
        } => {
            app.login(LoginRequest {
                username,
                password,
                tenant_name: tenant,
            })
            .await?;
            Ok(render::whoami(&app.snapshot()))
        }
        Command::Logout => {
            app.logout()?;
            Ok("Signed out".to_string())
        }
        command => {
            app.resume().await?;
            run_signed_in(app, command).await
        }
    }
}

async fn run_signed_in(app: &App, command: Command) -> Result<String> {
    match command {
        Command::Whoami => Ok(render::whoami(&app.snapshot())),
        Command::Dashboard => Ok(render::dashboard(&app.snapshot())),
        Command::Positions => Ok(render::positions(&app.snapshot().positions)),
        Command::Candidates(cmd) => candidates(app, cmd).await,
        Command::Notifications(cmd) => notifications(app, cmd).await,
        Command::Admin(cmd) => admin(app, cmd).await,
        Command::Login { .. } | Command::Logout => Ok(String::new()),
    }
}

async fn candidates(app: &App, command: CandidateCommand) -> Result<String> {
    match command {
        CandidateCommand::List(filter) => {
            open_list(app, filter).await?;
            Ok(render::candidates(&app.snapshot().candidates))
        }
        CandidateCommand::Add(args) => {
            app.create_candidate(new_payload(args)).await?;
            Ok(String::new())
        }
        CandidateCommand::Edit { id, fields } => {
            let payload = apply_fields(app.edit_form(&id)?, fields);
            app.update_candidate(&id, payload).await?;
            Ok(String::new())
        }
        CandidateCommand::Status { id, status } => {
            let outcome = app.change_status(&id, status).await?;
            Ok(outcome_text(outcome))
        }
        CandidateCommand::Actions { id } => {
            let snapshot = app.snapshot();
            let candidate = snapshot
                .candidate(&id)
                .ok_or_else(|| Error::NotFound(format!("Candidate {} not found", id)))?;
            Ok(render::actions(candidate, &snapshot.actions_for(&id)))
        }
        CandidateCommand::Delete { id } => {
            let outcome = app.delete_candidate(&id).await?;
            Ok(outcome_text(outcome))
        }
        CandidateCommand::History { id } => {
            app.view_history(&id).await?;
            let snapshot = app.snapshot();
            Ok(snapshot
                .history
                .as_ref()
                .map(render::history)
                .unwrap_or_default())
        }
        CandidateCommand::Export(filter) => {
            open_list(app, filter).await?;
            let path = app.export_csv()?;
            Ok(format!("Saved {}", path.display()))
        }
    }
}

/// Stores the filter first so opening the tab issues a single filtered fetch.
async fn open_list(app: &App, filter: FilterArgs) -> Result<()> {
    app.set_filter(CandidateFilter::new(filter.status, filter.search))
        .await?;
    app.set_tab(Tab::Candidates).await
}

async fn notifications(app: &App, command: NotificationCommand) -> Result<String> {
    match command {
        NotificationCommand::List => {
            let snapshot = app.snapshot();
            Ok(format!(
                "{} unread\n{}",
                snapshot.unread_notifications(),
                render::notifications(&snapshot.notifications)
            ))
        }
        NotificationCommand::Read { id } => {
            app.mark_notification_read(&id).await?;
            Ok(format!("Notification {} marked as read", id))
        }
    }
}

async fn admin(app: &App, command: AdminCommand) -> Result<String> {
    app.set_tab(Tab::Admin).await?;
    match command {
        AdminCommand::Users => Ok(render::users(&app.snapshot().users)),
        AdminCommand::Audit => Ok(render::audit_logs(&app.snapshot().audit_logs)),
        AdminCommand::CreateUser {
            username,
            email,
            password,
            full_name,
            role,
        } => {
            app.create_user(RegisterUserPayload {
                username,
                email,
                password,
                full_name,
                role,
            })
            .await?;
            Ok(String::new())
        }
        AdminCommand::Activate { id } => toggle_user(app, id, true).await,
        AdminCommand::Deactivate { id } => toggle_user(app, id, false).await,
    }
}

async fn toggle_user(app: &App, id: EntityId, is_active: bool) -> Result<String> {
    app.set_user_active(&id, is_active).await?;
    Ok(String::new())
}

fn outcome_text(outcome: ActionOutcome) -> String {
    match outcome {
        ActionOutcome::Completed => String::new(),
        ActionOutcome::Declined => {
            debug!("Action declined at the prompt");
            "Cancelled".to_string()
        }
    }
}

fn new_payload(args: NewCandidateArgs) -> CandidatePayload {
    CandidatePayload {
        name: args.name,
        email: args.email,
        phone: args.phone,
        position: args.position,
        resume: args.resume,
        cover_letter: args.cover_letter,
    }
}

fn apply_fields(mut payload: CandidatePayload, fields: CandidateFieldArgs) -> CandidatePayload {
    if let Some(name) = fields.name {
        payload.name = name;
    }
    if let Some(email) = fields.email {
        payload.email = email;
    }
    if let Some(phone) = fields.phone {
        payload.phone = phone;
    }
    if let Some(position) = fields.position {
        payload.position = position;
    }
    if let Some(resume) = fields.resume {
        payload.resume = resume;
    }
    if let Some(cover_letter) = fields.cover_letter {
        payload.cover_letter = cover_letter;
    }
    payload
}
