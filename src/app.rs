use crate::config::Config;
use crate::confirm::Confirm;
use crate::dto::admin_dto::AuditLogQuery;
use crate::dto::auth_dto::{LoginRequest, RegisterUserPayload};
use crate::dto::candidate_dto::{CandidateFilter, CandidatePayload};
use crate::error::{Error, Result};
use crate::models::{CandidateHistoryEntry, CandidateStatus, EntityId, SessionUser};
use crate::services::export_service::ExportService;
use crate::state::{AppData, AppSnapshot, HistoryView, Notice, SessionState, Tab};
use crate::storage::TokenStore;
use crate::utils::sequence::{Resource, Sequencer};
use crate::utils::time;
use crate::workflow;
use crate::AppState;
use chrono::{DateTime, Utc};
use std::future::Future;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, error, warn};

pub const SIGN_IN_REQUIRED: &str = "Please sign in first";
pub const ADMIN_REQUIRED: &str = "Admin access required";
pub const HISTORY_LOAD_FAILED: &str = "Failed to load history";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Completed,
    /// The user answered no to the confirmation prompt; nothing was sent.
    Declined,
}

#[derive(Debug, Clone, Copy)]
enum Reload {
    Overview,
    AdminPanel,
}

/// Application controller. Every user action is a method; views read state
/// through [`App::snapshot`]. The state lock is never held across an await.
pub struct App {
    config: Config,
    state: AppState,
    confirm: Arc<dyn Confirm>,
    sequencer: Sequencer,
    data: Mutex<AppData>,
}

struct LoadingGuard<'a> {
    data: &'a Mutex<AppData>,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let mut data = lock(self.data);
        data.in_flight = data.in_flight.saturating_sub(1);
    }
}

fn lock(data: &Mutex<AppData>) -> MutexGuard<'_, AppData> {
    data.lock().unwrap_or_else(|e| e.into_inner())
}

impl App {
    pub fn new(
        config: Config,
        tokens: Arc<dyn TokenStore>,
        confirm: Arc<dyn Confirm>,
    ) -> Result<Self> {
        let state = AppState::new(&config, tokens)?;
        Ok(Self::with_state(config, state, confirm))
    }

    pub fn with_state(config: Config, state: AppState, confirm: Arc<dyn Confirm>) -> Self {
        Self {
            config,
            state,
            confirm,
            sequencer: Sequencer::new(),
            data: Mutex::new(AppData::default()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn snapshot(&self) -> AppSnapshot {
        self.snapshot_at(time::now())
    }

    /// Snapshot as of `at`; a success notice older than the banner TTL is
    /// dropped first.
    pub fn snapshot_at(&self, at: DateTime<Utc>) -> AppSnapshot {
        let mut data = self.data();
        let expired = data
            .notice
            .as_ref()
            .is_some_and(|n| time::has_elapsed(n.raised_at, self.config.banner_ttl, at));
        if expired {
            data.notice = None;
        }
        AppSnapshot::capture(&data)
    }

    pub fn dismiss_error(&self) {
        self.data().error = None;
    }

    // ---- session -------------------------------------------------------

    pub async fn login(&self, credentials: LoginRequest) -> Result<()> {
        {
            let mut data = self.data();
            data.error = None;
            data.session = SessionState::Authenticating;
        }

        let outcome = {
            let _loading = self.begin();
            self.state.session_service.login(&credentials).await
        };

        match outcome {
            Ok(session) => {
                let greeting = format!("Welcome, {}!", session.user.display_name());
                {
                    let mut data = self.data();
                    data.session = SessionState::Authenticated(session);
                    data.tab = Tab::Dashboard;
                }
                self.notify(greeting);
                self.reload(Reload::Overview).await;
                Ok(())
            }
            Err(e) => {
                self.data().session = SessionState::Anonymous;
                self.fail(e)
            }
        }
    }

    /// Startup path: resumes the persisted session if the backend still
    /// accepts its token. Failure is silent.
    pub async fn restore(&self) -> bool {
        let restored = self.restore_session().await;
        if restored {
            self.reload(Reload::Overview).await;
        }
        restored
    }

    /// Resumes the persisted session and loads the overview, failing when
    /// there is no usable session or the load does not complete.
    pub async fn resume(&self) -> Result<()> {
        if !self.restore_session().await {
            return Err(Error::Unauthorized(SIGN_IN_REQUIRED.to_string()));
        }
        self.load_all().await
    }

    async fn restore_session(&self) -> bool {
        let restored = {
            let _loading = self.begin();
            self.state.session_service.restore().await
        };

        let mut data = self.data();
        match restored {
            Some(session) => {
                data.session = SessionState::Authenticated(session);
                true
            }
            None => {
                data.session = SessionState::Anonymous;
                false
            }
        }
    }

    /// Drops the persisted token and every piece of in-memory state.
    pub fn logout(&self) -> Result<()> {
        self.sequencer.reset();
        *self.data() = AppData::default();
        self.state.session_service.logout()
    }

    // ---- navigation ----------------------------------------------------

    pub async fn set_tab(&self, tab: Tab) -> Result<()> {
        let user = self.current_user()?;
        if tab == Tab::Admin && !user.role.is_admin() {
            return Err(Error::Forbidden(ADMIN_REQUIRED.to_string()));
        }
        self.data().tab = tab;
        match tab {
            Tab::Candidates => self.load_filtered().await,
            Tab::Admin => self.load_admin_data().await,
            Tab::Dashboard | Tab::Notifications => Ok(()),
        }
    }

    /// Stores the list filter and, on the candidates tab, re-fetches when it
    /// changed.
    pub async fn set_filter(&self, filter: CandidateFilter) -> Result<()> {
        self.current_user()?;
        let should_reload = {
            let mut data = self.data();
            let changed = data.filter != filter;
            data.filter = filter.clone();
            changed && data.tab == Tab::Candidates
        };
        if should_reload {
            self.fetch_filtered(filter).await
        } else {
            Ok(())
        }
    }

    // ---- loading -------------------------------------------------------

    /// Fetches candidates, notifications, stats and positions concurrently.
    /// Either all four are applied or none is.
    pub async fn load_all(&self) -> Result<()> {
        self.current_user()?;
        self.clear_error();
        let _loading = self.begin();

        let batch = self.sequencer.issue(Resource::Overview);
        let list = self.sequencer.issue(Resource::CandidateList);
        let unfiltered = CandidateFilter::default();

        let fetched = tokio::try_join!(
            self.state.candidate_service.list(&unfiltered),
            self.state.notification_service.list(),
            self.state.candidate_service.dashboard_stats(),
            self.state.candidate_service.positions(),
        );

        let (candidates, notifications, stats, positions) = match fetched {
            Ok(collections) => collections,
            Err(e) => return self.fail(e),
        };

        if !self.sequencer.is_latest(batch) {
            debug!("Discarding superseded dashboard load");
            return Ok(());
        }

        let mut data = self.data();
        if self.sequencer.is_latest(list) {
            data.candidates = candidates;
        } else {
            debug!("Keeping newer candidate list over dashboard load");
        }
        data.notifications = notifications;
        data.stats = stats;
        data.positions = positions;
        Ok(())
    }

    /// Re-fetches the candidate list with the current filter. Failures are
    /// logged and returned but never shown in the banner.
    pub async fn load_filtered(&self) -> Result<()> {
        self.current_user()?;
        let filter = self.data().filter.clone();
        self.fetch_filtered(filter).await
    }

    async fn fetch_filtered(&self, filter: CandidateFilter) -> Result<()> {
        let ticket = self.sequencer.issue(Resource::CandidateList);
        let fetched = {
            let _loading = self.begin();
            self.state.candidate_service.list(&filter).await
        };
        match fetched {
            Ok(candidates) => {
                if self.sequencer.is_latest(ticket) {
                    self.data().candidates = candidates;
                } else {
                    debug!(filter = ?filter, "Discarding superseded candidate list");
                }
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Error loading candidates");
                Err(e)
            }
        }
    }

    pub async fn load_admin_data(&self) -> Result<()> {
        self.require_admin()?;
        self.clear_error();
        let _loading = self.begin();

        let ticket = self.sequencer.issue(Resource::AdminPanel);
        let query = AuditLogQuery {
            limit: self.config.audit_log_limit,
        };

        let fetched = tokio::try_join!(
            self.state.admin_service.users(),
            self.state.admin_service.audit_logs(query),
        );

        match fetched {
            Ok((users, audit_logs)) => {
                if self.sequencer.is_latest(ticket) {
                    let mut data = self.data();
                    data.users = users;
                    data.audit_logs = audit_logs;
                } else {
                    debug!("Discarding superseded admin panel load");
                }
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    // ---- candidates ----------------------------------------------------

    pub async fn create_candidate(&self, payload: CandidatePayload) -> Result<()> {
        self.current_user()?;
        self.mutate(
            self.state.candidate_service.create(&payload),
            "Candidate registered successfully!",
            Reload::Overview,
        )
        .await
    }

    /// Edit form pre-filled from the cached record.
    pub fn edit_form(&self, id: &EntityId) -> Result<CandidatePayload> {
        self.data()
            .candidates
            .iter()
            .find(|c| &c.id == id)
            .map(CandidatePayload::from)
            .ok_or_else(|| Error::NotFound(format!("Candidate {} not found", id)))
    }

    pub async fn update_candidate(&self, id: &EntityId, payload: CandidatePayload) -> Result<()> {
        self.current_user()?;
        self.mutate(
            self.state.candidate_service.update(id, &payload),
            "Candidate updated successfully!",
            Reload::Overview,
        )
        .await
    }

    pub async fn delete_candidate(&self, id: &EntityId) -> Result<ActionOutcome> {
        self.current_user()?;
        if !self.confirm.confirm(workflow::DELETE_PROMPT) {
            return Ok(ActionOutcome::Declined);
        }
        self.mutate(
            self.state.candidate_service.delete(id),
            "Candidate deleted successfully!",
            Reload::Overview,
        )
        .await?;
        Ok(ActionOutcome::Completed)
    }

    /// Confirms, sends the transition, then reloads everything. Nothing is
    /// applied optimistically, so a refused transition leaves state as it was.
    pub async fn change_status(
        &self,
        id: &EntityId,
        status: CandidateStatus,
    ) -> Result<ActionOutcome> {
        self.current_user()?;

        let current = self
            .data()
            .candidates
            .iter()
            .find(|c| &c.id == id)
            .map(|c| c.status);
        if let Some(current) = current {
            if !current.can_transition_to(status) {
                warn!(
                    candidate_id = %id,
                    from = %current,
                    to = %status,
                    "Transition is not offered for this status; sending anyway"
                );
            }
        }

        if !self.confirm.confirm(&workflow::status_change_prompt(status)) {
            return Ok(ActionOutcome::Declined);
        }

        self.mutate(
            self.state.candidate_service.change_status(id, status),
            format!("Status changed to {}!", status),
            Reload::Overview,
        )
        .await?;
        Ok(ActionOutcome::Completed)
    }

    pub async fn view_history(&self, id: &EntityId) -> Result<Vec<CandidateHistoryEntry>> {
        self.current_user()?;
        self.clear_error();
        let fetched = {
            let _loading = self.begin();
            self.state.candidate_service.history(id).await
        };
        match fetched {
            Ok(entries) => {
                let mut data = self.data();
                let candidate_name = data
                    .candidates
                    .iter()
                    .find(|c| &c.id == id)
                    .map(|c| c.name.clone());
                data.history = Some(HistoryView {
                    candidate_id: id.clone(),
                    candidate_name,
                    entries: entries.clone(),
                });
                Ok(entries)
            }
            Err(e) => {
                error!(candidate_id = %id, error = %e, "Failed to load candidate history");
                self.data().error = Some(HISTORY_LOAD_FAILED.to_string());
                Err(e)
            }
        }
    }

    /// Serializes the loaded list (not the full backend set) and saves it as
    /// `candidates-<epoch ms>.csv` in the export directory.
    pub fn export_csv(&self) -> Result<PathBuf> {
        let content = self.export_csv_content();
        ExportService::save_download(&self.config.export_dir, &content, time::now())
    }

    pub fn export_csv_content(&self) -> String {
        let data = self.data();
        ExportService::render_candidates_csv(&data.candidates, self.config.csv_dialect)
    }

    // ---- notifications -------------------------------------------------

    /// One-way unread to read. Already-read entries cost no request; on
    /// success only that entry's flag changes.
    pub async fn mark_notification_read(&self, id: &EntityId) -> Result<()> {
        self.current_user()?;
        let is_read = self
            .data()
            .notifications
            .iter()
            .find(|n| &n.id == id)
            .map(|n| n.is_read);

        match is_read {
            None => Err(Error::NotFound(format!("Notification {} not found", id))),
            Some(true) => Ok(()),
            Some(false) => {
                self.clear_error();
                let outcome = {
                    let _loading = self.begin();
                    self.state.notification_service.mark_read(id).await
                };
                if let Err(e) = outcome {
                    return self.fail(e);
                }
                let mut data = self.data();
                if let Some(n) = data.notifications.iter_mut().find(|n| &n.id == id) {
                    n.is_read = true;
                }
                Ok(())
            }
        }
    }

    // ---- admin ---------------------------------------------------------

    pub async fn create_user(&self, payload: RegisterUserPayload) -> Result<()> {
        self.require_admin()?;
        self.mutate(
            self.state.admin_service.register_user(&payload),
            "User created successfully!",
            Reload::AdminPanel,
        )
        .await
    }

    pub async fn set_user_active(&self, id: &EntityId, is_active: bool) -> Result<()> {
        self.require_admin()?;
        let message = if is_active {
            "User activated."
        } else {
            "User deactivated."
        };
        self.mutate(
            self.state.admin_service.set_user_status(id, is_active),
            message,
            Reload::AdminPanel,
        )
        .await
    }

    // ---- helpers -------------------------------------------------------

    fn data(&self) -> MutexGuard<'_, AppData> {
        lock(&self.data)
    }

    fn begin(&self) -> LoadingGuard<'_> {
        self.data().in_flight += 1;
        LoadingGuard { data: &self.data }
    }

    fn notify(&self, message: impl Into<String>) {
        self.data().notice = Some(Notice {
            message: message.into(),
            raised_at: time::now(),
        });
    }

    fn clear_error(&self) {
        self.data().error = None;
    }

    fn fail<T>(&self, err: Error) -> Result<T> {
        self.data().error = Some(err.user_message());
        Err(err)
    }

    fn current_user(&self) -> Result<SessionUser> {
        self.data()
            .session
            .user()
            .cloned()
            .ok_or_else(|| Error::Unauthorized(SIGN_IN_REQUIRED.to_string()))
    }

    fn require_admin(&self) -> Result<SessionUser> {
        let user = self.current_user()?;
        if user.role.is_admin() {
            Ok(user)
        } else {
            Err(Error::Forbidden(ADMIN_REQUIRED.to_string()))
        }
    }

    /// Runs one state-changing request: clears the error banner, holds the
    /// loading flag while it is in flight, then announces success and
    /// reloads the affected view.
    async fn mutate<T>(
        &self,
        request: impl Future<Output = Result<T>>,
        success: impl Into<String>,
        reload: Reload,
    ) -> Result<()> {
        self.clear_error();
        let outcome = {
            let _loading = self.begin();
            request.await
        };
        match outcome {
            Ok(_) => {
                self.notify(success);
                self.reload(reload).await;
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    async fn reload(&self, reload: Reload) {
        let result = match reload {
            Reload::Overview => self.load_all().await,
            Reload::AdminPanel => self.load_admin_data().await,
        };
        if let Err(e) = result {
            debug!(error = %e, ?reload, "Reload after action failed");
        }
    }
}
