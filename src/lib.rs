pub mod app;
pub mod cli;
pub mod config;
pub mod confirm;
pub mod dto;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;
pub mod workflow;

use crate::services::{
    admin_service::AdminService, api_client::ApiClient, candidate_service::CandidateService,
    notification_service::NotificationService, session_service::SessionService,
};
use crate::storage::TokenStore;
use std::sync::Arc;

pub use app::{ActionOutcome, App};
pub use config::Config;
pub use error::{Error, Result};

/// Backend-facing services sharing one HTTP client and token store.
#[derive(Clone)]
pub struct AppState {
    pub api: ApiClient,
    pub session_service: SessionService,
    pub candidate_service: CandidateService,
    pub notification_service: NotificationService,
    pub admin_service: AdminService,
}

impl AppState {
    pub fn new(config: &Config, tokens: Arc<dyn TokenStore>) -> Result<Self> {
        let api = ApiClient::new(config.api_base_url.clone(), tokens)?;

        let session_service = SessionService::new(api.clone());
        let candidate_service = CandidateService::new(api.clone());
        let notification_service = NotificationService::new(api.clone());
        let admin_service = AdminService::new(api.clone());

        Ok(Self {
            api,
            session_service,
            candidate_service,
            notification_service,
            admin_service,
        })
    }
}
