use crate::dto::auth_dto::{LoginRequest, LoginResponse};
use crate::error::Result;
use crate::models::user::SessionUser;
use crate::services::api_client::ApiClient;
use crate::storage::TokenStore;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: SessionUser,
}

#[derive(Clone)]
pub struct SessionService {
    api: ApiClient,
    tokens: Arc<dyn TokenStore>,
}

impl SessionService {
    pub fn new(api: ApiClient) -> Self {
        let tokens = api.tokens().clone();
        Self { api, tokens }
    }

    /// Authenticates and persists the returned token. Nothing is stored when
    /// the backend refuses the credentials.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<Session> {
        let response: LoginResponse = self
            .api
            .send(Method::POST, "/auth/login", credentials)
            .await?;
        self.tokens.save(&response.token)?;
        info!(
            username = %response.user.username,
            tenant = %credentials.tenant_name,
            "Signed in"
        );
        Ok(Session {
            token: response.token,
            user: response.user,
        })
    }

    /// Rebuilds the session from a persisted token. Any failure discards the
    /// token and yields `None`; nothing is surfaced to the user.
    pub async fn restore(&self) -> Option<Session> {
        let token = match self.tokens.load() {
            Ok(Some(token)) => token,
            Ok(None) => return None,
            Err(e) => {
                debug!(error = %e, "Could not read persisted token");
                return None;
            }
        };

        match self.api.get::<SessionUser>("/auth/me").await {
            Ok(user) => {
                info!(username = %user.username, "Session restored");
                Some(Session { token, user })
            }
            Err(e) => {
                debug!(error = %e, "Persisted token rejected; discarding it");
                if let Err(clear_err) = self.tokens.clear() {
                    warn!(error = %clear_err, "Could not discard rejected token");
                }
                None
            }
        }
    }

    pub fn logout(&self) -> Result<()> {
        self.tokens.clear()?;
        info!("Signed out");
        Ok(())
    }
}
