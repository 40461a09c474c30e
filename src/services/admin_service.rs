use crate::dto::admin_dto::{AuditLogQuery, UserStatusUpdate};
use crate::dto::auth_dto::RegisterUserPayload;
use crate::error::Result;
use crate::models::audit_log::AuditLogEntry;
use crate::models::id::EntityId;
use crate::models::user::User;
use crate::services::api_client::ApiClient;
use crate::utils::query::with_query;
use crate::utils::validation::validate;
use reqwest::Method;
use serde_json::Value as JsonValue;
use tracing::info;

/// Admin-only endpoints. The backend enforces the role; the client only
/// hides the panel from other roles.
#[derive(Clone)]
pub struct AdminService {
    api: ApiClient,
}

impl AdminService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn users(&self) -> Result<Vec<User>> {
        self.api.get("/admin/users").await
    }

    pub async fn audit_logs(&self, query: AuditLogQuery) -> Result<Vec<AuditLogEntry>> {
        let endpoint = with_query("/admin/audit-logs", &query.query_pairs());
        self.api.get(&endpoint).await
    }

    pub async fn register_user(&self, payload: &RegisterUserPayload) -> Result<JsonValue> {
        validate(payload)?;
        let created = self.api.send(Method::POST, "/auth/register", payload).await?;
        info!(username = %payload.username, role = %payload.role, "User created");
        Ok(created)
    }

    pub async fn set_user_status(&self, id: &EntityId, is_active: bool) -> Result<JsonValue> {
        let updated = self
            .api
            .send(
                Method::PATCH,
                &format!("/admin/users/{}/status", id),
                &UserStatusUpdate { is_active },
            )
            .await?;
        info!(user_id = %id, is_active, "User status updated");
        Ok(updated)
    }
}
