use crate::dto::candidate_dto::{CandidateFilter, CandidatePayload, StatusUpdate};
use crate::error::Result;
use crate::models::candidate::{Candidate, CandidateHistoryEntry, CandidateStatus};
use crate::models::dashboard::DashboardStats;
use crate::models::id::EntityId;
use crate::models::position::Position;
use crate::services::api_client::ApiClient;
use crate::utils::query::with_query;
use crate::utils::validation::validate;
use reqwest::Method;
use serde_json::Value as JsonValue;
use tracing::info;

#[derive(Clone)]
pub struct CandidateService {
    api: ApiClient,
}

impl CandidateService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self, filter: &CandidateFilter) -> Result<Vec<Candidate>> {
        let endpoint = with_query("/candidates", &filter.query_pairs());
        self.api.get(&endpoint).await
    }

    pub async fn create(&self, payload: &CandidatePayload) -> Result<JsonValue> {
        validate(payload)?;
        let created = self.api.send(Method::POST, "/candidates", payload).await?;
        info!(position = %payload.position, "Candidate registered");
        Ok(created)
    }

    pub async fn update(&self, id: &EntityId, payload: &CandidatePayload) -> Result<JsonValue> {
        validate(payload)?;
        let updated = self
            .api
            .send(Method::PUT, &format!("/candidates/{}", id), payload)
            .await?;
        info!(candidate_id = %id, "Candidate updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: &EntityId) -> Result<JsonValue> {
        let deleted = self
            .api
            .send_empty(Method::DELETE, &format!("/candidates/{}", id))
            .await?;
        info!(candidate_id = %id, "Candidate deleted");
        Ok(deleted)
    }

    pub async fn change_status(&self, id: &EntityId, status: CandidateStatus) -> Result<JsonValue> {
        let changed = self
            .api
            .send(
                Method::PATCH,
                &format!("/candidates/{}/status", id),
                &StatusUpdate { status },
            )
            .await?;
        info!(candidate_id = %id, status = %status, "Candidate status changed");
        Ok(changed)
    }

    pub async fn history(&self, id: &EntityId) -> Result<Vec<CandidateHistoryEntry>> {
        self.api.get(&format!("/candidates/{}/history", id)).await
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
        self.api.get("/dashboard/stats").await
    }

    pub async fn positions(&self) -> Result<Vec<Position>> {
        self.api.get("/positions").await
    }
}
