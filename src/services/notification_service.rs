use crate::error::Result;
use crate::models::id::EntityId;
use crate::models::notification::Notification;
use crate::services::api_client::ApiClient;
use reqwest::Method;
use serde_json::Value as JsonValue;

#[derive(Clone)]
pub struct NotificationService {
    api: ApiClient,
}

impl NotificationService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Notification>> {
        self.api.get("/notifications").await
    }

    pub async fn mark_read(&self, id: &EntityId) -> Result<JsonValue> {
        self.api
            .send_empty(Method::PATCH, &format!("/notifications/{}/read", id))
            .await
    }
}
