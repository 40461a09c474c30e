use crate::models::id::EntityId;
use serde::{Deserialize, Serialize};

/// Server-owned audit record. `action` is usually CREATE, UPDATE or DELETE
/// but the set is open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: EntityId,
    #[serde(default, alias = "createdAt")]
    pub created_at: String,
    #[serde(default)]
    pub username: Option<String>,
    pub action: String,
    #[serde(default, alias = "entityType")]
    pub entity_type: String,
    #[serde(default, alias = "entityId")]
    pub entity_id: Option<EntityId>,
    #[serde(default, alias = "ipAddress")]
    pub ip_address: Option<String>,
}

impl AuditLogEntry {
    pub fn target(&self) -> String {
        match &self.entity_id {
            Some(id) => format!("{} #{}", self.entity_type, id),
            None => self.entity_type.clone(),
        }
    }
}
