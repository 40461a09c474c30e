use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatusUpdate {
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AuditLogQuery {
    pub limit: u32,
}

impl AuditLogQuery {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![("limit", self.limit.to_string())]
    }
}
