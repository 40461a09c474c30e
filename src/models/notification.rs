use crate::models::id::EntityId;
use crate::utils::serde_flex::deserialize_bool_flexible;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: EntityId,
    pub message: String,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(
        default,
        alias = "isRead",
        deserialize_with = "deserialize_bool_flexible"
    )]
    pub is_read: bool,
}

pub fn unread_count(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| !n.is_read).count()
}
