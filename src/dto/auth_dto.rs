use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::user::{Role, SessionUser};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    pub tenant_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: SessionUser,
}

/// Body of `POST /auth/register`, used by the admin panel to add accounts.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserPayload {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
    #[validate(length(min = 1))]
    pub full_name: String,
    #[serde(default = "default_new_user_role")]
    pub role: Role,
}

fn default_new_user_role() -> Role {
    Role::Recruiter
}

impl Default for RegisterUserPayload {
    fn default() -> Self {
        Self {
            username: String::new(),
            email: String::new(),
            password: String::new(),
            full_name: String::new(),
            role: default_new_user_role(),
        }
    }
}
