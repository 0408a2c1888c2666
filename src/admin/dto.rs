use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct AdminLoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AdminLoginResponse {
    pub success: bool,
    pub token: String,
    pub message: String,
}

/// Slim projection of an account for the admin "users" picker.
#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub name: String,
    pub email: String,
    pub category: String,
}
