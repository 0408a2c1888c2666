use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::accounts::password::verify_password_lenient;
use crate::accounts::repo_types::Account;
use crate::common::Ack;
use crate::error::ApiError;
use crate::state::AppState;

use super::dto::{AdminLoginRequest, AdminLoginResponse, UserSummary};

// Static sentinel tokens. They expire never, identify nobody, and the
// /admin/* routes don't even check them — kept for compatibility with
// the legacy panel, not as a credential.
const BUILTIN_ADMIN_USERNAME: &str = "admin";
const BUILTIN_ADMIN_PASSWORD: &str = "admin123";
const BUILTIN_ADMIN_TOKEN: &str = "admin-token";
const ACCOUNT_ADMIN_TOKEN: &str = "admin-access-token-123";

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin-login", post(admin_login))
        .route("/admin/students", get(list_students))
        .route("/admin/users", get(list_users))
        .route("/admin/delete-student/:id", delete(delete_student))
}

/// Fixed-credential shortcut checked before any store lookup.
fn builtin_admin_token(username: &str, password: &str) -> Option<&'static str> {
    (username == BUILTIN_ADMIN_USERNAME && password == BUILTIN_ADMIN_PASSWORD)
        .then_some(BUILTIN_ADMIN_TOKEN)
}

#[instrument(skip(state, payload))]
pub async fn admin_login(
    State(state): State<AppState>,
    Json(payload): Json<AdminLoginRequest>,
) -> Result<Json<AdminLoginResponse>, ApiError> {
    if let Some(token) = builtin_admin_token(&payload.username, &payload.password) {
        info!("built-in admin logged in");
        return Ok(Json(AdminLoginResponse {
            success: true,
            token: token.into(),
            message: "Login Successful".into(),
        }));
    }

    let admin = Account::find_by_name_or_email(&state.db, &payload.username)
        .await?
        .ok_or_else(|| ApiError::Auth("Admin not found!".into()))?;

    // Lenient on purpose: admin records created by hand may hold the
    // raw password instead of a hash.
    if !verify_password_lenient(&payload.password, &admin.password_hash) {
        warn!(username = %payload.username, "admin login with invalid password");
        return Err(ApiError::Auth("Invalid Password!".into()));
    }

    info!(username = %payload.username, "admin logged in");
    Ok(Json(AdminLoginResponse {
        success: true,
        token: ACCOUNT_ADMIN_TOKEN.into(),
        message: "Login Successful".into(),
    }))
}

#[instrument(skip(state))]
pub async fn list_students(
    State(state): State<AppState>,
) -> Result<Json<Vec<Account>>, ApiError> {
    // Serialization drops password_hash and the OTP columns.
    Ok(Json(Account::list_students(&state.db).await?))
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserSummary>>, ApiError> {
    let students = Account::list_students(&state.db).await?;
    let users = students
        .into_iter()
        .map(|a| UserSummary {
            name: a.name,
            email: a.email,
            category: a.category,
        })
        .collect();
    Ok(Json(users))
}

#[instrument(skip(state))]
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Ack>, ApiError> {
    Account::delete(&state.db, id).await?;
    Ok(Json(Ack::ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_credentials_mint_the_sentinel() {
        assert_eq!(builtin_admin_token("admin", "admin123"), Some("admin-token"));
        assert_eq!(builtin_admin_token("admin", "wrong"), None);
        assert_eq!(builtin_admin_token("root", "admin123"), None);
    }

    #[test]
    fn login_response_shape() {
        let response = AdminLoginResponse {
            success: true,
            token: ACCOUNT_ADMIN_TOKEN.into(),
            message: "Login Successful".into(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["token"], "admin-access-token-123");
        assert_eq!(json["success"], true);
    }
}
