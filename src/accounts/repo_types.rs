use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Account row, one per student or admin.
///
/// `password_hash` only ever holds the argon2 output; every path that
/// writes the column (signup, re-signup while unverified, reset) hashes
/// first, and updates to other columns never touch it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub category: String,
    pub role: String,
    pub is_verified: bool,
    #[serde(skip_serializing)]
    pub otp: Option<String>,
    #[serde(skip_serializing)]
    pub otp_expire: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
}
