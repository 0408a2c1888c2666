use axum::{extract::State, routing::post, Json, Router};
use lazy_static::lazy_static;
use regex::Regex;
use time::OffsetDateTime;
use tracing::{info, instrument, warn};

use crate::common::MessageResponse;
use crate::error::ApiError;
use crate::state::AppState;

use super::dto::{
    ForgotPasswordRequest, LoginRequest, LoginResponse, PublicAccount, ResetPasswordRequest,
    SignupRequest, VerifySignupRequest,
};
use super::otp;
use super::password::{hash_password, verify_password};
use super::repo_types::Account;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/signup", post(signup))
        .route("/api/verify-signup", post(verify_signup))
        .route("/api/login", post(login))
        .route("/api/forgot-password", post(forgot_password))
        .route("/api/reset-password", post(reset_password))
}

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(mut payload): Json<SignupRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();
    let name = payload.name.trim().to_string();
    let category = payload.category.trim().to_string();

    if name.is_empty() || payload.email.is_empty() || payload.password.is_empty() || category.is_empty()
    {
        return Err(ApiError::Validation("All fields are required!".into()));
    }
    if !is_valid_email(&payload.email) {
        return Err(ApiError::Validation("Invalid email".into()));
    }

    if !state.config.verification_enabled {
        return signup_direct(&state, &name, &payload.email, &payload.password, &category).await;
    }

    let existing = Account::find_by_email(&state.db, &payload.email).await?;
    if let Some(account) = &existing {
        if account.is_verified {
            warn!(email = %payload.email, "signup for already verified email");
            return Err(ApiError::Conflict("Email already registered!".into()));
        }
    }

    let hash = hash_password(&payload.password)?;
    let code = otp::generate_otp();
    let expire = otp::expiry();

    match existing {
        // Unverified account: overwrite the profile and re-issue a
        // fresh code instead of rejecting the signup.
        Some(account) => {
            Account::resignup(&state.db, account.id, &name, &hash, &category, &code, expire)
                .await?;
        }
        None => {
            let created = Account::create(
                &state.db,
                &name,
                &payload.email,
                &hash,
                &category,
                false,
                Some(&code),
                Some(expire),
            )
            .await?;
            if created.is_none() {
                // Lost the insert race to a concurrent signup; same
                // answer as the sequential duplicate.
                return Err(ApiError::Conflict("Email already registered!".into()));
            }
        }
    }

    state
        .mailer
        .send(
            &payload.email,
            "Verify your email",
            &format!("Your verification code is {code}. It expires in {} minutes.", otp::OTP_TTL_MINUTES),
        )
        .await
        .map_err(|e| {
            warn!(email = %payload.email, error = %e, "OTP mail failed, account stays unverified");
            ApiError::Delivery(e.to_string())
        })?;

    info!(email = %payload.email, "signup pending verification");
    Ok(Json(MessageResponse::ok("OTP sent to your email!")))
}

/// Signup with verification disabled: accounts are born verified, any
/// existing email is a conflict, no mail leaves the building.
async fn signup_direct(
    state: &AppState,
    name: &str,
    email: &str,
    password: &str,
    category: &str,
) -> Result<Json<MessageResponse>, ApiError> {
    if Account::find_by_email(&state.db, email).await?.is_some() {
        return Err(ApiError::Conflict("Email already registered!".into()));
    }

    let hash = hash_password(password)?;
    let created =
        Account::create(&state.db, name, email, &hash, category, true, None, None).await?;
    if created.is_none() {
        return Err(ApiError::Conflict("Email already registered!".into()));
    }

    info!(%email, "registered without verification");
    Ok(Json(MessageResponse::ok(
        "Registration successful! You can login now.",
    )))
}

/// Decides a submitted code against the stored account state. Failure
/// reasons stay distinct on purpose: the frontend shows them verbatim.
fn check_otp_submission(
    account: &Account,
    submitted: &str,
    now: OffsetDateTime,
) -> Result<(), ApiError> {
    if account.is_verified {
        return Err(ApiError::Validation("Already verified!".into()));
    }
    match account.otp.as_deref() {
        Some(stored) if stored == submitted => {}
        _ => return Err(ApiError::Validation("Invalid OTP!".into())),
    }
    if otp::is_expired(account.otp_expire, now) {
        return Err(ApiError::Validation("OTP expired!".into()));
    }
    Ok(())
}

#[instrument(skip(state, payload))]
pub async fn verify_signup(
    State(state): State<AppState>,
    Json(mut payload): Json<VerifySignupRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.config.verification_enabled {
        // Everyone is auto-verified; the endpoint survives for the
        // frontend's sake.
        return Ok(Json(MessageResponse::ok("Already verified!")));
    }

    payload.email = payload.email.trim().to_lowercase();
    let account = Account::find_by_email(&state.db, &payload.email)
        .await?
        .ok_or_else(|| ApiError::Validation("User not found!".into()))?;

    check_otp_submission(&account, &payload.otp, OffsetDateTime::now_utc())?;

    Account::mark_verified(&state.db, account.id).await?;
    info!(email = %payload.email, "email verified");
    Ok(Json(MessageResponse::ok(
        "Email verified successfully! You can login now.",
    )))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    // Unknown email and wrong password answer identically so the
    // endpoint does not confirm which addresses hold accounts.
    let invalid = || ApiError::Auth("Invalid email or password!".into());

    let account = Account::find_by_email(&state.db, &payload.email)
        .await?
        .ok_or_else(invalid)?;

    // A stored value that does not parse as a hash cannot belong to a
    // student record; treat it as a mismatch, not a server error.
    let ok = verify_password(&payload.password, &account.password_hash).unwrap_or(false);
    if !ok {
        warn!(email = %payload.email, "login with invalid password");
        return Err(invalid());
    }

    if state.config.verification_enabled && !account.is_verified {
        return Err(ApiError::Auth("Please verify your email first!".into()));
    }

    info!(email = %account.email, "student logged in");
    Ok(Json(LoginResponse {
        success: true,
        user: PublicAccount {
            name: account.name,
            email: account.email,
            category: account.category,
        },
    }))
}

#[instrument(skip(state, payload))]
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(mut payload): Json<ForgotPasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.config.verification_enabled {
        return Ok(Json(MessageResponse::ok(
            "Please contact admin to reset password (Email service disabled).",
        )));
    }

    payload.email = payload.email.trim().to_lowercase();
    let account = Account::find_by_email(&state.db, &payload.email)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found!".into()))?;

    let code = otp::generate_otp();
    Account::set_otp(&state.db, account.id, &code, otp::expiry()).await?;

    state
        .mailer
        .send(
            &payload.email,
            "Password reset code",
            &format!("Your password reset code is {code}. It expires in {} minutes.", otp::OTP_TTL_MINUTES),
        )
        .await
        .map_err(|e| {
            warn!(email = %payload.email, error = %e, "reset mail failed");
            ApiError::Delivery(e.to_string())
        })?;

    info!(email = %payload.email, "password reset code issued");
    Ok(Json(MessageResponse::ok("OTP sent to your email!")))
}

#[instrument(skip(state, payload))]
pub async fn reset_password(
    State(state): State<AppState>,
    Json(mut payload): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.config.verification_enabled {
        return Err(ApiError::Validation(
            "Password reset is currently disabled.".into(),
        ));
    }

    payload.email = payload.email.trim().to_lowercase();
    if payload.email.is_empty() || payload.otp.is_empty() || payload.new_password.is_empty() {
        return Err(ApiError::Validation("All fields are required!".into()));
    }

    let hash = hash_password(&payload.new_password)?;
    let updated = Account::reset_password(&state.db, &payload.email, &payload.otp, &hash).await?;
    if !updated {
        return Err(ApiError::Validation("Invalid or expired OTP!".into()));
    }

    info!(email = %payload.email, "password reset");
    Ok(Json(MessageResponse::ok(
        "Password reset successful! You can login now.",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Duration;
    use uuid::Uuid;

    fn pending_account(code: &str, expire: OffsetDateTime) -> Account {
        Account {
            id: Uuid::new_v4(),
            name: "Alice".into(),
            email: "a@x.com".into(),
            password_hash: "$argon2id$fake".into(),
            category: "physics".into(),
            role: "student".into(),
            is_verified: false,
            otp: Some(code.into()),
            otp_expire: Some(expire),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    fn message_of(err: ApiError) -> String {
        err.to_string()
    }

    #[test]
    fn wrong_code_is_rejected_before_expiry() {
        let now = OffsetDateTime::now_utc();
        // Expired AND wrong: the mismatch wins, matching the frontend's
        // expectations.
        let account = pending_account("123456", now - Duration::minutes(1));
        let err = check_otp_submission(&account, "654321", now).unwrap_err();
        assert_eq!(message_of(err), "Invalid OTP!");
    }

    #[test]
    fn expired_code_is_rejected() {
        let now = OffsetDateTime::now_utc();
        let account = pending_account("123456", now - Duration::seconds(1));
        let err = check_otp_submission(&account, "123456", now).unwrap_err();
        assert_eq!(message_of(err), "OTP expired!");
    }

    #[test]
    fn matching_unexpired_code_passes() {
        let now = OffsetDateTime::now_utc();
        let account = pending_account("123456", now + Duration::minutes(5));
        assert!(check_otp_submission(&account, "123456", now).is_ok());
    }

    #[test]
    fn verified_accounts_cannot_reverify() {
        let now = OffsetDateTime::now_utc();
        let mut account = pending_account("123456", now + Duration::minutes(5));
        account.is_verified = true;
        let err = check_otp_submission(&account, "123456", now).unwrap_err();
        assert_eq!(message_of(err), "Already verified!");
    }

    #[test]
    fn cleared_code_never_matches() {
        let now = OffsetDateTime::now_utc();
        let mut account = pending_account("123456", now + Duration::minutes(5));
        account.otp = None;
        let err = check_otp_submission(&account, "123456", now).unwrap_err();
        assert_eq!(message_of(err), "Invalid OTP!");
    }

    #[test]
    fn email_validation_matches_simple_addresses() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email("first.last@school.edu.bd"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("spaces in@mail.com"));
    }
}
