use serde::{Deserialize, Serialize};

// Fields default to empty strings so a missing key answers with the
// API's own "All fields are required!" instead of a deserializer 422.

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifySignupRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub otp: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub otp: String,
    #[serde(default)]
    pub new_password: String,
}

/// Public part of the account echoed back on login. No id, no role —
/// the legacy frontend only knows these three fields.
#[derive(Debug, Serialize)]
pub struct PublicAccount {
    pub name: String,
    pub email: String,
    pub category: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub user: PublicAccount,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_response_shape() {
        let response = LoginResponse {
            success: true,
            user: PublicAccount {
                name: "Alice".into(),
                email: "a@x.com".into(),
                category: "physics".into(),
            },
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["user"]["name"], "Alice");
        assert_eq!(json["user"]["category"], "physics");
        assert!(json["user"].get("password").is_none());
    }

    #[test]
    fn reset_request_accepts_camel_case() {
        let req: ResetPasswordRequest = serde_json::from_str(
            r#"{"email":"a@x.com","otp":"123456","newPassword":"pw2"}"#,
        )
        .unwrap();
        assert_eq!(req.new_password, "pw2");
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let req: SignupRequest = serde_json::from_str(r#"{"email":"a@x.com"}"#).unwrap();
        assert!(req.name.is_empty());
        assert!(req.password.is_empty());
    }
}
