use serde::Deserialize;

/// Outbound mail provider settings. Only required when signup
/// verification is enabled.
#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    pub api_url: String,
    pub api_key: String,
    pub from: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    /// Email OTP verification on signup / password reset. When off the
    /// server behaves like the legacy deployment: accounts are created
    /// already verified and the reset flow is disabled.
    pub verification_enabled: bool,
    pub mail: Option<MailConfig>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;

        let verification_enabled = match std::env::var("VERIFICATION").ok().as_deref() {
            Some("disabled") => false,
            Some("enabled") | None => true,
            Some(other) => anyhow::bail!("VERIFICATION must be enabled or disabled, got {other:?}"),
        };

        let mail = match std::env::var("MAIL_API_URL").ok() {
            Some(api_url) => Some(MailConfig {
                api_url,
                api_key: std::env::var("MAIL_API_KEY")?,
                from: std::env::var("MAIL_FROM")
                    .unwrap_or_else(|_| "no-reply@classhub.local".into()),
                timeout_secs: std::env::var("MAIL_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(5),
            }),
            None => None,
        };

        if verification_enabled && mail.is_none() {
            anyhow::bail!("MAIL_API_URL is required while VERIFICATION=enabled");
        }

        Ok(Self {
            database_url,
            verification_enabled,
            mail,
        })
    }
}
