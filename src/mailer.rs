use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::config::MailConfig;

/// Outbound mail delivery. Constructed once at startup and injected
/// through `AppState`; handlers treat a send failure as terminal for
/// the request.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()>;
}

/// Delivers through an HTTP mail provider (JSON API, bearer key).
pub struct HttpMailer {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    from: String,
}

impl HttpMailer {
    pub fn new(config: &MailConfig) -> anyhow::Result<Self> {
        // The per-request timeout keeps a hung provider from stalling
        // signup/forgot-password indefinitely.
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            from: config.from.clone(),
        })
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()> {
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&json!({
                "from": self.from,
                "to": to,
                "subject": subject,
                "text": body,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            anyhow::bail!("mail provider answered {status}: {detail}");
        }
        Ok(())
    }
}

/// Logs instead of sending. Used when no provider is configured and in
/// tests.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, _body: &str) -> anyhow::Result<()> {
        info!(%to, %subject, "mail delivery disabled, logging instead");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn log_mailer_always_succeeds() {
        let mailer = LogMailer;
        mailer
            .send("student@example.com", "Your OTP", "123456")
            .await
            .expect("log mailer should not fail");
    }

    #[test]
    fn http_mailer_builds_from_config() {
        let config = MailConfig {
            api_url: "https://mail.example.com/v1/send".into(),
            api_key: "secret".into(),
            from: "no-reply@classhub.local".into(),
            timeout_secs: 5,
        };
        let mailer = HttpMailer::new(&config).expect("client should build");
        assert_eq!(mailer.from, "no-reply@classhub.local");
    }
}
