//! Delivery of reports to a chat webhook.
//!
//! A delivery is a single POST of a JSON payload. Failures are returned to the caller and are
//! never retried.

use crate::Result;
use core::time::Duration;
use ohno::{IntoAppError, bail};
use serde_json::Value;
use url::Url;

const LOG_TARGET: &str = "  delivery";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Parse a webhook URL, accepting only `http` and `https` endpoints.
pub fn parse_webhook_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url).into_app_err_with(|| format!("invalid webhook URL '{url}'"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!("webhook URL '{url}' must use http or https");
    }

    Ok(parsed)
}

#[derive(Debug, Clone)]
pub struct WebhookClient {
    client: reqwest::Client,
    url: Url,
}

impl WebhookClient {
    pub fn new(url: &str) -> Result<Self> {
        let url = parse_webhook_url(url)?;
        let client = reqwest::Client::builder()
            .user_agent("cargo-vitals")
            .timeout(REQUEST_TIMEOUT)
            .build()
            .into_app_err("unable to create HTTP client")?;

        Ok(Self { client, url })
    }

    /// Send `payload` to the webhook.
    ///
    /// Any response outside the 2xx range is an error.
    pub async fn post(&self, payload: &Value) -> Result<()> {
        log::info!(target: LOG_TARGET, "Sending report to webhook");
        log::debug!(target: LOG_TARGET, "Webhook: {}", self.url);

        let response = self
            .client
            .post(self.url.clone())
            .json(payload)
            .send()
            .await
            .into_app_err("unable to reach the webhook")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("webhook responded with HTTP {status}: {}", body.trim());
        }

        log::debug!(target: LOG_TARGET, "Webhook accepted the report with HTTP {status}");
        Ok(())
    }
}
