//! Best-effort forwarding to the external trading API
//!
//! Every accepted alert triggers one outbound call, decoupled from both the
//! HTTP response and persistence. Failures are logged and swallowed; there
//! are no retries, and in-flight calls are abandoned on shutdown.

use crate::error::{AppError, Result};
use crate::models::Alert;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Payload sent to the trading API
#[derive(Debug, Serialize)]
struct TradePayload<'a> {
    symbol: &'a str,
    action: &'a str,
}

/// Outbound seam to the trading API
#[async_trait]
pub trait ExchangeApi: Send + Sync {
    /// Submit one alert. Timeouts, network failures and non-2xx statuses
    /// all surface as errors.
    async fn submit(&self, alert: &Alert) -> Result<()>;
}

/// reqwest-backed trading API client.
///
/// One client for the process lifetime so connections are reused across
/// forwarded calls.
pub struct HttpExchangeApi {
    client: Client,
    base_url: String,
}

impl HttpExchangeApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ExchangeApi for HttpExchangeApi {
    async fn submit(&self, alert: &Alert) -> Result<()> {
        let payload = TradePayload {
            symbol: &alert.symbol,
            action: alert.action.as_str(),
        };

        let response = self
            .client
            .post(format!("{}/api/users", self.base_url))
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Internal(format!(
                "Trading API returned {}: {}",
                status, body
            )));
        }

        info!("Trade executed for {} ({})", alert.symbol, alert.action);
        Ok(())
    }
}

/// Fire-and-forget dispatcher around an [`ExchangeApi`]
pub struct Forwarder {
    api: Arc<dyn ExchangeApi>,
}

impl Forwarder {
    pub fn new(api: Arc<dyn ExchangeApi>) -> Self {
        Self { api }
    }

    /// Spawn the forwarding call for one alert. Returns immediately;
    /// the outcome never reaches the ingestion path.
    pub fn dispatch(&self, alert: Alert) {
        let api = Arc::clone(&self.api);
        tokio::spawn(async move {
            Self::notify(api.as_ref(), &alert).await;
        });
    }

    /// Run the forwarding call, logging any failure
    pub async fn notify(api: &dyn ExchangeApi, alert: &Alert) {
        if let Err(e) = api.submit(alert).await {
            error!("Failed to forward alert for {}: {}", alert.symbol, e);
        }
    }
}
