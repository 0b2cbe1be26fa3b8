//! Domain types for the ingestion pipeline

use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Recognized alert actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertAction {
    Open,
    Close,
}

impl AlertAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertAction::Open => "open",
            AlertAction::Close => "close",
        }
    }
}

impl fmt::Display for AlertAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlertAction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(AlertAction::Open),
            "close" => Ok(AlertAction::Close),
            other => Err(AppError::Validation(format!(
                "Invalid action '{}', expected one of: open, close",
                other
            ))),
        }
    }
}

/// A validated inbound alert, stamped with its server-side receipt time.
///
/// Alerts live in the queue until a drain cycle converts them into
/// persisted rows; they are never mutated after creation.
#[derive(Debug, Clone, Serialize)]
pub struct Alert {
    pub symbol: String,
    pub action: AlertAction,
    pub received_at: DateTime<Utc>,
}

impl Alert {
    pub fn new(symbol: String, action: AlertAction) -> Self {
        Self {
            symbol,
            action,
            received_at: Utc::now(),
        }
    }
}
