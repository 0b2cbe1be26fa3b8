//! Wire types for the HTTP surface

use serde::{Deserialize, Serialize};

/// Inbound alert payload.
///
/// Field names are not frozen: the instrument may arrive as `symbol` or
/// `coin`. Everything is optional at the serde layer so that missing
/// fields surface as structured validation errors instead of a bare
/// deserialization rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct AlertRequest {
    pub symbol: Option<String>,
    pub coin: Option<String>,
    pub action: Option<String>,
}

impl AlertRequest {
    /// Get the instrument from whichever field carried it
    pub fn instrument(&self) -> Option<String> {
        self.symbol
            .clone()
            .or_else(|| self.coin.clone())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }
}

/// Plain acknowledgment body
#[derive(Debug, Clone, Serialize)]
pub struct Ack {
    pub message: String,
}

impl Ack {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Body produced by the fault barrier for uncaught errors
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaultResponse {
    pub error_code: u16,
    pub error_message: String,
    pub stack_trace: String,
}
