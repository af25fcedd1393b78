use chrono::Utc;
use uuid::Uuid;

/// Per-invocation identity and clock values, generated at the runtime edge
/// so handlers stay deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestStamp {
    pub account_id: String,
    pub timestamp_ms: i64,
}

impl RequestStamp {
    pub fn now() -> Self {
        Self {
            account_id: Uuid::new_v4().to_string(),
            timestamp_ms: Utc::now().timestamp_millis(),
        }
    }
}
