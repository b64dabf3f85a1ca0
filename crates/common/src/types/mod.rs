use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Liveness payload for `GET /api/health`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Health {
    pub ok: bool,
    pub now: String,
}

impl Health {
    pub fn now() -> Self {
        Self {
            ok: true,
            now: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Uniform JSON error body: `{ "error": "..." }`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { error: msg.into() }
    }
}
