//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{display::DisplayFields, state::TimerSnapshot};

/// Body of POST /timer/configure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigureRequest {
    #[serde(default)]
    pub hours: i64,
    #[serde(default)]
    pub minutes: i64,
    #[serde(default)]
    pub seconds: i64,
}

/// Body of POST /timer/custom
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomRequest {
    pub minutes: i64,
}

/// API response structure for timer control endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub display: String,
    pub timer: TimerSnapshot,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: &str, message: String, display: String, timer: TimerSnapshot) -> Self {
        Self {
            status: status.to_string(),
            message,
            timestamp: Utc::now(),
            display,
            timer,
        }
    }

    /// The request changed the timer
    pub fn applied(message: String, display: String, timer: TimerSnapshot) -> Self {
        Self::new("applied", message, display, timer)
    }

    /// The request was a no-op in the current phase
    pub fn ignored(message: String, display: String, timer: TimerSnapshot) -> Self {
        Self::new("ignored", message, display, timer)
    }
}

/// Status response with timer and server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerSnapshot,
    pub display: String,
    /// Fields behind `display`, as last rendered
    pub display_fields: DisplayFields,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
