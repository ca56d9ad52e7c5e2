//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{dial::Primitive, state::DialSnapshot};

/// Pointer position in widget pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerRequest {
    pub x: f64,
    pub y: f64,
}

/// Widget size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResizeRequest {
    pub width: f64,
    pub height: f64,
}

/// API response structure for state changing endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub action: String,
    pub timestamp: DateTime<Utc>,
    pub dial: DialSnapshot,
}

impl ApiResponse {
    pub fn new(action: &str, dial: DialSnapshot) -> Self {
        Self {
            action: action.to_string(),
            timestamp: Utc::now(),
            dial,
        }
    }
}

/// Status response with server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub dial: DialSnapshot,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Render-only response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResponse {
    pub width: f64,
    pub height: f64,
    pub radius: f64,
    pub label: String,
    pub primitives: Vec<Primitive>,
}

impl From<DialSnapshot> for RenderResponse {
    fn from(dial: DialSnapshot) -> Self {
        Self {
            width: dial.bounds.width,
            height: dial.bounds.height,
            radius: dial.radius,
            label: dial.label,
            primitives: dial.primitives,
        }
    }
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
