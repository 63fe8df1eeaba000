//! Location (terminal) Model and the link / heartbeat protocol messages

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ErrorCode;

/// Length of a location link code (digits)
pub const LINK_CODE_LEN: usize = 12;

/// Location entity: the identity a physical till binds to
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: i64,
    pub name: String,
    pub link_code: String,
    #[serde(default)]
    pub linked: bool,
    /// Last device metadata reported by the till (opaque)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_info: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<i64>,
    pub created_at: i64,
}

/// Location as listed, with derived presence
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationView {
    #[serde(flatten)]
    pub location: Location,
    pub online: bool,
}

/// Create location payload
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationCreate {
    pub name: Option<String>,
}

/// Link request sent once by a till
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRequest {
    pub link_code: Option<String>,
    pub device_info: Option<Value>,
}

/// Bootstrap snapshot returned on successful link
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InitialData {
    pub products: Vec<Value>,
    pub categories: Vec<Value>,
    pub users: Vec<Value>,
    pub roles: Vec<Value>,
}

/// Link response
///
/// Lookup failures are reported as `success: false` with HTTP 200; `code`
/// carries the stable [`ErrorCode`] a till switches on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub till_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_data: Option<InitialData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
}

impl LinkResponse {
    pub fn linked(till_id: i64, initial_data: InitialData) -> Self {
        Self {
            success: true,
            till_id: Some(till_id.to_string()),
            initial_data: Some(initial_data),
            error: None,
            code: None,
        }
    }

    pub fn failed(code: ErrorCode) -> Self {
        Self {
            success: false,
            till_id: None,
            initial_data: None,
            error: Some(code.message().to_string()),
            code: Some(code),
        }
    }
}

/// Periodic liveness report
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartbeatRequest {
    pub till_id: Option<String>,
    pub device_info: Option<Value>,
}

/// Heartbeat response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeartbeatResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
}

impl HeartbeatResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
            code: None,
        }
    }

    pub fn failed(code: ErrorCode) -> Self {
        Self {
            success: false,
            error: Some(code.message().to_string()),
            code: Some(code),
        }
    }
}
