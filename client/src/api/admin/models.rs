//! Data structures for the admin panel endpoints.

use crate::api::auth::models::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user row in the admin panel.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: i64,
    pub email: String,
    pub role: Role,
    pub email_verified: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChangeRoleRequest {
    pub role: Role,
}

/// How a login's location was determined.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub enum LocationSource {
    #[serde(rename = "GPS")]
    Gps,
    #[serde(rename = "IP")]
    Ip,
}

/// One entry in a user's login history.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoginHistoryEntry {
    pub id: i64,
    pub logged_in_at: DateTime<Utc>,
    pub success: bool,
    pub failure_reason: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub location_source: Option<LocationSource>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub ip_address: Option<String>,
    pub device_type: Option<String>,
    pub browser: Option<String>,
    pub os: Option<String>,
}
