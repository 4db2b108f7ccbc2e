//! Backend health readout from `/actuator/health`.

use crate::client::{ApiClient, RequestOptions};
use crate::errors::ApiResult;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub enum HealthStatus {
    #[serde(rename = "UP")]
    Up,
    #[serde(rename = "DOWN")]
    Down,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ComponentHealth {
    pub status: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: HealthStatus,
    #[serde(default)]
    pub components: Option<HashMap<String, ComponentHealth>>,
}

/// Health endpoint, borrowing the shared client.
pub struct HealthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> HealthApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `GET /actuator/health` (unauthenticated).
    pub async fn check(&self) -> ApiResult<HealthResponse> {
        self.client
            .get("/actuator/health", RequestOptions::skip_auth())
            .await
    }

    /// Best-effort check for status indicators: an unreachable backend
    /// degrades to `None` instead of propagating.
    pub async fn probe(&self) -> Option<HealthResponse> {
        match self.check().await {
            Ok(health) => Some(health),
            Err(e) => {
                debug!("Health probe failed: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_actuator_payload() {
        let health: HealthResponse = serde_json::from_str(
            r#"{"status":"UP","components":{"db":{"status":"UP"},"mail":{"status":"DOWN"}}}"#,
        )
        .unwrap();
        assert_eq!(health.status, HealthStatus::Up);
        let components = health.components.unwrap();
        assert_eq!(components["mail"].status, "DOWN");
    }

    #[test]
    fn test_decodes_minimal_payload() {
        let health: HealthResponse = serde_json::from_str(r#"{"status":"DOWN"}"#).unwrap();
        assert_eq!(health.status, HealthStatus::Down);
        assert!(health.components.is_none());
    }
}
