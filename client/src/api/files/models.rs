//! Data structures for the file storage endpoints.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A stored file owned by the current user.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserFile {
    pub id: i64,
    pub filename: String,
    pub size_bytes: u64,
    pub content_type: String,
    pub created_at: DateTime<Utc>,
}

/// Aggregate counts shown on the files page.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileStats {
    pub file_count: u64,
    pub total_size_bytes: u64,
}

/// Quota usage for the current user.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StorageUsage {
    pub used_bytes: u64,
    pub max_bytes: u64,
    pub percentage: f64,
}

/// Short-lived, pre-authorized download link.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileDownloadResponse {
    pub download_url: String,
}
