//! Typed calls against the `/api/files` endpoints.
//!
//! The stats and quota reads are best-effort telemetry: failures degrade to
//! `None` so the files page renders without its side panels instead of
//! erroring out.

pub mod models;

use crate::api::common::{Page, page_query};
use crate::api::files::models::*;
use crate::client::{ApiClient, RequestOptions};
use crate::errors::ApiResult;
use reqwest::multipart::{Form, Part};
use tracing::debug;

const FILES_PATH: &str = "/api/files";

/// File storage endpoints, borrowing the shared client.
pub struct FilesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> FilesApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `POST /api/files` (multipart, part name `file`).
    pub async fn upload(
        &self,
        filename: impl Into<String>,
        content_type: &str,
        contents: Vec<u8>,
    ) -> ApiResult<UserFile> {
        let part = Part::bytes(contents)
            .file_name(filename.into())
            .mime_str(content_type)
            .map_err(|e| {
                crate::errors::ApiError::validation(format!("Invalid content type: {}", e))
            })?;
        let form = Form::new().part("file", part);
        self.client
            .post_multipart(FILES_PATH, form, RequestOptions::default())
            .await
    }

    /// `GET /api/files?page&size[&contentType][&search]`.
    pub async fn list(
        &self,
        page: u32,
        size: u32,
        content_type: Option<&str>,
        search: Option<&str>,
    ) -> ApiResult<Page<UserFile>> {
        let mut query = page_query(page, size);
        if let Some(content_type) = content_type {
            query.push(("contentType".to_string(), content_type.to_string()));
        }
        if let Some(search) = search {
            query.push(("search".to_string(), search.to_string()));
        }
        let options = RequestOptions {
            query,
            ..RequestOptions::default()
        };
        self.client.get(FILES_PATH, options).await
    }

    /// `GET /api/files/stats`, best-effort.
    pub async fn stats(&self) -> Option<FileStats> {
        match self
            .client
            .get(&format!("{}/stats", FILES_PATH), RequestOptions::default())
            .await
        {
            Ok(stats) => Some(stats),
            Err(e) => {
                debug!("File stats unavailable: {}", e);
                None
            }
        }
    }

    /// `GET /api/files/storage/usage`, best-effort.
    pub async fn storage_usage(&self) -> Option<StorageUsage> {
        match self
            .client
            .get(
                &format!("{}/storage/usage", FILES_PATH),
                RequestOptions::default(),
            )
            .await
        {
            Ok(usage) => Some(usage),
            Err(e) => {
                debug!("Storage usage unavailable: {}", e);
                None
            }
        }
    }

    /// `GET /api/files/{id}/download`.
    pub async fn download_url(&self, file_id: i64) -> ApiResult<FileDownloadResponse> {
        self.client
            .get(
                &format!("{}/{}/download", FILES_PATH, file_id),
                RequestOptions::default(),
            )
            .await
    }

    /// `DELETE /api/files/{id}`.
    pub async fn delete(&self, file_id: i64) -> ApiResult<()> {
        self.client
            .delete_unit(
                &format!("{}/{}", FILES_PATH, file_id),
                RequestOptions::default(),
            )
            .await
    }
}
