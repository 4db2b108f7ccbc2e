//! Typed calls against the `/api/v1/example` endpoints.

pub mod models;

use crate::api::example::models::*;
use crate::client::{ApiClient, RequestOptions};
use crate::errors::{ApiResult, validation_error};
use validator::Validate;

const EXAMPLE_PATH: &str = "/api/v1/example";

/// Example-resource endpoints, borrowing the shared client.
pub struct ExampleApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ExampleApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `GET /api/v1/example`.
    pub async fn list(&self) -> ApiResult<Vec<Example>> {
        self.client.get(EXAMPLE_PATH, RequestOptions::default()).await
    }

    /// `POST /api/v1/example`.
    pub async fn create(&self, request: CreateExampleRequest) -> ApiResult<Example> {
        request.validate().map_err(validation_error)?;
        self.client
            .post(EXAMPLE_PATH, &request, RequestOptions::default())
            .await
    }
}
