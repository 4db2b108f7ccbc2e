//! Typed calls against the `/api/users/me` profile endpoints.

pub mod models;

use crate::api::auth::models::MessageResponse;
use crate::api::user::models::*;
use crate::client::{ApiClient, RequestOptions};
use crate::errors::{ApiResult, validation_error};
use reqwest::multipart::{Form, Part};
use validator::Validate;

const PROFILE_PATH: &str = "/api/users/me/profile";
const AVATAR_PATH: &str = "/api/users/me/avatar";

/// Profile and account-settings endpoints, borrowing the shared client.
pub struct UserApi<'a> {
    client: &'a ApiClient,
}

impl<'a> UserApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `GET /api/users/me/profile`.
    pub async fn profile(&self) -> ApiResult<UserProfile> {
        self.client.get(PROFILE_PATH, RequestOptions::default()).await
    }

    /// `PUT /api/users/me/profile`.
    pub async fn update_profile(&self, request: &UpdateProfileRequest) -> ApiResult<UserProfile> {
        self.client
            .put(PROFILE_PATH, request, RequestOptions::default())
            .await
    }

    /// `POST /api/users/me/avatar`. The image is uploaded as a multipart
    /// part named `file`; the views crop to JPEG before calling this.
    pub async fn upload_avatar(&self, image: Vec<u8>) -> ApiResult<MessageResponse> {
        let part = Part::bytes(image)
            .file_name("avatar.jpg")
            .mime_str("image/jpeg")
            .map_err(|e| crate::errors::ApiError::validation(format!("Invalid avatar: {}", e)))?;
        let form = Form::new().part("file", part);
        self.client
            .post_multipart(AVATAR_PATH, form, RequestOptions::default())
            .await
    }

    /// `DELETE /api/users/me/avatar`.
    pub async fn delete_avatar(&self) -> ApiResult<MessageResponse> {
        self.client.delete(AVATAR_PATH, RequestOptions::default()).await
    }

    /// URL an avatar image can be fetched from; pure construction, no
    /// request.
    pub fn avatar_url(&self, user_id: i64) -> ApiResult<String> {
        self.client
            .build_url(&format!("/api/users/{}/avatar", user_id), &[])
            .map(|url| url.to_string())
    }

    /// `POST /api/users/me/change-email`. Sends a verification mail to the
    /// new address.
    pub async fn change_email(&self, request: ChangeEmailRequest) -> ApiResult<MessageResponse> {
        request.validate().map_err(validation_error)?;
        self.client
            .post("/api/users/me/change-email", &request, RequestOptions::default())
            .await
    }

    /// `DELETE /api/users/me`. Archives the account; confirmed with the
    /// current password in the request body.
    pub async fn delete_account(&self, request: DeleteAccountRequest) -> ApiResult<MessageResponse> {
        request.validate().map_err(validation_error)?;
        self.client
            .delete_with_body("/api/users/me", &request, RequestOptions::default())
            .await
    }
}
