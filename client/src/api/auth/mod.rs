//! Typed calls against the `/api/auth` endpoints.
//!
//! Registration is validated locally before any network call, and its
//! backend error codes are mapped to the fixed user-facing messages the
//! views display.

pub mod models;

use crate::client::{ApiClient, RequestOptions};
use crate::errors::{ApiError, ApiResult, validation_error};
use crate::api::auth::models::*;
use validator::Validate;

const AUTH_PATH: &str = "/api/auth";

/// Auth endpoints, borrowing the shared client.
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `POST /api/auth/login`. Unauthenticated; a 401 here means bad
    /// credentials, not an expired session, so the auth-failure bus stays
    /// quiet. The location is dropped when GPS capture is disabled.
    pub async fn login(&self, mut request: LoginRequest) -> ApiResult<AuthResponse> {
        request.validate().map_err(validation_error)?;
        if !self.client.config().gps_enabled {
            request.location = None;
        }
        self.client
            .post(
                &format!("{}/login", AUTH_PATH),
                &request,
                RequestOptions::skip_auth(),
            )
            .await
    }

    /// `POST /api/auth/register`. Rejects a short password locally, before
    /// any network call; backend errors are rewritten to the fixed messages
    /// the UI shows.
    pub async fn register(&self, request: RegisterRequest) -> ApiResult<AuthResponse> {
        request.validate().map_err(validation_error)?;
        self.client
            .post(
                &format!("{}/register", AUTH_PATH),
                &request,
                RequestOptions::skip_auth(),
            )
            .await
            .map_err(map_register_error)
    }

    /// `GET /api/auth/me` with the session's own token.
    pub async fn current_user(&self) -> ApiResult<User> {
        self.client
            .get(&format!("{}/me", AUTH_PATH), RequestOptions::default())
            .await
    }

    /// `GET /api/auth/me` with an explicit token, used by startup
    /// reconciliation. Auth injection is skipped so a rejected stored token
    /// does not re-enter the auth-failure bus while the session is still
    /// being resolved.
    pub async fn current_user_with(&self, token: &str) -> ApiResult<User> {
        let options =
            RequestOptions::skip_auth().with_header("Authorization", format!("Bearer {}", token));
        self.client.get(&format!("{}/me", AUTH_PATH), options).await
    }

    /// `POST /api/auth/verify-email`.
    pub async fn verify_email(&self, token: impl Into<String>) -> ApiResult<MessageResponse> {
        self.client
            .post(
                &format!("{}/verify-email", AUTH_PATH),
                &VerifyEmailRequest {
                    token: token.into(),
                },
                RequestOptions::skip_auth(),
            )
            .await
    }

    /// `POST /api/auth/resend-verification`.
    pub async fn resend_verification(
        &self,
        email: impl Into<String>,
    ) -> ApiResult<MessageResponse> {
        self.client
            .post(
                &format!("{}/resend-verification", AUTH_PATH),
                &ResendVerificationRequest {
                    email: email.into(),
                },
                RequestOptions::skip_auth(),
            )
            .await
    }

    /// `POST /api/auth/forgot-password`.
    pub async fn forgot_password(&self, email: impl Into<String>) -> ApiResult<MessageResponse> {
        self.client
            .post(
                &format!("{}/forgot-password", AUTH_PATH),
                &ForgotPasswordRequest {
                    email: email.into(),
                },
                RequestOptions::skip_auth(),
            )
            .await
    }

    /// `POST /api/auth/reset-password`.
    pub async fn reset_password(
        &self,
        token: impl Into<String>,
        password: impl Into<String>,
    ) -> ApiResult<MessageResponse> {
        self.client
            .post(
                &format!("{}/reset-password", AUTH_PATH),
                &ResetPasswordRequest {
                    token: token.into(),
                    password: password.into(),
                },
                RequestOptions::skip_auth(),
            )
            .await
    }

    /// `POST /api/auth/change-password` (bearer). A successful change
    /// invalidates the token server-side; the caller is expected to log the
    /// session out and send the user back to login.
    pub async fn change_password(&self, request: ChangePasswordRequest) -> ApiResult<MessageResponse> {
        request.validate().map_err(validation_error)?;
        self.client
            .post(
                &format!("{}/change-password", AUTH_PATH),
                &request,
                RequestOptions::default(),
            )
            .await
    }
}

/// Maps registration errors to the fixed messages the views display:
/// `EMAIL_ALREADY_EXISTS` becomes "Email already registered", and a
/// validation envelope surfaces its first field error as the headline.
fn map_register_error(error: ApiError) -> ApiError {
    match error {
        ApiError::Http {
            status,
            error_code,
            message,
            field_errors,
        } => {
            let message = if error_code == "EMAIL_ALREADY_EXISTS" {
                "Email already registered".to_string()
            } else if let Some(first) = field_errors
                .as_ref()
                .and_then(|fields| fields.values().next())
            {
                first.clone()
            } else {
                message
            };
            ApiError::Http {
                status,
                error_code,
                message,
                field_errors,
            }
        }
        other => other,
    }
}
