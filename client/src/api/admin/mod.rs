//! Typed calls against the admin-only `/api/admin` endpoints.
//!
//! All calls require a bearer token with the ADMIN role; a non-admin token
//! earns a 403 the caller surfaces as "not permitted".

pub mod models;

use crate::api::admin::models::*;
use crate::api::auth::models::Role;
use crate::api::common::{Page, page_query};
use crate::client::{ApiClient, RequestOptions};
use crate::errors::ApiResult;

const ADMIN_PATH: &str = "/api/admin";

/// Admin endpoints, borrowing the shared client.
pub struct AdminApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AdminApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `GET /api/admin/users`.
    pub async fn users(&self) -> ApiResult<Vec<AdminUser>> {
        self.client
            .get(&format!("{}/users", ADMIN_PATH), RequestOptions::default())
            .await
    }

    /// `PATCH /api/admin/users/{id}/role`.
    pub async fn change_role(&self, user_id: i64, role: Role) -> ApiResult<AdminUser> {
        self.client
            .patch(
                &format!("{}/users/{}/role", ADMIN_PATH, user_id),
                &ChangeRoleRequest { role },
                RequestOptions::default(),
            )
            .await
    }

    /// `DELETE /api/admin/users/{id}`. 204 on success; admins cannot be
    /// deleted, which comes back as a 400.
    pub async fn delete_user(&self, user_id: i64) -> ApiResult<()> {
        self.client
            .delete_unit(
                &format!("{}/users/{}", ADMIN_PATH, user_id),
                RequestOptions::default(),
            )
            .await
    }

    /// `GET /api/admin/users/{id}/logins?page&size`.
    pub async fn login_history(
        &self,
        user_id: i64,
        page: u32,
        size: u32,
    ) -> ApiResult<Page<LoginHistoryEntry>> {
        let options = RequestOptions {
            query: page_query(page, size),
            ..RequestOptions::default()
        };
        self.client
            .get(&format!("{}/users/{}/logins", ADMIN_PATH, user_id), options)
            .await
    }
}
