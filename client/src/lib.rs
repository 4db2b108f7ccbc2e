//! Typed client SDK for the starter template backend API.
//!
//! Everything routes through one [`ApiClient`]; the [`SessionStore`] owns
//! the `{token, user}` pair and its durable copy; the route guard in
//! [`guard`] turns live session state into render/redirect decisions.
//! [`StarterClient`] wires the three together so embedders hold a single
//! injectable object instead of globals.
//!
//! ```no_run
//! use starter_client::{Config, StarterClient};
//! use starter_client::api::auth::models::LoginRequest;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let client = StarterClient::new(Config::from_env()?)?;
//! client.resolve_session().await;
//!
//! if !client.session().is_authenticated() {
//!     client
//!         .login(LoginRequest {
//!             email: "alice@example.com".into(),
//!             password: "correct horse".into(),
//!             location: None,
//!         })
//!         .await?;
//! }
//!
//! let files = client.files().list(0, 20, None, None).await?;
//! println!("{} file(s)", files.total_elements);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod errors;
pub mod guard;
pub mod session;

pub use client::{ApiClient, RequestOptions};
pub use config::Config;
pub use errors::{ApiError, ApiResult};
pub use guard::{RedirectTarget, RouteAccess, RouteDecision};
pub use session::{AuthEventBus, FileSessionStorage, MemorySessionStorage, SessionStore};

use crate::api::admin::AdminApi;
use crate::api::auth::AuthApi;
use crate::api::auth::models::{
    ChangePasswordRequest, LoginRequest, MessageResponse, RegisterRequest, User,
};
use crate::api::example::ExampleApi;
use crate::api::files::FilesApi;
use crate::api::health::HealthApi;
use crate::api::metrics::MetricsApi;
use crate::api::user::UserApi;
use crate::session::SessionStorage;
use std::sync::Arc;

/// The wired-up SDK: session store, auth-failure bus, and HTTP client,
/// with accessors for every feature API module.
#[derive(Debug)]
pub struct StarterClient {
    session: Arc<SessionStore>,
    events: Arc<AuthEventBus>,
    http: ApiClient,
}

impl StarterClient {
    /// Creates a client persisting the session to the configured file.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let storage = Box::new(FileSessionStorage::new(config.session_file.clone()));
        Self::with_storage(config, storage)
    }

    /// Creates a client over an explicit storage backend.
    pub fn with_storage(
        config: Config,
        storage: Box<dyn SessionStorage>,
    ) -> anyhow::Result<Self> {
        let events = Arc::new(AuthEventBus::new());
        let session = Arc::new(SessionStore::new(storage));

        // Any 401 on an authenticated call logs the session out.
        {
            let session = session.clone();
            events.subscribe(move || session.clear());
        }

        let http = ApiClient::new(config, session.clone(), events.clone())?;
        Ok(Self {
            session,
            events,
            http,
        })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn events(&self) -> &AuthEventBus {
        &self.events
    }

    pub fn http(&self) -> &ApiClient {
        &self.http
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(&self.http)
    }

    pub fn admin(&self) -> AdminApi<'_> {
        AdminApi::new(&self.http)
    }

    pub fn user(&self) -> UserApi<'_> {
        UserApi::new(&self.http)
    }

    pub fn files(&self) -> FilesApi<'_> {
        FilesApi::new(&self.http)
    }

    pub fn example(&self) -> ExampleApi<'_> {
        ExampleApi::new(&self.http)
    }

    pub fn health(&self) -> HealthApi<'_> {
        HealthApi::new(&self.http)
    }

    pub fn metrics(&self) -> MetricsApi<'_> {
        MetricsApi::new(&self.http)
    }

    /// Startup reconciliation; must complete before route decisions are
    /// made. Returns whether the session ended up authenticated.
    pub async fn resolve_session(&self) -> bool {
        self.session.resolve(&self.auth()).await
    }

    /// Logs in and establishes the session.
    pub async fn login(&self, request: LoginRequest) -> ApiResult<User> {
        self.session.login(&self.auth(), request).await
    }

    /// Registers a new account and establishes its (unverified) session.
    pub async fn register(&self, request: RegisterRequest) -> ApiResult<User> {
        self.session.register(&self.auth(), request).await
    }

    /// Changes the password and logs the session out on success; the
    /// backend invalidates the token, so the user signs in again with the
    /// new password.
    pub async fn change_password(
        &self,
        request: ChangePasswordRequest,
    ) -> ApiResult<MessageResponse> {
        let response = self.auth().change_password(request).await?;
        self.session.logout();
        Ok(response)
    }

    /// Clears the session everywhere. Never fails.
    pub fn logout(&self) {
        self.session.logout();
    }

    /// Route-guard evaluation against the live session.
    pub fn evaluate_route(&self, access: RouteAccess, requested_path: &str) -> RouteDecision {
        guard::evaluate(&self.session, access, requested_path)
    }
}
