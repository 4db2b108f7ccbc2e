//! Single source of truth for "who is logged in".
//!
//! The store keeps the `{token, user}` pair in memory, mirrors every change
//! to a durable [`SessionStorage`] backend, and exposes the resolved flag the
//! route guard waits on during startup reconciliation. Token and user are
//! held as one value, so one cannot exist without the other.

pub mod events;
pub mod storage;

pub use events::AuthEventBus;
pub use storage::{FileSessionStorage, MemorySessionStorage, PersistedSession, SessionStorage};

use crate::api::auth::models::{LoginRequest, RegisterRequest, Role, User};
use crate::api::auth::AuthApi;
use crate::errors::ApiResult;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

/// Reactive session state backed by durable storage.
pub struct SessionStore {
    state: RwLock<Option<PersistedSession>>,
    resolved: AtomicBool,
    storage: Box<dyn SessionStorage>,
}

impl SessionStore {
    /// Creates a store seeded from whatever the storage backend holds.
    /// The session stays unresolved until [`resolve`](Self::resolve) runs.
    pub fn new(storage: Box<dyn SessionStorage>) -> Self {
        let initial = storage.load();
        Self {
            state: RwLock::new(initial),
            resolved: AtomicBool::new(false),
            storage,
        }
    }

    /// The stored bearer token, if any.
    pub fn token(&self) -> Option<String> {
        self.read_state().as_ref().map(|s| s.token.clone())
    }

    /// The logged-in user, if any.
    pub fn user(&self) -> Option<User> {
        self.read_state().as_ref().map(|s| s.user.clone())
    }

    /// Token and user are set together, so one presence check covers both.
    pub fn is_authenticated(&self) -> bool {
        self.read_state().is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.read_state()
            .as_ref()
            .map(|s| s.user.role == Role::Admin)
            .unwrap_or(false)
    }

    /// Whether startup reconciliation has completed (either way). The route
    /// guard reports `Resolving` until this is true.
    pub fn is_resolved(&self) -> bool {
        self.resolved.load(Ordering::SeqCst)
    }

    /// Replaces the session in memory and in durable storage. The storage
    /// write happens under the state lock so the two copies never diverge.
    pub fn establish(&self, token: String, user: User) {
        let session = PersistedSession { token, user };
        let mut state = self.write_state();
        if let Err(e) = self.storage.save(&session) {
            warn!("Failed to persist session: {}", e);
        }
        *state = Some(session);
    }

    /// Clears the session from memory and durable storage. Never fails and
    /// is idempotent; a storage error is logged, not surfaced. Like
    /// [`establish`](Self::establish), storage is updated under the state
    /// lock.
    pub fn clear(&self) {
        let mut state = self.write_state();
        if let Err(e) = self.storage.clear() {
            warn!("Failed to clear persisted session: {}", e);
        }
        *state = None;
    }

    /// Explicit logout requested by the user.
    pub fn logout(&self) {
        info!("Logging out");
        self.clear();
    }

    /// Logs in against the auth API and establishes the session on success.
    /// A failed login leaves the existing session untouched.
    pub async fn login(&self, auth: &AuthApi<'_>, request: LoginRequest) -> ApiResult<User> {
        let response = auth.login(request).await?;
        let user = User::from(&response);
        info!("Logged in as {}", user.email);
        self.establish(response.token, user.clone());
        Ok(user)
    }

    /// Registers a new account; same session contract as [`login`](Self::login).
    /// The returned user starts out unverified.
    pub async fn register(&self, auth: &AuthApi<'_>, request: RegisterRequest) -> ApiResult<User> {
        let response = auth.register(request).await?;
        let user = User::from(&response);
        info!("Registered account {}", user.email);
        self.establish(response.token, user.clone());
        Ok(user)
    }

    /// Startup reconciliation: validates a stored token against the backend
    /// and refreshes the user from the response, clearing the session when
    /// the token no longer works. Marks the session resolved in every path.
    /// Returns whether the session ended up authenticated.
    pub async fn resolve(&self, auth: &AuthApi<'_>) -> bool {
        let authenticated = match self.token() {
            None => false,
            Some(token) => match auth.current_user_with(&token).await {
                Ok(user) => {
                    self.establish(token, user);
                    true
                }
                Err(e) => {
                    warn!("Stored token rejected, clearing session: {}", e);
                    self.clear();
                    false
                }
            },
        };
        self.resolved.store(true, Ordering::SeqCst);
        authenticated
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, Option<PersistedSession>> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, Option<PersistedSession>> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    }

    fn verified_user() -> User {
        User {
            id: 1,
            email: "alice@example.com".to_string(),
            role: Role::Admin,
            email_verified: true,
            avatar_url: None,
        }
    }

    fn store() -> SessionStore {
        SessionStore::new(Box::new(MemorySessionStorage::new()))
    }

    #[test]
    fn test_establish_and_clear() {
        let store = store();
        assert!(!store.is_authenticated());
        assert!(!store.is_admin());
        assert!(store.token().is_none());

        store.establish("tok".to_string(), verified_user());
        assert!(store.is_authenticated());
        assert!(store.is_admin());
        assert_eq!(store.token().as_deref(), Some("tok"));
        assert_eq!(store.user().unwrap().email, "alice@example.com");

        store.logout();
        assert!(!store.is_authenticated());
        assert!(store.token().is_none());
        assert!(store.user().is_none());
    }

    #[test]
    fn test_memory_and_storage_agree_under_concurrent_writes() {
        init_tracing();
        let store = Arc::new(store());

        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for round in 0..100 {
                        if (worker + round) % 2 == 0 {
                            store.establish(format!("tok-{}-{}", worker, round), verified_user());
                        } else {
                            store.clear();
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // Whatever interleaving happened, the in-memory token and the
        // durable copy must be the same session.
        let persisted = store.storage.load();
        assert_eq!(store.token(), persisted.as_ref().map(|s| s.token.clone()));
        assert_eq!(store.user(), persisted.map(|s| s.user));
    }

    #[test]
    fn test_logout_is_idempotent() {
        init_tracing();
        let store = store();
        store.establish("tok".to_string(), verified_user());

        store.logout();
        let after_once = (store.token(), store.user());
        store.logout();
        let after_twice = (store.token(), store.user());

        assert_eq!(after_once, after_twice);
        assert_eq!(after_twice, (None, None));
    }

    #[test]
    fn test_seeds_from_storage() {
        let storage = MemorySessionStorage::new();
        storage
            .save(&PersistedSession {
                token: "persisted".to_string(),
                user: verified_user(),
            })
            .unwrap();

        let store = SessionStore::new(Box::new(storage));
        assert!(store.is_authenticated());
        assert_eq!(store.token().as_deref(), Some("persisted"));
        // Seeded but not yet validated against the backend.
        assert!(!store.is_resolved());
    }

    #[test]
    fn test_establish_persists_to_storage() {
        let store = store();
        store.establish("tok".to_string(), verified_user());

        let persisted = store.storage.load().unwrap();
        assert_eq!(persisted.token, "tok");
        assert_eq!(persisted.user.id, 1);

        store.clear();
        assert!(store.storage.load().is_none());
    }
}
