//! Route guarding over live session state.
//!
//! Decides whether a requested screen renders, redirects, or waits for
//! startup reconciliation. Decisions are never cached; every navigation
//! re-reads the session store.

use crate::session::SessionStore;

/// What a route demands of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// Login, register, landing. Shown only to logged-out visitors; an
    /// authenticated user is sent to the dashboard instead.
    Public,
    /// Requires a session; optionally also a verified email.
    Protected { require_verified: bool },
}

/// Where a redirect points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectTarget {
    Login,
    VerificationPending,
    Dashboard,
}

/// Outcome of a guard evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Startup reconciliation is still in flight; render nothing yet.
    Resolving,
    Allowed,
    Redirect {
        target: RedirectTarget,
        /// The originally requested path, kept for post-login return.
        return_to: Option<String>,
    },
}

/// Evaluates access to `requested_path` against the current session.
pub fn evaluate(
    session: &SessionStore,
    access: RouteAccess,
    requested_path: &str,
) -> RouteDecision {
    if !session.is_resolved() {
        return RouteDecision::Resolving;
    }

    let authenticated = session.is_authenticated();
    let verified = session
        .user()
        .map(|user| user.email_verified)
        .unwrap_or(false);

    match access {
        RouteAccess::Protected { require_verified } => {
            if !authenticated {
                return RouteDecision::Redirect {
                    target: RedirectTarget::Login,
                    return_to: Some(requested_path.to_string()),
                };
            }
            if require_verified && !verified {
                return RouteDecision::Redirect {
                    target: RedirectTarget::VerificationPending,
                    return_to: None,
                };
            }
            RouteDecision::Allowed
        }
        RouteAccess::Public => {
            if authenticated {
                let target = if verified {
                    RedirectTarget::Dashboard
                } else {
                    RedirectTarget::VerificationPending
                };
                return RouteDecision::Redirect {
                    target,
                    return_to: None,
                };
            }
            RouteDecision::Allowed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::auth::models::{Role, User};
    use crate::client::ApiClient;
    use crate::config::Config;
    use crate::session::{AuthEventBus, MemorySessionStorage};
    use std::sync::Arc;

    fn resolved_store() -> Arc<SessionStore> {
        let store = Arc::new(SessionStore::new(Box::new(MemorySessionStorage::new())));
        // Reconciliation with no stored token resolves immediately.
        let events = Arc::new(AuthEventBus::new());
        let client = ApiClient::new(Config::default(), store.clone(), events).unwrap();
        let auth = crate::api::auth::AuthApi::new(&client);
        futures::executor::block_on(store.resolve(&auth));
        store
    }

    fn user(verified: bool) -> User {
        User {
            id: 5,
            email: "bob@example.com".to_string(),
            role: Role::User,
            email_verified: verified,
            avatar_url: None,
        }
    }

    #[test]
    fn test_unresolved_session_reports_resolving() {
        let store = SessionStore::new(Box::new(MemorySessionStorage::new()));
        let decision = evaluate(
            &store,
            RouteAccess::Protected {
                require_verified: true,
            },
            "/dashboard",
        );
        assert_eq!(decision, RouteDecision::Resolving);
    }

    #[test]
    fn test_unauthenticated_protected_redirects_to_login() {
        let store = resolved_store();
        let decision = evaluate(
            &store,
            RouteAccess::Protected {
                require_verified: true,
            },
            "/dashboard",
        );
        assert_eq!(
            decision,
            RouteDecision::Redirect {
                target: RedirectTarget::Login,
                return_to: Some("/dashboard".to_string()),
            }
        );
    }

    #[test]
    fn test_unverified_user_redirects_to_verification_pending() {
        let store = resolved_store();
        store.establish("tok".to_string(), user(false));

        let decision = evaluate(
            &store,
            RouteAccess::Protected {
                require_verified: true,
            },
            "/dashboard",
        );
        assert_eq!(
            decision,
            RouteDecision::Redirect {
                target: RedirectTarget::VerificationPending,
                return_to: None,
            }
        );
    }

    #[test]
    fn test_verified_user_is_allowed() {
        let store = resolved_store();
        store.establish("tok".to_string(), user(true));

        let decision = evaluate(
            &store,
            RouteAccess::Protected {
                require_verified: true,
            },
            "/dashboard",
        );
        assert_eq!(decision, RouteDecision::Allowed);
    }

    #[test]
    fn test_unverified_user_allowed_when_verification_not_required() {
        let store = resolved_store();
        store.establish("tok".to_string(), user(false));

        let decision = evaluate(
            &store,
            RouteAccess::Protected {
                require_verified: false,
            },
            "/settings",
        );
        assert_eq!(decision, RouteDecision::Allowed);
    }

    #[test]
    fn test_public_route_redirects_logged_in_users() {
        let store = resolved_store();
        store.establish("tok".to_string(), user(true));

        let decision = evaluate(&store, RouteAccess::Public, "/login");
        assert_eq!(
            decision,
            RouteDecision::Redirect {
                target: RedirectTarget::Dashboard,
                return_to: None,
            }
        );
    }

    #[test]
    fn test_public_route_redirects_unverified_to_verification_pending() {
        let store = resolved_store();
        store.establish("tok".to_string(), user(false));

        let decision = evaluate(&store, RouteAccess::Public, "/register");
        assert_eq!(
            decision,
            RouteDecision::Redirect {
                target: RedirectTarget::VerificationPending,
                return_to: None,
            }
        );
    }

    #[test]
    fn test_public_route_shows_for_logged_out_visitors() {
        let store = resolved_store();
        let decision = evaluate(&store, RouteAccess::Public, "/login");
        assert_eq!(decision, RouteDecision::Allowed);
    }

    #[test]
    fn test_decisions_follow_live_session_state() {
        let store = resolved_store();
        let access = RouteAccess::Protected {
            require_verified: true,
        };

        store.establish("tok".to_string(), user(true));
        assert_eq!(evaluate(&store, access, "/dashboard"), RouteDecision::Allowed);

        store.logout();
        assert!(matches!(
            evaluate(&store, access, "/dashboard"),
            RouteDecision::Redirect {
                target: RedirectTarget::Login,
                ..
            }
        ));
    }
}
