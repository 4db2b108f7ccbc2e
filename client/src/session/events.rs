//! Auth-failure event bus.
//!
//! The HTTP client fires this bus whenever an authenticated request comes
//! back 401; the session store subscribes its own clear so an expired token
//! logs the user out everywhere at once. Subscriptions are additive, so
//! several observers can coexist without overwriting each other.

use std::sync::Mutex;
use tracing::debug;

type Observer = Box<dyn Fn() + Send + Sync>;

/// Subscription list notified on authentication failure.
#[derive(Default)]
pub struct AuthEventBus {
    observers: Mutex<Vec<Observer>>,
}

impl AuthEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an observer invoked on every auth failure.
    pub fn subscribe(&self, observer: impl Fn() + Send + Sync + 'static) {
        let mut observers = self.observers.lock().unwrap_or_else(|e| e.into_inner());
        observers.push(Box::new(observer));
    }

    /// Invokes every registered observer.
    pub fn notify(&self) {
        let observers = self.observers.lock().unwrap_or_else(|e| e.into_inner());
        debug!("Auth failure: notifying {} observer(s)", observers.len());
        for observer in observers.iter() {
            observer();
        }
    }

    #[cfg(test)]
    pub fn observer_count(&self) -> usize {
        self.observers.lock().unwrap().len()
    }
}

impl std::fmt::Debug for AuthEventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthEventBus").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_notify_reaches_all_observers() {
        let bus = AuthEventBus::new();
        let hits = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let hits = hits.clone();
            bus.subscribe(move || {
                hits.fetch_add(1, Ordering::SeqCst);
            });
        }

        bus.notify();
        assert_eq!(hits.load(Ordering::SeqCst), 3);
        assert_eq!(bus.observer_count(), 3);

        bus.notify();
        assert_eq!(hits.load(Ordering::SeqCst), 6);
    }

    #[test]
    fn test_notify_without_observers_is_a_no_op() {
        let bus = AuthEventBus::new();
        bus.notify();
    }
}
