//! Cross-component "unauthorized" signal.
//!
//! SYSTEM CONTEXT
//! ==============
//! The HTTP client emits here on a 401 instead of touching storage; the
//! session context subscribes and is the only writer of credentials.

use std::sync::{Arc, Mutex, PoisonError};

/// A 401 observed by the response interceptor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnauthorizedEvent {
    /// Request path (without base URL or query) that was rejected.
    pub path: String,
}

type Listener = Arc<dyn Fn(&UnauthorizedEvent) + Send + Sync>;

#[derive(Clone, Default)]
pub struct UnauthorizedSignal {
    listeners: Arc<Mutex<Vec<Listener>>>,
}

impl UnauthorizedSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&UnauthorizedEvent) + Send + Sync + 'static,
    {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(listener));
    }

    /// Notify every listener. The listener list is snapshotted first so a
    /// listener may subscribe or emit again without deadlocking.
    pub fn emit(&self, event: &UnauthorizedEvent) {
        let listeners: Vec<Listener> = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for listener in listeners {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl std::fmt::Debug for UnauthorizedSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnauthorizedSignal")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
