//! Session context: the single authority over authentication state.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `Session` is created at the application root and shared through
//! Leptos context. It owns the in-memory `AuthState` and is the only writer
//! of the credential store. The HTTP client reports 401s through
//! `UnauthorizedSignal`; the session reacts by signing out and doing a
//! full-page navigation to `/login`.
//!
//! STALE RESPONSES
//! ===============
//! Every login, signup, logout, and forced sign-out bumps a generation
//! counter. A successful response that arrives after the generation moved
//! on is discarded (`SessionError::Superseded`) instead of re-populating a
//! session the user already left. `Session::scoped` gives page-level calls
//! the same guarantee.
//!
//! No lock is held across an `.await` or while listeners run.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError, Weak};

use leptos::prelude::*;
use thiserror::Error;

use super::auth::{AuthState, SessionPhase};
use super::credentials::{CredentialStore, StorageError};
use crate::net::api::ApiService;
use crate::net::error::ApiError;
use crate::net::signal::UnauthorizedEvent;
use crate::net::types::{LoginRequest, Role, SignupRequest, User};
use crate::util::navigate::Navigator;

pub const LOGIN_PATH: &str = "/login";

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("session changed before the response arrived")]
    Superseded,
}

impl SessionError {
    /// Message to show the user: the backend's message for API failures,
    /// `fallback` otherwise.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Api(e) => e.user_message(fallback),
            _ => fallback.to_owned(),
        }
    }
}

type Listener = Arc<dyn Fn(&AuthState) + Send + Sync>;

struct Core {
    state: AuthState,
    generation: u64,
}

struct SessionInner {
    core: Mutex<Core>,
    api: ApiService,
    store: CredentialStore,
    navigator: Arc<dyn Navigator>,
    listeners: Mutex<Vec<Listener>>,
}

#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

impl Session {
    /// Create the session and subscribe it to the client's unauthorized signal.
    pub fn new(api: ApiService, store: CredentialStore, navigator: Arc<dyn Navigator>) -> Self {
        let signal = api.client().unauthorized_signal().clone();
        let inner = Arc::new(SessionInner {
            core: Mutex::new(Core { state: AuthState::default(), generation: 0 }),
            api,
            store,
            navigator,
            listeners: Mutex::new(Vec::new()),
        });

        let weak: Weak<SessionInner> = Arc::downgrade(&inner);
        signal.subscribe(move |event| {
            if let Some(inner) = weak.upgrade() {
                Session { inner }.handle_unauthorized(event);
            }
        });

        Self { inner }
    }

    pub fn api(&self) -> &ApiService {
        &self.inner.api
    }

    pub fn state(&self) -> AuthState {
        self.core().state.clone()
    }

    pub fn generation(&self) -> u64 {
        self.core().generation
    }

    /// Register a listener called with every new state.
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&AuthState) + Send + Sync + 'static,
    {
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(listener));
    }

    /// Rebuild the session from persisted credentials. Safe to call again;
    /// each call re-reads the store.
    pub fn restore(&self) {
        self.update(|core| core.state.phase = SessionPhase::Restoring);
        let restored = self.inner.store.load();
        self.update(|core| {
            core.state = match restored {
                Some(credentials) => {
                    log::info!("session restored for {}", credentials.user.email);
                    AuthState::authenticated(credentials.user, credentials.token)
                }
                None => AuthState::anonymous(),
            };
        });
    }

    /// Authenticate against the role's login endpoint.
    ///
    /// # Errors
    ///
    /// Returns the API error for rejected credentials or network failures,
    /// a storage error if the credentials cannot be persisted, and
    /// `Superseded` if the session changed while the request was in flight.
    pub async fn login(&self, email: &str, password: &str, role: Role) -> Result<(), SessionError> {
        let (generation, previous) = self.begin(SessionPhase::LoggingIn);
        let req = LoginRequest { email: email.to_owned(), password: password.to_owned() };
        let outcome = match role {
            Role::Admin => self
                .inner
                .api
                .admin_login(&req)
                .await
                .map(|resp| (User::admin(resp.email), resp.token)),
            Role::Customer => self
                .inner
                .api
                .customer_login(&req)
                .await
                .map(|resp| (User::customer(resp.email, resp.name, resp.phone), resp.token)),
        };
        self.finish(generation, previous, outcome)
    }

    /// Register a new customer and sign them in.
    ///
    /// # Errors
    ///
    /// Same as [`Session::login`].
    pub async fn signup(&self, req: &SignupRequest) -> Result<(), SessionError> {
        let (generation, previous) = self.begin(SessionPhase::SigningUp);
        let outcome = self
            .inner
            .api
            .customer_signup(req)
            .await
            .map(|resp| (User::customer(resp.email, resp.name, resp.phone), resp.token));
        self.finish(generation, previous, outcome)
    }

    /// Clear memory and persisted credentials.
    pub fn logout(&self) {
        if let Some(user) = self.state().user {
            log::info!("logout for {}", user.email);
        }
        self.sign_out();
    }

    /// Run a page-level API call and drop its result if the session changed
    /// (logout, forced sign-out, re-login) before it completed.
    ///
    /// # Errors
    ///
    /// Returns the call's own error, or `Superseded` for a stale success.
    pub async fn scoped<T, F>(&self, call: F) -> Result<T, SessionError>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        let generation = self.generation();
        let value = call.await?;
        if self.generation() != generation {
            log::debug!("discarding response from an earlier session");
            return Err(SessionError::Superseded);
        }
        Ok(value)
    }

    fn handle_unauthorized(&self, event: &UnauthorizedEvent) {
        log::warn!("backend rejected credentials on {}; signing out", event.path);
        self.sign_out();
        self.inner.navigator.hard_navigate(LOGIN_PATH);
    }

    fn sign_out(&self) {
        self.update(|core| {
            core.generation += 1;
            core.state = AuthState::anonymous();
        });
        self.inner.store.clear();
    }

    /// Enter a transient phase and return the new generation plus the state
    /// to fall back to on failure.
    fn begin(&self, phase: SessionPhase) -> (u64, AuthState) {
        let mut previous = AuthState::anonymous();
        let mut generation = 0;
        self.update(|core| {
            previous = core.state.clone();
            if previous.loading() {
                previous.phase = settled_phase(&previous);
            }
            core.generation += 1;
            generation = core.generation;
            core.state.phase = phase;
        });
        (generation, previous)
    }

    fn finish(
        &self,
        generation: u64,
        previous: AuthState,
        outcome: Result<(User, String), ApiError>,
    ) -> Result<(), SessionError> {
        let current = self.generation() == generation;
        let (user, token) = match outcome {
            Ok(pair) if current => pair,
            Ok(_) => {
                log::debug!("discarding superseded authentication response");
                return Err(SessionError::Superseded);
            }
            Err(e) => {
                if current {
                    self.update(|core| core.state = previous);
                }
                return Err(e.into());
            }
        };

        if let Err(e) = self.inner.store.save(&token, &user) {
            log::warn!("could not persist credentials: {e}");
            self.update(|core| core.state = previous);
            return Err(e.into());
        }
        log::info!("signed in as {} ({})", user.email, user.role.as_str());
        self.update(|core| core.state = AuthState::authenticated(user, token));
        Ok(())
    }

    fn core(&self) -> std::sync::MutexGuard<'_, Core> {
        self.inner.core.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Mutate under the lock, then notify listeners with the lock released.
    fn update(&self, mutate: impl FnOnce(&mut Core)) {
        let snapshot = {
            let mut core = self.core();
            mutate(&mut core);
            core.state.clone()
        };
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for listener in listeners {
            listener(&snapshot);
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let core = self.core();
        f.debug_struct("Session")
            .field("phase", &core.state.phase)
            .field("user", &core.state.user)
            .field("generation", &core.generation)
            .finish_non_exhaustive()
    }
}

/// Phase to fall back to when an operation starts from a loading phase.
fn settled_phase(state: &AuthState) -> SessionPhase {
    if state.is_authenticated() { SessionPhase::Authenticated } else { SessionPhase::Anonymous }
}

// =============================================================
// Leptos context
// =============================================================

/// Provide `session` and a reactive mirror of its state to descendants.
pub fn provide_session(session: Session) -> RwSignal<AuthState> {
    let auth = RwSignal::new(session.state());
    session.subscribe(move |state| {
        let _ = auth.try_set(state.clone());
    });
    provide_context(session);
    provide_context(auth);
    auth
}

/// The session provided at the application root.
///
/// # Panics
///
/// Panics when called outside `SessionProvider`; that is a wiring bug, not a
/// runtime condition.
pub fn use_session() -> Session {
    use_context::<Session>()
        .unwrap_or_else(|| panic!("use_session called outside SessionProvider: no Session in context"))
}

/// Reactive auth state provided alongside the session.
///
/// # Panics
///
/// Panics when called outside `SessionProvider`.
pub fn use_auth() -> RwSignal<AuthState> {
    use_context::<RwSignal<AuthState>>()
        .unwrap_or_else(|| panic!("use_auth called outside SessionProvider: no AuthState in context"))
}
