//! Spawning backend calls from components.
//!
//! Calls run through `Session::scoped`, so a response that lands after the
//! user signed out (or signed in as someone else) is dropped.

use std::future::Future;

use leptos::prelude::*;

use crate::net::error::ApiError;
use crate::state::remote::Remote;
use crate::state::session::{Session, SessionError};

/// Fetch into `target`, which shows `Loading` until the call settles.
pub fn spawn_fetch<T, Fut>(session: &Session, target: RwSignal<Remote<T>>, fallback: &'static str, call: Fut)
where
    T: Send + Sync + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    target.set(Remote::Loading);
    let session = session.clone();
    spawn(async move {
        match session.scoped(call).await {
            Ok(value) => target.set(Remote::Ready(value)),
            Err(SessionError::Superseded) => log::debug!("dropped stale page data"),
            Err(e) => target.set(Remote::Failed(e.user_message(fallback))),
        }
    });
}

/// Run a mutation and hand its outcome to `done`. Stale outcomes are dropped.
pub fn spawn_action<T, Fut, F>(session: &Session, call: Fut, done: F)
where
    T: 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
    F: FnOnce(Result<T, SessionError>) + 'static,
{
    let session = session.clone();
    spawn(async move {
        match session.scoped(call).await {
            Err(SessionError::Superseded) => log::debug!("dropped stale action result"),
            outcome => done(outcome),
        }
    });
}

#[cfg(feature = "csr")]
pub(crate) fn spawn(task: impl Future<Output = ()> + 'static) {
    leptos::task::spawn_local(task);
}

#[cfg(not(feature = "csr"))]
pub(crate) fn spawn(task: impl Future<Output = ()> + 'static) {
    drop(task);
}
