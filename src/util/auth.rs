//! Route authorization decisions.
//!
//! SYSTEM CONTEXT
//! ==============
//! `PublicRoute` and `ProtectedRoute` share one question: render the
//! children, show a loading indicator, or redirect. The answer depends only
//! on `AuthState`, so it lives here as plain functions the components call.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::Role;
use crate::state::auth::AuthState;
use crate::state::session::LOGIN_PATH;

pub const UNAUTHORIZED_PATH: &str = "/unauthorized";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session still settling; render neither children nor a redirect.
    Loading,
    Render,
    /// Navigate to the path, replacing the current history entry.
    Redirect(&'static str),
}

/// Gate for pages only anonymous users should see (login, signup).
pub fn public_only(state: &AuthState) -> GuardDecision {
    if state.loading() {
        return GuardDecision::Loading;
    }
    match state.role() {
        Some(role) => GuardDecision::Redirect(role.home_path()),
        None => GuardDecision::Render,
    }
}

/// Gate for signed-in pages, optionally restricted to one role.
pub fn protected(state: &AuthState, required_role: Option<Role>) -> GuardDecision {
    if state.loading() {
        return GuardDecision::Loading;
    }
    let Some(role) = state.role() else {
        return GuardDecision::Redirect(LOGIN_PATH);
    };
    match required_role {
        Some(required) if required != role => GuardDecision::Redirect(UNAUTHORIZED_PATH),
        _ => GuardDecision::Render,
    }
}
