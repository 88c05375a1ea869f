//! Auth-session snapshot for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! `Session` owns the authoritative copy; the Leptos provider mirrors every
//! change into an `RwSignal<AuthState>` that route guards and layout read.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::{Role, User};

/// Session lifecycle.
///
/// `Uninitialized → Restoring → {Authenticated, Anonymous}`; login/signup
/// pass through `LoggingIn`/`SigningUp`; logout or a 401 lands in `Anonymous`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionPhase {
    #[default]
    Uninitialized,
    Restoring,
    Anonymous,
    LoggingIn,
    SigningUp,
    Authenticated,
}

impl SessionPhase {
    pub fn is_loading(self) -> bool {
        matches!(self, Self::Uninitialized | Self::Restoring | Self::LoggingIn | Self::SigningUp)
    }
}

/// Authentication state: current user, token, and lifecycle phase.
///
/// `user` and `token` are always both present or both absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub phase: SessionPhase,
}

impl AuthState {
    pub fn authenticated(user: User, token: String) -> Self {
        Self { user: Some(user), token: Some(token), phase: SessionPhase::Authenticated }
    }

    pub fn anonymous() -> Self {
        Self { user: None, token: None, phase: SessionPhase::Anonymous }
    }

    pub fn loading(&self) -> bool {
        self.phase.is_loading()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }
}
