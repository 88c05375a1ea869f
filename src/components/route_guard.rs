//! Route gates over the session state.
//!
//! SYSTEM CONTEXT
//! ==============
//! Both gates re-evaluate whenever the `AuthState` signal changes, so a
//! logout or forced sign-out redirects immediately without the page doing
//! anything. Redirects replace the history entry so Back never lands on a
//! page that would bounce the user again. Decisions are memoized so children
//! are only rebuilt when the outcome changes.

#[cfg(test)]
#[path = "route_guard_test.rs"]
mod route_guard_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::Redirect;

use super::loading::LoadingIndicator;
use crate::net::types::Role;
use crate::state::auth::AuthState;
use crate::state::session::use_auth;
use crate::util::auth::{GuardDecision, protected, public_only};

pub fn replace_history() -> NavigateOptions {
    NavigateOptions { replace: true, ..NavigateOptions::default() }
}

/// Public-only decision tracking `auth`.
pub fn public_gate(auth: RwSignal<AuthState>) -> Memo<GuardDecision> {
    Memo::new(move |_| public_only(&auth.get()))
}

/// Protected decision tracking `auth`.
pub fn protected_gate(auth: RwSignal<AuthState>, required_role: Option<Role>) -> Memo<GuardDecision> {
    Memo::new(move |_| protected(&auth.get(), required_role))
}

fn render_decision(decision: GuardDecision, children: &ChildrenFn) -> AnyView {
    match decision {
        GuardDecision::Loading => view! { <LoadingIndicator full_screen=true/> }.into_any(),
        GuardDecision::Redirect(path) => view! { <Redirect path=path options=replace_history()/> }.into_any(),
        GuardDecision::Render => children().into_any(),
    }
}

/// Renders children for anonymous users; sends signed-in users to their
/// role's home page.
#[component]
pub fn PublicRoute(children: ChildrenFn) -> impl IntoView {
    let decision = public_gate(use_auth());
    move || render_decision(decision.get(), &children)
}

/// Renders children for signed-in users of `required_role` (any role when
/// unset). Anonymous users go to `/login`, other roles to `/unauthorized`.
#[component]
pub fn ProtectedRoute(#[prop(optional)] required_role: Option<Role>, children: ChildrenFn) -> impl IntoView {
    let decision = protected_gate(use_auth(), required_role);
    move || render_decision(decision.get(), &children)
}
