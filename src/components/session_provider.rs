//! Root provider for the session context.

use leptos::prelude::*;

use crate::state::session::{Session, provide_session};

/// Provide `session` to every descendant and restore persisted credentials
/// before the children render.
#[component]
pub fn SessionProvider(session: Session, children: Children) -> impl IntoView {
    provide_session(session.clone());
    session.restore();
    children()
}
