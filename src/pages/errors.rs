//! Static error pages.

use leptos::prelude::*;

use crate::state::session::use_auth;

/// Link back to wherever the current user belongs.
fn home_link() -> impl IntoView {
    let auth = use_auth();
    let href = move || auth.with(|a| a.role().map_or("/login", |r| r.home_path()));
    view! { <a class="btn btn--primary" href=href>"Go back"</a> }
}

#[component]
pub fn UnauthorizedPage() -> impl IntoView {
    view! {
        <div class="error-page">
            <h1>"403"</h1>
            <p>"You do not have permission to view this page."</p>
            {home_link()}
        </div>
    }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="error-page">
            <h1>"404"</h1>
            <p>"Page not found."</p>
            {home_link()}
        </div>
    }
}
