//! Loading indicator shown while the session settles or a page fetches.

use leptos::prelude::*;

#[component]
pub fn LoadingIndicator(#[prop(optional)] full_screen: bool) -> impl IntoView {
    let class = if full_screen { "loading loading--screen" } else { "loading" };
    view! {
        <div class=class role="status">
            <span class="loading__spinner"></span>
            <span class="loading__label">"Loading..."</span>
        </div>
    }
}
