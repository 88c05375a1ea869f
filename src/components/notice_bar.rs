//! Dismissable banner for the current notice.

use leptos::prelude::*;

use crate::state::notice::use_notices;

#[component]
pub fn NoticeBar() -> impl IntoView {
    let notices = use_notices();
    move || {
        notices.0.get().map(|notice| {
            let class = notice.class();
            view! {
                <div class=class role="alert">
                    <span class="notice__message">{notice.message}</span>
                    <button class="notice__close" on:click=move |_| notices.dismiss()>"×"</button>
                </div>
            }
        })
    }
}
