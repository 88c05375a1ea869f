//! Customer's current subscription: view, request a pack by SKU, deactivate.
//!
//! SYSTEM CONTEXT
//! ==============
//! A customer without a subscription gets a 404 from the backend. That is
//! rendered as the empty state with the request form rather than an error.

#[cfg(test)]
#[path = "customer_subscription_test.rs"]
mod customer_subscription_test;

use leptos::prelude::*;

use crate::components::loading::LoadingIndicator;
use crate::net::error::ApiError;
use crate::net::types::{CurrentSubscription, SubscriptionStatus};
use crate::state::remote::Remote;
use crate::state::session::use_session;
use crate::util::format::{format_date, format_price, format_validity, status_class};
use crate::util::task::{spawn_action, spawn_fetch};

/// Trimmed SKU; `None` when blank.
pub(crate) fn normalize_sku(raw: &str) -> Option<String> {
    let sku = raw.trim();
    (!sku.is_empty()).then(|| sku.to_owned())
}

/// Map "no subscription yet" to `Ok(None)`.
pub(crate) fn absent_on_not_found<T>(result: Result<T, ApiError>) -> Result<Option<T>, ApiError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.status() == Some(404) => Ok(None),
        Err(e) => Err(e),
    }
}

pub(crate) fn can_deactivate(status: SubscriptionStatus) -> bool {
    status == SubscriptionStatus::Active
}

#[component]
pub fn CustomerSubscriptionPage() -> impl IntoView {
    let session = use_session();
    let current = RwSignal::new(Remote::<Option<CurrentSubscription>>::Loading);
    let sku = RwSignal::new(String::new());
    let reload = RwSignal::new(0_u32);
    let message = RwSignal::new(None::<(bool, String)>);

    let fetch_session = session.clone();
    Effect::new(move || {
        reload.track();
        let api = fetch_session.api().clone();
        spawn_fetch(&fetch_session, current, "Failed to fetch subscription", async move {
            absent_on_not_found(api.customer_subscription().await.map(|resp| resp.subscription))
        });
    });

    let request_session = session.clone();
    let on_request = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(code) = normalize_sku(&sku.get()) else {
            message.set(Some((false, "Enter a pack SKU.".to_owned())));
            return;
        };
        message.set(None);
        let api = request_session.api().clone();
        spawn_action(&request_session, async move { api.request_subscription(&code).await }, move |outcome| {
            match outcome {
                Ok(resp) => {
                    let text = if resp.message.is_empty() { "Subscription requested".to_owned() } else { resp.message };
                    message.set(Some((true, text)));
                    sku.set(String::new());
                    reload.update(|n| *n += 1);
                }
                Err(e) => message.set(Some((false, e.user_message("Failed to request subscription")))),
            }
        });
    };

    let on_deactivate = move |_: leptos::ev::MouseEvent| {
        message.set(None);
        let api = session.api().clone();
        spawn_action(&session, async move { api.deactivate_subscription().await }, move |outcome| match outcome {
            Ok(_) => {
                message.set(Some((true, "Subscription deactivated".to_owned())));
                reload.update(|n| *n += 1);
            }
            Err(e) => message.set(Some((false, e.user_message("Failed to deactivate subscription")))),
        });
    };

    view! {
        <section class="page">
            <h1 class="page__title">"My Subscription"</h1>
            {move || {
                message.get().map(|(ok, text)| {
                    let class = if ok { "page__success" } else { "page__error" };
                    view! { <p class=class>{text}</p> }
                })
            }}
            {move || match current.get() {
                Remote::Loading => view! { <LoadingIndicator/> }.into_any(),
                Remote::Failed(text) => view! { <p class="page__error">{text}</p> }.into_any(),
                Remote::Ready(None) => view! { <p class="page__empty">"You have no subscription yet."</p> }.into_any(),
                Remote::Ready(Some(sub)) => {
                    let deactivate = can_deactivate(sub.status).then(|| {
                        view! { <button class="btn btn--danger" on:click=on_deactivate.clone()>"Deactivate"</button> }
                    });
                    view! {
                        <div class="subscription-card">
                            <h2>{sub.pack.name}" "<code>{sub.pack.sku}</code></h2>
                            <span class=status_class(sub.status)>{sub.status.as_str()}</span>
                            <dl>
                                <dt>"Price"</dt><dd>{format_price(sub.pack.price)}</dd>
                                <dt>"Validity"</dt><dd>{format_validity(sub.pack.validity_months)}</dd>
                                <dt>"Assigned"</dt><dd>{format_date(sub.assigned_at.as_deref())}</dd>
                                <dt>"Expires"</dt><dd>{format_date(sub.expires_at.as_deref())}</dd>
                                <dt>"Valid"</dt><dd>{if sub.is_valid { "Yes" } else { "No" }}</dd>
                            </dl>
                            {deactivate}
                        </div>
                    }
                    .into_any()
                }
            }}
            <h2 class="page__subtitle">"Request a pack"</h2>
            <form class="toolbar" on:submit=on_request>
                <input
                    class="toolbar__search"
                    type="text"
                    placeholder="Pack SKU"
                    prop:value=move || sku.get()
                    on:input=move |ev| sku.set(event_target_value(&ev))
                />
                <button class="btn btn--primary" type="submit">"Request"</button>
            </form>
        </section>
    }
}
