//! Customer subscription history, ordered by assignment date.

#[cfg(test)]
#[path = "customer_history_test.rs"]
mod customer_history_test;

use leptos::prelude::*;

use crate::components::loading::LoadingIndicator;
use crate::net::api::PageRequest;
use crate::net::types::{SortOrder, SubscriptionHistoryItem, SubscriptionHistoryResponse};
use crate::state::remote::Remote;
use crate::state::session::use_session;
use crate::util::format::{format_date, status_class};
use crate::util::task::spawn_fetch;

pub(crate) fn toggle(order: SortOrder) -> SortOrder {
    match order {
        SortOrder::Asc => SortOrder::Desc,
        SortOrder::Desc => SortOrder::Asc,
    }
}

pub(crate) fn sort_label(order: SortOrder) -> &'static str {
    match order {
        SortOrder::Asc => "Oldest first",
        SortOrder::Desc => "Newest first",
    }
}

#[component]
pub fn CustomerHistoryPage() -> impl IntoView {
    let session = use_session();
    let list = RwSignal::new(Remote::<SubscriptionHistoryResponse>::Loading);
    let sort = RwSignal::new(SortOrder::default());

    Effect::new(move || {
        let order = sort.get();
        let window = PageRequest::default();
        let api = session.api().clone();
        spawn_fetch(&session, list, "Failed to fetch subscription history", async move {
            api.subscription_history(window, order).await
        });
    });

    view! {
        <section class="page">
            <h1 class="page__title">"Subscription History"</h1>
            <div class="toolbar">
                <button
                    class="btn btn--secondary"
                    on:click=move |_| sort.update(|s| *s = toggle(*s))
                >
                    {move || sort_label(sort.get())}
                </button>
            </div>
            {move || match list.get() {
                Remote::Loading => view! { <LoadingIndicator/> }.into_any(),
                Remote::Failed(message) => view! { <p class="page__error">{message}</p> }.into_any(),
                Remote::Ready(resp) => history_table(resp.history),
            }}
        </section>
    }
}

fn history_table(items: Vec<SubscriptionHistoryItem>) -> AnyView {
    if items.is_empty() {
        return view! { <p class="page__empty">"No subscription history."</p> }.into_any();
    }
    view! {
        <table class="table">
            <thead>
                <tr><th>"Pack"</th><th>"Status"</th><th>"Assigned"</th><th>"Expires"</th></tr>
            </thead>
            <tbody>
                {items
                    .into_iter()
                    .map(|item| {
                        view! {
                            <tr>
                                <td>{item.pack_name}</td>
                                <td><span class=status_class(item.status)>{item.status.as_str()}</span></td>
                                <td>{format_date(item.assigned_at.as_deref())}</td>
                                <td>{format_date(item.expires_at.as_deref())}</td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
    .into_any()
}
