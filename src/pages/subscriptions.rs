//! Admin view of every subscription, filterable by status.
//!
//! Only `requested` rows offer approve and only `active` rows offer
//! unassign; the backend owns the rest of the lifecycle. Assigning a pack to
//! a customer goes through a dialog keyed by customer and pack id.

#[cfg(test)]
#[path = "subscriptions_test.rs"]
mod subscriptions_test;

use futures::future::Either;
use leptos::prelude::*;

use crate::components::form_dialog::{FormDialog, TextField};
use crate::components::loading::LoadingIndicator;
use crate::net::api::PageRequest;
use crate::net::types::{Subscription, SubscriptionStatus, SubscriptionsResponse};
use crate::state::remote::Remote;
use crate::state::session::use_session;
use crate::util::format::{format_date, format_price, status_class};
use crate::util::task::{spawn_action, spawn_fetch};

/// `""` (the "All" option) or an unknown value clears the filter.
pub(crate) fn parse_status_filter(raw: &str) -> Option<SubscriptionStatus> {
    SubscriptionStatus::parse(raw)
}

pub(crate) fn can_unassign(status: SubscriptionStatus) -> bool {
    status == SubscriptionStatus::Active
}

/// Customer and pack ids from the assign dialog.
pub(crate) fn parse_assign_input(customer_id: &str, pack_id: &str) -> Result<(i64, i64), &'static str> {
    let customer_id = customer_id.trim().parse::<i64>().map_err(|_| "Enter a numeric customer ID.")?;
    let pack_id = pack_id.trim().parse::<i64>().map_err(|_| "Enter a numeric pack ID.")?;
    Ok((customer_id, pack_id))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RowAction {
    Approve(i64),
    Unassign { customer_id: i64, subscription_id: i64 },
}

#[component]
pub fn SubscriptionsPage() -> impl IntoView {
    let session = use_session();
    let list = RwSignal::new(Remote::<SubscriptionsResponse>::Loading);
    let status = RwSignal::new(None::<SubscriptionStatus>);
    let reload = RwSignal::new(0_u32);
    let action_error = RwSignal::new(None::<String>);

    let assigning = RwSignal::new(false);
    let customer_field = RwSignal::new(String::new());
    let pack_field = RwSignal::new(String::new());
    let dialog_error = RwSignal::new(None::<String>);

    let fetch_session = session.clone();
    Effect::new(move || {
        reload.track();
        let filter = status.get();
        let window = PageRequest::default();
        let api = fetch_session.api().clone();
        spawn_fetch(&fetch_session, list, "Failed to fetch subscriptions", async move {
            api.subscriptions(window, filter).await
        });
    });

    let assign_session = session.clone();
    let on_action = move |action: RowAction| {
        action_error.set(None);
        let api = session.api().clone();
        let (call, fallback) = match action {
            RowAction::Approve(id) => (
                Either::Left(async move { api.approve_subscription(id).await }),
                "Failed to approve subscription",
            ),
            RowAction::Unassign { customer_id, subscription_id } => (
                Either::Right(async move {
                    api.unassign_subscription(customer_id, subscription_id).await
                }),
                "Failed to unassign subscription",
            ),
        };
        spawn_action(&session, call, move |outcome| match outcome {
            Ok(_) => reload.update(|n| *n += 1),
            Err(e) => action_error.set(Some(e.user_message(fallback))),
        });
    };

    let open_assign = move |_: leptos::ev::MouseEvent| {
        customer_field.set(String::new());
        pack_field.set(String::new());
        dialog_error.set(None);
        assigning.set(true);
    };

    let on_assign = Callback::new(move |()| {
        let (customer_id, pack_id) =
            match parse_assign_input(&customer_field.get_untracked(), &pack_field.get_untracked()) {
                Ok(ids) => ids,
                Err(msg) => {
                    dialog_error.set(Some(msg.to_owned()));
                    return;
                }
            };
        let api = assign_session.api().clone();
        spawn_action(
            &assign_session,
            async move { api.assign_subscription(customer_id, pack_id).await },
            move |outcome| match outcome {
                Ok(_) => {
                    assigning.set(false);
                    reload.update(|n| *n += 1);
                }
                Err(e) => dialog_error.set(Some(e.user_message("Failed to assign subscription"))),
            },
        );
    });
    let on_cancel = Callback::new(move |()| assigning.set(false));

    view! {
        <section class="page">
            <div class="page__header">
                <h1 class="page__title">"Subscriptions"</h1>
                <button class="btn btn--primary" on:click=open_assign>"Assign Subscription"</button>
            </div>
            <div class="toolbar">
                <select
                    class="toolbar__filter"
                    on:change=move |ev| status.set(parse_status_filter(&event_target_value(&ev)))
                >
                    <option value="">"All statuses"</option>
                    {SubscriptionStatus::ALL
                        .into_iter()
                        .map(|s| view! { <option value=s.as_str()>{s.as_str()}</option> })
                        .collect_view()}
                </select>
            </div>
            {move || action_error.get().map(|message| view! { <p class="page__error">{message}</p> })}
            {move || match list.get() {
                Remote::Loading => view! { <LoadingIndicator/> }.into_any(),
                Remote::Failed(message) => view! { <p class="page__error">{message}</p> }.into_any(),
                Remote::Ready(resp) => subscription_table(resp.subscriptions, on_action.clone()),
            }}
            <Show when=move || assigning.get()>
                <FormDialog
                    title="Assign Subscription"
                    submit_label="Assign"
                    error=dialog_error
                    on_submit=on_assign
                    on_cancel=on_cancel
                >
                    <TextField label="Customer ID" value=customer_field kind="number"/>
                    <TextField label="Pack ID" value=pack_field kind="number"/>
                </FormDialog>
            </Show>
        </section>
    }
}

fn subscription_table(rows: Vec<Subscription>, on_action: impl Fn(RowAction) + Clone + 'static) -> AnyView {
    if rows.is_empty() {
        return view! { <p class="page__empty">"No subscriptions match."</p> }.into_any();
    }
    view! {
        <table class="table">
            <thead>
                <tr>
                    <th>"Customer"</th><th>"Pack"</th><th>"Price"</th><th>"Status"</th>
                    <th>"Requested"</th><th>"Expires"</th><th></th>
                </tr>
            </thead>
            <tbody>
                {rows
                    .into_iter()
                    .map(|sub| {
                        let approve = on_action.clone();
                        let unassign = on_action.clone();
                        let id = sub.id;
                        let customer_id = sub.customer_id;
                        view! {
                            <tr>
                                <td>{format!("#{customer_id}")}</td>
                                <td>{sub.pack_name}" "<code>{sub.pack_sku}</code></td>
                                <td>{format_price(sub.price)}</td>
                                <td><span class=status_class(sub.status)>{sub.status.as_str()}</span></td>
                                <td>{format_date(sub.requested_at.as_deref())}</td>
                                <td>{format_date(sub.expires_at.as_deref())}</td>
                                <td>
                                    {sub.status.can_approve().then(|| view! {
                                        <button class="btn btn--primary" on:click=move |_| approve(RowAction::Approve(id))>
                                            "Approve"
                                        </button>
                                    })}
                                    {can_unassign(sub.status).then(|| view! {
                                        <button
                                            class="btn btn--danger"
                                            on:click=move |_| unassign(RowAction::Unassign { customer_id, subscription_id: id })
                                        >
                                            "Unassign"
                                        </button>
                                    })}
                                </td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
    .into_any()
}
