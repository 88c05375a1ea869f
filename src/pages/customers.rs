//! Admin customer list with search, create, edit and delete.

#[cfg(test)]
#[path = "customers_test.rs"]
mod customers_test;

use leptos::prelude::*;

use crate::components::form_dialog::{FormDialog, TextField};
use crate::components::loading::LoadingIndicator;
use crate::net::api::PageRequest;
use crate::net::types::{Customer, CustomerCreateRequest, CustomerUpdateRequest, CustomersResponse};
use crate::state::remote::Remote;
use crate::state::session::{SessionError, use_session};
use crate::util::format::format_date;
use crate::util::task::{spawn_action, spawn_fetch};

#[derive(Clone, Debug, PartialEq)]
enum Editing {
    Create,
    Edit(Customer),
}

pub(crate) fn customer_create_request(
    name: &str,
    email: &str,
    phone: &str,
) -> Result<CustomerCreateRequest, &'static str> {
    let (name, email, phone) = (name.trim(), email.trim(), phone.trim());
    if name.is_empty() || email.is_empty() || phone.is_empty() {
        return Err("Name, email and phone are required.");
    }
    Ok(CustomerCreateRequest { name: name.to_owned(), email: email.to_owned(), phone: phone.to_owned() })
}

/// Only fields that differ from `original` are sent. Email is not editable.
pub(crate) fn customer_update_request(
    original: &Customer,
    name: &str,
    phone: &str,
) -> Result<CustomerUpdateRequest, &'static str> {
    let (name, phone) = (name.trim(), phone.trim());
    if name.is_empty() || phone.is_empty() {
        return Err("Name and phone are required.");
    }
    let req = CustomerUpdateRequest {
        name: (name != original.name).then(|| name.to_owned()),
        phone: (phone != original.phone).then(|| phone.to_owned()),
    };
    if req == CustomerUpdateRequest::default() {
        return Err("No changes to save.");
    }
    Ok(req)
}

#[component]
pub fn CustomersPage() -> impl IntoView {
    let session = use_session();
    let list = RwSignal::new(Remote::<CustomersResponse>::Loading);
    let search = RwSignal::new(String::new());
    let applied = RwSignal::new(String::new());
    let reload = RwSignal::new(0_u32);
    let action_error = RwSignal::new(None::<String>);

    let editing = RwSignal::new(None::<Editing>);
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let dialog_error = RwSignal::new(None::<String>);

    let fetch_session = session.clone();
    Effect::new(move || {
        reload.track();
        let query = applied.get();
        let window = PageRequest::default();
        let api = fetch_session.api().clone();
        spawn_fetch(&fetch_session, list, "Failed to fetch customers", async move {
            api.customers(window, Some(&query)).await
        });
    });

    let on_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        applied.set(search.get());
    };

    let open = move |mode: Editing| {
        let (n, e, p) = match &mode {
            Editing::Create => (String::new(), String::new(), String::new()),
            Editing::Edit(c) => (c.name.clone(), c.email.clone(), c.phone.clone()),
        };
        name.set(n);
        email.set(e);
        phone.set(p);
        dialog_error.set(None);
        editing.set(Some(mode));
    };

    let saved = move |outcome: Result<(), SessionError>, fallback: &'static str| match outcome {
        Ok(()) => {
            editing.set(None);
            reload.update(|n| *n += 1);
        }
        Err(e) => dialog_error.set(Some(e.user_message(fallback))),
    };

    let save_session = session.clone();
    let on_save = Callback::new(move |()| {
        let api = save_session.api().clone();
        match editing.get_untracked() {
            None => {}
            Some(Editing::Create) => {
                match customer_create_request(&name.get_untracked(), &email.get_untracked(), &phone.get_untracked()) {
                    Ok(req) => spawn_action(
                        &save_session,
                        async move { api.create_customer(&req).await.map(|_| ()) },
                        move |outcome| saved(outcome, "Failed to create customer"),
                    ),
                    Err(msg) => dialog_error.set(Some(msg.to_owned())),
                }
            }
            Some(Editing::Edit(customer)) => {
                match customer_update_request(&customer, &name.get_untracked(), &phone.get_untracked()) {
                    Ok(req) => spawn_action(
                        &save_session,
                        async move { api.update_customer(customer.id, &req).await.map(|_| ()) },
                        move |outcome| saved(outcome, "Failed to update customer"),
                    ),
                    Err(msg) => dialog_error.set(Some(msg.to_owned())),
                }
            }
        }
    });
    let on_cancel = Callback::new(move |()| editing.set(None));

    let on_delete = move |customer_id: i64| {
        action_error.set(None);
        let api = session.api().clone();
        spawn_action(&session, async move { api.delete_customer(customer_id).await }, move |outcome| match outcome {
            Ok(_) => reload.update(|n| *n += 1),
            Err(e) => action_error.set(Some(e.user_message("Failed to delete customer"))),
        });
    };

    view! {
        <section class="page">
            <div class="page__header">
                <h1 class="page__title">"Customers"</h1>
                <button class="btn btn--primary" on:click=move |_| open(Editing::Create)>"Add Customer"</button>
            </div>
            <form class="toolbar" on:submit=on_search>
                <input
                    class="toolbar__search"
                    type="search"
                    placeholder="Search by name or email"
                    prop:value=move || search.get()
                    on:input=move |ev| search.set(event_target_value(&ev))
                />
                <button class="btn btn--secondary" type="submit">"Search"</button>
            </form>
            {move || action_error.get().map(|message| view! { <p class="page__error">{message}</p> })}
            {move || match list.get() {
                Remote::Loading => view! { <LoadingIndicator/> }.into_any(),
                Remote::Failed(message) => view! { <p class="page__error">{message}</p> }.into_any(),
                Remote::Ready(resp) => view! {
                    <p class="page__count">{format!("{} customers", resp.pagination.total)}</p>
                    {customer_table(resp.customers, move |c| open(Editing::Edit(c)), on_delete.clone())}
                }
                .into_any(),
            }}
            {move || {
                editing.get().map(|mode| {
                    let (title, submit, is_edit) = match mode {
                        Editing::Create => ("Add Customer", "Create", false),
                        Editing::Edit(_) => ("Edit Customer", "Save", true),
                    };
                    view! {
                        <FormDialog title=title submit_label=submit error=dialog_error on_submit=on_save on_cancel=on_cancel>
                            <TextField label="Name" value=name/>
                            <TextField label="Email" value=email kind="email" readonly=is_edit/>
                            <TextField label="Phone" value=phone kind="tel"/>
                        </FormDialog>
                    }
                })
            }}
        </section>
    }
}

fn customer_table(
    customers: Vec<Customer>,
    on_edit: impl Fn(Customer) + Clone + 'static,
    on_delete: impl Fn(i64) + Clone + 'static,
) -> AnyView {
    if customers.is_empty() {
        return view! { <p class="page__empty">"No customers found."</p> }.into_any();
    }
    view! {
        <table class="table">
            <thead>
                <tr><th>"Name"</th><th>"Email"</th><th>"Phone"</th><th>"Joined"</th><th></th></tr>
            </thead>
            <tbody>
                {customers
                    .into_iter()
                    .map(|customer| {
                        let on_edit = on_edit.clone();
                        let on_delete = on_delete.clone();
                        let id = customer.id;
                        let row = customer.clone();
                        view! {
                            <tr>
                                <td>{customer.name}</td>
                                <td>{customer.email}</td>
                                <td>{customer.phone}</td>
                                <td>{format_date(Some(&customer.created_at))}</td>
                                <td>
                                    <button class="btn btn--secondary" on:click=move |_| on_edit(row.clone())>"Edit"</button>
                                    <button class="btn btn--danger" on:click=move |_| on_delete(id)>"Delete"</button>
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
