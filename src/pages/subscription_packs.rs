//! Admin catalogue of subscription packs: list, create, edit, delete.

#[cfg(test)]
#[path = "subscription_packs_test.rs"]
mod subscription_packs_test;

use leptos::prelude::*;

use crate::components::form_dialog::{FormDialog, TextField};
use crate::components::loading::LoadingIndicator;
use crate::net::api::PageRequest;
use crate::net::types::{
    SubscriptionPack, SubscriptionPackCreateRequest, SubscriptionPackUpdateRequest, SubscriptionPacksResponse,
};
use crate::state::remote::Remote;
use crate::state::session::{SessionError, use_session};
use crate::util::format::{format_price, format_validity};
use crate::util::task::{spawn_action, spawn_fetch};

#[derive(Clone, Debug, PartialEq)]
enum Editing {
    Create,
    Edit(SubscriptionPack),
}

/// Raw form contents, as typed.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct PackDraft {
    pub name: String,
    pub description: String,
    pub sku: String,
    pub price: String,
    pub validity_months: String,
}

impl PackDraft {
    pub(crate) fn from_pack(pack: &SubscriptionPack) -> Self {
        Self {
            name: pack.name.clone(),
            description: pack.description.clone(),
            sku: pack.sku.clone(),
            price: pack.price.to_string(),
            validity_months: pack.validity_months.to_string(),
        }
    }

    pub(crate) fn to_create_request(&self) -> Result<SubscriptionPackCreateRequest, &'static str> {
        let (name, description, sku) = (self.name.trim(), self.description.trim(), self.sku.trim());
        if name.is_empty() || description.is_empty() || sku.is_empty() {
            return Err("Name, description and SKU are required.");
        }
        let price = self.price.trim().parse::<f64>().map_err(|_| "Price must be a number.")?;
        let validity_months = self
            .validity_months
            .trim()
            .parse::<u32>()
            .map_err(|_| "Validity must be a whole number of months.")?;
        Ok(SubscriptionPackCreateRequest {
            name: name.to_owned(),
            description: description.to_owned(),
            sku: sku.to_owned(),
            price,
            validity_months,
        })
    }

    /// Only fields that differ from `original` are sent.
    pub(crate) fn to_update_request(
        &self,
        original: &SubscriptionPack,
    ) -> Result<SubscriptionPackUpdateRequest, &'static str> {
        let next = self.to_create_request()?;
        #[allow(clippy::float_cmp)]
        let price_changed = next.price != original.price;
        let req = SubscriptionPackUpdateRequest {
            name: (next.name != original.name).then_some(next.name),
            description: (next.description != original.description).then_some(next.description),
            sku: (next.sku != original.sku).then_some(next.sku),
            price: price_changed.then_some(next.price),
            validity_months: (next.validity_months != original.validity_months).then_some(next.validity_months),
        };
        if req == SubscriptionPackUpdateRequest::default() {
            return Err("No changes to save.");
        }
        Ok(req)
    }
}

#[component]
pub fn SubscriptionPacksPage() -> impl IntoView {
    let session = use_session();
    let list = RwSignal::new(Remote::<SubscriptionPacksResponse>::Loading);
    let reload = RwSignal::new(0_u32);
    let action_error = RwSignal::new(None::<String>);

    let editing = RwSignal::new(None::<Editing>);
    let name = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let sku = RwSignal::new(String::new());
    let price = RwSignal::new(String::new());
    let validity = RwSignal::new(String::new());
    let dialog_error = RwSignal::new(None::<String>);

    let fetch_session = session.clone();
    Effect::new(move || {
        reload.track();
        let window = PageRequest::default();
        let api = fetch_session.api().clone();
        spawn_fetch(&fetch_session, list, "Failed to fetch subscription packs", async move {
            api.subscription_packs(window).await
        });
    });

    let open = move |mode: Editing| {
        let draft = match &mode {
            Editing::Create => PackDraft { validity_months: "1".to_owned(), ..PackDraft::default() },
            Editing::Edit(pack) => PackDraft::from_pack(pack),
        };
        name.set(draft.name);
        description.set(draft.description);
        sku.set(draft.sku);
        price.set(draft.price);
        validity.set(draft.validity_months);
        dialog_error.set(None);
        editing.set(Some(mode));
    };

    let draft = move || PackDraft {
        name: name.get_untracked(),
        description: description.get_untracked(),
        sku: sku.get_untracked(),
        price: price.get_untracked(),
        validity_months: validity.get_untracked(),
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
            Some(Editing::Create) => match draft().to_create_request() {
                Ok(req) => spawn_action(
                    &save_session,
                    async move { api.create_subscription_pack(&req).await.map(|_| ()) },
                    move |outcome| saved(outcome, "Failed to create subscription pack"),
                ),
                Err(msg) => dialog_error.set(Some(msg.to_owned())),
            },
            Some(Editing::Edit(pack)) => match draft().to_update_request(&pack) {
                Ok(req) => spawn_action(
                    &save_session,
                    async move { api.update_subscription_pack(pack.id, &req).await.map(|_| ()) },
                    move |outcome| saved(outcome, "Failed to update subscription pack"),
                ),
                Err(msg) => dialog_error.set(Some(msg.to_owned())),
            },
        }
    });
    let on_cancel = Callback::new(move |()| editing.set(None));

    let on_delete = move |pack_id: i64| {
        action_error.set(None);
        let api = session.api().clone();
        spawn_action(&session, async move { api.delete_subscription_pack(pack_id).await }, move |outcome| {
            match outcome {
                Ok(_) => reload.update(|n| *n += 1),
                Err(e) => action_error.set(Some(e.user_message("Failed to delete subscription pack"))),
            }
        });
    };

    view! {
        <section class="page">
            <div class="page__header">
                <h1 class="page__title">"Subscription Packs"</h1>
                <button class="btn btn--primary" on:click=move |_| open(Editing::Create)>"Add Pack"</button>
            </div>
            {move || action_error.get().map(|message| view! { <p class="page__error">{message}</p> })}
            {move || match list.get() {
                Remote::Loading => view! { <LoadingIndicator/> }.into_any(),
                Remote::Failed(message) => view! { <p class="page__error">{message}</p> }.into_any(),
                Remote::Ready(resp) => pack_table(resp.packs, move |p| open(Editing::Edit(p)), on_delete.clone()),
            }}
            {move || {
                editing.get().map(|mode| {
                    let (title, submit) = match mode {
                        Editing::Create => ("Add Subscription Pack", "Create"),
                        Editing::Edit(_) => ("Edit Subscription Pack", "Save"),
                    };
                    view! {
                        <FormDialog title=title submit_label=submit error=dialog_error on_submit=on_save on_cancel=on_cancel>
                            <TextField label="Name" value=name/>
                            <TextField label="Description" value=description/>
                            <TextField label="SKU" value=sku/>
                            <TextField label="Price" value=price kind="number"/>
                            <TextField label="Validity (months)" value=validity kind="number"/>
                        </FormDialog>
                    }
                })
            }}
        </section>
    }
}

fn pack_table(
    packs: Vec<SubscriptionPack>,
    on_edit: impl Fn(SubscriptionPack) + Clone + 'static,
    on_delete: impl Fn(i64) + Clone + 'static,
) -> AnyView {
    if packs.is_empty() {
        return view! { <p class="page__empty">"No subscription packs yet."</p> }.into_any();
    }
    view! {
        <table class="table">
            <thead>
                <tr><th>"Name"</th><th>"SKU"</th><th>"Price"</th><th>"Validity"</th><th>"Description"</th><th></th></tr>
            </thead>
            <tbody>
                {packs
                    .into_iter()
                    .map(|pack| {
                        let on_edit = on_edit.clone();
                        let on_delete = on_delete.clone();
                        let id = pack.id;
                        let row = pack.clone();
                        view! {
                            <tr>
                                <td>{pack.name}</td>
                                <td><code>{pack.sku}</code></td>
                                <td>{format_price(pack.price)}</td>
                                <td>{format_validity(pack.validity_months)}</td>
                                <td>{pack.description}</td>
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
