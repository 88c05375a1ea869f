//! Modal form used by the admin create/edit/assign flows.

use leptos::prelude::*;

/// Backdrop + form. Submitting runs `on_submit`; clicking the backdrop or
/// Cancel runs `on_cancel`. `error` is shown under the fields.
#[component]
pub fn FormDialog(
    title: &'static str,
    submit_label: &'static str,
    error: RwSignal<Option<String>>,
    on_submit: Callback<()>,
    on_cancel: Callback<()>,
    children: Children,
) -> impl IntoView {
    let on_form_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        on_submit.run(());
    };

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
            <form class="dialog" on:click=move |ev| ev.stop_propagation() on:submit=on_form_submit>
                <h2 class="dialog__title">{title}</h2>
                <div class="dialog__fields">{children()}</div>
                {move || error.get().map(|message| view! { <p class="dialog__error">{message}</p> })}
                <div class="dialog__actions">
                    <button class="btn btn--secondary" type="button" on:click=move |_| on_cancel.run(())>
                        "Cancel"
                    </button>
                    <button class="btn btn--primary" type="submit">{submit_label}</button>
                </div>
            </form>
        </div>
    }
}

/// Labelled input bound to a string signal.
#[component]
pub fn TextField(
    label: &'static str,
    value: RwSignal<String>,
    #[prop(default = "text")] kind: &'static str,
    #[prop(optional)] readonly: bool,
) -> impl IntoView {
    view! {
        <label class="dialog__label">
            {label}
            <input
                class="dialog__input"
                type=kind
                readonly=readonly
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </label>
    }
}
