//! Customer self-registration.

#[cfg(test)]
#[path = "signup_test.rs"]
mod signup_test;

use leptos::prelude::*;

use crate::net::types::SignupRequest;
use crate::state::notice::{Notice, use_notices};
use crate::state::session::{SessionError, use_session};
use crate::util::task::spawn;

pub(crate) fn validate_signup_input(
    name: &str,
    email: &str,
    password: &str,
    phone: &str,
) -> Result<SignupRequest, &'static str> {
    let (name, email, phone) = (name.trim(), email.trim(), phone.trim());
    if name.is_empty() || email.is_empty() || password.is_empty() || phone.is_empty() {
        return Err("All fields are required.");
    }
    Ok(SignupRequest {
        name: name.to_owned(),
        email: email.to_owned(),
        password: password.to_owned(),
        phone: phone.to_owned(),
    })
}

#[component]
pub fn SignupPage() -> impl IntoView {
    let session = use_session();
    let notices = use_notices();
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let req = match validate_signup_input(&name.get(), &email.get(), &password.get(), &phone.get()) {
            Ok(req) => req,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        info.set(String::new());
        notices.dismiss();
        let session = session.clone();
        spawn(async move {
            match session.signup(&req).await {
                Ok(()) => notices.show(Notice::success("Account created")),
                Err(SessionError::Superseded) => {}
                Err(e) => notices.show(Notice::error(e.user_message("Signup failed"))),
            }
        });
    };

    let field = move |label: &'static str, kind: &'static str, signal: RwSignal<String>| {
        view! {
            <input
                class="auth-input"
                type=kind
                placeholder=label
                prop:value=move || signal.get()
                on:input=move |ev| signal.set(event_target_value(&ev))
            />
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Create account"</h1>
                <form class="auth-form" on:submit=on_submit>
                    {field("Full name", "text", name)}
                    {field("you@example.com", "email", email)}
                    {field("Phone", "tel", phone)}
                    {field("Password", "password", password)}
                    <button class="btn btn--primary" type="submit">"Sign up"</button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="auth-card__error">{move || info.get()}</p>
                </Show>
                <p class="auth-card__footer">
                    "Already registered? " <a href="/login">"Sign in"</a>
                </p>
            </div>
        </div>
    }
}
