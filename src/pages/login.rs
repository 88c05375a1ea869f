//! Login page with an admin/customer role selector.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted under `PublicRoute`. While the request is in flight the gate shows
//! the loading screen, and on success it redirects to the role's home, so
//! this page only reports failures (through the root notice board, since the
//! form is remounted afterwards).

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;

use crate::net::types::Role;
use crate::state::notice::{Notice, use_notices};
use crate::state::session::{SessionError, use_session};
use crate::util::task::spawn;

pub(crate) fn validate_login_input(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Enter both email and password.");
    }
    Ok((email.to_owned(), password.to_owned()))
}

pub(crate) fn parse_role(raw: &str) -> Role {
    if raw == Role::Admin.as_str() { Role::Admin } else { Role::Customer }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let notices = use_notices();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let role = RwSignal::new(Role::Customer);
    let info = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let (email_value, password_value) = match validate_login_input(&email.get(), &password.get()) {
            Ok(input) => input,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        info.set(String::new());
        notices.dismiss();
        let session = session.clone();
        let selected = role.get();
        spawn(async move {
            match session.login(&email_value, &password_value, selected).await {
                Ok(()) | Err(SessionError::Superseded) => {}
                Err(e) => notices.show(Notice::error(e.user_message("Login failed"))),
            }
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"License Manager"</h1>
                <p class="auth-card__subtitle">"Sign in to your account"</p>
                <form class="auth-form" on:submit=on_submit>
                    <label class="auth-label">
                        "Sign in as"
                        <select
                            class="auth-input"
                            prop:value=move || role.get().as_str()
                            on:change=move |ev| role.set(parse_role(&event_target_value(&ev)))
                        >
                            <option value="customer">"Customer"</option>
                            <option value="admin">"Admin"</option>
                        </select>
                    </label>
                    <input
                        class="auth-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="btn btn--primary" type="submit">"Sign in"</button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="auth-card__error">{move || info.get()}</p>
                </Show>
                <Show when=move || role.get() == Role::Customer>
                    <p class="auth-card__footer">
                        "No account yet? " <a href="/signup">"Sign up"</a>
                    </p>
                </Show>
            </div>
        </div>
    }
}
