//! Authenticated shell: sidebar navigation, current user, logout.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered inside a `ProtectedRoute`, so a user is always present while the
//! layout is mounted. Logging out flips the session to anonymous and the
//! enclosing guard redirects to `/login`.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use leptos::prelude::*;
use leptos_router::components::Outlet;
use leptos_router::hooks::use_location;

use crate::net::types::Role;
use crate::state::notice::{Notice, use_notices};
use crate::state::session::{use_auth, use_session};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub href: &'static str,
}

const ADMIN_NAV: &[NavItem] = &[
    NavItem { label: "Dashboard", href: "/admin/dashboard" },
    NavItem { label: "Customers", href: "/admin/customers" },
    NavItem { label: "Subscription Packs", href: "/admin/subscription-packs" },
    NavItem { label: "Subscriptions", href: "/admin/subscriptions" },
];

const CUSTOMER_NAV: &[NavItem] = &[
    NavItem { label: "My Subscription", href: "/customer/subscription" },
    NavItem { label: "History", href: "/customer/history" },
];

pub fn nav_items(role: Role) -> &'static [NavItem] {
    match role {
        Role::Admin => ADMIN_NAV,
        Role::Customer => CUSTOMER_NAV,
    }
}

/// Exact match or a nested route under `href`.
pub fn is_active(pathname: &str, href: &str) -> bool {
    pathname == href || pathname.strip_prefix(href).is_some_and(|rest| rest.starts_with('/'))
}

#[component]
pub fn Layout() -> impl IntoView {
    let auth = use_auth();
    let session = use_session();
    let notices = use_notices();
    let location = use_location();

    let role = move || auth.with(|a| a.role());
    let user_name = move || auth.with(|a| a.user.as_ref().map(|u| u.display_name().to_owned()).unwrap_or_default());
    let role_label = move || role().map(Role::as_str).unwrap_or_default();

    let on_logout = move |_: leptos::ev::MouseEvent| {
        session.logout();
        notices.show(Notice::success("Logged out"));
    };

    view! {
        <div class="layout">
            <aside class="sidebar">
                <div class="sidebar__title">"License Manager"</div>
                <nav class="sidebar__nav">
                    {move || {
                        let pathname = location.pathname.get();
                        role()
                            .map(nav_items)
                            .unwrap_or_default()
                            .iter()
                            .map(|item| {
                                let class = if is_active(&pathname, item.href) {
                                    "sidebar__link sidebar__link--active"
                                } else {
                                    "sidebar__link"
                                };
                                view! { <a class=class href=item.href>{item.label}</a> }
                            })
                            .collect_view()
                    }}
                </nav>
            </aside>
            <div class="layout__main">
                <header class="layout__header">
                    <span class="layout__user">{user_name}</span>
                    <span class="layout__role">{role_label}</span>
                    <button class="btn btn--secondary" on:click=on_logout>"Logout"</button>
                </header>
                <main class="layout__content">
                    <Outlet/>
                </main>
            </div>
        </div>
    }
}
