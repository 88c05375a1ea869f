//! Root application component: platform wiring, context providers, routes.
//!
//! SYSTEM CONTEXT
//! ==============
//! `build_session` is the single place that picks concrete storage, transport
//! and navigation. In the browser (`csr`) those are `localStorage`,
//! `gloo-net` and `location.href`; native builds get in-memory and offline
//! stand-ins so the component tree can be constructed in tests.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::components::{ParentRoute, Redirect, Route, Router, Routes};
use leptos_router::{StaticSegment, WildcardSegment};

use crate::components::layout::Layout;
use crate::components::notice_bar::NoticeBar;
use crate::components::route_guard::{ProtectedRoute, PublicRoute, replace_history};
use crate::components::session_provider::SessionProvider;
use crate::config::ConsoleConfig;
use crate::net::api::ApiService;
use crate::net::client::HttpClient;
use crate::net::signal::UnauthorizedSignal;
use crate::net::transport::Transport;
use crate::net::types::Role;
use crate::pages::admin_dashboard::AdminDashboardPage;
use crate::pages::customer_history::CustomerHistoryPage;
use crate::pages::customer_subscription::CustomerSubscriptionPage;
use crate::pages::customers::CustomersPage;
use crate::pages::errors::{NotFoundPage, UnauthorizedPage};
use crate::pages::login::LoginPage;
use crate::pages::signup::SignupPage;
use crate::pages::subscription_packs::SubscriptionPacksPage;
use crate::pages::subscriptions::SubscriptionsPage;
use crate::state::credentials::{CredentialStore, KeyValueStorage};
use crate::state::notice::provide_notices;
use crate::state::session::{LOGIN_PATH, Session};
use crate::util::navigate::Navigator;

type Platform = (Arc<dyn KeyValueStorage>, Arc<dyn Transport>, Arc<dyn Navigator>);

#[cfg(feature = "csr")]
fn platform() -> Platform {
    use crate::net::transport::GlooTransport;
    use crate::state::credentials::LocalStorage;
    use crate::util::navigate::BrowserNavigator;

    (Arc::new(LocalStorage), Arc::new(GlooTransport), Arc::new(BrowserNavigator))
}

#[cfg(not(feature = "csr"))]
fn platform() -> Platform {
    use crate::net::transport::OfflineTransport;
    use crate::state::credentials::MemoryStorage;
    use crate::util::navigate::LogNavigator;

    (Arc::new(MemoryStorage::new()), Arc::new(OfflineTransport), Arc::new(LogNavigator))
}

/// Wire the credential store, HTTP client and session for this platform.
///
/// The store is shared between the client (token reads) and the session
/// (the only writer).
pub fn build_session(config: &ConsoleConfig) -> Session {
    let (storage, transport, navigator) = platform();
    let store = CredentialStore::new(storage);
    let client = HttpClient::new(config, transport, store.clone(), UnauthorizedSignal::new());
    log::info!("api base url {}", client.base_url());
    Session::new(ApiService::new(client), store, navigator)
}

#[component]
fn AdminArea() -> impl IntoView {
    view! {
        <ProtectedRoute required_role=Role::Admin>
            <Layout/>
        </ProtectedRoute>
    }
}

#[component]
fn CustomerArea() -> impl IntoView {
    view! {
        <ProtectedRoute required_role=Role::Customer>
            <Layout/>
        </ProtectedRoute>
    }
}

fn redirect_to(path: &'static str) -> impl IntoView {
    view! { <Redirect path=path options=replace_history()/> }
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_notices();
    let session = build_session(&ConsoleConfig::from_build_env());

    view! {
        <Title text="License Manager"/>
        <SessionProvider session=session>
            <NoticeBar/>
            <Router>
                <Routes fallback=|| view! { <NotFoundPage/> }>
                    <Route
                        path=StaticSegment("login")
                        view=|| view! { <PublicRoute><LoginPage/></PublicRoute> }
                    />
                    <Route
                        path=StaticSegment("signup")
                        view=|| view! { <PublicRoute><SignupPage/></PublicRoute> }
                    />
                    <ParentRoute path=StaticSegment("admin") view=AdminArea>
                        <Route path=StaticSegment("dashboard") view=AdminDashboardPage/>
                        <Route path=StaticSegment("customers") view=CustomersPage/>
                        <Route path=StaticSegment("subscription-packs") view=SubscriptionPacksPage/>
                        <Route path=StaticSegment("subscriptions") view=SubscriptionsPage/>
                        <Route path=WildcardSegment("rest") view=|| redirect_to(Role::Admin.home_path())/>
                    </ParentRoute>
                    <ParentRoute path=StaticSegment("customer") view=CustomerArea>
                        <Route path=StaticSegment("subscription") view=CustomerSubscriptionPage/>
                        <Route path=StaticSegment("history") view=CustomerHistoryPage/>
                        <Route path=WildcardSegment("rest") view=|| redirect_to(Role::Customer.home_path())/>
                    </ParentRoute>
                    <Route path=StaticSegment("unauthorized") view=UnauthorizedPage/>
                    <Route path=StaticSegment("") view=|| redirect_to(LOGIN_PATH)/>
                </Routes>
            </Router>
        </SessionProvider>
    }
}
