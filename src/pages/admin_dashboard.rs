//! Admin landing page: headline counters and recent activity.

use leptos::prelude::*;

use crate::components::loading::LoadingIndicator;
use crate::net::types::DashboardData;
use crate::state::remote::Remote;
use crate::state::session::use_session;
use crate::util::format::{format_date, format_price};
use crate::util::task::spawn_fetch;

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    let session = use_session();
    let data = RwSignal::new(Remote::<DashboardData>::Loading);

    let api = session.api().clone();
    spawn_fetch(&session, data, "Failed to fetch dashboard data", async move {
        api.dashboard().await.map(|resp| resp.data)
    });

    view! {
        <section class="page">
            <h1 class="page__title">"Dashboard"</h1>
            {move || match data.get() {
                Remote::Loading => view! { <LoadingIndicator/> }.into_any(),
                Remote::Failed(message) => view! { <p class="page__error">{message}</p> }.into_any(),
                Remote::Ready(stats) => dashboard_body(stats).into_any(),
            }}
        </section>
    }
}

fn dashboard_body(stats: DashboardData) -> impl IntoView {
    let cards = [
        ("Total Customers", stats.total_customers.to_string()),
        ("Active Subscriptions", stats.active_subscriptions.to_string()),
        ("Pending Requests", stats.pending_requests.to_string()),
        ("Total Revenue", format_price(stats.total_revenue)),
    ];
    let activity = stats.recent_activities;
    view! {
        <div class="stats">
            {cards
                .into_iter()
                .map(|(label, value)| {
                    view! {
                        <div class="stat-card">
                            <span class="stat-card__label">{label}</span>
                            <span class="stat-card__value">{value}</span>
                        </div>
                    }
                })
                .collect_view()}
        </div>
        <h2 class="page__subtitle">"Recent Activity"</h2>
        {if activity.is_empty() {
            view! { <p class="page__empty">"No recent activity."</p> }.into_any()
        } else {
            view! {
                <table class="table">
                    <thead>
                        <tr><th>"Type"</th><th>"Customer"</th><th>"Pack"</th><th>"Date"</th></tr>
                    </thead>
                    <tbody>
                        {activity
                            .into_iter()
                            .map(|item| {
                                view! {
                                    <tr>
                                        <td>{item.kind}</td>
                                        <td>{item.customer}</td>
                                        <td>{item.pack}</td>
                                        <td>{format_date(Some(&item.timestamp))}</td>
                                    </tr>
                                }
                            })
                            .collect_view()}
                    </tbody>
                </table>
            }
            .into_any()
        }}
    }
}
