use futures::executor::block_on;

use super::*;
use crate::net::transport::HttpMethod;
use crate::testing::Harness;

// =============================================================
// Query strings
// =============================================================

#[test]
fn customers_path_includes_search_when_present() {
    assert_eq!(
        customers_path(PageRequest::new(1, 10), Some("ann")).unwrap(),
        "/api/v1/admin/customers?page=1&limit=10&search=ann"
    );
}

#[test]
fn customers_path_omits_empty_search() {
    let expected = "/api/v1/admin/customers?page=1&limit=10";
    assert_eq!(customers_path(PageRequest::default(), None).unwrap(), expected);
    assert_eq!(customers_path(PageRequest::default(), Some("")).unwrap(), expected);
    assert_eq!(customers_path(PageRequest::default(), Some("   ")).unwrap(), expected);
}

#[test]
fn customers_path_sends_search_term_untrimmed() {
    assert_eq!(
        customers_path(PageRequest::default(), Some(" ann ")).unwrap(),
        "/api/v1/admin/customers?page=1&limit=10&search=+ann+"
    );
}

#[test]
fn customers_path_escapes_search_term() {
    assert_eq!(
        customers_path(PageRequest::new(2, 25), Some("ann & bob")).unwrap(),
        "/api/v1/admin/customers?page=2&limit=25&search=ann+%26+bob"
    );
}

#[test]
fn subscriptions_path_filters_by_status() {
    assert_eq!(
        subscriptions_path(PageRequest::default(), Some(SubscriptionStatus::Requested)).unwrap(),
        "/api/v1/admin/subscriptions?page=1&limit=10&status=requested"
    );
    assert_eq!(
        subscriptions_path(PageRequest::default(), None).unwrap(),
        "/api/v1/admin/subscriptions?page=1&limit=10"
    );
}

#[test]
fn history_path_always_sends_sort() {
    assert_eq!(
        history_path(PageRequest::default(), SortOrder::default()).unwrap(),
        "/api/v1/customer/subscription-history?page=1&limit=10&sort=desc"
    );
    assert_eq!(
        history_path(PageRequest::new(3, 5), SortOrder::Asc).unwrap(),
        "/api/v1/customer/subscription-history?page=3&limit=5&sort=asc"
    );
}

#[test]
fn packs_path_has_only_pagination() {
    assert_eq!(
        packs_path(PageRequest::default()).unwrap(),
        "/api/v1/admin/subscription-packs?page=1&limit=10"
    );
}

// =============================================================
// Facade calls against the mock backend
// =============================================================

#[test]
fn customers_call_sends_exact_query_string() {
    let h = Harness::new();
    h.transport.respond(
        HttpMethod::Get,
        "/api/v1/admin/customers",
        200,
        serde_json::json!({
            "success": true,
            "customers": [{
                "id": 7, "name": "Ann", "email": "a@b.com", "phone": "555",
                "created_at": "2024-01-01T00:00:00Z", "updated_at": "2024-01-01T00:00:00Z"
            }],
            "pagination": { "page": 1, "limit": 10, "total": 1 }
        }),
    );

    let resp = block_on(h.api.customers(PageRequest::new(1, 10), Some("ann"))).unwrap();

    assert_eq!(resp.customers.len(), 1);
    assert_eq!(resp.pagination.total, 1);
    assert_eq!(
        h.transport.last_request().url,
        "http://api.test/api/v1/admin/customers?page=1&limit=10&search=ann"
    );
}

#[test]
fn approve_posts_without_body() {
    let h = Harness::new();
    h.transport.respond(
        HttpMethod::Post,
        "/api/v1/admin/subscriptions/42/approve",
        200,
        serde_json::json!({ "success": true, "message": "approved" }),
    );

    let resp = block_on(h.api.approve_subscription(42)).unwrap();

    assert_eq!(resp.message, "approved");
    assert_eq!(h.transport.last_request().body, None);
}

#[test]
fn assign_subscription_sends_pack_id() {
    let h = Harness::new();
    h.transport.respond(
        HttpMethod::Post,
        "/api/v1/admin/customers/3/assign-subscription",
        200,
        serde_json::json!({ "success": true, "message": "assigned" }),
    );

    block_on(h.api.assign_subscription(3, 9)).unwrap();

    assert_eq!(h.transport.last_request().body.as_deref(), Some(r#"{"pack_id":9}"#));
}

#[test]
fn unassign_subscription_uses_delete() {
    let h = Harness::new();
    h.transport.respond(
        HttpMethod::Delete,
        "/api/v1/admin/customers/3/subscription/11",
        200,
        serde_json::json!({ "success": true, "message": "removed" }),
    );

    block_on(h.api.unassign_subscription(3, 11)).unwrap();

    assert_eq!(h.transport.last_request().method, HttpMethod::Delete);
}

#[test]
fn update_customer_sends_only_changed_fields() {
    let h = Harness::new();
    h.transport.respond(
        HttpMethod::Put,
        "/api/v1/admin/customers/5",
        200,
        serde_json::json!({
            "success": true,
            "customer": {
                "id": 5, "name": "Ann", "email": "a@b.com", "phone": "777",
                "created_at": "2024-01-01", "updated_at": "2024-02-01"
            }
        }),
    );

    let req = CustomerUpdateRequest { phone: Some("777".to_owned()), ..Default::default() };
    let resp = block_on(h.api.update_customer(5, &req)).unwrap();

    assert_eq!(resp.customer.phone, "777");
    assert_eq!(h.transport.last_request().body.as_deref(), Some(r#"{"phone":"777"}"#));
}

#[test]
fn customer_subscription_decodes_nested_pack() {
    let h = Harness::new();
    h.transport.respond(
        HttpMethod::Get,
        "/api/v1/customer/subscription",
        200,
        serde_json::json!({
            "success": true,
            "subscription": {
                "id": 1,
                "pack": { "name": "Pro", "sku": "PRO-12", "price": 99.0, "validity_months": 12 },
                "status": "active",
                "assigned_at": "2024-01-01",
                "expires_at": "2025-01-01",
                "is_valid": true
            }
        }),
    );

    let resp = block_on(h.api.customer_subscription()).unwrap();

    assert_eq!(resp.subscription.pack.sku, "PRO-12");
    assert_eq!(resp.subscription.status, SubscriptionStatus::Active);
    assert!(resp.subscription.is_valid);
}

#[test]
fn request_subscription_posts_sku() {
    let h = Harness::new();
    h.transport.respond(
        HttpMethod::Post,
        "/api/v1/customer/subscription",
        201,
        serde_json::json!({
            "success": true,
            "message": "requested",
            "subscription": { "id": 12, "status": "requested", "requested_at": "2024-03-01" }
        }),
    );

    let resp = block_on(h.api.request_subscription("PRO-12")).unwrap();

    assert_eq!(resp.subscription.id, 12);
    assert_eq!(h.transport.last_request().body.as_deref(), Some(r#"{"sku":"PRO-12"}"#));
}

fn customer_json(id: i64, phone: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id, "name": "Ann", "email": "a@b.com", "phone": phone,
        "created_at": "2024-01-01", "updated_at": "2024-01-01"
    })
}

fn pack_json(price: f64) -> serde_json::Value {
    serde_json::json!({
        "id": 4, "name": "Pro", "description": "Pro tier", "sku": "PRO-12",
        "price": price, "validity_months": 12,
        "created_at": "2024-01-01", "updated_at": "2024-01-01"
    })
}

#[test]
fn customer_fetches_by_id() {
    let h = Harness::new();
    h.transport.respond(
        HttpMethod::Get,
        "/api/v1/admin/customers/5",
        200,
        serde_json::json!({ "success": true, "customer": customer_json(5, "555") }),
    );

    let resp = block_on(h.api.customer(5)).unwrap();

    assert_eq!(resp.customer.id, 5);
    assert_eq!(h.transport.last_request().method, HttpMethod::Get);
}

#[test]
fn create_customer_posts_all_fields() {
    let h = Harness::new();
    h.transport.respond(
        HttpMethod::Post,
        "/api/v1/admin/customers",
        201,
        serde_json::json!({ "success": true, "customer": customer_json(6, "555") }),
    );

    let req = CustomerCreateRequest { name: "Ann".to_owned(), email: "a@b.com".to_owned(), phone: "555".to_owned() };
    let resp = block_on(h.api.create_customer(&req)).unwrap();

    assert_eq!(resp.customer.id, 6);
    assert_eq!(
        h.transport.last_request().body.as_deref(),
        Some(r#"{"name":"Ann","email":"a@b.com","phone":"555"}"#)
    );
}

#[test]
fn create_customer_surfaces_conflict_message() {
    let h = Harness::new();
    h.transport.respond(
        HttpMethod::Post,
        "/api/v1/admin/customers",
        409,
        serde_json::json!({ "success": false, "message": "Email already exists" }),
    );

    let req = CustomerCreateRequest { name: "Ann".to_owned(), email: "a@b.com".to_owned(), phone: "555".to_owned() };
    let err = block_on(h.api.create_customer(&req)).unwrap_err();

    assert_eq!(err.user_message("Failed to create customer"), "Email already exists");
}

#[test]
fn create_subscription_pack_posts_body() {
    let h = Harness::new();
    h.transport.respond(
        HttpMethod::Post,
        "/api/v1/admin/subscription-packs",
        201,
        serde_json::json!({ "success": true, "pack": pack_json(99.5) }),
    );

    let req = SubscriptionPackCreateRequest {
        name: "Pro".to_owned(),
        description: "Pro tier".to_owned(),
        sku: "PRO-12".to_owned(),
        price: 99.5,
        validity_months: 12,
    };
    let resp = block_on(h.api.create_subscription_pack(&req)).unwrap();

    assert_eq!(resp.pack.sku, "PRO-12");
    assert_eq!(
        h.transport.last_request().body.as_deref(),
        Some(r#"{"name":"Pro","description":"Pro tier","sku":"PRO-12","price":99.5,"validity_months":12}"#)
    );
}

#[test]
fn update_subscription_pack_puts_changed_fields() {
    let h = Harness::new();
    h.transport.respond(
        HttpMethod::Put,
        "/api/v1/admin/subscription-packs/4",
        200,
        serde_json::json!({ "success": true, "pack": pack_json(120.0) }),
    );

    let req = SubscriptionPackUpdateRequest { price: Some(120.0), ..Default::default() };
    let resp = block_on(h.api.update_subscription_pack(4, &req)).unwrap();

    assert!((resp.pack.price - 120.0).abs() < f64::EPSILON);
    let sent = h.transport.last_request();
    assert_eq!(sent.method, HttpMethod::Put);
    assert_eq!(sent.body.as_deref(), Some(r#"{"price":120.0}"#));
}
