use super::*;

#[test]
fn admin_nav_lists_admin_routes() {
    let hrefs: Vec<_> = nav_items(Role::Admin).iter().map(|i| i.href).collect();
    assert_eq!(
        hrefs,
        ["/admin/dashboard", "/admin/customers", "/admin/subscription-packs", "/admin/subscriptions"]
    );
}

#[test]
fn customer_nav_lists_customer_routes() {
    let labels: Vec<_> = nav_items(Role::Customer).iter().map(|i| i.label).collect();
    assert_eq!(labels, ["My Subscription", "History"]);
}

#[test]
fn nav_starts_at_role_home() {
    for role in [Role::Admin, Role::Customer] {
        assert_eq!(nav_items(role)[0].href, role.home_path());
    }
}

#[test]
fn active_matches_exact_and_nested_paths() {
    assert!(is_active("/admin/customers", "/admin/customers"));
    assert!(is_active("/admin/customers/7", "/admin/customers"));
    assert!(!is_active("/admin/customers-archive", "/admin/customers"));
    assert!(!is_active("/admin/dashboard", "/admin/customers"));
}
