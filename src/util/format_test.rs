use super::*;

#[test]
fn format_date_keeps_date_part() {
    assert_eq!(format_date(Some("2024-03-05T10:11:12Z")), "2024-03-05");
    assert_eq!(format_date(Some("2024-03-05 10:11:12")), "2024-03-05");
    assert_eq!(format_date(Some("2024-03-05")), "2024-03-05");
}

#[test]
fn format_date_missing_is_dash() {
    assert_eq!(format_date(None), "—");
    assert_eq!(format_date(Some("  ")), "—");
}

#[test]
fn format_price_groups_thousands() {
    assert_eq!(format_price(0.0), "$0.00");
    assert_eq!(format_price(99.5), "$99.50");
    assert_eq!(format_price(1234.0), "$1,234.00");
    assert_eq!(format_price(1_234_567.891), "$1,234,567.89");
}

#[test]
fn format_price_negative() {
    assert_eq!(format_price(-12.3), "-$12.30");
}

#[test]
fn status_classes_are_distinct() {
    let classes: std::collections::HashSet<_> = SubscriptionStatus::ALL.into_iter().map(status_class).collect();
    assert_eq!(classes.len(), SubscriptionStatus::ALL.len());
}

#[test]
fn validity_pluralizes() {
    assert_eq!(format_validity(1), "1 month");
    assert_eq!(format_validity(12), "12 months");
}
