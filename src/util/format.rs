//! Display formatting for table cells.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use crate::net::types::SubscriptionStatus;

/// Date portion of an ISO-8601 timestamp; a placeholder dash when absent.
pub fn format_date(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(ts) if !ts.is_empty() => ts.split(['T', ' ']).next().unwrap_or(ts).to_owned(),
        _ => "—".to_owned(),
    }
}

/// `$1,234.50` style currency with thousands separators.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_price(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{:02}", cents % 100)
}

/// CSS modifier for a status badge.
pub fn status_class(status: SubscriptionStatus) -> &'static str {
    match status {
        SubscriptionStatus::Requested => "badge badge--warning",
        SubscriptionStatus::Approved => "badge badge--info",
        SubscriptionStatus::Active => "badge badge--success",
        SubscriptionStatus::Inactive => "badge badge--muted",
        SubscriptionStatus::Expired => "badge badge--danger",
    }
}

/// `1 month` / `12 months`.
pub fn format_validity(months: u32) -> String {
    if months == 1 { "1 month".to_owned() } else { format!("{months} months") }
}
