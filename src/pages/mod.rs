//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns its fetches (through `util::task`) and shows failures
//! inline; guards and the layout decide whether a page is reachable at all.

pub mod admin_dashboard;
pub mod customer_history;
pub mod customer_subscription;
pub mod customers;
pub mod errors;
pub mod login;
pub mod signup;
pub mod subscription_packs;
pub mod subscriptions;
