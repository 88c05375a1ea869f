//! Wire DTOs for the license-management REST backend.
//!
//! DESIGN
//! ======
//! Field names mirror the backend's snake_case JSON so serde needs no rename
//! attributes beyond the lowercase enums. Every response carries the
//! `success` envelope flag; error bodies add a `message`.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Principal role. Fixed for the lifetime of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Customer,
}

impl Role {
    /// Landing route for an authenticated user of this role.
    pub fn home_path(self) -> &'static str {
        match self {
            Self::Admin => "/admin/dashboard",
            Self::Customer => "/customer/subscription",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Customer => "customer",
        }
    }
}

/// The authenticated principal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub role: Role,
    /// Present only for customers.
    pub name: Option<String>,
    /// Present only for customers.
    pub phone: Option<String>,
}

impl User {
    pub fn admin(email: impl Into<String>) -> Self {
        Self { email: email.into(), role: Role::Admin, name: None, phone: None }
    }

    pub fn customer(email: impl Into<String>, name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            role: Role::Customer,
            name: Some(name.into()),
            phone: Some(phone.into()),
        }
    }

    /// Name shown in the layout header; falls back to the email.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().filter(|n| !n.is_empty()).unwrap_or(self.email.as_str())
    }
}

// =============================================================
// Envelopes
// =============================================================

/// Minimal `{success, message?}` envelope, used to pull the error message
/// out of non-2xx bodies.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
}

// =============================================================
// Authentication
// =============================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AdminLoginResponse {
    pub success: bool,
    pub token: String,
    pub email: String,
    pub expires_in: u64,
}

/// Shared by `/api/customer/login` and `/api/customer/signup`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CustomerAuthResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub token: String,
    pub email: String,
    pub name: String,
    pub phone: String,
    pub expires_in: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
}

// =============================================================
// Admin dashboard
// =============================================================

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RecentActivity {
    #[serde(rename = "type")]
    pub kind: String,
    pub customer: String,
    pub pack: String,
    pub timestamp: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DashboardData {
    pub total_customers: u64,
    pub active_subscriptions: u64,
    pub pending_requests: u64,
    pub total_revenue: f64,
    #[serde(default)]
    pub recent_activities: Vec<RecentActivity>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DashboardResponse {
    pub success: bool,
    pub data: DashboardData,
}

// =============================================================
// Customers
// =============================================================

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CustomerCreateRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CustomerUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CustomersResponse {
    pub success: bool,
    pub customers: Vec<Customer>,
    pub pagination: Pagination,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CustomerResponse {
    pub success: bool,
    pub customer: Customer,
}

// =============================================================
// Subscription packs
// =============================================================

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SubscriptionPack {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub sku: String,
    pub price: f64,
    pub validity_months: u32,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SubscriptionPackCreateRequest {
    pub name: String,
    pub description: String,
    pub sku: String,
    pub price: f64,
    pub validity_months: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SubscriptionPackUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity_months: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SubscriptionPacksResponse {
    pub success: bool,
    pub packs: Vec<SubscriptionPack>,
    pub pagination: Pagination,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SubscriptionPackResponse {
    pub success: bool,
    pub pack: SubscriptionPack,
}

// =============================================================
// Subscriptions
// =============================================================

/// Server-authoritative lifecycle: `requested → approved → active → inactive|expired`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Requested,
    Approved,
    Active,
    Inactive,
    Expired,
}

impl SubscriptionStatus {
    pub const ALL: [Self; 5] = [Self::Requested, Self::Approved, Self::Active, Self::Inactive, Self::Expired];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Requested => "requested",
            Self::Approved => "approved",
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Expired => "expired",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == raw)
    }

    /// Only requested subscriptions can be approved by an admin.
    pub fn can_approve(self) -> bool {
        self == Self::Requested
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Subscription {
    pub id: i64,
    pub customer_id: i64,
    pub pack_id: i64,
    pub status: SubscriptionStatus,
    pub pack_name: String,
    pub pack_sku: String,
    pub price: f64,
    pub validity_months: u32,
    pub requested_at: Option<String>,
    pub approved_at: Option<String>,
    pub assigned_at: Option<String>,
    pub expires_at: Option<String>,
    pub deactivated_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SubscriptionsResponse {
    pub success: bool,
    pub subscriptions: Vec<Subscription>,
    pub pagination: Pagination,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct AssignSubscriptionRequest {
    pub pack_id: i64,
}

// =============================================================
// Customer self-service
// =============================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SubscriptionRequest {
    pub sku: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CreatedSubscription {
    pub id: i64,
    pub status: String,
    pub requested_at: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SubscriptionCreateResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub subscription: CreatedSubscription,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PackSummary {
    pub name: String,
    pub sku: String,
    pub price: f64,
    pub validity_months: u32,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CurrentSubscription {
    pub id: i64,
    pub pack: PackSummary,
    pub status: SubscriptionStatus,
    pub assigned_at: Option<String>,
    pub expires_at: Option<String>,
    pub is_valid: bool,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CustomerSubscriptionResponse {
    pub success: bool,
    pub subscription: CurrentSubscription,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DeactivateResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub deactivated_at: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SubscriptionHistoryItem {
    pub id: i64,
    pub pack_name: String,
    pub status: SubscriptionStatus,
    pub assigned_at: Option<String>,
    pub expires_at: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SubscriptionHistoryResponse {
    pub success: bool,
    pub history: Vec<SubscriptionHistoryItem>,
    pub pagination: Pagination,
}

/// History ordering by assignment date.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}
