//! Typed REST facade over `HttpClient`.
//!
//! Each method builds the path (and query string where the endpoint is
//! paginated or filterable), picks the verb, and decodes the endpoint's
//! response type. There is no business logic here.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Serialize;

use super::client::HttpClient;
use super::error::ApiError;
use super::types::{
    AdminLoginResponse, AssignSubscriptionRequest, CustomerAuthResponse, CustomerCreateRequest, CustomerResponse,
    CustomerSubscriptionResponse, CustomerUpdateRequest, CustomersResponse, DashboardResponse, DeactivateResponse,
    LoginRequest, SignupRequest, SortOrder, SubscriptionCreateResponse, SubscriptionHistoryResponse,
    SubscriptionPackCreateRequest, SubscriptionPackResponse, SubscriptionPackUpdateRequest, SubscriptionPacksResponse,
    SubscriptionRequest, SubscriptionStatus, SubscriptionsResponse, SuccessResponse,
};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

/// Page window for list endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: DEFAULT_PAGE, limit: DEFAULT_LIMIT }
    }
}

impl PageRequest {
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }
}

#[derive(Debug, Serialize)]
struct ListQuery<'a> {
    page: u32,
    limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort: Option<SortOrder>,
}

impl ListQuery<'_> {
    fn page(window: PageRequest) -> Self {
        Self { page: window.page, limit: window.limit, search: None, status: None, sort: None }
    }
}

fn with_query(path: &str, query: &ListQuery<'_>) -> Result<String, ApiError> {
    let qs = serde_urlencoded::to_string(query).map_err(|e| ApiError::Encode(e.to_string()))?;
    Ok(format!("{path}?{qs}"))
}

/// Blank search terms are dropped rather than sent as `search=`; anything
/// else goes out as typed.
fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.filter(|s| !s.trim().is_empty())
}

fn customers_path(window: PageRequest, search: Option<&str>) -> Result<String, ApiError> {
    let query = ListQuery { search: non_blank(search), ..ListQuery::page(window) };
    with_query("/api/v1/admin/customers", &query)
}

fn packs_path(window: PageRequest) -> Result<String, ApiError> {
    with_query("/api/v1/admin/subscription-packs", &ListQuery::page(window))
}

fn subscriptions_path(window: PageRequest, status: Option<SubscriptionStatus>) -> Result<String, ApiError> {
    let query = ListQuery { status: status.map(SubscriptionStatus::as_str), ..ListQuery::page(window) };
    with_query("/api/v1/admin/subscriptions", &query)
}

fn history_path(window: PageRequest, sort: SortOrder) -> Result<String, ApiError> {
    let query = ListQuery { sort: Some(sort), ..ListQuery::page(window) };
    with_query("/api/v1/customer/subscription-history", &query)
}

#[derive(Clone, Debug)]
pub struct ApiService {
    client: HttpClient,
}

impl ApiService {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    // =============================================================
    // Authentication
    // =============================================================

    pub async fn admin_login(&self, req: &LoginRequest) -> Result<AdminLoginResponse, ApiError> {
        self.client.post("/api/admin/login", req).await
    }

    pub async fn customer_login(&self, req: &LoginRequest) -> Result<CustomerAuthResponse, ApiError> {
        self.client.post("/api/customer/login", req).await
    }

    pub async fn customer_signup(&self, req: &SignupRequest) -> Result<CustomerAuthResponse, ApiError> {
        self.client.post("/api/customer/signup", req).await
    }

    // =============================================================
    // Admin
    // =============================================================

    pub async fn dashboard(&self) -> Result<DashboardResponse, ApiError> {
        self.client.get("/api/v1/admin/dashboard").await
    }

    pub async fn customers(&self, window: PageRequest, search: Option<&str>) -> Result<CustomersResponse, ApiError> {
        self.client.get(&customers_path(window, search)?).await
    }

    pub async fn customer(&self, customer_id: i64) -> Result<CustomerResponse, ApiError> {
        self.client.get(&format!("/api/v1/admin/customers/{customer_id}")).await
    }

    pub async fn create_customer(&self, req: &CustomerCreateRequest) -> Result<CustomerResponse, ApiError> {
        self.client.post("/api/v1/admin/customers", req).await
    }

    pub async fn update_customer(
        &self,
        customer_id: i64,
        req: &CustomerUpdateRequest,
    ) -> Result<CustomerResponse, ApiError> {
        self.client.put(&format!("/api/v1/admin/customers/{customer_id}"), req).await
    }

    pub async fn delete_customer(&self, customer_id: i64) -> Result<SuccessResponse, ApiError> {
        self.client.delete(&format!("/api/v1/admin/customers/{customer_id}")).await
    }

    pub async fn subscription_packs(&self, window: PageRequest) -> Result<SubscriptionPacksResponse, ApiError> {
        self.client.get(&packs_path(window)?).await
    }

    pub async fn create_subscription_pack(
        &self,
        req: &SubscriptionPackCreateRequest,
    ) -> Result<SubscriptionPackResponse, ApiError> {
        self.client.post("/api/v1/admin/subscription-packs", req).await
    }

    pub async fn update_subscription_pack(
        &self,
        pack_id: i64,
        req: &SubscriptionPackUpdateRequest,
    ) -> Result<SubscriptionPackResponse, ApiError> {
        self.client.put(&format!("/api/v1/admin/subscription-packs/{pack_id}"), req).await
    }

    pub async fn delete_subscription_pack(&self, pack_id: i64) -> Result<SuccessResponse, ApiError> {
        self.client.delete(&format!("/api/v1/admin/subscription-packs/{pack_id}")).await
    }

    pub async fn subscriptions(
        &self,
        window: PageRequest,
        status: Option<SubscriptionStatus>,
    ) -> Result<SubscriptionsResponse, ApiError> {
        self.client.get(&subscriptions_path(window, status)?).await
    }

    pub async fn approve_subscription(&self, subscription_id: i64) -> Result<SuccessResponse, ApiError> {
        self.client
            .post_empty(&format!("/api/v1/admin/subscriptions/{subscription_id}/approve"))
            .await
    }

    pub async fn assign_subscription(&self, customer_id: i64, pack_id: i64) -> Result<SuccessResponse, ApiError> {
        self.client
            .post(
                &format!("/api/v1/admin/customers/{customer_id}/assign-subscription"),
                &AssignSubscriptionRequest { pack_id },
            )
            .await
    }

    pub async fn unassign_subscription(
        &self,
        customer_id: i64,
        subscription_id: i64,
    ) -> Result<SuccessResponse, ApiError> {
        self.client
            .delete(&format!("/api/v1/admin/customers/{customer_id}/subscription/{subscription_id}"))
            .await
    }

    // =============================================================
    // Customer self-service
    // =============================================================

    pub async fn customer_subscription(&self) -> Result<CustomerSubscriptionResponse, ApiError> {
        self.client.get("/api/v1/customer/subscription").await
    }

    pub async fn request_subscription(&self, sku: &str) -> Result<SubscriptionCreateResponse, ApiError> {
        self.client
            .post("/api/v1/customer/subscription", &SubscriptionRequest { sku: sku.to_owned() })
            .await
    }

    pub async fn deactivate_subscription(&self) -> Result<DeactivateResponse, ApiError> {
        self.client.delete("/api/v1/customer/subscription").await
    }

    pub async fn subscription_history(
        &self,
        window: PageRequest,
        sort: SortOrder,
    ) -> Result<SubscriptionHistoryResponse, ApiError> {
        self.client.get(&history_path(window, sort)?).await
    }
}
