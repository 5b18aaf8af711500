//! Identity-store admin API client (reqwest-based).

use std::time::Duration;

use async_trait::async_trait;
use custos_core::{AccountId, TenantId};
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::error::{DirectoryError, DirectoryResult};
use crate::store::DirectoryStore;
use crate::types::{AccountRecord, NewAccount, TenantQuota, TenantRecord};

/// Generic `{"count": n}` response body used by the counting endpoints.
#[derive(Debug, Deserialize)]
struct CountResponse {
    count: i64,
}

/// Body of a realm attribute read/write.
#[derive(Debug, Serialize, Deserialize)]
struct AttributeBody {
    value: String,
}

/// HTTP client for the identity provider's admin REST API.
///
/// Wraps `reqwest::Client` with bearer-token auth and maps non-success
/// responses onto [`DirectoryError`]. One instance is shared across the
/// process; `reqwest::Client` is internally pooled.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    /// Base URL of the admin API (e.g. `https://idp.internal/admin`).
    base_url: String,
    /// Service-account bearer token.
    token: String,
    /// Underlying HTTP client.
    http_client: Client,
}

impl DirectoryClient {
    /// Create a new client.
    pub fn new(base_url: String, token: String, timeout: Duration) -> DirectoryResult<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .user_agent("custos-directory/1.0")
            .build()
            .map_err(|e| {
                DirectoryError::InvalidConfig(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self::with_http_client(base_url, token, http_client))
    }

    /// Create a client with a pre-built `reqwest::Client` (for testing).
    #[must_use]
    pub fn with_http_client(base_url: String, token: String, http_client: Client) -> Self {
        // Normalize base URL: strip trailing slash.
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            base_url,
            token,
            http_client,
        }
    }

    /// Get the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Internal HTTP methods ─────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: &str) -> DirectoryResult<T> {
        debug!("directory GET {}", url);
        let response = self
            .http_client
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await?;
        self.handle_response(response).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> DirectoryResult<T> {
        debug!("directory POST {}", url);
        let response = self
            .http_client
            .post(url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await?;
        self.handle_response(response).await
    }

    async fn put_no_content<B: Serialize>(&self, url: &str, body: &B) -> DirectoryResult<()> {
        debug!("directory PUT {}", url);
        let response = self
            .http_client
            .put(url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT || status.is_success() {
            Ok(())
        } else {
            self.handle_error_response(response).await
        }
    }

    async fn delete(&self, url: &str) -> DirectoryResult<()> {
        debug!("directory DELETE {}", url);
        let response = self
            .http_client
            .delete(url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT || status.is_success() {
            Ok(())
        } else {
            self.handle_error_response(response).await
        }
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> DirectoryResult<T> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body).map_err(|e| DirectoryError::Parse(e.to_string()))
        } else {
            self.handle_error_response(response).await
        }
    }

    async fn handle_error_response<T>(&self, response: reqwest::Response) -> DirectoryResult<T> {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<no body>".to_string());

        match status {
            StatusCode::NOT_FOUND => Err(DirectoryError::NotFound(body)),
            StatusCode::CONFLICT => Err(DirectoryError::Conflict(body)),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(DirectoryError::Auth(format!(
                "identity store rejected credentials (HTTP {status})"
            ))),
            _ => {
                let detail = if body.is_empty() {
                    format!("HTTP {status}")
                } else {
                    body
                };
                Err(DirectoryError::Protocol {
                    status: status.as_u16(),
                    detail,
                })
            }
        }
    }
}

#[async_trait]
impl DirectoryStore for DirectoryClient {
    async fn count_tenants(&self) -> DirectoryResult<i64> {
        let url = format!("{}/tenants/count", self.base_url);
        let response: CountResponse = self.get(&url).await?;
        Ok(response.count)
    }

    async fn count_enabled_accounts(&self, tenant_id: Option<TenantId>) -> DirectoryResult<i64> {
        let url = match tenant_id {
            Some(id) => format!("{}/tenants/{id}/accounts/count?enabled=true", self.base_url),
            None => format!("{}/accounts/count?enabled=true", self.base_url),
        };
        let response: CountResponse = self.get(&url).await?;
        Ok(response.count)
    }

    async fn get_tenant(&self, tenant_id: TenantId) -> DirectoryResult<TenantRecord> {
        let url = format!("{}/tenants/{tenant_id}", self.base_url);
        self.get(&url).await
    }

    async fn get_tenant_quota(&self, tenant_id: TenantId) -> DirectoryResult<TenantQuota> {
        let record = self.get_tenant(tenant_id).await?;
        Ok(TenantQuota {
            max_enabled_users: record.max_enabled_users,
        })
    }

    async fn create_tenant(&self, record: &TenantRecord) -> DirectoryResult<TenantRecord> {
        let url = format!("{}/tenants", self.base_url);
        self.post(&url, record).await
    }

    async fn set_tenant_active(&self, tenant_id: TenantId, active: bool) -> DirectoryResult<()> {
        let url = format!("{}/tenants/{tenant_id}/active", self.base_url);
        self.put_no_content(&url, &serde_json::json!({ "active": active }))
            .await
    }

    async fn delete_tenant(&self, tenant_id: TenantId) -> DirectoryResult<()> {
        let url = format!("{}/tenants/{tenant_id}", self.base_url);
        self.delete(&url).await
    }

    async fn list_accounts(&self, tenant_id: TenantId) -> DirectoryResult<Vec<AccountRecord>> {
        let url = format!("{}/tenants/{tenant_id}/accounts", self.base_url);
        self.get(&url).await
    }

    async fn get_account(&self, account_id: AccountId) -> DirectoryResult<AccountRecord> {
        let url = format!("{}/accounts/{account_id}", self.base_url);
        self.get(&url).await
    }

    async fn create_account(
        &self,
        tenant_id: TenantId,
        account: &NewAccount,
    ) -> DirectoryResult<AccountRecord> {
        let url = format!("{}/tenants/{tenant_id}/accounts", self.base_url);
        self.post(&url, account).await
    }

    async fn set_account_enabled(
        &self,
        account_id: AccountId,
        enabled: bool,
    ) -> DirectoryResult<()> {
        let url = format!("{}/accounts/{account_id}/enabled", self.base_url);
        self.put_no_content(&url, &serde_json::json!({ "enabled": enabled }))
            .await
    }

    async fn delete_account(&self, account_id: AccountId) -> DirectoryResult<()> {
        let url = format!("{}/accounts/{account_id}", self.base_url);
        self.delete(&url).await
    }

    async fn get_realm_attribute(&self, name: &str) -> DirectoryResult<Option<String>> {
        let url = format!("{}/realm/attributes/{name}", self.base_url);
        match self.get::<AttributeBody>(&url).await {
            Ok(body) => Ok(Some(body.value)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn set_realm_attribute(&self, name: &str, value: &str) -> DirectoryResult<()> {
        let url = format!("{}/realm/attributes/{name}", self.base_url);
        self.put_no_content(
            &url,
            &AttributeBody {
                value: value.to_string(),
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_normalization() {
        let client = DirectoryClient::with_http_client(
            "https://idp.internal/admin/".to_string(),
            "token".to_string(),
            Client::new(),
        );
        assert_eq!(client.base_url(), "https://idp.internal/admin");
    }
}
