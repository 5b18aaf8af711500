//! Resource-inventory collaborator: managed unit counts.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::{DirectoryError, DirectoryResult};

/// The external inventory that knows how many resource units custos manages.
///
/// Units count against the licensed unit ceiling the same way enabled
/// accounts count against the user ceiling.
#[async_trait]
pub trait ResourceInventory: Send + Sync {
    /// Number of managed resource units.
    async fn count_managed_units(&self) -> DirectoryResult<i64>;
}

#[derive(Debug, Deserialize)]
struct UnitCountResponse {
    count: i64,
}

/// HTTP client for the resource inventory service.
#[derive(Debug, Clone)]
pub struct InventoryClient {
    base_url: String,
    token: String,
    http_client: Client,
}

impl InventoryClient {
    /// Create a new inventory client.
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
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            base_url,
            token,
            http_client,
        }
    }
}

#[async_trait]
impl ResourceInventory for InventoryClient {
    async fn count_managed_units(&self) -> DirectoryResult<i64> {
        let url = format!("{}/units/count", self.base_url);
        debug!("inventory GET {}", url);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(DirectoryError::Protocol {
                status: status.as_u16(),
                detail: body,
            });
        }

        let body: UnitCountResponse = response
            .json()
            .await
            .map_err(|e| DirectoryError::Parse(e.to_string()))?;
        Ok(body.count)
    }
}
