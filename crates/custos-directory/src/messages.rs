//! System-message store collaborator: operator-facing notices.
//!
//! Messages are localized, tagged, and carry a severity. The store assigns
//! an opaque identifier on creation; custos treats two messages with the
//! same content as the same message regardless of that identifier, which is
//! what makes diff-based reconciliation possible.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DirectoryError, DirectoryResult};

/// Severity of an operator message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Urgent,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Urgent => write!(f, "urgent"),
        }
    }
}

/// An operator-facing message.
///
/// Identity for diffing purposes is content equality over all three fields;
/// ordered collections keep `Eq`/`Hash` deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OperatorMessage {
    /// Localized text, keyed by language tag (e.g. "en", "de").
    pub text: BTreeMap<String, String>,
    /// Tags used for selective replacement.
    pub tags: BTreeSet<String>,
    /// Message severity.
    pub severity: Severity,
}

impl OperatorMessage {
    /// Build a message from `(language, text)` pairs and a tag set.
    pub fn new<'a>(
        severity: Severity,
        texts: impl IntoIterator<Item = (&'a str, String)>,
        tags: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self {
            text: texts
                .into_iter()
                .map(|(lang, msg)| (lang.to_string(), msg))
                .collect(),
            tags: tags.into_iter().map(str::to_string).collect(),
            severity,
        }
    }
}

/// A message as returned by the store, with its opaque identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredMessage {
    /// Identifier assigned by the message store.
    pub id: String,
    /// The message content.
    #[serde(flatten)]
    pub message: OperatorMessage,
}

/// Operations custos needs from the system-message store.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// List the published messages carrying the given tag.
    async fn list_messages(&self, tag: &str) -> DirectoryResult<Vec<StoredMessage>>;

    /// Publish a message; the store assigns the identifier.
    async fn create_message(&self, message: &OperatorMessage) -> DirectoryResult<StoredMessage>;

    /// Remove a message by its opaque identifier.
    async fn delete_message(&self, id: &str) -> DirectoryResult<()>;
}

/// HTTP client for the system-message store.
#[derive(Debug, Clone)]
pub struct MessageStoreClient {
    base_url: String,
    token: String,
    http_client: Client,
}

impl MessageStoreClient {
    /// Create a new message-store client.
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

    async fn handle_error<T>(&self, response: reqwest::Response) -> DirectoryResult<T> {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<no body>".to_string());

        match status {
            StatusCode::NOT_FOUND => Err(DirectoryError::NotFound(body)),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(DirectoryError::Auth(format!(
                "message store rejected credentials (HTTP {status})"
            ))),
            _ => Err(DirectoryError::Protocol {
                status: status.as_u16(),
                detail: body,
            }),
        }
    }
}

#[async_trait]
impl MessageStore for MessageStoreClient {
    async fn list_messages(&self, tag: &str) -> DirectoryResult<Vec<StoredMessage>> {
        let url = format!("{}/messages", self.base_url);
        debug!("message store GET {} (tag={})", url, tag);

        let response = self
            .http_client
            .get(&url)
            .query(&[("tag", tag)])
            .bearer_auth(&self.token)
            .send()
            .await?;

        if !response.status().is_success() {
            return self.handle_error(response).await;
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| DirectoryError::Parse(e.to_string()))
    }

    async fn create_message(&self, message: &OperatorMessage) -> DirectoryResult<StoredMessage> {
        let url = format!("{}/messages", self.base_url);
        debug!("message store POST {}", url);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.token)
            .json(message)
            .send()
            .await?;

        if !response.status().is_success() {
            return self.handle_error(response).await;
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| DirectoryError::Parse(e.to_string()))
    }

    async fn delete_message(&self, id: &str) -> DirectoryResult<()> {
        let url = format!("{}/messages/{id}", self.base_url);
        debug!("message store DELETE {}", url);

        let response = self
            .http_client
            .delete(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT || status.is_success() {
            Ok(())
        } else {
            self.handle_error(response).await
        }
    }
}
