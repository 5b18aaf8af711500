//! In-memory fakes for the collaborator traits.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use custos_core::{AccountId, TenantId};
use custos_directory::{
    AccountRecord, DirectoryError, DirectoryResult, DirectoryStore, MessageStore, NewAccount,
    OperatorMessage, ResourceInventory, StoredMessage, TenantQuota, TenantRecord,
};

/// In-memory identity store.
#[derive(Default)]
pub struct FakeDirectory {
    state: Mutex<FakeDirectoryState>,
}

#[derive(Default)]
struct FakeDirectoryState {
    tenants: HashMap<TenantId, TenantRecord>,
    accounts: HashMap<AccountId, AccountRecord>,
    attributes: HashMap<String, String>,
}

impl FakeDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a tenant with an optional enabled-account ceiling.
    pub fn add_tenant(&self, tenant_id: TenantId, max_enabled_users: Option<i64>) {
        let mut state = self.state.lock().unwrap();
        state.tenants.insert(
            tenant_id,
            TenantRecord {
                id: tenant_id,
                name: format!("tenant-{tenant_id}"),
                active: true,
                max_enabled_users,
            },
        );
    }

    /// Seed an account.
    pub fn add_account(&self, tenant_id: TenantId, enabled: bool) -> AccountId {
        let account_id = AccountId::new();
        let mut state = self.state.lock().unwrap();
        state.accounts.insert(
            account_id,
            AccountRecord {
                id: account_id,
                tenant_id,
                username: format!("user-{account_id}"),
                display_name: None,
                enabled,
                created_at: Utc::now(),
            },
        );
        account_id
    }
}

#[async_trait]
impl DirectoryStore for FakeDirectory {
    async fn count_tenants(&self) -> DirectoryResult<i64> {
        Ok(self.state.lock().unwrap().tenants.len() as i64)
    }

    async fn count_enabled_accounts(&self, tenant_id: Option<TenantId>) -> DirectoryResult<i64> {
        let state = self.state.lock().unwrap();
        Ok(state
            .accounts
            .values()
            .filter(|a| a.enabled && tenant_id.map_or(true, |t| a.tenant_id == t))
            .count() as i64)
    }

    async fn get_tenant(&self, tenant_id: TenantId) -> DirectoryResult<TenantRecord> {
        self.state
            .lock()
            .unwrap()
            .tenants
            .get(&tenant_id)
            .cloned()
            .ok_or_else(|| DirectoryError::NotFound(format!("tenant {tenant_id}")))
    }

    async fn get_tenant_quota(&self, tenant_id: TenantId) -> DirectoryResult<TenantQuota> {
        let record = self.get_tenant(tenant_id).await?;
        Ok(TenantQuota {
            max_enabled_users: record.max_enabled_users,
        })
    }

    async fn create_tenant(&self, record: &TenantRecord) -> DirectoryResult<TenantRecord> {
        let mut state = self.state.lock().unwrap();
        state.tenants.insert(record.id, record.clone());
        Ok(record.clone())
    }

    async fn set_tenant_active(&self, tenant_id: TenantId, active: bool) -> DirectoryResult<()> {
        let mut state = self.state.lock().unwrap();
        let tenant = state
            .tenants
            .get_mut(&tenant_id)
            .ok_or_else(|| DirectoryError::NotFound(format!("tenant {tenant_id}")))?;
        tenant.active = active;
        Ok(())
    }

    async fn delete_tenant(&self, tenant_id: TenantId) -> DirectoryResult<()> {
        let mut state = self.state.lock().unwrap();
        state
            .tenants
            .remove(&tenant_id)
            .ok_or_else(|| DirectoryError::NotFound(format!("tenant {tenant_id}")))?;
        Ok(())
    }

    async fn list_accounts(&self, tenant_id: TenantId) -> DirectoryResult<Vec<AccountRecord>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .accounts
            .values()
            .filter(|a| a.tenant_id == tenant_id)
            .cloned()
            .collect())
    }

    async fn get_account(&self, account_id: AccountId) -> DirectoryResult<AccountRecord> {
        self.state
            .lock()
            .unwrap()
            .accounts
            .get(&account_id)
            .cloned()
            .ok_or_else(|| DirectoryError::NotFound(format!("account {account_id}")))
    }

    async fn create_account(
        &self,
        tenant_id: TenantId,
        account: &NewAccount,
    ) -> DirectoryResult<AccountRecord> {
        let record = AccountRecord {
            id: AccountId::new(),
            tenant_id,
            username: account.username.clone(),
            display_name: account.display_name.clone(),
            enabled: account.enabled,
            created_at: Utc::now(),
        };
        let mut state = self.state.lock().unwrap();
        state.accounts.insert(record.id, record.clone());
        Ok(record)
    }

    async fn set_account_enabled(
        &self,
        account_id: AccountId,
        enabled: bool,
    ) -> DirectoryResult<()> {
        let mut state = self.state.lock().unwrap();
        let account = state
            .accounts
            .get_mut(&account_id)
            .ok_or_else(|| DirectoryError::NotFound(format!("account {account_id}")))?;
        account.enabled = enabled;
        Ok(())
    }

    async fn delete_account(&self, account_id: AccountId) -> DirectoryResult<()> {
        let mut state = self.state.lock().unwrap();
        state
            .accounts
            .remove(&account_id)
            .ok_or_else(|| DirectoryError::NotFound(format!("account {account_id}")))?;
        Ok(())
    }

    async fn get_realm_attribute(&self, name: &str) -> DirectoryResult<Option<String>> {
        Ok(self.state.lock().unwrap().attributes.get(name).cloned())
    }

    async fn set_realm_attribute(&self, name: &str, value: &str) -> DirectoryResult<()> {
        self.state
            .lock()
            .unwrap()
            .attributes
            .insert(name.to_string(), value.to_string());
        Ok(())
    }
}

/// Inventory with a fixed unit count.
pub struct FakeInventory {
    pub units: i64,
}

#[async_trait]
impl ResourceInventory for FakeInventory {
    async fn count_managed_units(&self) -> DirectoryResult<i64> {
        Ok(self.units)
    }
}

/// In-memory message store that counts write calls.
#[derive(Default)]
pub struct FakeMessageStore {
    messages: Mutex<Vec<StoredMessage>>,
    next_id: AtomicUsize,
    pub create_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
}

impl FakeMessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn published(&self) -> Vec<StoredMessage> {
        self.messages.lock().unwrap().clone()
    }

    pub fn write_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst) + self.delete_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MessageStore for FakeMessageStore {
    async fn list_messages(&self, tag: &str) -> DirectoryResult<Vec<StoredMessage>> {
        Ok(self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|stored| stored.message.tags.contains(tag))
            .cloned()
            .collect())
    }

    async fn create_message(&self, message: &OperatorMessage) -> DirectoryResult<StoredMessage> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let stored = StoredMessage {
            id: format!("msg-{id}"),
            message: message.clone(),
        };
        self.messages.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn delete_message(&self, id: &str) -> DirectoryResult<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        let mut messages = self.messages.lock().unwrap();
        let before = messages.len();
        messages.retain(|stored| stored.id != id);
        if messages.len() == before {
            return Err(DirectoryError::NotFound(format!("message {id}")));
        }
        Ok(())
    }
}
