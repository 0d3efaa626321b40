//! In-memory `AccountStore` implementation.
//!
//! The in-memory twin of the PostgreSQL repository. Every operation takes
//! the single mutex for its full duration, so the rotation compare-and-swap
//! gets the same atomicity the database gives via a conditional `UPDATE`.
//! Used by the test suite and suitable for ephemeral single-node setups.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use ladle_core::account::{Account, CreateAccount};
use ladle_core::error::AppError;
use ladle_core::result::AppResult;
use ladle_core::traits::{AccountStore, RotationOutcome};

/// Mutex-guarded in-memory account map.
#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    accounts: Mutex<HashMap<Uuid, Account>>,
}

impl MemoryAccountStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>> {
        let accounts = self.accounts.lock().await;
        Ok(accounts.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        let accounts = self.accounts.lock().await;
        Ok(accounts.values().find(|a| a.email == email).cloned())
    }

    async fn find_by_external_id(&self, external_id: &str) -> AppResult<Option<Account>> {
        let accounts = self.accounts.lock().await;
        Ok(accounts
            .values()
            .find(|a| a.external_id.as_deref() == Some(external_id))
            .cloned())
    }

    async fn create(&self, data: &CreateAccount) -> AppResult<Account> {
        let mut accounts = self.accounts.lock().await;

        if accounts.values().any(|a| a.email == data.email) {
            return Err(AppError::duplicate("Email already in use"));
        }
        if let Some(external_id) = &data.external_id {
            if accounts
                .values()
                .any(|a| a.external_id.as_ref() == Some(external_id))
            {
                return Err(AppError::duplicate("External identity already registered"));
            }
        }

        let account = Account {
            id: Uuid::new_v4(),
            email: data.email.clone(),
            password_hash: data.password_hash.clone(),
            display_name: data.display_name.clone(),
            external_id: data.external_id.clone(),
            refresh_tokens: Vec::new(),
            created_at: Utc::now(),
        };

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn add_refresh_token(&self, id: Uuid, token: &str) -> AppResult<()> {
        let mut accounts = self.accounts.lock().await;
        let account = accounts
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Account {id} not found")))?;
        account.refresh_tokens.push(token.to_string());
        Ok(())
    }

    async fn remove_refresh_token(&self, id: Uuid, token: &str) -> AppResult<bool> {
        let mut accounts = self.accounts.lock().await;
        let Some(account) = accounts.get_mut(&id) else {
            return Ok(false);
        };
        let before = account.refresh_tokens.len();
        account.refresh_tokens.retain(|t| t != token);
        Ok(account.refresh_tokens.len() < before)
    }

    async fn rotate_refresh_token(
        &self,
        id: Uuid,
        old: &str,
        new: &str,
    ) -> AppResult<RotationOutcome> {
        // Check, remove, and append under one lock acquisition.
        let mut accounts = self.accounts.lock().await;
        let Some(account) = accounts.get_mut(&id) else {
            return Ok(RotationOutcome::NotPresent);
        };

        if !account.refresh_tokens.iter().any(|t| t == old) {
            return Ok(RotationOutcome::NotPresent);
        }

        account.refresh_tokens.retain(|t| t != old);
        account.refresh_tokens.push(new.to_string());
        Ok(RotationOutcome::Rotated)
    }

    async fn revoke_all_refresh_tokens(&self, id: Uuid) -> AppResult<bool> {
        let mut accounts = self.accounts.lock().await;
        let Some(account) = accounts.get_mut(&id) else {
            return Ok(false);
        };
        let had_any = !account.refresh_tokens.is_empty();
        account.refresh_tokens.clear();
        Ok(had_any)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_data(email: &str) -> CreateAccount {
        CreateAccount {
            email: email.to_string(),
            password_hash: Some("hash".to_string()),
            display_name: Some("Test".to_string()),
            external_id: None,
        }
    }

    #[tokio::test]
    async fn duplicate_email_never_creates_a_second_record() {
        let store = MemoryAccountStore::new();
        store.create(&create_data("a@x.com")).await.unwrap();

        let err = store.create(&create_data("a@x.com")).await.unwrap_err();
        assert_eq!(err.kind, ladle_core::error::ErrorKind::Duplicate);

        let found = store.find_by_email("a@x.com").await.unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn rotation_swaps_exactly_one_token() {
        let store = MemoryAccountStore::new();
        let account = store.create(&create_data("a@x.com")).await.unwrap();

        store.add_refresh_token(account.id, "t1").await.unwrap();
        store.add_refresh_token(account.id, "t2").await.unwrap();

        let outcome = store
            .rotate_refresh_token(account.id, "t1", "t3")
            .await
            .unwrap();
        assert_eq!(outcome, RotationOutcome::Rotated);

        let tokens = store
            .find_by_id(account.id)
            .await
            .unwrap()
            .unwrap()
            .refresh_tokens;
        assert_eq!(tokens, vec!["t2".to_string(), "t3".to_string()]);
    }

    #[tokio::test]
    async fn rotating_an_absent_token_is_not_present() {
        let store = MemoryAccountStore::new();
        let account = store.create(&create_data("a@x.com")).await.unwrap();
        store.add_refresh_token(account.id, "t1").await.unwrap();

        let outcome = store
            .rotate_refresh_token(account.id, "never-issued", "t2")
            .await
            .unwrap();
        assert_eq!(outcome, RotationOutcome::NotPresent);
    }

    #[tokio::test]
    async fn revoke_all_reports_whether_anything_was_revoked() {
        let store = MemoryAccountStore::new();
        let account = store.create(&create_data("a@x.com")).await.unwrap();
        store.add_refresh_token(account.id, "t1").await.unwrap();

        assert!(store.revoke_all_refresh_tokens(account.id).await.unwrap());
        assert!(!store.revoke_all_refresh_tokens(account.id).await.unwrap());
    }
}
