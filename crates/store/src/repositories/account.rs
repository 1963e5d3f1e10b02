//! Chart-of-accounts repository.

use chrono::Utc;
use ledgerly_core::ledger::types::AccountType;
use ledgerly_shared::types::AccountId;
use ledgerly_shared::{AppError, AppResult};

use crate::entities::Account;
use crate::store::MemoryStore;

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    /// Unique account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account classification.
    pub account_type: AccountType,
    /// Optional parent account.
    pub parent_id: Option<AccountId>,
}

/// Repository for chart-of-accounts operations.
pub struct AccountRepository;

impl AccountRepository {
    /// Creates an account.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty code or name, a conflict for
    /// a duplicate code, and not-found for a missing parent.
    pub fn create(store: &MemoryStore, input: CreateAccountInput) -> AppResult<Account> {
        if input.code.trim().is_empty() {
            return Err(AppError::Validation("account code is required".to_string()));
        }
        if input.name.trim().is_empty() {
            return Err(AppError::Validation("account name is required".to_string()));
        }

        let mut tables = store.write();

        if let Some(parent_id) = input.parent_id {
            if tables.live_account(parent_id).is_none() {
                return Err(AppError::NotFound(format!(
                    "parent account not found: {parent_id}"
                )));
            }
        }
        if tables.account_codes.contains_key(&input.code) {
            return Err(AppError::Conflict(format!(
                "account code already exists: {}",
                input.code
            )));
        }

        let account = Account {
            id: AccountId::new(),
            code: input.code,
            name: input.name,
            account_type: input.account_type,
            parent_id: input.parent_id,
            active: true,
            deleted_at: None,
        };
        tables.account_codes.insert(account.code.clone(), account.id);
        tables.accounts.insert(account.id, account.clone());

        tracing::debug!(id = %account.id, code = %account.code, "account created");
        Ok(account)
    }

    /// Fetches a live account by id.
    ///
    /// # Errors
    ///
    /// Returns not-found for a missing or soft-deleted account.
    pub fn get(store: &MemoryStore, id: AccountId) -> AppResult<Account> {
        store
            .read()
            .live_account(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("account not found: {id}")))
    }

    /// Fetches a live account by code.
    ///
    /// # Errors
    ///
    /// Returns not-found when the code does not resolve.
    pub fn get_by_code(store: &MemoryStore, code: &str) -> AppResult<Account> {
        let tables = store.read();
        tables
            .account_codes
            .get(code)
            .and_then(|id| tables.live_account(*id))
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("account not found: {code}")))
    }

    /// Activates or deactivates an account. Inactive accounts keep their
    /// history but reject new postings.
    ///
    /// # Errors
    ///
    /// Returns not-found for a missing or soft-deleted account.
    pub fn set_active(store: &MemoryStore, id: AccountId, active: bool) -> AppResult<Account> {
        let mut tables = store.write();
        let account = tables
            .accounts
            .get_mut(&id)
            .filter(|a| a.is_live())
            .ok_or_else(|| AppError::NotFound(format!("account not found: {id}")))?;
        account.active = active;
        Ok(account.clone())
    }

    /// Soft-deletes an account.
    ///
    /// # Errors
    ///
    /// Returns a state error when the account is referenced by a live
    /// posted line; such accounts carry history and can only be
    /// deactivated.
    pub fn soft_delete(store: &MemoryStore, id: AccountId) -> AppResult<()> {
        let mut tables = store.write();
        if tables.live_account(id).is_none() {
            return Err(AppError::NotFound(format!("account not found: {id}")));
        }
        let referenced = tables
            .transactions
            .values()
            .filter(|t| t.is_live())
            .any(|t| t.lines.iter().any(|l| l.account_id == id));
        if referenced {
            return Err(AppError::State(format!(
                "account {id} has posted lines and cannot be deleted"
            )));
        }

        if let Some(account) = tables.accounts.get_mut(&id) {
            account.deleted_at = Some(Utc::now());
            tracing::debug!(%id, "account soft-deleted");
        }
        Ok(())
    }
}
