//! The in-memory store.
//!
//! One `RwLock` guards all tables: any unit of work that writes multiple
//! tables does so under a single write guard, so commits are all-or-nothing
//! by construction. Stock mutations additionally serialize per
//! (product, warehouse) key, held across the whole check-then-act sequence;
//! key locks are always acquired in sorted order, before the table lock.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use dashmap::DashMap;
use ledgerly_core::inventory::types::{InventoryMovement, StockLevel};
use ledgerly_core::ledger::LedgerError;
use ledgerly_core::ledger::service::AccountInfo;
use ledgerly_core::reconciliation::Reconciliation;
use ledgerly_core::reports::types::{AccountRef, LedgerLine};
use ledgerly_core::sales::Sale;
use ledgerly_shared::config::PostingConfig;
use ledgerly_shared::types::{
    AccountId, PartyId, ProductId, ReconciliationId, SaleId, TransactionId, WarehouseId,
};
use ledgerly_shared::{AppError, AppResult};

use crate::entities::{Account, Party, Product, Transaction, Warehouse};

/// The key a stock level is stored and serialized under.
pub type StockKey = (ProductId, WarehouseId);

/// Account IDs resolved from the configured posting account codes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostingAccounts {
    /// Debited on cash sales.
    pub cash: Option<AccountId>,
    /// Debited on credit sales.
    pub receivable: Option<AccountId>,
    /// Credited with the sale total.
    pub revenue: Option<AccountId>,
}

/// All stored tables. Guarded by one lock in [`MemoryStore`].
#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub accounts: HashMap<AccountId, Account>,
    pub account_codes: HashMap<String, AccountId>,
    pub products: HashMap<ProductId, Product>,
    pub warehouses: HashMap<WarehouseId, Warehouse>,
    pub parties: HashMap<PartyId, Party>,
    pub transactions: HashMap<TransactionId, Transaction>,
    pub stock_levels: HashMap<StockKey, StockLevel>,
    pub movements: Vec<InventoryMovement>,
    pub sales: HashMap<SaleId, Sale>,
    pub reconciliations: HashMap<ReconciliationId, Reconciliation>,
    pub posting: PostingAccounts,
}

impl Tables {
    /// The live view of an account: present and not soft-deleted.
    pub fn live_account(&self, id: AccountId) -> Option<&Account> {
        self.accounts.get(&id).filter(|a| a.is_live())
    }

    /// Account lookup for the ledger validator. Inactive and deleted
    /// accounts are reported through the flags, not as not-found, so the
    /// validator can name the precise rejection.
    pub fn account_info(&self, id: AccountId) -> Result<AccountInfo, LedgerError> {
        let account = self
            .accounts
            .get(&id)
            .ok_or(LedgerError::AccountNotFound(id))?;
        Ok(AccountInfo {
            id,
            is_active: account.active,
            is_deleted: account.deleted_at.is_some(),
        })
    }

    /// Live accounts in report form.
    pub fn account_refs(&self) -> Vec<AccountRef> {
        self.accounts
            .values()
            .filter(|a| a.is_live())
            .map(|a| AccountRef {
                id: a.id,
                code: a.code.clone(),
                name: a.name.clone(),
                account_type: a.account_type,
            })
            .collect()
    }

    /// The live ledger view: lines of posted, non-cancelled transactions.
    /// Every balance computation in the system reads this and nothing else.
    pub fn live_lines(&self) -> Vec<LedgerLine> {
        self.transactions
            .values()
            .filter(|t| t.is_live())
            .flat_map(|t| {
                t.lines.iter().map(|l| LedgerLine {
                    transaction_id: t.id,
                    date: t.date,
                    description: t.description.clone(),
                    account_id: l.account_id,
                    debit: l.debit,
                    credit: l.credit,
                })
            })
            .collect()
    }
}

/// Thread-safe in-memory storage engine.
pub struct MemoryStore {
    tables: RwLock<Tables>,
    stock_locks: DashMap<StockKey, Arc<Mutex<()>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            stock_locks: DashMap::new(),
        }
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the serialization locks for a set of stock keys, sorted and
    /// deduplicated so concurrent multi-key operations cannot deadlock.
    /// Callers lock them in order via [`lock_all`].
    pub(crate) fn stock_locks_for<I>(&self, keys: I) -> Vec<Arc<Mutex<()>>>
    where
        I: IntoIterator<Item = StockKey>,
    {
        let mut keys: Vec<StockKey> = keys.into_iter().collect();
        keys.sort_unstable();
        keys.dedup();
        keys.into_iter()
            .map(|key| {
                self.stock_locks
                    .entry(key)
                    .or_insert_with(|| Arc::new(Mutex::new(())))
                    .clone()
            })
            .collect()
    }

    /// Resolves the configured posting account codes against the chart of
    /// accounts.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the first code that does not
    /// resolve to a live account.
    pub fn configure_posting(&self, posting: &PostingConfig) -> AppResult<()> {
        let mut tables = self.write();
        let cash = Self::resolve_code(&tables, &posting.cash_account_code)?;
        let receivable = Self::resolve_code(&tables, &posting.receivable_account_code)?;
        let revenue = Self::resolve_code(&tables, &posting.revenue_account_code)?;
        tables.posting = PostingAccounts {
            cash: Some(cash),
            receivable: Some(receivable),
            revenue: Some(revenue),
        };
        tracing::info!(
            cash = %posting.cash_account_code,
            receivable = %posting.receivable_account_code,
            revenue = %posting.revenue_account_code,
            "posting accounts configured"
        );
        Ok(())
    }

    fn resolve_code(tables: &Tables, code: &str) -> AppResult<AccountId> {
        tables
            .account_codes
            .get(code)
            .copied()
            .filter(|id| tables.live_account(*id).is_some())
            .ok_or_else(|| {
                AppError::Configuration(format!(
                    "posting account code {code} does not resolve to a live account"
                ))
            })
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Locks every mutex in order, recovering from poisoning: the tables guard
/// is released before any panic can propagate, so stored state stays
/// consistent even when a lock is poisoned.
pub(crate) fn lock_all(locks: &[Arc<Mutex<()>>]) -> Vec<MutexGuard<'_, ()>> {
    locks
        .iter()
        .map(|lock| lock.lock().unwrap_or_else(PoisonError::into_inner))
        .collect()
}
