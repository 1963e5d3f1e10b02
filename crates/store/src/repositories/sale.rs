//! Sale repository: draft creation and atomic confirmation.

use std::collections::HashMap;

use chrono::NaiveDate;
use ledgerly_core::inventory::CostingService;
use ledgerly_core::inventory::types::{CostedMovement, InventoryMovement, StockLevel};
use ledgerly_core::ledger::LedgerService;
use ledgerly_core::ledger::types::{
    LineInput, RecordTransactionInput, TransactionStatus, TransactionType,
};
use ledgerly_core::sales::error::SalesError;
use ledgerly_core::sales::types::{PaymentType, ProductPostingAccounts, Sale, SaleItem, SaleStatus};
use ledgerly_core::sales::workflow::SaleWorkflow;
use ledgerly_shared::types::{LineId, MovementId, PartyId, SaleId, TransactionId};
use ledgerly_shared::{AppError, AppResult};
use rust_decimal::Decimal;

use crate::entities::{Transaction, TransactionLine};
use crate::store::{MemoryStore, StockKey, lock_all};

/// Input for drafting a sale.
#[derive(Debug, Clone)]
pub struct CreateSaleInput {
    /// The customer.
    pub customer_id: PartyId,
    /// Sale date.
    pub date: NaiveDate,
    /// How the customer pays.
    pub payment_type: PaymentType,
    /// Line items.
    pub items: Vec<SaleItem>,
}

/// Repository for the sale lifecycle.
pub struct SaleRepository;

impl SaleRepository {
    /// Drafts a sale. Drafts have no ledger or inventory effect.
    ///
    /// # Errors
    ///
    /// Returns not-found for an unknown customer, product, or warehouse
    /// and a validation error for non-positive quantities.
    pub fn create_draft(store: &MemoryStore, input: CreateSaleInput) -> AppResult<Sale> {
        let mut tables = store.write();

        if !tables.parties.contains_key(&input.customer_id) {
            return Err(AppError::NotFound(format!(
                "customer not found: {}",
                input.customer_id
            )));
        }
        for item in &input.items {
            if !tables.products.contains_key(&item.product_id) {
                return Err(AppError::NotFound(format!(
                    "product not found: {}",
                    item.product_id
                )));
            }
            if !tables.warehouses.contains_key(&item.warehouse_id) {
                return Err(AppError::NotFound(format!(
                    "warehouse not found: {}",
                    item.warehouse_id
                )));
            }
            if item.quantity <= Decimal::ZERO {
                return Err(AppError::Validation(format!(
                    "sale quantity must be positive, got {}",
                    item.quantity
                )));
            }
        }

        let sale = Sale {
            id: SaleId::new(),
            customer_id: input.customer_id,
            date: input.date,
            payment_type: input.payment_type,
            status: SaleStatus::Draft,
            items: input.items,
            transaction_id: None,
        };
        tables.sales.insert(sale.id, sale.clone());

        tracing::debug!(id = %sale.id, total = %sale.total(), "sale drafted");
        Ok(sale)
    }

    /// Confirms a draft sale: posts revenue and per-item COGS into one
    /// balanced ledger transaction and issues the stock.
    ///
    /// The item key locks are held across the whole operation and every
    /// table write happens under one write guard, so a failure at any
    /// point (short stock, missing posting account, ledger rejection)
    /// leaves no partial state: the sale stays draft, no transaction and
    /// no movement exist.
    ///
    /// # Errors
    ///
    /// Returns a state error for a non-draft sale, `InsufficientStock`
    /// naming the short product, a configuration error for unresolved
    /// posting accounts, or the ledger validation error.
    pub fn confirm(store: &MemoryStore, sale_id: SaleId) -> AppResult<Sale> {
        let keys: Vec<StockKey> = {
            let tables = store.read();
            let sale = tables
                .sales
                .get(&sale_id)
                .ok_or(SalesError::SaleNotFound(sale_id))?;
            sale.items
                .iter()
                .map(|i| (i.product_id, i.warehouse_id))
                .collect()
        };
        let locks = store.stock_locks_for(keys);
        let _guards = lock_all(&locks);

        let mut tables = store.write();
        let mut sale = tables
            .sales
            .get(&sale_id)
            .cloned()
            .ok_or(SalesError::SaleNotFound(sale_id))?;
        SaleWorkflow::validate_confirmable(&sale).map_err(AppError::from)?;

        let debit_account = SaleWorkflow::select_debit_account(
            sale.payment_type,
            tables.posting.cash,
            tables.posting.receivable,
        )
        .map_err(AppError::from)?;
        let revenue_account = tables
            .posting
            .revenue
            .ok_or(SalesError::MissingPostingAccount("revenue account"))?;

        let total = sale.total();
        let mut lines: Vec<LineInput> =
            SaleWorkflow::revenue_lines(total, debit_account, revenue_account).to_vec();

        // Issue stock against scratch copies of the levels; nothing is
        // written back until every item and the ledger posting validate.
        let mut scratch: HashMap<StockKey, StockLevel> = HashMap::new();
        let mut issued: Vec<(StockKey, CostedMovement)> = Vec::with_capacity(sale.items.len());

        for item in &sale.items {
            let key = (item.product_id, item.warehouse_id);
            let level = scratch
                .get(&key)
                .cloned()
                .or_else(|| tables.stock_levels.get(&key).cloned());
            let costed = CostingService::apply_sale(level, item.product_id, item.quantity)
                .map_err(SalesError::from)?;

            let product = tables
                .products
                .get(&item.product_id)
                .ok_or_else(|| AppError::NotFound(format!("product not found: {}", item.product_id)))?;
            // Zero-cost stock yields zero COGS; the ledger rejects zero
            // amounts, so the pair is only posted when there is a cost.
            if costed.cogs > Decimal::ZERO {
                let accounts = ProductPostingAccounts {
                    cogs_account_id: product.cogs_account_id,
                    inventory_account_id: product.inventory_account_id,
                };
                lines.extend(SaleWorkflow::cogs_lines(costed.cogs, accounts));
            }
            scratch.insert(key, costed.level.clone());
            issued.push((key, costed));
        }

        let input = RecordTransactionInput {
            transaction_type: TransactionType::Sale,
            date: sale.date,
            description: format!("Sale to customer {}", sale.customer_id),
            reference: Some(sale.id.to_string()),
            lines,
        };
        let (posted, totals) =
            LedgerService::validate_and_post(&input, |id| tables.account_info(id))
                .map_err(SalesError::from)?;

        // Everything validated; commit all tables under the one guard.
        let transaction_id = TransactionId::new();
        let transaction = Transaction {
            id: transaction_id,
            transaction_type: input.transaction_type,
            date: input.date,
            description: input.description,
            reference: input.reference,
            status: TransactionStatus::Posted,
            reconciled: false,
            deleted_at: None,
            total_debit: totals.total_debit,
            total_credit: totals.total_credit,
            lines: posted
                .into_iter()
                .map(|line| TransactionLine {
                    id: LineId::new(),
                    account_id: line.account_id,
                    debit: line.debit,
                    credit: line.credit,
                    memo: line.memo,
                })
                .collect(),
        };
        tables.transactions.insert(transaction_id, transaction);

        for (key, costed) in issued {
            tables.movements.push(InventoryMovement {
                id: MovementId::new(),
                product_id: key.0,
                warehouse_id: key.1,
                transaction_id: Some(transaction_id),
                movement_type: costed.movement_type,
                quantity: costed.quantity,
                unit_cost: costed.unit_cost,
                date: sale.date,
                reason: None,
            });
            tables.stock_levels.insert(key, costed.level);
        }

        sale.status = SaleStatus::Confirmed;
        sale.transaction_id = Some(transaction_id);
        tables.sales.insert(sale_id, sale.clone());

        tracing::info!(
            sale = %sale_id,
            transaction = %transaction_id,
            %total,
            "sale confirmed"
        );
        Ok(sale)
    }

    /// Cancels a draft sale. Terminal; confirmed sales cannot be
    /// cancelled.
    ///
    /// # Errors
    ///
    /// Returns not-found for an unknown sale and a state error for a
    /// non-draft one.
    pub fn cancel(store: &MemoryStore, sale_id: SaleId) -> AppResult<Sale> {
        let mut tables = store.write();
        let sale = tables
            .sales
            .get_mut(&sale_id)
            .ok_or(SalesError::SaleNotFound(sale_id))?;
        SaleWorkflow::validate_cancellable(sale).map_err(AppError::from)?;

        sale.status = SaleStatus::Cancelled;
        tracing::info!(sale = %sale_id, "sale cancelled");
        Ok(sale.clone())
    }

    /// Fetches a sale.
    ///
    /// # Errors
    ///
    /// Returns not-found for an unknown id.
    pub fn get(store: &MemoryStore, sale_id: SaleId) -> AppResult<Sale> {
        store
            .read()
            .sales
            .get(&sale_id)
            .cloned()
            .ok_or_else(|| AppError::from(SalesError::SaleNotFound(sale_id)))
    }
}
