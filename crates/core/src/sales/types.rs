//! Sales domain types.

use chrono::NaiveDate;
use ledgerly_shared::types::money::round_currency;
use ledgerly_shared::types::{AccountId, PartyId, ProductId, SaleId, TransactionId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    /// Paid immediately; debits the cash account.
    Cash,
    /// On account; debits accounts receivable.
    Credit,
}

/// Sale lifecycle status.
///
/// `Draft -> Confirmed` and `Draft -> Cancelled`; both end states are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaleStatus {
    /// Sale is being drafted and can still change.
    Draft,
    /// Sale has been confirmed and posted to the ledger.
    Confirmed,
    /// Sale was abandoned before confirmation.
    Cancelled,
}

impl SaleStatus {
    /// Returns true if the sale can be confirmed from this status.
    #[must_use]
    pub fn can_confirm(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns true if the sale can be cancelled from this status.
    #[must_use]
    pub fn can_cancel(&self) -> bool {
        matches!(self, Self::Draft)
    }
}

impl std::fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Confirmed => write!(f, "confirmed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// One line item on a sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleItem {
    /// The product sold.
    pub product_id: ProductId,
    /// The warehouse the stock ships from.
    pub warehouse_id: ledgerly_shared::types::WarehouseId,
    /// Quantity sold (positive).
    pub quantity: Decimal,
    /// Selling price per unit.
    pub unit_price: Decimal,
}

impl SaleItem {
    /// The line total (quantity × unit price, currency-rounded).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        round_currency(self.quantity * self.unit_price)
    }
}

/// Commercial header of a sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    /// Sale ID.
    pub id: SaleId,
    /// The customer.
    pub customer_id: PartyId,
    /// Sale date.
    pub date: NaiveDate,
    /// How the customer pays.
    pub payment_type: PaymentType,
    /// Lifecycle status.
    pub status: SaleStatus,
    /// The line items.
    pub items: Vec<SaleItem>,
    /// The ledger transaction created at confirmation, if any.
    pub transaction_id: Option<TransactionId>,
}

impl Sale {
    /// The sale total: sum of the line totals.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items.iter().map(SaleItem::line_total).sum()
    }
}

/// Posting accounts linked to a product, resolved at confirmation time.
#[derive(Debug, Clone, Copy)]
pub struct ProductPostingAccounts {
    /// The COGS expense account to debit.
    pub cogs_account_id: AccountId,
    /// The inventory asset account to credit.
    pub inventory_account_id: AccountId,
}
