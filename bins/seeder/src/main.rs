//! Development seeder.
//!
//! Builds an in-memory company from scratch: a small chart of accounts,
//! one product, and a purchase/sale trading cycle, then prints the
//! resulting financial reports and walks a bank reconciliation.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use chrono::{Duration, Utc};
use ledgerly_core::ledger::types::AccountType;
use ledgerly_core::sales::types::{PaymentType, SaleItem};
use ledgerly_shared::AppConfig;
use ledgerly_shared::types::{AccountId, PartyId, ProductId, WarehouseId};
use ledgerly_store::repositories::account::CreateAccountInput;
use ledgerly_store::repositories::catalog::CreateProductInput;
use ledgerly_store::repositories::sale::CreateSaleInput;
use ledgerly_store::{
    AccountRepository, InventoryRepository, MemoryStore, PartyRepository, ProductRepository,
    ReconciliationRepository, ReportRepository, SaleRepository, WarehouseRepository,
};
use rust_decimal_macros::dec;
use tracing_subscriber::EnvFilter;

/// Chart of accounts seeded for development.
const CHART: &[(&str, &str, AccountType)] = &[
    ("1000", "Cash", AccountType::Asset),
    ("1100", "Accounts Receivable", AccountType::Asset),
    ("1200", "Inventory", AccountType::Asset),
    ("2000", "Accounts Payable", AccountType::Liability),
    ("3000", "Owner's Capital", AccountType::Equity),
    ("4000", "Sales Revenue", AccountType::Revenue),
    ("5000", "Cost of Goods Sold", AccountType::Expense),
];

struct Seeded {
    cash: AccountId,
    product: ProductId,
    warehouse: WarehouseId,
    customer: PartyId,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::load().unwrap_or_else(|err| {
        tracing::warn!(%err, "could not load configuration, using defaults");
        AppConfig::default()
    });
    tracing::info!(company = %config.company.name, currency = %config.company.base_currency, "seeding");

    let store = MemoryStore::new();
    let seeded = seed_master_data(&store, &config)?;
    run_trading_cycle(&store, &seeded)?;
    print_reports(&store)?;
    reconcile_cash(&store, seeded.cash)?;

    tracing::info!("seeding complete");
    Ok(())
}

fn seed_master_data(store: &MemoryStore, config: &AppConfig) -> anyhow::Result<Seeded> {
    for (code, name, account_type) in CHART {
        AccountRepository::create(
            store,
            CreateAccountInput {
                code: (*code).to_string(),
                name: (*name).to_string(),
                account_type: *account_type,
                parent_id: None,
            },
        )
        .with_context(|| format!("seeding account {code}"))?;
    }
    store.configure_posting(&config.posting)?;

    let inventory = AccountRepository::get_by_code(store, "1200")?.id;
    let cogs = AccountRepository::get_by_code(store, "5000")?.id;
    let cash = AccountRepository::get_by_code(store, &config.posting.cash_account_code)?.id;

    let warehouse = WarehouseRepository::create(store, "Main Warehouse")?.id;
    let customer = PartyRepository::create(store, "Acme Ltd")?.id;
    let product = ProductRepository::create(
        store,
        CreateProductInput {
            name: "Widget".to_string(),
            cost_price: dec!(5.00),
            selling_price: dec!(20.00),
            inventory_account_id: inventory,
            cogs_account_id: cogs,
        },
    )?
    .id;

    Ok(Seeded {
        cash,
        product,
        warehouse,
        customer,
    })
}

/// Two purchases at different costs, then a confirmed cash sale.
fn run_trading_cycle(store: &MemoryStore, seeded: &Seeded) -> anyhow::Result<()> {
    let today = Utc::now().date_naive();

    InventoryRepository::apply_purchase(
        store,
        seeded.product,
        seeded.warehouse,
        dec!(10),
        dec!(5.00),
        today - Duration::days(14),
        None,
    )?;
    InventoryRepository::apply_purchase(
        store,
        seeded.product,
        seeded.warehouse,
        dec!(10),
        dec!(7.00),
        today - Duration::days(7),
        None,
    )?;

    let sale = SaleRepository::create_draft(
        store,
        CreateSaleInput {
            customer_id: seeded.customer,
            date: today - Duration::days(3),
            payment_type: PaymentType::Cash,
            items: vec![SaleItem {
                product_id: seeded.product,
                warehouse_id: seeded.warehouse,
                quantity: dec!(5),
                unit_price: dec!(20.00),
            }],
        },
    )?;
    SaleRepository::confirm(store, sale.id)?;

    if let Some(level) = InventoryRepository::stock_level(store, seeded.product, seeded.warehouse) {
        tracing::info!(
            quantity = %level.quantity,
            average_cost = %level.average_cost,
            value = %level.total_value(),
            "stock after trading cycle"
        );
    }
    Ok(())
}

fn print_reports(store: &MemoryStore) -> anyhow::Result<()> {
    let today = Utc::now().date_naive();
    let month_ago = today - Duration::days(30);

    let trial = ReportRepository::trial_balance(store, today);
    println!("=== Trial Balance ===\n{}", serde_json::to_string_pretty(&trial)?);

    let income = ReportRepository::income_statement(store, month_ago, today)?;
    println!(
        "=== Income Statement ===\n{}",
        serde_json::to_string_pretty(&income)?
    );

    let sheet = ReportRepository::balance_sheet(store, today);
    println!("=== Balance Sheet ===\n{}", serde_json::to_string_pretty(&sheet)?);
    Ok(())
}

/// Opens a reconciliation against a pretend bank statement and completes it.
fn reconcile_cash(store: &MemoryStore, cash: AccountId) -> anyhow::Result<()> {
    let today = Utc::now().date_naive();

    let reconciliation = ReconciliationRepository::open(store, cash, today, dec!(100.00))?;
    tracing::info!(
        book = %reconciliation.book_balance,
        statement = %reconciliation.statement_balance,
        difference = %reconciliation.difference,
        "reconciliation opened"
    );

    ReconciliationRepository::add_item(
        store,
        reconciliation.id,
        today - Duration::days(3),
        "Customer payment",
        dec!(100.00),
    )?;
    ReconciliationRepository::complete(store, reconciliation.id)?;
    Ok(())
}
