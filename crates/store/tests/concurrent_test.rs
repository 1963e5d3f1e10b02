//! Concurrency: two confirmations racing for the same stock.

use std::sync::Arc;
use std::thread;

use chrono::NaiveDate;
use ledgerly_core::ledger::types::AccountType;
use ledgerly_core::sales::types::{PaymentType, SaleItem, SaleStatus};
use ledgerly_shared::AppError;
use ledgerly_shared::config::PostingConfig;
use ledgerly_store::repositories::account::CreateAccountInput;
use ledgerly_store::repositories::catalog::CreateProductInput;
use ledgerly_store::repositories::sale::CreateSaleInput;
use ledgerly_store::{
    AccountRepository, InventoryRepository, MemoryStore, PartyRepository, ProductRepository,
    SaleRepository, WarehouseRepository,
};
use rust_decimal_macros::dec;

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, day).unwrap()
}

#[test]
fn test_racing_confirmations_never_oversell() {
    let store = Arc::new(MemoryStore::new());

    for (code, name, account_type) in [
        ("1000", "Cash", AccountType::Asset),
        ("1100", "Accounts Receivable", AccountType::Asset),
        ("1200", "Inventory", AccountType::Asset),
        ("4000", "Sales Revenue", AccountType::Revenue),
        ("5000", "Cost of Goods Sold", AccountType::Expense),
    ] {
        AccountRepository::create(
            &store,
            CreateAccountInput {
                code: code.to_string(),
                name: name.to_string(),
                account_type,
                parent_id: None,
            },
        )
        .unwrap();
    }
    store.configure_posting(&PostingConfig::default()).unwrap();

    let inventory = AccountRepository::get_by_code(&store, "1200").unwrap().id;
    let cogs = AccountRepository::get_by_code(&store, "5000").unwrap().id;
    let warehouse = WarehouseRepository::create(&store, "Main").unwrap().id;
    let customer = PartyRepository::create(&store, "Acme Ltd").unwrap().id;
    let product = ProductRepository::create(
        &store,
        CreateProductInput {
            name: "Widget".to_string(),
            cost_price: dec!(5),
            selling_price: dec!(20),
            inventory_account_id: inventory,
            cogs_account_id: cogs,
        },
    )
    .unwrap()
    .id;

    // Stock sufficient for exactly one of the two sales.
    InventoryRepository::apply_purchase(
        &store, product, warehouse, dec!(10), dec!(5), date(1), None,
    )
    .unwrap();

    let sale_ids: Vec<_> = (0..2)
        .map(|_| {
            SaleRepository::create_draft(
                &store,
                CreateSaleInput {
                    customer_id: customer,
                    date: date(2),
                    payment_type: PaymentType::Cash,
                    items: vec![SaleItem {
                        product_id: product,
                        warehouse_id: warehouse,
                        quantity: dec!(10),
                        unit_price: dec!(20),
                    }],
                },
            )
            .unwrap()
            .id
        })
        .collect();

    let handles: Vec<_> = sale_ids
        .iter()
        .map(|&sale_id| {
            let store = Arc::clone(&store);
            thread::spawn(move || SaleRepository::confirm(&store, sale_id))
        })
        .collect();
    let results: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().expect("confirmation thread panicked"))
        .collect();

    let confirmed = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(confirmed, 1, "exactly one confirmation must win");
    let short = results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .next()
        .unwrap();
    assert!(matches!(short, AppError::InsufficientStock { .. }));

    // The loser left no trace: stock is exactly zero, one sale is still
    // draft, and only one sale transaction exists.
    let level = InventoryRepository::stock_level(&store, product, warehouse).unwrap();
    assert_eq!(level.quantity, dec!(0));

    let statuses: Vec<SaleStatus> = sale_ids
        .iter()
        .map(|&id| SaleRepository::get(&store, id).unwrap().status)
        .collect();
    assert_eq!(
        statuses
            .iter()
            .filter(|s| **s == SaleStatus::Confirmed)
            .count(),
        1
    );
    assert_eq!(
        statuses.iter().filter(|s| **s == SaleStatus::Draft).count(),
        1
    );

    let movements = InventoryRepository::movements_for(&store, product);
    // One purchase, one issue.
    assert_eq!(movements.len(), 2);
}
