//! Master-data repositories: products, warehouses, parties.
//!
//! Full master-data CRUD lives outside the core; these cover what the
//! ledger and inventory operations need to reference.

use ledgerly_shared::types::{AccountId, PartyId, ProductId, WarehouseId};
use ledgerly_shared::{AppError, AppResult};
use rust_decimal::Decimal;

use crate::entities::{Party, Product, Warehouse};
use crate::store::{MemoryStore, Tables};

/// Input for creating a product.
#[derive(Debug, Clone)]
pub struct CreateProductInput {
    /// Product name.
    pub name: String,
    /// Default cost price.
    pub cost_price: Decimal,
    /// Selling price per unit.
    pub selling_price: Decimal,
    /// Linked inventory asset account.
    pub inventory_account_id: AccountId,
    /// Linked COGS expense account.
    pub cogs_account_id: AccountId,
}

/// Repository for products.
pub struct ProductRepository;

impl ProductRepository {
    /// Creates a product.
    ///
    /// # Errors
    ///
    /// Returns a validation error for negative prices and not-found when a
    /// linked posting account does not exist.
    pub fn create(store: &MemoryStore, input: CreateProductInput) -> AppResult<Product> {
        if input.name.trim().is_empty() {
            return Err(AppError::Validation("product name is required".to_string()));
        }
        if input.cost_price < Decimal::ZERO || input.selling_price < Decimal::ZERO {
            return Err(AppError::Validation(
                "product prices must not be negative".to_string(),
            ));
        }

        let mut tables = store.write();
        require_account(&tables, input.inventory_account_id)?;
        require_account(&tables, input.cogs_account_id)?;

        let product = Product {
            id: ProductId::new(),
            name: input.name,
            cost_price: input.cost_price,
            selling_price: input.selling_price,
            inventory_account_id: input.inventory_account_id,
            cogs_account_id: input.cogs_account_id,
        };
        tables.products.insert(product.id, product.clone());

        tracing::debug!(id = %product.id, name = %product.name, "product created");
        Ok(product)
    }

    /// Fetches a product.
    ///
    /// # Errors
    ///
    /// Returns not-found for an unknown id.
    pub fn get(store: &MemoryStore, id: ProductId) -> AppResult<Product> {
        store
            .read()
            .products
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("product not found: {id}")))
    }
}

/// Repository for warehouses.
pub struct WarehouseRepository;

impl WarehouseRepository {
    /// Creates a warehouse.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty name.
    pub fn create(store: &MemoryStore, name: &str) -> AppResult<Warehouse> {
        if name.trim().is_empty() {
            return Err(AppError::Validation(
                "warehouse name is required".to_string(),
            ));
        }
        let warehouse = Warehouse {
            id: WarehouseId::new(),
            name: name.to_string(),
        };
        store
            .write()
            .warehouses
            .insert(warehouse.id, warehouse.clone());
        Ok(warehouse)
    }
}

/// Repository for customers and vendors.
pub struct PartyRepository;

impl PartyRepository {
    /// Creates a party.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty name.
    pub fn create(store: &MemoryStore, name: &str) -> AppResult<Party> {
        if name.trim().is_empty() {
            return Err(AppError::Validation("party name is required".to_string()));
        }
        let party = Party {
            id: PartyId::new(),
            name: name.to_string(),
        };
        store.write().parties.insert(party.id, party.clone());
        Ok(party)
    }
}

fn require_account(tables: &Tables, id: AccountId) -> AppResult<()> {
    if tables.live_account(id).is_none() {
        return Err(AppError::NotFound(format!("account not found: {id}")));
    }
    Ok(())
}
