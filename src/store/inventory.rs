//! The inventory ledger: single source of truth for product stock.
//!
//! Stock levels live here, not on the product record, so there is exactly one
//! owner for the quantity that checkout races over. [`InventoryLedger::decrement`]
//! is the only stock-reducing operation in the system; it re-checks
//! availability at the moment of decrement, so a level can never go negative.
//! Serialization of concurrent decrements is provided by the store actor's
//! mailbox (see [`crate::service`]), which processes one request at a time.

use std::collections::BTreeMap;

use crate::error::StoreError;
use crate::model::product::{Product, ProductId};

#[derive(Debug, Clone, Default)]
pub struct InventoryLedger {
    levels: BTreeMap<ProductId, u32>,
}

impl InventoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current stock level; unknown products report zero.
    pub fn level(&self, product: ProductId) -> u32 {
        self.levels.get(&product).copied().unwrap_or(0)
    }

    /// True iff `requested` units are available right now.
    pub fn check_available(&self, product: ProductId, requested: u32) -> bool {
        requested <= self.level(product)
    }

    /// Reduces stock by `qty`, returning the new level.
    ///
    /// Fails with [`StoreError::InsufficientStock`] if `qty` exceeds the
    /// stock at the moment of the call. Takes the product record (not just
    /// the id) so the error names the offending product.
    pub fn decrement(&mut self, product: &Product, qty: u32) -> Result<u32, StoreError> {
        let available = self.level(product.id);
        if qty > available {
            return Err(StoreError::InsufficientStock {
                product: product.name.clone(),
                requested: qty,
                available,
            });
        }
        let level = available - qty;
        self.levels.insert(product.id, level);
        Ok(level)
    }

    /// Administrative restock / initial stock. Distinct from [`Self::decrement`]:
    /// this sets an absolute level and is only reachable from catalog
    /// create/update.
    pub fn set_level(&mut self, product: ProductId, qty: u32) {
        self.levels.insert(product, qty);
    }

    /// Drops the ledger row for a deleted product.
    pub fn remove(&mut self, product: ProductId) {
        self.levels.remove(&product);
    }
}
