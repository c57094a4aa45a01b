//! The cart store: mutable pre-purchase baskets, one per user.
//!
//! Carts are created lazily on first access. Every quantity-changing
//! operation re-validates against the inventory ledger's *current* level;
//! cart contents never reserve stock, so the final arbiter is the checkout
//! re-validation inside its transaction.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::error::StoreError;
use crate::model::cart::{Cart, CartId, CartItem, CartItemId};
use crate::model::identity::UserId;
use crate::model::product::{Product, ProductId};
use crate::store::catalog::Catalog;
use crate::store::inventory::InventoryLedger;

#[derive(Debug, Clone, Default)]
pub struct CartStore {
    carts: BTreeMap<UserId, Cart>,
    next_cart_id: u32,
    next_item_id: u32,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The user's cart, creating an empty one on first access.
    pub fn get_or_create(&mut self, user: UserId) -> &Cart {
        self.ensure_cart(user)
    }

    fn ensure_cart(&mut self, user: UserId) -> &mut Cart {
        match self.carts.entry(user) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                self.next_cart_id += 1;
                entry.insert(Cart {
                    id: CartId::from(self.next_cart_id),
                    user,
                    items: Vec::new(),
                })
            }
        }
    }

    /// The user's cart line items in insertion order; empty when the user
    /// has no cart yet.
    pub fn items(&self, user: UserId) -> Vec<CartItem> {
        self.carts
            .get(&user)
            .map(|c| c.items.clone())
            .unwrap_or_default()
    }

    /// Adds `qty` of `product` to the user's cart.
    ///
    /// Quantities below 1 are rejected with [`StoreError::InvalidQuantity`]
    /// (note the asymmetry with [`Self::update_item`], where a quantity below
    /// 1 removes the line). If the cart already holds a line for the product,
    /// quantities are summed and the *combined* quantity is re-validated
    /// against stock, so a request cannot sneak past the existing line.
    pub fn add_item(
        &mut self,
        user: UserId,
        product: &Product,
        ledger: &InventoryLedger,
        qty: u32,
    ) -> Result<(), StoreError> {
        if qty < 1 {
            return Err(StoreError::InvalidQuantity(qty));
        }
        let available = ledger.level(product.id);
        if qty > available {
            return Err(StoreError::InsufficientStock {
                product: product.name.clone(),
                requested: qty,
                available,
            });
        }

        let next_item_id = &mut self.next_item_id;
        let next_cart_id = &mut self.next_cart_id;
        let cart = match self.carts.entry(user) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                *next_cart_id += 1;
                entry.insert(Cart {
                    id: CartId::from(*next_cart_id),
                    user,
                    items: Vec::new(),
                })
            }
        };

        if let Some(item) = cart.items.iter_mut().find(|i| i.product_id == product.id) {
            let combined = item.quantity + qty;
            if combined > available {
                return Err(StoreError::InsufficientStock {
                    product: product.name.clone(),
                    requested: combined,
                    available,
                });
            }
            item.quantity = combined;
        } else {
            *next_item_id += 1;
            cart.items.push(CartItem {
                id: CartItemId::from(*next_item_id),
                product_id: product.id,
                quantity: qty,
            });
        }
        Ok(())
    }

    /// Sets the quantity of an existing line.
    ///
    /// The line must exist and belong to the user's cart
    /// ([`StoreError::NotFound`] otherwise). A new quantity below 1 removes
    /// the line; any other value is re-validated against current stock.
    pub fn update_item(
        &mut self,
        user: UserId,
        item_id: CartItemId,
        new_qty: u32,
        catalog: &Catalog,
        ledger: &InventoryLedger,
    ) -> Result<(), StoreError> {
        let cart = self
            .carts
            .get_mut(&user)
            .ok_or_else(|| StoreError::NotFound(item_id.to_string()))?;
        let index = cart
            .items
            .iter()
            .position(|i| i.id == item_id)
            .ok_or_else(|| StoreError::NotFound(item_id.to_string()))?;

        if new_qty < 1 {
            cart.items.remove(index);
            return Ok(());
        }

        let product = catalog.product(cart.items[index].product_id)?;
        let available = ledger.level(product.id);
        if new_qty > available {
            return Err(StoreError::InsufficientStock {
                product: product.name.clone(),
                requested: new_qty,
                available,
            });
        }
        cart.items[index].quantity = new_qty;
        Ok(())
    }

    /// Removes a line unconditionally; [`StoreError::NotFound`] when absent.
    pub fn remove_item(&mut self, user: UserId, item_id: CartItemId) -> Result<(), StoreError> {
        let cart = self
            .carts
            .get_mut(&user)
            .ok_or_else(|| StoreError::NotFound(item_id.to_string()))?;
        let index = cart
            .items
            .iter()
            .position(|i| i.id == item_id)
            .ok_or_else(|| StoreError::NotFound(item_id.to_string()))?;
        cart.items.remove(index);
        Ok(())
    }

    /// Fresh subtotal over live catalog prices. Computed on every call —
    /// product prices may change between calls, so the value is never cached.
    pub fn subtotal(&self, user: UserId, catalog: &Catalog) -> Result<Decimal, StoreError> {
        let mut total = Decimal::ZERO;
        if let Some(cart) = self.carts.get(&user) {
            for item in &cart.items {
                let product = catalog.product(item.product_id)?;
                total += product.price * Decimal::from(item.quantity);
            }
        }
        Ok(total)
    }

    /// Empties the user's cart. Used by checkout after order creation.
    pub fn clear(&mut self, user: UserId) {
        if let Some(cart) = self.carts.get_mut(&user) {
            cart.items.clear();
        }
    }

    /// True iff any cart holds a line for the product.
    pub fn references_product(&self, product: ProductId) -> bool {
        self.carts
            .values()
            .any(|c| c.items.iter().any(|i| i.product_id == product))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::product::{CategoryCreate, ProductCreate};
    use rust_decimal_macros::dec;

    struct Fixture {
        catalog: Catalog,
        ledger: InventoryLedger,
        carts: CartStore,
        product: Product,
    }

    fn fixture(stock: u32) -> Fixture {
        let mut catalog = Catalog::new();
        let category = catalog
            .create_category(CategoryCreate {
                name: "Tools".to_string(),
                slug: "tools".to_string(),
            })
            .unwrap();
        let id = catalog
            .create_product(&ProductCreate {
                category_id: category.id,
                name: "Hammer".to_string(),
                description: String::new(),
                price: dec!(15.00),
                quantity: stock,
            })
            .unwrap();
        let mut ledger = InventoryLedger::new();
        ledger.set_level(id, stock);
        let product = catalog.product(id).unwrap().clone();
        Fixture {
            catalog,
            ledger,
            carts: CartStore::new(),
            product,
        }
    }

    const ALICE: UserId = UserId(1);

    #[test]
    fn add_with_zero_quantity_is_invalid() {
        let mut f = fixture(5);
        let err = f
            .carts
            .add_item(ALICE, &f.product, &f.ledger, 0)
            .unwrap_err();
        assert_eq!(err, StoreError::InvalidQuantity(0));
    }

    #[test]
    fn add_at_stock_boundary() {
        let mut f = fixture(5);
        // requested == available succeeds
        assert!(f.carts.add_item(ALICE, &f.product, &f.ledger, 5).is_ok());
        f.carts.clear(ALICE);
        // requested == available + 1 fails
        let err = f
            .carts
            .add_item(ALICE, &f.product, &f.ledger, 6)
            .unwrap_err();
        assert!(matches!(err, StoreError::InsufficientStock { requested: 6, available: 5, .. }));
    }

    #[test]
    fn merged_line_is_revalidated_against_stock() {
        let mut f = fixture(5);
        f.carts.add_item(ALICE, &f.product, &f.ledger, 3).unwrap();
        // 3 + 3 > 5: the combined quantity must be rejected even though the
        // increment alone would fit.
        let err = f
            .carts
            .add_item(ALICE, &f.product, &f.ledger, 3)
            .unwrap_err();
        assert!(matches!(err, StoreError::InsufficientStock { requested: 6, available: 5, .. }));
        // 3 + 2 == 5 lands exactly on the boundary.
        f.carts.add_item(ALICE, &f.product, &f.ledger, 2).unwrap();
        let items = f.carts.items(ALICE);
        assert_eq!(items.len(), 1, "merging must not create a second line");
        assert_eq!(items[0].quantity, 5);
    }

    #[test]
    fn update_to_zero_removes_the_line() {
        let mut f = fixture(5);
        f.carts.add_item(ALICE, &f.product, &f.ledger, 2).unwrap();
        let item_id = f.carts.items(ALICE)[0].id;

        f.carts
            .update_item(ALICE, item_id, 0, &f.catalog, &f.ledger)
            .unwrap();
        assert!(f.carts.items(ALICE).is_empty());

        // The line is gone, so addressing it again is NotFound.
        let err = f
            .carts
            .update_item(ALICE, item_id, 1, &f.catalog, &f.ledger)
            .unwrap_err();
        assert_eq!(err, StoreError::NotFound(item_id.to_string()));
    }

    #[test]
    fn update_is_validated_against_current_stock() {
        let mut f = fixture(5);
        f.carts.add_item(ALICE, &f.product, &f.ledger, 2).unwrap();
        let item_id = f.carts.items(ALICE)[0].id;

        let err = f
            .carts
            .update_item(ALICE, item_id, 6, &f.catalog, &f.ledger)
            .unwrap_err();
        assert!(matches!(err, StoreError::InsufficientStock { requested: 6, .. }));

        f.carts
            .update_item(ALICE, item_id, 5, &f.catalog, &f.ledger)
            .unwrap();
        assert_eq!(f.carts.items(ALICE)[0].quantity, 5);
    }

    #[test]
    fn remove_missing_item_is_not_found() {
        let mut f = fixture(5);
        let err = f.carts.remove_item(ALICE, CartItemId(9)).unwrap_err();
        assert_eq!(err, StoreError::NotFound("cart_item_9".to_string()));
    }

    #[test]
    fn subtotal_follows_live_prices() {
        let mut f = fixture(5);
        f.carts.add_item(ALICE, &f.product, &f.ledger, 3).unwrap();
        assert_eq!(f.carts.subtotal(ALICE, &f.catalog).unwrap(), dec!(45.00));

        // A price change is reflected on the next call; nothing is cached.
        f.catalog
            .update_product(
                f.product.id,
                &crate::model::product::ProductUpdate {
                    price: Some(dec!(20.00)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(f.carts.subtotal(ALICE, &f.catalog).unwrap(), dec!(60.00));
    }

    #[test]
    fn carts_are_per_user() {
        let mut f = fixture(5);
        f.carts.add_item(ALICE, &f.product, &f.ledger, 2).unwrap();
        assert!(f.carts.items(UserId(2)).is_empty());
        let bob_cart = f.carts.get_or_create(UserId(2)).id;
        assert_ne!(bob_cart, f.carts.get_or_create(ALICE).id);
    }
}
