//! Storefront state and its component stores.
//!
//! All mutable state lives in one [`Storefront`] value: the catalog, the
//! inventory ledger, the cart store and the order store. The value is owned
//! by a single actor task (see [`crate::service`]), so every operation here
//! runs with exclusive access and no locks.
//!
//! [`Storefront`] is the aggregate layer: it coordinates operations that span
//! more than one component (product creation feeding the ledger,
//! restrict-on-delete checks against carts and orders), enforces the
//! owner-or-staff access policy via [`Caller`], and assembles the outward
//! view types. Multi-step mutations that must be all-or-nothing run inside a
//! [`Transaction`] scope.

pub mod carts;
pub mod catalog;
pub mod inventory;
pub mod orders;

use std::ops::{Deref, DerefMut};

use crate::error::StoreError;
use crate::model::cart::{CartId, CartItem, CartItemId, CartItemView, CartView};
use crate::model::identity::{Caller, UserId};
use crate::model::order::{Order, OrderId, OrderItemView, OrderStatus, OrderView};
use crate::model::product::{
    Category, CategoryCreate, CategoryId, Product, ProductCreate, ProductFilter, ProductId,
    ProductUpdate, ProductView,
};

pub use carts::CartStore;
pub use catalog::Catalog;
pub use inventory::InventoryLedger;
pub use orders::OrderStore;

/// The complete storefront state.
#[derive(Debug, Clone, Default)]
pub struct Storefront {
    pub catalog: Catalog,
    pub inventory: InventoryLedger,
    pub carts: CartStore,
    pub orders: OrderStore,
}

impl Storefront {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Catalog operations ---
    //
    // Create is open to any authenticated caller; update and delete are
    // staff-only (the policy the external identity layer expects).

    pub fn create_category(
        &mut self,
        _caller: &Caller,
        params: CategoryCreate,
    ) -> Result<Category, StoreError> {
        self.catalog.create_category(params)
    }

    pub fn list_categories(&self) -> Vec<Category> {
        self.catalog.list_categories()
    }

    pub fn get_category(&self, id: CategoryId) -> Result<Category, StoreError> {
        self.catalog.category(id).cloned()
    }

    /// Deletes a category unless products still reference it.
    pub fn delete_category(&mut self, caller: &Caller, id: CategoryId) -> Result<(), StoreError> {
        caller.require_staff()?;
        let name = self.catalog.category(id)?.name.clone();
        if self.catalog.category_in_use(id) {
            return Err(StoreError::CategoryInUse(name));
        }
        self.catalog.remove_category(id);
        Ok(())
    }

    pub fn create_product(
        &mut self,
        _caller: &Caller,
        params: ProductCreate,
    ) -> Result<ProductView, StoreError> {
        let id = self.catalog.create_product(&params)?;
        self.inventory.set_level(id, params.quantity);
        self.get_product(id)
    }

    pub fn update_product(
        &mut self,
        caller: &Caller,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<ProductView, StoreError> {
        caller.require_staff()?;
        self.catalog.update_product(id, &update)?;
        if let Some(quantity) = update.quantity {
            // Administrative restock; decrement stays the only path that
            // reduces stock during a purchase.
            self.inventory.set_level(id, quantity);
        }
        self.get_product(id)
    }

    /// Deletes a product unless cart or order items still reference it, so
    /// historical orders are never left pointing at nothing.
    pub fn delete_product(&mut self, caller: &Caller, id: ProductId) -> Result<(), StoreError> {
        caller.require_staff()?;
        let name = self.catalog.product(id)?.name.clone();
        if self.carts.references_product(id) || self.orders.references_product(id) {
            return Err(StoreError::ProductInUse(name));
        }
        self.catalog.remove_product(id);
        self.inventory.remove(id);
        Ok(())
    }

    pub fn get_product(&self, id: ProductId) -> Result<ProductView, StoreError> {
        let product = self.catalog.product(id)?;
        self.product_view(product)
    }

    pub fn list_products(&self, filter: &ProductFilter) -> Result<Vec<ProductView>, StoreError> {
        self.catalog
            .list_products(filter)
            .into_iter()
            .map(|p| self.product_view(p))
            .collect()
    }

    // --- Cart operations ---

    /// The caller's cart with items and a freshly computed total, created
    /// lazily on first access.
    pub fn get_cart(&mut self, caller: &Caller) -> Result<CartView, StoreError> {
        let cart = self.carts.get_or_create(caller.user);
        let (id, items) = (cart.id, cart.items.clone());
        self.assemble_cart(id, caller.user, &items)
    }

    pub fn add_cart_item(
        &mut self,
        caller: &Caller,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<CartView, StoreError> {
        let product = self.catalog.product(product_id)?.clone();
        self.carts
            .add_item(caller.user, &product, &self.inventory, quantity)?;
        self.get_cart(caller)
    }

    pub fn update_cart_item(
        &mut self,
        caller: &Caller,
        item_id: CartItemId,
        quantity: u32,
    ) -> Result<CartView, StoreError> {
        self.carts
            .update_item(caller.user, item_id, quantity, &self.catalog, &self.inventory)?;
        self.get_cart(caller)
    }

    pub fn remove_cart_item(
        &mut self,
        caller: &Caller,
        item_id: CartItemId,
    ) -> Result<CartView, StoreError> {
        self.carts.remove_item(caller.user, item_id)?;
        self.get_cart(caller)
    }

    // --- Order operations ---

    /// A single order, visible to its owner or staff. A foreign order id
    /// reports [`StoreError::NotFound`] rather than `Forbidden` so ids don't
    /// leak existence across users.
    pub fn get_order(&self, caller: &Caller, id: OrderId) -> Result<OrderView, StoreError> {
        let order = self.orders.get(id)?;
        if !caller.can_view(order.user) {
            return Err(StoreError::NotFound(id.to_string()));
        }
        self.order_view(order)
    }

    /// The caller's orders, newest first.
    pub fn list_orders(&self, caller: &Caller) -> Result<Vec<OrderView>, StoreError> {
        self.orders
            .list_for_user(caller.user)
            .into_iter()
            .map(|o| self.order_view(o))
            .collect()
    }

    /// Every order in the store, newest first. Staff only.
    pub fn list_all_orders(&self, caller: &Caller) -> Result<Vec<OrderView>, StoreError> {
        caller.require_staff()?;
        self.orders
            .list_all()
            .into_iter()
            .map(|o| self.order_view(o))
            .collect()
    }

    /// Applies an order status transition. Staff only.
    pub fn update_order_status(
        &mut self,
        caller: &Caller,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<OrderView, StoreError> {
        caller.require_staff()?;
        let order = self.orders.set_status(id, status)?.clone();
        self.order_view(&order)
    }

    // --- View assembly ---

    pub fn product_view(&self, product: &Product) -> Result<ProductView, StoreError> {
        let category = self.catalog.category(product.category_id)?.clone();
        Ok(ProductView {
            id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            quantity: self.inventory.level(product.id),
            category,
            created_at: product.created_at,
        })
    }

    pub fn order_view(&self, order: &Order) -> Result<OrderView, StoreError> {
        let items = order
            .items
            .iter()
            .map(|item| {
                let product = self.catalog.product(item.product_id)?;
                Ok(OrderItemView {
                    id: item.id,
                    product: self.product_view(product)?,
                    quantity: item.quantity,
                    price: item.price,
                })
            })
            .collect::<Result<Vec<_>, StoreError>>()?;
        Ok(OrderView {
            id: order.id,
            user: order.user,
            total: order.total,
            status: order.status,
            created_at: order.created_at,
            updated_at: order.updated_at,
            items,
        })
    }

    fn assemble_cart(
        &self,
        id: CartId,
        user: UserId,
        items: &[CartItem],
    ) -> Result<CartView, StoreError> {
        let total = self.carts.subtotal(user, &self.catalog)?;
        let views = items
            .iter()
            .map(|item| {
                let product = self.catalog.product(item.product_id)?;
                Ok(CartItemView {
                    id: item.id,
                    product: self.product_view(product)?,
                    quantity: item.quantity,
                })
            })
            .collect::<Result<Vec<_>, StoreError>>()?;
        Ok(CartView {
            id,
            user,
            items: views,
            total,
        })
    }
}

/// A scoped, all-or-nothing mutation of the [`Storefront`].
///
/// `begin` clones the current state into a working copy; all reads and writes
/// inside the scope go to that copy via `Deref`/`DerefMut`. [`commit`]
/// publishes the copy back in one assignment. Dropping the transaction
/// without committing discards every write, so any early `?` return rolls
/// back automatically and no observer ever sees intermediate state.
///
/// [`commit`]: Transaction::commit
pub struct Transaction<'a> {
    target: &'a mut Storefront,
    working: Storefront,
}

impl<'a> Transaction<'a> {
    pub fn begin(target: &'a mut Storefront) -> Self {
        let working = target.clone();
        Self { target, working }
    }

    /// Publishes all writes made inside the scope.
    pub fn commit(self) {
        *self.target = self.working;
    }
}

impl Deref for Transaction<'_> {
    type Target = Storefront;

    fn deref(&self) -> &Storefront {
        &self.working
    }
}

impl DerefMut for Transaction<'_> {
    fn deref_mut(&mut self) -> &mut Storefront {
        &mut self.working
    }
}
