//! The order store: persistence and retrieval of completed purchases.
//!
//! Orders are append-only. After creation nothing but the status field ever
//! changes, and status only along the transitions allowed by
//! [`OrderStatus::can_transition_to`].

use chrono::Utc;
use rust_decimal::Decimal;

use crate::error::StoreError;
use crate::model::identity::UserId;
use crate::model::order::{Order, OrderId, OrderItem, OrderItemId, OrderStatus};
use crate::model::product::ProductId;

/// One captured line handed over by the checkout coordinator:
/// (product, quantity, unit price at order time).
pub type OrderLine = (ProductId, u32, Decimal);

#[derive(Debug, Clone, Default)]
pub struct OrderStore {
    orders: Vec<Order>,
    next_order_id: u32,
    next_item_id: u32,
}

impl OrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an order with its captured line items. Only the checkout
    /// coordinator calls this, inside its transaction; there is deliberately
    /// no way to add or mutate items afterwards.
    pub(crate) fn create(&mut self, user: UserId, total: Decimal, lines: Vec<OrderLine>) -> OrderId {
        self.next_order_id += 1;
        let now = Utc::now();
        let items = lines
            .into_iter()
            .map(|(product_id, quantity, price)| {
                self.next_item_id += 1;
                OrderItem {
                    id: OrderItemId::from(self.next_item_id),
                    product_id,
                    quantity,
                    price,
                }
            })
            .collect();
        let order = Order {
            id: OrderId::from(self.next_order_id),
            user,
            total,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
            items,
        };
        let id = order.id;
        self.orders.push(order);
        id
    }

    pub fn get(&self, id: OrderId) -> Result<&Order, StoreError> {
        self.orders
            .iter()
            .find(|o| o.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// The user's orders, newest first.
    pub fn list_for_user(&self, user: UserId) -> Vec<&Order> {
        self.orders.iter().rev().filter(|o| o.user == user).collect()
    }

    /// Every order in the store, newest first. Privilege is checked by the
    /// aggregate before this is reached.
    pub fn list_all(&self) -> Vec<&Order> {
        self.orders.iter().rev().collect()
    }

    /// Applies a status transition, bumping `updated_at`. Total and items are
    /// untouched by design; this is the only post-creation mutation.
    pub fn set_status(&mut self, id: OrderId, next: OrderStatus) -> Result<&Order, StoreError> {
        let order = self
            .orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if !order.status.can_transition_to(next) {
            return Err(StoreError::InvalidStatusTransition {
                from: order.status,
                to: next,
            });
        }
        order.status = next;
        order.updated_at = Utc::now();
        Ok(order)
    }

    /// True iff any order item references the product.
    pub fn references_product(&self, product: ProductId) -> bool {
        self.orders
            .iter()
            .any(|o| o.items.iter().any(|i| i.product_id == product))
    }
}
