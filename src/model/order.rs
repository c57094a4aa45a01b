//! Order records.
//!
//! An order is an immutable snapshot of a completed checkout: each line item
//! captures the product's unit price at order time, so later catalog price
//! changes never alter historical orders. Only the status field may change
//! after creation, and only along the allowed transitions.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::id::entity_id;
use crate::model::identity::UserId;
use crate::model::product::{ProductId, ProductView};

entity_id!(OrderId, "order");
entity_id!(OrderItemId, "order_item");

/// Order lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Whether `self -> next` is an allowed lifecycle transition.
    ///
    /// The forward chain is pending -> processing -> shipped -> delivered;
    /// pending and processing orders may also be cancelled.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Processing)
                | (Processing, Shipped)
                | (Shipped, Delivered)
                | (Pending, Cancelled)
                | (Processing, Cancelled)
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// A line item with the unit price captured at order time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub price: Decimal,
}

#[derive(Debug, Clone)]
pub struct Order {
    pub id: OrderId,
    pub user: UserId,
    pub total: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub items: Vec<OrderItem>,
}

/// Outward representation of an order line: the live product reference plus
/// the captured quantity and unit price.
#[derive(Debug, Clone, Serialize)]
pub struct OrderItemView {
    pub id: OrderItemId,
    pub product: ProductView,
    pub quantity: u32,
    pub price: Decimal,
}

/// Outward representation of an order with its items.
#[derive(Debug, Clone, Serialize)]
pub struct OrderView {
    pub id: OrderId,
    pub user: UserId,
    pub total: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub items: Vec<OrderItemView>,
}

#[cfg(test)]
mod tests {
    use super::OrderStatus::*;

    #[test]
    fn forward_chain_is_allowed() {
        assert!(Pending.can_transition_to(Processing));
        assert!(Processing.can_transition_to(Shipped));
        assert!(Shipped.can_transition_to(Delivered));
    }

    #[test]
    fn cancellation_only_before_shipping() {
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Processing.can_transition_to(Cancelled));
        assert!(!Shipped.can_transition_to(Cancelled));
        assert!(!Delivered.can_transition_to(Cancelled));
    }

    #[test]
    fn no_skipping_or_reviving() {
        assert!(!Pending.can_transition_to(Shipped));
        assert!(!Delivered.can_transition_to(Pending));
        assert!(!Cancelled.can_transition_to(Processing));
    }
}
