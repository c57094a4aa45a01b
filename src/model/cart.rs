//! Cart records.
//!
//! One cart per user, created lazily on first access. Line items keep their
//! insertion order so multi-item operations process them deterministically.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::model::id::entity_id;
use crate::model::identity::UserId;
use crate::model::product::{ProductId, ProductView};

entity_id!(CartId, "cart");
entity_id!(CartItemId, "cart_item");

/// A single (cart, product) line. The pair is unique within a cart; adding
/// the same product again merges quantities instead of creating a new line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub id: CartItemId,
    pub product_id: ProductId,
    pub quantity: u32,
}

#[derive(Debug, Clone)]
pub struct Cart {
    pub id: CartId,
    pub user: UserId,
    pub items: Vec<CartItem>,
}

/// Outward representation of a cart line with the live product joined in.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    pub id: CartItemId,
    pub product: ProductView,
    pub quantity: u32,
}

/// Outward representation of a cart. `total` is computed fresh from live
/// product prices on every assembly, never cached.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub id: CartId,
    pub user: UserId,
    pub items: Vec<CartItemView>,
    pub total: Decimal,
}
