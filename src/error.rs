//! Storefront error taxonomy.
//!
//! One shared enum rather than one per component: the checkout coordinator
//! aborts on the first error from any collaborator and forwards it to the
//! caller unchanged, so every layer speaks the same type. All variants are
//! recoverable; an HTTP layer would map validation errors to the 4xx family,
//! `NotFound` to 404 and `Forbidden` to 403.

use thiserror::Error;

use crate::model::order::OrderStatus;

/// Errors surfaced by storefront operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    /// A cart line was requested with a quantity below 1.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// The requested quantity exceeds the available stock. Carries the
    /// offending product's name so callers can report it.
    #[error("Insufficient stock for {product}: requested {requested}, available {available}")]
    InsufficientStock {
        product: String,
        requested: u32,
        available: u32,
    },

    /// Checkout was attempted on a cart with no items.
    #[error("Cart is empty")]
    EmptyCart,

    /// The referenced record does not exist or is not visible to the caller.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A privileged operation was attempted by a non-privileged caller.
    #[error("Forbidden")]
    Forbidden,

    /// A unique field (category name or slug) is already taken.
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// The product is referenced by cart or order items and cannot be deleted.
    #[error("Product {0} is referenced by carts or orders")]
    ProductInUse(String),

    /// The category still has products and cannot be deleted.
    #[error("Category {0} still has products")]
    CategoryInUse(String),

    /// The requested order status change is not an allowed transition.
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidStatusTransition { from: OrderStatus, to: OrderStatus },

    /// The store actor is no longer accepting requests.
    #[error("Store service closed")]
    ServiceClosed,

    /// The store actor dropped the response channel mid-request.
    #[error("Store service dropped response channel")]
    ServiceDropped,
}
