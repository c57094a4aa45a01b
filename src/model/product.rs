//! Catalog records: categories and products.
//!
//! `Product` carries the descriptive data and the unit price; the available
//! stock quantity is owned by the inventory ledger and only joined back in
//! when a [`ProductView`] is assembled. Prices are fixed-point
//! [`Decimal`] values, never binary floats, so totals add up exactly.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::id::entity_id;

entity_id!(CategoryId, "category");
entity_id!(ProductId, "product");

/// A product category. `slug` is unique across categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone)]
pub struct Product {
    pub id: ProductId,
    pub category_id: CategoryId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a category.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryCreate {
    pub name: String,
    pub slug: String,
}

/// Payload for creating a product. `quantity` is the initial stock level
/// handed to the inventory ledger.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductCreate {
    pub category_id: CategoryId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub quantity: u32,
}

/// Partial update for a product. `quantity` is an administrative restock and
/// is routed to the inventory ledger rather than stored on the product.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductUpdate {
    pub category_id: Option<CategoryId>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub quantity: Option<u32>,
}

/// Sort orders supported by product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductSort {
    PriceAsc,
    PriceDesc,
    NewestFirst,
    OldestFirst,
}

/// Filters for product listing. All fields combine with logical AND;
/// `search` matches case-insensitively against name and description.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductFilter {
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub category: Option<CategoryId>,
    pub search: Option<String>,
    pub sort: Option<ProductSort>,
}

/// Outward representation of a product: catalog data joined with the current
/// stock level and the resolved category.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub quantity: u32,
    pub category: Category,
    pub created_at: DateTime<Utc>,
}
