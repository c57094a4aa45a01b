//! The product catalog: categories and product records.
//!
//! The catalog owns descriptive data and prices. Stock quantities belong to
//! the inventory ledger; referential-integrity checks against carts and
//! orders happen one level up in [`crate::store::Storefront`], which can see
//! all stores.

use chrono::Utc;

use std::collections::BTreeMap;

use crate::error::StoreError;
use crate::model::product::{
    Category, CategoryCreate, CategoryId, Product, ProductCreate, ProductFilter, ProductId,
    ProductSort, ProductUpdate,
};

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    categories: BTreeMap<CategoryId, Category>,
    products: BTreeMap<ProductId, Product>,
    next_category_id: u32,
    next_product_id: u32,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Categories ---

    /// Creates a category. Name and slug are unique across categories.
    pub fn create_category(&mut self, params: CategoryCreate) -> Result<Category, StoreError> {
        if self
            .categories
            .values()
            .any(|c| c.name == params.name || c.slug == params.slug)
        {
            return Err(StoreError::AlreadyExists(params.slug));
        }
        self.next_category_id += 1;
        let category = Category {
            id: CategoryId::from(self.next_category_id),
            name: params.name,
            slug: params.slug,
        };
        self.categories.insert(category.id, category.clone());
        Ok(category)
    }

    pub fn category(&self, id: CategoryId) -> Result<&Category, StoreError> {
        self.categories
            .get(&id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    pub fn list_categories(&self) -> Vec<Category> {
        self.categories.values().cloned().collect()
    }

    /// Removes a category. The caller must have verified it has no products.
    pub(crate) fn remove_category(&mut self, id: CategoryId) {
        self.categories.remove(&id);
    }

    /// True iff any product references the category.
    pub fn category_in_use(&self, id: CategoryId) -> bool {
        self.products.values().any(|p| p.category_id == id)
    }

    // --- Products ---

    /// Creates a product record. The initial stock quantity is not stored
    /// here; the aggregate hands it to the inventory ledger.
    pub fn create_product(&mut self, params: &ProductCreate) -> Result<ProductId, StoreError> {
        self.category(params.category_id)?;
        self.next_product_id += 1;
        let product = Product {
            id: ProductId::from(self.next_product_id),
            category_id: params.category_id,
            name: params.name.clone(),
            description: params.description.clone(),
            price: params.price,
            created_at: Utc::now(),
        };
        let id = product.id;
        self.products.insert(id, product);
        Ok(id)
    }

    pub fn product(&self, id: ProductId) -> Result<&Product, StoreError> {
        self.products
            .get(&id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Applies the catalog-side fields of a partial update. The `quantity`
    /// field is ignored here; the aggregate routes it to the ledger.
    pub fn update_product(
        &mut self,
        id: ProductId,
        update: &ProductUpdate,
    ) -> Result<(), StoreError> {
        if let Some(category_id) = update.category_id {
            self.category(category_id)?;
        }
        let product = self
            .products
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if let Some(category_id) = update.category_id {
            product.category_id = category_id;
        }
        if let Some(name) = &update.name {
            product.name = name.clone();
        }
        if let Some(description) = &update.description {
            product.description = description.clone();
        }
        if let Some(price) = update.price {
            product.price = price;
        }
        Ok(())
    }

    /// Removes a product record. The caller must have verified no cart or
    /// order items reference it.
    pub(crate) fn remove_product(&mut self, id: ProductId) {
        self.products.remove(&id);
    }

    /// Lists products matching `filter`, sorted as requested (id order when
    /// no sort is given).
    pub fn list_products(&self, filter: &ProductFilter) -> Vec<&Product> {
        let needle = filter.search.as_ref().map(|s| s.to_lowercase());
        let mut matches: Vec<&Product> = self
            .products
            .values()
            .filter(|p| filter.min_price.is_none_or(|min| p.price >= min))
            .filter(|p| filter.max_price.is_none_or(|max| p.price <= max))
            .filter(|p| filter.category.is_none_or(|c| p.category_id == c))
            .filter(|p| {
                needle.as_ref().is_none_or(|q| {
                    p.name.to_lowercase().contains(q) || p.description.to_lowercase().contains(q)
                })
            })
            .collect();

        match filter.sort {
            Some(ProductSort::PriceAsc) => matches.sort_by(|a, b| a.price.cmp(&b.price)),
            Some(ProductSort::PriceDesc) => matches.sort_by(|a, b| b.price.cmp(&a.price)),
            Some(ProductSort::NewestFirst) => {
                matches.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)))
            }
            Some(ProductSort::OldestFirst) => {
                matches.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)))
            }
            None => {}
        }
        matches
    }
}
