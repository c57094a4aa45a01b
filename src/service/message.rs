//! Request messages for the store actor.
//!
//! Every operation the storefront exposes is one variant carrying its inputs,
//! the explicit [`Caller`] identity where the operation needs one, and a
//! oneshot `respond_to` channel for the typed reply. The enum is the single
//! wire between [`StoreClient`](crate::service::StoreClient) and
//! [`StoreActor`](crate::service::StoreActor); adding an operation means
//! adding a variant, and the compiler points at every place to update.

use tokio::sync::oneshot;

use crate::error::StoreError;
use crate::model::cart::{CartItemId, CartView};
use crate::model::identity::Caller;
use crate::model::order::{OrderId, OrderStatus, OrderView};
use crate::model::product::{
    Category, CategoryCreate, CategoryId, ProductCreate, ProductFilter, ProductId, ProductUpdate,
    ProductView,
};

/// Type alias for the one-shot response channel used by the store actor.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// A request to the store actor.
#[derive(Debug)]
pub enum StoreRequest {
    // --- Catalog ---
    CreateCategory {
        caller: Caller,
        params: CategoryCreate,
        respond_to: Response<Category>,
    },
    ListCategories {
        respond_to: Response<Vec<Category>>,
    },
    GetCategory {
        id: CategoryId,
        respond_to: Response<Category>,
    },
    DeleteCategory {
        caller: Caller,
        id: CategoryId,
        respond_to: Response<()>,
    },
    CreateProduct {
        caller: Caller,
        params: ProductCreate,
        respond_to: Response<ProductView>,
    },
    UpdateProduct {
        caller: Caller,
        id: ProductId,
        update: ProductUpdate,
        respond_to: Response<ProductView>,
    },
    DeleteProduct {
        caller: Caller,
        id: ProductId,
        respond_to: Response<()>,
    },
    GetProduct {
        id: ProductId,
        respond_to: Response<ProductView>,
    },
    ListProducts {
        filter: ProductFilter,
        respond_to: Response<Vec<ProductView>>,
    },

    // --- Cart ---
    GetCart {
        caller: Caller,
        respond_to: Response<CartView>,
    },
    AddCartItem {
        caller: Caller,
        product_id: ProductId,
        quantity: u32,
        respond_to: Response<CartView>,
    },
    UpdateCartItem {
        caller: Caller,
        item_id: CartItemId,
        quantity: u32,
        respond_to: Response<CartView>,
    },
    RemoveCartItem {
        caller: Caller,
        item_id: CartItemId,
        respond_to: Response<CartView>,
    },

    // --- Orders ---
    Checkout {
        caller: Caller,
        respond_to: Response<OrderView>,
    },
    ListOrders {
        caller: Caller,
        respond_to: Response<Vec<OrderView>>,
    },
    GetOrder {
        caller: Caller,
        id: OrderId,
        respond_to: Response<OrderView>,
    },
    ListAllOrders {
        caller: Caller,
        respond_to: Response<Vec<OrderView>>,
    },
    UpdateOrderStatus {
        caller: Caller,
        id: OrderId,
        status: OrderStatus,
        respond_to: Response<OrderView>,
    },
}
