//! The store client: type-safe async access to the store actor.
//!
//! The client holds only the sender half of the request channel, so it is
//! cheap to clone and share across tasks; every concurrent caller funnels
//! into the actor's mailbox. Each method builds the matching
//! [`StoreRequest`] variant, sends it, and awaits the typed reply on a
//! oneshot channel. Channel failures map to
//! [`StoreError::ServiceClosed`]/[`StoreError::ServiceDropped`].

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

use crate::error::StoreError;
use crate::model::cart::{CartItemId, CartView};
use crate::model::identity::Caller;
use crate::model::order::{OrderId, OrderStatus, OrderView};
use crate::model::product::{
    Category, CategoryCreate, CategoryId, ProductCreate, ProductFilter, ProductId, ProductUpdate,
    ProductView,
};
use crate::service::message::{Response, StoreRequest};

#[derive(Clone)]
pub struct StoreClient {
    sender: mpsc::Sender<StoreRequest>,
}

impl StoreClient {
    pub fn new(sender: mpsc::Sender<StoreRequest>) -> Self {
        Self { sender }
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(Response<T>) -> StoreRequest,
    ) -> Result<T, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(make(respond_to))
            .await
            .map_err(|_| StoreError::ServiceClosed)?;
        response.await.map_err(|_| StoreError::ServiceDropped)?
    }

    // --- Catalog ---

    #[instrument(skip(self, params))]
    pub async fn create_category(
        &self,
        caller: Caller,
        params: CategoryCreate,
    ) -> Result<Category, StoreError> {
        debug!("Sending request");
        self.request(|respond_to| StoreRequest::CreateCategory {
            caller,
            params,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        self.request(|respond_to| StoreRequest::ListCategories { respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_category(&self, id: CategoryId) -> Result<Category, StoreError> {
        self.request(|respond_to| StoreRequest::GetCategory { id, respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_category(
        &self,
        caller: Caller,
        id: CategoryId,
    ) -> Result<(), StoreError> {
        debug!("Sending request");
        self.request(|respond_to| StoreRequest::DeleteCategory {
            caller,
            id,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self, params))]
    pub async fn create_product(
        &self,
        caller: Caller,
        params: ProductCreate,
    ) -> Result<ProductView, StoreError> {
        debug!("Sending request");
        self.request(|respond_to| StoreRequest::CreateProduct {
            caller,
            params,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self, update))]
    pub async fn update_product(
        &self,
        caller: Caller,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<ProductView, StoreError> {
        debug!("Sending request");
        self.request(|respond_to| StoreRequest::UpdateProduct {
            caller,
            id,
            update,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, caller: Caller, id: ProductId) -> Result<(), StoreError> {
        debug!("Sending request");
        self.request(|respond_to| StoreRequest::DeleteProduct {
            caller,
            id,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ProductId) -> Result<ProductView, StoreError> {
        self.request(|respond_to| StoreRequest::GetProduct { id, respond_to })
            .await
    }

    #[instrument(skip(self, filter))]
    pub async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<ProductView>, StoreError> {
        self.request(|respond_to| StoreRequest::ListProducts { filter, respond_to })
            .await
    }

    // --- Cart ---

    #[instrument(skip(self))]
    pub async fn get_cart(&self, caller: Caller) -> Result<CartView, StoreError> {
        self.request(|respond_to| StoreRequest::GetCart { caller, respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn add_cart_item(
        &self,
        caller: Caller,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<CartView, StoreError> {
        debug!("Sending request");
        self.request(|respond_to| StoreRequest::AddCartItem {
            caller,
            product_id,
            quantity,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn update_cart_item(
        &self,
        caller: Caller,
        item_id: CartItemId,
        quantity: u32,
    ) -> Result<CartView, StoreError> {
        debug!("Sending request");
        self.request(|respond_to| StoreRequest::UpdateCartItem {
            caller,
            item_id,
            quantity,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn remove_cart_item(
        &self,
        caller: Caller,
        item_id: CartItemId,
    ) -> Result<CartView, StoreError> {
        debug!("Sending request");
        self.request(|respond_to| StoreRequest::RemoveCartItem {
            caller,
            item_id,
            respond_to,
        })
        .await
    }

    // --- Orders ---

    /// Runs the checkout: the caller's cart becomes an order, atomically.
    #[instrument(skip(self))]
    pub async fn checkout(&self, caller: Caller) -> Result<OrderView, StoreError> {
        debug!("Sending request");
        self.request(|respond_to| StoreRequest::Checkout { caller, respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn list_orders(&self, caller: Caller) -> Result<Vec<OrderView>, StoreError> {
        self.request(|respond_to| StoreRequest::ListOrders { caller, respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_order(&self, caller: Caller, id: OrderId) -> Result<OrderView, StoreError> {
        self.request(|respond_to| StoreRequest::GetOrder {
            caller,
            id,
            respond_to,
        })
        .await
    }

    /// Every order in the store; staff only.
    #[instrument(skip(self))]
    pub async fn list_all_orders(&self, caller: Caller) -> Result<Vec<OrderView>, StoreError> {
        self.request(|respond_to| StoreRequest::ListAllOrders { caller, respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn update_order_status(
        &self,
        caller: Caller,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<OrderView, StoreError> {
        debug!("Sending request");
        self.request(|respond_to| StoreRequest::UpdateOrderStatus {
            caller,
            id,
            status,
            respond_to,
        })
        .await
    }
}
