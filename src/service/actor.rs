//! The store actor: owns the storefront state and serializes all access.
//!
//! This is the "server" half of the service. It owns the [`Storefront`] and
//! the receiver end of the request channel, and processes messages one at a
//! time in a loop. That sequential processing is the concurrency model: no
//! `Mutex` or `RwLock` anywhere, and two checkouts racing for the last unit
//! of stock are simply handled one after the other, so they can never both
//! succeed. Multi-step operations (checkout) additionally run inside a
//! [`Transaction`](crate::store::Transaction) scope so a failure midway
//! leaves no trace.

use std::fmt::Debug;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::checkout;
use crate::error::StoreError;
use crate::service::client::StoreClient;
use crate::service::message::{Response, StoreRequest};
use crate::store::Storefront;

pub struct StoreActor {
    receiver: mpsc::Receiver<StoreRequest>,
    state: Storefront,
}

impl StoreActor {
    /// Creates a store actor over `state` and its associated client.
    ///
    /// `buffer_size` is the mailbox capacity; client calls wait when it is
    /// full. The actor does nothing until [`run`](Self::run) is awaited,
    /// normally from `tokio::spawn`.
    pub fn new(buffer_size: usize, state: Storefront) -> (Self, StoreClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        (Self { receiver, state }, StoreClient::new(sender))
    }

    /// Runs the actor's event loop, processing requests until every client
    /// has been dropped.
    pub async fn run(mut self) {
        info!("Store actor started");

        while let Some(msg) = self.receiver.recv().await {
            self.handle(msg);
        }

        info!("Store actor shutdown");
    }

    fn handle(&mut self, msg: StoreRequest) {
        use StoreRequest::*;
        match msg {
            CreateCategory {
                caller,
                params,
                respond_to,
            } => {
                debug!(caller = %caller.user, ?params, "CreateCategory");
                respond(
                    "create_category",
                    respond_to,
                    self.state.create_category(&caller, params),
                );
            }
            ListCategories { respond_to } => {
                respond("list_categories", respond_to, Ok(self.state.list_categories()));
            }
            GetCategory { id, respond_to } => {
                respond("get_category", respond_to, self.state.get_category(id));
            }
            DeleteCategory {
                caller,
                id,
                respond_to,
            } => {
                debug!(caller = %caller.user, %id, "DeleteCategory");
                respond(
                    "delete_category",
                    respond_to,
                    self.state.delete_category(&caller, id),
                );
            }
            CreateProduct {
                caller,
                params,
                respond_to,
            } => {
                debug!(caller = %caller.user, ?params, "CreateProduct");
                respond(
                    "create_product",
                    respond_to,
                    self.state.create_product(&caller, params),
                );
            }
            UpdateProduct {
                caller,
                id,
                update,
                respond_to,
            } => {
                debug!(caller = %caller.user, %id, ?update, "UpdateProduct");
                respond(
                    "update_product",
                    respond_to,
                    self.state.update_product(&caller, id, update),
                );
            }
            DeleteProduct {
                caller,
                id,
                respond_to,
            } => {
                debug!(caller = %caller.user, %id, "DeleteProduct");
                respond(
                    "delete_product",
                    respond_to,
                    self.state.delete_product(&caller, id),
                );
            }
            GetProduct { id, respond_to } => {
                respond("get_product", respond_to, self.state.get_product(id));
            }
            ListProducts { filter, respond_to } => {
                debug!(?filter, "ListProducts");
                respond(
                    "list_products",
                    respond_to,
                    self.state.list_products(&filter),
                );
            }
            GetCart { caller, respond_to } => {
                respond("get_cart", respond_to, self.state.get_cart(&caller));
            }
            AddCartItem {
                caller,
                product_id,
                quantity,
                respond_to,
            } => {
                debug!(caller = %caller.user, %product_id, quantity, "AddCartItem");
                respond(
                    "add_cart_item",
                    respond_to,
                    self.state.add_cart_item(&caller, product_id, quantity),
                );
            }
            UpdateCartItem {
                caller,
                item_id,
                quantity,
                respond_to,
            } => {
                debug!(caller = %caller.user, %item_id, quantity, "UpdateCartItem");
                respond(
                    "update_cart_item",
                    respond_to,
                    self.state.update_cart_item(&caller, item_id, quantity),
                );
            }
            RemoveCartItem {
                caller,
                item_id,
                respond_to,
            } => {
                debug!(caller = %caller.user, %item_id, "RemoveCartItem");
                respond(
                    "remove_cart_item",
                    respond_to,
                    self.state.remove_cart_item(&caller, item_id),
                );
            }
            Checkout { caller, respond_to } => {
                debug!(caller = %caller.user, "Checkout");
                respond(
                    "checkout",
                    respond_to,
                    checkout::place_order(&mut self.state, &caller),
                );
            }
            ListOrders { caller, respond_to } => {
                respond("list_orders", respond_to, self.state.list_orders(&caller));
            }
            GetOrder {
                caller,
                id,
                respond_to,
            } => {
                respond("get_order", respond_to, self.state.get_order(&caller, id));
            }
            ListAllOrders { caller, respond_to } => {
                debug!(caller = %caller.user, "ListAllOrders");
                respond(
                    "list_all_orders",
                    respond_to,
                    self.state.list_all_orders(&caller),
                );
            }
            UpdateOrderStatus {
                caller,
                id,
                status,
                respond_to,
            } => {
                debug!(caller = %caller.user, %id, %status, "UpdateOrderStatus");
                respond(
                    "update_order_status",
                    respond_to,
                    self.state.update_order_status(&caller, id, status),
                );
            }
        }
    }
}

/// Logs the outcome and replies. A send failure only means the caller went
/// away before the reply; the state change (if any) stands either way.
fn respond<T: Debug>(op: &'static str, respond_to: Response<T>, result: Result<T, StoreError>) {
    match &result {
        Ok(_) => debug!(op, "Ok"),
        Err(e) => warn!(op, error = %e, "Rejected"),
    }
    let _ = respond_to.send(result);
}
