//! The checkout coordinator: converts a cart into an order atomically.
//!
//! The whole sequence — re-validate stock, compute the total, create the
//! order with captured prices, decrement the ledger, empty the cart — runs
//! inside one [`Transaction`] scope. Every failure path leaves by `?` before
//! `commit`, so the cart and the inventory are untouched by a failed attempt,
//! and no caller ever observes an order without its stock decrement (or the
//! reverse). Linearization against concurrent checkouts comes from the store
//! actor's mailbox: one request is processed at a time.

use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::error::StoreError;
use crate::model::identity::Caller;
use crate::model::order::OrderView;
use crate::store::{Storefront, Transaction};

/// Places an order from the caller's cart.
///
/// Cart items are processed in insertion order, so which product a
/// multi-item failure names is deterministic. Unit prices are captured from
/// the catalog at this moment; later price changes never touch the order.
pub fn place_order(state: &mut Storefront, caller: &Caller) -> Result<OrderView, StoreError> {
    let items = state.carts.items(caller.user);
    if items.is_empty() {
        warn!(user = %caller.user, "Checkout rejected: cart is empty");
        return Err(StoreError::EmptyCart);
    }

    let mut tx = Transaction::begin(state);

    // Re-validate every line against current stock and price the order.
    let mut total = Decimal::ZERO;
    let mut lines = Vec::with_capacity(items.len());
    for item in &items {
        let product = tx.catalog.product(item.product_id)?.clone();
        if !tx.inventory.check_available(product.id, item.quantity) {
            warn!(
                user = %caller.user,
                product = %product.name,
                requested = item.quantity,
                "Checkout rejected: insufficient stock"
            );
            return Err(StoreError::InsufficientStock {
                available: tx.inventory.level(product.id),
                product: product.name,
                requested: item.quantity,
            });
        }
        total += product.price * Decimal::from(item.quantity);
        lines.push((product, item.quantity));
    }

    // Create the order with captured unit prices, then take the stock.
    let order_id = tx.orders.create(
        caller.user,
        total,
        lines.iter().map(|(p, qty)| (p.id, *qty, p.price)).collect(),
    );
    for (product, qty) in &lines {
        tx.inventory.decrement(product, *qty)?;
    }

    tx.carts.clear(caller.user);

    let order = tx.orders.get(order_id)?.clone();
    let view = tx.order_view(&order)?;
    tx.commit();

    info!(user = %caller.user, order = %order_id, %total, "Checkout complete");
    Ok(view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::product::{CategoryCreate, ProductCreate, ProductId, ProductUpdate};
    use rust_decimal_macros::dec;

    fn seeded(products: &[(&str, &str, u32)]) -> (Storefront, Vec<ProductId>) {
        let mut store = Storefront::new();
        let staff = Caller::staff(100);
        let category = store
            .create_category(
                &staff,
                CategoryCreate {
                    name: "General".to_string(),
                    slug: "general".to_string(),
                },
            )
            .unwrap();
        let ids = products
            .iter()
            .map(|(name, price, stock)| {
                store
                    .create_product(
                        &staff,
                        ProductCreate {
                            category_id: category.id,
                            name: name.to_string(),
                            description: String::new(),
                            price: price.parse().unwrap(),
                            quantity: *stock,
                        },
                    )
                    .unwrap()
                    .id
            })
            .collect();
        (store, ids)
    }

    #[test]
    fn empty_cart_checkout_fails_and_changes_nothing() {
        let (mut store, ids) = seeded(&[("Widget", "10.00", 5)]);
        let shopper = Caller::customer(1);

        assert_eq!(
            place_order(&mut store, &shopper).unwrap_err(),
            StoreError::EmptyCart
        );
        assert_eq!(store.inventory.level(ids[0]), 5);
        assert!(store.list_orders(&shopper).unwrap().is_empty());
    }

    #[test]
    fn successful_checkout_updates_all_stores() {
        // Product A: price 10.00, stock 5; add 3 to the cart.
        let (mut store, ids) = seeded(&[("Product A", "10.00", 5)]);
        let shopper = Caller::customer(1);
        let cart = store.add_cart_item(&shopper, ids[0], 3).unwrap();
        assert_eq!(cart.total, dec!(30.00));

        let order = place_order(&mut store, &shopper).unwrap();
        assert_eq!(order.total, dec!(30.00));
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].price, dec!(10.00));
        assert_eq!(order.items[0].quantity, 3);

        assert_eq!(store.inventory.level(ids[0]), 2);
        assert!(store.get_cart(&shopper).unwrap().items.is_empty());

        // The cart is now empty, so a second attempt fails.
        assert_eq!(
            place_order(&mut store, &shopper).unwrap_err(),
            StoreError::EmptyCart
        );
    }

    #[test]
    fn total_is_the_exact_sum_of_captured_lines() {
        let (mut store, ids) = seeded(&[("A", "0.10", 10), ("B", "0.20", 10), ("C", "19.99", 10)]);
        let shopper = Caller::customer(1);
        store.add_cart_item(&shopper, ids[0], 3).unwrap();
        store.add_cart_item(&shopper, ids[1], 1).unwrap();
        store.add_cart_item(&shopper, ids[2], 2).unwrap();

        let order = place_order(&mut store, &shopper).unwrap();
        // 0.30 + 0.20 + 39.98, exact in fixed point.
        assert_eq!(order.total, dec!(40.48));
        let sum: Decimal = order
            .items
            .iter()
            .map(|i| i.price * Decimal::from(i.quantity))
            .sum();
        assert_eq!(sum, order.total);
    }

    #[test]
    fn failure_on_second_item_rolls_back_everything() {
        let (mut store, ids) = seeded(&[("First", "1.00", 10), ("Second", "2.00", 5)]);
        let shopper = Caller::customer(1);
        store.add_cart_item(&shopper, ids[0], 2).unwrap();
        store.add_cart_item(&shopper, ids[1], 5).unwrap();

        // Stock of the second product drains after the cart was filled.
        let staff = Caller::staff(100);
        store
            .update_product(
                &staff,
                ids[1],
                ProductUpdate {
                    quantity: Some(4),
                    ..Default::default()
                },
            )
            .unwrap();

        let err = place_order(&mut store, &shopper).unwrap_err();
        assert_eq!(
            err,
            StoreError::InsufficientStock {
                product: "Second".to_string(),
                requested: 5,
                available: 4,
            }
        );

        // Nothing moved: both stock levels intact, cart intact, no order.
        assert_eq!(store.inventory.level(ids[0]), 10);
        assert_eq!(store.inventory.level(ids[1]), 4);
        assert_eq!(store.get_cart(&shopper).unwrap().items.len(), 2);
        assert!(store.list_orders(&shopper).unwrap().is_empty());
    }

    #[test]
    fn captured_prices_survive_later_price_changes() {
        let (mut store, ids) = seeded(&[("Widget", "10.00", 5)]);
        let shopper = Caller::customer(1);
        store.add_cart_item(&shopper, ids[0], 2).unwrap();
        let order = place_order(&mut store, &shopper).unwrap();

        let staff = Caller::staff(100);
        store
            .update_product(
                &staff,
                ids[0],
                ProductUpdate {
                    price: Some(dec!(99.00)),
                    ..Default::default()
                },
            )
            .unwrap();

        let reloaded = store.get_order(&shopper, order.id).unwrap();
        assert_eq!(reloaded.total, dec!(20.00));
        assert_eq!(reloaded.items[0].price, dec!(10.00));
        // The nested live product reference does show the new price.
        assert_eq!(reloaded.items[0].product.price, dec!(99.00));
    }

    #[test]
    fn two_carts_racing_for_the_last_units() {
        // Product B: stock 2; two shoppers each want 2 units. Whoever checks
        // out first wins; the loser observes stock 0.
        let (mut store, ids) = seeded(&[("Product B", "10.00", 2)]);
        let alice = Caller::customer(1);
        let bob = Caller::customer(2);
        store.add_cart_item(&alice, ids[0], 2).unwrap();
        store.add_cart_item(&bob, ids[0], 2).unwrap();

        place_order(&mut store, &alice).unwrap();
        let err = place_order(&mut store, &bob).unwrap_err();
        assert_eq!(
            err,
            StoreError::InsufficientStock {
                product: "Product B".to_string(),
                requested: 2,
                available: 0,
            }
        );
        assert_eq!(store.inventory.level(ids[0]), 0);
        assert_eq!(store.list_all_orders(&Caller::staff(100)).unwrap().len(), 1);
    }

    #[test]
    fn multi_item_failure_names_the_first_offender_in_insertion_order() {
        let (mut store, ids) = seeded(&[("Early", "1.00", 5), ("Late", "1.00", 5)]);
        let shopper = Caller::customer(1);
        store.add_cart_item(&shopper, ids[0], 5).unwrap();
        store.add_cart_item(&shopper, ids[1], 5).unwrap();

        let staff = Caller::staff(100);
        for id in &ids {
            store
                .update_product(
                    &staff,
                    *id,
                    ProductUpdate {
                        quantity: Some(0),
                        ..Default::default()
                    },
                )
                .unwrap();
        }

        // Both lines violate stock; the error must name the first one added.
        let err = place_order(&mut store, &shopper).unwrap_err();
        assert!(matches!(
            err,
            StoreError::InsufficientStock { product, .. } if product == "Early"
        ));
    }
}
