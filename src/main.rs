//! Demo binary: seeds a small catalog and walks one shopper through a full
//! cart-to-order flow, logging each step. Run with `RUST_LOG=info cargo run`.

use rust_decimal_macros::dec;
use storefront::lifecycle::{setup_tracing, StoreSystem};
use storefront::model::{Caller, CategoryCreate, ProductCreate};
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting storefront demo");

    let system = StoreSystem::new();
    let staff = Caller::staff(1);
    let shopper = Caller::customer(2);

    // Seed the catalog as staff
    let span = tracing::info_span!("catalog_seeding");
    let product_id = async {
        let category = system
            .client
            .create_category(
                staff,
                CategoryCreate {
                    name: "Stationery".to_string(),
                    slug: "stationery".to_string(),
                },
            )
            .await
            .map_err(|e| e.to_string())?;
        info!(category = %category.id, "Category created");

        let product = system
            .client
            .create_product(
                staff,
                ProductCreate {
                    category_id: category.id,
                    name: "Field Notebook".to_string(),
                    description: "Squared, 64 pages".to_string(),
                    price: dec!(10.00),
                    quantity: 5,
                },
            )
            .await
            .map_err(|e| e.to_string())?;
        info!(product = %product.id, price = %product.price, stock = product.quantity, "Product created");
        Ok::<_, String>(product.id)
    }
    .instrument(span)
    .await?;

    // Shop and check out
    let span = tracing::info_span!("shopping_flow");
    async {
        let cart = system
            .client
            .add_cart_item(shopper, product_id, 3)
            .await
            .map_err(|e| e.to_string())?;
        info!(items = cart.items.len(), total = %cart.total, "Cart filled");

        let order = system
            .client
            .checkout(shopper)
            .await
            .map_err(|e| e.to_string())?;
        info!(order = %order.id, total = %order.total, status = %order.status, "Order placed");

        let product = system
            .client
            .get_product(product_id)
            .await
            .map_err(|e| e.to_string())?;
        info!(stock = product.quantity, "Remaining stock");

        // A second checkout must fail: the cart is empty now.
        match system.client.checkout(shopper).await {
            Ok(order) => error!(order = %order.id, "Unexpected second order"),
            Err(e) => info!(error = %e, "Second checkout rejected as expected"),
        }
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
