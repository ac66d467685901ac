//! Cart management commands.
//!
//! Every command opens the persisted cart store, applies its mutation, and
//! flushes before returning - a short-lived process must not exit with the
//! last write still in flight.

use kopiku_core::{CartProduct, ProductId};
use kopiku_storefront::cart::CartStore;
use kopiku_storefront::catalog::CatalogError;

use super::{bootstrap, catalog as catalog_client, open_cart};

/// Add one unit of a product to the cart.
#[allow(clippy::print_stdout)]
pub async fn add(id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let (config, storage) = bootstrap()?;
    let client = catalog_client(&config);

    let id = ProductId::new(id);
    let product = match client.product(&id).await {
        Ok(product) => product,
        Err(CatalogError::NotFound(id)) => {
            println!("No product with id {id}.");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let mut cart = open_cart(storage).await;
    cart.add_item(CartProduct::from(&*product));
    cart.flush().await;

    let quantity = cart.quantity_of(&id).unwrap_or(0);
    println!("Added {} (x{quantity} in cart).", product.name);
    print_summary(&cart);
    Ok(())
}

/// Adjust a product's quantity by a signed delta.
#[allow(clippy::print_stdout)]
pub async fn update(id: &str, delta: i64) -> Result<(), Box<dyn std::error::Error>> {
    let (_config, storage) = bootstrap()?;
    let mut cart = open_cart(storage).await;

    let id = ProductId::new(id);
    let was_present = cart.quantity_of(&id).is_some();
    cart.update_quantity(&id, delta);
    cart.flush().await;

    match (was_present, cart.quantity_of(&id)) {
        (_, Some(quantity)) => println!("{id} is now x{quantity}."),
        (true, None) => println!("{id} removed from cart."),
        (false, None) => println!("{id} is not in the cart."),
    }
    print_summary(&cart);
    Ok(())
}

/// List the cart contents and total.
#[allow(clippy::print_stdout)]
pub async fn show() -> Result<(), Box<dyn std::error::Error>> {
    let (_config, storage) = bootstrap()?;
    let cart = open_cart(storage).await;

    if cart.items().is_empty() {
        println!("Your cart is empty.");
        return Ok(());
    }
    for item in cart.items() {
        println!(
            "  {:<4} {:<24} x{:<3} {}",
            item.product.id,
            item.product.name,
            item.quantity,
            item.line_total()
        );
    }
    print_summary(&cart);
    Ok(())
}

/// Remove every item from the cart.
#[allow(clippy::print_stdout)]
pub async fn clear() -> Result<(), Box<dyn std::error::Error>> {
    let (_config, storage) = bootstrap()?;
    let mut cart = open_cart(storage).await;

    cart.clear();
    cart.flush().await;

    println!("Cart cleared.");
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_summary(cart: &CartStore) {
    println!("Total: {}", cart.total());
}
