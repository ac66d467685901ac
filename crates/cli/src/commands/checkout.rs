//! Checkout command.

use kopiku_storefront::auth::AuthSession;
use kopiku_storefront::checkout::{self, CheckoutDetails, CheckoutError};

use super::{bootstrap, open_cart};

/// Place an order from the current cart.
#[allow(clippy::print_stdout)]
pub async fn place(
    name: String,
    address: String,
    phone: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let (_config, storage) = bootstrap()?;

    let session = AuthSession::open(storage.clone()).await;
    if session.user().is_none() {
        println!("Sign in first: kopiku login -e <email> -p <password>");
        return Ok(());
    }

    let mut cart = open_cart(storage).await;
    let details = CheckoutDetails {
        name,
        address,
        phone,
    };

    match checkout::place_order(&mut cart, details).await {
        Ok(order) => {
            println!("Order {} placed for {}.", order.id, order.details.name);
            for line in &order.lines {
                println!(
                    "  {:<24} x{:<3} {}",
                    line.product.name,
                    line.quantity,
                    line.line_total()
                );
            }
            println!("Total paid: {}", order.total);
            Ok(())
        }
        Err(CheckoutError::EmptyCart) => {
            println!("Your cart is empty; nothing to check out.");
            Ok(())
        }
        Err(e @ CheckoutError::MissingField(_)) => {
            println!("{e}.");
            Ok(())
        }
    }
}
