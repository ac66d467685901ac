//! End-to-end checkout over real file storage.

use kopiku_core::Price;
use kopiku_integration_tests::{TestContext, espresso, latte};
use kopiku_storefront::cart::CartStore;
use kopiku_storefront::checkout::{CheckoutDetails, CheckoutError, place_order};

fn details() -> CheckoutDetails {
    CheckoutDetails {
        name: "Bakti".to_string(),
        address: "Jl. Kopi No. 1, Jakarta".to_string(),
        phone: "081234567890".to_string(),
    }
}

#[tokio::test]
async fn checkout_produces_a_receipt_and_durably_empties_the_cart() {
    let ctx = TestContext::new();

    let mut cart = CartStore::open(ctx.storage()).await;
    cart.add_item(espresso());
    cart.add_item(espresso());
    cart.add_item(latte());

    let order = place_order(&mut cart, details()).await.expect("order placed");
    assert_eq!(order.total, Price::new(80000));
    assert_eq!(order.lines.len(), 2);
    assert!(cart.items().is_empty());
    drop(cart);

    // The emptied cart survives a restart.
    let reloaded = CartStore::open(ctx.storage()).await;
    assert!(reloaded.items().is_empty());
}

#[tokio::test]
async fn failed_checkout_leaves_the_persisted_cart_intact() {
    let ctx = TestContext::new();

    let mut cart = CartStore::open(ctx.storage()).await;
    cart.add_item(espresso());
    cart.flush().await;

    let missing_phone = CheckoutDetails {
        phone: String::new(),
        ..details()
    };
    let result = place_order(&mut cart, missing_phone).await;
    assert!(matches!(result, Err(CheckoutError::MissingField("phone"))));
    drop(cart);

    let reloaded = CartStore::open(ctx.storage()).await;
    assert_eq!(reloaded.items().len(), 1);
    assert_eq!(reloaded.total(), Price::new(25000));
}
