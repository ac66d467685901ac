//! Checkout flow.
//!
//! Turns the current cart into an order receipt. No payment processor is
//! ever contacted: the order exists only as a value returned to the
//! caller, after which the cart is emptied and the empty collection
//! persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use kopiku_core::{LineItem, OrderId, Price};

use crate::cart::CartStore;

/// Errors that can occur while placing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// A required delivery detail was blank.
    #[error("missing checkout field: {0}")]
    MissingField(&'static str),

    /// There is nothing in the cart to order.
    #[error("cart is empty")]
    EmptyCart,
}

/// Delivery details collected on the checkout screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutDetails {
    /// Recipient name.
    pub name: String,
    /// Delivery address.
    pub address: String,
    /// Contact phone number.
    pub phone: String,
}

impl CheckoutDetails {
    /// Reject blank fields. Whitespace-only values count as blank.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::MissingField`] naming the first blank
    /// field.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        if self.name.trim().is_empty() {
            return Err(CheckoutError::MissingField("name"));
        }
        if self.address.trim().is_empty() {
            return Err(CheckoutError::MissingField("address"));
        }
        if self.phone.trim().is_empty() {
            return Err(CheckoutError::MissingField("phone"));
        }
        Ok(())
    }
}

/// A placed order: a receipt-only value, neither persisted nor
/// transmitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Locally generated order id.
    pub id: OrderId,
    /// Delivery details the order was placed with.
    pub details: CheckoutDetails,
    /// The cart lines at the moment of checkout.
    pub lines: Vec<LineItem>,
    /// Total across all lines.
    pub total: Price,
    /// When the order was placed.
    pub placed_at: DateTime<Utc>,
}

/// Place an order from the current cart.
///
/// Validates the details, snapshots the cart into an [`Order`], then
/// clears the cart and flushes the persist so the emptied cart is durable
/// before the receipt is returned.
///
/// # Errors
///
/// Returns [`CheckoutError::MissingField`] for blank details and
/// [`CheckoutError::EmptyCart`] when there is nothing to order.
pub async fn place_order(
    cart: &mut CartStore,
    details: CheckoutDetails,
) -> Result<Order, CheckoutError> {
    details.validate()?;
    if cart.items().is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let order = Order {
        id: OrderId::generate(),
        lines: cart.items().to_vec(),
        total: cart.total(),
        details,
        placed_at: Utc::now(),
    };

    cart.clear();
    cart.flush().await;

    info!(
        order_id = %order.id,
        total = order.total.amount(),
        lines = order.lines.len(),
        "Order placed"
    );
    Ok(order)
}
