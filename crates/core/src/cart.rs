//! The cart collection and its line items.
//!
//! A [`Cart`] is an ordered sequence of [`LineItem`]s, unique by product
//! id. Adding a product that is already present bumps its quantity in
//! place; quantity updates clamp at zero and remove the row when they get
//! there. A line item with quantity zero is never a valid resting state.
//!
//! Everything here is pure: persistence and change notification belong to
//! the cart store in `kopiku-storefront`.

use serde::{Deserialize, Serialize};

use crate::types::{CartProduct, Price, ProductId};

/// A product in the cart, annotated with its quantity.
///
/// Serializes flat as `{id, name, price, image, quantity}` - the persisted
/// blob layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// The product this line refers to.
    #[serde(flatten)]
    pub product: CartProduct,
    /// How many units are in the cart. Always >= 1.
    pub quantity: u32,
}

impl LineItem {
    /// Total price of this line (unit price x quantity).
    #[must_use]
    pub const fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// An ordered collection of line items, unique by product id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// The current line items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Quantity of the given product, or `None` if it is not in the cart.
    #[must_use]
    pub fn quantity_of(&self, id: &ProductId) -> Option<u32> {
        self.items
            .iter()
            .find(|item| item.product.id == *id)
            .map(|item| item.quantity)
    }

    /// Add one unit of a product.
    ///
    /// If the product is already in the cart its quantity is incremented in
    /// place, preserving its position; otherwise a new line with quantity 1
    /// is appended at the end.
    pub fn add(&mut self, product: CartProduct) {
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.product.id == product.id)
        {
            item.quantity = item.quantity.saturating_add(1);
        } else {
            self.items.push(LineItem {
                product,
                quantity: 1,
            });
        }
    }

    /// Adjust the quantity of a product by a signed delta.
    ///
    /// A missing id is a no-op. The new quantity is clamped at zero; at
    /// zero the line is removed entirely, otherwise it is replaced in
    /// place, preserving its position. Removal is silent - callers observe
    /// it only through the resulting collection.
    pub fn update_quantity(&mut self, id: &ProductId, delta: i64) {
        let Some(index) = self.items.iter().position(|item| item.product.id == *id) else {
            return;
        };

        let current = self.items.get(index).map_or(0, |item| i64::from(item.quantity));
        let updated = current.saturating_add(delta).max(0);

        if updated == 0 {
            self.items.remove(index);
        } else if let Some(item) = self.items.get_mut(index) {
            item.quantity = u32::try_from(updated).unwrap_or(u32::MAX);
        }
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of (unit price x quantity) over all lines; zero for an empty
    /// cart.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(LineItem::line_total).sum()
    }
}
