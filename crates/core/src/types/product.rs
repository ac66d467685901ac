//! Catalog product records.
//!
//! [`Product`] mirrors the JSON shape served by the remote catalog API;
//! [`CartProduct`] is the subset of those fields the cart keeps for each
//! line item. Products are immutable from the cart's perspective - the
//! catalog service owns them.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// A sellable product as returned by the remote catalog service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Catalog-unique identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Short marketing description.
    #[serde(default)]
    pub description: String,
    /// Unit price in whole Rupiah.
    pub price: Price,
    /// Image URI.
    pub image: String,
    /// Menu category (e.g. "Coffee", "Non-Coffee", "Snacks").
    #[serde(default)]
    pub category: String,
    /// Whether the product is flagged as a bestseller.
    #[serde(default)]
    pub is_bestseller: bool,
}

/// The slice of a [`Product`] that travels with a cart line item.
///
/// This is exactly the set of fields the persisted cart blob carries per
/// item (plus the quantity added by
/// [`LineItem`](crate::cart::LineItem)).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartProduct {
    /// Catalog-unique identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price in whole Rupiah.
    pub price: Price,
    /// Image URI.
    pub image: String,
}

impl From<&Product> for CartProduct {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
        }
    }
}

impl From<Product> for CartProduct {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            image: product.image,
        }
    }
}
