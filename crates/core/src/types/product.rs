//! Cart line items.
//!
//! A [`Product`] is the persisted shape of one cart entry. The field names
//! (`id`, `title`, `image_url`, `price`, `quantity`) are the snapshot wire
//! format and must not be renamed.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// One line item in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog identifier, unique within a cart.
    pub id: ProductId,
    /// Display name.
    pub title: String,
    /// Display image reference.
    pub image_url: String,
    /// Unit price.
    pub price: Price,
    /// Number of units; at least 1 while the item is in the cart.
    pub quantity: u32,
}

impl Product {
    /// Price of this line (`price * quantity`).
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.line_total(self.quantity)
    }
}

/// A catalog product being added to the cart.
///
/// Carries no meaningful quantity: a `quantity` field in incoming JSON is
/// ignored, and new line items always start at 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    /// Catalog identifier.
    pub id: ProductId,
    /// Display name.
    pub title: String,
    /// Display image reference.
    pub image_url: String,
    /// Unit price.
    pub price: Price,
}

impl NewProduct {
    /// Create a new catalog descriptor.
    #[must_use]
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        image_url: impl Into<String>,
        price: Price,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            image_url: image_url.into(),
            price,
        }
    }

    /// Turn the descriptor into a fresh line item with `quantity = 1`.
    #[must_use]
    pub fn into_line(self) -> Product {
        Product {
            id: self.id,
            title: self.title,
            image_url: self.image_url,
            price: self.price,
            quantity: 1,
        }
    }
}
