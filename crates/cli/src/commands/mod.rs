//! Cart commands.
//!
//! Every mutating command makes sure the snapshot reached storage before
//! reporting success.

use go_marketplace_cart::{CartError, CartStore, ConfigError, LoadOutcome, QuantityChange};
use go_marketplace_core::{NewProduct, Product, ProductId};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Cart operation failed.
    #[error("{0}")]
    Cart(#[from] CartError),
}

/// Print the cart contents.
pub fn list(cart: &CartStore) {
    if matches!(
        cart.load_outcome(),
        LoadOutcome::Corrupt | LoadOutcome::Unavailable
    ) {
        tracing::warn!(outcome = ?cart.load_outcome(), "Stored cart could not be loaded");
    }

    #[allow(clippy::print_stdout)]
    {
        print!("{}", render(&cart.products()));
        println!(
            "items: {}  subtotal: {}",
            cart.item_count(),
            cart.subtotal()
        );
    }
}

/// Add one unit of `item`.
pub async fn add(cart: &CartStore, item: NewProduct) -> Result<(), CartError> {
    let id = item.id.clone();
    let quantity = cart.add_to_cart(item).await;
    ensure_synced(cart).await?;

    tracing::info!(product_id = %id, quantity, "Added to cart");
    Ok(())
}

/// Add one unit to an existing line item.
pub async fn increment(cart: &CartStore, id: &ProductId) -> Result<(), CartError> {
    let quantity = cart.increment(id).await?;
    ensure_synced(cart).await?;

    tracing::info!(product_id = %id, quantity, "Incremented");
    Ok(())
}

/// Remove one unit from an existing line item.
pub async fn decrement(cart: &CartStore, id: &ProductId) -> Result<(), CartError> {
    let change = cart.decrement(id).await?;
    ensure_synced(cart).await?;

    match change {
        QuantityChange::Updated(quantity) => {
            tracing::info!(product_id = %id, quantity, "Decremented");
        }
        QuantityChange::Removed => tracing::info!(product_id = %id, "Removed from cart"),
    }
    Ok(())
}

/// Remove every line item.
pub async fn clear(cart: &CartStore) -> Result<(), CartError> {
    cart.clear().await;
    ensure_synced(cart).await
}

/// Retry the write once if the mutation could not be persisted.
async fn ensure_synced(cart: &CartStore) -> Result<(), CartError> {
    if cart.is_synced() {
        return Ok(());
    }
    cart.flush().await
}

/// One line per item: id, title, quantity, unit price, line total.
fn render(products: &[Product]) -> String {
    if products.is_empty() {
        return "cart is empty\n".to_string();
    }

    let id_width = products.iter().map(|p| p.id.as_str().len()).max().unwrap_or(0);
    let title_width = products.iter().map(|p| p.title.len()).max().unwrap_or(0);

    products
        .iter()
        .map(|p| {
            format!(
                "{:<id_width$}  {:<title_width$}  x{:<4} {:>10} {:>10}\n",
                p.id.as_str(),
                p.title,
                p.quantity,
                p.price.to_string(),
                p.line_total().to_string(),
            )
        })
        .collect()
}
