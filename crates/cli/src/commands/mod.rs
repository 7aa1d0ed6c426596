//! Cart commands.
//!
//! Every invocation rehydrates the cart from storage, applies at most one
//! action through the store, and prints the result. Persistence happens in
//! the store's subscriber, so a command never writes storage itself.

use std::io::{self, Write};
use std::sync::Arc;

use chrono::Utc;
use shoppyglobe_core::cart::{CartState, CartSummary, Product, actions};
use shoppyglobe_core::{ProductId, Quantity, format_usd};
use shoppyglobe_store::{RestoreNotice, Storage, Store, StoreConfig, SystemClock};
use thiserror::Error;

/// Errors that can occur while running a cart command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Writing to the terminal failed.
    #[error("Output error: {0}")]
    Output(#[from] io::Error),

    /// The cart could not be rendered as JSON.
    #[error("Failed to encode cart: {0}")]
    Json(#[from] serde_json::Error),
}

/// A store bound to the configured storage for one command.
pub struct CartSession {
    store: Store,
    storage: Arc<dyn Storage>,
}

impl CartSession {
    /// Rehydrate the cart from the configured storage.
    pub fn open(config: &StoreConfig) -> Self {
        let storage: Arc<dyn Storage> = Arc::new(config.storage());
        let store =
            Store::with_persistence(Arc::clone(&storage), config.cart_key.clone(), SystemClock);
        Self { store, storage }
    }

    #[cfg(test)]
    pub fn with_store(store: Store, storage: Arc<dyn Storage>) -> Self {
        Self { store, storage }
    }

    /// Print the cart, or its stored JSON layout when `json` is set.
    pub fn show(&mut self, json: bool, out: &mut impl Write) -> Result<(), CommandError> {
        let cart = self.store.state().cart();
        if json {
            serde_json::to_writer_pretty(&mut *out, cart)?;
            writeln!(out)?;
            return Ok(());
        }

        if let Some(notice) = RestoreNotice::check(self.storage.as_ref(), cart, Utc::now()) {
            writeln!(out, "Welcome back! {}", notice.message())?;
            writeln!(out)?;
        }
        render_cart(cart, out)?;
        Ok(())
    }

    /// Add one unit of `product` and print the cart.
    pub fn add(&mut self, product: Product, out: &mut impl Write) -> Result<(), CommandError> {
        let id = product.id;
        self.store.dispatch(actions::add_to_cart(product));

        let cart = self.store.state().cart();
        if let Some(item) = cart.item(id) {
            writeln!(out, "Added \"{}\" (quantity {})", item.title(), item.quantity())?;
        }
        render_cart(cart, out)?;
        Ok(())
    }

    /// Remove the line for `id` and print the cart.
    pub fn remove(&mut self, id: ProductId, out: &mut impl Write) -> Result<(), CommandError> {
        let present = self.store.state().cart().item(id).is_some();
        self.store.dispatch(actions::remove_from_cart(id));

        if !present {
            writeln!(out, "Product {id} is not in the cart")?;
        }
        render_cart(self.store.state().cart(), out)?;
        Ok(())
    }

    /// Set the quantity of the line for `id`, reporting any clamping.
    pub fn set_quantity(
        &mut self,
        id: ProductId,
        requested: i64,
        out: &mut impl Write,
    ) -> Result<(), CommandError> {
        self.store.dispatch(actions::update_quantity(id, requested));

        let cart = self.store.state().cart();
        match cart.item(id) {
            Some(item) if i64::from(item.quantity().get()) != requested => writeln!(
                out,
                "Quantity must be between {} and {}, using {}",
                Quantity::MIN,
                Quantity::MAX,
                item.quantity()
            )?,
            Some(_) => {}
            None => writeln!(out, "Product {id} is not in the cart")?,
        }
        render_cart(cart, out)?;
        Ok(())
    }

    /// Empty the cart.
    pub fn clear(&mut self, out: &mut impl Write) -> Result<(), CommandError> {
        self.store.dispatch(actions::clear_cart());
        writeln!(out, "Cart cleared")?;
        Ok(())
    }

    /// Print the order summary and empty the cart.
    pub fn checkout(&mut self, out: &mut impl Write) -> Result<(), CommandError> {
        match shoppyglobe_store::checkout(&mut self.store) {
            Some(summary) => {
                writeln!(out, "Order placed")?;
                render_summary(&summary, out)?;
            }
            None => writeln!(out, "Your cart is empty, nothing to order")?,
        }
        Ok(())
    }
}

/// Print cart lines followed by the order summary.
pub fn render_cart(cart: &CartState, out: &mut impl Write) -> io::Result<()> {
    if cart.is_empty() {
        return writeln!(out, "Your cart is empty");
    }

    writeln!(
        out,
        "{:>6}  {:<32} {:>4} {:>10} {:>10}",
        "ID", "Product", "Qty", "Price", "Total"
    )?;
    for item in cart.items() {
        let title = match item.brand() {
            Some(brand) => format!("{} ({brand})", item.title()),
            None => item.title().to_string(),
        };
        writeln!(
            out,
            "{:>6}  {:<32} {:>4} {:>10} {:>10}",
            item.id().to_string(),
            title,
            item.quantity().to_string(),
            item.unit_price().to_string(),
            format_usd(item.line_total())
        )?;
    }
    writeln!(out)?;
    render_summary(&CartSummary::from(cart), out)
}

fn render_summary(summary: &CartSummary, out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "Subtotal ({} items) {:>12}",
        summary.item_count,
        format_usd(summary.subtotal)
    )?;
    writeln!(out, "Shipping {:>22}", "FREE")?;
    writeln!(out, "Tax (10%) {:>21}", format_usd(summary.tax))?;
    writeln!(out, "Total {:>25}", format_usd(summary.grand_total))
}
