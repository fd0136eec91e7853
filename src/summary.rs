//! Plain-text cart summary.
//!
//! Produces the text the UI places on the clipboard when the user copies
//! their list: one block per cart entry with quantity, unit price and
//! subtotal, followed by the grand total. Price formatting comes from
//! [`StoreConfig`].

use crate::config::StoreConfig;
use crate::model::Product;

/// Render the cart as a shareable text summary.
pub fn render(cart: &[Product], config: &StoreConfig) -> String {
    if cart.is_empty() {
        return "Nenhum produto adicionado ainda.".to_string();
    }

    let mut out = String::new();
    for product in cart {
        out.push_str(&product.name);
        out.push('\n');
        out.push_str(&format!(
            "  {} x {} = {}\n",
            product.quantity,
            config.format_price(product.price),
            config.format_price(product.subtotal())
        ));
    }

    let total: f64 = cart.iter().map(Product::subtotal).sum();
    out.push_str(&format!("Total: {}", config.format_price(total)));
    out
}
