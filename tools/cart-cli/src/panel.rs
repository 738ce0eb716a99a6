//! Text rendering of the cart panel.

use serde::Serialize;
use turbo_cart::{ops, CartEvent, LineItem};

use crate::output::Output;

/// Machine-readable cart summary for `--json` output.
#[derive(Debug, Serialize)]
pub struct CartSummary<'a> {
    pub items: &'a [LineItem],
    pub cart_quantity: i64,
    pub is_open: bool,
}

/// The cart panel, kept up to date from cart notifications.
///
/// Holds its own copy of the last item snapshot it was told about, so it can
/// redraw on `Opened` without reaching back into the cart.
pub struct CartPanel {
    output: Output,
    open: bool,
    items: Vec<LineItem>,
    cart_quantity: i64,
}

impl CartPanel {
    /// A closed panel showing `items`.
    pub fn new(output: Output, items: &[LineItem]) -> Self {
        Self {
            output,
            open: false,
            items: items.to_vec(),
            cart_quantity: ops::total_quantity(items),
        }
    }

    /// React to a cart notification.
    pub fn handle(&mut self, event: &CartEvent<'_>) {
        match event {
            CartEvent::ItemsChanged {
                items,
                cart_quantity,
            } => {
                self.items = items.to_vec();
                self.cart_quantity = *cart_quantity;
                if self.open {
                    self.render();
                } else {
                    self.output
                        .debug(&format!("cart badge: {}", self.cart_quantity));
                }
            }
            CartEvent::Opened => {
                self.open = true;
                self.render();
            }
            CartEvent::Closed => {
                self.open = false;
                self.output.info("Cart closed");
            }
            CartEvent::PersistFailed { key, error } => {
                self.output
                    .warn(&format!("Cart change not saved to '{}': {}", key, error));
            }
        }
    }

    /// Draw the panel.
    pub fn render(&self) {
        render_items(&self.output, &self.items, self.cart_quantity, self.open);
    }
}

/// Draw a list of line items with a total.
pub fn render_items(output: &Output, items: &[LineItem], cart_quantity: i64, is_open: bool) {
    if output.is_json() {
        output.json(&CartSummary {
            items,
            cart_quantity,
            is_open,
        });
        return;
    }

    output.header("Shopping Cart");
    if items.is_empty() {
        output.info("Your cart is empty.");
        return;
    }

    let widths = [10, 8];
    output.table_row(&["PRODUCT", "QTY"], &widths);
    for row in rows(items) {
        output.table_row(&[row.0.as_str(), row.1.as_str()], &widths);
    }
    output.kv("total", &format!("{} item(s)", cart_quantity));
}

fn rows(items: &[LineItem]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|item| (format!("#{}", item.id), item.quantity.to_string()))
        .collect()
}
