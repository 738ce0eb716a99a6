//! One-shot cart commands.
//!
//! Each invocation loads the cart, applies one operation and exits, the
//! command line equivalent of a page load followed by one click.

use anyhow::Result;
use turbo_cart::{ShoppingCart, WriteOutcome};
use turbo_store::KvStore;

use super::ProductArgs;
use crate::context::Context;
use crate::panel::render_items;

/// Add one unit of a product.
pub fn add(args: ProductArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart();
    let outcome = cart.increase_cart_quantity(args.id);
    report(&outcome, ctx);
    ctx.output.success(&format!(
        "Product #{} x{} ({} item(s) in cart)",
        args.id,
        cart.get_item_quantity(args.id),
        cart.cart_quantity()
    ));
    finish(&cart, args.id, ctx);
    Ok(())
}

/// Remove one unit of a product.
pub fn decrease(args: ProductArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart();
    let outcome = cart.decrease_cart_quantity(args.id);
    report(&outcome, ctx);
    if outcome.changed() {
        ctx.output.success(&format!(
            "Product #{} x{} ({} item(s) in cart)",
            args.id,
            cart.get_item_quantity(args.id),
            cart.cart_quantity()
        ));
    } else {
        ctx.output
            .info(&format!("Product #{} is not in the cart", args.id));
    }
    finish(&cart, args.id, ctx);
    Ok(())
}

/// Remove a product entirely.
pub fn remove(args: ProductArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart();
    let outcome = cart.remove_from_cart(args.id);
    report(&outcome, ctx);
    if outcome.changed() {
        ctx.output
            .success(&format!("Removed product #{} from the cart", args.id));
    } else {
        ctx.output
            .info(&format!("Product #{} is not in the cart", args.id));
    }
    finish(&cart, args.id, ctx);
    Ok(())
}

/// Print the quantity of a product.
pub fn quantity(args: ProductArgs, ctx: &Context) -> Result<()> {
    let cart = ctx.open_cart();
    if ctx.output.is_json() {
        finish(&cart, args.id, ctx);
    } else {
        println!("{}", cart.get_item_quantity(args.id));
    }
    Ok(())
}

/// Print the whole cart.
pub fn show(ctx: &Context) -> Result<()> {
    let cart = ctx.open_cart();
    ctx.output
        .debug(&format!("store: {}", ctx.store_path().display()));
    render_items(&ctx.output, cart.items(), cart.cart_quantity(), cart.is_open());
    Ok(())
}

/// Empty the cart.
pub fn clear(ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart();
    let outcome = cart.clear_cart();
    report(&outcome, ctx);
    ctx.output.success("Cart cleared");
    if ctx.output.is_json() {
        render_items(&ctx.output, cart.items(), cart.cart_quantity(), cart.is_open());
    }
    Ok(())
}

/// Surface a failed store write without failing the command.
pub fn report(outcome: &WriteOutcome, ctx: &Context) {
    if let Some(error) = outcome.error() {
        ctx.output
            .warn(&format!("Change kept in memory only, store write failed: {}", error));
    }
}

/// JSON view of one product's quantity alongside the cart total.
pub fn quantity_report<S: KvStore>(cart: &ShoppingCart<S>, id: i64) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "quantity": cart.get_item_quantity(id),
        "cart_quantity": cart.cart_quantity(),
    })
}

fn finish<S: KvStore>(cart: &ShoppingCart<S>, id: i64, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&quantity_report(cart, id));
    }
}
