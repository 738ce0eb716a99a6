//! Interactive cart session.
//!
//! One cart lives for the whole session, so the panel's open/closed state
//! means something here: while the panel is open it redraws on every change.

use std::cell::RefCell;
use std::io::{self, BufRead, IsTerminal, Write};
use std::ops::ControlFlow;
use std::rc::Rc;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use turbo_cart::ShoppingCart;
use turbo_store::KvStore;

use super::items::quantity_report;
use crate::context::Context;
use crate::output::Output;
use crate::panel::{render_items, CartPanel};

/// One line of session input.
#[derive(Parser, Debug)]
#[command(no_binary_name = true, name = "cart>")]
struct SessionLine {
    #[command(subcommand)]
    command: SessionCommand,
}

/// Commands available inside a session.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    /// Add one unit of a product
    #[command(alias = "inc")]
    Add {
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },
    /// Remove one unit of a product
    #[command(alias = "dec")]
    Decrease {
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },
    /// Remove a product entirely
    #[command(alias = "rm")]
    Remove {
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },
    /// Print the quantity of a product
    #[command(alias = "qty")]
    Quantity {
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },
    /// Open the cart panel
    Open,
    /// Close the cart panel
    Close,
    /// Print the cart
    Show,
    /// Empty the cart
    Clear,
    /// End the session
    #[command(alias = "exit")]
    Quit,
}

/// Parse a line of input. Blank lines parse to `None`.
pub fn parse_line(line: &str) -> Result<Option<SessionCommand>, clap::Error> {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() {
        return Ok(None);
    }
    SessionLine::try_parse_from(words).map(|parsed| Some(parsed.command))
}

/// Apply one session command to `cart`.
pub fn execute<S: KvStore>(
    cart: &mut ShoppingCart<S>,
    command: SessionCommand,
    output: &Output,
) -> ControlFlow<()> {
    let outcome = match command {
        SessionCommand::Add { id } => cart.increase_cart_quantity(id),
        SessionCommand::Decrease { id } => cart.decrease_cart_quantity(id),
        SessionCommand::Remove { id } => cart.remove_from_cart(id),
        SessionCommand::Clear => cart.clear_cart(),
        SessionCommand::Quantity { id } => {
            let quantity = cart.get_item_quantity(id);
            if output.is_json() {
                output.json(&quantity_report(cart, id));
            } else {
                println!("{}", quantity);
            }
            return ControlFlow::Continue(());
        }
        SessionCommand::Open => {
            cart.open_cart();
            return ControlFlow::Continue(());
        }
        SessionCommand::Close => {
            cart.close_cart();
            return ControlFlow::Continue(());
        }
        SessionCommand::Show => {
            render_items(output, cart.items(), cart.cart_quantity(), cart.is_open());
            return ControlFlow::Continue(());
        }
        SessionCommand::Quit => return ControlFlow::Break(()),
    };

    if !outcome.changed() {
        output.debug("no change");
    }
    ControlFlow::Continue(())
}

/// Run a session over stdin.
pub fn run(ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart();

    let panel = Rc::new(RefCell::new(CartPanel::new(ctx.output.clone(), cart.items())));
    let listener = Rc::clone(&panel);
    cart.subscribe(move |event| listener.borrow_mut().handle(event));

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    if interactive {
        ctx.output.info(&format!(
            "Cart session on '{}' ({} item(s)). Type `help` for commands.",
            cart.storage_key(),
            cart.cart_quantity()
        ));
    }

    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            print!("cart> ");
            io::stdout().flush().context("Failed to flush stdout")?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read from stdin")?;

        match parse_line(&line) {
            Ok(Some(command)) => {
                if execute(&mut cart, command, &ctx.output).is_break() {
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => {
                if let Err(io) = e.print() {
                    tracing::debug!(error = %io, "failed to print session usage");
                }
            }
        }
    }

    tracing::debug!(cart_quantity = cart.cart_quantity(), "session ended");
    Ok(())
}
