//! Cart CLI - Drive the TurboCart shopping-cart state container from a shell.
//!
//! Commands:
//! - `cart add <id>` - Add one unit of a product
//! - `cart decrease <id>` - Remove one unit of a product
//! - `cart remove <id>` - Remove a product entirely
//! - `cart quantity <id>` - Print a product's quantity
//! - `cart show` - Print the cart
//! - `cart clear` - Empty the cart
//! - `cart session` - Interactive session with an open/close cart panel
//! - `cart config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;
mod panel;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{ConfigArgs, ProductArgs};

/// Cart CLI - Persisted shopping cart from the command line
#[derive(Parser)]
#[command(name = "cart")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add one unit of a product
    Add(ProductArgs),

    /// Remove one unit of a product
    Decrease(ProductArgs),

    /// Remove a product from the cart
    Remove(ProductArgs),

    /// Print the quantity of a product
    Quantity(ProductArgs),

    /// Print the cart
    Show,

    /// Remove every product
    Clear,

    /// Start an interactive cart session on stdin
    Session,

    /// Manage configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let ctx = match context::Context::load(cli.config.as_deref(), output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    init_logging(&ctx)?;

    // Execute command
    let result = match cli.command {
        Commands::Add(args) => commands::items::add(args, &ctx),
        Commands::Decrease(args) => commands::items::decrease(args, &ctx),
        Commands::Remove(args) => commands::items::remove(args, &ctx),
        Commands::Quantity(args) => commands::items::quantity(args, &ctx),
        Commands::Show => commands::items::show(&ctx),
        Commands::Clear => commands::items::clear(&ctx),
        Commands::Session => commands::session::run(&ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging(ctx: &context::Context) -> Result<()> {
    let level = if ctx.output.is_verbose() {
        tracing::Level::DEBUG
    } else {
        ctx.config.log_level()?
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
