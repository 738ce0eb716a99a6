//! CLI command implementations.

pub mod config;
pub mod items;
pub mod session;

use clap::{Args, Subcommand};

/// Arguments for commands that act on one product.
#[derive(Args, Debug)]
pub struct ProductArgs {
    /// Product id.
    #[arg(allow_negative_numbers = true)]
    pub id: i64,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
