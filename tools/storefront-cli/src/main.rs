//! Storefront CLI - Command line storefront backed by the storefront engine.
//!
//! Commands:
//! - `storefront cart` - Add, remove and adjust cart lines
//! - `storefront wishlist` - Save products for later
//! - `storefront checkout` - Submit the cart as an order
//! - `storefront countdown` - Watch a promotional event until it expires
//! - `storefront config` - Manage configuration

mod catalog;
mod commands;
mod config;
mod context;
mod output;
mod services;

use anyhow::Result;
use clap::{Parser, Subcommand};
use storefront_observability::{init_logging, LogLevel};

use commands::{CartArgs, CheckoutArgs, ConfigArgs, CountdownArgs, WishlistArgs};

/// Storefront CLI - Cart, wishlist, countdown and checkout from the terminal
#[derive(Parser)]
#[command(name = "storefront")]
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
    /// Manage the shopping cart
    Cart(CartArgs),

    /// Manage the wishlist
    Wishlist(WishlistArgs),

    /// Place an order for the cart
    Checkout(CheckoutArgs),

    /// Count down to an event's end and delete it on expiry
    Countdown(CountdownArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    let mut logging = ctx.config.logging;
    if cli.verbose {
        logging.level = logging.level.min(LogLevel::Debug);
    }
    init_logging(&logging);

    // Execute command
    let result = match cli.command {
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Wishlist(args) => commands::wishlist::run(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Countdown(args) => commands::countdown::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
