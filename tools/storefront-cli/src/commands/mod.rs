//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod config;
pub mod countdown;
pub mod wishlist;

use clap::{Args, Subcommand, ValueEnum};

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: CartCommand,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Add a product to the cart
    Add {
        /// Product ID.
        product_id: String,

        /// Quantity (clamped to stock).
        #[arg(short, long, default_value_t = 1)]
        qty: u32,
    },

    /// Remove a product from the cart
    Remove {
        /// Product ID.
        product_id: String,

        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },

    /// Increase a line's quantity by one
    Inc {
        /// Product ID.
        product_id: String,
    },

    /// Decrease a line's quantity by one
    Dec {
        /// Product ID.
        product_id: String,
    },

    /// Show cart contents and total
    Show,
}

/// Arguments for the wishlist command.
#[derive(Args)]
pub struct WishlistArgs {
    #[command(subcommand)]
    pub command: WishlistCommand,
}

#[derive(Subcommand)]
pub enum WishlistCommand {
    /// Save a product for later
    Add {
        /// Product ID.
        product_id: String,
    },

    /// Forget a saved product
    Remove {
        /// Product ID.
        product_id: String,
    },

    /// Save or forget, whichever applies
    Toggle {
        /// Product ID.
        product_id: String,
    },

    /// List saved products
    Show,
}

/// Payment method choice.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PaymentChoice {
    /// Cash on delivery.
    Cod,
    /// Online gateway, paid before the order is created.
    Gateway,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Payment method.
    #[arg(long, value_enum, default_value = "cod")]
    pub payment: PaymentChoice,

    /// Gateway payment reference.
    #[arg(long, required_if_eq("payment", "gateway"))]
    pub reference: Option<String>,

    /// Gateway payment status.
    #[arg(long, default_value = "success")]
    pub status: String,

    /// Street address.
    #[arg(long)]
    pub address1: Option<String>,

    /// Apartment, suite, etc.
    #[arg(long)]
    pub address2: Option<String>,

    /// City.
    #[arg(long)]
    pub city: Option<String>,

    /// Country.
    #[arg(long)]
    pub country: Option<String>,

    /// Postal/ZIP code.
    #[arg(long)]
    pub zip: Option<String>,

    /// Contact phone number.
    #[arg(long)]
    pub phone: Option<String>,

    /// Customer ID.
    #[arg(long, default_value = "guest")]
    pub user_id: String,

    /// Customer name.
    #[arg(long, default_value = "Guest")]
    pub name: String,

    /// Customer email.
    #[arg(long)]
    pub email: Option<String>,

    /// Skip prompts and confirmation.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the countdown command.
#[derive(Args)]
pub struct CountdownArgs {
    /// Event ID.
    pub event_id: String,

    /// Print the current state and exit without ticking.
    #[arg(long)]
    pub once: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Initialize a new config file
    Init {
        /// File to write; a `.json` extension writes JSON.
        #[arg(default_value = "storefront.toml")]
        path: String,

        /// Overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
