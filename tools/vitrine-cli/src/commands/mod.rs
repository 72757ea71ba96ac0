//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod config;

use clap::{Args, Subcommand};

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Product id.
    #[arg(required_unless_present = "product_json")]
    pub id: Option<String>,

    /// Product name.
    #[arg(short, long)]
    pub name: Option<String>,

    /// Unit price, as a number or a formatted string (e.g. "R$ 49,90").
    #[arg(short, long)]
    pub price: Option<String>,

    /// Quantity to add.
    #[arg(short, long, default_value = "1", allow_hyphen_values = true)]
    pub qty: i64,

    /// Primary image URL.
    #[arg(long)]
    pub image: Option<String>,

    /// Category.
    #[arg(long)]
    pub category: Option<String>,

    /// Full product record as JSON (overrides the other product flags).
    #[arg(long, conflicts_with_all = ["id", "name", "price", "image", "category"])]
    pub product_json: Option<String>,
}

/// Arguments for the remove command.
#[derive(Args)]
pub struct RemoveArgs {
    /// Product id.
    pub id: String,
}

/// Arguments for the set command.
#[derive(Args)]
pub struct SetArgs {
    /// Product id.
    pub id: String,

    /// New quantity; 0 or less removes the line.
    #[arg(allow_hyphen_values = true)]
    pub quantity: i64,
}

/// Arguments for the clear command.
#[derive(Args)]
pub struct ClearArgs {
    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// WhatsApp number (overrides config).
    #[arg(long)]
    pub number: Option<String>,

    /// Print only the wa.me link.
    #[arg(long)]
    pub url_only: bool,
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
    /// Validate the config file.
    Validate,
    /// Set the store's WhatsApp number in the config file.
    SetNumber {
        /// Number in any formatting, e.g. "+55 11 99999-8888".
        number: String,
    },
}
