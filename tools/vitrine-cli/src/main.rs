//! Vitrine CLI - Command line cart for the Vitrine storefront.
//!
//! Commands:
//! - `vitrine add` - Add a product to the cart
//! - `vitrine remove` - Remove a product line
//! - `vitrine set` - Set a line's quantity
//! - `vitrine clear` - Empty the cart
//! - `vitrine show` - List the cart lines
//! - `vitrine totals` - Print item count and total price
//! - `vitrine checkout` - Build the WhatsApp order message
//! - `vitrine config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{AddArgs, CheckoutArgs, ClearArgs, ConfigArgs, RemoveArgs, SetArgs};

/// Vitrine CLI - Manage the storefront shopping cart
#[derive(Parser)]
#[command(name = "vitrine")]
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
    /// Add a product to the cart
    Add(AddArgs),

    /// Remove a product from the cart
    Remove(RemoveArgs),

    /// Set the quantity of a product already in the cart
    Set(SetArgs),

    /// Remove every product from the cart
    Clear(ClearArgs),

    /// Show the cart contents
    Show,

    /// Show item count and total price
    Totals,

    /// Build the WhatsApp order message
    Checkout(CheckoutArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool, json: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if json {
        builder.json().try_init().ok();
    } else {
        builder.try_init().ok();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.json);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    // Execute command
    let result = match cli.command {
        Commands::Add(args) => commands::cart::add(args, &ctx),
        Commands::Remove(args) => commands::cart::remove(args, &ctx),
        Commands::Set(args) => commands::cart::set(args, &ctx),
        Commands::Clear(args) => commands::cart::clear(args, &ctx),
        Commands::Show => commands::cart::show(&ctx),
        Commands::Totals => commands::cart::totals(&ctx),
        Commands::Checkout(args) => commands::checkout::run(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
