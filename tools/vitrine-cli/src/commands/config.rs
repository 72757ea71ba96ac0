//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};
use vitrine_cache::FileStore;
use vitrine_commerce::checkout::CheckoutConfig;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig};
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
        ConfigCommand::SetNumber { number } => set_number(number, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.info("[cart]");
    ctx.output.kv("storage_key", &ctx.config.cart.storage_key);
    ctx.output.kv("currency", ctx.config.cart.currency.code());

    ctx.output.info("[storage]");
    ctx.output.kv("data_dir", &ctx.data_dir().display().to_string());

    ctx.output.info("[checkout]");
    match &ctx.config.checkout.whatsapp_number {
        Some(number) => ctx.output.kv("whatsapp_number", number),
        None => ctx.output.kv("whatsapp_number", "(not set)"),
    }
    if let Some(greeting) = &ctx.config.checkout.greeting {
        ctx.output.kv("greeting", greeting);
    }

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("vitrine.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;
    ctx.output
        .success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn set_number(number: String, ctx: &Context) -> Result<()> {
    let checkout = CheckoutConfig::new(number.clone());
    if let Err(e) = checkout.phone_digits() {
        bail!("{}", e);
    }

    let path = ctx
        .config_path
        .clone()
        .unwrap_or_else(|| ctx.cwd.join("vitrine.toml"));
    let mut config = ctx.config.clone();
    config.checkout.whatsapp_number = Some(number);
    config.save(&path)?;

    ctx.output
        .success(&format!("WhatsApp number saved to {}", path.display()));
    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = check(&ctx.config);

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

fn check(config: &CliConfig) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if let Err(e) = FileStore::check_key(&config.cart.storage_key) {
        errors.push(format!("cart.storage_key: {}", e));
    }

    match config.checkout_config() {
        None => warnings.push("checkout.whatsapp_number is not set".to_string()),
        Some(checkout) => {
            if let Err(e) = checkout.phone_digits() {
                errors.push(format!("checkout.whatsapp_number: {}", e));
            }
        }
    }

    (errors, warnings)
}
