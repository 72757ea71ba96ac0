//! Build the WhatsApp order message for the current cart.

use anyhow::{Context as _, Result};
use serde_json::json;
use vitrine_commerce::checkout::{CheckoutConfig, CheckoutMessage};

use super::CheckoutArgs;
use crate::context::Context;

/// Run the checkout command.
pub fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let config = resolve_config(&args, ctx)?;
    let cart = ctx.open_cart()?;

    let message = CheckoutMessage::from_state(cart.state(), &config)
        .context("Could not build the order message")?;
    let url = message.whatsapp_url()?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "phone": message.phone(),
            "text": message.text(),
            "total": message.total().display(),
            "url": url.as_str(),
        }));
        return Ok(());
    }

    if args.url_only {
        ctx.output.plain(url.as_str());
        return Ok(());
    }

    ctx.output.header("Order message");
    ctx.output.plain(message.text());
    ctx.output.header("Send via WhatsApp");
    ctx.output.plain(url.as_str());
    Ok(())
}

fn resolve_config(args: &CheckoutArgs, ctx: &Context) -> Result<CheckoutConfig> {
    let base = ctx.config.checkout_config();
    match (&args.number, base) {
        (Some(number), Some(mut config)) => {
            config.whatsapp_number = number.clone();
            Ok(config)
        }
        (Some(number), None) => {
            Ok(CheckoutConfig::new(number.clone()).with_currency(ctx.config.cart.currency))
        }
        (None, Some(config)) => Ok(config),
        (None, None) => anyhow::bail!(
            "No WhatsApp number configured. Pass --number or set checkout.whatsapp_number"
        ),
    }
}
