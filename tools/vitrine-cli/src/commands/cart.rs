//! Cart commands: add, remove, set, clear, show, totals.

use anyhow::{bail, Context as _, Result};
use dialoguer::Confirm;
use serde::Serialize;
use vitrine_cache::KeyValueStore;
use vitrine_commerce::cart::{CartLine, CartStore};
use vitrine_commerce::catalog::{Price, Product};
use vitrine_commerce::{Money, ProductId};

use super::{AddArgs, ClearArgs, RemoveArgs, SetArgs};
use crate::context::Context;
use crate::output::truncate;

/// Cart contents as printed in JSON mode.
#[derive(Serialize)]
struct CartView<'a> {
    lines: &'a [CartLine],
    total_items: u64,
    total_price: f64,
    total_display: String,
}

/// Run the add command.
pub fn add(args: AddArgs, ctx: &Context) -> Result<()> {
    let product = product_from_args(&args)?;
    let mut cart = ctx.open_cart()?;
    let name = display_name(&product);
    let id = product.id.clone();

    cart.add_item(product, args.qty)
        .with_context(|| format!("Could not add {}", name))?;
    warn_if_unsaved(&cart, ctx);

    ctx.output.success(&format!(
        "Added {}x {} (now {} in cart)",
        args.qty,
        name,
        cart.item_quantity(&id)
    ));
    print_summary(&cart, ctx)
}

/// Run the remove command.
pub fn remove(args: RemoveArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;
    let id = ProductId::new(args.id);

    if !cart.is_in_cart(&id) {
        ctx.output.warn(&format!("{} is not in the cart", id));
    }
    cart.remove_item(&id);
    warn_if_unsaved(&cart, ctx);

    ctx.output.success(&format!("Removed {}", id));
    print_summary(&cart, ctx)
}

/// Run the set command.
pub fn set(args: SetArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;
    let id = ProductId::new(args.id);

    if !cart.is_in_cart(&id) {
        bail!("{} is not in the cart; use `vitrine add` first", id);
    }
    cart.update_quantity(&id, args.quantity);
    warn_if_unsaved(&cart, ctx);

    if cart.is_in_cart(&id) {
        ctx.output
            .success(&format!("{} quantity set to {}", id, cart.item_quantity(&id)));
    } else {
        ctx.output.success(&format!("Removed {}", id));
    }
    print_summary(&cart, ctx)
}

/// Run the clear command.
pub fn clear(args: ClearArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;
    if cart.state().is_empty() {
        ctx.output.info("Cart is already empty");
        return Ok(());
    }

    if !args.yes {
        if ctx.output.is_json() || !ctx.output.is_interactive() {
            bail!("Refusing to clear the cart without --yes");
        }
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove all {} items from the cart?", cart.total_items()))
            .default(false)
            .interact()?;
        if !confirmed {
            ctx.output.info("Cancelled");
            return Ok(());
        }
    }

    cart.clear_cart();
    warn_if_unsaved(&cart, ctx);
    ctx.output.success("Cart cleared");
    print_summary(&cart, ctx)
}

/// Run the show command.
pub fn show(ctx: &Context) -> Result<()> {
    let cart = ctx.open_cart()?;

    if ctx.output.is_json() {
        return print_summary(&cart, ctx);
    }

    ctx.output.header("Cart");
    if cart.state().is_empty() {
        ctx.output.info("Cart is empty");
        return Ok(());
    }

    let currency = cart.config().currency;
    let widths = [12, 28, 5, 14, 14, 16];
    ctx.output.table_row(
        &["ID", "PRODUCT", "QTY", "UNIT", "TOTAL", "ADDED"],
        &widths,
    );
    for line in cart.lines() {
        let unit = Money::from_decimal(line.product.unit_price(), currency).to_string();
        let total = line.line_money(currency)?.to_string();
        let qty = line.quantity.to_string();
        let added = line
            .added_at
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M")
            .to_string();
        let id = truncate(line.product_id().as_str(), widths[0]);
        let name = truncate(&display_name(&line.product), widths[1]);
        ctx.output
            .table_row(&[&id, &name, &qty, &unit, &total, &added], &widths);
    }

    print_summary(&cart, ctx)
}

/// Run the totals command.
pub fn totals(ctx: &Context) -> Result<()> {
    let cart = ctx.open_cart()?;
    print_summary(&cart, ctx)
}

fn print_summary<S: KeyValueStore>(cart: &CartStore<S>, ctx: &Context) -> Result<()> {
    let total = cart.total_money()?;
    if ctx.output.is_json() {
        ctx.output.json(&CartView {
            lines: cart.lines(),
            total_items: cart.total_items(),
            total_price: cart.total_price(),
            total_display: total.display(),
        });
        return Ok(());
    }

    ctx.output.kv("items", &cart.total_items().to_string());
    ctx.output.kv("total", &total.display());
    Ok(())
}

fn warn_if_unsaved<S: KeyValueStore>(cart: &CartStore<S>, ctx: &Context) {
    if let Some(err) = cart.last_persist_error() {
        ctx.output
            .warn(&format!("Cart changed but could not be saved: {}", err));
    }
}

fn product_from_args(args: &AddArgs) -> Result<Product> {
    if let Some(raw) = &args.product_json {
        return serde_json::from_str(raw).context("Invalid --product-json record");
    }

    let Some(id) = &args.id else {
        bail!("A product id or --product-json is required");
    };
    let mut product = Product::new(
        id.as_str(),
        args.name.clone().unwrap_or_default(),
        args.price.as_deref().map(parse_price).unwrap_or_default(),
    );
    product.image = args.image.clone();
    product.category = args.category.as_deref().map(Into::into);
    Ok(product)
}

fn parse_price(raw: &str) -> Price {
    raw.trim()
        .parse::<f64>()
        .map(Price::Number)
        .unwrap_or_else(|_| Price::Text(raw.to_string()))
}

fn display_name(product: &Product) -> String {
    if product.name.is_empty() {
        product.id.to_string()
    } else {
        product.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(id: &str) -> AddArgs {
        AddArgs {
            id: Some(id.to_string()),
            name: None,
            price: None,
            qty: 1,
            image: None,
            category: None,
            product_json: None,
        }
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("49.9"), Price::Number(49.9));
        assert_eq!(parse_price("R$ 49,90"), Price::Text("R$ 49,90".to_string()));
    }

    #[test]
    fn test_product_from_flags() {
        let mut a = args("gloss-01");
        a.name = Some("Gloss".to_string());
        a.price = Some("R$ 29,90".to_string());
        a.category = Some("labios".to_string());

        let product = product_from_args(&a).unwrap();
        assert_eq!(product.id.as_str(), "gloss-01");
        assert_eq!(product.unit_price(), 29.9);
        assert_eq!(product.category.as_ref().map(|c| c.as_str()), Some("labios"));
        assert_eq!(display_name(&product), "Gloss");
    }

    #[test]
    fn test_product_from_json() {
        let mut a = args("ignored");
        a.id = None;
        a.product_json = Some(r#"{"id":"p9","price":12,"brand":"X"}"#.to_string());

        let product = product_from_args(&a).unwrap();
        assert_eq!(product.id.as_str(), "p9");
        assert_eq!(product.unit_price(), 12.0);
        assert_eq!(display_name(&product), "p9");
    }

    #[test]
    fn test_product_from_bad_json() {
        let mut a = args("ignored");
        a.product_json = Some("{".to_string());
        assert!(product_from_args(&a).is_err());
    }
}
