//! Cart actions and the pure reducer that applies them.

use crate::cart::{CartLine, CartState};
use crate::catalog::Product;
use crate::ids::ProductId;
use chrono::{DateTime, Utc};

/// Every way the cart can change.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Add `quantity` units, creating the line if needed.
    AddItem { product: Product, quantity: u32 },
    /// Drop the line for a product.
    RemoveItem { product_id: ProductId },
    /// Replace a line's quantity; non-positive removes the line.
    UpdateQuantity { product_id: ProductId, quantity: i64 },
    /// Drop every line.
    ClearCart,
    /// Replace the whole cart with lines read back from storage.
    LoadFromPersistence { lines: Vec<CartLine> },
}

impl CartAction {
    /// Short name for log fields.
    pub fn name(&self) -> &'static str {
        match self {
            CartAction::AddItem { .. } => "add_item",
            CartAction::RemoveItem { .. } => "remove_item",
            CartAction::UpdateQuantity { .. } => "update_quantity",
            CartAction::ClearCart => "clear_cart",
            CartAction::LoadFromPersistence { .. } => "load_from_persistence",
        }
    }
}

/// Apply `action` to `state`.
///
/// `now` stamps lines created by `AddItem`. The result always holds at
/// most one line per product id, every quantity is at least 1, and
/// existing lines never move.
pub fn reduce(mut state: CartState, action: CartAction, now: DateTime<Utc>) -> CartState {
    match action {
        CartAction::AddItem { product, quantity } => {
            if quantity == 0 {
                return state;
            }
            match state.position(&product.id) {
                Some(idx) => {
                    let line = &mut state.lines[idx];
                    line.quantity = line.quantity.saturating_add(quantity);
                }
                None => state.lines.push(CartLine::new(product, quantity, now)),
            }
        }
        CartAction::RemoveItem { product_id } => {
            state.lines.retain(|l| l.product_id() != &product_id);
        }
        CartAction::UpdateQuantity {
            product_id,
            quantity,
        } => {
            if quantity <= 0 {
                state.lines.retain(|l| l.product_id() != &product_id);
            } else if let Some(idx) = state.position(&product_id) {
                state.lines[idx].quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
            }
        }
        CartAction::ClearCart => state.lines.clear(),
        CartAction::LoadFromPersistence { lines } => {
            state.lines = normalize(lines);
        }
    }
    state
}

/// Drop zero-quantity lines and fold duplicate ids into their first occurrence.
fn normalize(lines: Vec<CartLine>) -> Vec<CartLine> {
    let mut out: Vec<CartLine> = Vec::with_capacity(lines.len());
    for line in lines {
        if line.quantity == 0 {
            continue;
        }
        match out.iter().position(|l| l.product_id() == line.product_id()) {
            Some(idx) => out[idx].quantity = out[idx].quantity.saturating_add(line.quantity),
            None => out.push(line),
        }
    }
    out
}
