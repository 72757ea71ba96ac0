//! Cart line and cart state types.

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One product in the cart with its quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Product snapshot taken when the line was created.
    pub product: Product,
    /// Always at least 1 while the line exists.
    pub quantity: u32,
    /// Set once, on first insertion.
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Create a line.
    pub fn new(product: Product, quantity: u32, added_at: DateTime<Utc>) -> Self {
        Self {
            product,
            quantity,
            added_at,
        }
    }

    /// Identity key of this line.
    pub fn product_id(&self) -> &ProductId {
        &self.product.id
    }

    /// Quantity times unit price.
    pub fn line_total(&self) -> f64 {
        f64::from(self.quantity) * self.product.unit_price()
    }

    /// Line total in cents, with the unit price rounded to the cent first.
    pub fn line_money(&self, currency: Currency) -> Result<Money, CommerceError> {
        Money::from_decimal(self.product.unit_price(), currency)
            .try_multiply(i64::from(self.quantity))
            .ok_or(CommerceError::Overflow)
    }
}

/// The ordered collection of cart lines.
///
/// Lines keep insertion order and there is at most one line per product id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartState {
    pub(crate) lines: Vec<CartLine>,
}

impl CartState {
    /// An empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Find the line for a product.
    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id() == product_id)
    }

    pub(crate) fn position(&self, product_id: &ProductId) -> Option<usize> {
        self.lines.iter().position(|l| l.product_id() == product_id)
    }

    /// Sum of quantities across all lines.
    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Sum of quantity times unit price across all lines.
    pub fn total_price(&self) -> f64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Cart total in cents for display.
    pub fn total_money(&self, currency: Currency) -> Result<Money, CommerceError> {
        let totals = self
            .lines
            .iter()
            .map(|l| l.line_money(currency))
            .collect::<Result<Vec<_>, _>>()?;
        Money::try_sum(totals.iter(), currency).ok_or(CommerceError::Overflow)
    }

    /// Quantity for a product, 0 when absent.
    pub fn item_quantity(&self, product_id: &ProductId) -> u32 {
        self.line(product_id).map_or(0, |l| l.quantity)
    }

    /// Whether a line exists for a product.
    pub fn is_in_cart(&self, product_id: &ProductId) -> bool {
        self.position(product_id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, price: f64, quantity: u32) -> CartLine {
        CartLine::new(Product::new(id, id, price), quantity, Utc::now())
    }

    #[test]
    fn test_empty_totals() {
        let state = CartState::new();
        assert_eq!(state.total_items(), 0);
        assert_eq!(state.total_price(), 0.0);
        assert!(state.is_empty());
        assert_eq!(state.total_money(Currency::BRL).unwrap(), Money::zero(Currency::BRL));
    }

    #[test]
    fn test_totals() {
        let state = CartState {
            lines: vec![line("A", 10.0, 2), line("B", 5.50, 1)],
        };
        assert_eq!(state.total_items(), 3);
        assert_eq!(state.total_price(), 25.5);
        assert_eq!(state.total_money(Currency::BRL).unwrap().amount_cents, 2550);
    }

    #[test]
    fn test_queries() {
        let state = CartState {
            lines: vec![line("A", 1.0, 4)],
        };
        let a = ProductId::new("A");
        let b = ProductId::new("B");

        assert_eq!(state.item_quantity(&a), 4);
        assert_eq!(state.item_quantity(&b), 0);
        assert!(state.is_in_cart(&a));
        assert!(!state.is_in_cart(&b));
        assert_eq!(state.line(&a).map(|l| l.quantity), Some(4));
    }

    #[test]
    fn test_line_serializes_camel_case() {
        let l = line("A", 1.0, 2);
        let value = serde_json::to_value(&l).unwrap();
        assert!(value.get("addedAt").is_some());
        assert_eq!(value["quantity"], 2);
        assert_eq!(value["product"]["id"], "A");
    }
}
