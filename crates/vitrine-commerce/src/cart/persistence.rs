//! Persisted cart record: a JSON array of lines.
//!
//! ```json
//! [{ "product": { "id": "1", "name": "...", "price": 10 }, "quantity": 2, "addedAt": "2024-05-01T12:00:00Z" }]
//! ```
//!
//! The whole array is rewritten on every change. Reading is lenient: the
//! record may have been written by an older client or edited by hand.

use crate::cart::CartLine;
use crate::catalog::Product;
use crate::error::CommerceError;
use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;

/// Why a stored record could not be read at all.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Bytes are not JSON.
    #[error("cart record is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// JSON, but not an array.
    #[error("cart record is a JSON {0}, expected an array")]
    NotAnArray(&'static str),
}

/// Result of reading a record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Decoded {
    /// Lines that were readable, in stored order.
    pub lines: Vec<CartLine>,
    /// Entries that were dropped as malformed.
    pub skipped: usize,
}

/// Serialize lines to the stored record format.
pub fn encode(lines: &[CartLine]) -> Result<Vec<u8>, CommerceError> {
    Ok(serde_json::to_vec(lines)?)
}

/// Read a stored record.
///
/// Entries without a `product.id`, without a positive integer `quantity`,
/// or whose product cannot be read are skipped. A missing or unreadable
/// `addedAt` is replaced with `now`.
pub fn decode(bytes: &[u8], now: DateTime<Utc>) -> Result<Decoded, DecodeError> {
    let value: Value = serde_json::from_slice(bytes)?;
    let entries = match value {
        Value::Array(entries) => entries,
        other => return Err(DecodeError::NotAnArray(kind(&other))),
    };

    let mut decoded = Decoded::default();
    for entry in entries {
        match decode_line(entry, now) {
            Some(line) => decoded.lines.push(line),
            None => decoded.skipped += 1,
        }
    }
    Ok(decoded)
}

fn decode_line(entry: Value, now: DateTime<Utc>) -> Option<CartLine> {
    let Value::Object(mut fields) = entry else {
        return None;
    };

    let quantity = fields.get("quantity").and_then(quantity_of)?;
    let product: Product = serde_json::from_value(fields.remove("product")?).ok()?;
    let added_at = fields
        .remove("addedAt")
        .and_then(|v| serde_json::from_value::<DateTime<Utc>>(v).ok())
        .unwrap_or(now);

    Some(CartLine::new(product, quantity, added_at))
}

fn quantity_of(value: &Value) -> Option<u32> {
    let n = match value.as_u64() {
        Some(n) => n,
        None => {
            let f = value.as_f64()?;
            if f.fract() != 0.0 || f < 1.0 || f > f64::from(u32::MAX) {
                return None;
            }
            f as u64
        }
    };
    u32::try_from(n).ok().filter(|q| *q > 0)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
