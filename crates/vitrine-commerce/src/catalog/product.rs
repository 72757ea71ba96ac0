//! Product snapshot as the cart sees it.

use crate::ids::{CategoryId, ProductId};
use crate::money::parse_locale_amount;
use serde::{Deserialize, Deserializer, Serialize};

/// Catalog price: either a number or a formatted string such as `"R$ 49,90"`.
///
/// Anything else the catalog sends (`null`, a boolean, an object) is kept
/// as `Other` and priced at zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl Price {
    /// Unit amount used for totals. Unparseable prices count as zero.
    pub fn unit_amount(&self) -> f64 {
        match self {
            Price::Number(value) if value.is_finite() => *value,
            Price::Number(_) => 0.0,
            Price::Text(text) => parse_locale_amount(text).unwrap_or(0.0),
            Price::Other(_) => 0.0,
        }
    }
}

impl Default for Price {
    fn default() -> Self {
        Price::Number(0.0)
    }
}

impl From<f64> for Price {
    fn from(value: f64) -> Self {
        Price::Number(value)
    }
}

impl From<&str> for Price {
    fn from(value: &str) -> Self {
        Price::Text(value.to_string())
    }
}

impl From<String> for Price {
    fn from(value: String) -> Self {
        Price::Text(value)
    }
}

/// A product record from the catalog.
///
/// The cart snapshots this at add time and never re-syncs it. Fields the
/// cart does not interpret are kept in `extra` so the snapshot survives a
/// persistence round-trip intact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog identifier; the cart's identity key.
    pub id: ProductId,
    /// Display name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Unit price.
    #[serde(default)]
    pub price: Price,
    /// Primary image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Gallery image URLs.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub images: Vec<String>,
    /// Category the product is listed under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryId>,
    /// Any other catalog fields, carried through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Nullable catalog columns arrive as `null`; read them as the default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Product {
    /// Create a product with just an id, name and price.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: impl Into<Price>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price: price.into(),
            image: None,
            images: Vec::new(),
            category: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Set the primary image.
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<CategoryId>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Unit price as a number.
    pub fn unit_price(&self) -> f64 {
        self.price.unit_amount()
    }

    /// Image to show in listings: the primary image, else the first gallery image.
    pub fn thumbnail(&self) -> Option<&str> {
        self.image
            .as_deref()
            .or_else(|| self.images.first().map(String::as_str))
    }
}
