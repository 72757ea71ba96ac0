//! Cart domain types and logic for the Vitrine storefront.
//!
//! - **Catalog**: the product snapshot the cart holds, with locale-aware prices
//! - **Cart**: lines, the action reducer, the persisted record and [`CartStore`]
//! - **Checkout**: WhatsApp order message and link
//!
//! # Example
//!
//! ```rust
//! use vitrine_cache::MemoryStore;
//! use vitrine_commerce::prelude::*;
//!
//! let storage = MemoryStore::new();
//! let mut cart = CartStore::open(storage.clone());
//! cart.add_item(Product::new("1", "Batom", "R$ 1.234,56"), 1).unwrap();
//!
//! // A fresh store over the same storage sees the saved cart.
//! let reopened = CartStore::open(storage);
//! assert_eq!(reopened.total_price(), 1234.56);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;

pub use cart::CartStore;
pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Price, Product};

    // Cart
    pub use crate::cart::{
        reduce, CartAction, CartConfig, CartLine, CartState, CartStore, SubscriptionId,
        DEFAULT_CART_KEY,
    };

    // Checkout
    pub use crate::checkout::{CheckoutConfig, CheckoutMessage};
}
