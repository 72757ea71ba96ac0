//! Checkout module.
//!
//! Orders are placed over WhatsApp: the cart is rendered into a message
//! and handed off as a `wa.me` link.

mod message;

pub use message::{CheckoutConfig, CheckoutMessage};
