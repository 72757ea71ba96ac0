//! Product catalog module.
//!
//! The catalog itself lives in the hosted backend; this module only holds
//! the product shape the cart snapshots.

mod product;

pub use product::{Price, Product};
