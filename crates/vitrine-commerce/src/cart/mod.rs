//! Shopping cart module.
//!
//! Contains the line/state types, the action reducer, the persisted record
//! codec and the store that ties them together.

mod action;
mod line;
pub mod persistence;
mod store;

pub use action::{reduce, CartAction};
pub use line::{CartLine, CartState};
pub use store::{CartConfig, CartStore, SubscriptionId, DEFAULT_CART_KEY};
