//! Shopping cart module.
//!
//! Contains the cart fields that service resolution reads and writes.

mod cart;

pub use cart::Cart;
