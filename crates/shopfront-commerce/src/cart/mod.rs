//! Shopping cart module.
//!
//! Contains the cart, its items, and the per-item quantity cap.

mod cart;

pub use cart::{Cart, CartItem, MAX_QUANTITY_PER_ITEM};
