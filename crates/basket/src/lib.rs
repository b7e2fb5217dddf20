//! The two client-side state containers and the reconciler between them and
//! the backend's apply responses.
//!
//! `ShoppingList` and `Cart` are deliberately distinct types with distinct
//! identity rules (case-insensitive name vs server-assigned id). They are
//! never unified into a generic item type; conflating the two identity
//! schemes was a latent bug source in earlier iterations of this design.

mod action;
mod cart;
mod list;
mod types;

pub use action::{ItemPatch, ListOp, classify_response};
pub use cart::Cart;
pub use list::{Reconciler, ShoppingList};
pub use types::{CartItem, ListItem, format_price};
