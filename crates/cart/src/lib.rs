//! Cart composition and quantity reconciliation.
//!
//! Implemented purely as deterministic domain logic (no IO, no HTTP, no
//! storage). Every operation takes the current [`Cart`] by reference and hands
//! back a new value; nothing here holds the active cart.
//!
//! Typical flow:
//!
//! ```ignore
//! let selection = Selection::begin(&item, &cart)?.with_quantity(3);
//! if selection.can_accept(&cart) {
//!     cart = selection.commit(&cart)?;
//! }
//! ```

pub mod accumulator;
pub mod builder;
pub mod cart;
pub mod email;
pub mod error;
pub mod line;
pub mod selection;

pub use accumulator::{can_accept, check, merge, remove};
pub use builder::begin_selection;
pub use cart::Cart;
pub use email::Email;
pub use error::CartError;
pub use line::OrderLine;
pub use selection::Selection;
