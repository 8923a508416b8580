//! Domain Value Objects
//!
//! Immutable value types shared by entities and services.

mod guard;
mod hash;
mod operation;
mod palette;

pub use guard::Guard;
pub use hash::ContentHash;
pub use operation::Operation;
pub use palette::{Palette, BOOTSTRAP_PALETTE};
