//! Request handling.
//!
//! Dispatch (claim the path or delegate it) and stored-file response
//! building.

pub mod gateway;
pub mod responder;

pub use gateway::{Downstream, Gateway};
