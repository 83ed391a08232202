//! Typed attribute values crossing the host boundary.
//!
//! Downstream code imports the value types from here while the
//! implementation details live in the private `core` module.

mod core;

pub use core::{AttrValue, ValueKind};
