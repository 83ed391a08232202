//! Per-widget-kind attribute registries.
//!
//! A registry maps attribute names to their value kinds. Registries are
//! composed along the widget kind hierarchy and immutable once built; the
//! memoized per-kind instances live in [`crate::widget`].

mod core;

pub use core::{AttrDescriptor, AttrRegistry};
