//! Per-instance attribute storage.
//!
//! Each shadow widget owns one [`AttrStore`] holding the last value requested
//! for every attribute the application has set. The store is the native-side
//! source of truth during reconstruction.

mod core;

pub use core::AttrStore;
