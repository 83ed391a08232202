//! Error taxonomy for the bridge crate.

mod types;

pub use types::{HostError, Result, UiError};
