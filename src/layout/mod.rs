//! Layout geometry mirrored on the native side.
//!
//! The crate performs no layout computation; these types only record what
//! the application asked the host to do, so the same requests can be
//! replayed after the host recreates its widgets.

mod core;

pub use core::{
    Gravity, LayoutParams, LayoutRule, Margins, Orientation, RuleSet, RuleTarget, MATCH_PARENT,
    RULE_COUNT, RULE_TRUE, WRAP_CONTENT,
};
