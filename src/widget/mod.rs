//! Shadow widgets: native mirrors of managed peers.
//!
//! A [`ShadowWidget`] records everything the application has asked of one
//! managed widget so the bridge can rebuild the peer after the host tears it
//! down. [`WidgetKind`] carries the per-class capabilities: composed
//! attribute registry, container-ness and the events the kind delivers.

mod core;
mod kind;

pub use core::{DerivedState, OwnerId, PeerHandle, ShadowWidget};
pub use kind::{ProgressBarStyle, WidgetKind};
