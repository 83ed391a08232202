//! The bridge between native shadow widgets and the managed host.
//!
//! [`Bridge`] is the instance API: it owns every shadow widget, performs all
//! remote calls through a [`HostRuntime`] and routes host events back to
//! callbacks. The [`global`] module wraps one bridge in a process-wide lock
//! for embeddings where the host calls in from arbitrary threads.
//! [`RecordingHost`] and [`NullHost`] are host doubles for tests and
//! headless operation.

pub mod core;
pub mod global;
pub mod recording;

pub use self::core::{Bridge, BridgeConfig, HostArg, HostRuntime, RemoteCall, SetOutcome};
pub use self::recording::{HostCall, HostJournal, NullHost, RecordingHost};
