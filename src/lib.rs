//! Native shadow-widget bridge to a managed GUI runtime.
//!
//! Widgets live as native shadow objects that mirror every attribute,
//! layout request and rule ever applied to their managed peers. When the
//! host tears its window down and brings it back, the bridge rebuilds the
//! entire widget tree from the shadows, in a fixed replay order, without
//! the application doing anything. Host events route back through owner
//! ids to per-widget callbacks.

pub mod bridge;
pub mod error;
pub mod event;
pub mod layout;
pub mod logging;
pub mod metrics;
pub mod registry;
pub mod store;
pub mod value;
pub mod widget;

pub use bridge::{
    Bridge, BridgeConfig, HostArg, HostCall, HostJournal, HostRuntime, NullHost, RecordingHost,
    RemoteCall, SetOutcome,
};
pub use error::{HostError, Result, UiError};
pub use event::{DialogButton, EventCallback, EventKind};
pub use layout::{
    Gravity, LayoutParams, LayoutRule, Margins, Orientation, RuleSet, RuleTarget, MATCH_PARENT,
    RULE_TRUE, WRAP_CONTENT,
};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink,
};
pub use metrics::{BridgeMetrics, MetricSnapshot};
pub use registry::{AttrDescriptor, AttrRegistry};
pub use store::AttrStore;
pub use value::{AttrValue, ValueKind};
pub use widget::{
    DerivedState, OwnerId, PeerHandle, ProgressBarStyle, ShadowWidget, WidgetKind,
};
