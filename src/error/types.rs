use thiserror::Error;

use crate::event::EventKind;
use crate::value::ValueKind;
use crate::widget::{OwnerId, WidgetKind};

/// Unified result type for the bridge crate.
pub type Result<T> = std::result::Result<T, UiError>;

/// Failure reported by the managed host for a remote call.
///
/// Remote failures never abort the native side; they degrade the affected
/// widget to local-only state.
#[derive(Debug, Clone, Error)]
pub enum HostError {
    #[error("host rejected remote method `{0}`")]
    Rejected(String),
    #[error("managed peer is gone")]
    PeerGone,
}

/// Errors surfaced by the bridge and shadow widgets.
///
/// Everything here is recoverable; a bad attribute name must never take the
/// embedding application down. The one fatal condition — conflicting
/// attribute declarations across kind tables — panics at registry build
/// time instead, because it is a defect in this crate, not a runtime input.
#[derive(Debug, Error)]
pub enum UiError {
    #[error("unknown attribute `{0}`")]
    UnknownAttribute(String),
    #[error("attribute `{name}` expects {expected}, got {found}")]
    KindMismatch {
        name: String,
        expected: ValueKind,
        found: ValueKind,
    },
    #[error("widget {0} not found")]
    WidgetNotFound(OwnerId),
    #[error("{kind:?} widgets do not deliver {event:?} events")]
    CallbackNotSupported { kind: WidgetKind, event: EventKind },
    #[error("{0:?} is not a container")]
    NotAContainer(WidgetKind),
    #[error("{0:?} is not a dialog")]
    NotADialog(WidgetKind),
    #[error("widget {0} is already attached")]
    AlreadyAttached(OwnerId),
    #[error("attaching widget {child} under {parent} would create an ownership cycle")]
    OwnershipCycle { parent: OwnerId, child: OwnerId },
    #[error("bridge is already initialized")]
    AlreadyInitialized,
    #[error("bridge is not initialized")]
    NotInitialized,
    #[error(transparent)]
    Host(#[from] HostError),
}
