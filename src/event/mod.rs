//! Event messages delivered by the managed runtime.
//!
//! The host reports widget events as an `(owner id, message, param1, param2)`
//! tuple. Message codes are part of the wire contract with the host helper;
//! codes this crate does not know are ignored so newer hosts stay compatible.

use crate::widget::OwnerId;

/// Decoded event message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    SeekBarStopTracking,
    SeekBarStartTracking,
    SeekBarProgressChanged,
    CheckedChanged,
    ButtonDown,
    ButtonUp,
    ButtonCanceled,
    DialogDismissed,
    DialogCancelled,
}

impl EventKind {
    /// Decode a raw message code. Unknown codes yield `None` and the event
    /// is dropped by the dispatcher.
    pub fn from_raw(message: i32) -> Option<Self> {
        match message {
            1 => Some(EventKind::SeekBarStopTracking),
            2 => Some(EventKind::SeekBarStartTracking),
            3 => Some(EventKind::SeekBarProgressChanged),
            4 => Some(EventKind::CheckedChanged),
            5 => Some(EventKind::ButtonDown),
            6 => Some(EventKind::ButtonUp),
            7 => Some(EventKind::ButtonCanceled),
            108 => Some(EventKind::DialogDismissed),
            109 => Some(EventKind::DialogCancelled),
            _ => None,
        }
    }

    pub fn raw(self) -> i32 {
        match self {
            EventKind::SeekBarStopTracking => 1,
            EventKind::SeekBarStartTracking => 2,
            EventKind::SeekBarProgressChanged => 3,
            EventKind::CheckedChanged => 4,
            EventKind::ButtonDown => 5,
            EventKind::ButtonUp => 6,
            EventKind::ButtonCanceled => 7,
            EventKind::DialogDismissed => 108,
            EventKind::DialogCancelled => 109,
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            EventKind::SeekBarStopTracking => "seekbar_stop_tracking",
            EventKind::SeekBarStartTracking => "seekbar_start_tracking",
            EventKind::SeekBarProgressChanged => "seekbar_progress_changed",
            EventKind::CheckedChanged => "checked_changed",
            EventKind::ButtonDown => "button_down",
            EventKind::ButtonUp => "button_up",
            EventKind::ButtonCanceled => "button_canceled",
            EventKind::DialogDismissed => "dialog_dismissed",
            EventKind::DialogCancelled => "dialog_cancelled",
        }
    }
}

/// User callback registered for one event kind on one widget.
///
/// Callbacks run on the host's callback thread with the bridge lock held;
/// they must not call back into the bridge.
pub type EventCallback = Box<dyn FnMut(OwnerId, EventKind, i32, i32) + Send>;

/// Alert dialog button slot, encoded with the host's button codes.
///
/// When an alert dialog button is pressed the host dismisses the dialog and
/// reports the pressed button's code in `param1` of the dismissed event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum DialogButton {
    Positive = -1,
    Negative = -2,
    Neutral = -3,
}

impl DialogButton {
    pub fn from_raw(code: i32) -> Option<Self> {
        match code {
            -1 => Some(DialogButton::Positive),
            -2 => Some(DialogButton::Negative),
            -3 => Some(DialogButton::Neutral),
            _ => None,
        }
    }

    pub fn raw(self) -> i32 {
        self as i32
    }
}
