use std::collections::HashMap;
use std::fmt;

use crate::error::{Result, UiError};
use crate::event::{DialogButton, EventCallback, EventKind};
use crate::layout::{LayoutParams, LayoutRule, Margins, RuleSet, RuleTarget};
use crate::store::AttrStore;
use crate::value::AttrValue;
use crate::widget::WidgetKind;

/// Stable native-side identity of a shadow widget.
///
/// The id is handed to the managed peer at creation and returned unchanged
/// in every event callback; it is the only piece of native state the managed
/// side ever holds. Event routing goes strictly through the bridge's id
/// table — a raw id from the host is never dereferenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OwnerId(u64);

impl OwnerId {
    pub fn from_raw(raw: u64) -> Self {
        OwnerId(raw)
    }

    pub fn to_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Opaque handle to the managed peer object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PeerHandle(u64);

impl PeerHandle {
    pub fn from_raw(raw: u64) -> Self {
        PeerHandle(raw)
    }

    pub fn to_raw(self) -> u64 {
        self.0
    }
}

/// Host-confirmed runtime state that lives outside the attribute store.
///
/// These fields are driven by event callbacks rather than `set_attribute`,
/// and they win over whatever the store holds when state is replayed: they
/// reflect the last value the host actually confirmed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DerivedState {
    None,
    Progress { current: i32 },
    Checked { current: bool },
}

impl DerivedState {
    fn for_kind(kind: WidgetKind) -> Self {
        if kind == WidgetKind::SeekBar {
            DerivedState::Progress { current: 0 }
        } else if kind.is_compound() {
            DerivedState::Checked { current: false }
        } else {
            DerivedState::None
        }
    }
}

/// Native shadow of one managed widget.
///
/// Owns everything needed to rebuild the peer from scratch: the attribute
/// store, layout requests, rules, derived state and the construction style.
/// The peer handle is `None` whenever the widget is disconnected (peer
/// creation failed, the widget was closed, or the bridge is suspended).
pub struct ShadowWidget {
    id: OwnerId,
    kind: WidgetKind,
    style: Option<i32>,
    peer: Option<PeerHandle>,
    store: AttrStore,
    layout: LayoutParams,
    margins: Margins,
    rules: RuleSet,
    derived: DerivedState,
    callbacks: HashMap<EventKind, EventCallback>,
    buttons: Vec<(DialogButton, String)>,
    button_callbacks: HashMap<DialogButton, EventCallback>,
    children: Vec<OwnerId>,
}

impl ShadowWidget {
    pub fn new(id: OwnerId, kind: WidgetKind, style: Option<i32>) -> Self {
        Self {
            id,
            kind,
            style,
            peer: None,
            store: AttrStore::new(),
            layout: LayoutParams::default(),
            margins: Margins::default(),
            rules: RuleSet::new(),
            derived: DerivedState::for_kind(kind),
            callbacks: HashMap::new(),
            buttons: Vec::new(),
            button_callbacks: HashMap::new(),
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> OwnerId {
        self.id
    }

    pub fn kind(&self) -> WidgetKind {
        self.kind
    }

    pub fn style(&self) -> Option<i32> {
        self.style
    }

    pub fn peer(&self) -> Option<PeerHandle> {
        self.peer
    }

    pub fn is_connected(&self) -> bool {
        self.peer.is_some()
    }

    pub fn set_peer(&mut self, peer: PeerHandle) {
        self.peer = Some(peer);
    }

    /// Drop the peer handle, returning it for destruction. Idempotent.
    pub fn take_peer(&mut self) -> Option<PeerHandle> {
        self.peer.take()
    }

    /// Validate and store an attribute locally.
    pub fn store_attribute(&mut self, name: &str, value: AttrValue) -> Result<()> {
        self.store.set(self.kind.registry(), name, value)
    }

    pub fn attribute(&self, name: &str) -> Option<&AttrValue> {
        self.store.get(name)
    }

    pub fn store(&self) -> &AttrStore {
        &self.store
    }

    pub fn layout(&self) -> LayoutParams {
        self.layout
    }

    pub fn set_layout(&mut self, params: LayoutParams) {
        self.layout = params;
    }

    pub fn margins(&self) -> Margins {
        self.margins
    }

    pub fn set_margins(&mut self, margins: Margins) {
        self.margins = margins;
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn record_rule(&mut self, rule: LayoutRule, target: RuleTarget) {
        self.rules.set(rule, target);
    }

    pub fn derived(&self) -> DerivedState {
        self.derived
    }

    /// Register a callback for `event`, replacing any previous one.
    pub fn set_callback(&mut self, event: EventKind, callback: EventCallback) -> Result<()> {
        if !self.kind.accepts(event) {
            return Err(UiError::CallbackNotSupported {
                kind: self.kind,
                event,
            });
        }
        self.callbacks.insert(event, callback);
        Ok(())
    }

    /// Take the callback slot for the duration of an invocation.
    pub fn take_callback(&mut self, event: EventKind) -> Option<EventCallback> {
        self.callbacks.remove(&event)
    }

    pub fn put_callback(&mut self, event: EventKind, callback: EventCallback) {
        self.callbacks.insert(event, callback);
    }

    /// Record an alert dialog button label, replacing a prior label for the
    /// same slot while keeping first-set order for replay.
    pub fn record_button(&mut self, button: DialogButton, text: &str) {
        match self.buttons.iter_mut().find(|(b, _)| *b == button) {
            Some(entry) => entry.1 = text.to_owned(),
            None => self.buttons.push((button, text.to_owned())),
        }
    }

    pub fn buttons(&self) -> &[(DialogButton, String)] {
        &self.buttons
    }

    pub fn set_button_callback(&mut self, button: DialogButton, callback: EventCallback) {
        self.button_callbacks.insert(button, callback);
    }

    pub fn take_button_callback(&mut self, button: DialogButton) -> Option<EventCallback> {
        self.button_callbacks.remove(&button)
    }

    pub fn put_button_callback(&mut self, button: DialogButton, callback: EventCallback) {
        self.button_callbacks.insert(button, callback);
    }

    /// Fold an incoming event into derived state.
    ///
    /// Runs for every accepted event, callback or not, so a later replay
    /// reflects the host's last confirmed value.
    pub fn apply_event(&mut self, event: EventKind, param1: i32, _param2: i32) {
        match (event, &mut self.derived) {
            (EventKind::SeekBarProgressChanged, DerivedState::Progress { current }) => {
                *current = param1;
            }
            (EventKind::CheckedChanged, DerivedState::Checked { current }) => {
                *current = param1 != 0;
            }
            _ => {}
        }
    }

    pub fn children(&self) -> &[OwnerId] {
        &self.children
    }

    pub fn push_child(&mut self, child: OwnerId) {
        self.children.push(child);
    }

    pub fn remove_child(&mut self, child: OwnerId) {
        self.children.retain(|&c| c != child);
    }

    pub fn has_child(&self, child: OwnerId) -> bool {
        self.children.contains(&child)
    }
}

impl fmt::Debug for ShadowWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShadowWidget")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("peer", &self.peer)
            .field("attributes", &self.store.len())
            .field("children", &self.children.len())
            .finish()
    }
}
