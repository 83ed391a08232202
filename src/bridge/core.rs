use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use serde_json::json;

use crate::error::{HostError, Result, UiError};
use crate::event::{DialogButton, EventKind};
use crate::layout::{LayoutParams, LayoutRule, Margins, RuleTarget};
use crate::logging::{event_with_fields, json_kv, LogLevel, Logger};
use crate::metrics::BridgeMetrics;
use crate::value::AttrValue;
use crate::widget::{DerivedState, OwnerId, PeerHandle, ShadowWidget, WidgetKind};

const LOG_TARGET: &str = "uibridge::bridge";

/// One typed argument of a remote call.
#[derive(Debug, Clone, PartialEq)]
pub enum HostArg {
    Int(i32),
    Float(f32),
    Bool(bool),
    Str(String),
    Peer(PeerHandle),
    Owner(OwnerId),
}

/// A remote method invocation on a managed peer.
///
/// `method` is derived from the attribute name (`set` + name) or is one of
/// the fixed tree/layout verbs; `signature` is the typed-call encoding the
/// host expects, fixed per [`crate::value::ValueKind`]. A signature mismatch
/// is a host-side error, not something this crate can catch.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteCall {
    pub method: String,
    pub signature: &'static str,
    pub args: Vec<HostArg>,
}

/// The managed host runtime, seen from the native side.
///
/// Every call is synchronous and blocks the calling thread until the host
/// responds; there are no timeouts. Implementations live outside this crate
/// (production: the FFI layer; tests: [`crate::bridge::RecordingHost`]).
pub trait HostRuntime: Send {
    /// Ask the host to instantiate a widget of `class`. The host keeps
    /// `owner` and echoes it in every event callback. `None` means the host
    /// rejected creation; the shadow stays usable disconnected.
    fn create_widget(&mut self, class: &str, owner: OwnerId, style: Option<i32>)
        -> Option<PeerHandle>;

    /// Invoke a remote method on a live peer.
    fn invoke(&mut self, peer: PeerHandle, call: RemoteCall) -> std::result::Result<(), HostError>;

    /// Destroy a peer. Best effort; failures are the host's problem.
    fn destroy_widget(&mut self, peer: PeerHandle);

    /// Put a top-level peer onto the host window.
    fn attach_root(&mut self, peer: PeerHandle);
}

/// Whether a `set_attribute` reached the peer or only local state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    /// Stored locally and applied to the managed peer.
    Applied,
    /// Stored locally only; the widget is disconnected or the remote call
    /// failed. A later restore retries the value.
    StoredLocally,
}

/// Configuration knobs for a [`Bridge`].
#[derive(Clone, Default)]
pub struct BridgeConfig {
    /// Optional structured logger for bridge internals.
    pub logger: Option<Logger>,
    /// Optional metrics accumulator.
    pub metrics: Option<Arc<Mutex<BridgeMetrics>>>,
}

impl BridgeConfig {
    /// Enable metrics collection if it has not already been configured.
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(BridgeMetrics::new())));
        }
    }

    /// Access the shared metrics handle if metrics are enabled.
    pub fn metrics_handle(&self) -> Option<Arc<Mutex<BridgeMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }
}

/// Gateway between native shadow widgets and the managed host runtime.
///
/// Owns the owner-id table, the ordered top-level roots and the single
/// active dialog. All widget operations go through here so that remote
/// calls, local mirrors and event routing cannot drift apart.
///
/// The struct itself is single-threaded; cross-thread serialization is the
/// job of the process-wide lock in [`crate::bridge::global`].
pub struct Bridge {
    host: Box<dyn HostRuntime>,
    widgets: HashMap<OwnerId, ShadowWidget>,
    roots: Vec<OwnerId>,
    dialog: Option<OwnerId>,
    suspended: bool,
    next_owner: u64,
    config: BridgeConfig,
    started: Instant,
}

impl Bridge {
    pub fn new(host: impl HostRuntime + 'static) -> Self {
        Self::with_config(host, BridgeConfig::default())
    }

    pub fn with_config(host: impl HostRuntime + 'static, config: BridgeConfig) -> Self {
        Self {
            host: Box::new(host),
            widgets: HashMap::new(),
            roots: Vec::new(),
            dialog: None,
            suspended: false,
            next_owner: 1,
            config,
            started: Instant::now(),
        }
    }

    pub fn config_mut(&mut self) -> &mut BridgeConfig {
        &mut self.config
    }

    // ----- construction and teardown -------------------------------------

    /// Create a shadow widget and immediately attempt peer creation.
    ///
    /// Peer rejection is logged, not fatal: the widget starts disconnected
    /// and every subsequent call degrades to local-only storage.
    pub fn create_widget(&mut self, kind: WidgetKind) -> OwnerId {
        self.create_styled(kind, None)
    }

    /// Like [`Bridge::create_widget`] with a host-specific style code
    /// (e.g. a progress bar style). The style is kept and re-sent when the
    /// peer is recreated.
    pub fn create_styled(&mut self, kind: WidgetKind, style: Option<i32>) -> OwnerId {
        let id = OwnerId::from_raw(self.next_owner);
        self.next_owner += 1;
        let mut widget = ShadowWidget::new(id, kind, style);
        if !self.suspended {
            if let Some(peer) = self.create_peer(id, kind, style) {
                widget.set_peer(peer);
            }
        }
        self.widgets.insert(id, widget);
        id
    }

    /// Destroy the peer (and all child peers, children first) but keep the
    /// shadow state. Idempotent: closing a disconnected widget is a no-op.
    pub fn close_widget(&mut self, id: OwnerId) -> Result<()> {
        if !self.widgets.contains_key(&id) {
            return Err(UiError::WidgetNotFound(id));
        }
        self.teardown_tree(id);
        if self.dialog == Some(id) {
            self.dialog = None;
        }
        Ok(())
    }

    /// Remove the widget and its whole subtree: peers destroyed, shadows
    /// dropped, parent and root references cleaned up.
    pub fn remove_widget(&mut self, id: OwnerId) -> Result<()> {
        self.close_widget(id)?;
        self.roots.retain(|&r| r != id);
        for widget in self.widgets.values_mut() {
            widget.remove_child(id);
        }
        let mut subtree = Vec::new();
        self.collect_subtree(id, &mut subtree);
        for sid in subtree {
            self.widgets.remove(&sid);
        }
        Ok(())
    }

    // ----- attributes ----------------------------------------------------

    /// Validate, store and forward an attribute.
    ///
    /// Validation failures leave both sides untouched. When the widget is
    /// disconnected or the remote call fails, the local store still holds
    /// the value (`StoredLocally`) so a later restore retries it.
    pub fn set_attribute(
        &mut self,
        id: OwnerId,
        name: &str,
        value: impl Into<AttrValue>,
    ) -> Result<SetOutcome> {
        let value = value.into();
        let call = set_call(name, &value);
        let widget = self
            .widgets
            .get_mut(&id)
            .ok_or(UiError::WidgetNotFound(id))?;
        widget.store_attribute(name, value)?;
        let peer = widget.peer();
        let suspended = self.suspended;
        match peer {
            Some(peer) if !suspended => {
                if self.invoke_logged(peer, call) {
                    Ok(SetOutcome::Applied)
                } else {
                    self.record(BridgeMetrics::record_local_only_set);
                    Ok(SetOutcome::StoredLocally)
                }
            }
            _ => {
                self.record(BridgeMetrics::record_local_only_set);
                Ok(SetOutcome::StoredLocally)
            }
        }
    }

    /// Read the locally cached value. Attributes never set are absent; the
    /// store does not pull live state from the peer.
    pub fn attribute(&self, id: OwnerId, name: &str) -> Option<&AttrValue> {
        self.widgets.get(&id).and_then(|w| w.attribute(name))
    }

    // ----- layout --------------------------------------------------------

    pub fn set_layout_params(&mut self, id: OwnerId, width: i32, height: i32) -> Result<()> {
        self.apply_layout(
            id,
            LayoutParams {
                width,
                height,
                weight: None,
            },
        )
    }

    pub fn set_layout_weighted(
        &mut self,
        id: OwnerId,
        width: i32,
        height: i32,
        weight: f32,
    ) -> Result<()> {
        self.apply_layout(
            id,
            LayoutParams {
                width,
                height,
                weight: Some(weight),
            },
        )
    }

    fn apply_layout(&mut self, id: OwnerId, params: LayoutParams) -> Result<()> {
        let widget = self
            .widgets
            .get_mut(&id)
            .ok_or(UiError::WidgetNotFound(id))?;
        widget.set_layout(params);
        let peer = widget.peer();
        if let Some(peer) = peer {
            if !self.suspended {
                self.invoke_logged(peer, layout_call(params));
            }
        }
        Ok(())
    }

    pub fn set_margins(
        &mut self,
        id: OwnerId,
        left: i32,
        top: i32,
        right: i32,
        bottom: i32,
    ) -> Result<()> {
        let margins = Margins {
            left,
            top,
            right,
            bottom,
        };
        let widget = self
            .widgets
            .get_mut(&id)
            .ok_or(UiError::WidgetNotFound(id))?;
        widget.set_margins(margins);
        let peer = widget.peer();
        if let Some(peer) = peer {
            if !self.suspended {
                self.invoke_logged(peer, margins_call(margins));
            }
        }
        Ok(())
    }

    /// Record a relative-layout rule and forward it to the peer.
    pub fn add_rule(&mut self, id: OwnerId, rule: LayoutRule, target: RuleTarget) -> Result<()> {
        let widget = self
            .widgets
            .get_mut(&id)
            .ok_or(UiError::WidgetNotFound(id))?;
        widget.record_rule(rule, target);
        let peer = widget.peer();
        if let Some(peer) = peer {
            if !self.suspended {
                self.invoke_logged(peer, rule_call(rule, target));
            }
        }
        Ok(())
    }

    // ----- callbacks and events ------------------------------------------

    /// Register a callback for one event kind, replacing any previous one.
    /// Fails when the widget kind never delivers that event.
    pub fn set_callback(
        &mut self,
        id: OwnerId,
        event: EventKind,
        callback: impl FnMut(OwnerId, EventKind, i32, i32) + Send + 'static,
    ) -> Result<()> {
        let widget = self
            .widgets
            .get_mut(&id)
            .ok_or(UiError::WidgetNotFound(id))?;
        widget.set_callback(event, Box::new(callback))
    }

    /// Configure one alert dialog button: its label and the callback invoked
    /// when the host dismisses the dialog through that button.
    ///
    /// The press arrives as a dismissed event carrying the button's slot
    /// code; the matching callback runs in addition to any dismissed-event
    /// callback. Labels are kept and replayed when the peer is recreated.
    pub fn set_button(
        &mut self,
        id: OwnerId,
        button: DialogButton,
        text: &str,
        callback: impl FnMut(OwnerId, EventKind, i32, i32) + Send + 'static,
    ) -> Result<()> {
        let widget = self
            .widgets
            .get_mut(&id)
            .ok_or(UiError::WidgetNotFound(id))?;
        if widget.kind() != WidgetKind::AlertDialog {
            return Err(UiError::NotADialog(widget.kind()));
        }
        widget.record_button(button, text);
        widget.set_button_callback(button, Box::new(callback));
        let peer = widget.peer();
        if let Some(peer) = peer {
            if !self.suspended {
                self.invoke_logged(peer, set_button_call(button, text));
            }
        }
        Ok(())
    }

    /// Route one host event to its shadow widget.
    ///
    /// Unknown message codes and owner ids that no longer map to a live
    /// widget are dropped silently — the host may race widget destruction
    /// and may speak a newer message vocabulary. Derived state is updated
    /// before the user callback runs, and updated even when no callback is
    /// registered.
    pub fn dispatch(&mut self, owner: OwnerId, message: i32, param1: i32, param2: i32) {
        self.record(BridgeMetrics::record_event);
        let Some(event) = EventKind::from_raw(message) else {
            self.log(
                LogLevel::Debug,
                "unknown_event_ignored",
                [json_kv("message", json!(message))],
            );
            return;
        };
        let Some(widget) = self.widgets.get_mut(&owner) else {
            self.record(BridgeMetrics::record_stale_event);
            self.log(
                LogLevel::Debug,
                "stale_event_dropped",
                [
                    json_kv("owner", json!(owner.to_raw())),
                    json_kv("event", json!(event.describe())),
                ],
            );
            return;
        };
        // A destroyed peer cannot be the event's source; anything arriving
        // for a disconnected widget is a leftover from before teardown.
        if !widget.is_connected() {
            self.record(BridgeMetrics::record_stale_event);
            return;
        }
        if !widget.kind().accepts(event) {
            return;
        }
        widget.apply_event(event, param1, param2);
        let mut consumed = false;
        if event == EventKind::DialogDismissed {
            if let Some(button) = DialogButton::from_raw(param1) {
                if let Some(mut callback) = widget.take_button_callback(button) {
                    callback(owner, event, param1, param2);
                    consumed = true;
                    if let Some(widget) = self.widgets.get_mut(&owner) {
                        widget.put_button_callback(button, callback);
                    }
                }
            }
        }
        let callback = self
            .widgets
            .get_mut(&owner)
            .and_then(|w| w.take_callback(event));
        consumed |= callback.is_some();
        if let Some(mut callback) = callback {
            callback(owner, event, param1, param2);
            if let Some(widget) = self.widgets.get_mut(&owner) {
                widget.put_callback(event, callback);
            }
        }
        self.log(
            LogLevel::Debug,
            "event_dispatched",
            [
                json_kv("owner", json!(owner.to_raw())),
                json_kv("event", json!(event.describe())),
                json_kv("consumed", json!(consumed)),
            ],
        );
    }

    // ----- tree ----------------------------------------------------------

    /// Hand a widget to a container, which owns it from now on.
    ///
    /// When the container is connected the child's peer is reparented
    /// immediately; a disconnected child gets its peer created (and its
    /// accumulated state replayed) on the spot.
    pub fn add_child(&mut self, parent: OwnerId, child: OwnerId) -> Result<()> {
        let parent_kind = self
            .widgets
            .get(&parent)
            .ok_or(UiError::WidgetNotFound(parent))?
            .kind();
        if !parent_kind.is_container() {
            return Err(UiError::NotAContainer(parent_kind));
        }
        if !self.widgets.contains_key(&child) {
            return Err(UiError::WidgetNotFound(child));
        }
        if self.is_attached(child) {
            return Err(UiError::AlreadyAttached(child));
        }
        // Ownership is a tree; a parent inside the child's own subtree
        // would make teardown and restore recurse forever.
        let mut subtree = Vec::new();
        self.collect_subtree(child, &mut subtree);
        if subtree.contains(&parent) {
            return Err(UiError::OwnershipCycle { parent, child });
        }
        if let Some(widget) = self.widgets.get_mut(&parent) {
            widget.push_child(child);
        }
        if self.suspended {
            return Ok(());
        }
        let parent_peer = self.widgets.get(&parent).and_then(|w| w.peer());
        let Some(parent_peer) = parent_peer else {
            return Ok(());
        };
        let child_peer = self.widgets.get(&child).and_then(|w| w.peer());
        match child_peer {
            Some(peer) => {
                self.invoke_logged(parent_peer, add_view_call(peer));
            }
            None => self.restore_tree(child, Some(parent_peer)),
        }
        Ok(())
    }

    /// Put a widget at top level on the host window.
    pub fn attach_root(&mut self, id: OwnerId) -> Result<()> {
        if !self.widgets.contains_key(&id) {
            return Err(UiError::WidgetNotFound(id));
        }
        if self.is_attached(id) {
            return Err(UiError::AlreadyAttached(id));
        }
        self.roots.push(id);
        if self.suspended {
            return Ok(());
        }
        match self.widgets.get(&id).and_then(|w| w.peer()) {
            Some(peer) => self.host.attach_root(peer),
            None => {
                self.restore_tree(id, None);
                if let Some(peer) = self.widgets.get(&id).and_then(|w| w.peer()) {
                    self.host.attach_root(peer);
                }
            }
        }
        Ok(())
    }

    /// Show a dialog widget, making it the single active modal dialog.
    pub fn show_dialog(&mut self, id: OwnerId) -> Result<()> {
        let kind = self
            .widgets
            .get(&id)
            .ok_or(UiError::WidgetNotFound(id))?
            .kind();
        if !kind.is_dialog() {
            return Err(UiError::NotADialog(kind));
        }
        if !self.suspended && self.widgets.get(&id).is_some_and(|w| !w.is_connected()) {
            self.restore_tree(id, None);
        }
        if let Some(previous) = self.dialog {
            if previous != id {
                self.log(
                    LogLevel::Warn,
                    "dialog_replaced",
                    [json_kv("previous", json!(previous.to_raw()))],
                );
                self.teardown_tree(previous);
            }
        }
        self.dialog = Some(id);
        if !self.suspended {
            if let Some(peer) = self.widgets.get(&id).and_then(|w| w.peer()) {
                self.invoke_logged(peer, show_dialog_call());
            }
        }
        Ok(())
    }

    /// Dismiss a dialog: the peer is told to dismiss, then destroyed. The
    /// shadow survives and the dialog can be shown again later.
    pub fn dismiss_dialog(&mut self, id: OwnerId) -> Result<()> {
        let kind = self
            .widgets
            .get(&id)
            .ok_or(UiError::WidgetNotFound(id))?
            .kind();
        if !kind.is_dialog() {
            return Err(UiError::NotADialog(kind));
        }
        if let Some(peer) = self.widgets.get(&id).and_then(|w| w.peer()) {
            self.invoke_logged(peer, dismiss_dialog_call());
        }
        self.teardown_tree(id);
        if self.dialog == Some(id) {
            self.dialog = None;
        }
        Ok(())
    }

    // ----- lifecycle ------------------------------------------------------

    /// Tear down every managed peer ahead of a host lifecycle boundary.
    ///
    /// Shadow state survives untouched; peers are destroyed children first
    /// so no child peer outlives its container's.
    pub fn suspend(&mut self, reason: i32) {
        if self.suspended {
            return;
        }
        self.suspended = true;
        self.log(
            LogLevel::Info,
            "bridge_suspended",
            [json_kv("reason", json!(reason))],
        );
        if let Some(dialog) = self.dialog {
            self.teardown_tree(dialog);
        }
        let roots = self.roots.clone();
        for root in roots {
            self.teardown_tree(root);
        }
        let strays: Vec<OwnerId> = self
            .widgets
            .iter()
            .filter(|(_, w)| w.is_connected())
            .map(|(&id, _)| id)
            .collect();
        for id in strays {
            self.release_peer(id);
        }
    }

    /// Rebuild every attached peer after the host comes back.
    ///
    /// Roots are restored top-down in insertion order — container first,
    /// then its children in the order they were added — and re-attached to
    /// the host window. The active dialog, if any, is recreated and shown
    /// last.
    pub fn resume(&mut self, reason: i32) {
        if !self.suspended {
            return;
        }
        self.suspended = false;
        self.log(
            LogLevel::Info,
            "bridge_resumed",
            [json_kv("reason", json!(reason))],
        );
        let roots = self.roots.clone();
        for root in roots {
            self.restore_tree(root, None);
            if let Some(peer) = self.widgets.get(&root).and_then(|w| w.peer()) {
                self.host.attach_root(peer);
            }
        }
        if let Some(dialog) = self.dialog {
            self.restore_tree(dialog, None);
            if let Some(peer) = self.widgets.get(&dialog).and_then(|w| w.peer()) {
                self.invoke_logged(peer, show_dialog_call());
            }
        }
    }

    /// Destroy all peers and drop all shadow state. Used when the bridge is
    /// closed for good.
    pub fn shutdown(&mut self) {
        if let Some(dialog) = self.dialog.take() {
            self.teardown_tree(dialog);
        }
        let roots = std::mem::take(&mut self.roots);
        for root in roots {
            self.teardown_tree(root);
        }
        let strays: Vec<OwnerId> = self
            .widgets
            .iter()
            .filter(|(_, w)| w.is_connected())
            .map(|(&id, _)| id)
            .collect();
        for id in strays {
            self.release_peer(id);
        }
        self.widgets.clear();
        self.log(LogLevel::Info, "bridge_closed", std::iter::empty());
    }

    // ----- introspection --------------------------------------------------

    pub fn is_connected(&self, id: OwnerId) -> bool {
        self.widgets.get(&id).is_some_and(|w| w.is_connected())
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    pub fn widget_kind(&self, id: OwnerId) -> Option<WidgetKind> {
        self.widgets.get(&id).map(|w| w.kind())
    }

    pub fn children(&self, id: OwnerId) -> Option<Vec<OwnerId>> {
        self.widgets.get(&id).map(|w| w.children().to_vec())
    }

    pub fn widget_count(&self) -> usize {
        self.widgets.len()
    }

    /// Host-confirmed checked flag for compound-button kinds.
    pub fn is_checked(&self, id: OwnerId) -> Option<bool> {
        match self.widgets.get(&id)?.derived() {
            DerivedState::Checked { current } => Some(current),
            _ => None,
        }
    }

    /// Host-confirmed progress for seek bars.
    pub fn progress(&self, id: OwnerId) -> Option<i32> {
        match self.widgets.get(&id)?.derived() {
            DerivedState::Progress { current } => Some(current),
            _ => None,
        }
    }

    /// Emit a metrics snapshot through the configured logger.
    pub fn emit_metrics(&self) {
        let (Some(logger), Some(metrics)) =
            (self.config.logger.as_ref(), self.config.metrics.as_ref())
        else {
            return;
        };
        if let Ok(guard) = metrics.lock() {
            let snapshot = guard.snapshot(self.started.elapsed());
            let _ = logger.log_event(snapshot.to_log_event("uibridge::bridge.metrics"));
        }
    }

    // ----- internals ------------------------------------------------------

    fn is_attached(&self, id: OwnerId) -> bool {
        self.roots.contains(&id) || self.widgets.values().any(|w| w.has_child(id))
    }

    fn create_peer(
        &mut self,
        id: OwnerId,
        kind: WidgetKind,
        style: Option<i32>,
    ) -> Option<PeerHandle> {
        let peer = self.host.create_widget(kind.remote_class(), id, style);
        match peer {
            Some(_) => self.record(BridgeMetrics::record_peer_created),
            None => {
                self.record(BridgeMetrics::record_peer_failure);
                self.log(
                    LogLevel::Warn,
                    "peer_create_failed",
                    [
                        json_kv("owner", json!(id.to_raw())),
                        json_kv("class", json!(kind.remote_class())),
                    ],
                );
            }
        }
        peer
    }

    /// Recreate one widget's peer and replay its accumulated state.
    ///
    /// Replay order is a contract with the host: layout rules, then generic
    /// attributes, then layout params, then margins, then derived state.
    /// Children follow their parent, in insertion order, each reparented as
    /// it comes back. Derived state goes straight to the peer without
    /// touching the store, so repeating a restore replays an identical call
    /// sequence.
    fn restore_tree(&mut self, id: OwnerId, parent_peer: Option<PeerHandle>) {
        let Some(mut widget) = self.widgets.remove(&id) else {
            return;
        };
        self.record(BridgeMetrics::record_restore);
        widget.take_peer();
        if let Some(peer) = self.create_peer(id, widget.kind(), widget.style()) {
            widget.set_peer(peer);
            for (rule, target) in widget.rules().iter_set() {
                self.invoke_logged(peer, rule_call(rule, target));
            }
            for (name, value) in widget.store().snapshot() {
                self.invoke_logged(peer, set_call(&name, &value));
            }
            let layout = widget.layout();
            if !layout.is_default() {
                self.invoke_logged(peer, layout_call(layout));
            }
            let margins = widget.margins();
            if !margins.is_zero() {
                self.invoke_logged(peer, margins_call(margins));
            }
            for &(button, ref text) in widget.buttons() {
                self.invoke_logged(peer, set_button_call(button, text));
            }
            match widget.derived() {
                DerivedState::Progress { current } => {
                    self.invoke_logged(peer, set_call("Progress", &AttrValue::Int(current)));
                }
                DerivedState::Checked { current } => {
                    self.invoke_logged(peer, set_call("Checked", &AttrValue::Bool(current)));
                }
                DerivedState::None => {}
            }
            if let Some(parent_peer) = parent_peer {
                self.invoke_logged(parent_peer, add_view_call(peer));
            }
        }
        let children = widget.children().to_vec();
        let own_peer = widget.peer();
        self.widgets.insert(id, widget);
        for child in children {
            self.restore_tree(child, own_peer);
        }
    }

    /// Destroy peers in a subtree, children before parents.
    fn teardown_tree(&mut self, id: OwnerId) {
        let children = match self.widgets.get(&id) {
            Some(widget) => widget.children().to_vec(),
            None => return,
        };
        for child in children {
            self.teardown_tree(child);
        }
        self.release_peer(id);
    }

    fn release_peer(&mut self, id: OwnerId) {
        let Some(widget) = self.widgets.get_mut(&id) else {
            return;
        };
        if let Some(peer) = widget.take_peer() {
            self.host.destroy_widget(peer);
        }
    }

    fn collect_subtree(&self, id: OwnerId, out: &mut Vec<OwnerId>) {
        if let Some(widget) = self.widgets.get(&id) {
            for &child in widget.children() {
                self.collect_subtree(child, out);
            }
        }
        out.push(id);
    }

    /// Forward a call to the host, logging and absorbing failures.
    fn invoke_logged(&mut self, peer: PeerHandle, call: RemoteCall) -> bool {
        self.record(BridgeMetrics::record_remote_call);
        let method = call.method.clone();
        match self.host.invoke(peer, call) {
            Ok(()) => true,
            Err(err) => {
                self.log(
                    LogLevel::Warn,
                    "remote_call_failed",
                    [
                        json_kv("method", json!(method)),
                        json_kv("error", json!(err.to_string())),
                    ],
                );
                false
            }
        }
    }

    fn log<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, serde_json::Value)>,
    {
        if let Some(logger) = self.config.logger.as_ref() {
            let event = event_with_fields(level, LOG_TARGET, message, fields);
            let _ = logger.log_event(event);
        }
    }

    fn record(&self, f: impl FnOnce(&mut BridgeMetrics)) {
        if let Some(metrics) = self.config.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                f(&mut guard);
            }
        }
    }
}

// ----- remote call builders ----------------------------------------------

fn value_args(value: &AttrValue) -> Vec<HostArg> {
    match value {
        AttrValue::Int(a) => vec![HostArg::Int(*a)],
        AttrValue::Float(a) => vec![HostArg::Float(*a)],
        AttrValue::Bool(a) => vec![HostArg::Bool(*a)],
        AttrValue::Text(a) => vec![HostArg::Str(a.clone())],
        AttrValue::IntFloat(a, b) => vec![HostArg::Int(*a), HostArg::Float(*b)],
        AttrValue::FloatFloat(a, b) => vec![HostArg::Float(*a), HostArg::Float(*b)],
        AttrValue::IntTriple(a, b, c) => {
            vec![HostArg::Int(*a), HostArg::Int(*b), HostArg::Int(*c)]
        }
        AttrValue::IntQuad(a, b, c, d) => vec![
            HostArg::Int(*a),
            HostArg::Int(*b),
            HostArg::Int(*c),
            HostArg::Int(*d),
        ],
        AttrValue::FloatTripleInt(a, b, c, d) => vec![
            HostArg::Float(*a),
            HostArg::Float(*b),
            HostArg::Float(*c),
            HostArg::Int(*d),
        ],
    }
}

fn set_call(name: &str, value: &AttrValue) -> RemoteCall {
    RemoteCall {
        method: format!("set{name}"),
        signature: value.kind().signature(),
        args: value_args(value),
    }
}

fn rule_call(rule: LayoutRule, target: RuleTarget) -> RemoteCall {
    let anchor = match target {
        RuleTarget::Value(v) => HostArg::Int(v),
        RuleTarget::Widget(id) => HostArg::Owner(id),
    };
    RemoteCall {
        method: "addRule".to_string(),
        signature: "(II)V",
        args: vec![HostArg::Int(rule.index() as i32), anchor],
    }
}

fn layout_call(params: LayoutParams) -> RemoteCall {
    match params.weight {
        Some(weight) => RemoteCall {
            method: "setLayoutParams".to_string(),
            signature: "(IIF)V",
            args: vec![
                HostArg::Int(params.width),
                HostArg::Int(params.height),
                HostArg::Float(weight),
            ],
        },
        None => RemoteCall {
            method: "setLayoutParams".to_string(),
            signature: "(II)V",
            args: vec![HostArg::Int(params.width), HostArg::Int(params.height)],
        },
    }
}

fn margins_call(margins: Margins) -> RemoteCall {
    RemoteCall {
        method: "setMargins".to_string(),
        signature: "(IIII)V",
        args: vec![
            HostArg::Int(margins.left),
            HostArg::Int(margins.top),
            HostArg::Int(margins.right),
            HostArg::Int(margins.bottom),
        ],
    }
}

fn add_view_call(child: PeerHandle) -> RemoteCall {
    RemoteCall {
        method: "addView".to_string(),
        signature: "(Landroid/view/View;)V",
        args: vec![HostArg::Peer(child)],
    }
}

fn set_button_call(button: DialogButton, text: &str) -> RemoteCall {
    RemoteCall {
        method: "setButton".to_string(),
        signature: "(ILjava/lang/String;)V",
        args: vec![HostArg::Int(button.raw()), HostArg::Str(text.to_owned())],
    }
}

fn show_dialog_call() -> RemoteCall {
    RemoteCall {
        method: "showDialog".to_string(),
        signature: "()V",
        args: Vec::new(),
    }
}

fn dismiss_dialog_call() -> RemoteCall {
    RemoteCall {
        method: "dismissDialog".to_string(),
        signature: "()V",
        args: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::recording::{HostCall, HostJournal, NullHost, RecordingHost};
    use crate::layout::{LayoutRule, Orientation, RuleTarget, MATCH_PARENT, RULE_TRUE};
    use crate::logging::{Logger, MemorySink};
    use crate::widget::ProgressBarStyle;

    fn recording_bridge() -> (Bridge, HostJournal) {
        let (host, journal) = RecordingHost::new();
        (Bridge::new(host), journal)
    }

    fn peer_index(peers: &mut Vec<PeerHandle>, peer: PeerHandle) -> usize {
        if let Some(i) = peers.iter().position(|&p| p == peer) {
            i
        } else {
            peers.push(peer);
            peers.len() - 1
        }
    }

    fn arg_repr(peers: &mut Vec<PeerHandle>, arg: &HostArg) -> String {
        match arg {
            HostArg::Peer(p) => format!("peer{}", peer_index(peers, *p)),
            other => format!("{other:?}"),
        }
    }

    /// Render a journal with peer handles replaced by order of first
    /// appearance, so runs that allocate different handles compare equal.
    fn normalized(calls: &[HostCall]) -> Vec<String> {
        let mut peers = Vec::new();
        calls
            .iter()
            .map(|call| match call {
                HostCall::Create {
                    class,
                    owner,
                    style,
                } => format!("create {class} {owner} {style:?}"),
                HostCall::Invoke { peer, call } => {
                    let target = peer_index(&mut peers, *peer);
                    let args: Vec<String> = call
                        .args
                        .iter()
                        .map(|a| arg_repr(&mut peers, a))
                        .collect();
                    format!(
                        "invoke peer{target} {} {} [{}]",
                        call.method,
                        call.signature,
                        args.join(", ")
                    )
                }
                HostCall::Destroy { peer } => {
                    format!("destroy peer{}", peer_index(&mut peers, *peer))
                }
                HostCall::AttachRoot { peer } => {
                    format!("attach peer{}", peer_index(&mut peers, *peer))
                }
            })
            .collect()
    }

    #[test]
    fn attribute_set_stores_then_forwards() {
        let (mut bridge, journal) = recording_bridge();
        let id = bridge.create_widget(WidgetKind::TextView);
        let outcome = bridge.set_attribute(id, "Text", "hello").unwrap();
        assert_eq!(outcome, SetOutcome::Applied);
        assert_eq!(
            bridge.attribute(id, "Text"),
            Some(&AttrValue::from("hello"))
        );
        let calls = journal.calls();
        match &calls[1] {
            HostCall::Invoke { call, .. } => {
                assert_eq!(call.method, "setText");
                assert_eq!(call.signature, "(Ljava/lang/String;)V");
                assert_eq!(call.args, vec![HostArg::Str("hello".into())]);
            }
            other => panic!("unexpected call: {other:?}"),
        }
    }

    #[test]
    fn validation_failure_touches_neither_side() {
        let (mut bridge, journal) = recording_bridge();
        let id = bridge.create_widget(WidgetKind::SeekBar);
        journal.clear();
        let err = bridge.set_attribute(id, "Progress", 0.5f32).unwrap_err();
        assert!(matches!(err, UiError::KindMismatch { .. }));
        let err = bridge.set_attribute(id, "Bogus", 1).unwrap_err();
        assert!(matches!(err, UiError::UnknownAttribute(_)));
        assert_eq!(bridge.attribute(id, "Progress"), None);
        assert!(journal.calls().is_empty());
    }

    #[test]
    fn rejected_peer_degrades_to_local_only() {
        let mut bridge = Bridge::new(NullHost);
        let id = bridge.create_widget(WidgetKind::Button);
        assert!(!bridge.is_connected(id));
        let outcome = bridge.set_attribute(id, "Text", "press").unwrap();
        assert_eq!(outcome, SetOutcome::StoredLocally);
        assert_eq!(
            bridge.attribute(id, "Text"),
            Some(&AttrValue::from("press"))
        );
        bridge.set_layout_params(id, MATCH_PARENT, 48).unwrap();
        bridge
            .add_rule(
                id,
                LayoutRule::CenterInParent,
                RuleTarget::Value(RULE_TRUE),
            )
            .unwrap();
    }

    #[test]
    fn consecutive_restores_replay_identical_sequences() {
        let (mut bridge, journal) = recording_bridge();
        let root = bridge.create_widget(WidgetKind::RelativeLayout);
        let label = bridge.create_widget(WidgetKind::TextView);
        bridge.set_attribute(label, "Text", "ready").unwrap();
        bridge.set_attribute(label, "TextSize", (2, 18.0f32)).unwrap();
        bridge.set_layout_params(label, MATCH_PARENT, 64).unwrap();
        bridge.set_margins(label, 4, 4, 4, 4).unwrap();
        bridge
            .add_rule(
                label,
                LayoutRule::CenterHorizontal,
                RuleTarget::Value(RULE_TRUE),
            )
            .unwrap();
        bridge.add_child(root, label).unwrap();
        bridge.attach_root(root).unwrap();

        bridge.suspend(0);
        journal.clear();
        bridge.resume(0);
        let first = normalized(&journal.calls());

        bridge.suspend(0);
        journal.clear();
        bridge.resume(0);
        let second = normalized(&journal.calls());

        assert_eq!(first, second);
        // Rules precede attributes, attributes precede layout and margins.
        // The label is the first peer any invoke targets.
        let label_calls: Vec<&String> = first
            .iter()
            .filter(|line| line.starts_with("invoke peer0"))
            .collect();
        assert!(label_calls[0].contains("addRule"));
        assert!(label_calls
            .iter()
            .position(|l| l.contains("setLayoutParams"))
            .unwrap()
            > label_calls
                .iter()
                .rposition(|l| l.contains("addRule"))
                .unwrap());
    }

    #[test]
    fn derived_state_wins_over_store_on_restore() {
        let (mut bridge, journal) = recording_bridge();
        let toggle = bridge.create_widget(WidgetKind::Switch);
        bridge.attach_root(toggle).unwrap();
        bridge.set_attribute(toggle, "Checked", true).unwrap();
        // Host reports the user flipped it back off.
        bridge.dispatch(
            toggle,
            EventKind::CheckedChanged.raw(),
            0,
            0,
        );
        assert_eq!(bridge.is_checked(toggle), Some(false));

        bridge.suspend(0);
        journal.clear();
        bridge.resume(0);

        let checked_calls: Vec<Vec<HostArg>> = journal
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                HostCall::Invoke { call, .. } if call.method == "setChecked" => Some(call.args),
                _ => None,
            })
            .collect();
        assert_eq!(checked_calls.len(), 2);
        assert_eq!(checked_calls[0], vec![HostArg::Bool(true)]);
        assert_eq!(checked_calls[1], vec![HostArg::Bool(false)]);
        // The store still holds what the application last requested.
        assert_eq!(
            bridge.attribute(toggle, "Checked"),
            Some(&AttrValue::Bool(true))
        );
    }

    #[test]
    fn seek_bar_progress_survives_restore() {
        let (mut bridge, journal) = recording_bridge();
        let seek = bridge.create_widget(WidgetKind::SeekBar);
        bridge.attach_root(seek).unwrap();
        bridge.dispatch(seek, EventKind::SeekBarProgressChanged.raw(), 73, 0);
        assert_eq!(bridge.progress(seek), Some(73));

        bridge.suspend(0);
        journal.clear();
        bridge.resume(0);
        let methods = journal.invoked_methods();
        assert_eq!(methods, vec!["setProgress"]);
        assert_eq!(bridge.progress(seek), Some(73));
    }

    #[test]
    fn container_resumes_top_down_in_insertion_order() {
        let (mut bridge, journal) = recording_bridge();
        let panel = bridge.create_widget(WidgetKind::LinearLayout);
        let a = bridge.create_widget(WidgetKind::Button);
        let b = bridge.create_widget(WidgetKind::Button);
        let c = bridge.create_widget(WidgetKind::TextView);
        bridge.attach_root(panel).unwrap();
        bridge.add_child(panel, a).unwrap();
        bridge.add_child(panel, b).unwrap();
        bridge.add_child(panel, c).unwrap();

        bridge.suspend(0);
        journal.clear();
        bridge.resume(0);

        let classes: Vec<String> = journal
            .calls()
            .into_iter()
            .filter_map(|call| match call {
                HostCall::Create { class, .. } => Some(class),
                _ => None,
            })
            .collect();
        assert_eq!(classes, vec!["LinearLayout", "Button", "Button", "TextView"]);
        assert!(matches!(
            journal.calls().last(),
            Some(HostCall::AttachRoot { .. })
        ));
    }

    #[test]
    fn suspend_destroys_children_before_parent() {
        let (mut bridge, journal) = recording_bridge();
        let panel = bridge.create_widget(WidgetKind::LinearLayout);
        let a = bridge.create_widget(WidgetKind::Button);
        let b = bridge.create_widget(WidgetKind::Button);
        bridge.attach_root(panel).unwrap();
        bridge.add_child(panel, a).unwrap();
        bridge.add_child(panel, b).unwrap();

        journal.clear();
        bridge.suspend(0);
        let destroys: Vec<u64> = journal
            .calls()
            .into_iter()
            .filter_map(|call| match call {
                HostCall::Destroy { peer } => Some(peer.to_raw()),
                _ => None,
            })
            .collect();
        // Peers were handed out 1..=3 in creation order; the container (1)
        // must go last.
        assert_eq!(destroys, vec![2, 3, 1]);
        assert!(!bridge.is_connected(panel));
        assert!(!bridge.is_connected(a));
    }

    #[test]
    fn tree_membership_is_validated() {
        let (mut bridge, _journal) = recording_bridge();
        let panel = bridge.create_widget(WidgetKind::LinearLayout);
        let button = bridge.create_widget(WidgetKind::Button);
        let ghost = OwnerId::from_raw(999);

        assert!(matches!(
            bridge.add_child(button, panel),
            Err(UiError::NotAContainer(WidgetKind::Button))
        ));
        assert!(matches!(
            bridge.add_child(panel, ghost),
            Err(UiError::WidgetNotFound(_))
        ));
        bridge.add_child(panel, button).unwrap();
        assert!(matches!(
            bridge.add_child(panel, button),
            Err(UiError::AlreadyAttached(_))
        ));
        assert!(matches!(
            bridge.attach_root(button),
            Err(UiError::AlreadyAttached(_))
        ));
    }

    #[test]
    fn ownership_cycles_are_rejected() {
        let (mut bridge, _journal) = recording_bridge();
        let outer = bridge.create_widget(WidgetKind::LinearLayout);
        let inner = bridge.create_widget(WidgetKind::LinearLayout);
        bridge.add_child(outer, inner).unwrap();

        assert!(matches!(
            bridge.add_child(inner, outer),
            Err(UiError::OwnershipCycle { .. })
        ));
        assert!(matches!(
            bridge.add_child(outer, outer),
            Err(UiError::OwnershipCycle { .. })
        ));

        // The rejected attaches left the tree intact: lifecycle walks
        // terminate and the inner panel stays childless.
        bridge.attach_root(outer).unwrap();
        bridge.suspend(0);
        bridge.resume(0);
        bridge.close_widget(outer).unwrap();
        assert_eq!(bridge.children(inner).unwrap(), Vec::<OwnerId>::new());
    }

    #[test]
    fn attaching_disconnected_child_replays_its_state() {
        let (mut bridge, journal) = recording_bridge();
        let panel = bridge.create_widget(WidgetKind::LinearLayout);
        bridge.attach_root(panel).unwrap();

        // A widget created while suspended starts disconnected.
        bridge.suspend(0);
        let label = bridge.create_widget(WidgetKind::TextView);
        bridge.set_attribute(label, "Text", "late").unwrap();
        bridge.resume(0);
        assert!(!bridge.is_connected(label));

        journal.clear();
        bridge.add_child(panel, label).unwrap();
        assert!(bridge.is_connected(label));
        let methods = journal.invoked_methods();
        assert_eq!(methods, vec!["setText", "addView"]);
    }

    #[test]
    fn dialog_is_shown_and_restored_last() {
        let (mut bridge, journal) = recording_bridge();
        let root = bridge.create_widget(WidgetKind::LinearLayout);
        bridge.attach_root(root).unwrap();
        let button = bridge.create_widget(WidgetKind::Button);
        assert!(matches!(
            bridge.show_dialog(button),
            Err(UiError::NotADialog(WidgetKind::Button))
        ));

        let dialog = bridge.create_widget(WidgetKind::Dialog);
        bridge.set_attribute(dialog, "Title", "About").unwrap();
        bridge.show_dialog(dialog).unwrap();
        assert!(journal
            .invoked_methods()
            .contains(&"showDialog".to_string()));

        bridge.suspend(0);
        journal.clear();
        bridge.resume(0);
        let classes: Vec<String> = journal
            .calls()
            .into_iter()
            .filter_map(|call| match call {
                HostCall::Create { class, .. } => Some(class),
                _ => None,
            })
            .collect();
        assert_eq!(classes, vec!["LinearLayout", "Dialog"]);
        assert_eq!(
            journal.invoked_methods().last().map(String::as_str),
            Some("showDialog")
        );

        bridge.dismiss_dialog(dialog).unwrap();
        assert!(journal
            .invoked_methods()
            .contains(&"dismissDialog".to_string()));
        assert!(!bridge.is_connected(dialog));
        bridge.suspend(0);
        journal.clear();
        bridge.resume(0);
        assert!(!journal
            .invoked_methods()
            .contains(&"showDialog".to_string()));
    }

    #[test]
    fn alert_dialog_buttons_replay_and_route() {
        use std::sync::{Arc, Mutex};

        let (mut bridge, journal) = recording_bridge();
        let alert = bridge.create_widget(WidgetKind::AlertDialog);
        bridge.set_attribute(alert, "Title", "Confirm").unwrap();
        bridge.set_attribute(alert, "Message", "Quit?").unwrap();

        let pressed: Arc<Mutex<Vec<i32>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&pressed);
        bridge
            .set_button(alert, DialogButton::Positive, "Yes", move |_, _, p1, _| {
                sink.lock().unwrap().push(p1);
            })
            .unwrap();
        bridge
            .set_button(alert, DialogButton::Negative, "No", |_, _, _, _| {})
            .unwrap();
        bridge.show_dialog(alert).unwrap();

        let set_buttons: Vec<Vec<HostArg>> = journal
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                HostCall::Invoke { call, .. } if call.method == "setButton" => Some(call.args),
                _ => None,
            })
            .collect();
        assert_eq!(
            set_buttons[0],
            vec![HostArg::Int(-1), HostArg::Str("Yes".into())]
        );
        assert_eq!(
            set_buttons[1],
            vec![HostArg::Int(-2), HostArg::Str("No".into())]
        );

        // A press arrives as a dismissed event carrying the button code.
        bridge.dispatch(
            alert,
            EventKind::DialogDismissed.raw(),
            DialogButton::Positive.raw(),
            0,
        );
        assert_eq!(*pressed.lock().unwrap(), vec![-1]);

        // Rebuilding the peer replays the buttons before reshowing, and the
        // callbacks stay wired afterwards.
        bridge.suspend(0);
        journal.clear();
        bridge.resume(0);
        let methods = journal.invoked_methods();
        assert_eq!(methods.iter().filter(|m| *m == "setButton").count(), 2);
        assert_eq!(methods.last().map(String::as_str), Some("showDialog"));

        bridge.dispatch(
            alert,
            EventKind::DialogDismissed.raw(),
            DialogButton::Positive.raw(),
            0,
        );
        assert_eq!(*pressed.lock().unwrap(), vec![-1, -1]);

        let button = bridge.create_widget(WidgetKind::Button);
        assert!(matches!(
            bridge.set_button(button, DialogButton::Neutral, "Later", |_, _, _, _| {}),
            Err(UiError::NotADialog(WidgetKind::Button))
        ));
    }

    #[test]
    fn progress_bar_style_is_sent_and_resent() {
        let (mut bridge, journal) = recording_bridge();
        let bar = bridge.create_styled(
            WidgetKind::ProgressBar,
            Some(ProgressBarStyle::Horizontal.into()),
        );
        bridge.attach_root(bar).unwrap();
        match &journal.calls()[0] {
            HostCall::Create { class, style, .. } => {
                assert_eq!(class, "ProgressBar");
                assert_eq!(*style, Some(ProgressBarStyle::Horizontal.into()));
            }
            other => panic!("unexpected call: {other:?}"),
        }

        bridge.suspend(0);
        journal.clear();
        bridge.resume(0);
        match &journal.calls()[0] {
            HostCall::Create { style, .. } => {
                assert_eq!(*style, Some(ProgressBarStyle::Horizontal.into()));
            }
            other => panic!("unexpected call: {other:?}"),
        }
    }

    #[test]
    fn orientation_sets_linear_layout_direction() {
        let (mut bridge, journal) = recording_bridge();
        let panel = bridge.create_widget(WidgetKind::LinearLayout);
        let outcome = bridge
            .set_attribute(panel, "Orientation", Orientation::Vertical)
            .unwrap();
        assert_eq!(outcome, SetOutcome::Applied);
        assert_eq!(
            bridge.attribute(panel, "Orientation"),
            Some(&AttrValue::Int(1))
        );
        match &journal.calls()[1] {
            HostCall::Invoke { call, .. } => {
                assert_eq!(call.method, "setOrientation");
                assert_eq!(call.args, vec![HostArg::Int(1)]);
            }
            other => panic!("unexpected call: {other:?}"),
        }
    }

    #[test]
    fn callbacks_fire_and_persist() {
        use std::sync::{Arc, Mutex};

        let (mut bridge, _journal) = recording_bridge();
        let button = bridge.create_widget(WidgetKind::Button);
        let seen: Arc<Mutex<Vec<(EventKind, i32)>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        bridge
            .set_callback(button, EventKind::ButtonUp, move |_, event, p1, _| {
                sink.lock().unwrap().push((event, p1));
            })
            .unwrap();

        bridge.dispatch(button, EventKind::ButtonUp.raw(), 7, 0);
        bridge.dispatch(button, EventKind::ButtonUp.raw(), 8, 0);
        // Unregistered event kinds update nothing and call nothing.
        bridge.dispatch(button, EventKind::ButtonDown.raw(), 9, 0);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![(EventKind::ButtonUp, 7), (EventKind::ButtonUp, 8)]
        );

        // After close the peer is gone; a straggler event fires nothing.
        bridge.close_widget(button).unwrap();
        bridge.dispatch(button, EventKind::ButtonUp.raw(), 10, 0);
        assert_eq!(seen.lock().unwrap().len(), 2);
    }

    #[test]
    fn stale_and_unknown_events_are_dropped() {
        let (host, _journal) = RecordingHost::new();
        let mut config = BridgeConfig::default();
        config.enable_metrics();
        let metrics = config.metrics_handle().unwrap();
        let mut bridge = Bridge::with_config(host, config);

        let button = bridge.create_widget(WidgetKind::Button);
        bridge.remove_widget(button).unwrap();
        bridge.dispatch(button, EventKind::ButtonUp.raw(), 0, 0);
        bridge.dispatch(OwnerId::from_raw(424242), 5, 0, 0);
        bridge.dispatch(OwnerId::from_raw(1), 9000, 0, 0);

        let snap = metrics
            .lock()
            .unwrap()
            .snapshot(std::time::Duration::ZERO);
        assert_eq!(snap.events_dispatched, 3);
        assert_eq!(snap.stale_events, 2);
    }

    #[test]
    fn peer_failure_is_logged_and_counted() {
        let sink = MemorySink::new();
        let mut config = BridgeConfig {
            logger: Some(Logger::new(sink.clone())),
            metrics: None,
        };
        config.enable_metrics();
        let metrics = config.metrics_handle().unwrap();
        let (host, _journal) = RecordingHost::refusing_creates();
        let mut bridge = Bridge::with_config(host, config);

        let id = bridge.create_widget(WidgetKind::Button);
        assert!(!bridge.is_connected(id));
        assert!(sink
            .messages()
            .contains(&"peer_create_failed".to_string()));
        let snap = metrics
            .lock()
            .unwrap()
            .snapshot(std::time::Duration::ZERO);
        assert_eq!(snap.peer_failures, 1);
        assert_eq!(snap.peers_created, 0);
    }

    #[test]
    fn remove_widget_drops_the_subtree() {
        let (mut bridge, journal) = recording_bridge();
        let panel = bridge.create_widget(WidgetKind::LinearLayout);
        let inner = bridge.create_widget(WidgetKind::RadioGroup);
        let radio = bridge.create_widget(WidgetKind::RadioButton);
        bridge.attach_root(panel).unwrap();
        bridge.add_child(panel, inner).unwrap();
        bridge.add_child(inner, radio).unwrap();
        assert_eq!(bridge.widget_count(), 3);

        journal.clear();
        bridge.remove_widget(inner).unwrap();
        assert_eq!(bridge.widget_count(), 1);
        assert_eq!(bridge.children(panel).unwrap(), Vec::<OwnerId>::new());
        assert!(matches!(
            bridge.set_attribute(radio, "Checked", true),
            Err(UiError::WidgetNotFound(_))
        ));
        let destroys = journal
            .calls()
            .iter()
            .filter(|c| matches!(c, HostCall::Destroy { .. }))
            .count();
        assert_eq!(destroys, 2);

        // Closing an already-disconnected widget is a no-op.
        journal.clear();
        bridge.close_widget(panel).unwrap();
        bridge.close_widget(panel).unwrap();
        assert_eq!(journal.calls().len(), 1);
    }

    #[test]
    fn operations_while_suspended_stay_local() {
        let (mut bridge, journal) = recording_bridge();
        let root = bridge.create_widget(WidgetKind::LinearLayout);
        bridge.attach_root(root).unwrap();
        bridge.suspend(0);

        journal.clear();
        let label = bridge.create_widget(WidgetKind::TextView);
        bridge.set_attribute(label, "Text", "offline").unwrap();
        bridge.add_child(root, label).unwrap();
        assert!(journal.calls().is_empty());

        bridge.resume(0);
        let methods = journal.invoked_methods();
        assert!(methods.contains(&"setText".to_string()));
        assert!(methods.contains(&"addView".to_string()));
        assert!(bridge.is_connected(label));
    }
}
