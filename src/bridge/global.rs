//! Process-wide bridge singleton.
//!
//! The managed host calls into native code from its own threads, so every
//! entry point funnels through one mutex around the single [`Bridge`]. Events
//! arriving before `init` or after `close` are dropped, matching how the
//! host may keep delivering callbacks across native teardown.

use std::sync::{Mutex, PoisonError};

use crate::bridge::core::{Bridge, BridgeConfig, HostRuntime};
use crate::error::{Result, UiError};
use crate::widget::OwnerId;

static INSTANCE: Mutex<Option<Bridge>> = Mutex::new(None);

fn lock() -> std::sync::MutexGuard<'static, Option<Bridge>> {
    // A panicked callback must not wedge the whole UI.
    INSTANCE.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Install the process bridge. Fails when one is already installed.
pub fn init(host: impl HostRuntime + 'static, config: BridgeConfig) -> Result<()> {
    let mut guard = lock();
    if guard.is_some() {
        return Err(UiError::AlreadyInitialized);
    }
    *guard = Some(Bridge::with_config(host, config));
    Ok(())
}

/// Tear down the process bridge: all peers destroyed, all shadows dropped.
/// Safe to call when no bridge is installed.
pub fn close() {
    let mut guard = lock();
    if let Some(mut bridge) = guard.take() {
        bridge.shutdown();
    }
}

pub fn is_initialized() -> bool {
    lock().is_some()
}

/// Run `f` against the installed bridge while holding the process lock.
pub fn with<T>(f: impl FnOnce(&mut Bridge) -> Result<T>) -> Result<T> {
    let mut guard = lock();
    let bridge = guard.as_mut().ok_or(UiError::NotInitialized)?;
    f(bridge)
}

/// Entry point for host event callbacks.
///
/// Raw owner ids and message codes come straight from the managed side;
/// anything that does not resolve is dropped silently, including everything
/// that arrives while no bridge is installed.
pub fn on_remote_event(owner_raw: u64, message: i32, param1: i32, param2: i32) {
    let mut guard = lock();
    if let Some(bridge) = guard.as_mut() {
        bridge.dispatch(OwnerId::from_raw(owner_raw), message, param1, param2);
    }
}

/// Host lifecycle hook: the window is going away.
pub fn suspend(reason: i32) {
    let mut guard = lock();
    if let Some(bridge) = guard.as_mut() {
        bridge.suspend(reason);
    }
}

/// Host lifecycle hook: the window is back.
pub fn resume(reason: i32) {
    let mut guard = lock();
    if let Some(bridge) = guard.as_mut() {
        bridge.resume(reason);
    }
}
