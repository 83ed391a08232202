//! Host doubles for tests and headless runs.

use std::sync::{Arc, Mutex};

use crate::bridge::core::{HostRuntime, RemoteCall};
use crate::error::HostError;
use crate::widget::{OwnerId, PeerHandle};

/// One call the host received, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    Create {
        class: String,
        owner: OwnerId,
        style: Option<i32>,
    },
    Invoke {
        peer: PeerHandle,
        call: RemoteCall,
    },
    Destroy {
        peer: PeerHandle,
    },
    AttachRoot {
        peer: PeerHandle,
    },
}

/// Shared view into a [`RecordingHost`]'s journal, usable while the bridge
/// owns the host itself.
#[derive(Clone, Default)]
pub struct HostJournal {
    calls: Arc<Mutex<Vec<HostCall>>>,
}

impl HostJournal {
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().expect("journal mutex poisoned").clone()
    }

    pub fn clear(&self) {
        self.calls.lock().expect("journal mutex poisoned").clear();
    }

    /// Method names of recorded invokes, for order assertions.
    pub fn invoked_methods(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                HostCall::Invoke { call, .. } => Some(call.method),
                _ => None,
            })
            .collect()
    }

    fn push(&self, call: HostCall) {
        self.calls.lock().expect("journal mutex poisoned").push(call);
    }
}

/// Host double that journals every call and hands out sequential peers.
pub struct RecordingHost {
    journal: HostJournal,
    next_peer: u64,
    refuse_creates: bool,
}

impl RecordingHost {
    pub fn new() -> (Self, HostJournal) {
        let journal = HostJournal::default();
        let host = Self {
            journal: journal.clone(),
            next_peer: 1,
            refuse_creates: false,
        };
        (host, journal)
    }

    /// Make every subsequent `create_widget` fail, exercising the
    /// disconnected-widget paths.
    pub fn refusing_creates() -> (Self, HostJournal) {
        let (mut host, journal) = Self::new();
        host.refuse_creates = true;
        (host, journal)
    }
}

impl HostRuntime for RecordingHost {
    fn create_widget(
        &mut self,
        class: &str,
        owner: OwnerId,
        style: Option<i32>,
    ) -> Option<PeerHandle> {
        self.journal.push(HostCall::Create {
            class: class.to_string(),
            owner,
            style,
        });
        if self.refuse_creates {
            return None;
        }
        let peer = PeerHandle::from_raw(self.next_peer);
        self.next_peer += 1;
        Some(peer)
    }

    fn invoke(&mut self, peer: PeerHandle, call: RemoteCall) -> Result<(), HostError> {
        self.journal.push(HostCall::Invoke { peer, call });
        Ok(())
    }

    fn destroy_widget(&mut self, peer: PeerHandle) {
        self.journal.push(HostCall::Destroy { peer });
    }

    fn attach_root(&mut self, peer: PeerHandle) {
        self.journal.push(HostCall::AttachRoot { peer });
    }
}

/// Host double with no managed side at all: creation always fails and every
/// widget stays local-only.
#[derive(Debug, Default)]
pub struct NullHost;

impl HostRuntime for NullHost {
    fn create_widget(&mut self, _: &str, _: OwnerId, _: Option<i32>) -> Option<PeerHandle> {
        None
    }

    fn invoke(&mut self, _: PeerHandle, _: RemoteCall) -> Result<(), HostError> {
        Err(HostError::PeerGone)
    }

    fn destroy_widget(&mut self, _: PeerHandle) {}

    fn attach_root(&mut self, _: PeerHandle) {}
}
