use std::time::Duration;

use serde_json::json;

use crate::logging::{LogEvent, LogFields, LogLevel};

/// Saturating counters for bridge activity.
#[derive(Debug, Default, Clone)]
pub struct BridgeMetrics {
    remote_calls: u64,
    peers_created: u64,
    peer_failures: u64,
    events_dispatched: u64,
    stale_events: u64,
    local_only_sets: u64,
    restores: u64,
}

impl BridgeMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_remote_call(&mut self) {
        self.remote_calls = self.remote_calls.saturating_add(1);
    }

    pub fn record_peer_created(&mut self) {
        self.peers_created = self.peers_created.saturating_add(1);
    }

    pub fn record_peer_failure(&mut self) {
        self.peer_failures = self.peer_failures.saturating_add(1);
    }

    pub fn record_event(&mut self) {
        self.events_dispatched = self.events_dispatched.saturating_add(1);
    }

    pub fn record_stale_event(&mut self) {
        self.stale_events = self.stale_events.saturating_add(1);
    }

    pub fn record_local_only_set(&mut self) {
        self.local_only_sets = self.local_only_sets.saturating_add(1);
    }

    pub fn record_restore(&mut self) {
        self.restores = self.restores.saturating_add(1);
    }

    pub fn snapshot(&self, uptime: Duration) -> MetricSnapshot {
        MetricSnapshot {
            uptime_ms: uptime.as_millis() as u64,
            remote_calls: self.remote_calls,
            peers_created: self.peers_created,
            peer_failures: self.peer_failures,
            events_dispatched: self.events_dispatched,
            stale_events: self.stale_events,
            local_only_sets: self.local_only_sets,
            restores: self.restores,
        }
    }
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone)]
pub struct MetricSnapshot {
    pub uptime_ms: u64,
    pub remote_calls: u64,
    pub peers_created: u64,
    pub peer_failures: u64,
    pub events_dispatched: u64,
    pub stale_events: u64,
    pub local_only_sets: u64,
    pub restores: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        let mut fields = LogFields::new();
        fields.insert("uptime_ms".into(), json!(self.uptime_ms));
        fields.insert("remote_calls".into(), json!(self.remote_calls));
        fields.insert("peers_created".into(), json!(self.peers_created));
        fields.insert("peer_failures".into(), json!(self.peer_failures));
        fields.insert("events_dispatched".into(), json!(self.events_dispatched));
        fields.insert("stale_events".into(), json!(self.stale_events));
        fields.insert("local_only_sets".into(), json!(self.local_only_sets));
        fields.insert("restores".into(), json!(self.restores));
        let mut event = LogEvent::new(LogLevel::Info, target, "metrics_snapshot");
        event.fields = fields;
        event
    }
}
