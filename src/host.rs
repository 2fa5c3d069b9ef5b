//! Collaborator contracts and action dispatch.
//!
//! The engine never talks to the outside world directly. It returns
//! [`Action`]s; [`dispatch`] routes them to the configuration store, the
//! notification sink, and the timer scheduler that the host supplies.

#[cfg(test)]
#[path = "host_test.rs"]
mod host_test;

use std::time::Duration;

use tracing::{debug, error, info};

use crate::doc::Configuration;
use crate::engine::Action;
use crate::picker::TimerId;

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Error,
}

/// Persisted configuration owner. Writes are always whole configurations.
pub trait ConfigStore {
    fn read(&self) -> Configuration;
    fn write(&mut self, config: Configuration);
}

/// User-facing notification sink.
pub trait Notifier {
    fn notify(&mut self, message: &str, severity: Severity);
}

/// Recurring timer service. Each started timer fires until cancelled.
pub trait Scheduler {
    fn start(&mut self, id: TimerId, interval: Duration);
    fn cancel(&mut self, id: TimerId);
}

/// Route actions to the collaborators. Returns true if a repaint was requested.
pub fn dispatch<S, N, T>(actions: Vec<Action>, store: &mut S, notifier: &mut N, scheduler: &mut T) -> bool
where
    S: ConfigStore + ?Sized,
    N: Notifier + ?Sized,
    T: Scheduler + ?Sized,
{
    let mut render = false;
    for action in actions {
        match action {
            Action::ConfigChanged(config) => store.write(config),
            Action::Notify { message, severity } => notifier.notify(&message, severity),
            Action::StartTimer { id, interval } => scheduler.start(id, interval),
            Action::CancelTimer { id } => scheduler.cancel(id),
            Action::RenderNeeded => render = true,
        }
    }
    render
}

/// In-memory store, useful for hosts without their own persistence and for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    config: Configuration,
    writes: usize,
}

impl MemoryStore {
    #[must_use]
    pub fn new(config: Configuration) -> Self {
        Self { config, writes: 0 }
    }

    /// Number of writes received so far.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl ConfigStore for MemoryStore {
    fn read(&self) -> Configuration {
        self.config.clone()
    }

    fn write(&mut self, config: Configuration) {
        self.writes += 1;
        debug!(
            furniture = config.furniture.len(),
            assignments = config.assignments.len(),
            writes = self.writes,
            "store: configuration written"
        );
        self.config = config;
    }
}

/// Notifier that logs every message through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&mut self, message: &str, severity: Severity) {
        match severity {
            Severity::Error => error!(%message, "notify"),
            Severity::Success | Severity::Info => info!(?severity, %message, "notify"),
        }
    }
}

/// Notifier that keeps every message, newest last.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    pub messages: Vec<(String, Severity)>,
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, message: &str, severity: Severity) {
        self.messages.push((message.to_string(), severity));
    }
}
