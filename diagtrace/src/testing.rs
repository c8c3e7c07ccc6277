//! In-memory sink for asserting on emission behavior in tests.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::activity::Activity;
use crate::payload::Payload;
use crate::sink::{EventSink, SinkError};
use crate::tags::TagList;

/// One recorded call into the sink's delivery contract, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum SinkCall {
    Write { event: String, payload: Payload },
    StartActivity { activity: Activity, tags: TagList },
    StopActivity { activity: Activity },
}

/// A sink that records every delivery for later inspection.
///
/// Interest is an explicit allow-list configured up front; the gate itself
/// is counted so tests can assert that disabled emission stays cheap.
/// [`close`](RecordingSink::close) simulates a torn-down channel: the gate
/// keeps answering, but every delivery fails with
/// [`SinkError::ChannelClosed`].
#[derive(Debug, Default)]
pub struct RecordingSink {
    name: String,
    enabled: HashSet<String>,
    enable_all: bool,
    closed: AtomicBool,
    gate_checks: AtomicUsize,
    calls: Mutex<Vec<SinkCall>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::named("recording")
    }

    /// A recording sink with a custom channel name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Declare listener interest in one event or operation name.
    pub fn enable(mut self, name: impl Into<String>) -> Self {
        self.enabled.insert(name.into());
        self
    }

    /// Declare listener interest in every name.
    pub fn enable_all(mut self) -> Self {
        self.enable_all = true;
        self
    }

    /// Fail all further deliveries with [`SinkError::ChannelClosed`].
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    /// How many times the interest gate has been consulted.
    pub fn gate_checks(&self) -> usize {
        self.gate_checks.load(Ordering::SeqCst)
    }

    /// Every recorded call, in arrival order.
    pub fn calls(&self) -> Vec<SinkCall> {
        self.lock_calls().clone()
    }

    /// Payloads written under `event`, in arrival order.
    pub fn writes_for(&self, event: &str) -> Vec<Payload> {
        self.lock_calls()
            .iter()
            .filter_map(|call| match call {
                SinkCall::Write { event: e, payload } if e == event => Some(payload.clone()),
                _ => None,
            })
            .collect()
    }

    /// Activities announced through `start_activity`, with their tag lists.
    pub fn starts(&self) -> Vec<(Activity, TagList)> {
        self.lock_calls()
            .iter()
            .filter_map(|call| match call {
                SinkCall::StartActivity { activity, tags } => {
                    Some((activity.clone(), tags.clone()))
                }
                _ => None,
            })
            .collect()
    }

    /// Activities received through `stop_activity`.
    pub fn stops(&self) -> Vec<Activity> {
        self.lock_calls()
            .iter()
            .filter_map(|call| match call {
                SinkCall::StopActivity { activity } => Some(activity.clone()),
                _ => None,
            })
            .collect()
    }

    fn lock_calls(&self) -> std::sync::MutexGuard<'_, Vec<SinkCall>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn deliver(&self, call: SinkCall) -> Result<(), SinkError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(SinkError::ChannelClosed {
                channel: self.name.clone(),
            });
        }
        self.lock_calls().push(call);
        Ok(())
    }
}

impl EventSink for RecordingSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_enabled(&self, name: &str) -> bool {
        self.gate_checks.fetch_add(1, Ordering::SeqCst);
        self.enable_all || self.enabled.contains(name)
    }

    fn write(&self, name: &str, payload: Payload) -> Result<(), SinkError> {
        self.deliver(SinkCall::Write {
            event: name.to_string(),
            payload,
        })
    }

    fn start_activity(&self, activity: &Activity, tags: &TagList) -> Result<(), SinkError> {
        self.deliver(SinkCall::StartActivity {
            activity: activity.clone(),
            tags: tags.clone(),
        })
    }

    fn stop_activity(&self, activity: Activity) -> Result<(), SinkError> {
        self.deliver(SinkCall::StopActivity { activity })
    }
}
