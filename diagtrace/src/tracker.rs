//! The caller-facing emission facade.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::activity::Activity;
use crate::payload::{Payload, TrackedError};
use crate::sink::{EventSink, SinkError};
use crate::tags::TagList;

/// Event name [`Tracker::track_error`] emits under.
pub const DEFAULT_ERROR_EVENT: &str = "Error";

/// Emits named diagnostic events and timed activities through an
/// [`EventSink`], doing no work at all for names nobody listens to.
///
/// A tracker is a cheap handle over a shared sink. Clone it freely and
/// thread it through the program instead of reaching for global state.
#[derive(Clone)]
pub struct Tracker {
    sink: Arc<dyn EventSink>,
}

impl Tracker {
    /// Wrap a sink handle constructed at program start.
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self { sink }
    }

    /// The sink this tracker delivers through.
    pub fn sink(&self) -> &Arc<dyn EventSink> {
        &self.sink
    }

    /// The name of the channel all emissions flow through.
    pub fn channel(&self) -> &str {
        self.sink.name()
    }

    /// Whether any listener is interested in `name`.
    ///
    /// Every emitting method performs this check itself; call it directly
    /// only to guard payload construction too expensive to run
    /// speculatively.
    pub fn is_enabled(&self, name: &str) -> bool {
        self.sink.is_enabled(name)
    }

    /// Emit one payload under `event` if any listener is interested.
    ///
    /// The payload conversion runs after the interest check, so passing a
    /// borrowed form costs nothing when nobody listens.
    pub fn track(&self, event: &str, data: impl Into<Payload>) -> Result<(), SinkError> {
        if !self.sink.is_enabled(event) {
            return Ok(());
        }
        let payload = data.into();
        trace!(target: "diagtrace::event", event, %payload, "delivering event");
        self.sink.write(event, payload)
    }

    /// Emit an error with its context tags under [`DEFAULT_ERROR_EVENT`].
    pub fn track_error(&self, tags: &TagList, error: TrackedError) -> Result<(), SinkError> {
        self.track_error_as(DEFAULT_ERROR_EVENT, tags, error)
    }

    /// Emit an error with its context tags under a custom event name.
    ///
    /// When the name is enabled this produces two writes in fixed order:
    /// first a text payload of newline-joined `key=value` lines, then the
    /// error object itself.
    pub fn track_error_as(
        &self,
        event: &str,
        tags: &TagList,
        error: TrackedError,
    ) -> Result<(), SinkError> {
        if !self.sink.is_enabled(event) {
            return Ok(());
        }
        trace!(target: "diagtrace::event", event, %error, "delivering error");
        self.sink.write(event, Payload::Text(tags.to_string()))?;
        self.sink.write(event, Payload::Error(error))
    }

    /// Begin a timed activity named `operation` if any listener is
    /// interested, snapshotting `tags` into the returned handle.
    ///
    /// The name must be non-empty. That requirement is not checked here,
    /// and a sink is free to reject an empty name.
    ///
    /// Returns `Ok(None)` when nobody listens; no handle is constructed
    /// and the sink is never called.
    pub fn start(&self, tags: &TagList, operation: &str) -> Result<Option<Activity>, SinkError> {
        if !self.sink.is_enabled(operation) {
            return Ok(None);
        }
        let activity = Activity::begin(operation, tags.clone());
        trace!(target: "diagtrace::activity", id = activity.id(), operation, "starting activity");
        self.sink.start_activity(&activity, tags)?;
        Ok(Some(activity))
    }

    /// Finish an activity previously returned by [`start`](Self::start).
    ///
    /// `None` is accepted and ignored, so the disabled path needs no
    /// branching at the call site. A live handle is always forwarded to
    /// the sink, whatever its history; listeners stamp the stop time.
    pub fn stop(&self, activity: Option<Activity>) -> Result<(), SinkError> {
        let Some(activity) = activity else {
            return Ok(());
        };
        trace!(
            target: "diagtrace::activity",
            id = activity.id(),
            operation = activity.operation(),
            "stopping activity"
        );
        self.sink.stop_activity(activity)
    }
}

impl fmt::Debug for Tracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tracker")
            .field("channel", &self.sink.name())
            .finish()
    }
}
