//! The contract between emitters and the external dispatch channel.

use miette::Diagnostic;
use thiserror::Error;

use crate::activity::Activity;
use crate::payload::Payload;
use crate::tags::TagList;

/// Errors a sink reports when a delivery fails.
///
/// Absence of listeners is never an error; emitters short-circuit before
/// calling the sink at all.
#[derive(Debug, Diagnostic, Error)]
pub enum SinkError {
    #[error("event channel '{channel}' is closed")]
    ChannelClosed { channel: String },

    #[error("failed to deliver '{event}'")]
    Delivery {
        event: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// A named channel that routes emitted events and activity lifecycle
/// notifications to externally registered listeners.
///
/// Implementations own listener registration and all synchronization;
/// every method may be called concurrently from any thread. Emitters
/// consult [`is_enabled`](EventSink::is_enabled) before constructing
/// payloads, so implementations must keep it cheap and side-effect free.
pub trait EventSink: Send + Sync {
    /// The channel name, fixed at construction.
    fn name(&self) -> &str;

    /// Whether any registered listener is interested in `name`.
    fn is_enabled(&self, name: &str) -> bool;

    /// Deliver one payload under an event name.
    fn write(&self, name: &str, payload: Payload) -> Result<(), SinkError>;

    /// Announce a newly created activity together with the tag list it
    /// was started with.
    fn start_activity(&self, activity: &Activity, tags: &TagList) -> Result<(), SinkError>;

    /// Receive a finished activity. Listeners stamp the stop time on
    /// receipt.
    fn stop_activity(&self, activity: Activity) -> Result<(), SinkError>;
}

/// A sink with no listeners.
///
/// Never enabled, so emitters short-circuit every call; deliveries that
/// reach it anyway succeed without effect. Useful as a default wiring for
/// programs that only instrument conditionally.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn name(&self) -> &str {
        "null"
    }

    fn is_enabled(&self, _name: &str) -> bool {
        false
    }

    fn write(&self, _name: &str, _payload: Payload) -> Result<(), SinkError> {
        Ok(())
    }

    fn start_activity(&self, _activity: &Activity, _tags: &TagList) -> Result<(), SinkError> {
        Ok(())
    }

    fn stop_activity(&self, _activity: Activity) -> Result<(), SinkError> {
        Ok(())
    }
}
