//! Listener-gated diagnostic event and activity emission.
//!
//! This crate provides the producer side of a diagnostic channel:
//! - Named fire-and-forget events carrying text, JSON, or error payloads
//! - Timed activities with ordered key/value tags and explicit stop
//! - A single interest gate consulted before any formatting or allocation,
//!   so instrumented code costs almost nothing when nobody listens
//!
//! Listener registration and delivery live behind the [`EventSink`] trait;
//! this crate only defines the contract and ships [`NullSink`] plus the
//! [`testing`] spy. A [`Tracker`] wraps a shared sink handle and is cloned
//! through the program instead of living in global state.
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use diagtrace::testing::RecordingSink;
//! use diagtrace::{TagList, Tracker};
//!
//! let sink = Arc::new(RecordingSink::new().enable("Deploy"));
//! let tracker = Tracker::new(Arc::<RecordingSink>::clone(&sink));
//!
//! // Fire-and-forget event; names nobody enabled cost nothing.
//! tracker.track("Deploy", "rolling out build 42")?;
//! tracker.track("Ignored", "never formatted")?;
//!
//! // Timed activity around a unit of work.
//! let tags = TagList::of("cluster", "eu-1");
//! let activity = tracker.start(&tags, "Deploy")?;
//! // ... the work ...
//! tracker.stop(activity)?;
//!
//! assert_eq!(sink.writes_for("Deploy").len(), 1);
//! assert_eq!(sink.stops().len(), 1);
//! # Ok::<(), diagtrace::SinkError>(())
//! ```

mod activity;
mod payload;
mod sink;
mod tags;
mod timestamp;
mod tracker;

pub mod testing;

pub use activity::Activity;
pub use payload::{Payload, TrackedError};
pub use sink::{EventSink, NullSink, SinkError};
pub use tags::{Tag, TagList};
pub use timestamp::Timestamp;
pub use tracker::{DEFAULT_ERROR_EVENT, Tracker};
