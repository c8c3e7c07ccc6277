//! The span handle returned by a started tracker operation.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::tags::TagList;
use crate::timestamp::Timestamp;

static ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Generate a process-unique activity ID.
fn next_id() -> u64 {
    ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// A timed unit of work created by [`Tracker::start`](crate::Tracker::start).
///
/// A handle only exists while some listener is interested in its operation
/// name; the disabled path yields `None` instead. The owner is responsible
/// for passing the handle back to [`Tracker::stop`](crate::Tracker::stop).
/// Nothing happens on drop, so a leaked handle stays open from the
/// listeners' point of view.
#[must_use = "an activity stays open until passed back to Tracker::stop"]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    id: u64,
    operation: String,
    tags: TagList,
    started_at: Timestamp,
}

impl Activity {
    pub(crate) fn begin(operation: impl Into<String>, tags: TagList) -> Self {
        Self {
            id: next_id(),
            operation: operation.into(),
            tags,
            started_at: Timestamp::now(),
        }
    }

    /// Process-unique identifier assigned at creation.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The operation name listeners matched on.
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// The tags snapshotted when the activity was created.
    pub fn tags(&self) -> &TagList {
        &self.tags
    }

    /// Creation time, stamped before the sink saw the start.
    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }
}
