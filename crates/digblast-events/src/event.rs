//! The schedulable unit.

use std::fmt::Debug;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Unique event identifier, used for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(pub u64);

impl EventId {
    /// Fresh process-wide id.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        EventId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Something an event can act on. The tag names the event's type
/// (explode, move, ...) for creator-scoped queries.
pub trait EventTarget: Clone + Debug {
    type Tag: Copy + Eq + Hash + Debug;
    type Creator: Copy + Eq + Hash + Debug;

    fn tag(&self) -> Self::Tag;
}

/// A timed action waiting in the queue.
#[derive(Debug, Clone)]
pub struct Event<T: EventTarget> {
    pub id: EventId,
    /// Absolute clock time at which the event becomes due (seconds).
    pub trigger_at: f64,
    /// Clock time at which the event was created (seconds).
    pub created_at: f64,
    pub created_by: Option<T::Creator>,
    pub target: T,
}

impl<T: EventTarget> Event<T> {
    pub fn new(target: T, trigger_at: f64, created_at: f64) -> Self {
        Self {
            id: EventId::next(),
            trigger_at,
            created_at,
            created_by: None,
            target,
        }
    }

    pub fn created_by(mut self, creator: T::Creator) -> Self {
        self.created_by = Some(creator);
        self
    }

    pub fn tag(&self) -> T::Tag {
        self.target.tag()
    }

    /// Whether the event belongs to `creator` and, if given, has type `tag`.
    pub fn matches(&self, creator: T::Creator, tag: Option<T::Tag>) -> bool {
        self.created_by == Some(creator) && tag.map_or(true, |t| self.tag() == t)
    }
}

/// Options passed to the resolution of a single event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveFlags {
    /// Whether resolution may schedule its natural continuation. Cleared
    /// when settling in-flight events so settlement never cascades.
    pub spawn: bool,
}

impl Default for ResolveFlags {
    fn default() -> Self {
        Self { spawn: true }
    }
}

impl ResolveFlags {
    pub fn settle() -> Self {
        Self { spawn: false }
    }
}
