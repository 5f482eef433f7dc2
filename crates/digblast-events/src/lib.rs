//! Timed events for digblast.
//!
//! A schedulable event model, a priority queue with O(1) lazy
//! cancellation, injectable clocks, and the panic guard used when an
//! event's resolution is dispatched. Nothing here knows about tiles or
//! actors: targets are any type implementing [`EventTarget`].

pub mod clock;
pub mod dispatch;
pub mod event;
pub mod queue;

pub use clock::{Clock, ManualClock, SystemClock};
pub use dispatch::guarded;
pub use event::{Event, EventId, EventTarget, ResolveFlags};
pub use queue::EventQueue;

#[cfg(test)]
mod tests;
