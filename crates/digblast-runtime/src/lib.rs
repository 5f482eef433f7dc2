//! Resolver thread for digblast.
//!
//! Moves a `SimulationEngine` onto a dedicated thread that owns it
//! outright. Intents, lifecycle changes and snapshot requests arrive as
//! channel messages; between messages the thread sleeps until the next
//! event is due and then drains everything that is due.

pub mod resolver;
pub mod state;

pub use digblast_core as core;
pub use resolver::{EventResolver, ResolverError, ResolverHandle};
pub use state::{IntentReply, ResolverCommand};
