//! Messages and state shared between resolver handles and the resolver
//! thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use digblast_core::commands::{IntentOutcome, PlayerIntent};
use digblast_core::enums::EventType;
use digblast_core::error::IntentError;
use digblast_core::state::RenderSnapshot;
use digblast_core::types::ActorId;
use digblast_events::{Event, EventId};
use digblast_sim::SimAction;

/// Result of an intent, as sent back to a waiting caller.
pub type IntentReply = Result<IntentOutcome, IntentError>;

/// Commands sent from handles to the resolver thread.
#[derive(Debug)]
pub enum ResolverCommand {
    /// Apply an intent. With a reply channel the caller waits for the
    /// outcome; without one a refusal is only logged.
    Intent(PlayerIntent, Option<mpsc::Sender<IntentReply>>),
    /// Begin dispatching due events.
    Start,
    /// Stop dispatching. Pending events stay queued.
    Stop,
    Schedule(Event<SimAction>),
    Cancel(EventId),
    /// Settle every live event of an actor, replying with how many fired.
    ResolveNow(ActorId, Option<EventType>, mpsc::Sender<usize>),
    Snapshot(mpsc::Sender<RenderSnapshot>),
    /// Shut down the resolver thread.
    Shutdown,
}

/// Most recent snapshot handed out, for polling without a round trip.
#[derive(Debug, Clone, Default)]
pub struct LatestSnapshot {
    inner: Arc<Mutex<Option<RenderSnapshot>>>,
}

impl LatestSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self, snapshot: RenderSnapshot) {
        if let Ok(mut lock) = self.inner.lock() {
            *lock = Some(snapshot);
        }
    }

    pub fn get(&self) -> Option<RenderSnapshot> {
        self.inner.lock().ok().and_then(|lock| lock.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use digblast_core::commands::PlayerIntent;
    use digblast_core::enums::Direction;

    #[test]
    fn test_latest_snapshot_starts_empty() {
        let latest = LatestSnapshot::new();
        assert!(latest.get().is_none());

        let shared = latest.clone();
        shared.store(RenderSnapshot {
            width: 3,
            ..Default::default()
        });
        assert_eq!(latest.get().map(|s| s.width), Some(3));
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<ResolverCommand>();
        let actor = ActorId(1);

        tx.send(ResolverCommand::Start).unwrap();
        tx.send(ResolverCommand::Intent(
            PlayerIntent::SetDirection {
                actor,
                direction: Direction::Left,
            },
            None,
        ))
        .unwrap();
        tx.send(ResolverCommand::Shutdown).unwrap();

        let commands: Vec<_> = rx.try_iter().collect();
        assert_eq!(commands.len(), 3);
        assert!(matches!(commands[0], ResolverCommand::Start));
        assert!(matches!(
            commands[1],
            ResolverCommand::Intent(PlayerIntent::SetDirection { .. }, None)
        ));
        assert!(matches!(commands[2], ResolverCommand::Shutdown));
    }
}
