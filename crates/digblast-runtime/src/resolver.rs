//! The resolver thread and the handle used to talk to it.
//!
//! The engine is moved into the thread, so no lock guards the world or
//! the queue: every mutation happens on this one thread, in message
//! order. Event resolutions that schedule more events (walking on,
//! chain reactions, remote detonation) do so directly on the queue they
//! are being drained from.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread::JoinHandle;
use std::time::Duration;

use thiserror::Error;

use digblast_core::commands::PlayerIntent;
use digblast_core::enums::EventType;
use digblast_core::state::RenderSnapshot;
use digblast_core::types::ActorId;
use digblast_events::{Event, EventId};
use digblast_sim::{SimAction, SimulationEngine};

use crate::state::{IntentReply, LatestSnapshot, ResolverCommand};

/// Longest single sleep while events are pending. Keeps the wait finite
/// for events parked far in the future (defused bombs).
const MAX_WAIT: Duration = Duration::from_secs(60);

/// Failures talking to the resolver thread.
#[derive(Debug, Error)]
pub enum ResolverError {
    #[error("resolver thread has stopped")]
    Disconnected,
    #[error("resolver dropped the reply")]
    ReplyDropped,
    #[error("resolver thread panicked")]
    Panicked,
    #[error("failed to spawn resolver thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Entry point for running an engine on its own thread.
pub struct EventResolver;

impl EventResolver {
    /// Move `engine` onto a new resolver thread. The resolver starts
    /// stopped: call [`ResolverHandle::start`] to begin dispatching.
    pub fn spawn(engine: SimulationEngine) -> Result<ResolverHandle, ResolverError> {
        let (tx, rx) = mpsc::channel::<ResolverCommand>();
        let latest = LatestSnapshot::new();
        let shared = latest.clone();

        let thread = std::thread::Builder::new()
            .name("digblast-resolver".into())
            .spawn(move || run_resolver(engine, rx, &shared))?;

        Ok(ResolverHandle {
            tx,
            thread: Some(thread),
            latest,
        })
    }
}

/// Sender side of a running resolver. Dropping the handle shuts the
/// thread down.
pub struct ResolverHandle {
    tx: mpsc::Sender<ResolverCommand>,
    thread: Option<JoinHandle<()>>,
    latest: LatestSnapshot,
}

impl ResolverHandle {
    fn send_command(&self, command: ResolverCommand) -> Result<(), ResolverError> {
        self.tx
            .send(command)
            .map_err(|_| ResolverError::Disconnected)
    }

    pub fn start(&self) -> Result<(), ResolverError> {
        self.send_command(ResolverCommand::Start)
    }

    /// Stop dispatching. Already queued events wait for the next start.
    pub fn stop(&self) -> Result<(), ResolverError> {
        self.send_command(ResolverCommand::Stop)
    }

    /// Fire-and-forget intent. Refusals are logged by the resolver.
    pub fn send(&self, intent: PlayerIntent) -> Result<(), ResolverError> {
        self.send_command(ResolverCommand::Intent(intent, None))
    }

    /// Apply an intent and wait for its outcome.
    pub fn request(&self, intent: PlayerIntent) -> Result<IntentReply, ResolverError> {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.send_command(ResolverCommand::Intent(intent, Some(reply_tx)))?;
        reply_rx.recv().map_err(|_| ResolverError::ReplyDropped)
    }

    /// Queue an event directly. The id is known before the resolver sees
    /// it.
    pub fn schedule(&self, event: Event<SimAction>) -> Result<EventId, ResolverError> {
        let id = event.id;
        self.send_command(ResolverCommand::Schedule(event))?;
        Ok(id)
    }

    pub fn cancel(&self, id: EventId) -> Result<(), ResolverError> {
        self.send_command(ResolverCommand::Cancel(id))
    }

    /// Settle an actor's in-flight events and wait for the count.
    pub fn resolve_now(
        &self,
        creator: ActorId,
        tag: Option<EventType>,
    ) -> Result<usize, ResolverError> {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.send_command(ResolverCommand::ResolveNow(creator, tag, reply_tx))?;
        reply_rx.recv().map_err(|_| ResolverError::ReplyDropped)
    }

    /// Take a fresh snapshot. Explosion flashes go to this caller only.
    pub fn snapshot(&self) -> Result<RenderSnapshot, ResolverError> {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.send_command(ResolverCommand::Snapshot(reply_tx))?;
        reply_rx.recv().map_err(|_| ResolverError::ReplyDropped)
    }

    /// The snapshot most recently produced by [`Self::snapshot`].
    pub fn latest_snapshot(&self) -> Option<RenderSnapshot> {
        self.latest.get()
    }

    /// Stop the thread and wait for it to exit.
    pub fn shutdown(mut self) -> Result<(), ResolverError> {
        self.join()
    }

    fn join(&mut self) -> Result<(), ResolverError> {
        let Some(thread) = self.thread.take() else {
            return Ok(());
        };
        // The thread may already be gone; joining reports how it ended.
        let _ = self.tx.send(ResolverCommand::Shutdown);
        thread.join().map_err(|_| ResolverError::Panicked)
    }
}

impl Drop for ResolverHandle {
    fn drop(&mut self) {
        if let Err(e) = self.join() {
            log::error!("resolver shutdown failed: {}", e);
        }
    }
}

/// How long to sleep before the next due event, if dispatching.
fn next_wait(engine: &mut SimulationEngine, running: bool) -> Option<Duration> {
    if !running {
        return None;
    }
    let next = engine.next_trigger_time()?;
    let secs = (next - engine.now()).max(0.0);
    Some(Duration::from_secs_f64(secs).min(MAX_WAIT))
}

/// The resolver loop. Runs until Shutdown or until every handle is gone.
fn run_resolver(
    mut engine: SimulationEngine,
    rx: mpsc::Receiver<ResolverCommand>,
    latest: &LatestSnapshot,
) {
    let mut running = false;
    log::info!("resolver thread up");

    loop {
        let received = match next_wait(&mut engine, running) {
            Some(wait) => rx.recv_timeout(wait),
            None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        match received {
            Ok(ResolverCommand::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
            Ok(command) => handle_command(&mut engine, command, &mut running, latest),
            Err(RecvTimeoutError::Timeout) => {}
        }

        if running {
            let fired = engine.dispatch_due();
            if fired > 0 {
                log::trace!("dispatched {} events", fired);
            }
        }
    }

    log::info!(
        "resolver thread down with {} events pending",
        engine.queue().len()
    );
}

fn handle_command(
    engine: &mut SimulationEngine,
    command: ResolverCommand,
    running: &mut bool,
    latest: &LatestSnapshot,
) {
    match command {
        ResolverCommand::Intent(intent, reply) => {
            let result = engine.apply_intent(intent.clone());
            match reply {
                Some(reply) => {
                    let _ = reply.send(result);
                }
                None => {
                    if let Err(e) = result {
                        log::warn!("intent {:?} refused: {}", intent, e);
                    }
                }
            }
        }
        ResolverCommand::Start => {
            if !*running {
                log::info!("resolver started at t={:.3}", engine.now());
            }
            *running = true;
        }
        ResolverCommand::Stop => {
            if *running {
                log::info!(
                    "resolver stopped at t={:.3} with {} events pending",
                    engine.now(),
                    engine.queue().len()
                );
            }
            *running = false;
        }
        ResolverCommand::Schedule(event) => {
            engine.schedule(event);
        }
        ResolverCommand::Cancel(id) => {
            engine.cancel(id);
        }
        ResolverCommand::ResolveNow(creator, tag, reply) => {
            let _ = reply.send(engine.resolve_now(creator, tag));
        }
        ResolverCommand::Snapshot(reply) => {
            let snapshot = engine.snapshot();
            latest.store(snapshot.clone());
            if reply.send(snapshot).is_err() {
                log::warn!("snapshot requester went away");
            }
        }
        // Handled by the loop.
        ResolverCommand::Shutdown => {}
    }
}
