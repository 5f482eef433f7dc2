//! Routing of fired events to their resolution systems.

use digblast_core::enums::EventType;
use digblast_core::types::ActorId;
use digblast_events::{guarded, Event, ResolveFlags};

use crate::action::SimAction;
use crate::systems::{dig, explosion, movement, SimContext};

/// Resolve one event. Events whose target has since disappeared are
/// no-ops.
pub fn resolve(ctx: &mut SimContext, event: &Event<SimAction>, flags: ResolveFlags) {
    match event.target {
        SimAction::Explode { bomb } => explosion::resolve_explosion(ctx, bomb),
        SimAction::Move { actor, direction } => {
            movement::resolve_movement(ctx, actor, direction, event.created_at, flags)
        }
        SimAction::Dig { actor } => dig::resolve_dig(ctx, actor, flags),
    }
}

/// Resolve with a panic guard. A failed resolution is logged and skipped.
pub fn resolve_guarded(ctx: &mut SimContext, event: &Event<SimAction>, flags: ResolveFlags) {
    if let Err(message) = guarded(|| resolve(ctx, event, flags)) {
        log::error!(
            "resolving {:?} event {:?} failed: {}",
            event.tag(),
            event.id,
            message
        );
    }
}

/// Fire every event due at the context's clock reading, earliest first.
/// Events scheduled during the drain that are already due fire in the
/// same drain.
pub fn run_due(ctx: &mut SimContext) -> usize {
    let mut fired = 0;
    while let Some(event) = ctx.queue.pop_due(ctx.now) {
        resolve_guarded(ctx, &event, ResolveFlags::default());
        fired += 1;
    }
    fired
}

/// Fire all live events of `creator` (optionally of one type) right now
/// without continuation, removing them from the queue.
pub fn settle(ctx: &mut SimContext, creator: ActorId, tag: Option<EventType>) -> usize {
    let events = ctx.queue.take_by(creator, tag);
    for event in &events {
        resolve_guarded(ctx, event, ResolveFlags::settle());
    }
    events.len()
}
