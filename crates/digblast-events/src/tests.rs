//! Tests for the event queue, clocks and dispatch guard.

use crate::clock::{Clock, ManualClock, SystemClock};
use crate::dispatch::guarded;
use crate::event::{Event, EventTarget, ResolveFlags};
use crate::queue::EventQueue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum JobKind {
    Ping,
    Pong,
}

#[derive(Debug, Clone, PartialEq)]
struct Job {
    kind: JobKind,
    n: u32,
}

impl EventTarget for Job {
    type Tag = JobKind;
    type Creator = u32;

    fn tag(&self) -> JobKind {
        self.kind
    }
}

fn ping(n: u32, at: f64) -> Event<Job> {
    Event::new(Job { kind: JobKind::Ping, n }, at, 0.0)
}

fn pong(n: u32, at: f64) -> Event<Job> {
    Event::new(Job { kind: JobKind::Pong, n }, at, 0.0)
}

fn drain(queue: &mut EventQueue<Job>) -> Vec<u32> {
    std::iter::from_fn(|| queue.pop()).map(|e| e.target.n).collect()
}

// ---- Ordering ----

#[test]
fn test_pop_in_trigger_order() {
    let mut queue = EventQueue::new();
    queue.add(ping(3, 3.0));
    queue.add(ping(1, 1.0));
    queue.add(ping(4, 4.5));
    queue.add(ping(2, 2.0));
    assert_eq!(drain(&mut queue), vec![1, 2, 3, 4]);
    assert!(queue.is_empty());
}

#[test]
fn test_ties_fire_in_insertion_order() {
    let mut queue = EventQueue::new();
    for n in 0..10 {
        queue.add(ping(n, 1.0));
    }
    assert_eq!(drain(&mut queue), (0..10).collect::<Vec<_>>());
}

#[test]
fn test_pop_due_respects_now() {
    let mut queue = EventQueue::new();
    queue.add(ping(1, 1.0));
    queue.add(ping(2, 2.0));
    assert!(queue.pop_due(0.5).is_none());
    assert_eq!(queue.pop_due(1.0).map(|e| e.target.n), Some(1));
    assert!(queue.pop_due(1.5).is_none());
    assert_eq!(queue.next_trigger_time(), Some(2.0));
}

// ---- Cancellation ----

#[test]
fn test_cancel_hides_event_idempotently() {
    let mut queue = EventQueue::new();
    let first = queue.add(ping(1, 1.0));
    queue.add(ping(2, 2.0));
    assert_eq!(queue.len(), 2);

    assert!(queue.cancel(first));
    assert!(!queue.cancel(first));
    assert_eq!(queue.len(), 1);
    assert!(!queue.contains(first));
    assert_eq!(queue.peek().map(|e| e.target.n), Some(2));
    assert_eq!(drain(&mut queue), vec![2]);
}

#[test]
fn test_cancel_everything_empties_queue() {
    let mut queue = EventQueue::new();
    let ids: Vec<_> = (0..5).map(|n| queue.add(ping(n, n as f64))).collect();
    for id in ids {
        queue.cancel(id);
    }
    assert_eq!(queue.len(), 0);
    assert!(queue.peek().is_none());
    assert!(queue.pop().is_none());
}

#[test]
fn test_readding_cancelled_event_fires_once() {
    let mut queue = EventQueue::new();
    let event = ping(7, 5.0);
    let mut moved = event.clone();
    let id = queue.add(event);
    queue.cancel(id);
    moved.trigger_at = 1.0;
    queue.add(moved);
    queue.add(ping(8, 2.0));
    assert_eq!(drain(&mut queue), vec![7, 8]);
}

#[test]
fn test_heap_compaction_keeps_order() {
    let mut queue = EventQueue::new();
    let ids: Vec<_> = (0..300).map(|n| queue.add(ping(n, n as f64))).collect();
    for id in ids.iter().filter(|id| id.0 % 50 != 0) {
        queue.cancel(*id);
    }
    let survivors = queue.len();
    queue.add(ping(1000, 0.5));
    assert_eq!(queue.len(), survivors + 1);
    let order: Vec<f64> = std::iter::from_fn(|| queue.pop()).map(|e| e.trigger_at).collect();
    assert!(order.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(order.len(), survivors + 1);
}

// ---- Creator queries ----

#[test]
fn test_events_by_creator_and_type() {
    let mut queue = EventQueue::new();
    queue.add(ping(1, 3.0).created_by(10));
    queue.add(pong(2, 1.0).created_by(10));
    queue.add(ping(3, 2.0).created_by(10));
    queue.add(ping(4, 0.5).created_by(11));
    queue.add(ping(5, 0.1));

    let pings: Vec<u32> = queue
        .events_by(10, Some(JobKind::Ping))
        .iter()
        .map(|e| e.target.n)
        .collect();
    assert_eq!(pings, vec![3, 1]);
    assert_eq!(queue.events_by(10, None).len(), 3);
    assert!(queue.events_by(12, None).is_empty());
}

#[test]
fn test_take_then_cancel_all_leaves_nothing() {
    let mut queue = EventQueue::new();
    queue.add(ping(1, 1.0).created_by(1));
    queue.add(ping(2, 2.0).created_by(1));
    queue.add(pong(3, 1.5).created_by(1));

    let settled = queue.take_by(1, Some(JobKind::Ping));
    assert_eq!(settled.iter().map(|e| e.target.n).collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(queue.cancel_all(1, Some(JobKind::Ping)), 0);
    assert!(queue.events_by(1, Some(JobKind::Ping)).is_empty());
    assert_eq!(queue.len(), 1);

    assert_eq!(queue.cancel_all(1, None), 1);
    assert_eq!(queue.cancel_all(1, None), 0);
    assert!(queue.is_empty());
}

#[test]
fn test_ids_where_matches_targets() {
    let mut queue = EventQueue::new();
    queue.add(ping(1, 2.0));
    let b = queue.add(ping(2, 1.0));
    let c = queue.add(pong(2, 3.0));
    assert_eq!(queue.ids_where(|job| job.n == 2), vec![b, c]);
}

// ---- Flags, clocks, guard ----

#[test]
fn test_resolve_flags() {
    assert!(ResolveFlags::default().spawn);
    assert!(!ResolveFlags::settle().spawn);
}

#[test]
fn test_manual_clock_shared_between_clones() {
    let clock = ManualClock::new(1.0);
    let view = clock.clone();
    clock.advance(0.25);
    assert_eq!(view.now(), 1.25);
    view.set(10.0);
    assert_eq!(clock.now(), 10.0);
}

#[test]
fn test_system_clock_is_monotonic() {
    let clock = SystemClock::new();
    let a = clock.now();
    let b = clock.now();
    assert!(a >= 0.0);
    assert!(b >= a);
}

#[test]
fn test_guarded_catches_panics() {
    assert_eq!(guarded(|| 41 + 1), Ok(42));
    let err = guarded(|| -> u32 { panic!("tile exploded twice") }).unwrap_err();
    assert!(err.contains("tile exploded twice"));
    let formatted = guarded(|| -> () { panic!("bomb {}", 3) }).unwrap_err();
    assert_eq!(formatted, "bomb 3");
}
