//! Priority queue with lazy cancellation.
//!
//! The heap holds lightweight keys only. The authoritative set of live
//! events is the id index; cancelling removes from the index and leaves
//! the heap entry to be discarded the next time it reaches the front.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};

use crate::event::{Event, EventId, EventTarget};

#[derive(Debug, Clone, Copy)]
struct HeapKey {
    trigger_at: f64,
    seq: u64,
    id: EventId,
}

impl PartialEq for HeapKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapKey {}

impl PartialOrd for HeapKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.trigger_at
            .total_cmp(&other.trigger_at)
            .then(self.seq.cmp(&other.seq))
    }
}

/// Earliest-first event queue. Ties fire in insertion order.
#[derive(Debug)]
pub struct EventQueue<T: EventTarget> {
    heap: BinaryHeap<Reverse<HeapKey>>,
    /// Live events by id, with the sequence number of their heap key.
    live: HashMap<EventId, (u64, Event<T>)>,
    next_seq: u64,
}

impl<T: EventTarget> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: EventTarget> EventQueue<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            live: HashMap::new(),
            next_seq: 0,
        }
    }

    /// Insert an event. Re-adding a live id replaces the old entry.
    pub fn add(&mut self, event: Event<T>) -> EventId {
        let id = event.id;
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(HeapKey {
            trigger_at: event.trigger_at,
            seq,
            id,
        }));
        self.live.insert(id, (seq, event));
        self.compact_if_bloated();
        id
    }

    /// Discard stale keys at the heap front.
    fn cleanup_front(&mut self) {
        while let Some(Reverse(key)) = self.heap.peek() {
            match self.live.get(&key.id) {
                Some((seq, _)) if *seq == key.seq => break,
                _ => {
                    self.heap.pop();
                }
            }
        }
    }

    /// Rebuild the heap once cancelled keys dominate it.
    fn compact_if_bloated(&mut self) {
        if self.heap.len() <= 64 || self.heap.len() <= self.live.len() * 4 {
            return;
        }
        log::trace!(
            "compacting event heap: {} keys, {} live",
            self.heap.len(),
            self.live.len()
        );
        self.heap = self
            .live
            .iter()
            .map(|(id, (seq, event))| {
                Reverse(HeapKey {
                    trigger_at: event.trigger_at,
                    seq: *seq,
                    id: *id,
                })
            })
            .collect();
    }

    /// Earliest live event.
    pub fn peek(&mut self) -> Option<&Event<T>> {
        self.cleanup_front();
        let Reverse(key) = self.heap.peek()?;
        self.live.get(&key.id).map(|(_, event)| event)
    }

    pub fn next_trigger_time(&mut self) -> Option<f64> {
        self.peek().map(|e| e.trigger_at)
    }

    /// Remove and return the earliest live event.
    pub fn pop(&mut self) -> Option<Event<T>> {
        self.cleanup_front();
        let Reverse(key) = self.heap.pop()?;
        self.live.remove(&key.id).map(|(_, event)| event)
    }

    /// Pop the earliest live event only if it is due at `now`.
    pub fn pop_due(&mut self, now: f64) -> Option<Event<T>> {
        match self.next_trigger_time() {
            Some(t) if t <= now => self.pop(),
            _ => None,
        }
    }

    /// Cancel by id. Returns whether a live event was removed; cancelling
    /// twice is harmless.
    pub fn cancel(&mut self, id: EventId) -> bool {
        self.live.remove(&id).is_some()
    }

    pub fn contains(&self, id: EventId) -> bool {
        self.live.contains_key(&id)
    }

    pub fn get(&self, id: EventId) -> Option<&Event<T>> {
        self.live.get(&id).map(|(_, event)| event)
    }

    /// Live events by `creator`, optionally of one type, in firing order.
    pub fn events_by(&self, creator: T::Creator, tag: Option<T::Tag>) -> Vec<&Event<T>> {
        let mut found: Vec<(u64, &Event<T>)> = self
            .live
            .values()
            .filter(|(_, event)| event.matches(creator, tag))
            .map(|(seq, event)| (*seq, event))
            .collect();
        found.sort_by(|a, b| a.1.trigger_at.total_cmp(&b.1.trigger_at).then(a.0.cmp(&b.0)));
        found.into_iter().map(|(_, event)| event).collect()
    }

    /// Remove and return the matching events, in firing order.
    pub fn take_by(&mut self, creator: T::Creator, tag: Option<T::Tag>) -> Vec<Event<T>> {
        let ids: Vec<EventId> = self.events_by(creator, tag).iter().map(|e| e.id).collect();
        ids.into_iter()
            .filter_map(|id| self.live.remove(&id).map(|(_, event)| event))
            .collect()
    }

    /// Cancel every matching event. Returns how many were live.
    pub fn cancel_all(&mut self, creator: T::Creator, tag: Option<T::Tag>) -> usize {
        self.take_by(creator, tag).len()
    }

    /// Ids of live events whose target satisfies `pred`, in firing order.
    pub fn ids_where(&self, mut pred: impl FnMut(&T) -> bool) -> Vec<EventId> {
        let mut found: Vec<(u64, &Event<T>)> = self
            .live
            .values()
            .filter(|(_, event)| pred(&event.target))
            .map(|(seq, event)| (*seq, event))
            .collect();
        found.sort_by(|a, b| a.1.trigger_at.total_cmp(&b.1.trigger_at).then(a.0.cmp(&b.0)));
        found.into_iter().map(|(_, event)| event.id).collect()
    }

    /// Number of live events.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.live.clear();
    }
}
