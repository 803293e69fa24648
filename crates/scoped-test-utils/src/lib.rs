//! Test utilities for the `scoped` owners.
//!
//! Provides a [`DropLedger`] that records every construction and destruction
//! of [`Tracked`] items in order, so tests can assert that an owner released
//! an allocation exactly once, at the right moment, and never leaked one.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

/// One entry in a [`DropLedger`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Constructed(u32),
    Destructed(u32),
}

#[derive(Default)]
struct LedgerState {
    events: Vec<Event>,
    /// Live items keyed by serial, in construction order. Ids may repeat.
    live: IndexMap<u64, u32>,
    next_serial: u64,
}

/// Shared record of [`Tracked`] lifetimes.
///
/// Cloning the ledger yields another handle to the same record.
#[derive(Clone, Default)]
pub struct DropLedger {
    state: Rc<RefCell<LedgerState>>,
}

impl DropLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a tracked item with the given id.
    pub fn item(&self, id: u32) -> Tracked {
        let mut state = self.state.borrow_mut();
        let serial = state.next_serial;
        state.next_serial += 1;
        state.live.insert(serial, id);
        state.events.push(Event::Constructed(id));
        Tracked {
            id,
            serial,
            ledger: self.clone(),
        }
    }

    /// Every event recorded so far, oldest first.
    pub fn events(&self) -> Vec<Event> {
        self.state.borrow().events.clone()
    }

    /// Number of items currently alive.
    pub fn live(&self) -> usize {
        self.state.borrow().live.len()
    }

    /// Ids of the items currently alive, in construction order.
    pub fn live_ids(&self) -> Vec<u32> {
        self.state.borrow().live.values().copied().collect()
    }

    /// How many items with `id` have been constructed.
    pub fn constructed(&self, id: u32) -> usize {
        self.count(Event::Constructed(id))
    }

    /// How many items with `id` have been destroyed.
    pub fn destructed(&self, id: u32) -> usize {
        self.count(Event::Destructed(id))
    }

    /// Total constructions recorded.
    pub fn construct_count(&self) -> usize {
        self.state
            .borrow()
            .events
            .iter()
            .filter(|e| matches!(e, Event::Constructed(_)))
            .count()
    }

    /// Total destructions recorded.
    pub fn drop_count(&self) -> usize {
        self.state
            .borrow()
            .events
            .iter()
            .filter(|e| matches!(e, Event::Destructed(_)))
            .count()
    }

    fn count(&self, event: Event) -> usize {
        self.state
            .borrow()
            .events
            .iter()
            .filter(|&&e| e == event)
            .count()
    }

    fn record_drop(&self, serial: u64, id: u32) {
        let mut state = self.state.borrow_mut();
        assert!(
            state.live.shift_remove(&serial).is_some(),
            "tracked item {id} (serial {serial}) destroyed twice"
        );
        state.events.push(Event::Destructed(id));
    }
}

impl fmt::Debug for DropLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("DropLedger")
            .field("live", &state.live.len())
            .field("events", &state.events)
            .finish()
    }
}

/// An item that reports its construction and destruction to a ledger.
///
/// Items are created through [`DropLedger::item`]. Several items may share
/// an id; the ledger tells them apart internally.
pub struct Tracked {
    id: u32,
    serial: u64,
    ledger: DropLedger,
}

impl Tracked {
    pub fn id(&self) -> u32 {
        self.id
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.ledger.record_drop(self.serial, self.id);
    }
}

impl fmt::Debug for Tracked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Tracked").field(&self.id).finish()
    }
}
