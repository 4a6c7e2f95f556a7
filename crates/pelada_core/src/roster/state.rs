use std::collections::VecDeque;

use crate::roster::payment::PaymentLedger;
use crate::roster::slots::{SlotList, GOALKEEPER_CAPACITY, MAIN_CAPACITY};
use crate::save::RosterSnapshot;

/// Runtime roster state
///
/// Holds all active roster data: the goalkeeper and main slot arrays, the
/// wait queue and the payment ledger. It can be converted to
/// `RosterSnapshot` for persistence and restored from it. The open/closed
/// gate lives here too; it is not persisted, so a restart always comes up
/// with the roster open.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterState {
    /// Priority goalkeeper seats, capacity 3
    pub goalkeepers: SlotList,

    /// Main roster seats, capacity 15
    pub main: SlotList,

    /// FIFO overflow queue, unbounded
    pub wait_queue: VecDeque<String>,

    /// Dated payment history, survives cycle resets
    pub ledger: PaymentLedger,

    /// Whether self-service add/remove commands are accepted
    pub is_open: bool,
}

impl Default for RosterState {
    fn default() -> Self {
        Self::new()
    }
}

impl RosterState {
    /// Empty roster, gate open.
    pub fn new() -> Self {
        Self {
            goalkeepers: SlotList::with_capacity(GOALKEEPER_CAPACITY),
            main: SlotList::with_capacity(MAIN_CAPACITY),
            wait_queue: VecDeque::new(),
            ledger: PaymentLedger::new(),
            is_open: true,
        }
    }

    /// Restore runtime state from a persisted snapshot.
    pub fn from_snapshot(snapshot: RosterSnapshot) -> Self {
        Self {
            goalkeepers: SlotList::from_entries(snapshot.goalkeeper_slots, GOALKEEPER_CAPACITY),
            main: SlotList::from_entries(snapshot.main_slots, MAIN_CAPACITY),
            wait_queue: snapshot.wait_queue.into(),
            ledger: PaymentLedger::from_records(snapshot.payment_ledger),
            is_open: true,
        }
    }

    /// Convert runtime state to the persisted snapshot shape.
    pub fn to_snapshot(&self) -> RosterSnapshot {
        RosterSnapshot {
            goalkeeper_slots: self.goalkeepers.to_entries(),
            main_slots: self.main.to_entries(),
            wait_queue: self.wait_queue.iter().cloned().collect(),
            payment_ledger: self.ledger.records().to_vec(),
        }
    }

    /// Whether a name is already registered in the field-player pool
    /// (main slots or wait queue). Goalkeeper membership is independent.
    pub fn in_field_pool(&self, name: &str) -> bool {
        self.main.contains(name) || self.queue_position(name).is_some()
    }

    pub fn queue_position(&self, name: &str) -> Option<usize> {
        self.wait_queue.iter().position(|queued| queued == name)
    }

    pub fn remove_from_queue(&mut self, name: &str) -> bool {
        match self.queue_position(name) {
            Some(index) => {
                self.wait_queue.remove(index);
                true
            }
            None => false,
        }
    }

    /// Move the queue head into the given main slot, if anyone is waiting.
    /// Must be called whenever a main slot is vacated, in the same
    /// operation, so no state with an empty seat and a non-empty queue is
    /// ever persisted.
    pub fn promote_into(&mut self, index: usize) -> Option<String> {
        let next = self.wait_queue.pop_front()?;
        self.main.set(index, next.clone());
        Some(next)
    }
}
