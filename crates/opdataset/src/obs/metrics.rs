use crate::dataset::DatasetKind;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

///
/// EventState
/// Ephemeral, in-memory counters per slot.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventState {
    pub active: DatasetCounters,
    pub pending: DatasetCounters,
}

impl EventState {
    #[must_use]
    pub const fn slot(&self, kind: DatasetKind) -> &DatasetCounters {
        match kind {
            DatasetKind::Active => &self.active,
            DatasetKind::Pending => &self.pending,
        }
    }

    const fn slot_mut(&mut self, kind: DatasetKind) -> &mut DatasetCounters {
        match kind {
            DatasetKind::Active => &mut self.active,
            DatasetKind::Pending => &mut self.pending,
        }
    }
}

///
/// DatasetCounters
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct DatasetCounters {
    // Entrypoints
    pub save_calls: u64,
    pub read_calls: u64,
    pub restore_calls: u64,
    pub clear_calls: u64,

    // Outcomes
    pub datasets_saved: u64,
    pub datasets_deleted: u64,
    pub read_failures: u64,
    pub ignored_faults: u64,

    // Key store traffic
    pub keys_imported: u64,
    pub keys_exported: u64,
    pub keys_destroyed: u64,
}

thread_local! {
    static EVENT_STATE: RefCell<EventState> = RefCell::new(EventState::default());
}

/// Borrow counters immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&m.borrow()))
}

/// Borrow one slot's counters mutably.
pub(crate) fn with_slot_mut<R>(
    kind: DatasetKind,
    f: impl FnOnce(&mut DatasetCounters) -> R,
) -> R {
    EVENT_STATE.with(|m| f(m.borrow_mut().slot_mut(kind)))
}

/// Reset all counters (useful in tests).
pub(crate) fn reset() {
    EVENT_STATE.with(|m| *m.borrow_mut() = EventState::default());
}
