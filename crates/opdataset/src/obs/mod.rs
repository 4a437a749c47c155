//! Observability: per-slot operation counters.
//!
//! Store logic never touches the counters directly; every update flows
//! through `ObsEvent` and `record`. Human-readable output goes through the
//! `log` facade at the call site.

mod metrics;

pub use metrics::{DatasetCounters, EventState};

use crate::dataset::DatasetKind;

///
/// ObsEvent
///

#[derive(Clone, Copy, Debug)]
pub enum ObsEvent {
    SaveCall { kind: DatasetKind },
    ReadCall { kind: DatasetKind },
    RestoreCall { kind: DatasetKind },
    ClearCall { kind: DatasetKind },
    DatasetSaved { kind: DatasetKind },
    DatasetDeleted { kind: DatasetKind },
    ReadFailed { kind: DatasetKind },
    FaultIgnored { kind: DatasetKind },
    KeyImported { kind: DatasetKind },
    KeyExported { kind: DatasetKind },
    KeyDestroyed { kind: DatasetKind },
}

impl ObsEvent {
    const fn kind(self) -> DatasetKind {
        match self {
            Self::SaveCall { kind }
            | Self::ReadCall { kind }
            | Self::RestoreCall { kind }
            | Self::ClearCall { kind }
            | Self::DatasetSaved { kind }
            | Self::DatasetDeleted { kind }
            | Self::ReadFailed { kind }
            | Self::FaultIgnored { kind }
            | Self::KeyImported { kind }
            | Self::KeyExported { kind }
            | Self::KeyDestroyed { kind } => kind,
        }
    }
}

pub(crate) fn record(event: ObsEvent) {
    metrics::with_slot_mut(event.kind(), |c| {
        let counter = match event {
            ObsEvent::SaveCall { .. } => &mut c.save_calls,
            ObsEvent::ReadCall { .. } => &mut c.read_calls,
            ObsEvent::RestoreCall { .. } => &mut c.restore_calls,
            ObsEvent::ClearCall { .. } => &mut c.clear_calls,
            ObsEvent::DatasetSaved { .. } => &mut c.datasets_saved,
            ObsEvent::DatasetDeleted { .. } => &mut c.datasets_deleted,
            ObsEvent::ReadFailed { .. } => &mut c.read_failures,
            ObsEvent::FaultIgnored { .. } => &mut c.ignored_faults,
            ObsEvent::KeyImported { .. } => &mut c.keys_imported,
            ObsEvent::KeyExported { .. } => &mut c.keys_exported,
            ObsEvent::KeyDestroyed { .. } => &mut c.keys_destroyed,
        };
        *counter = counter.saturating_add(1);
    });
}

/// Snapshot the counters of the calling thread.
#[must_use]
pub fn report() -> EventState {
    metrics::with_state(EventState::clone)
}

/// Reset the counters of the calling thread.
pub fn reset() {
    metrics::reset();
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_lands_in_the_right_slot() {
        reset();
        record(ObsEvent::SaveCall {
            kind: DatasetKind::Pending,
        });
        record(ObsEvent::FaultIgnored {
            kind: DatasetKind::Pending,
        });
        record(ObsEvent::KeyExported {
            kind: DatasetKind::Active,
        });

        let state = report();
        assert_eq!(state.pending.save_calls, 1);
        assert_eq!(state.pending.ignored_faults, 1);
        assert_eq!(state.slot(DatasetKind::Active).keys_exported, 1);
        assert_eq!(state.active.save_calls, 0);

        reset();
        assert_eq!(report(), EventState::default());
    }

    #[test]
    fn report_serializes() {
        reset();
        record(ObsEvent::ClearCall {
            kind: DatasetKind::Active,
        });

        let json = serde_json::to_value(report()).unwrap();
        assert_eq!(json["active"]["clear_calls"], 1);
        assert_eq!(json["pending"]["clear_calls"], 0);
    }
}
