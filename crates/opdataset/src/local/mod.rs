//! Module: local
//! Responsibility: per-slot dataset persistence and its cached metadata
//! (timestamp, saved flag, update time).
//! Does not own: TLV framing, key storage, or durable storage.
//! Boundary: callers -> local -> {settings, secure}.


use crate::{
    dataset::{Dataset, DatasetInfo, DatasetKind, DatasetTlvs, Timestamp},
    error::Error,
    obs::{self, ObsEvent},
    secure::KeyMaterialPolicy,
    settings::SettingsStore,
    time::{Clock, TimeMilli},
};
use log::{info, warn};
use std::cmp::Ordering;

///
/// DatasetLocal
///
/// The persisted dataset of one slot. Callers only ever see fully
/// populated datasets; where the sensitive fields live at rest is decided
/// by the key-material policy `P`.
///
/// Metadata is a best-effort cache. The settings store stays authoritative
/// for whether the slot holds a dataset.
///

#[derive(Debug)]
pub struct DatasetLocal<S, P, C> {
    kind: DatasetKind,
    settings: S,
    keys: P,
    clock: C,
    timestamp: Option<Timestamp>,
    saved: bool,
    update_time: TimeMilli,
}

impl<S, P, C> DatasetLocal<S, P, C>
where
    S: SettingsStore,
    P: KeyMaterialPolicy,
    C: Clock,
{
    pub const fn new(kind: DatasetKind, settings: S, keys: P, clock: C) -> Self {
        Self {
            kind,
            settings,
            keys,
            clock,
            timestamp: None,
            saved: false,
            update_time: TimeMilli::ZERO,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> DatasetKind {
        self.kind
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.kind.is_active()
    }

    /// Whether a dataset is believed to be persisted in this slot.
    #[must_use]
    pub const fn is_saved(&self) -> bool {
        self.saved
    }

    /// Cached timestamp of the persisted dataset.
    #[must_use]
    pub const fn timestamp(&self) -> Option<Timestamp> {
        self.timestamp
    }

    /// Time of the last successful save.
    #[must_use]
    pub const fn update_time(&self) -> TimeMilli {
        self.update_time
    }

    #[must_use]
    pub const fn settings(&self) -> &S {
        &self.settings
    }

    #[must_use]
    pub const fn keys(&self) -> &P {
        &self.keys
    }

    /// Order the cached timestamp against `other`. An absent timestamp is
    /// older than any present one.
    #[must_use]
    pub fn compare(&self, other: Option<&Timestamp>) -> Ordering {
        self.timestamp.as_ref().cmp(&other)
    }

    /// Erase the slot. Storage faults are logged and ignored.
    pub fn clear(&mut self) {
        obs::record(ObsEvent::ClearCall { kind: self.kind });

        self.keys.destroy_keys(self.kind);
        self.delete_ignoring_faults();
        self.timestamp = None;
        self.saved = false;
    }

    /// Read the slot and refresh the cached metadata from what was found.
    pub fn restore(&mut self, dataset: &mut Dataset) -> Result<(), Error> {
        obs::record(ObsEvent::RestoreCall { kind: self.kind });

        self.timestamp = None;
        self.read(dataset)?;

        self.saved = true;
        self.timestamp = dataset.timestamp(self.kind);

        Ok(())
    }

    /// Read the slot into `dataset`.
    ///
    /// On failure `dataset` is left empty. An Active read never carries the
    /// pending timestamp or delay timer; a Pending read reports the delay
    /// time remaining since the last save. The stored bytes are not touched.
    pub fn read(&self, dataset: &mut Dataset) -> Result<(), Error> {
        obs::record(ObsEvent::ReadCall { kind: self.kind });

        *dataset = match self.settings.load(self.kind) {
            Ok(loaded) => loaded,
            Err(err) => {
                dataset.clear();
                obs::record(ObsEvent::ReadFailed { kind: self.kind });
                return Err(err);
            }
        };

        self.keys.emplace_keys(self.kind, dataset);

        let now = self.clock.now();
        match self.kind {
            DatasetKind::Active => dataset.remove_pending_fields(),
            DatasetKind::Pending => {
                // a pending dataset without a delay timer is left as stored
                let Some(delay) = dataset.delay_timer() else {
                    return Ok(());
                };
                let elapsed = now.since(self.update_time);
                dataset.set_delay_timer(delay.saturating_sub(elapsed))?;
            }
        }
        dataset.set_update_time(now);

        Ok(())
    }

    /// Read the slot as a structured view.
    pub fn read_info(&self, info: &mut DatasetInfo) -> Result<(), Error> {
        info.clear();

        let mut dataset = Dataset::new();
        self.read(&mut dataset)?;
        *info = DatasetInfo::try_from(&dataset)?;

        Ok(())
    }

    /// Read the slot as raw TLV bytes.
    pub fn read_tlvs(&self, tlvs: &mut DatasetTlvs) -> Result<(), Error> {
        tlvs.clear();

        let mut dataset = Dataset::new();
        self.read(&mut dataset)?;
        *tlvs = DatasetTlvs::from(&dataset);

        Ok(())
    }

    /// Persist `dataset` into the slot. An empty dataset erases the slot.
    ///
    /// Keys previously stored for the slot are destroyed first. With key
    /// references the blob is a scrubbed copy, and an Active copy also drops
    /// the pending-only entries; inline keys persist the input as given. On
    /// a storage failure the error is returned and the cached timestamp and
    /// update time keep their previous values.
    pub fn save(&mut self, dataset: &Dataset) -> Result<(), Error> {
        obs::record(ObsEvent::SaveCall { kind: self.kind });

        self.keys.destroy_keys(self.kind);

        if dataset.is_empty() {
            self.delete_ignoring_faults();
            self.saved = false;
            obs::record(ObsEvent::DatasetDeleted { kind: self.kind });
            info!("{} dataset deleted", self.kind);
        } else {
            if self.keys.uses_key_references() {
                let mut working = Dataset::copy_for(self.kind, dataset);
                self.keys.store_keys(self.kind, &mut working);
                self.settings.save(self.kind, &working)?;
            } else {
                self.settings.save(self.kind, dataset)?;
            }

            self.saved = true;
            obs::record(ObsEvent::DatasetSaved { kind: self.kind });
            info!("{} dataset set", self.kind);
        }

        self.timestamp = dataset.timestamp(self.kind);
        self.update_time = self.clock.now();

        Ok(())
    }

    /// Persist a structured view. Conversion faults are returned before
    /// anything is touched.
    pub fn save_info(&mut self, info: &DatasetInfo) -> Result<(), Error> {
        let dataset = Dataset::try_from(info)?;

        self.save(&dataset)
    }

    /// Persist raw TLV bytes. Malformed framing is returned before anything
    /// is touched.
    pub fn save_tlvs(&mut self, tlvs: &DatasetTlvs) -> Result<(), Error> {
        let dataset = Dataset::try_from(tlvs)?;

        self.save(&dataset)
    }

    fn delete_ignoring_faults(&mut self) {
        if let Err(err) = self.settings.delete(self.kind) {
            warn!("{} dataset: ignoring delete failure: {err}", self.kind);
            obs::record(ObsEvent::FaultIgnored { kind: self.kind });
        }
    }
}
