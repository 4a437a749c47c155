//! Module: settings
//! Responsibility: durable per-slot dataset persistence boundary.
//! Does not own: key scrubbing or metadata caching (see `local`).
//! Boundary: local -> settings (one-way).

mod memory;

pub use memory::MemorySettings;

use crate::{
    dataset::{Dataset, DatasetKind},
    error::Error,
};

///
/// SettingsStore
///
/// One opaque blob per slot kind. The store is authoritative for whether a
/// slot holds a dataset.
///

pub trait SettingsStore {
    /// Load the slot. An empty slot is `ErrorClass::NotFound`.
    fn load(&self, kind: DatasetKind) -> Result<Dataset, Error>;

    /// Persist `dataset` into the slot, replacing any previous blob.
    fn save(&mut self, kind: DatasetKind, dataset: &Dataset) -> Result<(), Error>;

    /// Remove the slot. Removing an empty slot succeeds.
    fn delete(&mut self, kind: DatasetKind) -> Result<(), Error>;
}

impl<S: SettingsStore + ?Sized> SettingsStore for Box<S> {
    fn load(&self, kind: DatasetKind) -> Result<Dataset, Error> {
        (**self).load(kind)
    }

    fn save(&mut self, kind: DatasetKind, dataset: &Dataset) -> Result<(), Error> {
        (**self).save(kind, dataset)
    }

    fn delete(&mut self, kind: DatasetKind) -> Result<(), Error> {
        (**self).delete(kind)
    }
}
