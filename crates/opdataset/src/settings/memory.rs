use crate::{
    dataset::{Dataset, DatasetKind},
    error::Error,
    settings::SettingsStore,
};
use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

///
/// MemorySettings
///
/// In-memory settings store holding the encoded blob per slot.
/// Clones share the same slots, so one handle can be given to each
/// `DatasetLocal` while another inspects what was persisted.
///

#[derive(Clone, Debug, Default)]
pub struct MemorySettings {
    slots: Rc<RefCell<BTreeMap<DatasetKind, Vec<u8>>>>,
}

impl MemorySettings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact bytes persisted for `kind`.
    #[must_use]
    pub fn raw(&self, kind: DatasetKind) -> Option<Vec<u8>> {
        self.slots.borrow().get(&kind).cloned()
    }

    /// Overwrite the persisted bytes for `kind`, bypassing encoding.
    pub fn put_raw(&self, kind: DatasetKind, bytes: impl Into<Vec<u8>>) {
        self.slots.borrow_mut().insert(kind, bytes.into());
    }

    #[must_use]
    pub fn contains(&self, kind: DatasetKind) -> bool {
        self.slots.borrow().contains_key(&kind)
    }
}

impl SettingsStore for MemorySettings {
    fn load(&self, kind: DatasetKind) -> Result<Dataset, Error> {
        let slots = self.slots.borrow();
        let bytes = slots
            .get(&kind)
            .ok_or_else(|| Error::settings_not_found(kind))?;

        Dataset::from_bytes(bytes).map_err(|err| Error::settings_corrupt(kind, &err))
    }

    fn save(&mut self, kind: DatasetKind, dataset: &Dataset) -> Result<(), Error> {
        self.slots.borrow_mut().insert(kind, dataset.to_bytes());

        Ok(())
    }

    fn delete(&mut self, kind: DatasetKind) -> Result<(), Error> {
        self.slots.borrow_mut().remove(&kind);

        Ok(())
    }
}

///
/// TESTS
///
