use crate::{
    error::Error,
    keys::{KeyAttributes, KeyRef, KeyStore},
};
use std::{cell::RefCell, collections::BTreeMap, rc::Rc};
use zeroize::Zeroizing;

///
/// StoredKey
///

#[derive(Debug)]
struct StoredKey {
    attributes: KeyAttributes,
    bytes: Zeroizing<Vec<u8>>,
}

///
/// MemoryKeyStore
///
/// In-memory key store. Key bytes are wiped when replaced or destroyed.
/// Clones share the same keys.
///

#[derive(Clone, Debug, Default)]
pub struct MemoryKeyStore {
    keys: Rc<RefCell<BTreeMap<KeyRef, StoredKey>>>,
}

impl MemoryKeyStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, key_ref: KeyRef) -> bool {
        self.keys.borrow().contains_key(&key_ref)
    }

    #[must_use]
    pub fn attributes(&self, key_ref: KeyRef) -> Option<KeyAttributes> {
        self.keys.borrow().get(&key_ref).map(|key| key.attributes)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.borrow().is_empty()
    }
}

impl KeyStore for MemoryKeyStore {
    fn import_key(
        &mut self,
        key_ref: KeyRef,
        attributes: KeyAttributes,
        key: &[u8],
    ) -> Result<(), Error> {
        if key.is_empty() {
            return Err(Error::key_store_fault(format!(
                "refusing empty key for {key_ref}"
            )));
        }

        self.keys.borrow_mut().insert(
            key_ref,
            StoredKey {
                attributes,
                bytes: Zeroizing::new(key.to_vec()),
            },
        );

        Ok(())
    }

    fn export_key(&self, key_ref: KeyRef, out: &mut [u8]) -> Result<usize, Error> {
        let keys = self.keys.borrow();
        let stored = keys.get(&key_ref).ok_or_else(|| Error::key_not_found(key_ref))?;
        let len = stored.bytes.len();
        let available = out.len();
        let Some(dst) = out.get_mut(..len) else {
            return Err(Error::key_store_fault(format!(
                "export buffer too small for {key_ref}: {available} < {len}"
            )));
        };
        dst.copy_from_slice(&stored.bytes);

        Ok(len)
    }

    fn destroy_key(&mut self, key_ref: KeyRef) -> Result<(), Error> {
        self.keys.borrow_mut().remove(&key_ref);

        Ok(())
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorClass;

    #[test]
    fn import_export_destroy_cycle() {
        let mut store = MemoryKeyStore::new();
        store
            .import_key(KeyRef::ActiveNetworkKey, KeyAttributes::DATASET_KEY, &[7; 16])
            .unwrap();

        let mut out = [0u8; 16];
        let len = store.export_key(KeyRef::ActiveNetworkKey, &mut out).unwrap();
        assert_eq!(len, 16);
        assert_eq!(out, [7; 16]);
        assert_eq!(
            store.attributes(KeyRef::ActiveNetworkKey),
            Some(KeyAttributes::DATASET_KEY)
        );

        store.destroy_key(KeyRef::ActiveNetworkKey).unwrap();
        store.destroy_key(KeyRef::ActiveNetworkKey).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn export_of_missing_key_is_not_found() {
        let store = MemoryKeyStore::new();
        let mut out = [0u8; 16];

        let err = store
            .export_key(KeyRef::PendingPskc, &mut out)
            .expect_err("nothing stored");
        assert!(err.is_not_found());
    }

    #[test]
    fn export_into_short_buffer_fails() {
        let mut store = MemoryKeyStore::new();
        store
            .import_key(KeyRef::ActivePskc, KeyAttributes::DATASET_KEY, &[1; 16])
            .unwrap();

        let mut out = [0u8; 8];
        let err = store
            .export_key(KeyRef::ActivePskc, &mut out)
            .expect_err("buffer is too small");
        assert_eq!(err.class, ErrorClass::SecureStore);
    }
}
