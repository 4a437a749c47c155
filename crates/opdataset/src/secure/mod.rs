//! Module: secure
//! Responsibility: move the network key and PSKc between a dataset and
//! the key store, so the persisted blob only ever carries placeholders.
//! Does not own: persistence ordering (see `local`) or key storage (see `keys`).
//! Boundary: local -> secure -> keys (one-way).


use crate::{
    dataset::{Dataset, DatasetKind, NETWORK_KEY_SIZE, PSKC_SIZE},
    keys::{KeyAttributes, KeyRef, KeyStore, key_refs},
    obs::{self, ObsEvent},
};
use log::{debug, warn};
use std::fmt;
use zeroize::{Zeroize, Zeroizing};

const KEY_BUFFER_SIZE: usize = if NETWORK_KEY_SIZE > PSKC_SIZE {
    NETWORK_KEY_SIZE
} else {
    PSKC_SIZE
};

///
/// KeyMaterialPolicy
///
/// How the sensitive dataset fields are held at rest.
///
/// Secure-store failures inside `store_keys` and `emplace_keys` are not
/// recoverable here: they mean the key store and the persisted blob no
/// longer agree. Implementations panic instead of returning, and callers
/// must not retry.
///

pub trait KeyMaterialPolicy {
    /// True when sensitive fields live in a key store.
    fn uses_key_references(&self) -> bool;

    /// Best-effort removal of the slot's stored keys. Never fails.
    fn destroy_keys(&mut self, kind: DatasetKind);

    /// Move present sensitive fields out of `dataset`, leaving zeroed
    /// placeholders of the same length.
    fn store_keys(&mut self, kind: DatasetKind, dataset: &mut Dataset);

    /// Fill the placeholders of present sensitive fields back in.
    fn emplace_keys(&self, kind: DatasetKind, dataset: &mut Dataset);
}

impl<P: KeyMaterialPolicy + ?Sized> KeyMaterialPolicy for Box<P> {
    fn uses_key_references(&self) -> bool {
        (**self).uses_key_references()
    }

    fn destroy_keys(&mut self, kind: DatasetKind) {
        (**self).destroy_keys(kind);
    }

    fn store_keys(&mut self, kind: DatasetKind, dataset: &mut Dataset) {
        (**self).store_keys(kind, dataset);
    }

    fn emplace_keys(&self, kind: DatasetKind, dataset: &mut Dataset) {
        (**self).emplace_keys(kind, dataset);
    }
}

///
/// InlineKeys
/// Sensitive fields stay in the persisted blob.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct InlineKeys;

impl KeyMaterialPolicy for InlineKeys {
    fn uses_key_references(&self) -> bool {
        false
    }

    fn destroy_keys(&mut self, _kind: DatasetKind) {}

    fn store_keys(&mut self, _kind: DatasetKind, _dataset: &mut Dataset) {}

    fn emplace_keys(&self, _kind: DatasetKind, _dataset: &mut Dataset) {}
}

///
/// ReferencedKeys
///
/// Sensitive fields are held in `K` under the slot's fixed references.
///

#[derive(Clone, Debug, Default)]
pub struct ReferencedKeys<K> {
    store: K,
}

impl<K: KeyStore> ReferencedKeys<K> {
    pub const fn new(store: K) -> Self {
        Self { store }
    }

    #[must_use]
    pub const fn store(&self) -> &K {
        &self.store
    }
}

impl<K: KeyStore> KeyMaterialPolicy for ReferencedKeys<K> {
    fn uses_key_references(&self) -> bool {
        true
    }

    fn destroy_keys(&mut self, kind: DatasetKind) {
        for (_, key_ref) in key_refs(kind).fields() {
            match self.store.destroy_key(key_ref) {
                Ok(()) => obs::record(ObsEvent::KeyDestroyed { kind }),
                Err(err) if err.is_not_found() => {}
                Err(err) => {
                    warn!("{kind} dataset: ignoring destroy failure for {key_ref}: {err}");
                    obs::record(ObsEvent::FaultIgnored { kind });
                }
            }
        }
    }

    fn store_keys(&mut self, kind: DatasetKind, dataset: &mut Dataset) {
        for (tlv_type, key_ref) in key_refs(kind).fields() {
            let Some(tlv) = dataset.tlv_mut(tlv_type) else {
                continue;
            };

            if let Err(err) = self
                .store
                .import_key(key_ref, KeyAttributes::DATASET_KEY, tlv.value())
            {
                // the pair is all or nothing
                self.destroy_keys(kind);
                key_store_invariant(key_ref, &err);
            }

            tlv.value_mut().zeroize();
            obs::record(ObsEvent::KeyImported { kind });
            debug!("{kind} dataset: {tlv_type} moved to {key_ref}");
        }
    }

    fn emplace_keys(&self, kind: DatasetKind, dataset: &mut Dataset) {
        for (tlv_type, key_ref) in key_refs(kind).fields() {
            let Some(tlv) = dataset.tlv_mut(tlv_type) else {
                continue;
            };

            let mut key = Zeroizing::new([0u8; KEY_BUFFER_SIZE]);
            let len = self
                .store
                .export_key(key_ref, &mut key[..])
                .unwrap_or_else(|err| key_store_invariant(key_ref, &err));

            let field_len = tlv.value().len();
            if len != field_len {
                key_store_invariant(
                    key_ref,
                    &format_args!("exported {len} bytes for a {field_len}-byte field"),
                );
            }

            tlv.value_mut().copy_from_slice(&key[..len]);
            obs::record(ObsEvent::KeyExported { kind });
            debug!("{kind} dataset: {tlv_type} restored from {key_ref}");
        }
    }
}

// Key store and persisted blob disagree; there is no state to return to.
fn key_store_invariant(key_ref: KeyRef, cause: &dyn fmt::Display) -> ! {
    panic!("secure key store invariant violated for {key_ref}: {cause}");
}
