//! Module: keys
//! Responsibility: fixed key references and the secure key store boundary.
//! Does not own: deciding when keys move in or out of a dataset (see `secure`).
//! Boundary: secure -> keys (one-way).

mod memory;

pub use memory::MemoryKeyStore;

use crate::{dataset::DatasetKind, error::Error, tlv::TlvType};
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// CONSTANTS
///

/// First reference id reserved for dataset key material.
pub const DATASET_KEY_REF_BASE: u32 = 0x2_0000;

///
/// KeyRef
///
/// Closed set of references used for dataset key material. Never derived
/// from dataset content.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum KeyRef {
    ActiveNetworkKey,
    ActivePskc,
    PendingNetworkKey,
    PendingPskc,
}

impl KeyRef {
    pub const ALL: [Self; 4] = [
        Self::ActiveNetworkKey,
        Self::ActivePskc,
        Self::PendingNetworkKey,
        Self::PendingPskc,
    ];

    /// Numeric id as seen by the key store.
    #[must_use]
    pub const fn id(self) -> u32 {
        DATASET_KEY_REF_BASE
            + match self {
                Self::ActiveNetworkKey => 1,
                Self::ActivePskc => 2,
                Self::PendingNetworkKey => 3,
                Self::PendingPskc => 4,
            }
    }
}

impl fmt::Display for KeyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}({:#x})", self.id())
    }
}

///
/// KeyRefPair
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct KeyRefPair {
    pub network_key: KeyRef,
    pub pskc: KeyRef,
}

impl KeyRefPair {
    /// Sensitive TLV and its reference, network key first.
    #[must_use]
    pub const fn fields(self) -> [(TlvType, KeyRef); 2] {
        [
            (TlvType::NetworkKey, self.network_key),
            (TlvType::Pskc, self.pskc),
        ]
    }
}

/// Reference pair for a slot.
#[must_use]
pub const fn key_refs(kind: DatasetKind) -> KeyRefPair {
    match kind {
        DatasetKind::Active => KeyRefPair {
            network_key: KeyRef::ActiveNetworkKey,
            pskc: KeyRef::ActivePskc,
        },
        DatasetKind::Pending => KeyRefPair {
            network_key: KeyRef::PendingNetworkKey,
            pskc: KeyRef::PendingPskc,
        },
    }
}

///
/// KeyAttributes
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KeyType {
    Raw,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KeyAlgorithm {
    Vendor,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KeyUsage {
    Export,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KeyPersistence {
    Persistent,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct KeyAttributes {
    pub key_type: KeyType,
    pub algorithm: KeyAlgorithm,
    pub usage: KeyUsage,
    pub persistence: KeyPersistence,
}

impl KeyAttributes {
    /// Attributes every dataset key is imported with.
    pub const DATASET_KEY: Self = Self {
        key_type: KeyType::Raw,
        algorithm: KeyAlgorithm::Vendor,
        usage: KeyUsage::Export,
        persistence: KeyPersistence::Persistent,
    };
}

///
/// KeyStore
///
/// Opaque-reference key storage. Implementations report failures through
/// `Result`; escalation is the caller's decision.
///

pub trait KeyStore {
    fn import_key(
        &mut self,
        key_ref: KeyRef,
        attributes: KeyAttributes,
        key: &[u8],
    ) -> Result<(), Error>;

    /// Copy the key into `out` and return its length.
    fn export_key(&self, key_ref: KeyRef, out: &mut [u8]) -> Result<usize, Error>;

    /// Destroy the key. Destroying an absent key succeeds.
    fn destroy_key(&mut self, key_ref: KeyRef) -> Result<(), Error>;
}

impl<K: KeyStore + ?Sized> KeyStore for Box<K> {
    fn import_key(
        &mut self,
        key_ref: KeyRef,
        attributes: KeyAttributes,
        key: &[u8],
    ) -> Result<(), Error> {
        (**self).import_key(key_ref, attributes, key)
    }

    fn export_key(&self, key_ref: KeyRef, out: &mut [u8]) -> Result<usize, Error> {
        (**self).export_key(key_ref, out)
    }

    fn destroy_key(&mut self, key_ref: KeyRef) -> Result<(), Error> {
        (**self).destroy_key(key_ref)
    }
}

///
/// TESTS
///
