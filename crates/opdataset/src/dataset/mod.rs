//! Module: dataset
//! Responsibility: the in-memory operational dataset and its typed views.
//! Does not own: persistence, key routing, or delay-timer aging.
//! Boundary: local/settings/secure -> dataset -> tlv.

mod info;
mod timestamp;
mod tlvs;

#[cfg(test)]
mod tests;

pub use info::{DatasetInfo, SecurityPolicy};
pub use timestamp::Timestamp;
pub use tlvs::DatasetTlvs;

use crate::{
    time::TimeMilli,
    tlv::{MAX_DATASET_SIZE, Tlv, TlvError, TlvType, decode_tlvs, encode_tlvs},
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Network key length in bytes.
pub const NETWORK_KEY_SIZE: usize = 16;

/// PSKc length in bytes.
pub const PSKC_SIZE: usize = 16;

///
/// DatasetKind
///
/// The two persistence slots. Fixed per store for the process lifetime.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum DatasetKind {
    Active,
    Pending,
}

impl DatasetKind {
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    /// Timestamp TLV carrying this slot's version.
    #[must_use]
    pub const fn timestamp_tlv(self) -> TlvType {
        match self {
            Self::Active => TlvType::ActiveTimestamp,
            Self::Pending => TlvType::PendingTimestamp,
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Active => "Active",
            Self::Pending => "Pending",
        };
        write!(f, "{label}")
    }
}

///
/// Dataset
///
/// Ordered TLV entries, unique by type. An empty dataset means "no
/// dataset". `update_time` is in-memory only and never encoded.
///

#[derive(Clone, Debug, Default)]
pub struct Dataset {
    tlvs: Vec<Tlv>,
    update_time: TimeMilli,
}

impl Dataset {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tlvs: Vec::new(),
            update_time: TimeMilli::ZERO,
        }
    }

    /// Decode a dataset from raw TLV bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TlvError> {
        Ok(Self {
            tlvs: decode_tlvs(bytes)?,
            update_time: TimeMilli::ZERO,
        })
    }

    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        encode_tlvs(&self.tlvs)
    }

    /// Copy `source` for persisting under `kind`. An Active copy never
    /// carries the pending-only entries.
    #[must_use]
    pub fn copy_for(kind: DatasetKind, source: &Self) -> Self {
        let mut copy = source.clone();
        if kind.is_active() {
            copy.remove_pending_fields();
        }

        copy
    }

    /// Encoded size in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.tlvs.iter().map(Tlv::encoded_len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tlvs.is_empty()
    }

    /// Drop every entry, leaving a zero-size dataset.
    pub fn clear(&mut self) {
        self.tlvs.clear();
    }

    #[must_use]
    pub fn tlvs(&self) -> &[Tlv] {
        &self.tlvs
    }

    #[must_use]
    pub fn tlv(&self, tlv_type: TlvType) -> Option<&Tlv> {
        self.tlvs.iter().find(|tlv| tlv.code() == tlv_type.code())
    }

    pub fn tlv_mut(&mut self, tlv_type: TlvType) -> Option<&mut Tlv> {
        self.tlvs
            .iter_mut()
            .find(|tlv| tlv.code() == tlv_type.code())
    }

    #[must_use]
    pub fn contains(&self, tlv_type: TlvType) -> bool {
        self.tlv(tlv_type).is_some()
    }

    /// Insert or replace the entry of `tlv_type`.
    pub fn set_tlv(&mut self, tlv_type: TlvType, value: &[u8]) -> Result<(), TlvError> {
        tlv_type.check_len(value.len())?;

        let current = self.tlv(tlv_type).map_or(0, Tlv::encoded_len);
        let size = self.size() - current + Tlv::new(tlv_type.code(), value).encoded_len();
        if size > MAX_DATASET_SIZE {
            return Err(TlvError::TooLarge { size });
        }

        match self.tlv_mut(tlv_type) {
            Some(tlv) => tlv.set_value(value),
            None => self.tlvs.push(Tlv::new(tlv_type.code(), value)),
        }

        Ok(())
    }

    pub fn remove_tlv(&mut self, tlv_type: TlvType) {
        self.tlvs.retain(|tlv| tlv.code() != tlv_type.code());
    }

    /// Strip the entries that only mean something for a pending dataset.
    pub fn remove_pending_fields(&mut self) {
        self.remove_tlv(TlvType::PendingTimestamp);
        self.remove_tlv(TlvType::DelayTimer);
    }

    /// Timestamp of the variant matching `kind`, if present and well formed.
    #[must_use]
    pub fn timestamp(&self, kind: DatasetKind) -> Option<Timestamp> {
        let tlv_type = kind.timestamp_tlv();
        let tlv = self.tlv(tlv_type)?;

        Timestamp::from_bytes(tlv.value(), tlv_type).ok()
    }

    pub fn set_timestamp(
        &mut self,
        kind: DatasetKind,
        timestamp: &Timestamp,
    ) -> Result<(), TlvError> {
        self.set_tlv(kind.timestamp_tlv(), &timestamp.to_bytes())
    }

    /// Delay timer in milliseconds, if present.
    #[must_use]
    pub fn delay_timer(&self) -> Option<u32> {
        let value = self.tlv(TlvType::DelayTimer)?.value();
        let raw = <[u8; 4]>::try_from(value).ok()?;

        Some(u32::from_be_bytes(raw))
    }

    pub fn set_delay_timer(&mut self, delay_ms: u32) -> Result<(), TlvError> {
        self.set_tlv(TlvType::DelayTimer, &delay_ms.to_be_bytes())
    }

    /// Observation time stamped by the last read that produced this copy.
    #[must_use]
    pub const fn update_time(&self) -> TimeMilli {
        self.update_time
    }

    pub(crate) const fn set_update_time(&mut self, now: TimeMilli) {
        self.update_time = now;
    }

    /// Entry-wise equality, ignoring `update_time`.
    #[must_use]
    pub fn same_tlvs(&self, other: &Self) -> bool {
        self.tlvs == other.tlvs
    }
}
