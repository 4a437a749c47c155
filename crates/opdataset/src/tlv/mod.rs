//! Module: tlv
//! Responsibility: MeshCoP TLV type catalogue and byte framing.
//! Does not own: dataset semantics (timestamps, delay timer, key routing).
//! Boundary: dataset -> tlv (one-way).

#[cfg(test)]
mod tests;

use std::fmt;
use thiserror::Error as ThisError;

///
/// CONSTANTS
///

/// Largest encoded dataset accepted anywhere in the crate.
pub const MAX_DATASET_SIZE: usize = 254;

/// Type byte plus length byte.
pub const TLV_HEADER_SIZE: usize = 2;

///
/// TlvError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum TlvError {
    #[error("tlv truncated at offset {offset}")]
    Truncated { offset: usize },

    #[error("duplicate tlv type {code}")]
    Duplicate { code: u8 },

    #[error("dataset too large: {size} bytes (limit {MAX_DATASET_SIZE})")]
    TooLarge { size: usize },

    #[error("tlv type {code} has invalid length {len}")]
    InvalidLength { code: u8, len: usize },

    #[error("tlv type {code} has invalid value: {reason}")]
    InvalidValue { code: u8, reason: &'static str },
}

///
/// TlvType
///
/// MeshCoP dataset TLV type codes understood by this crate.
/// Any other code is carried through untouched.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u8)]
pub enum TlvType {
    Channel = 0,
    PanId = 1,
    ExtendedPanId = 2,
    NetworkName = 3,
    Pskc = 4,
    NetworkKey = 5,
    MeshLocalPrefix = 7,
    SecurityPolicy = 12,
    ActiveTimestamp = 14,
    PendingTimestamp = 51,
    DelayTimer = 52,
    ChannelMask = 53,
}

impl TlvType {
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        let ty = match code {
            0 => Self::Channel,
            1 => Self::PanId,
            2 => Self::ExtendedPanId,
            3 => Self::NetworkName,
            4 => Self::Pskc,
            5 => Self::NetworkKey,
            7 => Self::MeshLocalPrefix,
            12 => Self::SecurityPolicy,
            14 => Self::ActiveTimestamp,
            51 => Self::PendingTimestamp,
            52 => Self::DelayTimer,
            53 => Self::ChannelMask,
            _ => return None,
        };

        Some(ty)
    }

    /// Exact value length for fixed-size types.
    #[must_use]
    pub const fn fixed_len(self) -> Option<usize> {
        match self {
            Self::Channel => Some(3),
            Self::PanId => Some(2),
            Self::ExtendedPanId | Self::MeshLocalPrefix => Some(8),
            Self::Pskc | Self::NetworkKey => Some(16),
            Self::ActiveTimestamp | Self::PendingTimestamp => Some(8),
            Self::DelayTimer => Some(4),
            Self::NetworkName | Self::SecurityPolicy | Self::ChannelMask => None,
        }
    }

    /// Reject a value whose length can never be valid for this type.
    pub fn check_len(self, len: usize) -> Result<(), TlvError> {
        let ok = match self {
            Self::NetworkName => (1..=16).contains(&len),
            Self::SecurityPolicy => (3..=4).contains(&len),
            Self::ChannelMask => len >= TLV_HEADER_SIZE,
            fixed => fixed.fixed_len() == Some(len),
        };

        if ok {
            Ok(())
        } else {
            Err(TlvError::InvalidLength {
                code: self.code(),
                len,
            })
        }
    }
}

impl fmt::Display for TlvType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Channel => "Channel",
            Self::PanId => "PanId",
            Self::ExtendedPanId => "ExtendedPanId",
            Self::NetworkName => "NetworkName",
            Self::Pskc => "Pskc",
            Self::NetworkKey => "NetworkKey",
            Self::MeshLocalPrefix => "MeshLocalPrefix",
            Self::SecurityPolicy => "SecurityPolicy",
            Self::ActiveTimestamp => "ActiveTimestamp",
            Self::PendingTimestamp => "PendingTimestamp",
            Self::DelayTimer => "DelayTimer",
            Self::ChannelMask => "ChannelMask",
        };
        write!(f, "{label}")
    }
}

///
/// Tlv
///
/// One type-length-value entry. The type is kept as a raw code so unknown
/// entries survive a decode/encode cycle.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tlv {
    code: u8,
    value: Vec<u8>,
}

impl Tlv {
    pub(crate) fn new(code: u8, value: impl Into<Vec<u8>>) -> Self {
        Self {
            code,
            value: value.into(),
        }
    }

    #[must_use]
    pub const fn code(&self) -> u8 {
        self.code
    }

    #[must_use]
    pub const fn tlv_type(&self) -> Option<TlvType> {
        TlvType::from_code(self.code)
    }

    #[must_use]
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Mutable access to the value bytes. The length cannot change through
    /// this view.
    pub fn value_mut(&mut self) -> &mut [u8] {
        &mut self.value
    }

    pub(crate) fn set_value(&mut self, value: &[u8]) {
        self.value.clear();
        self.value.extend_from_slice(value);
    }

    #[must_use]
    pub fn encoded_len(&self) -> usize {
        TLV_HEADER_SIZE + self.value.len()
    }
}

/// Encode entries back to back: one type byte, one length byte, the value.
// entries are only built by `Dataset::set_tlv` and `decode_tlvs`, both
// bounded by MAX_DATASET_SIZE, which fits the length byte
#[expect(clippy::cast_possible_truncation)]
#[must_use]
pub fn encode_tlvs(tlvs: &[Tlv]) -> Vec<u8> {
    let mut out = Vec::with_capacity(tlvs.iter().map(Tlv::encoded_len).sum());
    for tlv in tlvs {
        out.push(tlv.code);
        out.push(tlv.value.len() as u8);
        out.extend_from_slice(&tlv.value);
    }

    out
}

/// Decode a TLV sequence, rejecting truncated framing, duplicate types and
/// oversize input. Known types must carry a plausible length.
pub fn decode_tlvs(bytes: &[u8]) -> Result<Vec<Tlv>, TlvError> {
    if bytes.len() > MAX_DATASET_SIZE {
        return Err(TlvError::TooLarge { size: bytes.len() });
    }

    let mut tlvs: Vec<Tlv> = Vec::new();
    let mut offset = 0;

    while offset < bytes.len() {
        let Some(&[code, len]) = bytes.get(offset..offset + TLV_HEADER_SIZE) else {
            return Err(TlvError::Truncated { offset });
        };
        let start = offset + TLV_HEADER_SIZE;
        let end = start + usize::from(len);
        let Some(value) = bytes.get(start..end) else {
            return Err(TlvError::Truncated { offset });
        };

        if tlvs.iter().any(|tlv| tlv.code == code) {
            return Err(TlvError::Duplicate { code });
        }
        if let Some(ty) = TlvType::from_code(code) {
            ty.check_len(value.len())?;
        }

        tlvs.push(Tlv::new(code, value));
        offset = end;
    }

    Ok(tlvs)
}
