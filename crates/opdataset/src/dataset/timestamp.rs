use crate::tlv::{TlvError, TlvType};
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// Timestamp
///
/// MeshCoP dataset timestamp: 48-bit seconds, 15-bit ticks and the
/// authoritative flag, in that order of significance.
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct Timestamp {
    seconds: u64,
    ticks: u16,
    authoritative: bool,
}

impl Timestamp {
    pub const SIZE: usize = 8;
    pub const MAX_SECONDS: u64 = (1 << 48) - 1;
    pub const MAX_TICKS: u16 = 0x7fff;

    /// Construct a timestamp; out-of-range fields are masked to their width.
    #[must_use]
    pub const fn new(seconds: u64, ticks: u16, authoritative: bool) -> Self {
        Self {
            seconds: seconds & Self::MAX_SECONDS,
            ticks: ticks & Self::MAX_TICKS,
            authoritative,
        }
    }

    #[must_use]
    pub const fn seconds(&self) -> u64 {
        self.seconds
    }

    #[must_use]
    pub const fn ticks(&self) -> u16 {
        self.ticks
    }

    #[must_use]
    pub const fn is_authoritative(&self) -> bool {
        self.authoritative
    }

    #[must_use]
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[..6].copy_from_slice(&self.seconds.to_be_bytes()[2..]);
        let low = (self.ticks << 1) | u16::from(self.authoritative);
        out[6..].copy_from_slice(&low.to_be_bytes());

        out
    }

    /// Decode the 8-byte value of an Active or Pending timestamp TLV.
    pub fn from_bytes(bytes: &[u8], tlv_type: TlvType) -> Result<Self, TlvError> {
        let Ok(raw) = <[u8; Self::SIZE]>::try_from(bytes) else {
            return Err(TlvError::InvalidLength {
                code: tlv_type.code(),
                len: bytes.len(),
            });
        };

        let mut seconds = [0u8; 8];
        seconds[2..].copy_from_slice(&raw[..6]);
        let low = u16::from_be_bytes([raw[6], raw[7]]);

        Ok(Self {
            seconds: u64::from_be_bytes(seconds),
            ticks: low >> 1,
            authoritative: low & 1 == 1,
        })
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.seconds, self.ticks)?;
        if self.authoritative {
            write!(f, "(a)")?;
        }

        Ok(())
    }
}

///
/// TESTS
///
