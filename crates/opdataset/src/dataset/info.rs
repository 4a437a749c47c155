use crate::{
    dataset::{Dataset, NETWORK_KEY_SIZE, PSKC_SIZE, Timestamp},
    tlv::{Tlv, TlvError, TlvType},
};
use serde::{Deserialize, Serialize};

///
/// SecurityPolicy
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct SecurityPolicy {
    /// Key rotation period in hours.
    pub rotation_time: u16,
    /// One or two flag bytes, as carried on the wire.
    pub flags: Vec<u8>,
}

///
/// DatasetInfo
///
/// Structured view of a dataset: one optional component per catalogued
/// TLV. Unknown TLVs have no place here and are dropped by the conversion.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct DatasetInfo {
    pub active_timestamp: Option<Timestamp>,
    pub pending_timestamp: Option<Timestamp>,
    pub network_key: Option<[u8; NETWORK_KEY_SIZE]>,
    pub network_name: Option<String>,
    pub extended_pan_id: Option<[u8; 8]>,
    pub mesh_local_prefix: Option<[u8; 8]>,
    pub delay: Option<u32>,
    pub pan_id: Option<u16>,
    pub channel: Option<u16>,
    pub pskc: Option<[u8; PSKC_SIZE]>,
    pub security_policy: Option<SecurityPolicy>,
    pub channel_mask: Option<u32>,
}

impl DatasetInfo {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl TryFrom<&Dataset> for DatasetInfo {
    type Error = TlvError;

    fn try_from(dataset: &Dataset) -> Result<Self, Self::Error> {
        let mut info = Self::default();

        for tlv in dataset.tlvs() {
            let Some(tlv_type) = tlv.tlv_type() else {
                continue;
            };
            tlv_type.check_len(tlv.value().len())?;
            let value = tlv.value();

            match tlv_type {
                TlvType::Channel => info.channel = Some(u16::from_be_bytes([value[1], value[2]])),
                TlvType::PanId => info.pan_id = Some(u16::from_be_bytes([value[0], value[1]])),
                TlvType::ExtendedPanId => info.extended_pan_id = Some(array(tlv)?),
                TlvType::NetworkName => {
                    let name = std::str::from_utf8(value).map_err(|_| TlvError::InvalidValue {
                        code: tlv.code(),
                        reason: "network name is not utf-8",
                    })?;
                    info.network_name = Some(name.to_string());
                }
                TlvType::Pskc => info.pskc = Some(array(tlv)?),
                TlvType::NetworkKey => info.network_key = Some(array(tlv)?),
                TlvType::MeshLocalPrefix => info.mesh_local_prefix = Some(array(tlv)?),
                TlvType::SecurityPolicy => {
                    info.security_policy = Some(SecurityPolicy {
                        rotation_time: u16::from_be_bytes([value[0], value[1]]),
                        flags: value[2..].to_vec(),
                    });
                }
                TlvType::ActiveTimestamp => {
                    info.active_timestamp = Some(Timestamp::from_bytes(value, tlv_type)?);
                }
                TlvType::PendingTimestamp => {
                    info.pending_timestamp = Some(Timestamp::from_bytes(value, tlv_type)?);
                }
                TlvType::DelayTimer => info.delay = Some(u32::from_be_bytes(array(tlv)?)),
                TlvType::ChannelMask => info.channel_mask = page0_channel_mask(tlv)?,
            }
        }

        Ok(info)
    }
}

impl TryFrom<&DatasetInfo> for Dataset {
    type Error = TlvError;

    fn try_from(info: &DatasetInfo) -> Result<Self, Self::Error> {
        let mut dataset = Self::new();

        if let Some(ts) = &info.active_timestamp {
            dataset.set_tlv(TlvType::ActiveTimestamp, &ts.to_bytes())?;
        }
        if let Some(ts) = &info.pending_timestamp {
            dataset.set_tlv(TlvType::PendingTimestamp, &ts.to_bytes())?;
        }
        if let Some(key) = &info.network_key {
            dataset.set_tlv(TlvType::NetworkKey, key)?;
        }
        if let Some(name) = &info.network_name {
            dataset.set_tlv(TlvType::NetworkName, name.as_bytes())?;
        }
        if let Some(xpanid) = &info.extended_pan_id {
            dataset.set_tlv(TlvType::ExtendedPanId, xpanid)?;
        }
        if let Some(prefix) = &info.mesh_local_prefix {
            dataset.set_tlv(TlvType::MeshLocalPrefix, prefix)?;
        }
        if let Some(delay) = info.delay {
            dataset.set_delay_timer(delay)?;
        }
        if let Some(pan_id) = info.pan_id {
            dataset.set_tlv(TlvType::PanId, &pan_id.to_be_bytes())?;
        }
        if let Some(channel) = info.channel {
            let [hi, lo] = channel.to_be_bytes();
            dataset.set_tlv(TlvType::Channel, &[0, hi, lo])?;
        }
        if let Some(pskc) = &info.pskc {
            dataset.set_tlv(TlvType::Pskc, pskc)?;
        }
        if let Some(policy) = &info.security_policy {
            let mut value = policy.rotation_time.to_be_bytes().to_vec();
            value.extend_from_slice(&policy.flags);
            dataset.set_tlv(TlvType::SecurityPolicy, &value)?;
        }
        if let Some(mask) = info.channel_mask {
            let mut value = vec![0, 4];
            value.extend_from_slice(&mask.to_be_bytes());
            dataset.set_tlv(TlvType::ChannelMask, &value)?;
        }

        Ok(dataset)
    }
}

// Copy a fixed-size value out of a TLV.
fn array<const N: usize>(tlv: &Tlv) -> Result<[u8; N], TlvError> {
    <[u8; N]>::try_from(tlv.value()).map_err(|_| TlvError::InvalidLength {
        code: tlv.code(),
        len: tlv.value().len(),
    })
}

// Walk channel-mask entries (page, mask length, mask) and pick page 0.
fn page0_channel_mask(tlv: &Tlv) -> Result<Option<u32>, TlvError> {
    let mut rest = tlv.value();
    let mut mask = None;

    while let [page, len, tail @ ..] = rest {
        let len = usize::from(*len);
        let Some((entry, next)) = tail.split_at_checked(len) else {
            return Err(TlvError::InvalidValue {
                code: tlv.code(),
                reason: "channel mask entry truncated",
            });
        };
        if *page == 0 && len == 4 {
            mask = Some(u32::from_be_bytes([entry[0], entry[1], entry[2], entry[3]]));
        }
        rest = next;
    }

    if rest.is_empty() {
        Ok(mask)
    } else {
        Err(TlvError::InvalidValue {
            code: tlv.code(),
            reason: "channel mask entry truncated",
        })
    }
}
