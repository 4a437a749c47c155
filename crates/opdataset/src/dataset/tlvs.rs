use crate::{
    dataset::Dataset,
    tlv::{MAX_DATASET_SIZE, TlvError},
};
use derive_more::Deref;

///
/// DatasetTlvs
///
/// Raw TLV bytes of a dataset, bounded by `MAX_DATASET_SIZE`.
/// Framing is only checked when converting into a `Dataset`.
///

#[derive(Clone, Debug, Default, Deref, Eq, PartialEq)]
pub struct DatasetTlvs(Vec<u8>);

impl DatasetTlvs {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, TlvError> {
        let bytes = bytes.into();
        if bytes.len() > MAX_DATASET_SIZE {
            return Err(TlvError::TooLarge { size: bytes.len() });
        }

        Ok(Self(bytes))
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl From<&Dataset> for DatasetTlvs {
    fn from(dataset: &Dataset) -> Self {
        Self(dataset.to_bytes())
    }
}

impl TryFrom<&DatasetTlvs> for Dataset {
    type Error = TlvError;

    fn try_from(tlvs: &DatasetTlvs) -> Result<Self, Self::Error> {
        Self::from_bytes(&tlvs.0)
    }
}
