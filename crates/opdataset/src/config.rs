//! Runtime configuration for dataset persistence.

use crate::{
    error::{Error, ErrorOrigin},
    keys::KeyStore,
    secure::{InlineKeys, KeyMaterialPolicy, ReferencedKeys},
};
use serde::Deserialize;

///
/// DatasetConfig
///
/// `key_references` selects where the network key and PSKc are kept at
/// rest: `false` keeps them in the persisted blob, `true` moves them into a
/// key store.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DatasetConfig {
    pub key_references: bool,
}

impl DatasetConfig {
    /// Parse the `[dataset]` table of a TOML document. A missing table
    /// yields the defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, Error> {
        #[derive(Deserialize)]
        struct Document {
            #[serde(default)]
            dataset: DatasetConfig,
        }

        let doc: Document = toml::from_str(source).map_err(|err| {
            Error::conversion(ErrorOrigin::Config, format!("invalid dataset config: {err}"))
        })?;

        Ok(doc.dataset)
    }

    /// Build the key-material policy this configuration asks for. The key
    /// store is dropped when key references are disabled.
    pub fn policy<K>(self, key_store: K) -> Box<dyn KeyMaterialPolicy>
    where
        K: KeyStore + 'static,
    {
        if self.key_references {
            Box::new(ReferencedKeys::new(key_store))
        } else {
            Box::new(InlineKeys)
        }
    }
}

///
/// TESTS
///
