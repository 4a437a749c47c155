//! Operational dataset persistence for a Thread-style mesh node: the Active
//! and Pending dataset slots, their settings-backed storage, and optional
//! key-reference indirection for the network key and PSKc.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod config;
pub mod dataset;
pub mod error;
pub mod keys;
pub mod local;
pub mod obs;
pub mod secure;
pub mod settings;
pub mod time;
pub mod tlv;

///
/// Prelude
///
/// Prelude contains only domain vocabulary and the store boundaries.
/// No concrete stores, clocks, or metrics are re-exported here.
///

pub mod prelude {
    pub use crate::{
        dataset::{Dataset, DatasetInfo, DatasetKind, DatasetTlvs, Timestamp},
        keys::{KeyRef, KeyStore},
        local::DatasetLocal,
        secure::KeyMaterialPolicy,
        settings::SettingsStore,
        time::Clock,
        tlv::TlvType,
    };
}
