use crate::{dataset::DatasetKind, keys::KeyRef, tlv::TlvError};
use std::fmt;
use thiserror::Error as ThisError;

///
/// Error
///
/// Structured runtime error with a stable classification.
/// Every fallible operation in this crate returns this type.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct Error {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,

    /// Optional structured error detail.
    /// The variant (if present) must correspond to `origin`.
    pub detail: Option<ErrorDetail>,
}

impl Error {
    /// Construct an Error without structured detail.
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
            detail: None,
        }
    }

    /// Construct the canonical "slot holds no dataset" error.
    #[must_use]
    pub fn settings_not_found(kind: DatasetKind) -> Self {
        Self {
            class: ErrorClass::NotFound,
            origin: ErrorOrigin::Settings,
            message: format!("{kind} dataset not found"),
            detail: Some(ErrorDetail::Settings(SettingsError::NotFound { kind })),
        }
    }

    /// Construct a settings-origin storage fault.
    pub fn settings_fault(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Storage, ErrorOrigin::Settings, message)
    }

    /// Construct a settings-origin corruption fault for a stored blob that
    /// no longer decodes.
    #[must_use]
    pub fn settings_corrupt(kind: DatasetKind, source: &TlvError) -> Self {
        let message = format!("{kind} dataset blob corrupt: {source}");

        Self {
            class: ErrorClass::Storage,
            origin: ErrorOrigin::Settings,
            message: message.clone(),
            detail: Some(ErrorDetail::Settings(SettingsError::Corrupt { message })),
        }
    }

    /// Construct a key-store fault.
    pub fn key_store_fault(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::SecureStore, ErrorOrigin::KeyStore, message)
    }

    /// Construct the key-store error for a reference that holds no key.
    #[must_use]
    pub fn key_not_found(key_ref: KeyRef) -> Self {
        Self::new(
            ErrorClass::NotFound,
            ErrorOrigin::KeyStore,
            format!("key reference {key_ref} not found"),
        )
    }

    /// Construct a conversion fault for a specific origin.
    pub fn conversion(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Conversion, origin, message)
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.class, ErrorClass::NotFound)
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

impl From<TlvError> for Error {
    fn from(err: TlvError) -> Self {
        Self {
            class: ErrorClass::Conversion,
            origin: ErrorOrigin::Tlv,
            message: err.to_string(),
            detail: Some(ErrorDetail::Tlv(err)),
        }
    }
}

///
/// ErrorDetail
///
/// Structured, origin-specific error detail carried by [`Error`].
///

#[derive(Debug, ThisError)]
pub enum ErrorDetail {
    #[error("{0}")]
    Settings(SettingsError),
    #[error("{0}")]
    Tlv(TlvError),
}

///
/// SettingsError
///
/// Settings-specific structured error detail.
/// Never returned directly; always wrapped in [`ErrorDetail::Settings`].
///

#[derive(Debug, ThisError)]
pub enum SettingsError {
    #[error("{kind} dataset not found")]
    NotFound { kind: DatasetKind },

    #[error("settings corruption: {message}")]
    Corrupt { message: String },
}

///
/// ErrorClass
///
/// NotFound    - the slot or key reference holds nothing
/// Storage     - durable settings read/write failure
/// SecureStore - key import/export failure
/// Conversion  - TLV framing or structured-view conversion failure
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    NotFound,
    Storage,
    SecureStore,
    Conversion,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NotFound => "not_found",
            Self::Storage => "storage",
            Self::SecureStore => "secure_store",
            Self::Conversion => "conversion",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Settings,
    KeyStore,
    Tlv,
    Config,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Settings => "settings",
            Self::KeyStore => "key_store",
            Self::Tlv => "tlv",
            Self::Config => "config",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_carries_settings_detail() {
        let err = Error::settings_not_found(DatasetKind::Pending);

        assert!(err.is_not_found());
        assert_eq!(err.origin, ErrorOrigin::Settings);
        assert!(matches!(
            err.detail,
            Some(ErrorDetail::Settings(SettingsError::NotFound {
                kind: DatasetKind::Pending
            }))
        ));
        assert_eq!(
            err.display_with_class(),
            "settings:not_found: Pending dataset not found"
        );
    }

    #[test]
    fn tlv_errors_classify_as_conversion() {
        let err = Error::from(TlvError::Truncated { offset: 3 });

        assert_eq!(err.class, ErrorClass::Conversion);
        assert_eq!(err.origin, ErrorOrigin::Tlv);
        assert!(!err.is_not_found());
    }

    #[test]
    fn key_not_found_is_not_found() {
        let err = Error::key_not_found(KeyRef::ActivePskc);

        assert!(err.is_not_found());
        assert_eq!(err.origin, ErrorOrigin::KeyStore);
    }
}
