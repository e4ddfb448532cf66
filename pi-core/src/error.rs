use thiserror::Error;

/// Possible errors when turning user input into API objects
///
/// Every variant carries the offending field or value so the caller can
/// report it without re-deriving context.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
// Redundant with the error messages and machine names
#[allow(missing_docs)]
pub enum Error {
    #[error("invalid port spec {spec:?}: {reason}")]
    InvalidPortSpec { spec: String, reason: String },

    #[error("invalid value for {field}: {message}")]
    Validation { field: String, message: String },

    #[error("invalid IP address {value:?} for {field}")]
    InvalidIp { field: String, value: String },

    #[error("invalid node port {port}: {reason}")]
    InvalidNodePort { port: i64, reason: String },

    #[error("invalid selector {entry:?}: expected key=value")]
    InvalidSelector { entry: String },

    #[error("duplicate selector key {key:?}")]
    DuplicateSelectorKey { key: String },

    #[error("invalid DNS name {value:?}: {reason}")]
    InvalidDnsName { value: String, reason: String },

    #[error("Generator {name} not supported")]
    UnsupportedGenerator { name: String },

    #[error("invalid {field} entry {entry:?}: expected key=value")]
    InvalidKeyValue { field: String, entry: String },

    #[error("duplicate key {key:?} in {field}")]
    DuplicateKey { field: String, key: String },
}

impl Error {
    pub(crate) fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Whether the error stems from how the command was invoked rather than from the values given
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::UnsupportedGenerator { .. })
    }
}
