//! Error types for ipgate-core
//!
//! Centralized error handling using `thiserror` for ergonomic error definitions.
//!
//! None of these errors ever reach the caller of the matching API: a failing
//! allowlist entry is reported to the configured diagnostic sink and skipped,
//! and evaluation continues with the next entry.

use thiserror::Error;

/// Main error type for ipgate-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Subnet specification is unusable (e.g. missing the `/` separator)
    #[error("Malformed subnet '{spec}': {message}")]
    MalformedSubnet {
        /// The offending specification as written
        spec: String,
        /// What made it unusable
        message: String,
    },

    /// Prefix length is not a base-10 non-negative integer
    #[error("Invalid prefix length '{prefix}': not a base-10 integer")]
    InvalidPrefix {
        /// The prefix text that failed to parse
        prefix: String,
    },

    /// Prefix length exceeds the address family's bit width
    #[error("Prefix length {prefix} out of range: maximum is {max}")]
    PrefixOutOfRange {
        /// The rejected prefix length
        prefix: u16,
        /// Maximum prefix length for the address family
        max: u16,
    },

    /// Address or hostname could not be resolved
    #[error("Unresolvable address: {host}")]
    Unresolvable {
        /// The address or hostname that failed to resolve
        host: String,
    },
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a malformed subnet error
    pub fn malformed_subnet(spec: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedSubnet {
            spec: spec.into(),
            message: message.into(),
        }
    }

    /// Create an unresolvable address error
    pub fn unresolvable(host: impl Into<String>) -> Self {
        Self::Unresolvable { host: host.into() }
    }
}
