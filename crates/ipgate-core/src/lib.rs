//! # ipgate Core
//!
//! Platform-independent IP allowlist matching for authentication gateways.
//!
//! ## Architecture
//!
//! This crate provides:
//! - **Allowlist model** - Comma-separated entries parsed into exact
//!   addresses and CIDR subnets
//! - **Address matching** - Byte-level prefix comparison for IPv4 and IPv6
//! - **Address resolution** - Injectable resolver, from pure literal
//!   parsing up to platform host lookup
//! - **Diagnostics** - Injectable sink for malformed entries, so a bad
//!   configuration entry is skipped and reported, never fatal
//!
//! ## Example
//!
//! ```rust
//! use ipgate_core::AddressMatcher;
//!
//! let matcher = AddressMatcher::new();
//!
//! // Exact entries and CIDR subnets, comma separated
//! assert!(matcher.is_allowed("10.1.2.3", "10.0.0.0/8, 192.168.1.1"));
//! assert!(matcher.is_allowed("192.168.1.1", "10.0.0.0/8, 192.168.1.1"));
//! assert!(!matcher.is_allowed("172.16.0.1", "10.0.0.0/8, 192.168.1.1"));
//!
//! // A malformed entry never matches and never aborts the scan
//! assert!(matcher.is_allowed("10.0.0.5", "not-a-cidr/xx, 10.0.0.0/8"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod allowlist;
pub mod diag;
pub mod error;
pub mod resolve;

// Re-exports for convenience
pub use allowlist::{is_allowed, AddressMatcher, Allowlist, AllowlistEntry, SubnetPattern};
pub use diag::{DiagnosticSink, NullSink, RecordingSink, TracingSink};
pub use error::{Error, Result};
pub use resolve::{AddressResolver, LiteralResolver, RawAddress, SystemResolver};
