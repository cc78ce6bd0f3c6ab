//! IP allowlist parsing and matching
//!
//! An allowlist is a comma-separated string of entries. Each entry is either:
//! - A literal address ("192.168.1.1", "::1") matched by exact string
//!   equality; no normalization, so textually different spellings of the
//!   same address do not match
//! - A CIDR subnet ("10.0.0.0/8", "2001:db8::/32") matched on the top
//!   prefix-length bits of the resolved addresses
//!
//! Malformed entries never match and never abort the scan: they are
//! reported to the configured diagnostic sink and evaluation continues
//! with the next entry.

mod entry;
mod matcher;

pub use entry::{Allowlist, AllowlistEntry, SubnetPattern};
pub use matcher::{is_allowed, AddressMatcher};
