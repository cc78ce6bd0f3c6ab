//! Allowlist entry model
//!
//! Entries are parsed once into a tagged variant and dispatched by `match`
//! during evaluation, instead of re-inspecting the raw string at every
//! comparison site.

use std::fmt;
use std::str::FromStr;

use crate::diag::{DiagnosticSink, NullSink};
use crate::error::Error;

/// Largest prefix length any address family supports
const MAX_PREFIX_BITS: u16 = 128;

/// One parsed allowlist entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowlistEntry {
    /// Literal address, matched by exact string equality
    Exact(String),
    /// CIDR subnet, matched on the leading prefix bits
    Subnet(SubnetPattern),
}

impl FromStr for AllowlistEntry {
    type Err = Error;

    /// Classify a trimmed token on the presence of `/`
    ///
    /// Tokens without a slash are always valid exact entries (the
    /// comparison is syntactic, so no address validation applies here).
    /// Tokens with a slash must carry a base-10 prefix no larger than 128;
    /// the family-specific bound is enforced at match time, once the base
    /// address has resolved.
    fn from_str(s: &str) -> Result<Self, Error> {
        let s = s.trim();
        match s.split_once('/') {
            None => Ok(Self::Exact(s.to_string())),
            Some((base, prefix_text)) => {
                let prefix: u16 = prefix_text
                    .parse()
                    .map_err(|_| Error::InvalidPrefix { prefix: prefix_text.to_string() })?;
                if prefix > MAX_PREFIX_BITS {
                    return Err(Error::PrefixOutOfRange {
                        prefix,
                        max: MAX_PREFIX_BITS,
                    });
                }
                Ok(Self::Subnet(SubnetPattern {
                    base: base.to_string(),
                    prefix,
                }))
            }
        }
    }
}

impl fmt::Display for AllowlistEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(addr) => f.write_str(addr),
            Self::Subnet(pattern) => pattern.fmt(f),
        }
    }
}

/// A `<address>/<prefix-length>` subnet pattern
///
/// The base is kept as written; it resolves to its byte form during
/// matching, through whichever resolver the matcher carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubnetPattern {
    base: String,
    prefix: u16,
}

impl SubnetPattern {
    /// Base address (or hostname) as written in the entry
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Prefix length in bits
    pub fn prefix(&self) -> u16 {
        self.prefix
    }
}

impl fmt::Display for SubnetPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.prefix)
    }
}

/// Ordered sequence of parsed allowlist entries
///
/// Rebuilt from the configuration string on every match call, so there is
/// no cached state to invalidate when the configuration changes.
#[derive(Debug, Clone, Default)]
pub struct Allowlist {
    entries: Vec<AllowlistEntry>,
}

impl Allowlist {
    /// Parse a comma-separated allowlist, silently dropping malformed entries
    pub fn parse(spec: &str) -> Self {
        Self::parse_with(spec, &NullSink)
    }

    /// Parse a comma-separated allowlist, reporting malformed entries to `sink`
    ///
    /// Tokens are trimmed; empty tokens are skipped. A malformed token is
    /// reported and dropped without affecting the remaining entries.
    pub fn parse_with(spec: &str, sink: &dyn DiagnosticSink) -> Self {
        let mut entries = Vec::new();
        for token in spec.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            match token.parse::<AllowlistEntry>() {
                Ok(entry) => entries.push(entry),
                Err(err) => sink.malformed_entry(token, &err),
            }
        }
        Self { entries }
    }

    /// Parsed entries, in configuration order
    pub fn entries(&self) -> &[AllowlistEntry] {
        &self.entries
    }

    /// Number of parsed entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the allowlist holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Allowlist {
    type Item = &'a AllowlistEntry;
    type IntoIter = std::slice::Iter<'a, AllowlistEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
