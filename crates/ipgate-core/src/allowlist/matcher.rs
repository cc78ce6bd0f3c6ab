//! Address matching against an allowlist
//!
//! The matcher evaluates a client address against a comma-separated
//! allowlist string. Exact entries compare syntactically; subnet entries
//! compare the top prefix-length bits of the resolved byte forms. Both
//! operations are total: any per-entry failure is reported to the
//! diagnostic sink and treated as "this entry does not match".

use once_cell::sync::Lazy;

use crate::allowlist::entry::{Allowlist, AllowlistEntry, SubnetPattern};
use crate::diag::{DiagnosticSink, TracingSink};
use crate::error::{Error, Result};
use crate::resolve::{AddressResolver, SystemResolver};

/// Matches client addresses against configured allowlists
///
/// The allowlist string is re-parsed on every call, so configuration
/// changes take effect immediately and no state persists between calls.
/// The matcher is safe to share across threads.
///
/// # Example
///
/// ```rust
/// use ipgate_core::AddressMatcher;
///
/// let matcher = AddressMatcher::new();
/// assert!(matcher.is_allowed("10.1.2.3", "10.0.0.0/8, 192.168.1.1"));
/// assert!(!matcher.is_allowed("172.16.0.1", "10.0.0.0/8, 192.168.1.1"));
/// ```
pub struct AddressMatcher {
    resolver: Box<dyn AddressResolver>,
    diagnostics: Box<dyn DiagnosticSink>,
}

impl Default for AddressMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressMatcher {
    /// Create a matcher with platform resolution and `tracing` diagnostics
    pub fn new() -> Self {
        Self {
            resolver: Box::new(SystemResolver),
            diagnostics: Box::new(TracingSink),
        }
    }

    /// Replace the address resolver
    ///
    /// Inject [`LiteralResolver`](crate::resolve::LiteralResolver) to keep
    /// matching free of hostname lookups.
    pub fn with_resolver(mut self, resolver: impl AddressResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    /// Replace the diagnostic sink
    pub fn with_diagnostics(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.diagnostics = Box::new(sink);
        self
    }

    /// Check whether `client_ip` is permitted by `allowed_ips`
    ///
    /// `allowed_ips` is a comma-separated list of literal addresses and
    /// CIDR subnets. Returns `true` on the first matching entry, `false`
    /// when nothing matches or the list is empty. Never fails: malformed
    /// entries are reported to the sink and skipped.
    pub fn is_allowed(&self, client_ip: &str, allowed_ips: &str) -> bool {
        let allowlist = Allowlist::parse_with(allowed_ips, self.diagnostics.as_ref());
        allowlist
            .entries()
            .iter()
            .any(|entry| self.entry_matches(client_ip, entry))
    }

    /// Check whether `client_ip` falls inside `subnet_spec`
    ///
    /// `subnet_spec` is `"<address>/<prefixLength>"`. A spec without a
    /// slash, with a non-integer or out-of-range prefix, or with an
    /// unresolvable address is reported as malformed and never matches.
    pub fn is_in_subnet(&self, client_ip: &str, subnet_spec: &str) -> bool {
        let trimmed = subnet_spec.trim();
        match trimmed.parse::<AllowlistEntry>() {
            Ok(AllowlistEntry::Subnet(pattern)) => self.subnet_matches(client_ip, &pattern),
            Ok(AllowlistEntry::Exact(_)) => {
                let err = Error::malformed_subnet(trimmed, "missing '/' separator");
                self.diagnostics.malformed_entry(trimmed, &err);
                false
            }
            Err(err) => {
                self.diagnostics.malformed_entry(trimmed, &err);
                false
            }
        }
    }

    fn entry_matches(&self, client_ip: &str, entry: &AllowlistEntry) -> bool {
        match entry {
            AllowlistEntry::Exact(addr) => addr == client_ip,
            AllowlistEntry::Subnet(pattern) => self.subnet_matches(client_ip, pattern),
        }
    }

    fn subnet_matches(&self, client_ip: &str, pattern: &SubnetPattern) -> bool {
        match self.subnet_contains(client_ip, pattern) {
            Ok(contained) => contained,
            Err(err) => {
                self.diagnostics.malformed_entry(&pattern.to_string(), &err);
                false
            }
        }
    }

    fn subnet_contains(&self, client_ip: &str, pattern: &SubnetPattern) -> Result<bool> {
        let client = self.resolver.resolve(client_ip)?;
        let base = self.resolver.resolve(pattern.base())?;

        // IPv4 and IPv6 are never cross-compatible
        if !client.is_same_family(&base) {
            return Ok(false);
        }

        if pattern.prefix() > client.bit_len() {
            return Err(Error::PrefixOutOfRange {
                prefix: pattern.prefix(),
                max: client.bit_len(),
            });
        }

        Ok(prefix_bits_match(
            client.as_slice(),
            base.as_slice(),
            pattern.prefix(),
        ))
    }
}

/// Compare the top `prefix` bits of two equal-length byte slices
///
/// Caller guarantees `prefix <= 8 * client.len()` and equal slice lengths.
fn prefix_bits_match(client: &[u8], base: &[u8], prefix: u16) -> bool {
    let full_bytes = usize::from(prefix / 8);
    let remaining_bits = prefix % 8;

    if client[..full_bytes] != base[..full_bytes] {
        return false;
    }

    if remaining_bits > 0 {
        let mask = ((0xFF00_u16 >> remaining_bits) & 0xFF) as u8;
        return client[full_bytes] & mask == base[full_bytes] & mask;
    }

    true
}

static DEFAULT_MATCHER: Lazy<AddressMatcher> = Lazy::new(AddressMatcher::new);

/// Check `client_ip` against `allowed_ips` with the shared default matcher
///
/// Equivalent to [`AddressMatcher::is_allowed`] on a matcher built with
/// [`AddressMatcher::new`].
pub fn is_allowed(client_ip: &str, allowed_ips: &str) -> bool {
    DEFAULT_MATCHER.is_allowed(client_ip, allowed_ips)
}
