//! Address resolution
//!
//! Maps a textual address (or hostname) to its raw fixed-length byte form:
//! 4 bytes for IPv4, 16 for IPv6. Resolution sits behind the
//! [`AddressResolver`] trait so the matching logic itself never performs
//! I/O; DNS only enters through [`SystemResolver`].

use std::net::{IpAddr, ToSocketAddrs};

use crate::error::{Error, Result};

#[cfg(test)]
use mockall::automock;

/// Raw fixed-length byte representation of a resolved address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawAddress {
    /// 4-byte IPv4 address
    V4([u8; 4]),
    /// 16-byte IPv6 address
    V6([u8; 16]),
}

impl RawAddress {
    /// Address bytes in network order
    pub fn as_slice(&self) -> &[u8] {
        match self {
            Self::V4(bytes) => bytes,
            Self::V6(bytes) => bytes,
        }
    }

    /// Bit width of this address family (32 or 128)
    pub fn bit_len(&self) -> u16 {
        match self {
            Self::V4(_) => 32,
            Self::V6(_) => 128,
        }
    }

    /// Whether both addresses have the same byte length
    ///
    /// Families are never cross-compatible: an IPv4 address is not
    /// comparable to an IPv6 address, mapped forms included.
    pub fn is_same_family(&self, other: &Self) -> bool {
        self.as_slice().len() == other.as_slice().len()
    }
}

impl From<IpAddr> for RawAddress {
    fn from(addr: IpAddr) -> Self {
        match addr {
            IpAddr::V4(v4) => Self::V4(v4.octets()),
            IpAddr::V6(v6) => Self::V6(v6.octets()),
        }
    }
}

/// Resolves a textual address to its raw byte form
///
/// Implementations signal an [`Error::Unresolvable`] for input they cannot
/// map to an address; the matcher treats that entry as a non-match.
#[cfg_attr(test, automock)]
pub trait AddressResolver: Send + Sync {
    /// Resolve `host` into its raw address bytes
    fn resolve(&self, host: &str) -> Result<RawAddress>;
}

/// Resolver that accepts numeric IPv4/IPv6 literals only
///
/// Never performs a lookup, so it never blocks. Use this to keep the
/// matcher a pure function of its inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralResolver;

impl AddressResolver for LiteralResolver {
    fn resolve(&self, host: &str) -> Result<RawAddress> {
        host.parse::<IpAddr>()
            .map(RawAddress::from)
            .map_err(|_| Error::unresolvable(host))
    }
}

/// Resolver with platform host-lookup semantics
///
/// Numeric literals are parsed directly; anything else goes through the
/// system resolver and may block on DNS. The first resolved address wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

impl AddressResolver for SystemResolver {
    fn resolve(&self, host: &str) -> Result<RawAddress> {
        if let Ok(addr) = host.parse::<IpAddr>() {
            return Ok(addr.into());
        }

        let mut addrs = (host, 0u16)
            .to_socket_addrs()
            .map_err(|_| Error::unresolvable(host))?;
        addrs
            .next()
            .map(|sock| sock.ip().into())
            .ok_or_else(|| Error::unresolvable(host))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_v4() {
        let addr = LiteralResolver.resolve("192.168.1.1").unwrap();
        assert_eq!(addr, RawAddress::V4([192, 168, 1, 1]));
        assert_eq!(addr.bit_len(), 32);
        assert_eq!(addr.as_slice().len(), 4);
    }

    #[test]
    fn test_literal_v6() {
        let addr = LiteralResolver.resolve("::1").unwrap();
        let mut expected = [0u8; 16];
        expected[15] = 1;
        assert_eq!(addr, RawAddress::V6(expected));
        assert_eq!(addr.bit_len(), 128);
    }

    #[test]
    fn test_literal_rejects_hostname() {
        let err = LiteralResolver.resolve("localhost").unwrap_err();
        assert!(matches!(err, Error::Unresolvable { .. }));
    }

    #[test]
    fn test_literal_rejects_garbage() {
        assert!(LiteralResolver.resolve("999.999.999.999").is_err());
        assert!(LiteralResolver.resolve("").is_err());
        assert!(LiteralResolver.resolve("not an ip").is_err());
    }

    #[test]
    fn test_system_resolver_parses_literals_without_lookup() {
        // Numeric literals short-circuit before any lookup happens
        let addr = SystemResolver.resolve("10.0.0.1").unwrap();
        assert_eq!(addr, RawAddress::V4([10, 0, 0, 1]));

        let addr = SystemResolver.resolve("2001:db8::1").unwrap();
        assert_eq!(addr.bit_len(), 128);
    }

    #[test]
    fn test_family_comparison() {
        let v4 = RawAddress::V4([10, 0, 0, 1]);
        let v6 = RawAddress::V6([0; 16]);
        assert!(v4.is_same_family(&RawAddress::V4([1, 2, 3, 4])));
        assert!(v6.is_same_family(&RawAddress::V6([0xff; 16])));
        assert!(!v4.is_same_family(&v6));
    }
}
