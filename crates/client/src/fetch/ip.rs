//! Client address resolution for geolocation lookups.
//!
//! The geolocation provider is asked about the caller's public address. When
//! the only address available is loopback, private or otherwise reserved, the
//! provider gets no hint and locates the server's own egress address instead.

use std::net::IpAddr;

/// Check if an IP address is private, reserved, or otherwise not routable.
///
/// This covers:
/// - Loopback addresses (127.0.0.0/8, ::1)
/// - RFC 1918 private ranges (10/8, 172.16/12, 192.168/16)
/// - Link-local addresses (169.254/16, fe80::/10)
/// - Multicast addresses (224/4, ff00::/8)
/// - Unspecified addresses (0.0.0.0/8, ::)
/// - IPv6 unique local (fc00::/7)
pub fn is_private_or_reserved(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            v4.is_loopback()
                || v4.is_private()
                || v4.is_link_local()
                || v4.is_multicast()
                || v4.is_broadcast()
                || v4.is_unspecified()
                || v4.octets()[0] == 0
        }
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => is_private_or_reserved(IpAddr::V4(v4)),
            None => {
                v6.is_loopback()
                    || v6.is_multicast()
                    || v6.is_unspecified()
                    || (v6.segments()[0] & 0xfe00) == 0xfc00
                    || (v6.segments()[0] & 0xffc0) == 0xfe80
            }
        },
    }
}

/// Pick the address to geolocate for a request.
///
/// Uses the first entry of the `X-Forwarded-For` header when one is present,
/// otherwise the direct connection address. Returns `None` when the chosen
/// address is missing, unparseable or not publicly routable.
pub fn resolve_client_ip(forwarded_for: Option<&str>, remote_addr: Option<IpAddr>) -> Option<IpAddr> {
    let candidate = match forwarded_for.map(str::trim).filter(|h| !h.is_empty()) {
        Some(header) => header.split(',').next().map(str::trim).and_then(|first| first.parse().ok()),
        None => remote_addr,
    };

    candidate.filter(|ip| !is_private_or_reserved(*ip))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

    #[test]
    fn test_is_private_or_reserved_loopback_v4() {
        assert!(is_private_or_reserved(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))));
        assert!(is_private_or_reserved(IpAddr::V4(Ipv4Addr::new(127, 255, 255, 255))));
    }

    #[test]
    fn test_is_private_or_reserved_private_v4() {
        assert!(is_private_or_reserved(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1))));
        assert!(is_private_or_reserved(IpAddr::V4(Ipv4Addr::new(172, 16, 0, 1))));
        assert!(is_private_or_reserved(IpAddr::V4(Ipv4Addr::new(192, 168, 0, 1))));
        assert!(is_private_or_reserved(IpAddr::V4(Ipv4Addr::new(169, 254, 0, 1))));
    }

    #[test]
    fn test_is_private_or_reserved_unspecified() {
        assert!(is_private_or_reserved(IpAddr::V4(Ipv4Addr::UNSPECIFIED)));
        assert!(is_private_or_reserved(IpAddr::V6(Ipv6Addr::UNSPECIFIED)));
    }

    #[test]
    fn test_is_private_or_reserved_v6() {
        assert!(is_private_or_reserved(IpAddr::V6(Ipv6Addr::LOCALHOST)));
        assert!(is_private_or_reserved(IpAddr::V6(Ipv6Addr::new(0xfd00, 0, 0, 0, 0, 0, 0, 1))));
        assert!(is_private_or_reserved(IpAddr::V6(Ipv6Addr::new(0xfe80, 0, 0, 0, 0, 0, 0, 1))));
    }

    #[test]
    fn test_ipv4_mapped_loopback_is_reserved() {
        let mapped = Ipv4Addr::new(127, 0, 0, 1).to_ipv6_mapped();
        assert!(is_private_or_reserved(IpAddr::V6(mapped)));
    }

    #[test]
    fn test_public_addresses() {
        assert!(!is_private_or_reserved(IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8))));
        assert!(!is_private_or_reserved(IpAddr::V4(Ipv4Addr::new(93, 184, 216, 34))));
        assert!(!is_private_or_reserved(IpAddr::V6(Ipv6Addr::new(0x2001, 0x4860, 0x4860, 0, 0, 0, 0, 1))));
    }

    #[test]
    fn test_resolve_prefers_first_forwarded_entry() {
        let remote = Some(IpAddr::V4(Ipv4Addr::new(1, 1, 1, 1)));
        let ip = resolve_client_ip(Some("203.0.113.7, 10.0.0.2"), remote);
        assert_eq!(ip, Some(IpAddr::V4(Ipv4Addr::new(203, 0, 113, 7))));
    }

    #[test]
    fn test_resolve_falls_back_to_remote() {
        let remote = Some(IpAddr::V4(Ipv4Addr::new(1, 1, 1, 1)));
        assert_eq!(resolve_client_ip(None, remote), remote);
        assert_eq!(resolve_client_ip(Some("  "), remote), remote);
    }

    #[test]
    fn test_resolve_private_means_no_hint() {
        let loopback = Some(IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(resolve_client_ip(None, loopback), None);
        assert_eq!(resolve_client_ip(Some("192.168.1.10"), None), None);
        assert_eq!(resolve_client_ip(Some("0.0.0.0"), None), None);
    }

    #[test]
    fn test_resolve_garbage_header_means_no_hint() {
        let remote = Some(IpAddr::V4(Ipv4Addr::new(1, 1, 1, 1)));
        assert_eq!(resolve_client_ip(Some("not-an-ip"), remote), None);
        assert_eq!(resolve_client_ip(None, None), None);
    }
}
