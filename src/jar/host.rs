// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Host canonicalization for jar lookups
//!
//! Request hosts arrive in many spellings: mixed case, trailing dots,
//! attached ports, IDN labels. Everything entering the jar passes
//! through [`canonicalize_host`] first so that matching and keying
//! stay byte-wise comparisons on a single canonical form.

use crate::error::{Error, Result};
use crate::jar::punycode;

/// Produce the canonical form of a request host.
///
/// Lowercases, strips an attached port, removes one trailing dot from
/// fully qualified names, then punycodes any non-ASCII labels.
pub(crate) fn canonicalize_host(host: &str) -> Result<String> {
    let lowered = host.to_lowercase();
    let mut host = lowered.as_str();
    if has_port(host) {
        host = split_host_port(host)?;
    }
    if let Some(stripped) = host.strip_suffix('.') {
        host = stripped;
    }
    punycode::to_ascii(host)
}

/// Report whether a host string carries a port.
///
/// One colon always means a port. More than one colon is an IPv6
/// literal, which only carries a port in the bracketed `[host]:port`
/// form.
fn has_port(host: &str) -> bool {
    match host.matches(':').count() {
        0 => false,
        1 => true,
        _ => host.starts_with('[') && host.contains("]:"),
    }
}

/// Strip the port from a `host:port` or `[host]:port` string.
fn split_host_port(hostport: &str) -> Result<&str> {
    if let Some(rest) = hostport.strip_prefix('[') {
        let end = rest
            .find(']')
            .ok_or_else(|| Error::invalid_host(hostport))?;
        if !rest[end + 1..].starts_with(':') {
            return Err(Error::invalid_host(hostport));
        }
        Ok(&rest[..end])
    } else {
        match hostport.rfind(':') {
            Some(i) => Ok(&hostport[..i]),
            None => Err(Error::invalid_host(hostport)),
        }
    }
}

/// Compute the bucket key for a canonical host.
///
/// IP literals and single labels key under themselves; everything else
/// keys under its last two labels, so `a.b.example.com` and
/// `example.com` share a bucket.
pub(crate) fn jar_key(host: &str) -> String {
    if is_ip_address(host) {
        return host.to_string();
    }
    let i = match host.rfind('.') {
        None | Some(0) => return host.to_string(),
        Some(i) => i,
    };
    match host[..i - 1].rfind('.') {
        Some(prev_dot) => host[prev_dot + 1..].to_string(),
        None => host.to_string(),
    }
}

/// Report whether a canonical host is an IPv4 or IPv6 literal.
pub(crate) fn is_ip_address(host: &str) -> bool {
    host.parse::<std::net::IpAddr>().is_ok()
}

/// Report whether `s` equals `suffix` preceded by a dot.
pub(crate) fn has_dot_suffix(s: &str, suffix: &str) -> bool {
    s.len() > suffix.len()
        && s.as_bytes()[s.len() - suffix.len() - 1] == b'.'
        && s.ends_with(suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_host() {
        let cases = [
            ("www.example.com", "www.example.com"),
            ("WWW.EXAMPLE.COM", "www.example.com"),
            ("wWw.eXAmple.com", "www.example.com"),
            ("www.example.com:80", "www.example.com"),
            ("192.168.0.10", "192.168.0.10"),
            ("192.168.0.5:8080", "192.168.0.5"),
            ("2001:4860:0:2001::68", "2001:4860:0:2001::68"),
            ("[2001:4860:0:2001::68]:8080", "2001:4860:0:2001::68"),
            ("www.bücher.de", "www.xn--bcher-kva.de"),
            ("www.example.com.", "www.example.com"),
            ("EXAMPLE.com.", "example.com"),
        ];
        for (input, want) in cases {
            assert_eq!(canonicalize_host(input).unwrap(), want, "host {:?}", input);
        }
    }

    #[test]
    fn test_canonicalize_host_rejects_bad_brackets() {
        assert!(canonicalize_host("[abc:80").is_err());
        assert!(canonicalize_host("[a]b]:80").is_err());
    }

    #[test]
    fn test_has_port() {
        assert!(!has_port("www.example.com"));
        assert!(has_port("www.example.com:80"));
        assert!(!has_port("127.0.0.1"));
        assert!(has_port("127.0.0.1:8080"));
        assert!(!has_port("2001:4860:0:2001::68"));
        assert!(has_port("[2001:4860:0:2001::68]:8080"));
        assert!(!has_port(""));
    }

    #[test]
    fn test_jar_key() {
        let cases = [
            ("www.example.com", "example.com"),
            ("a.b.www.example.com", "example.com"),
            ("example.com", "example.com"),
            ("com", "com"),
            ("", ""),
            (".com", ".com"),
            ("192.168.0.10", "192.168.0.10"),
            ("::1", "::1"),
        ];
        for (input, want) in cases {
            assert_eq!(jar_key(input), want, "host {:?}", input);
        }
    }

    #[test]
    fn test_is_ip_address() {
        assert!(is_ip_address("127.0.0.1"));
        assert!(is_ip_address("::1"));
        assert!(is_ip_address("2001:4860:0:2001::68"));
        assert!(!is_ip_address("1.2.3"));
        assert!(!is_ip_address("example.com"));
        assert!(!is_ip_address(""));
        assert!(!is_ip_address("[::1]"));
    }

    #[test]
    fn test_has_dot_suffix() {
        assert!(has_dot_suffix("www.example.com", "example.com"));
        assert!(has_dot_suffix("a.b.c", "b.c"));
        assert!(!has_dot_suffix("example.com", "example.com"));
        assert!(!has_dot_suffix("wexample.com", "example.com"));
        assert!(!has_dot_suffix("www.example.com", "ample.com"));
        assert!(!has_dot_suffix("com", "example.com"));
    }
}
