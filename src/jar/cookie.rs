// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Cookie type and Set-Cookie header parsing
//!
//! [`Cookie`] is both the candidate parsed from one `Set-Cookie` header
//! value and the shape handed back by jar lookups. Attribute values are
//! kept raw here; canonicalization and scoping decisions belong to the
//! jar at store time.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single HTTP cookie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cookie {
    /// Cookie name
    pub name: String,
    /// Cookie value
    pub value: String,
    /// Raw Domain attribute (empty = host-only candidate)
    pub domain: String,
    /// Raw Path attribute (empty = default path)
    pub path: String,
    /// Expiration time from the Expires attribute
    pub expires: Option<DateTime<Utc>>,
    /// Max-Age attribute in seconds (None = absent, negative = delete)
    pub max_age: Option<i64>,
    /// Secure flag (HTTPS only)
    pub secure: bool,
    /// HttpOnly flag (not accessible via JavaScript)
    pub http_only: bool,
    /// SameSite attribute
    pub same_site: SameSite,
}

/// SameSite cookie attribute
///
/// Stored for callers to inspect; the jar does not enforce it when
/// selecting outgoing cookies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SameSite {
    /// Cookie sent with all requests
    #[default]
    None,
    /// Cookie sent with same-site and top-level navigations
    Lax,
    /// Cookie only sent with same-site requests
    Strict,
}

impl Cookie {
    /// Create a new cookie
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: String::new(),
            path: String::new(),
            expires: None,
            max_age: None,
            secure: false,
            http_only: false,
            same_site: SameSite::default(),
        }
    }

    /// Set the domain
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Set the path
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Set expiration time
    pub fn expires(mut self, expires: DateTime<Utc>) -> Self {
        self.expires = Some(expires);
        self
    }

    /// Set Max-Age in seconds
    ///
    /// Taken as-is: zero means "attribute unset" when the jar resolves
    /// the lifetime, negative requests deletion. Wire parsing instead
    /// normalizes any non-positive Max-Age to `-1`.
    pub fn max_age(mut self, secs: i64) -> Self {
        self.max_age = Some(secs);
        self
    }

    /// Set secure flag
    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Set http_only flag
    pub fn http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    /// Set same_site attribute
    pub fn same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = same_site;
        self
    }

    /// Parse a Set-Cookie header value
    ///
    /// Returns `None` for headers without a `name=value` first pair.
    /// Unknown attributes and unparseable attribute values are ignored,
    /// never fatal.
    pub fn parse(header: &str) -> Option<Self> {
        let mut parts = header.split(';');
        let first = parts.next()?.trim();

        let (name, value) = first.split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let mut cookie = Cookie::new(name, unquote(value.trim()));

        for part in parts {
            let part = part.trim();
            if let Some((attr, val)) = part.split_once('=') {
                let attr = attr.trim().to_lowercase();
                let val = val.trim();
                match attr.as_str() {
                    "domain" => cookie.domain = val.to_string(),
                    "path" => cookie.path = val.to_string(),
                    "expires" => cookie.expires = parse_cookie_date(val),
                    "max-age" => {
                        if let Ok(secs) = val.parse::<i64>() {
                            cookie.max_age = Some(if secs <= 0 { -1 } else { secs });
                        }
                    }
                    "samesite" => {
                        cookie.same_site = match val.to_lowercase().as_str() {
                            "strict" => SameSite::Strict,
                            "lax" => SameSite::Lax,
                            _ => SameSite::None,
                        };
                    }
                    _ => {}
                }
            } else {
                match part.to_lowercase().as_str() {
                    "secure" => cookie.secure = true,
                    "httponly" => cookie.http_only = true,
                    _ => {}
                }
            }
        }

        Some(cookie)
    }

    /// Convert to Cookie header format
    pub fn to_header_value(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}

/// Strip one pair of surrounding double quotes from a cookie value.
fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// Parse the cookie-date formats seen in Expires attributes.
///
/// Tries the RFC 1123 GMT form, then the legacy dashed Netscape form,
/// then falls back to general RFC 2822 for servers that send a numeric
/// zone offset.
fn parse_cookie_date(val: &str) -> Option<DateTime<Utc>> {
    const GMT_FORMATS: [&str; 2] = [
        "%a, %d %b %Y %H:%M:%S GMT",
        "%a, %d-%b-%Y %H:%M:%S GMT",
    ];
    for format in GMT_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(val, format) {
            return Some(dt.and_utc());
        }
    }
    DateTime::parse_from_rfc2822(val)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_basic() {
        let header = "session=abc123; Domain=example.com; Path=/account; Secure; HttpOnly";
        let cookie = Cookie::parse(header).unwrap();

        assert_eq!(cookie.name, "session");
        assert_eq!(cookie.value, "abc123");
        assert_eq!(cookie.domain, "example.com");
        assert_eq!(cookie.path, "/account");
        assert!(cookie.secure);
        assert!(cookie.http_only);
        assert_eq!(cookie.max_age, None);
        assert_eq!(cookie.expires, None);
    }

    #[test]
    fn test_parse_keeps_raw_domain() {
        let cookie = Cookie::parse("id=1; Domain=.example.com").unwrap();
        assert_eq!(cookie.domain, ".example.com");
    }

    #[test]
    fn test_parse_max_age_normalization() {
        assert_eq!(Cookie::parse("a=1; Max-Age=10").unwrap().max_age, Some(10));
        assert_eq!(Cookie::parse("a=1; Max-Age=0").unwrap().max_age, Some(-1));
        assert_eq!(Cookie::parse("a=1; Max-Age=-5").unwrap().max_age, Some(-1));
        assert_eq!(Cookie::parse("a=1; Max-Age=junk").unwrap().max_age, None);
    }

    #[test]
    fn test_parse_expires_formats() {
        let want = Utc.with_ymd_and_hms(2027, 1, 2, 3, 4, 5).unwrap();

        let c = Cookie::parse("a=1; Expires=Sat, 02 Jan 2027 03:04:05 GMT").unwrap();
        assert_eq!(c.expires, Some(want));

        let c = Cookie::parse("a=1; Expires=Sat, 02-Jan-2027 03:04:05 GMT").unwrap();
        assert_eq!(c.expires, Some(want));

        let c = Cookie::parse("a=1; Expires=Sat, 02 Jan 2027 03:04:05 +0000").unwrap();
        assert_eq!(c.expires, Some(want));

        let c = Cookie::parse("a=1; Expires=whenever").unwrap();
        assert_eq!(c.expires, None);
    }

    #[test]
    fn test_parse_quoted_value() {
        let cookie = Cookie::parse("token=\"abc def\"").unwrap();
        assert_eq!(cookie.value, "abc def");
    }

    #[test]
    fn test_parse_samesite() {
        assert_eq!(
            Cookie::parse("a=1; SameSite=Strict").unwrap().same_site,
            SameSite::Strict
        );
        assert_eq!(
            Cookie::parse("a=1; SameSite=Lax").unwrap().same_site,
            SameSite::Lax
        );
        assert_eq!(
            Cookie::parse("a=1; SameSite=None").unwrap().same_site,
            SameSite::None
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(Cookie::parse("no-equals-sign").is_none());
        assert!(Cookie::parse("=value-without-name").is_none());
        assert!(Cookie::parse("").is_none());
    }

    #[test]
    fn test_to_header_value() {
        let cookie = Cookie::new("id", "42");
        assert_eq!(cookie.to_header_value(), "id=42");
    }
}
