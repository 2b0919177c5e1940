// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! RFC 6265 cookie jar
//!
//! In-memory store with host-only and domain cookies, path and secure
//! scoping, expiration with opportunistic eviction, and deterministic
//! ordering of returned cookies. A single mutex guards the whole store,
//! so one response's Set-Cookie batch commits atomically and readers
//! never observe half of it.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use lazy_static::lazy_static;
use parking_lot::Mutex;
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::jar::cookie::{Cookie, SameSite};
use crate::jar::host::{canonicalize_host, has_dot_suffix, is_ip_address, jar_key};

lazy_static! {
    /// Expiry assigned to session cookies so lifetime comparisons never
    /// need a separate "no expiry" case.
    static ref END_OF_TIME: DateTime<Utc> =
        Utc.with_ymd_and_hms(9999, 12, 31, 23, 59, 59).unwrap();
}

/// Effective path for cookies whose Path attribute is missing or does
/// not start with `/`. Such cookies apply site-wide; the
/// directory-of-request-path default from RFC 6265 section 5.1.4 is
/// intentionally not used.
const DEFAULT_PATH: &str = "/";

/// A stored cookie plus the bookkeeping the jar needs.
#[derive(Debug, Clone)]
struct CookieEntry {
    name: String,
    value: String,
    domain: String,
    path: String,
    same_site: SameSite,
    secure: bool,
    http_only: bool,
    persistent: bool,
    host_only: bool,
    expires: DateTime<Utc>,
    created: DateTime<Utc>,
    last_access: DateTime<Utc>,
    seq_num: u64,
}

impl CookieEntry {
    /// Identity key inside a bucket.
    fn id(&self) -> String {
        format!("{};{};{}", self.domain, self.path, self.name)
    }

    /// Check the three send conditions for a request.
    fn should_send(&self, https: bool, host: &str, path: &str) -> bool {
        self.domain_matches(host) && self.path_matches(path) && (https || !self.secure)
    }

    fn domain_matches(&self, host: &str) -> bool {
        if self.domain == host {
            return true;
        }
        !self.host_only && has_dot_suffix(host, &self.domain)
    }

    fn path_matches(&self, request_path: &str) -> bool {
        if request_path == self.path {
            return true;
        }
        if request_path.starts_with(&self.path) {
            if self.path.ends_with('/') {
                return true;
            }
            if request_path.as_bytes().get(self.path.len()) == Some(&b'/') {
                return true;
            }
        }
        false
    }
}

#[derive(Debug, Default)]
struct JarInner {
    /// Buckets keyed by [`jar_key`], entries keyed by identity.
    entries: HashMap<String, HashMap<String, CookieEntry>>,
    next_seq: u64,
}

/// Thread-safe RFC 6265 cookie store
///
/// Cloning is cheap and shares the underlying store, so one jar can
/// serve any number of in-flight requests for the process lifetime.
#[derive(Debug, Clone)]
pub struct CookieJar {
    inner: Arc<Mutex<JarInner>>,
}

impl Default for CookieJar {
    fn default() -> Self {
        Self::new()
    }
}

impl CookieJar {
    /// Create a new empty cookie jar
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(JarInner::default())),
        }
    }

    /// Get all cookies to send with a request to `url`
    ///
    /// Expired persistent entries encountered on the way are evicted.
    /// Results are ordered longest path first, then by creation time,
    /// then by insertion sequence, so equally specific cookies keep a
    /// stable order across calls.
    pub fn cookies(&self, url: &Url) -> Vec<Cookie> {
        self.cookies_at(url, Utc::now())
    }

    pub(crate) fn cookies_at(&self, url: &Url, now: DateTime<Utc>) -> Vec<Cookie> {
        if url.scheme() != "http" && url.scheme() != "https" {
            return Vec::new();
        }
        let host = match canonicalize_host(url.host_str().unwrap_or("")) {
            Ok(host) => host,
            Err(err) => {
                debug!(url = %url, error = %err, "cookie lookup host rejected");
                return Vec::new();
            }
        };
        let key = jar_key(&host);
        let https = url.scheme() == "https";
        let path = url.path();

        let mut selected: Vec<CookieEntry> = Vec::new();
        {
            let mut inner = self.inner.lock();
            let Some(bucket) = inner.entries.get_mut(&key) else {
                return Vec::new();
            };
            bucket.retain(|_, entry| !(entry.persistent && entry.expires <= now));
            for entry in bucket.values_mut() {
                if !entry.should_send(https, &host, path) {
                    continue;
                }
                entry.last_access = now;
                selected.push(entry.clone());
            }
            let bucket_empty = bucket.is_empty();
            if bucket_empty {
                inner.entries.remove(&key);
            }
        }

        selected.sort_by(|a, b| {
            b.path
                .len()
                .cmp(&a.path.len())
                .then_with(|| a.created.cmp(&b.created))
                .then_with(|| a.seq_num.cmp(&b.seq_num))
        });

        selected
            .into_iter()
            .map(|entry| {
                Cookie::new(entry.name, entry.value)
                    .domain(entry.domain)
                    .path(entry.path)
                    .secure(entry.secure)
                    .http_only(entry.http_only)
                    .same_site(entry.same_site)
            })
            .collect()
    }

    /// Store one response's Set-Cookie batch for `url`
    ///
    /// Rejected candidates are dropped individually; the rest of the
    /// batch still applies. The whole batch commits under one lock
    /// acquisition.
    pub fn set_cookies(&self, url: &Url, cookies: Vec<Cookie>) {
        self.set_cookies_at(url, cookies, Utc::now());
    }

    pub(crate) fn set_cookies_at(&self, url: &Url, cookies: Vec<Cookie>, now: DateTime<Utc>) {
        if cookies.is_empty() {
            return;
        }
        if url.scheme() != "http" && url.scheme() != "https" {
            return;
        }
        let host = match canonicalize_host(url.host_str().unwrap_or("")) {
            Ok(host) => host,
            Err(err) => {
                debug!(url = %url, error = %err, "cookie batch host rejected");
                return;
            }
        };
        let key = jar_key(&host);

        let mut guard = self.inner.lock();
        let JarInner { entries, next_seq } = &mut *guard;
        let bucket = entries.entry(key.clone()).or_default();

        for cookie in cookies {
            let name = cookie.name.clone();
            let (mut entry, remove) = match new_entry(cookie, now, &host) {
                Ok(built) => built,
                Err(err) => {
                    debug!(host = %host, cookie = %name, error = %err, "cookie candidate rejected");
                    continue;
                }
            };
            let id = entry.id();
            if remove {
                bucket.remove(&id);
                continue;
            }
            match bucket.get(&id) {
                Some(old) => {
                    entry.created = old.created;
                    entry.seq_num = old.seq_num;
                }
                None => {
                    entry.created = now;
                    entry.seq_num = *next_seq;
                    *next_seq += 1;
                }
            }
            entry.last_access = now;
            bucket.insert(id, entry);
        }

        let bucket_empty = bucket.is_empty();
        if bucket_empty {
            entries.remove(&key);
        }
    }

    /// Get the Cookie header value for a URL
    pub fn cookie_header(&self, url: &Url) -> Option<String> {
        let cookies = self.cookies(url);
        if cookies.is_empty() {
            return None;
        }
        Some(
            cookies
                .iter()
                .map(|c| c.to_header_value())
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    /// Get total stored cookie count
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .entries
            .values()
            .map(|bucket| bucket.len())
            .sum()
    }

    /// Check if the jar is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all cookies
    pub fn clear(&self) {
        self.inner.lock().entries.clear();
    }

    /// Remove cookies that have not been used within `max_idle`.
    pub fn purge_idle(&self, max_idle: std::time::Duration) {
        let Ok(max_idle) = Duration::from_std(max_idle) else {
            return;
        };
        let Some(cutoff) = Utc::now().checked_sub_signed(max_idle) else {
            return;
        };
        let mut guard = self.inner.lock();
        guard.entries.retain(|_, bucket| {
            bucket.retain(|_, entry| entry.last_access > cutoff);
            !bucket.is_empty()
        });
    }
}

/// Build a store entry from a candidate cookie.
///
/// Returns the entry plus a removal flag. Identity fields are filled in
/// before lifetime resolution, so a removal request still addresses the
/// entry it deletes.
fn new_entry(cookie: Cookie, now: DateTime<Utc>, host: &str) -> Result<(CookieEntry, bool)> {
    let path = if !cookie.path.starts_with('/') {
        DEFAULT_PATH.to_string()
    } else {
        cookie.path
    };
    let (domain, host_only) = domain_and_type(host, &cookie.domain)?;

    let mut entry = CookieEntry {
        name: cookie.name,
        value: String::new(),
        domain,
        path,
        same_site: cookie.same_site,
        secure: false,
        http_only: false,
        persistent: false,
        host_only,
        expires: *END_OF_TIME,
        created: now,
        last_access: now,
        seq_num: 0,
    };

    match cookie.max_age {
        Some(secs) if secs < 0 => return Ok((entry, true)),
        Some(secs) if secs > 0 => {
            // Absurdly large Max-Age values clamp to the sentinel
            // instead of overflowing the arithmetic.
            entry.expires = Duration::try_seconds(secs)
                .and_then(|d| now.checked_add_signed(d))
                .unwrap_or(*END_OF_TIME);
            entry.persistent = true;
        }
        _ => match cookie.expires {
            None => {
                entry.expires = *END_OF_TIME;
                entry.persistent = false;
            }
            Some(expires) if expires <= now => return Ok((entry, true)),
            Some(expires) => {
                entry.expires = expires;
                entry.persistent = true;
            }
        },
    }

    entry.value = cookie.value;
    entry.secure = cookie.secure;
    entry.http_only = cookie.http_only;

    Ok((entry, false))
}

/// Resolve the storage domain and host-only flag for a candidate.
fn domain_and_type(host: &str, domain_attr: &str) -> Result<(String, bool)> {
    if domain_attr.is_empty() {
        return Ok((host.to_string(), true));
    }

    if is_ip_address(host) {
        return Err(Error::NoHostnameForIp);
    }

    let domain = domain_attr.strip_prefix('.').unwrap_or(domain_attr);
    if domain.is_empty() || domain.starts_with('.') {
        return Err(Error::malformed_domain(domain_attr));
    }
    let domain = domain.to_lowercase();
    if domain.ends_with('.') {
        return Err(Error::malformed_domain(domain_attr));
    }

    if host != domain && !has_dot_suffix(host, &domain) {
        return Err(Error::illegal_domain(domain, host));
    }

    Ok((domain, false))
}
