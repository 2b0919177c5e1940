// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Punycode encoder (RFC 3492)
//!
//! Encoding direction only. The jar maps internationalized host names
//! onto their ASCII form once at the boundary so that domain matching
//! stays a byte-wise comparison; nothing on that path ever decodes.

use crate::error::{Error, Result};

const BASE: i32 = 36;
const DAMP: i32 = 700;
const INITIAL_BIAS: i32 = 72;
const INITIAL_N: i32 = 128;
const SKEW: i32 = 38;
const TMAX: i32 = 26;
const TMIN: i32 = 1;

/// Prefix marking a punycode-encoded label
pub(crate) const ACE_PREFIX: &str = "xn--";

/// Encode one label, prepending `prefix` to the output.
///
/// Deltas are accumulated in an `i32` like the reference algorithm;
/// any arithmetic overflow rejects the label instead of producing a
/// scrambled encoding.
pub(crate) fn encode(prefix: &str, s: &str) -> Result<String> {
    let mut output = String::with_capacity(prefix.len() + 1 + 2 * s.len());
    output.push_str(prefix);

    let (mut delta, mut n, mut bias) = (0i32, INITIAL_N, INITIAL_BIAS);
    let (mut b, mut remaining) = (0i32, 0i32);
    for c in s.chars() {
        if c.is_ascii() {
            b += 1;
            output.push(c);
        } else {
            remaining += 1;
        }
    }
    let mut h = b;
    if b > 0 {
        output.push('-');
    }

    while remaining != 0 {
        let mut m = i32::MAX;
        for c in s.chars() {
            let r = c as i32;
            if m > r && r >= n {
                m = r;
            }
        }
        delta = (m - n)
            .checked_mul(h + 1)
            .and_then(|step| delta.checked_add(step))
            .ok_or_else(|| Error::invalid_label(s))?;
        n = m;
        for c in s.chars() {
            let r = c as i32;
            if r < n {
                delta = delta.checked_add(1).ok_or_else(|| Error::invalid_label(s))?;
                continue;
            }
            if r > n {
                continue;
            }
            let mut q = delta;
            let mut k = BASE;
            loop {
                let t = (k - bias).clamp(TMIN, TMAX);
                if q < t {
                    break;
                }
                output.push(encode_digit(t + (q - t) % (BASE - t)));
                q = (q - t) / (BASE - t);
                k += BASE;
            }
            output.push(encode_digit(q));
            bias = adapt(delta, h + 1, h == b);
            delta = 0;
            h += 1;
            remaining -= 1;
        }
        delta = delta.checked_add(1).ok_or_else(|| Error::invalid_label(s))?;
        n += 1;
    }

    Ok(output)
}

/// Encode a full host, punycoding each non-ASCII label.
///
/// ASCII hosts pass through untouched. Labels that are already ASCII
/// keep their bytes; only non-ASCII labels gain the `xn--` prefix.
pub(crate) fn to_ascii(host: &str) -> Result<String> {
    if host.is_ascii() {
        return Ok(host.to_string());
    }
    let mut labels = Vec::new();
    for label in host.split('.') {
        if label.is_ascii() {
            labels.push(label.to_string());
        } else {
            labels.push(encode(ACE_PREFIX, label)?);
        }
    }
    Ok(labels.join("."))
}

fn encode_digit(digit: i32) -> char {
    match digit {
        0..=25 => (b'a' + digit as u8) as char,
        26..=35 => (b'0' + digit as u8 - 26) as char,
        // t is clamped to [TMIN, TMAX] and q % (BASE - t) < BASE - t,
        // so every digit handed in is below BASE
        _ => unreachable!("punycode digit out of range"),
    }
}

fn adapt(mut delta: i32, num_points: i32, first_time: bool) -> i32 {
    if first_time {
        delta /= DAMP;
    } else {
        delta /= 2;
    }
    delta += delta / num_points;
    let mut k = 0;
    while delta > ((BASE - TMIN) * TMAX) / 2 {
        delta /= BASE - TMIN;
        k += BASE;
    }
    k + (BASE - TMIN + 1) * delta / (delta + SKEW)
}
