// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Cookie jar for keksipurkki
//!
//! An in-memory cookie store with the matching, expiration, and
//! eviction rules HTTP clients are expected to follow. Lookup and
//! storage go through canonical host forms, so internationalized
//! domains and trailing-dot hosts land in the same place.

mod cookie;
mod host;
mod punycode;
mod store;

pub use cookie::{Cookie, SameSite};
pub use store::CookieJar;
