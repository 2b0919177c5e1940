// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP client layer for keksipurkki
//!
//! Provides a lightweight HTTP client with cookie jar integration,
//! chainable request construction, and eager body encoders.

pub mod body;
mod client;
mod request;
mod response;

pub use body::{content_types, FormBody, MultipartForm, RawBody};
pub use client::{HttpClient, HttpClientConfig, RequestBuilder};
pub use request::Request;
pub use response::Response;

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str = concat!("keksipurkki/", env!("CARGO_PKG_VERSION"));

/// Common HTTP headers
pub mod headers {
    pub const ACCEPT: &str = "accept";
    pub const ACCEPT_LANGUAGE: &str = "accept-language";
    pub const AUTHORIZATION: &str = "authorization";
    pub const CONTENT_TYPE: &str = "content-type";
    pub const COOKIE: &str = "cookie";
    pub const SET_COOKIE: &str = "set-cookie";
    pub const USER_AGENT: &str = "user-agent";
}
