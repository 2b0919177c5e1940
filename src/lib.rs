// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # Keksipurkki - HTTP Client with a Proper Cookie Jar
//!
//! A convenience layer over reqwest with cookie handling done right.
//! No black-box cookie store - the jar is a first-class type you can
//! share across clients and inspect directly.
//!
//! ## Features
//!
//! - Cookie jar: domain, path, and secure matching with eviction
//! - Host canonicalization: IDN hosts via punycode, ports stripped
//! - Deterministic ordering: longest path first, oldest first
//! - Chainable requests: headers, query params, basic auth, timeouts
//! - Body encoders: JSON, urlencoded forms, multipart with file parts
//! - Shared jars: one jar across any number of clients
//! - Concurrent execution: fire request batches in parallel
//! - File downloads: write response bodies straight to disk
//!
//! ## Example
//!
//! ```rust,no_run
//! use keksipurkki::{HttpClient, Request};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HttpClient::new()?;
//!
//!     // Set-Cookie headers from the response land in the jar
//!     let login = client
//!         .execute(Request::post("https://example.com/login")?.body("user=ada"))
//!         .await?;
//!     println!("logged in: {}", login.status_code());
//!
//!     // and matching cookies ride along automatically
//!     let profile = client.get("https://example.com/profile").await?;
//!     println!("{}", profile.text_lossy());
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod http;
pub mod jar;

// Re-exports for convenience

// Errors
pub use error::{Error, ErrorContext, Result};

// HTTP
pub use http::{
    content_types, FormBody, HttpClient, HttpClientConfig, MultipartForm, RawBody, Request,
    RequestBuilder, Response,
};

// Cookie jar
pub use jar::{Cookie, CookieJar, SameSite};

/// Keksipurkki version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
