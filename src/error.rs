// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for keksipurkki
//!
//! Jar errors are candidate-scoped: a bad Set-Cookie candidate is
//! dropped and logged while the rest of the batch and the surrounding
//! request keep going. The variants still carry full context so the
//! canonicalization and parsing layers can report what they rejected.

use thiserror::Error;

/// Result type alias for keksipurkki operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for keksipurkki
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Host string could not be split into host and port
    #[error("Invalid host: {0}")]
    InvalidHost(String),

    /// Domain label could not be punycode-encoded
    #[error("Invalid domain label: {0:?}")]
    InvalidLabel(String),

    /// Malformed Domain attribute in a Set-Cookie header
    #[error("Malformed cookie domain attribute: {0:?}")]
    MalformedDomain(String),

    /// Domain attribute present but the request host is an IP literal
    #[error("Cookie domain attribute given but host is an IP address")]
    NoHostnameForIp,

    /// Domain attribute does not cover the request host
    #[error("Illegal cookie domain attribute {domain:?} for host {host:?}")]
    IllegalDomain {
        /// Domain attribute after normalization
        domain: String,
        /// Canonical request host that failed to match it
        host: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Download target answered with a non-success status
    #[error("Download failed: server responded with status {status}")]
    DownloadFailed {
        /// HTTP status the server answered with
        status: u16,
    },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an invalid host error
    pub fn invalid_host<S: Into<String>>(host: S) -> Self {
        Error::InvalidHost(host.into())
    }

    /// Create an invalid label error
    pub fn invalid_label<S: Into<String>>(label: S) -> Self {
        Error::InvalidLabel(label.into())
    }

    /// Create a malformed domain error
    pub fn malformed_domain<S: Into<String>>(domain: S) -> Self {
        Error::MalformedDomain(domain.into())
    }

    /// Create an illegal domain error
    pub fn illegal_domain(domain: impl Into<String>, host: impl Into<String>) -> Self {
        Error::IllegalDomain {
            domain: domain.into(),
            host: host.into(),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a candidate-scoped cookie rejection
    ///
    /// These never escape the jar. The offending candidate is skipped
    /// and the rest of the batch is applied.
    pub fn is_cookie_rejection(&self) -> bool {
        matches!(
            self,
            Error::InvalidHost(_)
                | Error::InvalidLabel(_)
                | Error::MalformedDomain(_)
                | Error::NoHostnameForIp
                | Error::IllegalDomain { .. }
        )
    }

    /// Check if this is a network-level error
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Http(_))
    }

    /// Check if this is recoverable (can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Http(_) | Error::Io(_))
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

/// Helper trait for adding context to errors
pub trait ErrorContext<T> {
    /// Add operation context to error
    fn context(self, msg: &str) -> Result<T>;
}

impl<T, E: Into<Error>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            Error::Other(format!("{}: {}", msg, err))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_rejection_classification() {
        assert!(Error::invalid_host("bad]host").is_cookie_rejection());
        assert!(Error::invalid_label("\u{10FFFF}").is_cookie_rejection());
        assert!(Error::malformed_domain(".").is_cookie_rejection());
        assert!(Error::NoHostnameForIp.is_cookie_rejection());
        assert!(Error::illegal_domain("example.com", "other.org").is_cookie_rejection());

        assert!(!Error::config("bad proxy url").is_cookie_rejection());
        assert!(!Error::other("misc").is_cookie_rejection());
    }

    #[test]
    fn test_display_includes_context() {
        let err = Error::illegal_domain("example.com", "other.org");
        let msg = err.to_string();
        assert!(msg.contains("example.com"));
        assert!(msg.contains("other.org"));

        let err = Error::DownloadFailed { status: 404 };
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn test_context_helper() {
        let res: std::result::Result<(), Error> = Err(Error::config("no proxy"));
        let err = res.context("building client").unwrap_err();
        assert!(err.to_string().contains("building client"));
    }
}
