// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Buffered HTTP responses

use std::path::{Path, PathBuf};

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::headers;
use crate::error::{Error, Result};

/// A fully buffered HTTP response
///
/// The body is read to completion before this type is handed out, so
/// every accessor is synchronous and infallible except where decoding
/// can fail.
#[derive(Debug, Clone)]
pub struct Response {
    /// Status returned by the server
    pub status: StatusCode,
    /// Headers as received
    pub headers: HeaderMap,
    /// Complete response body
    pub body: Bytes,
    /// URL the body came from, after any redirects
    pub url: Url,
    /// Whether at least one redirect was followed
    pub redirected: bool,
    /// Milliseconds from sending the request to the body being read
    pub response_time_ms: u64,
}

impl Response {
    /// Assemble a response from its parts
    pub fn new(
        status: StatusCode,
        headers: HeaderMap,
        body: Bytes,
        url: Url,
        redirected: bool,
        response_time_ms: u64,
    ) -> Self {
        Self {
            status,
            headers,
            body,
            url,
            redirected,
            response_time_ms,
        }
    }

    /// True for 2xx statuses
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Status as a plain number
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Body decoded as UTF-8, rejecting invalid byte sequences
    pub fn text(&self) -> Result<String> {
        let text = std::str::from_utf8(&self.body)
            .map_err(|e| Error::other(format!("Body is not valid UTF-8: {}", e)))?;
        Ok(text.to_owned())
    }

    /// Body decoded as UTF-8 with invalid sequences replaced
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Body deserialized from JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// First value of a header, if present and valid UTF-8
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Value of the Content-Type header
    pub fn content_type(&self) -> Option<&str> {
        self.header(headers::CONTENT_TYPE)
    }

    /// Every Set-Cookie header value on this response
    ///
    /// Set-Cookie is the one header that legitimately repeats, and the
    /// values carry the attribute text verbatim for cookie parsing.
    pub fn set_cookies(&self) -> Vec<&str> {
        self.headers
            .get_all(headers::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect()
    }

    /// Number of body bytes
    pub fn body_len(&self) -> usize {
        self.body.len()
    }

    /// Write the body to a file under `dir` and return the written path
    ///
    /// The file name defaults to the last segment of the final URL's
    /// path, or `download.tmp` when the path has none. Responses with
    /// a non-OK status are rejected instead of written.
    pub async fn save_to_file(
        &self,
        dir: impl AsRef<Path>,
        file_name: Option<&str>,
    ) -> Result<PathBuf> {
        if self.status != StatusCode::OK {
            return Err(Error::DownloadFailed {
                status: self.status.as_u16(),
            });
        }
        let name = match file_name {
            Some(name) => name.to_string(),
            None => self.default_file_name(),
        };
        let path = dir.as_ref().join(name);
        tokio::fs::write(&path, &self.body).await?;
        debug!(path = %path.display(), bytes = self.body.len(), "saved response body");
        Ok(path)
    }

    /// File name derived from the final URL's path
    pub fn default_file_name(&self) -> String {
        let name = self
            .url
            .path()
            .trim_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or("");
        if name.is_empty() {
            "download.tmp".to_string()
        } else {
            name.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_for(url: &str, status: StatusCode, body: &'static str) -> Response {
        Response::new(
            status,
            HeaderMap::new(),
            Bytes::from(body),
            Url::parse(url).unwrap(),
            false,
            100,
        )
    }

    #[test]
    fn test_response_status() {
        let resp = response_for("https://example.com", StatusCode::OK, "");
        assert!(resp.is_success());
        assert_eq!(resp.status_code(), 200);

        let resp = response_for("https://example.com", StatusCode::NOT_FOUND, "");
        assert!(!resp.is_success());
    }

    #[test]
    fn test_response_text() {
        let resp = response_for("https://example.com", StatusCode::OK, "Hello, World!");
        assert_eq!(resp.text().unwrap(), "Hello, World!");
        assert_eq!(resp.text_lossy(), "Hello, World!");

        let mut bad = response_for("https://example.com", StatusCode::OK, "");
        bad.body = Bytes::from_static(&[0xff, 0xfe]);
        assert!(bad.text().is_err());
        assert_eq!(bad.text_lossy(), "\u{fffd}\u{fffd}");
    }

    #[test]
    fn test_response_json() {
        let mut resp = response_for("https://example.com", StatusCode::OK, r#"{"id": 7}"#);
        resp.headers
            .insert("content-type", "application/json".parse().unwrap());

        assert_eq!(resp.content_type(), Some("application/json"));
        let value: serde_json::Value = resp.json().unwrap();
        assert_eq!(value["id"], 7);
    }

    #[test]
    fn test_set_cookie_headers() {
        let mut headers = HeaderMap::new();
        headers.append("set-cookie", "a=1; Path=/".parse().unwrap());
        headers.append("set-cookie", "b=2; Secure".parse().unwrap());
        let resp = Response::new(
            StatusCode::OK,
            headers,
            Bytes::new(),
            Url::parse("https://example.com").unwrap(),
            false,
            100,
        );
        assert_eq!(resp.set_cookies(), vec!["a=1; Path=/", "b=2; Secure"]);
    }

    #[test]
    fn test_default_file_name() {
        let resp = response_for("https://example.com/files/report.pdf", StatusCode::OK, "");
        assert_eq!(resp.default_file_name(), "report.pdf");

        let resp = response_for("https://example.com/dir/", StatusCode::OK, "");
        assert_eq!(resp.default_file_name(), "dir");

        let resp = response_for("https://example.com/", StatusCode::OK, "");
        assert_eq!(resp.default_file_name(), "download.tmp");
    }

    #[tokio::test]
    async fn test_save_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let resp = response_for("https://example.com/data.bin", StatusCode::OK, "payload");

        let path = resp.save_to_file(dir.path(), None).await.unwrap();
        assert!(path.ends_with("data.bin"));
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"payload");

        let named = resp.save_to_file(dir.path(), Some("other.bin")).await.unwrap();
        assert_eq!(tokio::fs::read(&named).await.unwrap(), b"payload");
    }

    #[tokio::test]
    async fn test_save_to_file_rejects_error_status() {
        let dir = tempfile::tempdir().unwrap();
        let resp = response_for("https://example.com/missing", StatusCode::NOT_FOUND, "nope");

        let err = resp.save_to_file(dir.path(), None).await.unwrap_err();
        assert!(matches!(err, Error::DownloadFailed { status: 404 }));
    }
}
