// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request body encoders
//!
//! Bodies encode eagerly to bytes plus the content type to send them
//! with: [`RawBody`] for prepared payloads, [`FormBody`] for
//! urlencoded forms, [`MultipartForm`] for multipart/form-data with
//! text fields and file parts.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use bytes::{BufMut, Bytes, BytesMut};
use chrono::Utc;

use crate::error::Result;

/// Content type values for raw bodies
pub mod content_types {
    pub const TEXT: &str = "text/plain";
    pub const JAVASCRIPT: &str = "application/javascript";
    pub const JSON: &str = "application/json";
    pub const HTML: &str = "text/html";
    pub const XML: &str = "application/xml";
}

/// A prepared request body with an explicit content type
#[derive(Debug, Clone)]
pub struct RawBody {
    content: Bytes,
    content_type: String,
}

impl RawBody {
    /// Create a raw body from data and a content type
    pub fn new(data: impl Into<Bytes>, content_type: impl Into<String>) -> Self {
        Self {
            content: data.into(),
            content_type: content_type.into(),
        }
    }

    /// Get the content type
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Consume into the body bytes
    pub fn into_bytes(self) -> Bytes {
        self.content
    }
}

/// An application/x-www-form-urlencoded body
///
/// Fields keep insertion order; repeating a name produces a
/// multi-valued field.
#[derive(Debug, Clone, Default)]
pub struct FormBody {
    fields: Vec<(String, String)>,
}

impl FormBody {
    /// Create an empty form
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Get the content type
    pub fn content_type(&self) -> &'static str {
        "application/x-www-form-urlencoded"
    }

    /// Encode to the urlencoded wire form
    pub fn encode(&self) -> String {
        self.fields
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding_encode(k), urlencoding_encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// A multipart/form-data body
#[derive(Debug, Clone)]
pub struct MultipartForm {
    boundary: String,
    fields: Vec<(String, String)>,
    files: Vec<FilePart>,
}

#[derive(Debug, Clone)]
struct FilePart {
    name: String,
    file_name: String,
    data: Bytes,
}

static BOUNDARY_SEQ: AtomicU64 = AtomicU64::new(0);

/// Boundaries embed a timestamp and a process-wide counter so two
/// forms built in the same instant never collide.
fn next_boundary() -> String {
    let seq = BOUNDARY_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("keksipurkki{:x}{:08x}", Utc::now().timestamp_micros(), seq)
}

impl Default for MultipartForm {
    fn default() -> Self {
        Self::new()
    }
}

impl MultipartForm {
    /// Create an empty multipart form with a generated boundary
    pub fn new() -> Self {
        Self {
            boundary: next_boundary(),
            fields: Vec::new(),
            files: Vec::new(),
        }
    }

    /// Override the part boundary
    pub fn boundary(mut self, boundary: impl Into<String>) -> Self {
        self.boundary = boundary.into();
        self
    }

    /// Add a text field
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Add a file part from in-memory bytes
    pub fn file_bytes(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        self.files.push(FilePart {
            name: name.into(),
            file_name: file_name.into(),
            data: data.into(),
        });
        self
    }

    /// Add a file part read from disk
    ///
    /// The part's file name is the path's final component.
    pub async fn file(self, name: impl Into<String>, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_string());
        Ok(self.file_bytes(name, file_name, data))
    }

    /// Get the content type including the boundary
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Encode to the multipart wire format
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::new();
        for (name, value) in &self.fields {
            buf.put_slice(format!("--{}\r\n", self.boundary).as_bytes());
            buf.put_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
            );
            buf.put_slice(value.as_bytes());
            buf.put_slice(b"\r\n");
        }
        for part in &self.files {
            buf.put_slice(format!("--{}\r\n", self.boundary).as_bytes());
            buf.put_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                    part.name, part.file_name
                )
                .as_bytes(),
            );
            buf.put_slice(b"Content-Type: application/octet-stream\r\n\r\n");
            buf.put_slice(&part.data);
            buf.put_slice(b"\r\n");
        }
        buf.put_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        buf.freeze()
    }
}

/// URL encode a string
fn urlencoding_encode(s: &str) -> String {
    let mut result = String::new();
    for c in s.chars() {
        match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' | '~' => result.push(c),
            ' ' => result.push('+'),
            _ => {
                for byte in c.to_string().bytes() {
                    result.push_str(&format!("%{:02X}", byte));
                }
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_body() {
        let body = RawBody::new("<p>hi</p>", content_types::HTML);
        assert_eq!(body.content_type(), "text/html");
        assert_eq!(body.into_bytes(), Bytes::from("<p>hi</p>"));
    }

    #[test]
    fn test_form_body_encoding() {
        let form = FormBody::new()
            .field("name", "Ada Lovelace")
            .field("tag", "a&b")
            .field("tag", "c=d");
        assert_eq!(form.encode(), "name=Ada+Lovelace&tag=a%26b&tag=c%3Dd");
        assert_eq!(form.content_type(), "application/x-www-form-urlencoded");
    }

    #[test]
    fn test_urlencoding_multibyte() {
        assert_eq!(urlencoding_encode("ä"), "%C3%A4");
        assert_eq!(urlencoding_encode("a b"), "a+b");
    }

    #[test]
    fn test_multipart_boundaries_unique() {
        let a = MultipartForm::new();
        let b = MultipartForm::new();
        assert_ne!(a.content_type(), b.content_type());
    }

    #[test]
    fn test_multipart_wire_format() {
        let form = MultipartForm::new()
            .boundary("frontier")
            .field("greeting", "hello")
            .file_bytes("upload", "data.bin", vec![1u8, 2, 3]);

        assert_eq!(form.content_type(), "multipart/form-data; boundary=frontier");

        let encoded = form.encode();
        let text = String::from_utf8_lossy(&encoded);
        assert!(text.starts_with("--frontier\r\n"));
        assert!(text.contains("Content-Disposition: form-data; name=\"greeting\"\r\n\r\nhello\r\n"));
        assert!(text.contains(
            "Content-Disposition: form-data; name=\"upload\"; filename=\"data.bin\"\r\n"
        ));
        assert!(text.contains("Content-Type: application/octet-stream\r\n\r\n"));
        assert!(text.ends_with("--frontier--\r\n"));
    }

    #[tokio::test]
    async fn test_multipart_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        tokio::fs::write(&path, b"file contents").await.unwrap();

        let form = MultipartForm::new()
            .boundary("frontier")
            .file("doc", &path)
            .await
            .unwrap();

        let text = String::from_utf8_lossy(&form.encode()).into_owned();
        assert!(text.contains("filename=\"notes.txt\""));
        assert!(text.contains("file contents"));
    }

    #[tokio::test]
    async fn test_multipart_missing_file_errors() {
        let result = MultipartForm::new().file("doc", "/no/such/file.txt").await;
        assert!(result.is_err());
    }
}
