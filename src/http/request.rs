// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP request types and builder

use crate::error::Result;
use crate::http::body::{FormBody, MultipartForm, RawBody};
use crate::jar::Cookie;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// HTTP request representation
#[derive(Debug, Clone)]
pub struct Request {
    /// Request method
    pub method: Method,
    /// Request URL
    pub url: Url,
    /// Request headers
    pub headers: HeaderMap,
    /// Query parameters appended to the URL at send time
    pub params: Vec<(String, String)>,
    /// Request-scoped cookies merged after the jar's matches
    pub cookies: Vec<Cookie>,
    /// Request body
    pub body: Option<Bytes>,
    /// Request timeout override; the client config timeout applies when unset
    pub timeout: Option<Duration>,
}

impl Request {
    /// Create a new GET request
    pub fn get(url: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            method: Method::GET,
            url: Url::parse(url.as_ref())?,
            headers: HeaderMap::new(),
            params: Vec::new(),
            cookies: Vec::new(),
            body: None,
            timeout: None,
        })
    }

    /// Create a new POST request
    pub fn post(url: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            method: Method::POST,
            url: Url::parse(url.as_ref())?,
            headers: HeaderMap::new(),
            params: Vec::new(),
            cookies: Vec::new(),
            body: None,
            timeout: None,
        })
    }

    /// Create a new request with arbitrary method
    pub fn new(method: Method, url: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            method,
            url: Url::parse(url.as_ref())?,
            headers: HeaderMap::new(),
            params: Vec::new(),
            cookies: Vec::new(),
            body: None,
            timeout: None,
        })
    }

    /// Set a header
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::try_from(name.as_ref()),
            HeaderValue::try_from(value.as_ref()),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Set multiple headers
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        for (name, value) in headers {
            if let (Ok(name), Ok(value)) =
                (HeaderName::try_from(name.as_str()), HeaderValue::try_from(value.as_str()))
            {
                self.headers.insert(name, value);
            }
        }
        self
    }

    /// Add a query parameter; repeated names become multi-valued
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    /// Set HTTP basic auth credentials
    pub fn basic_auth(self, username: impl AsRef<str>, password: impl AsRef<str>) -> Self {
        let encoded = base64::Engine::encode(
            &base64::engine::general_purpose::STANDARD,
            format!("{}:{}", username.as_ref(), password.as_ref()),
        );
        self.header("authorization", format!("Basic {}", encoded))
    }

    /// Attach a cookie to this request only, without storing it in the jar
    pub fn cookie(mut self, cookie: Cookie) -> Self {
        self.cookies.push(cookie);
        self
    }

    /// Set the request body
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set JSON body
    pub fn json<T: Serialize>(mut self, data: &T) -> Result<Self> {
        let json = serde_json::to_vec(data)?;
        self.body = Some(Bytes::from(json));
        self = self.header("content-type", "application/json");
        Ok(self)
    }

    /// Set a raw body with its content type
    pub fn raw(mut self, body: RawBody) -> Self {
        let content_type = body.content_type().to_string();
        self.body = Some(body.into_bytes());
        self.header("content-type", content_type)
    }

    /// Set urlencoded form body
    pub fn form(mut self, form: FormBody) -> Self {
        let content_type = form.content_type();
        self.body = Some(Bytes::from(form.encode()));
        self.header("content-type", content_type)
    }

    /// Set multipart form body
    pub fn multipart(mut self, form: MultipartForm) -> Self {
        let content_type = form.content_type();
        self.body = Some(form.encode());
        self.header("content-type", content_type)
    }

    /// Set timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// URL with the query parameters applied
    pub(crate) fn effective_url(&self) -> Url {
        let mut url = self.url.clone();
        if !self.params.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(self.params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_creation() {
        let req = Request::get("https://example.com/path").unwrap();
        assert_eq!(req.method, Method::GET);
        assert_eq!(req.url.host_str(), Some("example.com"));
    }

    #[test]
    fn test_request_headers() {
        let req = Request::get("https://example.com")
            .unwrap()
            .header("x-custom", "value");
        assert_eq!(
            req.headers.get("x-custom").map(|v| v.to_str().unwrap()),
            Some("value")
        );
    }

    #[test]
    fn test_query_params_applied() {
        let req = Request::get("https://example.com/search")
            .unwrap()
            .param("q", "cookie jar")
            .param("page", "2");
        assert_eq!(
            req.effective_url().as_str(),
            "https://example.com/search?q=cookie+jar&page=2"
        );
    }

    #[test]
    fn test_query_params_append_to_existing() {
        let req = Request::get("https://example.com/s?a=1")
            .unwrap()
            .param("b", "2");
        assert_eq!(req.effective_url().as_str(), "https://example.com/s?a=1&b=2");
    }

    #[test]
    fn test_basic_auth_header() {
        let req = Request::get("https://example.com")
            .unwrap()
            .basic_auth("user", "pass");
        assert_eq!(
            req.headers.get("authorization").map(|v| v.to_str().unwrap()),
            Some("Basic dXNlcjpwYXNz")
        );
    }

    #[test]
    fn test_json_body() {
        let mut data = HashMap::new();
        data.insert("key", "value");
        let req = Request::post("https://example.com").unwrap().json(&data).unwrap();
        assert_eq!(
            req.headers.get("content-type").map(|v| v.to_str().unwrap()),
            Some("application/json")
        );
        assert!(req.body.is_some());
    }

    #[test]
    fn test_form_body_content_type() {
        let req = Request::post("https://example.com")
            .unwrap()
            .form(FormBody::new().field("a", "1").field("a", "2"));
        assert_eq!(
            req.headers.get("content-type").map(|v| v.to_str().unwrap()),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(req.body.as_deref(), Some(&b"a=1&a=2"[..]));
    }

    #[test]
    fn test_multipart_body_content_type() {
        let req = Request::post("https://example.com")
            .unwrap()
            .multipart(MultipartForm::new().field("a", "1"));
        let content_type = req
            .headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap();
        assert!(content_type.starts_with("multipart/form-data; boundary="));
    }

    #[test]
    fn test_request_cookie() {
        let req = Request::get("https://example.com")
            .unwrap()
            .cookie(Cookie::new("session", "abc"));
        assert_eq!(req.cookies.len(), 1);
        assert_eq!(req.cookies[0].name, "session");
    }
}
