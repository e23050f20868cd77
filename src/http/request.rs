// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP request types

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use url::Url;

use super::{headers, FORM_MEDIA_TYPE};
use crate::error::{Error, Result};

/// HTTP request representation
#[derive(Debug, Clone)]
pub struct Request {
    /// Request method
    pub method: Method,
    /// Request URL
    pub url: Url,
    /// Request headers
    pub headers: HeaderMap,
    /// Request body
    pub body: Option<Bytes>,
}

impl Request {
    /// Create a new GET request
    pub fn get(url: impl AsRef<str>) -> Result<Self> {
        Self::new(Method::GET, url)
    }

    /// Create a new POST request
    pub fn post(url: impl AsRef<str>) -> Result<Self> {
        Self::new(Method::POST, url)
    }

    /// Create a new request with arbitrary method
    pub fn new(method: Method, url: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            method,
            url: Url::parse(url.as_ref())?,
            headers: HeaderMap::new(),
            body: None,
        })
    }

    /// Create a request from a method name as written in a document
    pub fn with_method_name(method: &str, url: impl AsRef<str>) -> Result<Self> {
        Self::new(parse_method(method)?, url)
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

    /// Set the request body
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set an already encoded form body.
    ///
    /// A body is always sent with POST.
    pub fn form(mut self, body: impl Into<Bytes>) -> Self {
        self.method = Method::POST;
        self = self.header(headers::CONTENT_TYPE, FORM_MEDIA_TYPE);
        self.body(body)
    }

    /// Get the URL as string
    pub fn url_str(&self) -> &str {
        self.url.as_str()
    }
}

/// Parse a form method name; it must be an HTTP token
pub fn parse_method(name: &str) -> Result<Method> {
    Method::from_bytes(name.as_bytes())
        .map_err(|_| Error::malformed(format!("invalid form method '{}'", name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_creation() {
        let req = Request::get("https://example.com/path").unwrap();
        assert_eq!(req.method, Method::GET);
        assert_eq!(req.url.host_str(), Some("example.com"));
        assert!(req.body.is_none());
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
    fn test_form_body_forces_post() {
        let req = Request::get("http://h/submit").unwrap().form("a=1&b=2");
        assert_eq!(req.method, Method::POST);
        assert_eq!(req.body.as_deref(), Some(&b"a=1&b=2"[..]));
        assert_eq!(
            req.headers.get("content-type").map(|v| v.to_str().unwrap()),
            Some(FORM_MEDIA_TYPE)
        );
    }

    #[test]
    fn test_method_name() {
        let req = Request::with_method_name("PUT", "http://h/").unwrap();
        assert_eq!(req.method, Method::PUT);
        assert!(matches!(
            Request::with_method_name("BAD METHOD", "http://h/"),
            Err(Error::MalformedDocument(_))
        ));
        assert!(matches!(Request::get("not a url"), Err(Error::Url(_))));
    }

    #[test]
    fn test_parse_method() {
        assert_eq!(parse_method("POST").unwrap(), Method::POST);
        assert_eq!(parse_method("PROPFIND").unwrap().as_str(), "PROPFIND");
        for bad in ["", "GET X", "GET\t"] {
            assert!(
                matches!(parse_method(bad), Err(Error::MalformedDocument(_))),
                "{:?}",
                bad
            );
        }
    }
}
