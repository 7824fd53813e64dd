//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain data. The core builds `HttpRequest`
//! values and renders `HttpResponse` values; the host executes the round-trip
//! with whatever HTTP stack it likes. Every request carries its own timeout
//! because each endpoint class in the probe run uses a different one.

use std::fmt;
use std::time::Duration;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// `url` is absolute and excludes the query string; `query` pairs are
/// encoded by the host. `headers` holds only the headers specific to this
/// request, the session adds its defaults on top.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub timeout: Duration,
}

impl HttpRequest {
    pub fn get(url: String, timeout: Duration) -> Self {
        Self {
            method: HttpMethod::Get,
            url,
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
            timeout,
        }
    }

    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

/// A fully received HTTP response described as plain data.
///
/// `url` is the effective request URL as reported by the host, query string
/// included.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub url: String,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// True when the server labelled the body as JSON.
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.contains("application/json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(content_type: Option<&str>) -> HttpResponse {
        HttpResponse {
            status: 200,
            url: "http://localhost:3000/".to_string(),
            content_type: content_type.map(str::to_string),
            body: Vec::new(),
        }
    }

    #[test]
    fn json_content_type_with_charset_is_json() {
        assert!(response(Some("application/json; charset=utf-8")).is_json());
    }

    #[test]
    fn missing_or_other_content_type_is_not_json() {
        assert!(!response(None).is_json());
        assert!(!response(Some("text/html")).is_json());
    }

    #[test]
    fn builder_helpers_append_in_order() {
        let req = HttpRequest::get("http://h/x".to_string(), Duration::from_secs(1))
            .with_query("a", "1")
            .with_query("b", "2")
            .with_header("range", "bytes=0-1");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(
            req.query,
            vec![("a".to_string(), "1".to_string()), ("b".to_string(), "2".to_string())]
        );
        assert_eq!(req.headers, vec![("range".to_string(), "bytes=0-1".to_string())]);
        assert!(req.body.is_none());
    }

    #[test]
    fn method_displays_uppercase() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
    }
}
