//! HTTP responses: a transport-independent [`Reply`] and its delivery.

use crate::utils::mime::types::{HTML, PLAIN};
use anyhow::{Result, anyhow};
use tiny_http::{Header, Request, Response, StatusCode};

/// Everything the server sends for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub headers: Vec<(&'static str, String)>,
    pub body: Vec<u8>,
}

impl Reply {
    pub fn new(status: u16, content_type: &'static str, body: Vec<u8>) -> Self {
        Self {
            status,
            content_type,
            headers: Vec::new(),
            body,
        }
    }

    pub fn html(status: u16, body: String) -> Self {
        Self::new(status, HTML, body.into_bytes())
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self::new(status, PLAIN, body.as_bytes().to_vec())
    }

    /// 503 while the server drains after Ctrl+C.
    pub fn unavailable() -> Self {
        Self::text(503, "503 Service Unavailable")
    }

    pub fn with_header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    /// First header named `name`, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Send `reply`. tiny_http drops the body of HEAD responses itself.
pub fn send(request: Request, reply: Reply) -> Result<()> {
    let mut response = Response::from_data(reply.body)
        .with_status_code(StatusCode(reply.status))
        .with_header(make_header("Content-Type", reply.content_type)?);
    for (name, value) in &reply.headers {
        response.add_header(make_header(name, value)?);
    }
    request.respond(response)?;
    Ok(())
}

fn make_header(name: &str, value: &str) -> Result<Header> {
    Header::from_bytes(name.as_bytes(), value.as_bytes())
        .map_err(|()| anyhow!("invalid header {name}: {value:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_headers() {
        let reply = Reply::text(200, "ok")
            .with_header("Cache-Control", "no-store")
            .with_header("ETag", "\"abc\"");
        assert_eq!(reply.content_type, PLAIN);
        assert_eq!(reply.header("cache-control"), Some("no-store"));
        assert_eq!(reply.header("etag"), Some("\"abc\""));
        assert_eq!(reply.header("vary"), None);
    }

    #[test]
    fn test_unavailable() {
        let reply = Reply::unavailable();
        assert_eq!(reply.status, 503);
        assert_eq!(reply.body, b"503 Service Unavailable");
    }

    #[test]
    fn test_make_header_rejects_non_ascii() {
        assert!(make_header("X-Test", "fine").is_ok());
        assert!(make_header("X-Test", "café").is_err());
    }
}
