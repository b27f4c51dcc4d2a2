//! Request context: where the service is reachable and who is asking.

use std::fmt;

use crate::view::{Lang, Messages};

use super::request::EncodingRequest;
use super::url::ArtifactUrl;

/// Normalized mount path: empty, or `/seg[/seg...]` without a trailing slash.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PathPrefix(String);

impl PathPrefix {
    /// Normalize any spelling of a prefix.
    ///
    /// `""`, `"/"` -> `""`; `"qr"`, `"/qr/"` -> `"/qr"`; `"a//b"` -> `"/a/b"`
    pub fn new(raw: &str) -> Self {
        let parts: Vec<&str> = raw.split('/').filter(|s| !s.trim().is_empty()).collect();
        if parts.is_empty() {
            Self::default()
        } else {
            Self(format!("/{}", parts.join("/")))
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Remove the prefix from a request path.
    ///
    /// Paths outside the prefix come back unchanged, so a proxy that already
    /// stripped the prefix still routes correctly.
    pub fn strip<'a>(&self, path: &'a str) -> &'a str {
        if self.is_empty() {
            return path;
        }
        match path.strip_prefix(self.0.as_str()) {
            Some("") => "/",
            Some(rest) if rest.starts_with('/') => rest,
            _ => path,
        }
    }
}

impl fmt::Display for PathPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Scheme, host and path prefix of the service, e.g. `https://example.com/qr`.
/// Never ends with a slash.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Origin(String);

impl Origin {
    pub fn new(scheme: &str, host: &str, prefix: &PathPrefix) -> Self {
        Self(format!("{scheme}://{host}{prefix}"))
    }

    /// Parse an absolute base URL. A non-root path in `base` wins over
    /// `fallback`, so `https://example.com/qr/` mounts at `/qr`.
    ///
    /// Returns `None` for relative, host-less or non-http(s) URLs.
    pub fn parse(base: &str, fallback: &PathPrefix) -> Option<(Self, PathPrefix)> {
        let parsed = url::Url::parse(base).ok()?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return None;
        }
        let host = parsed.host_str()?;
        let host = match parsed.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };
        let from_url = PathPrefix::new(parsed.path());
        let prefix = if from_url.is_empty() {
            fallback.clone()
        } else {
            from_url
        };
        Some((Self::new(parsed.scheme(), &host, &prefix), prefix))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Payload used when a request names none.
///
/// Without a prefix this is the full URL of the current request; behind a
/// prefix it is the service root, `{origin}/`.
pub fn fallback_payload(origin: &Origin, prefix: &PathPrefix, request_url: &str) -> String {
    if prefix.is_empty() {
        request_url.to_string()
    } else {
        format!("{origin}/")
    }
}

/// Everything a view needs to render one request.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub lang: Lang,
    /// Base for artifact URLs.
    pub origin: Origin,
    /// Mount path for links back into this service.
    pub prefix: PathPrefix,
    pub request: EncodingRequest,
}

impl RenderContext {
    #[inline]
    pub fn messages(&self) -> &'static Messages {
        self.lang.messages()
    }

    /// The one artifact URL every consumer of this render shares.
    pub fn artifact_url(&self) -> ArtifactUrl {
        ArtifactUrl::build(&self.origin, &self.request)
    }
}
