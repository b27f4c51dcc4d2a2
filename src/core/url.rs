//! URL construction and request path decoding.
//!
//! - Outbound: [`ArtifactUrl`] is the single string a render hands to the
//!   preview image, the download link and the copy field
//! - Inbound: [`request_path`] decodes the path part of a request target

use std::fmt;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use super::context::Origin;
use super::request::EncodingRequest;

/// Characters left unescaped in a query component: ASCII alphanumerics and
/// `- _ . ! ~ * ' ( )`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Path of the artifact endpoint, relative to the origin.
pub const ARTIFACT_PATH: &str = "/api/qr";

/// Percent-encode a query component (UTF-8, uppercase hex).
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Absolute URL of an artifact:
/// `{origin}/api/qr?data={encoded}&size={width}&format={png|svg}`.
///
/// A pure function of its inputs; equal inputs give byte-identical URLs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactUrl(String);

impl ArtifactUrl {
    pub fn build(origin: &Origin, request: &EncodingRequest) -> Self {
        Self(format!(
            "{origin}{ARTIFACT_PATH}?data={}&size={}&format={}",
            encode_component(request.payload()),
            request.width(),
            request.format(),
        ))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Decoded path of a request target, without query string or fragment.
///
/// Invalid UTF-8 escapes leave the path as received.
pub fn request_path(target: &str) -> String {
    let path = target.split(['?', '#']).next().unwrap_or(target);
    let decoded = percent_decode_str(path)
        .decode_utf8()
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string());
    if decoded.starts_with('/') {
        decoded
    } else {
        format!("/{decoded}")
    }
}
