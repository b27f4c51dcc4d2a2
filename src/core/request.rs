//! Normalized encoding requests.
//!
//! Raw query values arrive as optional strings. [`normalize`] turns them
//! into an [`EncodingRequest`] that every downstream component can trust:
//! the payload is non-empty, the width is clamped and the format is one of
//! the two supported variants.

use std::fmt;

use crate::utils::mime;

/// Width used when the raw value has no leading integer.
pub const DEFAULT_WIDTH: i32 = 300;

/// Largest width ever produced; anything from 10000 up clamps here.
pub const MAX_WIDTH: i32 = 9999;

/// Artifact format. Anything that isn't exactly `svg` is raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Format {
    #[default]
    Raster,
    Vector,
}

impl Format {
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            Some("svg") => Self::Vector,
            _ => Self::Raster,
        }
    }

    /// Query/file extension token.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Raster => "png",
            Self::Vector => "svg",
        }
    }

    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Raster => mime::types::PNG,
            Self::Vector => mime::types::SVG,
        }
    }

    /// Suggested file name for downloads.
    pub fn download_name(self) -> String {
        format!("qrcode.{}", self.as_str())
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully defaulted request. Only [`normalize`] constructs one, so the
/// invariants (non-empty payload, width at most [`MAX_WIDTH`]) always hold.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EncodingRequest {
    payload: String,
    width: i32,
    format: Format,
}

impl EncodingRequest {
    #[inline]
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Requested edge length in pixels. May be zero or negative; the
    /// encoder rejects those.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn format(&self) -> Format {
        self.format
    }
}

/// Build a request from raw parameters.
///
/// An absent or empty payload falls back to `fallback_payload`, which the
/// caller derives from the request context.
pub fn normalize(
    raw_payload: Option<&str>,
    raw_width: Option<&str>,
    raw_format: Option<&str>,
    fallback_payload: &str,
) -> EncodingRequest {
    let payload = match raw_payload {
        Some(data) if !data.is_empty() => data.to_string(),
        _ => fallback_payload.to_string(),
    };
    EncodingRequest {
        payload,
        width: parse_width(raw_width),
        format: Format::from_param(raw_format),
    }
}

/// Leading-integer parse with a default and an upper clamp.
///
/// `"12abc"` is 12, `" 42"` is 42, `"abc"` is [`DEFAULT_WIDTH`] and anything
/// from 10000 up is [`MAX_WIDTH`]. Negative values pass through.
pub fn parse_width(raw: Option<&str>) -> i32 {
    match raw.and_then(leading_integer) {
        None => DEFAULT_WIDTH,
        Some(n) if n > i64::from(MAX_WIDTH) => MAX_WIDTH,
        Some(n) => n.max(i64::from(i32::MIN)) as i32,
    }
}

/// Optional sign followed by at least one ASCII digit, after leading
/// whitespace. Saturates instead of overflowing.
fn leading_integer(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let len = digits.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 {
        return None;
    }
    let magnitude = digits[..len].bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn width(raw: &str) -> i32 {
        parse_width(Some(raw))
    }

    #[test]
    fn test_width_defaults() {
        assert_eq!(parse_width(None), 300);
        assert_eq!(width(""), 300);
        assert_eq!(width("abc"), 300);
        assert_eq!(width("-"), 300);
    }

    #[test]
    fn test_width_leading_integer() {
        assert_eq!(width("500"), 500);
        assert_eq!(width("12abc"), 12);
        assert_eq!(width(" 42"), 42);
        assert_eq!(width("+7"), 7);
        assert_eq!(width("3.9"), 3);
        assert_eq!(width("0"), 0);
        assert_eq!(width("-5"), -5);
    }

    #[test]
    fn test_width_clamp() {
        assert_eq!(width("9999"), 9999);
        assert_eq!(width("10000"), 9999);
        assert_eq!(width("99999999999999999999999"), 9999);
        assert_eq!(width("-99999999999999999999999"), i32::MIN);
    }

    #[test]
    fn test_format() {
        assert_eq!(Format::from_param(Some("svg")), Format::Vector);
        assert_eq!(Format::from_param(Some("png")), Format::Raster);
        assert_eq!(Format::from_param(Some("SVG")), Format::Raster);
        assert_eq!(Format::from_param(Some("gif")), Format::Raster);
        assert_eq!(Format::from_param(None), Format::Raster);
        assert_eq!(Format::Vector.download_name(), "qrcode.svg");
    }

    #[test]
    fn test_normalize_fallback() {
        let fallback = "http://localhost:8000/";
        let req = normalize(None, None, None, fallback);
        assert_eq!(req.payload(), fallback);
        assert_eq!(req.width(), 300);
        assert_eq!(req.format(), Format::Raster);

        let req = normalize(Some(""), Some("120"), Some("svg"), fallback);
        assert_eq!(req.payload(), fallback);
        assert_eq!(req.width(), 120);
        assert_eq!(req.format(), Format::Vector);
    }

    #[test]
    fn test_normalize_keeps_payload_verbatim() {
        let req = normalize(Some("  hello & 世界 "), Some("12abc"), Some("png"), "x");
        assert_eq!(req.payload(), "  hello & 世界 ");
        assert_eq!(req.width(), 12);
    }
}
