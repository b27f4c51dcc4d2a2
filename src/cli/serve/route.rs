//! Request routing.
//!
//! | Path                | Reply                                        |
//! |---------------------|----------------------------------------------|
//! | `/`                 | full page                                    |
//! | `/fragments/qr`     | preview region only                          |
//! | `/api/qr`           | PNG or SVG artifact, 500 with message        |
//! | anything else       | file from `static_dir`, else the 404 page    |
//!
//! Paths are matched after removing the configured prefix, so the server
//! works whether or not the proxy strips it.

use tiny_http::{Method, Request};

use super::path::resolve_path;
use super::response::Reply;
use crate::artifact::{self, CACHE_NONE, EncoderOptions, etag, respond};
use crate::config::AppConfig;
use crate::core::{
    ARTIFACT_PATH, Origin, PathPrefix, RenderContext, fallback_payload, normalize, request_path,
};
use crate::utils::mime;
use crate::view::{Lang, render_fragment, render_not_found, render_page};

/// The parts of an HTTP request routing looks at.
#[derive(Debug, Clone)]
pub struct Incoming {
    pub method: Method,
    /// Raw request target: path plus query string.
    pub target: String,
    pub host: Option<String>,
    pub forwarded_proto: Option<String>,
    pub accept_language: Option<String>,
    pub if_none_match: Option<String>,
}

impl Incoming {
    /// Capture a tiny_http request. `local` stands in for a missing `Host`.
    pub fn from_request(request: &Request, local: &str) -> Self {
        let header = |name: &str| {
            request
                .headers()
                .iter()
                .find(|h| h.field.as_str().as_str().eq_ignore_ascii_case(name))
                .map(|h| h.value.to_string())
        };
        Self {
            method: request.method().clone(),
            target: request.url().to_string(),
            host: header("Host").or_else(|| Some(local.to_string())),
            forwarded_proto: header("X-Forwarded-Proto"),
            accept_language: header("Accept-Language"),
            if_none_match: header("If-None-Match"),
        }
    }

    /// `https` only when a proxy says so.
    fn scheme(&self) -> &'static str {
        let proto = self
            .forwarded_proto
            .as_deref()
            .and_then(|v| v.split(',').next())
            .map(str::trim);
        match proto {
            Some(p) if p.eq_ignore_ascii_case("https") => "https",
            _ => "http",
        }
    }

    fn host(&self) -> &str {
        self.host.as_deref().unwrap_or("localhost")
    }

    /// Absolute URL of this request as the client addressed it.
    fn absolute_url(&self) -> String {
        format!("{}://{}{}", self.scheme(), self.host(), self.target)
    }
}

/// Query parameters the service understands. Repeated keys keep their
/// first value.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Query {
    pub data: Option<String>,
    pub size: Option<String>,
    pub format: Option<String>,
    pub url_prefix: Option<String>,
    pub seq: Option<String>,
}

impl Query {
    pub fn parse(target: &str) -> Self {
        let mut query = Self::default();
        let Some((_, raw)) = target.split_once('?') else {
            return query;
        };
        let raw = raw.split('#').next().unwrap_or(raw);

        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            let slot = match key.as_ref() {
                "data" => &mut query.data,
                "size" => &mut query.size,
                "format" => &mut query.format,
                "url_prefix" => &mut query.url_prefix,
                "seq" => &mut query.seq,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        query
    }
}

/// Route one request.
pub fn route(incoming: &Incoming, config: &AppConfig) -> Reply {
    if incoming.method != Method::Get && incoming.method != Method::Head {
        return Reply::text(405, "405 Method Not Allowed").with_header("Allow", "GET, HEAD");
    }

    let prefix = config.path_prefix();
    let decoded = request_path(&incoming.target);
    let path = prefix.strip(&decoded);
    let query = Query::parse(&incoming.target);

    if let Some(view) = path.strip_prefix("/fragments/") {
        return match view {
            "qr" => fragment(incoming, &query, config),
            _ => not_found(&prefix),
        };
    }

    match path {
        "/" => {
            let ctx = render_context(incoming, &query, prefix);
            Reply::html(200, render_page(&ctx)).with_header("Vary", "Accept-Language")
        }
        ARTIFACT_PATH => artifact(incoming, &query, config, prefix),
        _ => static_file(path, config).unwrap_or_else(|| not_found(&prefix)),
    }
}

/// Origin, locale and normalized request for one render.
fn render_context(incoming: &Incoming, query: &Query, prefix: PathPrefix) -> RenderContext {
    let origin = Origin::new(incoming.scheme(), incoming.host(), &prefix);
    let fallback = fallback_payload(&origin, &prefix, &incoming.absolute_url());
    let request = normalize(
        query.data.as_deref(),
        query.size.as_deref(),
        query.format.as_deref(),
        &fallback,
    );
    RenderContext {
        lang: Lang::from_accept_language(incoming.accept_language.as_deref()),
        origin,
        prefix,
        request,
    }
}

/// The preview region. A `url_prefix` parameter overrides the configured
/// prefix for this render; `seq` is echoed back to the client.
fn fragment(incoming: &Incoming, query: &Query, config: &AppConfig) -> Reply {
    let prefix = match query.url_prefix.as_deref() {
        Some(raw) => PathPrefix::new(raw),
        None => config.path_prefix(),
    };
    let seq = query.seq.as_deref().and_then(|s| s.trim().parse().ok());
    let ctx = render_context(incoming, query, prefix);
    Reply::html(200, render_fragment(&ctx, seq))
        .with_header("Cache-Control", CACHE_NONE)
        .with_header("Vary", "Accept-Language")
}

fn artifact(incoming: &Incoming, query: &Query, config: &AppConfig, prefix: PathPrefix) -> Reply {
    let ctx = render_context(incoming, query, prefix);
    let options = EncoderOptions::from_config(config);
    let tag = etag(&ctx.request, &options);

    // Encode before honoring If-None-Match so `*` never masks a failure.
    let response = respond(artifact::encode(&ctx.request, &options));
    if !response.is_success() {
        return Reply::new(response.status, response.content_type, response.body)
            .with_header("Cache-Control", response.cache_control);
    }

    if let Some(candidates) = incoming.if_none_match.as_deref()
        && matches_etag(candidates, &tag)
    {
        return Reply::new(304, response.content_type, Vec::new())
            .with_header("ETag", tag)
            .with_header("Cache-Control", response.cache_control);
    }

    Reply::new(response.status, response.content_type, response.body)
        .with_header("Cache-Control", response.cache_control)
        .with_header("ETag", tag)
}

/// `If-None-Match` holds `*` or a comma-separated list of entity tags,
/// possibly weak.
fn matches_etag(header: &str, tag: &str) -> bool {
    header.split(',').map(str::trim).any(|candidate| {
        candidate == "*" || candidate.strip_prefix("W/").unwrap_or(candidate) == tag
    })
}

fn static_file(path: &str, config: &AppConfig) -> Option<Reply> {
    let file = resolve_path(path, config.static_dir())?;
    let body = std::fs::read(&file).ok()?;
    Some(Reply::new(200, mime::from_path(&file), body))
}

fn not_found(prefix: &PathPrefix) -> Reply {
    Reply::html(404, render_not_found(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use crate::core::ArtifactUrl;
    use crate::qr::{self, EcLevel};
    use crate::utils::mime::types::{HTML, PLAIN, PNG, SVG};

    fn get(target: &str) -> Incoming {
        Incoming {
            method: Method::Get,
            target: target.to_string(),
            host: Some("localhost:8000".into()),
            forwarded_proto: None,
            accept_language: None,
            if_none_match: None,
        }
    }

    fn config(content: &str) -> AppConfig {
        let mut config = test_parse_config(content);
        config.serve.path_prefix = config.path_prefix().to_string();
        config.serve.static_dir = "/nonexistent-static-root".into();
        config
    }

    fn body(reply: &Reply) -> &str {
        std::str::from_utf8(&reply.body).unwrap()
    }

    /// Decode a PNG artifact, sized for `expected` at the default level
    /// and quiet zone, and compare.
    fn assert_png_payload(bytes: &[u8], expected: &str) {
        let size = qr::encode(expected, EcLevel::M).unwrap().size();
        let image = ::image::load_from_memory(bytes).unwrap().to_luma8();
        let module = f64::from(image.width()) / (size + 8) as f64;
        let text = qr::read::decode(size, |x, y| {
            let px = ((x + 4) as f64 + 0.5) * module;
            let py = ((y + 4) as f64 + 0.5) * module;
            image.get_pixel(px as u32, py as u32).0[0] < 128
        })
        .unwrap();
        assert_eq!(text, expected);
    }

    #[test]
    fn test_query_parse() {
        let query = Query::parse("/api/qr?data=a%20b+c&size=12&data=second&x=1#frag");
        assert_eq!(query.data.as_deref(), Some("a b c"));
        assert_eq!(query.size.as_deref(), Some("12"));
        assert_eq!(query.format, None);
        assert_eq!(Query::parse("/"), Query::default());
    }

    #[test]
    fn test_artifact_default_request() {
        let reply = route(&get("/api/qr?data=&size=300&format=png"), &config(""));
        assert_eq!(reply.status, 200);
        assert_eq!(reply.content_type, PNG);
        assert_eq!(reply.header("Cache-Control"), Some(artifact::CACHE_IMMUTABLE));
        assert!(reply.header("ETag").is_some());
        // empty data falls back to the full request URL
        assert_png_payload(
            &reply.body,
            "http://localhost:8000/api/qr?data=&size=300&format=png",
        );
    }

    #[test]
    fn test_artifact_url_roundtrip() {
        let config = config("");
        let request = normalize(Some("héllo wörld & more+"), Some("200"), None, "");
        let origin = Origin::new("http", "localhost:8000", &PathPrefix::default());
        let url = ArtifactUrl::build(&origin, &request);
        let target = url.as_str().trim_start_matches("http://localhost:8000");

        let reply = route(&get(target), &config);
        assert_eq!(reply.status, 200);
        assert_png_payload(&reply.body, "héllo wörld & more+");
    }

    #[test]
    fn test_artifact_svg_clamped() {
        let reply = route(&get("/api/qr?data=hi&size=15000&format=svg"), &config(""));
        assert_eq!(reply.status, 200);
        assert_eq!(reply.content_type, SVG);
        let svg = body(&reply);
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("9999"));
    }

    #[test]
    fn test_artifact_errors() {
        let too_long = "a".repeat(3000);
        let reply = route(&get(&format!("/api/qr?data={too_long}")), &config(""));
        assert_eq!(reply.status, 500);
        assert_eq!(reply.content_type, PLAIN);
        assert_eq!(reply.header("Cache-Control"), Some(CACHE_NONE));
        assert!(reply.header("ETag").is_none());
        assert!(body(&reply).contains("too big"));

        let reply = route(&get("/api/qr?data=x&size=-5"), &config(""));
        assert_eq!(reply.status, 500);
        assert!(!reply.body.is_empty());
    }

    #[test]
    fn test_artifact_not_modified() {
        let config = config("");
        let first = route(&get("/api/qr?data=x"), &config);
        let tag = first.header("ETag").unwrap().to_string();

        let mut again = get("/api/qr?data=x");
        again.if_none_match = Some(format!("\"other\", W/{tag}"));
        let reply = route(&again, &config);
        assert_eq!(reply.status, 304);
        assert!(reply.body.is_empty());
        assert_eq!(reply.header("ETag"), Some(tag.as_str()));

        again.if_none_match = Some("\"other\"".into());
        assert_eq!(route(&again, &config).status, 200);
    }

    #[test]
    fn test_wildcard_match_still_reports_errors() {
        let config = config("");
        let too_long = "a".repeat(3000);
        for target in [format!("/api/qr?data={too_long}"), "/api/qr?data=x&size=-5".into()] {
            let mut incoming = get(&target);
            incoming.if_none_match = Some("*".into());
            let reply = route(&incoming, &config);
            assert_eq!(reply.status, 500);
            assert_eq!(reply.content_type, PLAIN);
            assert!(!reply.body.is_empty());
            assert!(reply.header("ETag").is_none());
        }

        let mut incoming = get("/api/qr?data=x");
        incoming.if_none_match = Some("*".into());
        assert_eq!(route(&incoming, &config).status, 304);
    }

    #[test]
    fn test_small_svg_keeps_requested_width() {
        let reply = route(&get("/api/qr?data=hi&size=5&format=svg"), &config(""));
        assert_eq!(reply.status, 200);
        assert!(body(&reply).contains(r#"width="5""#));
    }

    #[test]
    fn test_page() {
        let reply = route(&get("/"), &config(""));
        assert_eq!(reply.status, 200);
        assert_eq!(reply.content_type, HTML);
        let html = body(&reply);
        assert!(html.contains(
            "http://localhost:8000/api/qr?data=http%3A%2F%2Flocalhost%3A8000%2F&amp;size=300&amp;format=png"
        ));
    }

    #[test]
    fn test_page_behind_prefix() {
        let config = config("[serve]\npath_prefix = \"qr\"");
        let mut incoming = get("/qr/");
        incoming.forwarded_proto = Some("https, http".into());
        incoming.host = Some("example.com".into());

        let html_prefixed = body(&route(&incoming, &config)).to_string();
        // the proxy may strip the prefix or not
        incoming.target = "/".into();
        let html_stripped = body(&route(&incoming, &config)).to_string();

        assert_eq!(html_prefixed, html_stripped);
        assert!(html_prefixed.contains(
            "https://example.com/qr/api/qr?data=https%3A%2F%2Fexample.com%2Fqr%2F"
        ));
    }

    #[test]
    fn test_fragment() {
        let reply = route(
            &get("/fragments/qr?data=hello&size=120&format=svg&seq=7"),
            &config(""),
        );
        assert_eq!(reply.status, 200);
        let html = body(&reply);
        assert!(html.contains("data-seq=\"7\""));
        assert!(html.contains("data-state=\"loading\""));
        assert!(html.contains("http://localhost:8000/api/qr?data=hello&amp;size=120&amp;format=svg"));
        assert!(html.contains("qrcode.svg"));
    }

    #[test]
    fn test_fragment_prefix_override() {
        let reply = route(&get("/fragments/qr?url_prefix=/tools"), &config(""));
        let html = body(&reply);
        assert!(html.contains("http://localhost:8000/tools/api/qr?data=http%3A%2F%2Flocalhost%3A8000%2Ftools%2F"));
    }

    #[test]
    fn test_fragment_locale() {
        let mut incoming = get("/fragments/qr?data=x");
        incoming.accept_language = Some("ja-JP,ja;q=0.9".into());
        let ja = body(&route(&incoming, &config(""))).to_string();
        let en = body(&route(&get("/fragments/qr?data=x"), &config(""))).to_string();
        assert_ne!(ja, en);
    }

    #[test]
    fn test_localized_bodies_vary() {
        let config = config("");
        for target in ["/", "/fragments/qr?data=x"] {
            let reply = route(&get(target), &config);
            assert_eq!(reply.header("Vary"), Some("Accept-Language"));
        }
    }

    #[test]
    fn test_not_found() {
        let config = config("");
        for target in ["/missing", "/fragments/other", "/styles.css"] {
            let reply = route(&get(target), &config);
            assert_eq!(reply.status, 404, "{target}");
            assert_eq!(reply.content_type, HTML);
            assert!(body(&reply).contains("404"));
        }
    }

    #[test]
    fn test_static_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("styles.css"), "body{}").unwrap();
        let mut config = config("[serve]\npath_prefix = \"/qr\"");
        config.serve.static_dir = dir.path().to_path_buf();

        let reply = route(&get("/qr/styles.css"), &config);
        assert_eq!(reply.status, 200);
        assert_eq!(reply.content_type, mime::types::CSS);
        assert_eq!(reply.body, b"body{}");

        assert_eq!(route(&get("/qr/%2e%2e/secret"), &config).status, 404);
    }

    #[test]
    fn test_method_not_allowed() {
        let mut incoming = get("/api/qr");
        incoming.method = Method::Post;
        let reply = route(&incoming, &config(""));
        assert_eq!(reply.status, 405);
        assert_eq!(reply.header("Allow"), Some("GET, HEAD"));
    }
}
