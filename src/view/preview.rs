//! The artifact region: preview image, copy field and download link.

use crate::core::RenderContext;
use crate::embed::view::{PREVIEW_HTML, PreviewVars};
use crate::utils::html::{escape, escape_attr};

use super::PreviewState;

/// Render the preview region for `ctx` in `state`.
///
/// The artifact URL is computed once and escaped once; the same string
/// lands in the region's `data-qr-url`, the image source, the copy field
/// and the download link.
pub fn render_preview(ctx: &RenderContext, state: &PreviewState) -> String {
    let messages = ctx.messages();
    let url = ctx.artifact_url();

    PREVIEW_HTML.render(&PreviewVars {
        qr_url: escape_attr(url.as_str()).into_owned(),
        seq: state.latest().to_string(),
        state: state.phase().as_str(),
        prefix: escape_attr(ctx.prefix.as_str()).into_owned(),
        download_name: ctx.request.format().download_name(),
        loading: escape(messages.feedback.loading).into_owned(),
        qr_error: escape(messages.feedback.qr_error).into_owned(),
        label_copy: escape_attr(messages.labels.copy).into_owned(),
        label_download: escape_attr(messages.labels.download).into_owned(),
    })
}

/// Fragment answering a re-submission. `seq` is the client's submission
/// number and is echoed back as the region's `data-seq`.
pub fn render_fragment(ctx: &RenderContext, seq: Option<u64>) -> String {
    let mut state = PreviewState::resume(seq.unwrap_or(0));
    state.submit();
    render_preview(ctx, &state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Origin, PathPrefix, normalize};
    use crate::view::Lang;

    fn context(data: &str, size: &str, format: &str, lang: Lang) -> RenderContext {
        let prefix = PathPrefix::default();
        RenderContext {
            lang,
            origin: Origin::new("http", "localhost:8000", &prefix),
            prefix,
            request: normalize(Some(data), Some(size), Some(format), ""),
        }
    }

    /// Value of the first `name="..."` attribute following `anchor`.
    fn attr_after<'a>(html: &'a str, anchor: &str, name: &str) -> &'a str {
        let from = html.find(anchor).unwrap();
        let needle = format!("{name}=\"");
        let start = from + html[from..].find(&needle).unwrap() + needle.len();
        let end = start + html[start..].find('"').unwrap();
        &html[start..end]
    }

    #[test]
    fn test_single_url_everywhere() {
        let ctx = context("a&b <c>", "250", "svg", Lang::En);
        let html = render_fragment(&ctx, Some(3));
        let expected = "http://localhost:8000/api/qr?data=a%26b%20%3Cc%3E&amp;size=250&amp;format=svg";

        assert_eq!(attr_after(&html, "id=\"qr-preview\"", "data-qr-url"), expected);
        assert_eq!(attr_after(&html, "id=\"qr-img\"", "src"), expected);
        assert_eq!(attr_after(&html, "id=\"qr-url-input\"", "value"), expected);
        assert_eq!(attr_after(&html, "id=\"download-link\"", "href"), expected);
        assert_eq!(html.matches(expected).count(), 4);
    }

    #[test]
    fn test_fragment_echoes_seq() {
        let ctx = context("x", "300", "png", Lang::En);
        let html = render_fragment(&ctx, Some(7));
        assert!(html.starts_with("<div id=\"preview-shell\">"));
        assert!(html.contains("data-seq=\"7\""));
        assert!(html.contains("data-state=\"loading\""));
        assert!(html.contains("download=\"qrcode.png\""));

        let html = render_fragment(&ctx, None);
        assert!(html.contains("data-seq=\"1\""));
    }

    #[test]
    fn test_localized_labels() {
        let ctx = context("x", "300", "svg", Lang::Ja);
        let html = render_fragment(&ctx, None);
        assert!(html.contains("読み込み中..."));
        assert!(html.contains("aria-label=\"コピー\""));
        assert!(html.contains("download=\"qrcode.svg\""));
    }
}
