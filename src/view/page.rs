//! Full page.

use crate::core::{Format, RenderContext};
use crate::embed::view::{PAGE_HTML, PREVIEW_JS, PageVars, ScriptVars};
use crate::utils::html::{escape, escape_attr, json_for_script};

use super::{PreviewState, render_preview};

/// Render the whole page: form pre-filled from `ctx.request`, the preview
/// region as the first submission, and the client script.
pub fn render_page(ctx: &RenderContext) -> String {
    let messages = ctx.messages();
    let request = &ctx.request;

    let mut state = PreviewState::default();
    state.submit();
    let preview = render_preview(ctx, &state);

    let feedback_json = json_for_script(&messages.feedback).unwrap_or_else(|_| "{}".into());
    let script = PREVIEW_JS.render(&ScriptVars { feedback_json });

    let text = |s: &str| escape(s).into_owned();
    let attr = |s: &str| escape_attr(s).into_owned();

    PAGE_HTML.render(&PageVars {
        lang: ctx.lang.as_str(),
        title: text(messages.title),
        description: text(messages.description),
        trademark: text(messages.trademark),
        prefix: attr(ctx.prefix.as_str()),
        fragment_url: attr(&format!("{}/fragments/qr", ctx.prefix)),
        label_data: text(messages.labels.data),
        placeholder_data: attr(messages.labels.data_placeholder),
        label_size: text(messages.labels.size),
        placeholder_size: attr(messages.labels.size_placeholder),
        label_format: text(messages.labels.format),
        label_reload: attr(messages.labels.reload),
        data: text(request.payload()),
        size: request.width().to_string(),
        png_checked: request.format() == Format::Raster,
        svg_checked: request.format() == Format::Vector,
        preview,
        script,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Origin, PathPrefix, normalize};
    use crate::view::Lang;

    fn context(prefix: &str, data: Option<&str>, lang: Lang) -> RenderContext {
        let prefix = PathPrefix::new(prefix);
        let origin = Origin::new("https", "example.com", &prefix);
        let fallback = format!("{origin}/");
        RenderContext {
            lang,
            request: normalize(data, None, None, &fallback),
            origin,
            prefix,
        }
    }

    #[test]
    fn test_page_defaults() {
        let html = render_page(&context("/qr", None, Lang::En));
        assert!(html.starts_with("<!doctype html>"));
        assert!(html.contains("<html lang=\"en\">"));
        assert!(html.contains("<title>QR Code Placeholder Maker</title>"));
        assert!(html.contains(">https://example.com/qr/</textarea>"));
        assert!(html.contains("value=\"300\""));
        assert!(html.contains("value=\"png\" checked"));
        assert!(!html.contains("value=\"svg\" checked"));
        assert!(html.contains("data-fragment=\"/qr/fragments/qr\""));
        assert!(html.contains("name=\"url_prefix\" value=\"/qr\""));
        assert!(html.contains(
            "https://example.com/qr/api/qr?data=https%3A%2F%2Fexample.com%2Fqr%2F&amp;size=300&amp;format=png"
        ));
        assert!(html.contains("QR Code is a registered trademark of DENSO WAVE Inc."));
    }

    #[test]
    fn test_page_japanese() {
        let html = render_page(&context("", Some("x"), Lang::Ja));
        assert!(html.contains("<html lang=\"ja\">"));
        assert!(html.contains("QRコード プレースホルダー メーカー"));
        assert!(html.contains("\"copyFailed\":\"コピーに失敗しました\""));
        assert!(html.contains("data-seq=\"1\""));
    }

    #[test]
    fn test_payload_is_escaped_and_not_expanded() {
        let html = render_page(&context("", Some("</textarea>__PREFIX__"), Lang::En));
        assert!(html.contains(">&lt;/textarea&gt;__PREFIX__</textarea>"));
        assert!(!html.contains("__SCRIPT__"));
        assert!(!html.contains("__FEEDBACK__"));
    }
}
