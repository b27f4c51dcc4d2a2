//! Embedded HTML and JavaScript.
//!
//! # Module Structure
//!
//! - `template` - Template types for typed variable injection
//! - `view` - Page, preview fragment, 404 page and the preview script
//!
//! # Usage
//!
//! ```ignore
//! use embed::view::{NOT_FOUND_HTML, NotFoundVars};
//!
//! let html = NOT_FOUND_HTML.render(&NotFoundVars { prefix: "/qr".into() });
//! ```

mod template;

pub use template::{Template, TemplateVars};

pub mod view {
    use super::{Template, TemplateVars};

    /// Variables for page.html. Every value is HTML-escaped by the caller.
    pub struct PageVars {
        pub lang: &'static str,
        pub title: String,
        pub description: String,
        pub trademark: String,
        pub prefix: String,
        pub fragment_url: String,
        pub label_data: String,
        pub placeholder_data: String,
        pub label_size: String,
        pub placeholder_size: String,
        pub label_format: String,
        pub label_reload: String,
        pub data: String,
        pub size: String,
        pub png_checked: bool,
        pub svg_checked: bool,
        /// Rendered preview.html.
        pub preview: String,
        /// Rendered preview.js.
        pub script: String,
    }

    impl TemplateVars for PageVars {
        fn vars(&self) -> Vec<(&'static str, String)> {
            let checked = |on: bool| if on { " checked" } else { "" }.to_string();
            vec![
                ("LANG", self.lang.to_string()),
                ("TITLE", self.title.clone()),
                ("DESCRIPTION", self.description.clone()),
                ("TRADEMARK", self.trademark.clone()),
                ("PREFIX", self.prefix.clone()),
                ("FRAGMENT_URL", self.fragment_url.clone()),
                ("LABEL_DATA", self.label_data.clone()),
                ("PLACEHOLDER_DATA", self.placeholder_data.clone()),
                ("LABEL_SIZE", self.label_size.clone()),
                ("PLACEHOLDER_SIZE", self.placeholder_size.clone()),
                ("LABEL_FORMAT", self.label_format.clone()),
                ("LABEL_RELOAD", self.label_reload.clone()),
                ("DATA", self.data.clone()),
                ("SIZE", self.size.clone()),
                ("PNG_CHECKED", checked(self.png_checked)),
                ("SVG_CHECKED", checked(self.svg_checked)),
                ("PREVIEW", self.preview.clone()),
                ("SCRIPT", self.script.clone()),
            ]
        }
    }

    /// Variables for preview.html.
    ///
    /// `qr_url` fills the region's `data-qr-url`, the image source, the
    /// copy field and the download link from one escaped string.
    pub struct PreviewVars {
        pub qr_url: String,
        pub seq: String,
        pub state: &'static str,
        pub prefix: String,
        pub download_name: String,
        pub loading: String,
        pub qr_error: String,
        pub label_copy: String,
        pub label_download: String,
    }

    impl TemplateVars for PreviewVars {
        fn vars(&self) -> Vec<(&'static str, String)> {
            vec![
                ("QR_URL", self.qr_url.clone()),
                ("SEQ", self.seq.clone()),
                ("STATE", self.state.to_string()),
                ("PREFIX", self.prefix.clone()),
                ("DOWNLOAD_NAME", self.download_name.clone()),
                ("LOADING", self.loading.clone()),
                ("QR_ERROR", self.qr_error.clone()),
                ("LABEL_COPY", self.label_copy.clone()),
                ("LABEL_DOWNLOAD", self.label_download.clone()),
            ]
        }
    }

    /// Variables for not_found.html.
    pub struct NotFoundVars {
        pub prefix: String,
    }

    impl TemplateVars for NotFoundVars {
        fn vars(&self) -> Vec<(&'static str, String)> {
            vec![("PREFIX", self.prefix.clone())]
        }
    }

    /// Variables for preview.js.
    pub struct ScriptVars {
        /// JSON object literal, already safe for a `<script>` element.
        pub feedback_json: String,
    }

    impl TemplateVars for ScriptVars {
        fn vars(&self) -> Vec<(&'static str, String)> {
            vec![("FEEDBACK", self.feedback_json.clone())]
        }
    }

    pub const PAGE_HTML: Template<PageVars> = Template::new(include_str!("view/page.html"));

    pub const PREVIEW_HTML: Template<PreviewVars> =
        Template::new(include_str!("view/preview.html"));

    pub const NOT_FOUND_HTML: Template<NotFoundVars> =
        Template::new(include_str!("view/not_found.html"));

    pub const PREVIEW_JS: Template<ScriptVars> = Template::new(include_str!("view/preview.js"));
}
