//! HTML views.
//!
//! - [`render_page`]: full page with form, preview region and script
//! - [`render_fragment`]: preview region alone, for in-place replacement
//! - [`render_not_found`]: 404 page
//!
//! Both the page and the fragment embed the artifact URL from
//! [`RenderContext::artifact_url`](crate::core::RenderContext::artifact_url)
//! and nothing else.

mod locale;
mod not_found;
mod page;
mod preview;
mod state;

pub use locale::{Lang, Messages};
pub use not_found::render_not_found;
pub use page::render_page;
pub use preview::{render_fragment, render_preview};
pub use state::PreviewState;
