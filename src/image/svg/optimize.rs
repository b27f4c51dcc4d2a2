//! SVG optimization.
//!
//! Each pass re-serializes the document through usvg (which resolves
//! styles, drops unused definitions and normalizes path data) and then
//! compacts the markup with quick-xml. Passes repeat until the output stops
//! changing or the pass limit is reached.

use quick_xml::events::{BytesStart, Event};
use quick_xml::{Reader, Writer};
use thiserror::Error;

/// Options for SVG optimization
#[derive(Debug, Clone)]
pub struct OptimizeOptions {
    /// Upper bound on passes; the loop stops earlier at a fixpoint.
    pub max_passes: usize,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self { max_passes: 10 }
    }
}

#[derive(Debug, Error)]
pub enum OptimizationError {
    #[error("failed to parse SVG: {0}")]
    Parse(#[from] usvg::Error),
    #[error("failed to rewrite SVG: {0}")]
    Rewrite(String),
}

/// Optimize `raw` into an equivalent, smaller document.
///
/// The result is a fixpoint of a single pass whenever one is reached
/// within `max_passes`, which makes optimizing twice a no-op.
pub fn optimize(raw: &str, options: &OptimizeOptions) -> Result<String, OptimizationError> {
    let mut current = pass(raw)?;
    for _ in 1..options.max_passes.max(1) {
        let next = pass(&current)?;
        if next == current {
            break;
        }
        current = next;
    }
    Ok(current)
}

fn pass(input: &str) -> Result<String, OptimizationError> {
    let tree = usvg::Tree::from_str(input, &usvg::Options::default())?;
    let write_options = usvg::WriteOptions {
        indent: usvg::Indent::None,
        attributes_indent: usvg::Indent::None,
        ..Default::default()
    };
    compact(&tree.to_string(&write_options))
}

/// Drop declarations, comments, doctypes, processing instructions and
/// inter-element whitespace. Guarantees a `viewBox` on the root element.
fn compact(svg: &str) -> Result<String, OptimizationError> {
    let mut reader = Reader::from_str(svg);
    reader.config_mut().trim_text(true);
    let mut writer = Writer::new(Vec::new());
    let mut seen_root = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| OptimizationError::Rewrite(e.to_string()))?;
        let event = match event {
            Event::Eof => break,
            Event::Decl(_) | Event::Comment(_) | Event::DocType(_) | Event::PI(_) => continue,
            Event::Start(start) if !seen_root => {
                seen_root = true;
                Event::Start(with_view_box(start))
            }
            other => other,
        };
        writer
            .write_event(event)
            .map_err(|e| OptimizationError::Rewrite(e.to_string()))?;
    }

    String::from_utf8(writer.into_inner()).map_err(|e| OptimizationError::Rewrite(e.to_string()))
}

/// Add `viewBox="0 0 {width} {height}"` when the root element lacks one.
fn with_view_box(start: BytesStart<'_>) -> BytesStart<'static> {
    let mut start = start.into_owned();
    let mut has_view_box = false;
    let mut width = None;
    let mut height = None;
    for attr in start.attributes().flatten() {
        let value = || String::from_utf8_lossy(&attr.value).into_owned();
        match attr.key.as_ref() {
            b"viewBox" => has_view_box = true,
            b"width" => width = Some(value()),
            b"height" => height = Some(value()),
            _ => {}
        }
    }
    if !has_view_box && let (Some(width), Some(height)) = (width, height) {
        start.push_attribute(("viewBox", format!("0 0 {width} {height}").as_str()));
    }
    start
}
