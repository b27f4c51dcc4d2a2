//! Raw SVG serialization.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};

use crate::qr::QrMatrix;

const LIGHT: &str = "#ffffff";
const DARK: &str = "#000000";

/// Serialize `matrix` as an SVG document `width` pixels square.
///
/// Unlike the raster path there is no per-module fallback: the document
/// always declares the requested `width`, however small. The viewBox is in module units (`0 0 D D`, quiet zone included). A light
/// background path is followed by one stroked path holding every horizontal
/// run of dark modules, drawn along the module's vertical center.
pub fn write_svg(matrix: &QrMatrix, width: u32, margin: usize) -> Result<String, String> {
    let dimension = matrix.dimension(margin);
    let side = width.to_string();
    let view_box = format!("0 0 {dimension} {dimension}");
    let background = format!("M0 0h{dimension}v{dimension}H0z");
    let runs = path_data(matrix, margin);

    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    let svg = BytesStart::new("svg").with_attributes([
        ("xmlns", "http://www.w3.org/2000/svg"),
        ("width", side.as_str()),
        ("height", side.as_str()),
        ("viewBox", view_box.as_str()),
        ("shape-rendering", "crispEdges"),
    ]);
    let fill =
        BytesStart::new("path").with_attributes([("fill", LIGHT), ("d", background.as_str())]);
    let stroke =
        BytesStart::new("path").with_attributes([("stroke", DARK), ("d", runs.as_str())]);

    let events = [
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
        Event::Start(svg),
        Event::Empty(fill),
        Event::Empty(stroke),
        Event::End(BytesEnd::new("svg")),
    ];
    for event in events {
        writer.write_event(event).map_err(|e| e.to_string())?;
    }

    String::from_utf8(writer.into_inner()).map_err(|e| e.to_string())
}

/// `M{x} {y}.5h{len}` for every dark run, in quiet-zone coordinates.
fn path_data(matrix: &QrMatrix, margin: usize) -> String {
    matrix
        .dark_runs()
        .into_iter()
        .map(|(x, y, len)| format!("M{} {}.5h{}", x + margin, y + margin, len))
        .collect()
}
