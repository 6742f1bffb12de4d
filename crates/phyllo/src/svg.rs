//! SVG output.
//!
//! Writes a standalone document: black background, one filled `<ellipse>`
//! per point with a hairline black outline. The document is built with
//! quick-xml's writer, so attribute values and the title are escaped.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::color::Rgb;
use crate::error::PhylloError;
use crate::generator::PointRecord;
use crate::params::{title_for, Params};

/// Canvas fill behind the points.
pub const BACKGROUND: Rgb = Rgb::BLACK;

/// Outline drawn around each ellipse.
pub const OUTLINE: Rgb = Rgb::BLACK;
pub const OUTLINE_WIDTH: f64 = 0.1;

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), PhylloError> {
    writer
        .write_event(event)
        .map_err(|e| PhylloError::Svg(e.to_string()))
}

/// Render `points` to an SVG document sized by `params`.
///
/// Points are written in the order given, so later points paint over
/// earlier ones exactly as they would during playback. The title counts
/// the points actually written, not `params.count`.
pub fn render_svg(
    points: impl IntoIterator<Item = PointRecord>,
    params: &Params,
) -> Result<String, PhylloError> {
    let points: Vec<PointRecord> = points.into_iter().collect();
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    let width = fmt(params.width);
    let height = fmt(params.height);
    let view_box = format!("0 0 {} {}", width, height);

    write(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut svg = BytesStart::new("svg");
    svg.push_attribute(("xmlns", "http://www.w3.org/2000/svg"));
    svg.push_attribute(("width", width.as_str()));
    svg.push_attribute(("height", height.as_str()));
    svg.push_attribute(("viewBox", view_box.as_str()));
    write(&mut writer, Event::Start(svg))?;

    write(&mut writer, Event::Start(BytesStart::new("title")))?;
    write(&mut writer, Event::Text(BytesText::new(&title_for(points.len()))))?;
    write(&mut writer, Event::End(BytesEnd::new("title")))?;

    let background = BACKGROUND.to_hex();
    let mut rect = BytesStart::new("rect");
    rect.push_attribute(("width", "100%"));
    rect.push_attribute(("height", "100%"));
    rect.push_attribute(("fill", background.as_str()));
    write(&mut writer, Event::Empty(rect))?;

    let outline = OUTLINE.to_hex();
    let outline_width = fmt(OUTLINE_WIDTH);
    let mut group = BytesStart::new("g");
    group.push_attribute(("stroke", outline.as_str()));
    group.push_attribute(("stroke-width", outline_width.as_str()));
    write(&mut writer, Event::Start(group))?;

    let scheme = params.colors;
    for point in points {
        let cx = format!("{:.2}", point.x);
        let cy = format!("{:.2}", point.y);
        let r = fmt(point.size);
        let fill = scheme.color(&point).to_hex();

        let mut ellipse = BytesStart::new("ellipse");
        ellipse.push_attribute(("cx", cx.as_str()));
        ellipse.push_attribute(("cy", cy.as_str()));
        ellipse.push_attribute(("rx", r.as_str()));
        ellipse.push_attribute(("ry", r.as_str()));
        ellipse.push_attribute(("fill", fill.as_str()));
        write(&mut writer, Event::Empty(ellipse))?;
    }

    write(&mut writer, Event::End(BytesEnd::new("g")))?;
    write(&mut writer, Event::End(BytesEnd::new("svg")))?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    String::from_utf8(bytes).map_err(|e| PhylloError::Svg(e.to_string()))
}

/// Format a dimension in its shortest exact form ("800", "0.1", "0.0002").
fn fmt(value: f64) -> String {
    if value == 0.0 { "0".to_string() } else { value.to_string() }
}
