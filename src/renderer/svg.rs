//! Wheel SVG writer
//!
//! Layout, back to front: border ring, segment wedges, boundary dots,
//! labels, hub. Everything that turns sits in one `<g id="wheel-group">`
//! whose `transform` the frame loop rewrites.

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use std::io::Write;

use crate::consts::*;
use crate::wheel::Wheel;
use crate::wheel::geometry::fmt_num;

/// Element ids the frame loop looks up
pub const WHEEL_GROUP_ID: &str = "wheel-group";
pub const HUB_GRADIENT_ID: &str = "centerGradient";

/// Errors that can occur while writing SVG
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("XML writing error: {0}")]
    XmlError(#[from] quick_xml::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// SVG rotate transform around a pivot
pub fn svg_rotate(angle: f64, cx: f64, cy: f64) -> String {
    format!("rotate({} {} {})", fmt_num(angle), fmt_num(cx), fmt_num(cy))
}

/// CSS rotate transform (for HTML elements such as the needle)
pub fn css_rotate(angle: f64) -> String {
    format!("rotate({}deg)", fmt_num(angle))
}

/// Render the wheel at its current rotation
pub fn render_wheel_svg(wheel: &Wheel, hub_caption: &str) -> Result<String, RenderError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    let size = fmt_num(VIEW_BOX_SIZE);
    let view_box = format!("0 0 {size} {size}");
    let mut root = BytesStart::new("svg");
    root.push_attribute(("xmlns", "http://www.w3.org/2000/svg"));
    root.push_attribute(("width", size.as_str()));
    root.push_attribute(("height", size.as_str()));
    root.push_attribute(("viewBox", view_box.as_str()));
    root.push_attribute(("class", "wheel-svg"));
    writer.write_event(Event::Start(root))?;

    write_defs(&mut writer)?;

    let transform = svg_rotate(wheel.rotation(), CENTER_X, CENTER_Y);
    let mut group = BytesStart::new("g");
    group.push_attribute(("id", WHEEL_GROUP_ID));
    group.push_attribute(("transform", transform.as_str()));
    writer.write_event(Event::Start(group))?;

    write_circle(&mut writer, WHEEL_RADIUS + BORDER_WIDTH, ACCENT_COLOR, None)?;
    write_segments(&mut writer, wheel)?;
    write_boundary_dots(&mut writer, wheel)?;
    write_labels(&mut writer, wheel)?;
    write_hub(&mut writer, hub_caption)?;

    writer.write_event(Event::End(BytesEnd::new("g")))?;
    writer.write_event(Event::End(BytesEnd::new("svg")))?;

    let result = writer.into_inner();
    Ok(String::from_utf8_lossy(&result).to_string())
}

fn write_defs<W: Write>(writer: &mut Writer<W>) -> Result<(), RenderError> {
    writer.write_event(Event::Start(BytesStart::new("defs")))?;

    let mut gradient = BytesStart::new("linearGradient");
    gradient.push_attribute(("id", HUB_GRADIENT_ID));
    gradient.push_attribute(("x1", "0%"));
    gradient.push_attribute(("y1", "0%"));
    gradient.push_attribute(("x2", "100%"));
    gradient.push_attribute(("y2", "100%"));
    writer.write_event(Event::Start(gradient))?;

    for (offset, color) in [("0%", ACCENT_COLOR), ("100%", ACCENT_LIGHT_COLOR)] {
        let mut stop = BytesStart::new("stop");
        stop.push_attribute(("offset", offset));
        stop.push_attribute(("stop-color", color));
        writer.write_event(Event::Empty(stop))?;
    }

    writer.write_event(Event::End(BytesEnd::new("linearGradient")))?;
    writer.write_event(Event::End(BytesEnd::new("defs")))?;
    Ok(())
}

/// Circle centered on the wheel
fn write_circle<W: Write>(
    writer: &mut Writer<W>,
    r: f64,
    fill: &str,
    stroke: Option<(&str, f64)>,
) -> Result<(), RenderError> {
    write_circle_at(writer, CENTER_X, CENTER_Y, r, fill, stroke)
}

fn write_circle_at<W: Write>(
    writer: &mut Writer<W>,
    cx: f64,
    cy: f64,
    r: f64,
    fill: &str,
    stroke: Option<(&str, f64)>,
) -> Result<(), RenderError> {
    let (cx, cy, r) = (fmt_num(cx), fmt_num(cy), fmt_num(r));
    let mut elem = BytesStart::new("circle");
    elem.push_attribute(("cx", cx.as_str()));
    elem.push_attribute(("cy", cy.as_str()));
    elem.push_attribute(("r", r.as_str()));
    elem.push_attribute(("fill", fill));
    if let Some((color, width)) = stroke {
        let width = fmt_num(width);
        elem.push_attribute(("stroke", color));
        elem.push_attribute(("stroke-width", width.as_str()));
    }
    writer.write_event(Event::Empty(elem))?;
    Ok(())
}

fn write_segments<W: Write>(writer: &mut Writer<W>, wheel: &Wheel) -> Result<(), RenderError> {
    let geometry = wheel.geometry();
    for (index, segment) in wheel.segments().iter().enumerate() {
        let d = geometry.wedge_path(index);
        let mut elem = BytesStart::new("path");
        elem.push_attribute(("d", d.as_str()));
        elem.push_attribute(("fill", segment.color.as_str()));
        elem.push_attribute(("stroke", "none"));
        writer.write_event(Event::Empty(elem))?;
    }
    Ok(())
}

fn write_boundary_dots<W: Write>(writer: &mut Writer<W>, wheel: &Wheel) -> Result<(), RenderError> {
    let geometry = wheel.geometry();
    for index in 0..geometry.count {
        let p = geometry.boundary_marker(index);
        write_circle_at(
            writer,
            p.x,
            p.y,
            BOUNDARY_DOT_RADIUS,
            ACCENT_COLOR,
            Some(("white", 2.0)),
        )?;
    }
    Ok(())
}

fn write_labels<W: Write>(writer: &mut Writer<W>, wheel: &Wheel) -> Result<(), RenderError> {
    let geometry = wheel.geometry();
    for (index, segment) in wheel.segments().iter().enumerate() {
        let anchor = geometry.label_anchor(index);
        let (x, y) = (fmt_num(anchor.pos.x), fmt_num(anchor.pos.y));
        let transform = svg_rotate(anchor.rotation, anchor.pos.x, anchor.pos.y);

        let mut elem = BytesStart::new("text");
        elem.push_attribute(("x", x.as_str()));
        elem.push_attribute(("y", y.as_str()));
        elem.push_attribute(("class", "section-text"));
        elem.push_attribute(("fill", LABEL_COLOR));
        elem.push_attribute(("transform", transform.as_str()));
        writer.write_event(Event::Start(elem))?;
        writer.write_event(Event::Text(BytesText::new(&segment.label)))?;
        writer.write_event(Event::End(BytesEnd::new("text")))?;
    }
    Ok(())
}

fn write_hub<W: Write>(writer: &mut Writer<W>, caption: &str) -> Result<(), RenderError> {
    let fill = format!("url(#{HUB_GRADIENT_ID})");
    write_circle(writer, HUB_RADIUS, &fill, None)?;

    let (x, y) = (fmt_num(CENTER_X), fmt_num(CENTER_Y));
    let mut elem = BytesStart::new("text");
    elem.push_attribute(("x", x.as_str()));
    elem.push_attribute(("y", y.as_str()));
    elem.push_attribute(("class", "section-text"));
    elem.push_attribute(("fill", "white"));
    elem.push_attribute(("font-size", "16"));
    writer.write_event(Event::Start(elem))?;
    writer.write_event(Event::Text(BytesText::new(caption)))?;
    writer.write_event(Event::End(BytesEnd::new("text")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::{Segment, WheelConfig};

    fn wheel(labels: &[&str]) -> Wheel {
        let segments = labels.iter().map(|l| Segment::new(*l, "#FFE4D6")).collect();
        Wheel::new(WheelConfig::new(segments).unwrap(), 1)
    }

    #[test]
    fn test_render_default_wheel() {
        let w = Wheel::new(WheelConfig::default(), 1);
        let svg = render_wheel_svg(&w, "スピン").unwrap();

        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(svg.contains("viewBox=\"0 0 300 300\""));
        assert!(svg.contains("<g id=\"wheel-group\" transform=\"rotate(0 150 150)\">"));
        assert_eq!(svg.matches("<path ").count(), 8);
        // Border, eight dots, hub
        assert_eq!(svg.matches("<circle ").count(), 10);
        assert_eq!(svg.matches(">9800</text>").count(), 1);
        assert!(svg.contains(">スピン</text>"));
        assert!(svg.contains("fill=\"url(#centerGradient)\""));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_labels_are_escaped() {
        let w = wheel(&["<b>&</b>", "ok"]);
        let svg = render_wheel_svg(&w, "spin").unwrap();
        assert!(svg.contains("&lt;b&gt;&amp;&lt;/b&gt;"));
        assert!(!svg.contains("<b>"));
    }

    #[test]
    fn test_single_segment_renders_full_circle() {
        let w = wheel(&["all"]);
        let svg = render_wheel_svg(&w, "spin").unwrap();
        assert!(svg.contains("d=\"M 150 10 A 140 140 0 1 1 150 290 A 140 140 0 1 1 150 10 Z\""));
    }

    #[test]
    fn test_rotate_helpers() {
        assert_eq!(svg_rotate(2002.5, 150.0, 150.0), "rotate(2002.5 150 150)");
        assert_eq!(css_rotate(-20.0), "rotate(-20deg)");
    }
}
