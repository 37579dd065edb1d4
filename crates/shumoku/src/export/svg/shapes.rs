//! Node outlines.

use shumoku_core::{geometry::Bounds, model::NodeShape};
use svg::node::element as svg_element;

use super::{SvgNode, paths::fmt_num};

/// Fill and stroke shared by every outline.
#[derive(Debug, Clone)]
pub(crate) struct ShapeStyle<'a> {
    pub fill: &'a str,
    pub stroke: &'a str,
    pub stroke_width: f32,
}

const ROUNDED_RADIUS: f32 = 8.0;
/// Horizontal inset of hexagon and trapezoid corners, as a fraction of width.
const SLANT: f32 = 0.15;

/// Draws `shape` filling `bounds`.
pub(crate) fn render_shape(shape: NodeShape, bounds: Bounds, style: &ShapeStyle<'_>) -> SvgNode {
    let (left, top, right, bottom) = (bounds.min_x(), bounds.min_y(), bounds.max_x(), bounds.max_y());
    let center = bounds.center();
    let inset = bounds.width() * SLANT;

    match shape {
        NodeShape::Rect => rectangle(bounds, 0.0, style),
        NodeShape::Rounded => rectangle(bounds, ROUNDED_RADIUS, style),
        NodeShape::Stadium => rectangle(bounds, bounds.height() / 2.0, style),
        NodeShape::Circle => {
            let circle = svg_element::Circle::new()
                .set("cx", fmt_num(center.x()))
                .set("cy", fmt_num(center.y()))
                .set("r", fmt_num(bounds.width().min(bounds.height()) / 2.0));
            Box::new(stroked(circle, style))
        }
        NodeShape::Diamond => polygon(
            &[
                (center.x(), top),
                (right, center.y()),
                (center.x(), bottom),
                (left, center.y()),
            ],
            style,
        ),
        NodeShape::Hexagon => polygon(
            &[
                (left + inset, top),
                (right - inset, top),
                (right, center.y()),
                (right - inset, bottom),
                (left + inset, bottom),
                (left, center.y()),
            ],
            style,
        ),
        NodeShape::Trapezoid => polygon(
            &[
                (left + inset, top),
                (right - inset, top),
                (right, bottom),
                (left, bottom),
            ],
            style,
        ),
        NodeShape::Cylinder => cylinder(bounds, style),
    }
}

fn stroked<T: svg::Node>(mut element: T, style: &ShapeStyle<'_>) -> T {
    element.assign("fill", style.fill);
    element.assign("stroke", style.stroke);
    element.assign("stroke-width", fmt_num(style.stroke_width));
    element
}

fn rectangle(bounds: Bounds, radius: f32, style: &ShapeStyle<'_>) -> SvgNode {
    let mut rect = svg_element::Rectangle::new()
        .set("x", fmt_num(bounds.min_x()))
        .set("y", fmt_num(bounds.min_y()))
        .set("width", fmt_num(bounds.width()))
        .set("height", fmt_num(bounds.height()));
    if radius > 0.0 {
        rect = rect.set("rx", fmt_num(radius));
    }
    Box::new(stroked(rect, style))
}

fn polygon(points: &[(f32, f32)], style: &ShapeStyle<'_>) -> SvgNode {
    let points = points
        .iter()
        .map(|(x, y)| format!("{},{}", fmt_num(*x), fmt_num(*y)))
        .collect::<Vec<_>>()
        .join(" ");
    let polygon = svg_element::Polygon::new().set("points", points);
    Box::new(stroked(polygon, style))
}

/// Body with a visible top rim.
fn cylinder(bounds: Bounds, style: &ShapeStyle<'_>) -> SvgNode {
    let rx = bounds.width() / 2.0;
    let ry = (bounds.height() * 0.1).min(10.0);
    let (left, right) = (fmt_num(bounds.min_x()), fmt_num(bounds.max_x()));
    let top = fmt_num(bounds.min_y() + ry);
    let bottom = fmt_num(bounds.max_y() - ry);
    let (rx, ry) = (fmt_num(rx), fmt_num(ry));

    let body = svg_element::Path::new().set(
        "d",
        format!(
            "M {left} {top} A {rx} {ry} 0 0 1 {right} {top} L {right} {bottom} \
             A {rx} {ry} 0 0 1 {left} {bottom} Z"
        ),
    );
    let rim = svg_element::Path::new()
        .set("d", format!("M {left} {top} A {rx} {ry} 0 0 0 {right} {top}"))
        .set("fill", "none")
        .set("stroke", style.stroke)
        .set("stroke-width", fmt_num(style.stroke_width));

    Box::new(
        svg_element::Group::new()
            .set("class", "shape-cylinder")
            .add(stroked(body, style))
            .add(rim),
    )
}
