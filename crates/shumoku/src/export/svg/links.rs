//! Links: one visible stroke per bandwidth line, plus a transparent hit area.

use log::debug;
use shumoku_core::{
    color::{Palette, color_or, vlan_color},
    geometry::Point,
    model::{EdgeStyle, Endpoint, Link},
};
use svg::node::element as svg_element;

use super::{
    RenderContext,
    labels::{self, Anchor, LabelPlacement},
    layer::{LayeredOutput, RenderLayer},
    paths,
};

const DEFAULT_STROKE_WIDTH: f32 = 2.0;
/// Space between neighbouring parallel strokes.
const LINE_GAP: f32 = 2.0;
const HIT_WIDTH: f32 = 12.0;
const ORTHOGONAL_RADIUS: f32 = 8.0;
const POLYLINE_RADIUS: f32 = 4.0;
const REDUNDANT_DASH: &str = "6 4";
const EXPORT_DASH: &str = "4 3";

/// Resolved stroke of one link.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LinkPaint {
    pub stroke: String,
    pub width: f32,
    pub dasharray: Option<String>,
}

impl LinkPaint {
    /// Explicit style wins over the VLAN color, which wins over the theme.
    pub(crate) fn resolve(link: &Link, palette: &Palette) -> Self {
        let fallback = vlan_color(&link.vlan).unwrap_or(palette.link);
        let width = link
            .style
            .stroke_width
            .filter(|width| width.is_finite() && *width > 0.0)
            .unwrap_or(DEFAULT_STROKE_WIDTH);
        let dasharray = link.style.dasharray.clone().or_else(|| {
            if link.redundancy.is_some() {
                Some(REDUNDANT_DASH.to_string())
            } else if link.is_export_connector() {
                Some(EXPORT_DASH.to_string())
            } else {
                None
            }
        });

        Self {
            stroke: color_or(link.style.stroke.as_deref(), fallback),
            width,
            dasharray,
        }
    }
}

/// Perpendicular offsets of `count` parallel lines, centred on the route.
///
/// ```text
/// count = 3, spacing = 4:  [-4, 0, 4]
/// count = 2, spacing = 4:  [-2, 2]
/// ```
pub(crate) fn parallel_offsets(count: usize, spacing: f32) -> Vec<f32> {
    let middle = (count.max(1) as f32 - 1.0) / 2.0;
    (0..count.max(1))
        .map(|i| (i as f32 - middle) * spacing)
        .collect()
}

/// Path data for one parallel line of `route`.
pub(crate) fn line_data(route: &[Point], edge_style: EdgeStyle, offset: f32) -> String {
    match edge_style {
        EdgeStyle::Straight => {
            let ends: Vec<Point> = route.first().into_iter().chain(route.last()).copied().collect();
            paths::polyline_data(&paths::offset_polyline(&ends, offset))
        }
        EdgeStyle::Orthogonal | EdgeStyle::Polyline => {
            let radius = if edge_style == EdgeStyle::Orthogonal {
                ORTHOGONAL_RADIUS
            } else {
                POLYLINE_RADIUS
            };
            let line = paths::offset_polyline(route, offset);
            // Turn directions come from the unshifted route.
            let turns = paths::turn_signs(route);
            let radii = paths::corner_radii(&line, &turns, radius, offset);
            paths::rounded_data(&line, &radii)
        }
        EdgeStyle::Splines => paths::spline_data(&paths::offset_polyline(route, offset)),
    }
}

fn render_link(ctx: &RenderContext<'_>, link: &Link, key: &str, route: &[Point]) -> svg_element::Group {
    let paint = LinkPaint::resolve(link, ctx.palette);
    let count = link.line_count();
    let spacing = paint.width + LINE_GAP;

    let mut group = svg_element::Group::new()
        .set("class", "link")
        .set("data-link-id", key)
        .set("fill", "none");

    if ctx.interactive {
        group = group
            .set("data-link-from", link.from.to_string())
            .set("data-link-to", link.to.to_string());
        if let Some(bandwidth) = link.bandwidth {
            group = group.set("data-link-bandwidth", bandwidth.as_str());
        }
        if !link.vlan.is_empty() {
            let vlans: Vec<String> = link.vlan.iter().map(u32::to_string).collect();
            group = group.set("data-link-vlan", vlans.join(","));
        }
        if let Ok(json) = serde_json::to_string(link) {
            group = group.set("data-link-json", json);
        }
    }

    for offset in parallel_offsets(count, spacing) {
        let mut path = svg_element::Path::new()
            .set("class", "link-line")
            .set("d", line_data(route, ctx.edge_style, offset))
            .set("stroke", paint.stroke.as_str())
            .set("stroke-width", paths::fmt_num(paint.width))
            .set("stroke-linecap", "round");
        if let Some(dasharray) = &paint.dasharray {
            path = path.set("stroke-dasharray", dasharray.as_str());
        }
        group = group.add(path);
    }

    let total_width = count as f32 * spacing;
    let hit = svg_element::Path::new()
        .set("class", "link-hit")
        .set("d", line_data(route, ctx.edge_style, 0.0))
        .set("stroke", "transparent")
        .set("stroke-width", paths::fmt_num(HIT_WIDTH.max(total_width + 8.0)))
        .set("pointer-events", "stroke");

    group.add(hit)
}

/// Label for a port endpoint, placed at the route end it belongs to.
fn port_label(
    ctx: &RenderContext<'_>,
    endpoint: &Endpoint,
    port_point: Point,
    toward: Point,
    link_center: Point,
) -> Option<svg_element::Group> {
    let port_name = endpoint.port_name()?;
    let node = ctx.graph.node(endpoint.node_id())?;
    let node_center = ctx.layout.node(&node.id)?.position;
    let text = node
        .ports
        .get(port_name)
        .and_then(|port| port.label.as_deref())
        .unwrap_or(port_name);

    let placement =
        labels::port_label_placement(port_point, node_center, toward, link_center, port_name);
    Some(labels::render_label(
        &[text],
        placement,
        labels::LABEL_FONT_SIZE,
        "port-label",
        ctx.palette,
    ))
}

/// Draws every routed link into the link and link-label layers.
pub(crate) fn render_links(ctx: &RenderContext<'_>, output: &mut LayeredOutput) {
    for (index, link) in ctx.graph.links.iter().enumerate() {
        let key = link.key(index);
        let Some(layout) = ctx.layout.link(&key) else {
            debug!(link = key; "Skipping link without route");
            continue;
        };
        let route = paths::dedup_points(&layout.points);
        let (Some(&first), Some(&last)) = (route.first(), route.last()) else {
            continue;
        };
        if route.len() < 2 {
            continue;
        }

        output.add_to_layer(
            RenderLayer::Link,
            Box::new(render_link(ctx, link, &key, &route)),
        );

        let center = paths::midpoint_along(&route);
        if !link.label.is_empty() {
            let placement = LabelPlacement {
                position: center,
                anchor: Anchor::Middle,
            };
            let label = labels::render_label(
                &link.label,
                placement,
                labels::LABEL_FONT_SIZE,
                "link-label",
                ctx.palette,
            );
            output.add_to_layer(RenderLayer::LinkLabel, Box::new(label));
        }

        let ends = [
            (&link.from, first, route[1]),
            (&link.to, last, route[route.len() - 2]),
        ];
        for (endpoint, port_point, toward) in ends {
            if let Some(label) = port_label(ctx, endpoint, port_point, toward, center) {
                output.add_to_layer(RenderLayer::LinkLabel, Box::new(label));
            }
        }
    }
}
