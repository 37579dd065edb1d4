//! Nodes and their port markers.

use log::debug;
use shumoku_core::{
    geometry::{Bounds, Size},
    layout::{NodeLayout, PortSide, port_key},
    model::{ExportConnector, Node},
};
use svg::node::{
    Node as _, Text as SvgText,
    element::{self as svg_element, Element},
};

use super::{
    RenderContext, SHADOW_FILTER_ID,
    icons::fit_icon,
    layer::{LayeredOutput, RenderLayer},
    paths::fmt_num,
    shapes::{ShapeStyle, render_shape},
};

/// Default icon height inside a node.
const ICON_HEIGHT: f32 = 36.0;
const ICON_GAP: f32 = 4.0;
const LINE_HEIGHT: f32 = 16.0;
const PRIMARY_FONT_SIZE: f32 = 13.0;
const SECONDARY_FONT_SIZE: f32 = 11.0;
const NODE_STROKE_WIDTH: f32 = 1.5;
const PORT_SIZE: f32 = 8.0;

/// Icon and label lines, stacked and centred vertically in the node.
fn render_content(ctx: &RenderContext<'_>, node: &Node, bounds: Bounds) -> svg_element::Group {
    let icon = node.device().and_then(|device| ctx.icons.device_icon(device));
    let icon_size = icon.map(|icon| fit_icon(&icon, ICON_HEIGHT, bounds.width()));

    let fallback = [node.id.clone()];
    let lines: &[String] = if node.label.is_empty() {
        &fallback
    } else {
        &node.label
    };

    let icon_block = icon_size.map_or(0.0, |size| size.height() + ICON_GAP);
    let block = icon_block + lines.len() as f32 * LINE_HEIGHT;
    let center_x = bounds.center().x();
    let mut top = bounds.center().y() - block / 2.0;

    let mut group = svg_element::Group::new().set("class", "node-content");

    if let (Some(icon), Some(size)) = (icon, icon_size) {
        let element = svg_element::SVG::new()
            .set("class", "node-icon")
            .set("x", fmt_num(center_x - size.width() / 2.0))
            .set("y", fmt_num(top))
            .set("width", fmt_num(size.width()))
            .set("height", fmt_num(size.height()))
            .set(
                "viewBox",
                format!(
                    "0 0 {} {}",
                    fmt_num(icon.view_box.width()),
                    fmt_num(icon.view_box.height())
                ),
            )
            .set("color", ctx.palette.text)
            .add(
                svg_element::Path::new()
                    .set("d", icon.body)
                    .set("fill", "currentColor")
                    .set("fill-rule", "evenodd"),
            );
        group = group.add(element);
        top += icon_block;
    }

    for (i, line) in lines.iter().enumerate() {
        let (size, fill, weight) = if i == 0 {
            (PRIMARY_FONT_SIZE, ctx.palette.text, "600")
        } else {
            (SECONDARY_FONT_SIZE, ctx.palette.text_secondary, "400")
        };
        let text = svg_element::Text::new("")
            .set("x", fmt_num(center_x))
            .set("y", fmt_num(top + LINE_HEIGHT * (i as f32 + 0.5)))
            .set("text-anchor", "middle")
            .set("dominant-baseline", "central")
            .set("font-size", fmt_num(size))
            .set("font-weight", weight)
            .set("fill", fill)
            .add(SvgText::new(line.as_str()));
        group = group.add(text);
    }

    group
}

/// Tooltip text for an export connector.
fn export_tooltip(connector: &ExportConnector) -> String {
    let local = match &connector.local_port {
        Some(port) => format!("{}:{port}", connector.local_device),
        None => connector.local_device.clone(),
    };
    match &connector.destination {
        Some(destination) => {
            let target = match &destination.port {
                Some(port) => format!("{}:{port}", destination.device),
                None => destination.device.clone(),
            };
            let area = destination
                .subgraph_label
                .as_deref()
                .or(destination.subgraph_id.as_deref());
            match area {
                Some(area) => format!("{local} connects to {target} in {area}"),
                None => format!("{local} connects to {target}"),
            }
        }
        None => format!("{local} connects outside via pin {}", connector.pin_id),
    }
}

fn render_node(ctx: &RenderContext<'_>, node: &Node, layout: &NodeLayout) -> svg_element::Group {
    let bounds = layout.bounds();
    let connector = node.export_connector();

    let style = ShapeStyle {
        fill: if connector.is_some() {
            ctx.palette.export_fill
        } else {
            ctx.palette.node_fill
        },
        stroke: ctx.palette.node_stroke,
        stroke_width: NODE_STROKE_WIDTH,
    };

    let mut group = svg_element::Group::new()
        .set(
            "class",
            if connector.is_some() {
                "node export-connector"
            } else {
                "node"
            },
        )
        .set("data-id", node.id.as_str())
        .set("data-shape", node.shape.as_str())
        .set("filter", format!("url(#{SHADOW_FILTER_ID})"));

    if let Some(device) = node.device().filter(|_| ctx.interactive) {
        if let Some(device_type) = device.device_type {
            group = group.set("data-device-type", device_type.as_str());
        }
        if let Some(vendor) = &device.vendor {
            group = group.set("data-device-vendor", vendor.as_str());
        }
        if let Some(model) = &device.model {
            group = group.set("data-device-model", model.as_str());
        }
    }
    if ctx.interactive {
        if let Ok(json) = serde_json::to_string(node) {
            group = group.set("data-device-json", json);
        }
    }

    if let Some(connector) = connector {
        group = group
            .set("data-export", "true")
            .set("data-export-pin", connector.pin_id.as_str())
            .set("data-export-direction", connector.direction.as_str());
        let mut title = Element::new("title");
        title.append(SvgText::new(export_tooltip(connector)));
        group = group.add(title);
    }

    group
        .add(render_shape(node.shape, bounds, &style))
        .add(render_content(ctx, node, bounds))
}

/// Draws nodes into the node layer and their ports into the port layer.
pub(crate) fn render_nodes(ctx: &RenderContext<'_>, output: &mut LayeredOutput) {
    for node in &ctx.graph.nodes {
        let Some(layout) = ctx.layout.node(&node.id) else {
            debug!(node = node.id; "Skipping node without layout");
            continue;
        };
        output.add_to_layer(RenderLayer::Node, Box::new(render_node(ctx, node, layout)));

        for (name, port) in &node.ports {
            let Some(port_layout) = ctx.layout.port(&node.id, name) else {
                continue;
            };
            let size = if port_layout.size.is_zero() {
                Size::new(PORT_SIZE, PORT_SIZE)
            } else {
                port_layout.size
            };
            let marker = Bounds::new_from_center(port_layout.position, size);
            let mut rect = svg_element::Rectangle::new()
                .set("class", "port")
                .set("data-port", port_key(&node.id, name))
                .set("data-side", side_name(port_layout.side))
                .set("x", fmt_num(marker.min_x()))
                .set("y", fmt_num(marker.min_y()))
                .set("width", fmt_num(marker.width()))
                .set("height", fmt_num(marker.height()))
                .set("rx", 1.5)
                .set("fill", ctx.palette.port_fill)
                .set("stroke", ctx.palette.port_stroke)
                .set("stroke-width", 1);
            if ctx.interactive {
                if let Some(label) = &port.label {
                    rect = rect.set("data-port-label", label.as_str());
                }
            }
            output.add_to_layer(RenderLayer::Port, Box::new(rect));
        }
    }
}

pub(crate) fn side_name(side: PortSide) -> &'static str {
    match side {
        PortSide::Top => "top",
        PortSide::Right => "right",
        PortSide::Bottom => "bottom",
        PortSide::Left => "left",
    }
}
