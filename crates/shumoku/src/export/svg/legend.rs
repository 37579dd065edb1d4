//! Legend listing the bandwidths and device types present in a graph.

use shumoku_core::{
    geometry::{Bounds, Point},
    model::{Bandwidth, DeviceType, LegendPosition, NetworkGraph},
};
use svg::node::{Text as SvgText, element as svg_element};

use super::{RenderContext, links::parallel_offsets, paths::fmt_num};
use crate::layout::estimate_text_width;

const PADDING: f32 = 10.0;
const ROW_HEIGHT: f32 = 20.0;
const SWATCH_WIDTH: f32 = 28.0;
const SWATCH_GAP: f32 = 8.0;
const FONT_SIZE: f32 = 11.0;
const TITLE: &str = "Legend";
/// Distance between the content and the legend box.
const MARGIN: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LegendItem {
    Bandwidth(Bandwidth),
    Device(DeviceType),
}

impl LegendItem {
    fn text(&self) -> &'static str {
        match self {
            Self::Bandwidth(bandwidth) => bandwidth.as_str(),
            Self::Device(device_type) => device_type.display_name(),
        }
    }
}

/// Items for everything that actually occurs: bandwidths ascending, then
/// device types in declaration order of the enum.
pub(crate) fn legend_items(graph: &NetworkGraph) -> Vec<LegendItem> {
    graph
        .bandwidths()
        .into_iter()
        .map(LegendItem::Bandwidth)
        .chain(graph.device_types().into_iter().map(LegendItem::Device))
        .collect()
}

/// Legend box placed outside `content` at the requested corner.
pub(crate) fn legend_bounds(items: &[LegendItem], content: Bounds, position: LegendPosition) -> Bounds {
    let text_width = items
        .iter()
        .map(|item| estimate_text_width(item.text(), FONT_SIZE))
        .fold(estimate_text_width(TITLE, FONT_SIZE), f32::max);
    let width = 2.0 * PADDING + SWATCH_WIDTH + SWATCH_GAP + text_width;
    let height = 2.0 * PADDING + ROW_HEIGHT * (items.len() as f32 + 1.0);

    if !content.is_valid() {
        return Bounds::new(0.0, 0.0, width, height);
    }
    let x = match position {
        LegendPosition::TopLeft | LegendPosition::BottomLeft => content.min_x(),
        LegendPosition::TopRight | LegendPosition::BottomRight => content.max_x() - width,
    };
    let y = match position {
        LegendPosition::TopLeft | LegendPosition::TopRight => content.min_y() - MARGIN - height,
        LegendPosition::BottomLeft | LegendPosition::BottomRight => content.max_y() + MARGIN,
    };
    Bounds::new(x, y, width, height)
}

fn swatch(ctx: &RenderContext<'_>, item: LegendItem, origin: Point) -> svg_element::Group {
    let group = svg_element::Group::new().set("class", "legend-swatch");
    let center_y = origin.y() + ROW_HEIGHT / 2.0;
    match item {
        LegendItem::Bandwidth(bandwidth) => {
            let mut group = group;
            for offset in parallel_offsets(bandwidth.line_count(), 3.0) {
                let y = fmt_num(center_y + offset);
                group = group.add(
                    svg_element::Line::new()
                        .set("x1", fmt_num(origin.x()))
                        .set("x2", fmt_num(origin.x() + SWATCH_WIDTH))
                        .set("y1", y.as_str())
                        .set("y2", y.as_str())
                        .set("stroke", ctx.palette.link)
                        .set("stroke-width", 1.5),
                );
            }
            group
        }
        LegendItem::Device(device_type) => match ctx.icons.icon_for(device_type) {
            Some(icon) => group.add(
                svg_element::SVG::new()
                    .set("x", fmt_num(origin.x() + SWATCH_WIDTH / 2.0 - 8.0))
                    .set("y", fmt_num(center_y - 8.0))
                    .set("width", 16)
                    .set("height", 16)
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
                    ),
            ),
            None => group,
        },
    }
}

fn text(content: &str, x: f32, y: f32, fill: &str, weight: &str) -> svg_element::Text {
    svg_element::Text::new("")
        .set("x", fmt_num(x))
        .set("y", fmt_num(y))
        .set("dominant-baseline", "central")
        .set("font-size", fmt_num(FONT_SIZE))
        .set("font-weight", weight)
        .set("fill", fill)
        .add(SvgText::new(content))
}

/// The legend group and its bounds, or `None` when nothing would be listed.
pub(crate) fn render_legend(
    ctx: &RenderContext<'_>,
    content: Bounds,
) -> Option<(Bounds, svg_element::Group)> {
    let items = legend_items(ctx.graph);
    if items.is_empty() {
        return None;
    }
    let bounds = legend_bounds(&items, content, ctx.graph.settings.legend.position);

    let mut group = svg_element::Group::new().set("class", "legend").add(
        svg_element::Rectangle::new()
            .set("x", fmt_num(bounds.min_x()))
            .set("y", fmt_num(bounds.min_y()))
            .set("width", fmt_num(bounds.width()))
            .set("height", fmt_num(bounds.height()))
            .set("rx", 6)
            .set("fill", ctx.palette.legend_background)
            .set("stroke", ctx.palette.subgraph_stroke),
    );

    let left = bounds.min_x() + PADDING;
    let mut top = bounds.min_y() + PADDING;
    group = group.add(text(TITLE, left, top + ROW_HEIGHT / 2.0, ctx.palette.text, "600"));
    top += ROW_HEIGHT;

    for item in items {
        group = group
            .add(swatch(ctx, item, Point::new(left, top)))
            .add(text(
                item.text(),
                left + SWATCH_WIDTH + SWATCH_GAP,
                top + ROW_HEIGHT / 2.0,
                ctx.palette.text_secondary,
                "400",
            ));
        top += ROW_HEIGHT;
    }

    Some((bounds, group))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shumoku_core::model::{Endpoint, Link, Node};

    fn graph() -> NetworkGraph {
        let mut graph = NetworkGraph::new();
        graph.nodes.push(Node::new("r1").with_device_type(DeviceType::Router));
        graph.nodes.push(Node::new("sw1").with_device_type(DeviceType::L2Switch));
        graph.links.push(
            Link::new(Endpoint::node("r1"), Endpoint::node("sw1")).with_bandwidth(Bandwidth::G100),
        );
        graph.links.push(
            Link::new(Endpoint::node("sw1"), Endpoint::node("r1")).with_bandwidth(Bandwidth::G1),
        );
        graph
    }

    #[test]
    fn test_items_only_list_used_values() {
        assert_eq!(
            legend_items(&graph()),
            vec![
                LegendItem::Bandwidth(Bandwidth::G1),
                LegendItem::Bandwidth(Bandwidth::G100),
                LegendItem::Device(DeviceType::Router),
                LegendItem::Device(DeviceType::L2Switch),
            ]
        );
        assert!(legend_items(&NetworkGraph::new()).is_empty());
    }

    #[test]
    fn test_bounds_outside_content_corner() {
        let content = Bounds::new(0.0, 0.0, 400.0, 300.0);
        let items = legend_items(&graph());

        let bottom_right = legend_bounds(&items, content, LegendPosition::BottomRight);
        assert_eq!(bottom_right.max_x(), 400.0);
        assert!(bottom_right.min_y() >= 300.0);

        let top_left = legend_bounds(&items, content, LegendPosition::TopLeft);
        assert_eq!(top_left.min_x(), 0.0);
        assert!(top_left.max_y() <= 0.0);
    }
}
