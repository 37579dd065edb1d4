//! Subgraph containers, their boundary pins and embedded child sheets.

use log::{debug, trace};
use shumoku_core::{
    color::color_or,
    geometry::{Bounds, Insets},
    layout::{PinLayout, PortSide, SubgraphLayout},
    model::Subgraph,
};
use shumoku_parser::ROOT_SHEET;
use svg::node::{Blob, Text as SvgText, element as svg_element};

use super::{
    RenderContext,
    labels::{self, Anchor, LabelPlacement},
    layer::{LayeredOutput, RenderLayer},
    nodes::side_name,
    paths::fmt_num,
};

const CORNER_RADIUS: f32 = 12.0;
const HEADER_HEIGHT: f32 = 36.0;
const HEADER_ICON_SIZE: f32 = 20.0;
const HEADER_INSET: f32 = 12.0;
const LABEL_FONT_SIZE: f32 = 13.0;
const EMBED_INSET: f32 = 8.0;
const PIN_RADIUS: f32 = 5.0;
const PIN_LABEL_GAP: f32 = 10.0;

/// Id of the sheet a drill-down subgraph opens, as seen from `sheet`.
///
/// ```text
/// root sheet, subgraph "dc1"         -> "dc1"
/// sheet "site1", subgraph "dc1"      -> "site1/dc1"
/// ```
pub(crate) fn sheet_target_id(sheet: Option<&str>, subgraph: &str) -> String {
    match sheet {
        Some(sheet) if sheet != ROOT_SHEET => format!("{sheet}/{subgraph}"),
        _ => subgraph.to_string(),
    }
}

/// Number of ancestors; unknown parents end the walk and cycles are cut off.
fn depth(ctx: &RenderContext<'_>, subgraph: &Subgraph) -> usize {
    let mut depth = 0;
    let mut parent = subgraph.parent.as_deref();
    while let Some(id) = parent {
        if depth > ctx.graph.subgraphs.len() {
            break;
        }
        match ctx.graph.subgraph(id) {
            Some(next) => {
                depth += 1;
                parent = next.parent.as_deref();
            }
            None => break,
        }
    }
    depth
}

fn render_header(ctx: &RenderContext<'_>, subgraph: &Subgraph, bounds: Bounds) -> svg_element::Group {
    let mut group = svg_element::Group::new().set("class", "subgraph-header");
    let mut text_x = bounds.min_x() + HEADER_INSET;
    let center_y = bounds.min_y() + HEADER_HEIGHT / 2.0;

    if let Some(icon) = subgraph.icon.and_then(|icon| ctx.icons.icon_for(icon)) {
        let element = svg_element::SVG::new()
            .set("x", fmt_num(text_x))
            .set("y", fmt_num(center_y - HEADER_ICON_SIZE / 2.0))
            .set("width", fmt_num(HEADER_ICON_SIZE))
            .set("height", fmt_num(HEADER_ICON_SIZE))
            .set(
                "viewBox",
                format!(
                    "0 0 {} {}",
                    fmt_num(icon.view_box.width()),
                    fmt_num(icon.view_box.height())
                ),
            )
            .set("color", ctx.palette.text_secondary)
            .add(
                svg_element::Path::new()
                    .set("d", icon.body)
                    .set("fill", "currentColor")
                    .set("fill-rule", "evenodd"),
            );
        group = group.add(element);
        text_x += HEADER_ICON_SIZE + 6.0;
    }

    let label = if subgraph.label.is_empty() {
        subgraph.id.as_str()
    } else {
        subgraph.label.as_str()
    };
    group.add(
        svg_element::Text::new("")
            .set("x", fmt_num(text_x))
            .set("y", fmt_num(center_y))
            .set("dominant-baseline", "central")
            .set("font-size", fmt_num(LABEL_FONT_SIZE))
            .set("font-weight", "600")
            .set("fill", ctx.palette.text)
            .add(SvgText::new(label)),
    )
}

fn render_subgraph(
    ctx: &RenderContext<'_>,
    subgraph: &Subgraph,
    layout: &SubgraphLayout,
) -> svg_element::Group {
    let bounds = layout.bounds;
    let mut group = svg_element::Group::new()
        .set("class", "subgraph")
        .set("data-id", subgraph.id.as_str());

    if subgraph.has_sheet() {
        group = group
            .set("data-has-sheet", "true")
            .set("data-sheet-id", sheet_target_id(ctx.sheet_id, &subgraph.id))
            .set("cursor", "zoom-in");
        if let Ok(json) = serde_json::to_string(&bounds) {
            group = group.set("data-bounds", json);
        }
    }

    let mut rect = svg_element::Rectangle::new()
        .set("x", fmt_num(bounds.min_x()))
        .set("y", fmt_num(bounds.min_y()))
        .set("width", fmt_num(bounds.width()))
        .set("height", fmt_num(bounds.height()))
        .set("rx", fmt_num(CORNER_RADIUS))
        .set(
            "fill",
            color_or(subgraph.style.fill.as_deref(), ctx.palette.subgraph_fill),
        )
        .set(
            "stroke",
            color_or(subgraph.style.stroke.as_deref(), ctx.palette.subgraph_stroke),
        )
        .set("stroke-width", 1.5);
    if let Some(dasharray) = &subgraph.style.stroke_dasharray {
        rect = rect.set("stroke-dasharray", dasharray.as_str());
    }
    group = group.add(rect).add(render_header(ctx, subgraph, bounds));

    if let Some(fragment) = ctx.embedded.get(&subgraph.id) {
        let area = bounds.add_padding(Insets::new(
            -HEADER_HEIGHT,
            -EMBED_INSET,
            -EMBED_INSET,
            -EMBED_INSET,
        ));
        if area.is_valid() && fragment.view_box.is_valid() {
            trace!(subgraph = subgraph.id; "Embedding child sheet");
            let embedded = svg_element::SVG::new()
                .set("class", "embedded-sheet")
                .set("x", fmt_num(area.min_x()))
                .set("y", fmt_num(area.min_y()))
                .set("width", fmt_num(area.width()))
                .set("height", fmt_num(area.height()))
                .set("viewBox", view_box_attr(fragment.view_box))
                .set("preserveAspectRatio", "xMidYMid meet")
                .add(Blob::new(fragment.content.clone()));
            group = group.add(embedded);
        }
    }

    group
}

pub(crate) fn view_box_attr(bounds: Bounds) -> String {
    format!(
        "{} {} {} {}",
        fmt_num(bounds.min_x()),
        fmt_num(bounds.min_y()),
        fmt_num(bounds.width()),
        fmt_num(bounds.height())
    )
}

/// Pin marker on the boundary plus its label just outside the box.
fn render_pin(
    ctx: &RenderContext<'_>,
    subgraph: &Subgraph,
    pin: &PinLayout,
) -> (svg_element::Circle, svg_element::Group) {
    let marker = svg_element::Circle::new()
        .set("class", "pin")
        .set("data-pin", format!("{}#{}", subgraph.id, pin.id))
        .set("data-direction", pin.direction.as_str())
        .set("data-side", side_name(pin.side))
        .set("cx", fmt_num(pin.position.x()))
        .set("cy", fmt_num(pin.position.y()))
        .set("r", fmt_num(PIN_RADIUS))
        .set("fill", ctx.palette.port_fill)
        .set("stroke", ctx.palette.port_stroke)
        .set("stroke-width", 1.5);

    let text = subgraph
        .pin(&pin.id)
        .map_or(pin.id.as_str(), |declared| declared.display_label());
    let outward = pin.side.outward();
    let anchor = match pin.side {
        PortSide::Left => Anchor::End,
        PortSide::Right => Anchor::Start,
        PortSide::Top | PortSide::Bottom => Anchor::Middle,
    };
    let placement = LabelPlacement {
        position: pin
            .position
            .add_point(outward.scale(PIN_LABEL_GAP + labels::LABEL_FONT_SIZE / 2.0)),
        anchor,
    };
    let label = labels::render_label(
        &[text],
        placement,
        labels::LABEL_FONT_SIZE,
        "pin-label",
        ctx.palette,
    );
    (marker, label)
}

/// Draws containers outermost first so nested boxes stay on top.
pub(crate) fn render_subgraphs(ctx: &RenderContext<'_>, output: &mut LayeredOutput) {
    let mut ordered: Vec<(usize, &Subgraph)> = ctx
        .graph
        .subgraphs
        .iter()
        .map(|subgraph| (depth(ctx, subgraph), subgraph))
        .collect();
    ordered.sort_by_key(|(depth, _)| *depth);

    for (_, subgraph) in ordered {
        let Some(layout) = ctx.layout.subgraph(&subgraph.id) else {
            debug!(subgraph = subgraph.id; "Skipping subgraph without layout");
            continue;
        };
        output.add_to_layer(
            RenderLayer::Subgraph,
            Box::new(render_subgraph(ctx, subgraph, layout)),
        );
        for pin in layout.pins.values() {
            let (marker, label) = render_pin(ctx, subgraph, pin);
            output.add_to_layer(RenderLayer::Port, Box::new(marker));
            output.add_to_layer(RenderLayer::LinkLabel, Box::new(label));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_target_id_prefixes_non_root_sheets() {
        assert_eq!(sheet_target_id(None, "dc1"), "dc1");
        assert_eq!(sheet_target_id(Some(ROOT_SHEET), "dc1"), "dc1");
        assert_eq!(sheet_target_id(Some("site1"), "dc1"), "site1/dc1");
    }

    #[test]
    fn test_view_box_attr() {
        assert_eq!(view_box_attr(Bounds::new(-10.5, 0.0, 200.0, 100.25)), "-10.5 0 200 100.25");
    }
}
