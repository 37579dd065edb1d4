//! Text labels with opaque backgrounds, and port label placement.

use shumoku_core::{color::Palette, geometry::Point};
use svg::node::{Text as SvgText, element as svg_element};

use super::paths::fmt_num;
use crate::layout::estimate_text_width;

pub(crate) const LABEL_FONT_SIZE: f32 = 11.0;
const LABEL_PADDING: f32 = 3.0;
/// Distance between a port and its label.
const PORT_LABEL_GAP: f32 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// Where a label goes: `position` is the anchor point on the vertical
/// center of the text block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LabelPlacement {
    pub position: Point,
    pub anchor: Anchor,
}

/// Label text on a background rectangle sized from the character count.
pub(crate) fn render_label<S: AsRef<str>>(
    lines: &[S],
    placement: LabelPlacement,
    font_size: f32,
    class: &str,
    palette: &Palette,
) -> svg_element::Group {
    let line_height = font_size * 1.25;
    let text_width = lines
        .iter()
        .map(|line| estimate_text_width(line.as_ref(), font_size))
        .fold(0.0, f32::max);
    let width = text_width + 2.0 * LABEL_PADDING;
    let height = lines.len() as f32 * line_height + 2.0 * LABEL_PADDING;

    let (x, y) = (placement.position.x(), placement.position.y());
    let left = match placement.anchor {
        Anchor::Start => x - LABEL_PADDING,
        Anchor::Middle => x - width / 2.0,
        Anchor::End => x - width + LABEL_PADDING,
    };
    let top = y - height / 2.0;

    let background = svg_element::Rectangle::new()
        .set("x", fmt_num(left))
        .set("y", fmt_num(top))
        .set("width", fmt_num(width))
        .set("height", fmt_num(height))
        .set("rx", 2)
        .set("fill", palette.label_background)
        .set("fill-opacity", 0.9);

    let mut group = svg_element::Group::new().set("class", class).add(background);
    for (i, line) in lines.iter().enumerate() {
        let baseline = top + LABEL_PADDING + line_height * (i as f32 + 0.5);
        let text = svg_element::Text::new("")
            .set("x", fmt_num(x))
            .set("y", fmt_num(baseline))
            .set("text-anchor", placement.anchor.as_str())
            .set("dominant-baseline", "central")
            .set("font-size", fmt_num(font_size))
            .set("fill", palette.text_secondary)
            .add(SvgText::new(line.as_ref()));
        group = group.add(text);
    }
    group
}

/// Deterministic parity for ports centred on their node.
fn name_hash(name: &str) -> u32 {
    name.bytes()
        .fold(0u32, |hash, byte| hash.wrapping_mul(31).wrapping_add(u32::from(byte)))
}

/// Places the label of a port at the start of a link route.
///
/// `toward` is the next route point after the port. On a vertical-dominant
/// first segment the label moves to the side of the node the port sits on;
/// ports on the node's centre line pick a side from a hash of their name so
/// neighbouring labels alternate. On a horizontal-dominant segment the
/// label sits below the line, anchored toward the link's centre.
pub(crate) fn port_label_placement(
    port: Point,
    node_center: Point,
    toward: Point,
    link_center: Point,
    port_name: &str,
) -> LabelPlacement {
    let segment = toward.sub_point(port);

    if segment.y().abs() >= segment.x().abs() {
        let dx = port.x() - node_center.x();
        let side = if dx.abs() < 1.0 {
            if name_hash(port_name) % 2 == 0 { 1.0 } else { -1.0 }
        } else {
            dx.signum()
        };
        let along = if segment.y() >= 0.0 { 1.0 } else { -1.0 };
        LabelPlacement {
            position: Point::new(
                port.x() + side * PORT_LABEL_GAP,
                port.y() + along * (PORT_LABEL_GAP + LABEL_FONT_SIZE / 2.0),
            ),
            anchor: if side > 0.0 { Anchor::Start } else { Anchor::End },
        }
    } else {
        let along = if segment.x() >= 0.0 { 1.0 } else { -1.0 };
        LabelPlacement {
            position: Point::new(
                port.x() + along * PORT_LABEL_GAP,
                port.y() + PORT_LABEL_GAP + LABEL_FONT_SIZE / 2.0,
            ),
            anchor: if link_center.x() >= port.x() {
                Anchor::Start
            } else {
                Anchor::End
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTER: Point = Point::new(100.0, 100.0);

    #[test]
    fn test_vertical_segment_label_follows_port_side() {
        // Port right of the node centre, link leaving downward.
        let placement = port_label_placement(
            Point::new(130.0, 140.0),
            CENTER,
            Point::new(130.0, 200.0),
            Point::new(130.0, 250.0),
            "eth0",
        );
        assert_eq!(placement.anchor, Anchor::Start);
        assert!(placement.position.x() > 130.0);
        assert!(placement.position.y() > 140.0);

        let left = port_label_placement(
            Point::new(70.0, 60.0),
            CENTER,
            Point::new(70.0, 0.0),
            Point::new(70.0, -50.0),
            "eth1",
        );
        assert_eq!(left.anchor, Anchor::End);
        assert!(left.position.x() < 70.0);
        assert!(left.position.y() < 60.0);
    }

    #[test]
    fn test_centered_ports_alternate_by_name() {
        let place = |name: &str| {
            port_label_placement(
                Point::new(100.0, 140.0),
                CENTER,
                Point::new(100.0, 200.0),
                Point::new(100.0, 250.0),
                name,
            )
        };
        // "a" and "b" hash to neighbouring values.
        assert_ne!(place("a").anchor, place("b").anchor);
        assert_eq!(place("a"), place("a"));
    }

    #[test]
    fn test_horizontal_segment_label_below_line() {
        let placement = port_label_placement(
            Point::new(180.0, 100.0),
            CENTER,
            Point::new(300.0, 100.0),
            Point::new(400.0, 100.0),
            "ge-0/0/1",
        );
        assert!(placement.position.y() > 100.0);
        assert_eq!(placement.anchor, Anchor::Start);

        let toward_left = port_label_placement(
            Point::new(20.0, 100.0),
            CENTER,
            Point::new(-100.0, 100.0),
            Point::new(-200.0, 100.0),
            "ge-0/0/2",
        );
        assert_eq!(toward_left.anchor, Anchor::End);
    }

    #[test]
    fn test_label_background_sized_from_characters() {
        let group = render_label(
            &["abcd"],
            LabelPlacement {
                position: Point::new(0.0, 0.0),
                anchor: Anchor::Middle,
            },
            10.0,
            "link-label",
            &Palette::LIGHT,
        );
        let rendered = group.to_string();
        // 4 chars * 10 * 0.6 + 2 * 3 padding.
        assert!(rendered.contains(r#"width="30""#), "{rendered}");
        assert!(rendered.contains("abcd"));
        assert!(rendered.contains(r#"text-anchor="middle""#));
    }
}
