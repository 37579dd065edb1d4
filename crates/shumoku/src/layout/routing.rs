//! Anchor selection and orthogonal link routing.

use shumoku_core::{
    geometry::{Bounds, Point},
    layout::PortSide,
};

const EPSILON: f32 = 0.01;

/// Side of `bounds` that faces `toward`.
///
/// Offsets are normalised by the box size so wide boxes prefer their long
/// sides.
pub(crate) fn facing_side(bounds: Bounds, toward: Point) -> PortSide {
    let delta = toward.sub_point(bounds.center());
    let dx = delta.x() / bounds.width().max(1.0);
    let dy = delta.y() / bounds.height().max(1.0);

    if dy.abs() >= dx.abs() {
        if dy >= 0.0 {
            PortSide::Bottom
        } else {
            PortSide::Top
        }
    } else if dx >= 0.0 {
        PortSide::Right
    } else {
        PortSide::Left
    }
}

/// The point at fraction `t` along `side`, left to right or top to bottom.
pub(crate) fn point_on_side(bounds: Bounds, side: PortSide, t: f32) -> Point {
    let x = bounds.min_x() + bounds.width() * t;
    let y = bounds.min_y() + bounds.height() * t;
    match side {
        PortSide::Top => Point::new(x, bounds.min_y()),
        PortSide::Bottom => Point::new(x, bounds.max_y()),
        PortSide::Left => Point::new(bounds.min_x(), y),
        PortSide::Right => Point::new(bounds.max_x(), y),
    }
}

/// Right-angle route between two anchors leaving their owners on the given sides.
pub(crate) fn orthogonal_route(
    start: Point,
    start_side: PortSide,
    end: Point,
    end_side: PortSide,
) -> Vec<Point> {
    let points = match (start_side.is_vertical(), end_side.is_vertical()) {
        (true, true) => {
            let mid_y = (start.y() + end.y()) / 2.0;
            vec![
                start,
                Point::new(start.x(), mid_y),
                Point::new(end.x(), mid_y),
                end,
            ]
        }
        (false, false) => {
            let mid_x = (start.x() + end.x()) / 2.0;
            vec![
                start,
                Point::new(mid_x, start.y()),
                Point::new(mid_x, end.y()),
                end,
            ]
        }
        (true, false) => vec![start, Point::new(start.x(), end.y()), end],
        (false, true) => vec![start, Point::new(end.x(), start.y()), end],
    };
    simplify(points)
}

/// Drops repeated points and the middle of collinear runs.
pub(crate) fn simplify(points: Vec<Point>) -> Vec<Point> {
    let mut result: Vec<Point> = Vec::with_capacity(points.len());
    for point in points {
        if result
            .last()
            .is_some_and(|last| last.distance(point) < EPSILON)
        {
            continue;
        }
        if let [.., a, b] = result.as_slice() {
            let incoming = b.sub_point(*a);
            let outgoing = point.sub_point(*b);
            if incoming.cross(outgoing).abs() < EPSILON && incoming.dot(outgoing) > 0.0 {
                result.pop();
            }
        }
        result.push(point);
    }
    result
}
