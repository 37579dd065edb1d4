//! Path geometry: parallel offsets with mitred joins, per-line corner radii
//! and SVG path data for each edge style.

use std::fmt::Write as _;

use shumoku_core::geometry::Point;

/// Mitre length is capped at this multiple of the offset.
const MITRE_LIMIT: f32 = 4.0;

/// Corners tighter than this are drawn as plain joins.
const MIN_CORNER_RADIUS: f32 = 1.0;

/// Formats a coordinate with at most two decimals and no trailing zeros.
///
/// Keeps output stable across platforms and never prints `-0`.
pub(crate) fn fmt_num(value: f32) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 || !rounded.is_finite() {
        return "0".to_string();
    }
    let text = format!("{rounded:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

pub(crate) fn fmt_point(point: Point) -> String {
    format!("{} {}", fmt_num(point.x()), fmt_num(point.y()))
}

/// Drops consecutive duplicates so every segment has a direction.
pub(crate) fn dedup_points(points: &[Point]) -> Vec<Point> {
    let mut result: Vec<Point> = Vec::with_capacity(points.len());
    for &point in points {
        if result.last().is_some_and(|last| last.distance(point) < 1e-3) {
            continue;
        }
        result.push(point);
    }
    result
}

/// Unit directions of each segment.
fn directions(points: &[Point]) -> Vec<Point> {
    points
        .windows(2)
        .map(|pair| pair[1].sub_point(pair[0]).normalize())
        .collect()
}

/// Shifts a polyline sideways by `offset` (positive = right of travel).
///
/// Interior vertices are joined with a mitre so parallel copies stay
/// parallel through bends. A mitre never moves a vertex along either
/// adjacent segment by more than half the shorter one, so short jogs pinch
/// instead of folding back.
pub(crate) fn offset_polyline(points: &[Point], offset: f32) -> Vec<Point> {
    if offset == 0.0 || points.len() < 2 {
        return points.to_vec();
    }
    let dirs = directions(points);
    let normals: Vec<Point> = dirs.iter().map(|dir| dir.perpendicular()).collect();

    points
        .iter()
        .enumerate()
        .map(|(i, &point)| {
            let incoming = i.checked_sub(1).map(|prev| normals[prev]);
            let outgoing = normals.get(i).copied();
            match (incoming, outgoing) {
                (Some(normal), None) | (None, Some(normal)) => {
                    point.add_point(normal.scale(offset))
                }
                (None, None) => point,
                (Some(incoming), Some(outgoing)) => {
                    let mitre = incoming.add_point(outgoing).normalize();
                    let cos = mitre.dot(incoming);
                    if mitre.is_zero() || cos.abs() < 1.0 / MITRE_LIMIT {
                        // U-turn: fall back to the incoming normal.
                        point.add_point(incoming.scale(offset))
                    } else {
                        let shift = mitre.scale(offset / cos);
                        let along = shift.dot(dirs[i - 1]).abs().max(shift.dot(dirs[i]).abs());
                        let limit = point
                            .distance(points[i - 1])
                            .min(point.distance(points[i + 1]))
                            / 2.0;
                        if along > limit {
                            point.add_point(shift.scale(limit / along))
                        } else {
                            point.add_point(shift)
                        }
                    }
                }
            }
        })
        .collect()
}

/// Turn direction at each interior vertex: `1.0` clockwise on screen,
/// `-1.0` counter-clockwise, `0.0` straight.
pub(crate) fn turn_signs(points: &[Point]) -> Vec<f32> {
    let dirs = directions(points);
    dirs.windows(2)
        .map(|pair| {
            let cross = pair[0].cross(pair[1]);
            if cross.abs() < 1e-4 {
                0.0
            } else {
                cross.signum()
            }
        })
        .collect()
}

/// Corner radius for each interior vertex of one parallel line.
///
/// `turns` comes from the unshifted route. A line offset to the outside of
/// a turn gets a wider radius, one on the inside a tighter one. Each radius
/// is clamped to half the shorter adjacent segment of `line`; anything
/// below one unit becomes a sharp join (`0.0`).
pub(crate) fn corner_radii(line: &[Point], turns: &[f32], radius: f32, offset: f32) -> Vec<f32> {
    turns
        .iter()
        .enumerate()
        .map(|(i, turn)| {
            let vertex = i + 1;
            let before = line[vertex].distance(line[vertex - 1]);
            let after = line[vertex].distance(line[vertex + 1]);
            let limit = before.min(after) / 2.0;
            let adjusted = (radius - turn * offset).min(limit);
            if *turn == 0.0 || adjusted < MIN_CORNER_RADIUS {
                0.0
            } else {
                adjusted
            }
        })
        .collect()
}

/// `M`/`L` path through every point.
pub(crate) fn polyline_data(points: &[Point]) -> String {
    let mut data = String::new();
    for (i, point) in points.iter().enumerate() {
        if i > 0 {
            data.push_str(" L ");
        } else {
            data.push_str("M ");
        }
        data.push_str(&fmt_point(*point));
    }
    data
}

/// Path with quadratic rounded corners; `radii[i]` belongs to vertex `i + 1`.
pub(crate) fn rounded_data(points: &[Point], radii: &[f32]) -> String {
    let Some(first) = points.first() else {
        return String::new();
    };
    let mut data = format!("M {}", fmt_point(*first));
    for i in 1..points.len() {
        let vertex = points[i];
        let radius = radii.get(i - 1).copied().unwrap_or(0.0);
        if i + 1 == points.len() || radius <= 0.0 {
            let _ = write!(data, " L {}", fmt_point(vertex));
            continue;
        }
        let incoming = vertex.sub_point(points[i - 1]).normalize();
        let outgoing = points[i + 1].sub_point(vertex).normalize();
        let entry = vertex.sub_point(incoming.scale(radius));
        let exit = vertex.add_point(outgoing.scale(radius));
        let _ = write!(
            data,
            " L {} Q {} {}",
            fmt_point(entry),
            fmt_point(vertex),
            fmt_point(exit)
        );
    }
    data
}

/// Catmull-Rom spline through the points, as cubic Béziers.
pub(crate) fn spline_data(points: &[Point]) -> String {
    if points.len() < 3 {
        return polyline_data(points);
    }
    let mut data = format!("M {}", fmt_point(points[0]));
    for i in 0..points.len() - 1 {
        let p0 = points[i.saturating_sub(1)];
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points.get(i + 2).copied().unwrap_or(p2);
        let c1 = p1.add_point(p2.sub_point(p0).scale(1.0 / 6.0));
        let c2 = p2.sub_point(p3.sub_point(p1).scale(1.0 / 6.0));
        let _ = write!(
            data,
            " C {} {} {}",
            fmt_point(c1),
            fmt_point(c2),
            fmt_point(p2)
        );
    }
    data
}

/// Point halfway along the polyline's length.
pub(crate) fn midpoint_along(points: &[Point]) -> Point {
    let total: f32 = points.windows(2).map(|pair| pair[0].distance(pair[1])).sum();
    let mut remaining = total / 2.0;
    for pair in points.windows(2) {
        let length = pair[0].distance(pair[1]);
        if length >= remaining && length > 0.0 {
            return pair[0].lerp(pair[1], remaining / length);
        }
        remaining -= length;
    }
    points.first().copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    fn right_turn() -> Vec<Point> {
        // East, then south: clockwise on screen.
        vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 100.0),
        ]
    }

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(1.0), "1");
        assert_eq!(fmt_num(1.25), "1.25");
        assert_eq!(fmt_num(1.2), "1.2");
        assert_eq!(fmt_num(-0.001), "0");
        assert_eq!(fmt_num(f32::NAN), "0");
    }

    #[test]
    fn test_offset_straight_line() {
        let line = offset_polyline(&[Point::new(0.0, 0.0), Point::new(100.0, 0.0)], 3.0);
        // Right of eastward travel is +y on screen.
        assert_eq!(line, vec![Point::new(0.0, 3.0), Point::new(100.0, 3.0)]);
    }

    #[test]
    fn test_offset_corner_is_mitred() {
        let line = offset_polyline(&right_turn(), 5.0);
        assert_approx_eq!(f32, line[1].x(), 95.0, epsilon = 1e-3);
        assert_approx_eq!(f32, line[1].y(), 5.0, epsilon = 1e-3);
        assert_approx_eq!(f32, line[2].x(), 95.0, epsilon = 1e-3);
    }

    #[test]
    fn test_short_jog_keeps_segment_directions() {
        // A 6-unit jog between two turns, turning back (U) or onward (Z).
        let u_turn = vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 50.0),
            Point::new(6.0, 50.0),
            Point::new(6.0, 0.0),
        ];
        let z_turn = vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 50.0),
            Point::new(6.0, 50.0),
            Point::new(6.0, 100.0),
        ];

        for route in [&u_turn, &z_turn] {
            let original = directions(route);
            for offset in [-8.0, -4.0, 4.0, 8.0] {
                let line = offset_polyline(route, offset);
                for (segment, dir) in line.windows(2).zip(&original) {
                    let step = segment[1].sub_point(segment[0]);
                    assert!(
                        step.dot(*dir) >= -1e-3,
                        "offset {offset} reverses segment {segment:?}"
                    );
                }
            }
        }

        // The end points keep the full offset.
        let outer = offset_polyline(&u_turn, 8.0);
        assert_approx_eq!(f32, outer[0].x(), -8.0, epsilon = 1e-3);
        assert_approx_eq!(f32, outer[3].x(), 14.0, epsilon = 1e-3);
    }

    #[test]
    fn test_turn_signs() {
        assert_eq!(turn_signs(&right_turn()), vec![1.0]);
        let left = vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, -100.0),
        ];
        assert_eq!(turn_signs(&left), vec![-1.0]);
    }

    #[test]
    fn test_inside_line_gets_tighter_radius() {
        let route = right_turn();
        let turns = turn_signs(&route);

        let inside = offset_polyline(&route, 4.0);
        let outside = offset_polyline(&route, -4.0);
        let inner = corner_radii(&inside, &turns, 10.0, 4.0);
        let outer = corner_radii(&outside, &turns, 10.0, -4.0);

        assert_approx_eq!(f32, inner[0], 6.0);
        assert_approx_eq!(f32, outer[0], 14.0);
    }

    #[test]
    fn test_radius_clamped_and_degrades_to_sharp() {
        let short = vec![
            Point::new(0.0, 0.0),
            Point::new(6.0, 0.0),
            Point::new(6.0, 100.0),
        ];
        let turns = turn_signs(&short);
        assert_approx_eq!(f32, corner_radii(&short, &turns, 10.0, 0.0)[0], 3.0);
        // The inside line of a tight turn loses its curve entirely.
        assert_eq!(corner_radii(&short, &turns, 2.0, 1.5), vec![0.0]);
    }

    #[test]
    fn test_rounded_data_uses_quadratic_corner() {
        let data = rounded_data(&right_turn(), &[10.0]);
        assert_eq!(data, "M 0 0 L 90 0 Q 100 0 100 10 L 100 100");
        assert_eq!(rounded_data(&right_turn(), &[0.0]), "M 0 0 L 100 0 L 100 100");
    }

    #[test]
    fn test_spline_and_polyline_data() {
        assert_eq!(
            polyline_data(&[Point::new(0.0, 0.0), Point::new(1.5, 2.0)]),
            "M 0 0 L 1.5 2"
        );
        let spline = spline_data(&right_turn());
        assert!(spline.starts_with("M 0 0 C"));
        assert_eq!(spline.matches(" C ").count(), 2);
    }

    #[test]
    fn test_midpoint_along() {
        let mid = midpoint_along(&right_turn());
        assert_approx_eq!(f32, mid.x(), 100.0);
        assert_approx_eq!(f32, mid.y(), 0.0);
    }
}
