//! View box arithmetic and the transition thresholds.

use shumoku_core::geometry::{Bounds, Point, Size};

use super::{FIT_RATIO, SubgraphHit, ZOOM_IN_SCALE, ZOOM_OUT_SCALE};

/// Largest view box to subgraph area ratio that still counts as "focused".
const MAX_AREA_RATIO: f32 = 2.0;
/// Allowed center offset as a share of the subgraph diagonal.
const MAX_CENTER_OFFSET: f32 = 0.7;
/// Padding around a subgraph when zooming into it.
const TARGET_PADDING: f32 = 0.1;

pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// View box showing `content` centered in a container of `container`
/// pixels at 90% of the scale that would fill it.
///
/// Degenerate containers or content leave `content` unchanged.
pub fn fit_view_box(content: Bounds, container: Size) -> Bounds {
    if !content.is_valid() || container.width() <= 0.0 || container.height() <= 0.0 {
        return content;
    }
    let scale = (container.width() / content.width()).min(container.height() / content.height())
        * FIT_RATIO;
    Bounds::new_from_center(
        content.center(),
        Size::new(container.width() / scale, container.height() / scale),
    )
}

/// Zooms `view_box` by `factor` keeping `focus` at the same screen position.
pub fn zoom_at(view_box: Bounds, focus: Point, factor: f32) -> Bounds {
    if !factor.is_finite() || factor <= 0.0 {
        return view_box;
    }
    let min = view_box.min_point();
    Bounds::new(
        focus.x() - (focus.x() - min.x()) / factor,
        focus.y() - (focus.y() - min.y()) / factor,
        view_box.width() / factor,
        view_box.height() / factor,
    )
}

/// Current zoom relative to the sheet's original view box.
pub(crate) fn scale(view_box: Bounds, original: Bounds) -> f32 {
    if view_box.width() <= 0.0 {
        return 1.0;
    }
    original.width() / view_box.width()
}

/// Target view box for entering `hit`, if the view is zoomed in enough
/// and focused on it.
pub fn zoom_in_target(view_box: Bounds, original: Bounds, hit: &SubgraphHit) -> Option<Bounds> {
    if scale(view_box, original) < ZOOM_IN_SCALE || !hit.bounds.is_valid() {
        return None;
    }
    if view_box.area() / hit.bounds.area() > MAX_AREA_RATIO {
        return None;
    }
    if view_box.center().distance(hit.bounds.center()) > MAX_CENTER_OFFSET * hit.bounds.diagonal() {
        return None;
    }
    Some(hit.bounds.expand_by_fraction(TARGET_PADDING))
}

/// Whether a non-root sheet is zoomed out far enough to leave it.
pub fn zoom_out_allowed(view_box: Bounds, original: Bounds, at_root: bool) -> bool {
    if at_root || view_box.area() <= 0.0 {
        return false;
    }
    scale(view_box, original) <= ZOOM_OUT_SCALE && original.area() / view_box.area() < 0.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;

    const ORIGINAL: Bounds = Bounds::new(0.0, 0.0, 1000.0, 800.0);

    fn hit(bounds: Bounds) -> SubgraphHit {
        SubgraphHit {
            sheet_id: "dc1".to_string(),
            bounds,
        }
    }

    #[test]
    fn test_ease_out_cubic_endpoints() {
        assert_approx_eq!(f64, ease_out_cubic(0.0), 0.0);
        assert_approx_eq!(f64, ease_out_cubic(1.0), 1.0);
        assert_approx_eq!(f64, ease_out_cubic(0.5), 0.875);
        assert_approx_eq!(f64, ease_out_cubic(2.0), 1.0);
    }

    #[test]
    fn test_fit_uses_ninety_percent_of_min_scale() {
        let fitted = fit_view_box(Bounds::new(0.0, 0.0, 200.0, 100.0), Size::new(400.0, 400.0));
        // min(400/200, 400/100) * 0.9 = 1.8
        assert_approx_eq!(f32, fitted.width(), 400.0 / 1.8, epsilon = 1e-3);
        assert_approx_eq!(f32, fitted.height(), 400.0 / 1.8, epsilon = 1e-3);
        assert_approx_eq!(f32, fitted.center().x(), 100.0, epsilon = 1e-3);
        assert_approx_eq!(f32, fitted.center().y(), 50.0, epsilon = 1e-3);
    }

    #[test]
    fn test_zoom_keeps_focus_fixed() {
        let focus = Point::new(250.0, 100.0);
        let zoomed = zoom_at(ORIGINAL, focus, 2.0);
        assert_approx_eq!(f32, zoomed.width(), 500.0);
        // Relative position of the focus inside the box is unchanged.
        assert_approx_eq!(
            f32,
            (focus.x() - zoomed.min_x()) / zoomed.width(),
            (focus.x() - ORIGINAL.min_x()) / ORIGINAL.width()
        );
        assert_eq!(zoom_at(ORIGINAL, focus, 0.0), ORIGINAL);
    }

    #[test]
    fn test_zoom_in_requires_focus_on_subgraph() {
        let subgraph = Bounds::new(100.0, 100.0, 300.0, 200.0);
        let focused = Bounds::new(80.0, 80.0, 340.0, 272.0);
        let target = zoom_in_target(focused, ORIGINAL, &hit(subgraph)).expect("focused");
        assert_eq!(target, subgraph.expand_by_fraction(0.1));

        // Scale 1.25 is below the threshold.
        let wide = Bounds::new(0.0, 0.0, 800.0, 640.0);
        assert!(zoom_in_target(wide, ORIGINAL, &hit(subgraph)).is_none());

        // Zoomed in, but looking far away from the subgraph.
        let elsewhere = focused.translate(Point::new(500.0, 400.0));
        assert!(zoom_in_target(elsewhere, ORIGINAL, &hit(subgraph)).is_none());
    }

    #[test]
    fn test_zoom_out_never_at_root() {
        let far = Bounds::new(-2000.0, -2000.0, 5000.0, 4000.0);
        assert!(zoom_out_allowed(far, ORIGINAL, false));
        assert!(!zoom_out_allowed(far, ORIGINAL, true));
        assert!(!zoom_out_allowed(ORIGINAL, ORIGINAL, false));
    }

    proptest! {
        #[test]
        fn prop_no_zoom_in_below_threshold(width in 667.0f32..5000.0, x in -500.0f32..500.0) {
            let view_box = Bounds::new(x, x, width, width * 0.8);
            let subgraph = Bounds::new(x, x, width, width * 0.8);
            prop_assert!(zoom_in_target(view_box, ORIGINAL, &hit(subgraph)).is_none());
        }

        #[test]
        fn prop_no_zoom_out_above_threshold(width in 10.0f32..3333.0) {
            let view_box = Bounds::new(0.0, 0.0, width, width * 0.8);
            prop_assert!(!zoom_out_allowed(view_box, ORIGINAL, false));
        }
    }
}
