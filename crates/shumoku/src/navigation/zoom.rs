use log::{debug, info, trace};
use shumoku_core::geometry::{Bounds, Point};

use super::{
    ANIMATION_MS, DEBOUNCE_MS, DOUBLE_CLICK_FACTOR, SWAP_PROGRESS, Scheduler, SheetView,
    TaskHandle, WHEEL_FACTOR,
    viewport::{self, ease_out_cubic, fit_view_box, zoom_at, zoom_in_target, zoom_out_allowed},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    /// Into a child sheet.
    In,
    /// Back to the parent sheet.
    Out,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationState {
    Idle,
    Animating(ZoomDirection),
}

#[derive(Debug)]
struct Animation {
    direction: ZoomDirection,
    from: Bounds,
    to: Bounds,
    target_sheet: String,
    /// Timestamp of the first frame.
    started_at: Option<f64>,
    frame: TaskHandle,
}

/// Drill-down navigation state machine for one displayed sheet.
///
/// At most one transition runs at a time; input that arrives while one is
/// running is dropped, not queued.
#[derive(Debug)]
pub struct ZoomNavigation<S, V> {
    scheduler: S,
    view: V,
    current_sheet: String,
    /// Unzoomed view box of the current sheet.
    original: Bounds,
    animation: Option<Animation>,
    debounce: Option<TaskHandle>,
    /// Last wheel or pinch position, checked when the debounce fires.
    focus: Option<Point>,
    active: bool,
}

impl<S: Scheduler, V: SheetView> ZoomNavigation<S, V> {
    /// Starts navigating at `sheet_id` and fits it to the container.
    pub fn new(scheduler: S, view: V, sheet_id: impl Into<String>) -> Self {
        let current_sheet = sheet_id.into();
        let original = view
            .sheet_bounds(&current_sheet)
            .unwrap_or_else(|| view.view_box());
        let mut navigation = Self {
            scheduler,
            view,
            current_sheet,
            original,
            animation: None,
            debounce: None,
            focus: None,
            active: true,
        };
        navigation.fit();
        navigation
    }

    pub fn state(&self) -> NavigationState {
        match &self.animation {
            Some(animation) => NavigationState::Animating(animation.direction),
            None => NavigationState::Idle,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn current_sheet(&self) -> &str {
        &self.current_sheet
    }

    pub fn original_view_box(&self) -> Bounds {
        self.original
    }

    /// Zoom relative to the current sheet's unzoomed view box.
    pub fn scale(&self) -> f32 {
        viewport::scale(self.view.view_box(), self.original)
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Fits the current sheet to the container.
    pub fn fit(&mut self) {
        let view_box = fit_view_box(self.original, self.view.container_size());
        self.view.set_view_box(view_box);
    }

    fn accepts_input(&self) -> bool {
        self.active && self.animation.is_none()
    }

    /// Wheel step at `point` (sheet coordinates); negative `delta_y` zooms in.
    pub fn on_wheel(&mut self, point: Point, delta_y: f32) {
        if !self.accepts_input() || delta_y == 0.0 || !delta_y.is_finite() {
            return;
        }
        let factor = if delta_y < 0.0 {
            WHEEL_FACTOR
        } else {
            1.0 / WHEEL_FACTOR
        };
        self.zoom_input(point, factor);
    }

    /// Pinch gesture around `center`; `factor > 1` zooms in.
    pub fn on_pinch(&mut self, center: Point, factor: f32) {
        if !self.accepts_input() || !factor.is_finite() || factor <= 0.0 {
            return;
        }
        self.zoom_input(center, factor);
    }

    fn zoom_input(&mut self, focus: Point, factor: f32) {
        let view_box = zoom_at(self.view.view_box(), focus, factor);
        self.view.set_view_box(view_box);
        self.focus = Some(focus);

        self.cancel_debounce();
        self.debounce = Some(self.scheduler.schedule_timeout(DEBOUNCE_MS));
    }

    /// Zooms in at `point` and enters the subgraph under it if the zoom
    /// now qualifies.
    pub fn on_double_click(&mut self, point: Point) {
        if !self.accepts_input() {
            return;
        }
        self.cancel_debounce();
        let view_box = zoom_at(self.view.view_box(), point, DOUBLE_CLICK_FACTOR);
        self.view.set_view_box(view_box);
        self.try_zoom_in(point);
    }

    /// Debounce timer callback.
    pub fn on_timer(&mut self, handle: TaskHandle) {
        if self.debounce != Some(handle) {
            trace!(handle = handle.id(); "Ignoring stale timer");
            return;
        }
        self.debounce = None;
        if !self.accepts_input() {
            return;
        }

        let focus = self
            .focus
            .take()
            .unwrap_or_else(|| self.view.view_box().center());
        if !self.try_zoom_in(focus) {
            self.try_zoom_out();
        }
    }

    /// Animation frame callback; `now_ms` is a monotonic timestamp.
    pub fn on_frame(&mut self, handle: TaskHandle, now_ms: f64) {
        if !self.active {
            return;
        }
        let progress = {
            let Some(animation) = self.animation.as_mut() else {
                return;
            };
            if animation.frame != handle {
                trace!(handle = handle.id(); "Ignoring stale frame");
                return;
            }
            let started_at = *animation.started_at.get_or_insert(now_ms);
            let progress = ((now_ms - started_at) / ANIMATION_MS).clamp(0.0, 1.0);
            let eased = ease_out_cubic(progress) as f32;
            self.view
                .set_view_box(animation.from.lerp(&animation.to, eased));
            progress
        };

        if progress < SWAP_PROGRESS {
            let frame = self.scheduler.schedule_frame();
            if let Some(animation) = self.animation.as_mut() {
                animation.frame = frame;
            }
            return;
        }

        if let Some(animation) = self.animation.take() {
            debug!(
                sheet = animation.target_sheet,
                direction:? = animation.direction;
                "Swapping sheet"
            );
            self.show(animation.target_sheet, animation.to);
        }
    }

    /// Shows `sheet_id` immediately, fitted to the container.
    ///
    /// Returns `false` when the sheet does not exist or a transition is
    /// running.
    pub fn navigate_to(&mut self, sheet_id: &str) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let Some(bounds) = self.view.sheet_bounds(sheet_id) else {
            debug!(sheet = sheet_id; "Navigation to unknown sheet ignored");
            return false;
        };
        self.cancel_debounce();
        info!(from = self.current_sheet, to = sheet_id; "Navigating to sheet");
        self.show(sheet_id.to_string(), bounds);
        true
    }

    /// Stops every pending callback. The machine ignores all input after
    /// this.
    pub fn teardown(&mut self) {
        if let Some(animation) = self.animation.take() {
            self.scheduler.cancel(animation.frame);
        }
        self.cancel_debounce();
        self.focus = None;
        self.active = false;
    }

    fn cancel_debounce(&mut self) {
        if let Some(handle) = self.debounce.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn try_zoom_in(&mut self, focus: Point) -> bool {
        let Some(hit) = self.view.subgraph_at(focus) else {
            return false;
        };
        let Some(target) = zoom_in_target(self.view.view_box(), self.original, &hit) else {
            return false;
        };
        if self.view.sheet_bounds(&hit.sheet_id).is_none() {
            debug!(sheet = hit.sheet_id; "Subgraph sheet is not available");
            return false;
        }
        self.start(ZoomDirection::In, target, hit.sheet_id);
        true
    }

    fn try_zoom_out(&mut self) -> bool {
        let Some(parent) = self.view.parent_sheet(&self.current_sheet) else {
            return false;
        };
        if !zoom_out_allowed(self.view.view_box(), self.original, false) {
            return false;
        }
        self.start(ZoomDirection::Out, self.original, parent);
        true
    }

    fn start(&mut self, direction: ZoomDirection, to: Bounds, target_sheet: String) {
        info!(
            from = self.current_sheet,
            to = target_sheet,
            direction:? = direction;
            "Starting sheet transition"
        );
        let frame = self.scheduler.schedule_frame();
        self.animation = Some(Animation {
            direction,
            from: self.view.view_box(),
            to,
            target_sheet,
            started_at: None,
            frame,
        });
    }

    fn show(&mut self, sheet_id: String, fallback: Bounds) {
        self.view.show_sheet(&sheet_id);
        self.original = self.view.sheet_bounds(&sheet_id).unwrap_or(fallback);
        self.current_sheet = sheet_id;
        self.focus = None;
        self.fit();
    }
}
