//! Semantic zoom between sheets.
//!
//! [`ZoomNavigation`] watches a single displayed sheet. Zooming far enough
//! into a drill-down subgraph animates into that subgraph's own sheet;
//! zooming far enough out of a child sheet animates back to its parent.
//! The machine never touches a browser directly: timers and animation
//! frames go through a [`Scheduler`], the drawing surface through a
//! [`SheetView`], and time enters as explicit millisecond timestamps.
//!
//! ```text
//!            wheel / pinch settles, double-click
//!   Idle ----------------------------------------> Animating(In | Out)
//!    ^                                                    |
//!    +------- sheet swapped at 80% of the animation ------+
//! ```

mod viewport;
mod zoom;

pub use viewport::{ease_out_cubic, fit_view_box, zoom_at, zoom_in_target, zoom_out_allowed};
pub use zoom::{NavigationState, ZoomDirection, ZoomNavigation};

use shumoku_core::geometry::{Bounds, Point, Size};

/// Settle time after the last wheel or pinch event before thresholds are
/// checked.
pub const DEBOUNCE_MS: u64 = 150;
/// Duration of a sheet transition.
pub const ANIMATION_MS: f64 = 450.0;
/// Raw progress at which the visible sheet is swapped.
pub const SWAP_PROGRESS: f64 = 0.8;
/// Minimum zoom scale for entering a child sheet.
pub const ZOOM_IN_SCALE: f32 = 1.5;
/// Maximum zoom scale for leaving to the parent sheet.
pub const ZOOM_OUT_SCALE: f32 = 0.3;
/// Zoom factor of one wheel step.
pub const WHEEL_FACTOR: f32 = 1.1;
/// Zoom factor of a double-click.
pub const DOUBLE_CLICK_FACTOR: f32 = 2.0;
/// Share of the container a freshly shown sheet fills.
pub const FIT_RATIO: f32 = 0.9;

/// Opaque id of a scheduled timer or frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

impl TaskHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

/// Host timer services.
///
/// The host calls [`ZoomNavigation::on_timer`] or
/// [`ZoomNavigation::on_frame`] with the returned handle when the task
/// fires; cancelled handles must never fire.
pub trait Scheduler {
    /// Requests a callback before the next repaint.
    fn schedule_frame(&mut self) -> TaskHandle;

    /// Requests a callback after `delay_ms` milliseconds.
    fn schedule_timeout(&mut self, delay_ms: u64) -> TaskHandle;

    fn cancel(&mut self, handle: TaskHandle);
}

/// A drill-down subgraph found under a point of the displayed sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SubgraphHit {
    /// Sheet the subgraph opens.
    pub sheet_id: String,
    /// Declared bounds of the subgraph in the displayed sheet's coordinates.
    pub bounds: Bounds,
}

/// The drawing surface that shows one sheet at a time.
pub trait SheetView {
    fn view_box(&self) -> Bounds;

    fn set_view_box(&mut self, view_box: Bounds);

    /// Size of the element the sheet is displayed in, in screen pixels.
    fn container_size(&self) -> Size;

    /// Unzoomed view box of a sheet, or `None` if the sheet does not exist.
    fn sheet_bounds(&self, sheet_id: &str) -> Option<Bounds>;

    /// Parent of a sheet; `None` for the root sheet.
    fn parent_sheet(&self, sheet_id: &str) -> Option<String>;

    /// Drill-down subgraph under `point` of the displayed sheet. Only
    /// subgraphs that open a sheet are reported.
    fn subgraph_at(&self, point: Point) -> Option<SubgraphHit>;

    /// Makes `sheet_id` the only visible sheet.
    fn show_sheet(&mut self, sheet_id: &str);
}
