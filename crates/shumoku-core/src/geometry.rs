//! Geometric primitives for topology layout, rendering and navigation.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate (also used as a direction vector)
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - An axis-aligned rectangle; doubles as an SVG viewBox
//! - [`Insets`] - Padding values for four sides
//!
//! # Coordinate System
//!
//! Shumoku uses the SVG coordinate system:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! Because Y grows downward, a positive [`Point::cross`] between two
//! consecutive path directions means the path turns clockwise on screen.

use serde::{Deserialize, Serialize};

/// Lengths below this are treated as zero when normalizing vectors.
const EPSILON: f32 = 1e-4;

/// A 2D point in diagram space.
///
/// # Examples
///
/// ```
/// # use shumoku_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
///
/// let mid = p1.midpoint(p2);
/// assert_eq!(mid.x(), 7.5);
/// assert_eq!(mid.y(), 12.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Creates a new point with the specified x-coordinate
    pub fn with_x(mut self, x: f32) -> Self {
        self.x = x;
        self
    }

    /// Creates a new point with the specified y-coordinate
    pub fn with_y(mut self, y: f32) -> Self {
        self.y = y;
        self
    }

    /// Checks if both x and y coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Calculates the length of this point seen as a vector from the origin
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Point) -> f32 {
        other.sub_point(self).hypot()
    }

    /// Multiplies both coordinates by the given factor.
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Returns the unit vector pointing in the same direction.
    ///
    /// Degenerate (near-zero) vectors normalize to the zero vector so that
    /// callers never divide by zero.
    ///
    /// ```
    /// # use shumoku_core::geometry::Point;
    /// let unit = Point::new(3.0, 4.0).normalize();
    /// assert!((unit.x() - 0.6).abs() < 1e-6);
    /// assert!((unit.y() - 0.8).abs() < 1e-6);
    /// assert!(Point::new(0.0, 0.0).normalize().is_zero());
    /// ```
    pub fn normalize(self) -> Self {
        let length = self.hypot();
        if length < EPSILON {
            return Self::default();
        }
        self.scale(1.0 / length)
    }

    /// Rotates this direction a quarter turn, giving the left-hand normal
    /// `(-y, x)`.
    ///
    /// In screen coordinates this normal points to the right of travel.
    pub fn perpendicular(self) -> Self {
        Self {
            x: -self.y,
            y: self.x,
        }
    }

    /// Dot product of two vectors
    pub fn dot(self, other: Point) -> f32 {
        self.x.mul_add(other.x, self.y * other.y)
    }

    /// The z-component of the 2D cross product `self × other`.
    ///
    /// Positive when `other` turns clockwise from `self` on screen.
    pub fn cross(self, other: Point) -> f32 {
        self.x.mul_add(other.y, -(self.y * other.x))
    }

    /// Linear interpolation towards `other` by `t` (0 = self, 1 = other)
    pub fn lerp(self, other: Point, t: f32) -> Self {
        Self {
            x: (other.x - self.x).mul_add(t, self.x),
            y: (other.y - self.y).mul_add(t, self.y),
        }
    }

    /// Converts a point and size into a bounds rectangle centered on the point.
    pub fn to_bounds(self, size: Size) -> Bounds {
        Bounds::new_from_center(self, size)
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns a new Size with the maximum width and height of both sizes
    pub fn max(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }

    /// Returns a new Size with padding added to both width and height
    pub fn add_padding(self, insets: Insets) -> Self {
        Self {
            width: self.width + insets.horizontal_sum(),
            height: self.height + insets.vertical_sum(),
        }
    }

    /// Multiplies both dimensions by the given factor
    pub fn scale(self, factor: f32) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
        }
    }

    /// Returns true if both width and height are zero
    pub fn is_zero(self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }

    /// Width over height; zero when the height is zero.
    pub fn aspect_ratio(self) -> f32 {
        if self.height.abs() < EPSILON {
            0.0
        } else {
            self.width / self.height
        }
    }
}

/// An axis-aligned rectangle defined by its minimum and maximum coordinates.
///
/// SVG viewBoxes are `x y width height` rectangles, so navigation code uses
/// [`Bounds`] for them as well.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates bounds from a top-left corner and dimensions (viewBox order).
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x + width,
            max_y: y + height,
        }
    }

    /// Creates a new bounds from a center point and a size
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let half_width = size.width / 2.0;
        let half_height = size.height / 2.0;
        Self {
            min_x: center.x - half_width,
            min_y: center.y - half_height,
            max_x: center.x + half_width,
            max_y: center.y + half_height,
        }
    }

    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self::new(top_left.x, top_left.y, size.width, size.height)
    }

    /// Smallest bounds containing every point, or `None` for no points.
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        points.into_iter().fold(None, |acc: Option<Bounds>, p| {
            let point_bounds = Bounds::new(p.x, p.y, 0.0, 0.0);
            Some(match acc {
                Some(bounds) => bounds.merge(&point_bounds),
                None => point_bounds,
            })
        })
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns the top-left corner as a Point
    pub fn min_point(self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    /// Converts bounds to a Size object
    pub fn to_size(self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Width times height
    pub fn area(self) -> f32 {
        self.width() * self.height()
    }

    /// Length of the diagonal
    pub fn diagonal(self) -> f32 {
        self.width().hypot(self.height())
    }

    /// True when the bounds have finite coordinates and a positive area.
    pub fn is_valid(self) -> bool {
        [self.min_x, self.min_y, self.max_x, self.max_y]
            .iter()
            .all(|v| v.is_finite())
            && self.width() > 0.0
            && self.height() > 0.0
    }

    /// True if the point lies inside or on the edge of the bounds
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Merges two bounds into the smallest bounds containing both.
    ///
    /// # Examples
    ///
    /// ```
    /// # use shumoku_core::geometry::{Bounds, Point, Size};
    /// let header = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 30.0));
    /// let content = Bounds::new_from_top_left(Point::new(10.0, 40.0), Size::new(120.0, 80.0));
    ///
    /// let combined = header.merge(&content);
    /// assert_eq!(combined.min_x(), 0.0);
    /// assert_eq!(combined.width(), 130.0);
    /// assert_eq!(combined.height(), 120.0);
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Moves the bounds by the specified offset.
    pub fn translate(&self, offset: Point) -> Self {
        Self {
            min_x: self.min_x + offset.x,
            min_y: self.min_y + offset.y,
            max_x: self.max_x + offset.x,
            max_y: self.max_y + offset.y,
        }
    }

    /// Grows the bounds outward by the given insets.
    pub fn add_padding(&self, insets: Insets) -> Self {
        Self {
            min_x: self.min_x - insets.left(),
            min_y: self.min_y - insets.top(),
            max_x: self.max_x + insets.right(),
            max_y: self.max_y + insets.bottom(),
        }
    }

    /// Grows the bounds by a fraction of their own size on every side.
    ///
    /// ```
    /// # use shumoku_core::geometry::Bounds;
    /// let padded = Bounds::new(0.0, 0.0, 100.0, 50.0).expand_by_fraction(0.1);
    /// assert_eq!(padded.min_x(), -10.0);
    /// assert_eq!(padded.min_y(), -5.0);
    /// assert_eq!(padded.width(), 120.0);
    /// assert_eq!(padded.height(), 60.0);
    /// ```
    pub fn expand_by_fraction(&self, fraction: f32) -> Self {
        let dx = self.width() * fraction;
        let dy = self.height() * fraction;
        self.add_padding(Insets::new(dy, dx, dy, dx))
    }

    /// Interpolates every edge towards `other` by `t`.
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        let min = self.min_point().lerp(other.min_point(), t);
        let size = Point::new(self.width(), self.height())
            .lerp(Point::new(other.width(), other.height()), t);
        Self::new(min.x, min.y, size.x, size.y)
    }

    /// Formats the bounds as an SVG `viewBox` attribute value.
    pub fn to_view_box(&self) -> String {
        format!(
            "{} {} {} {}",
            self.min_x,
            self.min_y,
            self.width(),
            self.height()
        )
    }
}

/// `{x, y, width, height}` form used for the `data-bounds` DOM contract.
impl Serialize for Bounds {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("Bounds", 4)?;
        state.serialize_field("x", &self.min_x)?;
        state.serialize_field("y", &self.min_y)?;
        state.serialize_field("width", &self.width())?;
        state.serialize_field("height", &self.height())?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for Bounds {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Rect {
            x: f32,
            y: f32,
            width: f32,
            height: f32,
        }

        let rect = Rect::deserialize(deserializer)?;
        Ok(Bounds::new(rect.x, rect.y, rect.width, rect.height))
    }
}

/// Spacing around an element, with potentially different values per side
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    /// Creates new insets with specified values for each side
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Creates uniform insets with the same value for all sides
    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Returns the top inset value
    pub fn top(self) -> f32 {
        self.top
    }

    /// Returns the right inset value
    pub fn right(self) -> f32 {
        self.right
    }

    /// Returns the bottom inset value
    pub fn bottom(self) -> f32 {
        self.bottom
    }

    /// Returns the left inset value
    pub fn left(self) -> f32 {
        self.left
    }

    /// Returns a new Insets with the specified top value
    pub fn with_top(self, top: f32) -> Self {
        Self { top, ..self }
    }

    /// Returns the sum of left and right insets
    pub fn horizontal_sum(self) -> f32 {
        self.left + self.right
    }

    /// Returns the sum of top and bottom insets
    pub fn vertical_sum(self) -> f32 {
        self.top + self.bottom
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_point_distance() {
        assert_eq!(Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn test_point_perpendicular_is_right_of_travel() {
        // Travelling right on screen, the normal points down (+Y).
        let normal = Point::new(1.0, 0.0).perpendicular();
        assert_eq!(normal, Point::new(0.0, 1.0));
    }

    #[test]
    fn test_cross_sign_for_screen_turns() {
        let right = Point::new(1.0, 0.0);
        let down = Point::new(0.0, 1.0);
        let up = Point::new(0.0, -1.0);

        // right then down is a clockwise turn on screen
        assert!(right.cross(down) > 0.0);
        // right then up is counter-clockwise
        assert!(right.cross(up) < 0.0);
        // straight on is zero
        assert_eq!(right.cross(right), 0.0);
    }

    #[test]
    fn test_dot() {
        assert_eq!(Point::new(1.0, 2.0).dot(Point::new(3.0, 4.0)), 11.0);
    }

    #[test]
    fn test_point_lerp() {
        let a = Point::new(0.0, 10.0);
        let b = Point::new(10.0, 20.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Point::new(5.0, 15.0));
    }

    #[test]
    fn test_bounds_new_is_view_box_order() {
        let bounds = Bounds::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(bounds.min_x(), 10.0);
        assert_eq!(bounds.min_y(), 20.0);
        assert_eq!(bounds.max_x(), 40.0);
        assert_eq!(bounds.max_y(), 60.0);
        assert_eq!(bounds.to_view_box(), "10 20 30 40");
    }

    #[test]
    fn test_bounds_new_from_center() {
        let bounds = Bounds::new_from_center(Point::new(50.0, 60.0), Size::new(20.0, 30.0));

        assert_eq!(bounds.min_x(), 40.0);
        assert_eq!(bounds.min_y(), 45.0);
        assert_eq!(bounds.max_x(), 60.0);
        assert_eq!(bounds.max_y(), 75.0);
        assert_eq!(bounds.center(), Point::new(50.0, 60.0));
    }

    #[test]
    fn test_bounds_area_and_diagonal() {
        let bounds = Bounds::new(0.0, 0.0, 30.0, 40.0);
        assert_eq!(bounds.area(), 1200.0);
        assert_eq!(bounds.diagonal(), 50.0);
    }

    #[test]
    fn test_bounds_is_valid() {
        assert!(Bounds::new(0.0, 0.0, 1.0, 1.0).is_valid());
        assert!(!Bounds::default().is_valid());
        assert!(!Bounds::new(0.0, 0.0, f32::NAN, 1.0).is_valid());
        assert!(!Bounds::new(0.0, 0.0, -5.0, 1.0).is_valid());
    }

    #[test]
    fn test_bounds_contains() {
        let bounds = Bounds::new(0.0, 0.0, 10.0, 10.0);
        assert!(bounds.contains(Point::new(5.0, 5.0)));
        assert!(bounds.contains(Point::new(10.0, 0.0)));
        assert!(!bounds.contains(Point::new(10.5, 5.0)));
    }

    #[test]
    fn test_bounds_from_points() {
        assert!(Bounds::from_points(Vec::new()).is_none());

        let bounds = Bounds::from_points([
            Point::new(5.0, -2.0),
            Point::new(-1.0, 8.0),
            Point::new(3.0, 3.0),
        ])
        .unwrap();
        assert_eq!(bounds, Bounds::new(-1.0, -2.0, 6.0, 10.0));
    }

    #[test]
    fn test_bounds_lerp() {
        let from = Bounds::new(0.0, 0.0, 100.0, 100.0);
        let to = Bounds::new(50.0, 50.0, 20.0, 40.0);

        let half = from.lerp(&to, 0.5);
        assert_approx_eq!(f32, half.min_x(), 25.0);
        assert_approx_eq!(f32, half.min_y(), 25.0);
        assert_approx_eq!(f32, half.width(), 60.0);
        assert_approx_eq!(f32, half.height(), 70.0);
        assert_eq!(from.lerp(&to, 1.0), to);
    }

    #[test]
    fn test_bounds_serializes_as_rect() {
        let json = serde_json::to_string(&Bounds::new(1.0, 2.0, 3.0, 4.0)).unwrap();
        assert_eq!(json, r#"{"x":1.0,"y":2.0,"width":3.0,"height":4.0}"#);

        let back: Bounds = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Bounds::new(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn test_size_aspect_ratio() {
        assert_eq!(Size::new(40.0, 20.0).aspect_ratio(), 2.0);
        assert_eq!(Size::new(40.0, 0.0).aspect_ratio(), 0.0);
    }

    #[test]
    fn test_size_add_padding() {
        let padded = Size::new(10.0, 20.0).add_padding(Insets::uniform(5.0));
        assert_eq!(padded.width(), 20.0);
        assert_eq!(padded.height(), 30.0);
    }

    #[test]
    fn test_insets_sums() {
        let insets = Insets::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(insets.horizontal_sum(), 6.0);
        assert_eq!(insets.vertical_sum(), 4.0);
        assert_eq!(insets.with_top(9.0).top(), 9.0);
    }
}
