//! Pixel geometry for slidekit.
//!
//! Hosts report measured sizes and touch locations in layout pixels, which
//! are fractional on most platforms, so every type here carries `f32`
//! coordinates.
//!
//! # Key Types
//!
//! - [`Px`] - A single pixel coordinate value
//! - [`PxPosition`] - A 2D position (x, y)
//! - [`PxSize`] - A 2D size (width, height)
//! - [`PxRect`] - An axis-aligned rectangle used for hit-testing
//! - [`Orientation`] - The axis a track runs along
//!
//! # Coordinate System
//!
//! - Origin (0, 0) at the top-left corner of the slider container
//! - X-axis increases to the right
//! - Y-axis increases downward
//!
//! # Example
//!
//! ```
//! use slidekit_ui::px::{Px, PxPosition, PxRect, PxSize};
//!
//! let rect = PxRect::from_position_size(
//!     PxPosition::new(Px(10.0), Px(0.0)),
//!     PxSize::new(Px(40.0), Px(40.0)),
//! );
//! assert!(rect.contains(PxPosition::new(Px(50.0), Px(40.0))));
//! assert_eq!(rect.distance_to_track_point(Px(60.0)), 10.0);
//! ```

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// A pixel coordinate value.
///
/// Negative values are allowed; a touch that started on the thumb may be
/// dragged past the container edge.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Px(pub f32);

impl Px {
    /// A constant representing zero pixels.
    pub const ZERO: Self = Self(0.0);

    /// Creates a new `Px` from an `f32`.
    pub const fn new(value: f32) -> Self {
        Px(value)
    }

    /// Returns the raw `f32` value.
    pub fn to_f32(self) -> f32 {
        self.0
    }

    /// Returns the larger of two values.
    pub fn max(self, other: Self) -> Self {
        Px(self.0.max(other.0))
    }

    /// Returns the smaller of two values.
    pub fn min(self, other: Self) -> Self {
        Px(self.0.min(other.0))
    }

    /// Returns the value, or zero if it is negative.
    pub fn positive(self) -> Self {
        Px(self.0.max(0.0))
    }

    /// Returns `true` when the value is neither NaN nor infinite.
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl Add for Px {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Px(self.0 + rhs.0)
    }
}

impl Sub for Px {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Px(self.0 - rhs.0)
    }
}

impl Neg for Px {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Px(-self.0)
    }
}

impl Mul<f32> for Px {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self::Output {
        Px(self.0 * rhs)
    }
}

impl Div<f32> for Px {
    type Output = Self;

    fn div(self, rhs: f32) -> Self::Output {
        Px(self.0 / rhs)
    }
}

impl AddAssign for Px {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Px {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl From<f32> for Px {
    fn from(value: f32) -> Self {
        Px(value)
    }
}

/// The axis a slider track runs along.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// The track runs left to right (right to left when mirrored).
    #[default]
    Horizontal,
    /// The track runs top to bottom.
    Vertical,
}

/// A 2D position in pixel space.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PxPosition {
    /// The x-coordinate.
    pub x: Px,
    /// The y-coordinate.
    pub y: Px,
}

impl PxPosition {
    /// The origin.
    pub const ZERO: Self = Self {
        x: Px::ZERO,
        y: Px::ZERO,
    };

    /// Creates a new position.
    pub const fn new(x: Px, y: Px) -> Self {
        Self { x, y }
    }

    /// Returns a new position offset by the given deltas.
    pub fn offset(self, dx: Px, dy: Px) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Returns the coordinate along `orientation`.
    pub fn along(self, orientation: Orientation) -> Px {
        match orientation {
            Orientation::Horizontal => self.x,
            Orientation::Vertical => self.y,
        }
    }

    /// Returns the coordinate across `orientation`.
    pub fn across(self, orientation: Orientation) -> Px {
        match orientation {
            Orientation::Horizontal => self.y,
            Orientation::Vertical => self.x,
        }
    }

    /// Builds a position from main-axis and cross-axis coordinates.
    pub fn from_axes(orientation: Orientation, main: Px, cross: Px) -> Self {
        match orientation {
            Orientation::Horizontal => Self::new(main, cross),
            Orientation::Vertical => Self::new(cross, main),
        }
    }
}

impl Add for PxPosition {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for PxPosition {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl From<[f32; 2]> for PxPosition {
    fn from(pos: [f32; 2]) -> Self {
        Self::new(Px(pos[0]), Px(pos[1]))
    }
}

/// A 2D size in pixel space.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PxSize {
    /// The width dimension.
    pub width: Px,
    /// The height dimension.
    pub height: Px,
}

impl PxSize {
    /// A zero size.
    pub const ZERO: Self = Self {
        width: Px::ZERO,
        height: Px::ZERO,
    };

    /// Creates a new size.
    pub const fn new(width: Px, height: Px) -> Self {
        Self { width, height }
    }

    /// Returns the extent along `orientation`.
    pub fn along(self, orientation: Orientation) -> Px {
        match orientation {
            Orientation::Horizontal => self.width,
            Orientation::Vertical => self.height,
        }
    }

    /// Returns the extent across `orientation`.
    pub fn across(self, orientation: Orientation) -> Px {
        match orientation {
            Orientation::Horizontal => self.height,
            Orientation::Vertical => self.width,
        }
    }

    /// Builds a size from main-axis and cross-axis extents.
    pub fn from_axes(orientation: Orientation, main: Px, cross: Px) -> Self {
        match orientation {
            Orientation::Horizontal => Self::new(main, cross),
            Orientation::Vertical => Self::new(cross, main),
        }
    }
}

impl From<[f32; 2]> for PxSize {
    fn from(size: [f32; 2]) -> Self {
        Self::new(Px(size[0]), Px(size[1]))
    }
}

/// An axis-aligned rectangle in pixel space.
///
/// Thumb touch targets are rectangles that may be larger than the visible
/// thumb, so hit-testing goes through [`PxRect::contains`] rather than a
/// radius check.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PxRect {
    /// The x-coordinate of the top-left corner
    pub x: Px,
    /// The y-coordinate of the top-left corner
    pub y: Px,
    /// The width of the rectangle
    pub width: Px,
    /// The height of the rectangle
    pub height: Px,
}

impl PxRect {
    /// A zero rectangle (0×0 at the origin).
    pub const ZERO: Self = Self {
        x: Px::ZERO,
        y: Px::ZERO,
        width: Px::ZERO,
        height: Px::ZERO,
    };

    /// Creates a new rectangle.
    pub const fn new(x: Px, y: Px, width: Px, height: Px) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a new rectangle from a position and size.
    pub fn from_position_size(position: PxPosition, size: PxSize) -> Self {
        Self {
            x: position.x,
            y: position.y,
            width: size.width,
            height: size.height,
        }
    }

    /// Returns the top-left corner.
    pub fn position(&self) -> PxPosition {
        PxPosition::new(self.x, self.y)
    }

    /// Returns the size.
    pub fn size(&self) -> PxSize {
        PxSize::new(self.width, self.height)
    }

    /// Check if a point is inside the rectangle.
    ///
    /// Both edges are inclusive, so a touch exactly on the border of a thumb
    /// touch target still grabs the thumb.
    pub fn contains(&self, point: PxPosition) -> bool {
        point.x.0 >= self.x.0
            && point.y.0 >= self.y.0
            && point.x.0 <= self.x.0 + self.width.0
            && point.y.0 <= self.y.0 + self.height.0
    }

    /// Horizontal distance from `x` to the nearest vertical edge of the
    /// rectangle, or `0.0` when `x` lies within the horizontal span.
    pub fn distance_to_track_point(&self, x: Px) -> f32 {
        self.distance_along(Orientation::Horizontal, x)
    }

    /// Distance from `coord` to the nearest edge along `orientation`, or
    /// `0.0` when `coord` lies within the span on that axis.
    pub fn distance_along(&self, orientation: Orientation, coord: Px) -> f32 {
        let (start, extent) = match orientation {
            Orientation::Horizontal => (self.x.0, self.width.0),
            Orientation::Vertical => (self.y.0, self.height.0),
        };
        let end = start + extent;
        if coord.0 < start {
            start - coord.0
        } else if coord.0 > end {
            coord.0 - end
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> PxRect {
        PxRect::new(Px(x), Px(y), Px(w), Px(h))
    }

    #[test]
    fn test_px_arithmetic() {
        let a = Px(10.0);
        let b = Px(5.0);

        assert_eq!(a + b, Px(15.0));
        assert_eq!(a - b, Px(5.0));
        assert_eq!(a * 2.0, Px(20.0));
        assert_eq!(a / 2.0, Px(5.0));
        assert_eq!(-a, Px(-10.0));
        assert_eq!(Px(-3.0).positive(), Px::ZERO);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let r = rect(10.0, 10.0, 20.0, 20.0);
        assert!(r.contains(PxPosition::new(Px(10.0), Px(10.0))));
        assert!(r.contains(PxPosition::new(Px(30.0), Px(30.0))));
        assert!(r.contains(PxPosition::new(Px(20.0), Px(15.0))));
        assert!(!r.contains(PxPosition::new(Px(30.5), Px(15.0))));
        assert!(!r.contains(PxPosition::new(Px(20.0), Px(9.9))));
    }

    #[test]
    fn test_distance_to_track_point() {
        let r = rect(100.0, 0.0, 40.0, 40.0);
        assert_eq!(r.distance_to_track_point(Px(120.0)), 0.0);
        assert_eq!(r.distance_to_track_point(Px(100.0)), 0.0);
        assert_eq!(r.distance_to_track_point(Px(140.0)), 0.0);
        assert_eq!(r.distance_to_track_point(Px(90.0)), 10.0);
        assert_eq!(r.distance_to_track_point(Px(150.0)), 10.0);
    }

    #[test]
    fn test_distance_along_vertical_axis() {
        let r = rect(0.0, 50.0, 40.0, 20.0);
        assert_eq!(r.distance_along(Orientation::Vertical, Px(45.0)), 5.0);
        assert_eq!(r.distance_along(Orientation::Vertical, Px(60.0)), 0.0);
        assert_eq!(r.distance_along(Orientation::Vertical, Px(75.0)), 5.0);
    }

    #[test]
    fn test_axis_projection() {
        let size = PxSize::new(Px(300.0), Px(40.0));
        assert_eq!(size.along(Orientation::Horizontal), Px(300.0));
        assert_eq!(size.along(Orientation::Vertical), Px(40.0));
        assert_eq!(
            PxSize::from_axes(Orientation::Vertical, Px(300.0), Px(40.0)),
            PxSize::new(Px(40.0), Px(300.0))
        );

        let pos = PxPosition::new(Px(3.0), Px(7.0));
        assert_eq!(pos.along(Orientation::Vertical), Px(7.0));
        assert_eq!(pos.across(Orientation::Vertical), Px(3.0));
        assert_eq!(pos.offset(Px(1.0), Px(-1.0)), PxPosition::new(Px(4.0), Px(6.0)));
    }
}
