//! Anchor resolution: mapping an element rectangle and a named side to a
//! point on that rectangle's boundary.

use crate::point::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Axis-aligned rectangle snapshot, as reported by the host for an element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Rectangle used for elements that are not positioned yet.
    pub const ZERO: Rect = Rect {
        left: 0.0,
        top: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.left, self.top)
    }
}

/// Edge of an element a connector attaches to.
///
/// `Unanchored` stands in for any value outside the four sides. It resolves
/// to the origin and never trims, so a bad side degrades a line instead of
/// failing a render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AnchorSide {
    Top,
    Bottom,
    Left,
    Right,
    Unanchored,
}

impl AnchorSide {
    pub fn parse(value: &str) -> Self {
        match value {
            "top" => Self::Top,
            "bottom" => Self::Bottom,
            "left" => Self::Left,
            "right" => Self::Right,
            _ => Self::Unanchored,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
            Self::Unanchored => "unanchored",
        }
    }
}

impl From<&str> for AnchorSide {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<String> for AnchorSide {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<AnchorSide> for String {
    fn from(side: AnchorSide) -> Self {
        side.as_str().to_owned()
    }
}

impl fmt::Display for AnchorSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Absolute point on `rect`'s boundary for the given side.
///
/// | side | point |
/// |---|---|
/// | top | middle of the top edge |
/// | bottom | middle of the bottom edge |
/// | left | middle of the left edge |
/// | right | middle of the right edge |
/// | unanchored | `(0, 0)` |
///
/// Negative sizes are taken at face value.
pub fn resolve_anchor_point(rect: Rect, side: AnchorSide) -> Point {
    let corner = rect.top_left();
    match side {
        AnchorSide::Top => corner + Point::new(rect.width / 2.0, 0.0),
        AnchorSide::Bottom => corner + Point::new(rect.width / 2.0, rect.height),
        AnchorSide::Left => corner + Point::new(0.0, rect.height / 2.0),
        AnchorSide::Right => corner + Point::new(rect.width, rect.height / 2.0),
        AnchorSide::Unanchored => Point::ORIGIN,
    }
}

/// Express an absolute point relative to `origin`.
pub fn to_relative(absolute: Point, origin: Point) -> Point {
    absolute - origin
}

/// Outward unit vector of a side, the way an arrowhead sitting on it points.
pub fn direction_vector(side: AnchorSide) -> Point {
    match side {
        AnchorSide::Left => Point::new(-1.0, 0.0),
        AnchorSide::Right => Point::new(1.0, 0.0),
        AnchorSide::Top => Point::new(0.0, -1.0),
        AnchorSide::Bottom => Point::new(0.0, 1.0),
        AnchorSide::Unanchored => Point::ORIGIN,
    }
}
