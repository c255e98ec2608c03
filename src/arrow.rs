use crate::anchor::{direction_vector, AnchorSide};
use crate::marker::MarkerRef;
use crate::point::Point;

/// The marker glyph is drawn at twice the nominal arrow length, so trimming
/// works with the doubled value.
pub const ARROW_LENGTH_FACTOR: f32 = 2.0;

/// Origin-relative anchor points of one connector, before trimming.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowEndpoints {
    pub start: Point,
    pub start_side: AnchorSide,
    pub end: Point,
    pub end_side: AnchorSide,
    /// Whether an arrowhead is also drawn at the start of the line.
    pub start_arrow: bool,
}

/// Final drawable geometry for one connector.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowGeometry {
    /// Identity of the relation this line was computed from.
    pub key: String,
    /// Line start after trimming.
    pub start: Point,
    /// Line end after trimming.
    pub end: Point,
    /// Raw start anchor point (origin-relative).
    pub anchor_start: Point,
    /// Raw end anchor point (origin-relative).
    pub anchor_end: Point,
    /// Path commands, e.g. `"M100,25 L180,25"`.
    pub path: String,
    pub end_marker: MarkerRef,
    pub start_marker: Option<MarkerRef>,
}

/// Move `point` outward along `side` so the line stops at the marker's edge.
///
/// # Arguments
/// * `point` - Anchor point to trim
/// * `side` - Side the point sits on; `Unanchored` leaves the point untouched
/// * `arrow_length` - Declared (nominal) arrow length
/// * `stroke_width` - Stroke width; markers scale with it
pub fn trim_endpoint(point: Point, side: AnchorSide, arrow_length: f32, stroke_width: f32) -> Point {
    let effective_length = arrow_length * ARROW_LENGTH_FACTOR;
    point + direction_vector(side) * (effective_length * stroke_width / 2.0)
}

/// Straight line path command from `start` to `end`.
pub fn line_path(start: Point, end: Point) -> String {
    format!("M{},{} L{},{}", start.x, start.y, end.x, end.y)
}

/// Compute the trimmed line and marker flags for one connector.
///
/// The end is always trimmed and always carries [`MarkerRef::Arrow`]. The start
/// is trimmed and gets [`MarkerRef::ArrowStart`] only when `start_arrow` is set;
/// otherwise the raw start point is used as is.
pub fn compute_arrow_geometry(
    key: impl Into<String>,
    endpoints: &ArrowEndpoints,
    arrow_length: f32,
    stroke_width: f32,
) -> ArrowGeometry {
    let end = trim_endpoint(endpoints.end, endpoints.end_side, arrow_length, stroke_width);
    let (start, start_marker) = if endpoints.start_arrow {
        (
            trim_endpoint(endpoints.start, endpoints.start_side, arrow_length, stroke_width),
            Some(MarkerRef::ArrowStart),
        )
    } else {
        (endpoints.start, None)
    };

    ArrowGeometry {
        key: key.into(),
        start,
        end,
        anchor_start: endpoints.start,
        anchor_end: endpoints.end,
        path: line_path(start, end),
        end_marker: MarkerRef::Arrow,
        start_marker,
    }
}
