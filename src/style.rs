//! Per-container arrow styling.
//!
//! ```ignore
//! use slint_connector_arrows::ArrowStyle;
//!
//! let style = ArrowStyle::from_json(r##"{ "stroke_color": "#3366ff", "stroke_width": 3 }"##)?;
//! assert_eq!(style.arrow_length, 10.0); // untouched fields keep their defaults
//! ```

use crate::error::{StyleError, StyleResult};
use serde::{Deserialize, Serialize};
use slint::Color;

pub const DEFAULT_ARROW_LENGTH: f32 = 10.0;
pub const DEFAULT_ARROW_THICKNESS: f32 = 6.0;
pub const DEFAULT_STROKE_COLOR: &str = "#f00";
pub const DEFAULT_STROKE_WIDTH: f32 = 2.0;

/// Styling applied to every arrow drawn by one container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrowStyle {
    /// Nominal arrowhead length; also the marker glyph width.
    pub arrow_length: f32,
    /// Arrowhead height (marker glyph height).
    pub arrow_thickness: f32,
    /// Stroke and marker fill color; any CSS color string.
    pub stroke_color: String,
    pub stroke_width: f32,
}

impl Default for ArrowStyle {
    fn default() -> Self {
        Self {
            arrow_length: DEFAULT_ARROW_LENGTH,
            arrow_thickness: DEFAULT_ARROW_THICKNESS,
            stroke_color: DEFAULT_STROKE_COLOR.to_owned(),
            stroke_width: DEFAULT_STROKE_WIDTH,
        }
    }
}

impl ArrowStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a style from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> StyleResult<Self> {
        let style: ArrowStyle = serde_json::from_str(json)?;
        style.validate()?;
        Ok(style)
    }

    pub fn with_arrow_length(mut self, arrow_length: f32) -> Self {
        self.arrow_length = arrow_length;
        self
    }

    pub fn with_arrow_thickness(mut self, arrow_thickness: f32) -> Self {
        self.arrow_thickness = arrow_thickness;
        self
    }

    pub fn with_stroke_color(mut self, stroke_color: impl Into<String>) -> Self {
        self.stroke_color = stroke_color.into();
        self
    }

    pub fn with_stroke_width(mut self, stroke_width: f32) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    pub fn validate(&self) -> StyleResult<()> {
        check_dimension("arrow_length", self.arrow_length)?;
        check_dimension("arrow_thickness", self.arrow_thickness)?;
        check_dimension("stroke_width", self.stroke_width)?;
        self.stroke_rgb().map(|_| ())
    }

    /// The stroke color as a Slint color.
    pub fn stroke_rgb(&self) -> StyleResult<Color> {
        parse_color(&self.stroke_color)
    }
}

fn check_dimension(field: &'static str, value: f32) -> StyleResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(StyleError::InvalidDimension { field, value })
    }
}

/// Parse any CSS color: named colors, hex forms, `rgb()`/`hsl()` and friends.
pub fn parse_color(value: &str) -> StyleResult<Color> {
    let parsed: csscolorparser::Color = value
        .trim()
        .parse()
        .map_err(|_| StyleError::InvalidColor(value.to_owned()))?;
    let [r, g, b, a] = parsed.to_rgba8();
    Ok(Color::from_argb_u8(a, r, g, b))
}
