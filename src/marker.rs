//! Arrowhead marker glyphs.
//!
//! The geometry engine only ever refers to markers through [`MarkerRef`];
//! rendering adapters turn those references into concrete glyphs with
//! [`MarkerGlyph::for_style`].

use crate::style::ArrowStyle;
use std::fmt;

/// Opaque reference to one of the two arrowhead glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerRef {
    /// Arrowhead at the end of a line, pointing along the line.
    Arrow,
    /// Arrowhead at the start of a line, pointing back at the start element.
    ArrowStart,
}

impl MarkerRef {
    pub fn id(&self) -> &'static str {
        match self {
            Self::Arrow => "arrow",
            Self::ArrowStart => "arrow-start",
        }
    }
}

impl fmt::Display for MarkerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A filled triangular marker, sized in stroke-width units and oriented
/// along the path it decorates.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerGlyph {
    pub reference: MarkerRef,
    pub width: f32,
    pub height: f32,
    pub ref_x: f32,
    pub ref_y: f32,
    /// Path commands for the triangle.
    pub path: String,
    pub fill: String,
}

impl MarkerGlyph {
    pub fn for_style(reference: MarkerRef, style: &ArrowStyle) -> Self {
        let length = style.arrow_length;
        let thickness = style.arrow_thickness;
        Self {
            reference,
            width: length,
            height: thickness,
            ref_x: 0.0,
            ref_y: thickness / 2.0,
            path: glyph_path(reference, length, thickness),
            fill: style.stroke_color.clone(),
        }
    }
}

/// Both glyphs, end marker first.
pub fn marker_glyphs(style: &ArrowStyle) -> [MarkerGlyph; 2] {
    [
        MarkerGlyph::for_style(MarkerRef::Arrow, style),
        MarkerGlyph::for_style(MarkerRef::ArrowStart, style),
    ]
}

fn glyph_path(reference: MarkerRef, length: f32, thickness: f32) -> String {
    // The tip stops one unit short of the marker box so it does not clip.
    let tip = length - 1.0;
    let mid = thickness / 2.0;
    match reference {
        MarkerRef::Arrow => format!("M0,0 L0,{thickness} L{tip},{mid} z"),
        MarkerRef::ArrowStart => format!("M0,{mid} L{tip},{thickness} L{tip},0 z"),
    }
}
