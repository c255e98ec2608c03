//! SVG overlay rendering.
//!
//! Produces a self-contained `<svg>` element meant to be stacked over the
//! container, with both arrowhead glyphs in `<defs>` and one `<path>` per
//! arrow. Markers are referenced by local fragment ids only.

use crate::arrow::ArrowGeometry;
use crate::marker::{marker_glyphs, MarkerGlyph};
use crate::style::ArrowStyle;
use crate::surface::ArrowSurface;
use std::fmt::Write;

const OVERLAY_STYLE: &str = "position:absolute;width:100%;height:100%;top:0;left:0";

/// Render `arrows` as an SVG overlay document.
pub fn render_svg(arrows: &[ArrowGeometry], style: &ArrowStyle) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" style="{OVERLAY_STYLE}"><defs>"#
    );
    for glyph in marker_glyphs(style) {
        write_marker(&mut out, &glyph);
    }
    out.push_str("</defs>");

    let stroke = escape(&style.stroke_color);
    for arrow in arrows {
        let _ = write!(
            out,
            r#"<path d="{}" style="fill:none;stroke:{};stroke-width:{}" marker-end="url(#{})""#,
            escape(&arrow.path),
            stroke,
            style.stroke_width,
            arrow.end_marker.id()
        );
        if let Some(start) = arrow.start_marker {
            let _ = write!(out, r#" marker-start="url(#{})""#, start.id());
        }
        out.push_str("/>");
    }
    out.push_str("</svg>");
    out
}

fn write_marker(out: &mut String, glyph: &MarkerGlyph) {
    let _ = write!(
        out,
        r#"<marker id="{}" markerWidth="{}" markerHeight="{}" refX="{}" refY="{}" orient="auto" markerUnits="strokeWidth"><path d="{}" fill="{}"/></marker>"#,
        glyph.reference.id(),
        glyph.width,
        glyph.height,
        glyph.ref_x,
        glyph.ref_y,
        escape(&glyph.path),
        escape(&glyph.fill),
    );
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// [`ArrowSurface`] that keeps the most recent SVG document.
#[derive(Debug, Default, Clone)]
pub struct SvgOverlay {
    document: String,
    renders: usize,
}

impl SvgOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last rendered document; empty before the first render.
    pub fn document(&self) -> &str {
        &self.document
    }

    /// Number of renders received so far.
    pub fn render_count(&self) -> usize {
        self.renders
    }
}

impl ArrowSurface for SvgOverlay {
    fn render(&mut self, arrows: &[ArrowGeometry], style: &ArrowStyle) {
        self.document = render_svg(arrows, style);
        self.renders += 1;
    }

    fn clear(&mut self) {
        self.document.clear();
    }
}
