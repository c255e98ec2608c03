//! Rendering adapters.
//!
//! The container hands every recomputed arrow list to an [`ArrowSurface`].
//! [`ModelSurface`] keeps a Slint `VecModel` in sync so a `for` loop of `Path`
//! elements in `.slint` markup can draw the arrows; [`SvgOverlay`](crate::SvgOverlay)
//! produces a standalone SVG document instead.
//!
//! # Example
//!
//! ```ignore
//! let model = Rc::new(VecModel::<ArrowPath>::default());
//! container.bind_model(model.clone(), |row| ArrowPath {
//!     commands: row.path,
//!     color: row.stroke_color,
//!     width: row.stroke_width,
//!     start_marker: row.start_marker,
//! });
//! window.set_arrows(ModelRc::from(model));
//! ```

use crate::arrow::ArrowGeometry;
use crate::style::ArrowStyle;
use slint::{Color, Model, ModelRc, SharedString, VecModel};
use std::rc::Rc;

/// Stroke used when the configured color cannot be parsed.
fn fallback_stroke() -> Color {
    Color::from_rgb_u8(255, 0, 0)
}

/// Destination for computed arrows.
pub trait ArrowSurface {
    /// Replace whatever is drawn with `arrows`.
    fn render(&mut self, arrows: &[ArrowGeometry], style: &ArrowStyle);

    /// Remove everything drawn so far.
    fn clear(&mut self) {
        self.render(&[], &ArrowStyle::default());
    }
}

/// Lets a host keep its own handle on a surface after binding it.
impl<S: ArrowSurface> ArrowSurface for Rc<std::cell::RefCell<S>> {
    fn render(&mut self, arrows: &[ArrowGeometry], style: &ArrowStyle) {
        self.borrow_mut().render(arrows, style);
    }

    fn clear(&mut self) {
        self.borrow_mut().clear();
    }
}

/// One arrow flattened into the values a Slint `Path` needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowRow {
    pub key: SharedString,
    pub path: SharedString,
    pub stroke_color: Color,
    pub stroke_width: f32,
    /// Whether the start-side arrowhead is drawn.
    pub start_marker: bool,
}

impl ArrowRow {
    pub fn new(arrow: &ArrowGeometry, stroke_color: Color, stroke_width: f32) -> Self {
        Self {
            key: SharedString::from(arrow.key.as_str()),
            path: SharedString::from(arrow.path.as_str()),
            stroke_color,
            stroke_width,
            start_marker: arrow.start_marker.is_some(),
        }
    }
}

fn stroke_of(style: &ArrowStyle) -> Color {
    style.stroke_rgb().unwrap_or_else(|err| {
        tracing::warn!(%err, "unusable stroke color, falling back to red");
        fallback_stroke()
    })
}

fn rows<'a>(arrows: &'a [ArrowGeometry], style: &ArrowStyle) -> impl Iterator<Item = ArrowRow> + 'a {
    let stroke_color = stroke_of(style);
    let stroke_width = style.stroke_width;
    arrows
        .iter()
        .map(move |arrow| ArrowRow::new(arrow, stroke_color, stroke_width))
}

/// Keeps a Slint `VecModel` in sync with the arrow list.
///
/// Rows are updated in place, new rows pushed and excess rows removed, so
/// the Slint side only sees the rows that actually changed.
pub struct ModelSurface<P, F> {
    model: Rc<VecModel<P>>,
    constructor: F,
}

impl<P, F> ModelSurface<P, F>
where
    P: Clone + 'static,
    F: Fn(ArrowRow) -> P,
{
    pub fn new(model: Rc<VecModel<P>>, constructor: F) -> Self {
        Self { model, constructor }
    }

    pub fn model(&self) -> Rc<VecModel<P>> {
        self.model.clone()
    }
}

impl<P, F> ArrowSurface for ModelSurface<P, F>
where
    P: Clone + 'static,
    F: Fn(ArrowRow) -> P,
{
    fn render(&mut self, arrows: &[ArrowGeometry], style: &ArrowStyle) {
        let mut count = 0;
        for (i, row) in rows(arrows, style).enumerate() {
            let item = (self.constructor)(row);
            if i < self.model.row_count() {
                self.model.set_row_data(i, item);
            } else {
                self.model.push(item);
            }
            count += 1;
        }
        while self.model.row_count() > count {
            self.model.remove(self.model.row_count() - 1);
        }
    }

    fn clear(&mut self) {
        while self.model.row_count() > 0 {
            self.model.remove(self.model.row_count() - 1);
        }
    }
}

/// Build a fresh Slint model from an arrow list.
pub fn create_rows_model<P, F>(arrows: &[ArrowGeometry], style: &ArrowStyle, constructor: F) -> ModelRc<P>
where
    P: Clone + 'static,
    F: Fn(ArrowRow) -> P,
{
    let items: Vec<P> = rows(arrows, style).map(constructor).collect();
    ModelRc::from(Rc::new(VecModel::from(items)))
}
