//! # Slint Connector Arrows
//!
//! Directional connector arrows between tracked UI elements. Elements are
//! measured on demand, relations between their sides are declared once, and
//! every recompute re-derives straight arrow paths trimmed to stop at the
//! arrowhead marker.
//!
//! ## Features
//!
//! - **Anchor Resolution** - Top, bottom, left and right edge midpoints of any rectangle
//! - **Arrowhead Trimming** - Line ends pulled back along the anchor normal, scaled by stroke width
//! - **Fail-Soft Registry** - Relations may name elements that have not registered yet
//! - **Pluggable Notification** - Element watching and window resize are traits
//! - **Slint and SVG Output** - Sync to a `VecModel` or render a standalone SVG overlay
//!
//! ## Quick Start
//!
//! ```ignore
//! use slint_connector_arrows::{AnchorSide, ArrowContainer, ArrowStyle, Rect, TrackedElement};
//!
//! let arrows = ArrowContainer::new(ArrowStyle::default());
//! arrows.register_element("a").attach(TrackedElement::new(Rect::new(0.0, 0.0, 100.0, 50.0)));
//! arrows.register_element("b").attach(TrackedElement::new(Rect::new(200.0, 0.0, 100.0, 50.0)));
//! arrows.register_relation("a", AnchorSide::Right, "b", AnchorSide::Left, false);
//!
//! assert_eq!(arrows.geometries()[0].path, "M100,25 L180,25");
//! ```
//!
//! ## Core Components
//!
//! - [`ArrowContainer`] - Element/relation registry and recompute cycle
//! - [`resolve_anchor_point`] - Rectangle side to boundary point
//! - [`compute_arrow_geometry`] - Trimmed line path and marker flags
//! - [`RectWatcher`] / [`LocalResizeSignal`] - In-process change notification
//! - [`ModelSurface`] / [`SvgOverlay`] - Rendering adapters

pub mod point;
pub mod anchor;
pub mod arrow;
pub mod marker;
pub mod style;
pub mod error;
pub mod tracking;
pub mod registry;
pub mod container;
pub mod surface;
pub mod svg;

pub use point::Point;
pub use anchor::{direction_vector, resolve_anchor_point, to_relative, AnchorSide, Rect};
pub use arrow::{
    compute_arrow_geometry, line_path, trim_endpoint, ArrowEndpoints, ArrowGeometry,
    ARROW_LENGTH_FACTOR,
};
pub use marker::{marker_glyphs, MarkerGlyph, MarkerRef};
pub use style::{parse_color, ArrowStyle};
pub use error::{StyleError, StyleResult};
pub use tracking::{
    ChangeCallback, ElementRect, LocalResizeSignal, RectFn, RectWatcher, ResizeSignal,
    ResizeSubscription, SizeNotifier, TrackedElement,
};
pub use registry::{ElementKey, Relation, RelationEnd, RegistryState};
pub use container::{ArrowContainer, ElementHandle, Lifecycle};
pub use surface::{create_rows_model, ArrowRow, ArrowSurface, ModelSurface};
pub use svg::{render_svg, SvgOverlay};
