//! Test harness mirroring a typical host setup: one parent element, a set of
//! cards reporting their geometry, a polling watcher and a window resize
//! signal.

#![allow(dead_code)]

use super::{init_tracing, RenderTracker};
use slint_connector_arrows::{
    AnchorSide, ArrowContainer, ArrowGeometry, ArrowStyle, LocalResizeSignal, Point, Rect,
    RectWatcher, TrackedElement,
};
use std::collections::HashMap;
use std::rc::Rc;

pub struct ArrowTestHarness {
    pub arrows: ArrowContainer,
    pub watcher: Rc<RectWatcher>,
    pub resize: LocalResizeSignal,
    pub parent: Rc<TrackedElement>,
    pub cards: HashMap<String, Rc<TrackedElement>>,
    pub tracker: RenderTracker,
}

impl ArrowTestHarness {
    /// Mounted container with the parent at the window origin.
    pub fn new() -> Self {
        Self::with_parent(Rect::new(0.0, 0.0, 0.0, 0.0))
    }

    pub fn with_parent(parent_rect: Rect) -> Self {
        Self::with_style_and_parent(ArrowStyle::default(), parent_rect)
    }

    pub fn with_style_and_parent(style: ArrowStyle, parent_rect: Rect) -> Self {
        init_tracing();
        let watcher = Rc::new(RectWatcher::new());
        let resize = LocalResizeSignal::new();
        let arrows = ArrowContainer::with_notifier(style, watcher.clone());
        let tracker = RenderTracker::new();
        arrows.bind_surface(Box::new(tracker.clone()));
        arrows.mount(&resize);

        let parent = TrackedElement::new(parent_rect);
        arrows.register_parent(parent.clone());

        Self {
            arrows,
            watcher,
            resize,
            parent,
            cards: HashMap::new(),
            tracker,
        }
    }

    /// Register a card under `key` and attach it immediately.
    pub fn add_card(&mut self, key: &str, rect: Rect) -> Rc<TrackedElement> {
        let card = TrackedElement::new(rect);
        self.arrows.register_element(key).attach(card.clone());
        self.cards.insert(key.to_owned(), card.clone());
        card
    }

    pub fn card(&self, key: &str) -> Rc<TrackedElement> {
        self.cards[key].clone()
    }

    pub fn relate(&self, from: &str, from_anchor: &str, to: &str, to_anchor: &str, start_arrow: bool) {
        self.arrows.register_relation(
            from,
            AnchorSide::from(from_anchor),
            to,
            AnchorSide::from(to_anchor),
            start_arrow,
        );
    }

    pub fn paths(&self) -> Vec<String> {
        self.arrows.geometries().into_iter().map(|g| g.path).collect()
    }

    pub fn arrow(&self, index: usize) -> ArrowGeometry {
        self.arrows.geometries()[index].clone()
    }
}

/// The two cards used throughout the end-to-end scenarios.
pub fn side_by_side() -> ArrowTestHarness {
    let mut harness = ArrowTestHarness::new();
    harness.add_card("a", Rect::new(0.0, 0.0, 100.0, 50.0));
    harness.add_card("b", Rect::new(200.0, 0.0, 100.0, 50.0));
    harness
}

pub fn point(x: f32, y: f32) -> Point {
    Point::new(x, y)
}
