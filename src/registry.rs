use crate::anchor::{resolve_anchor_point, to_relative, AnchorSide, Rect};
use crate::arrow::{compute_arrow_geometry, ArrowEndpoints, ArrowGeometry};
use crate::point::Point;
use crate::style::ArrowStyle;
use crate::tracking::ElementRect;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Name of a registered element, unique within one container.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementKey(String);

impl ElementKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ElementKey {
    fn from(key: &str) -> Self {
        Self(key.to_owned())
    }
}

impl From<String> for ElementKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl Borrow<str> for ElementKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One end of a relation: an element and the side the line attaches to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelationEnd {
    pub key: ElementKey,
    pub anchor: AnchorSide,
}

impl RelationEnd {
    pub fn new(key: impl Into<ElementKey>, anchor: AnchorSide) -> Self {
        Self {
            key: key.into(),
            anchor,
        }
    }
}

/// Directed declaration that a line connects `from` to `to`.
///
/// The end always carries an arrowhead; `start_arrow` adds one at the start.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Relation {
    pub from: RelationEnd,
    pub to: RelationEnd,
    pub start_arrow: bool,
}

impl Relation {
    pub fn new(
        from_key: impl Into<ElementKey>,
        from_anchor: AnchorSide,
        to_key: impl Into<ElementKey>,
        to_anchor: AnchorSide,
    ) -> Self {
        Self {
            from: RelationEnd::new(from_key, from_anchor),
            to: RelationEnd::new(to_key, to_anchor),
            start_arrow: false,
        }
    }

    pub fn with_start_arrow(mut self, start_arrow: bool) -> Self {
        self.start_arrow = start_arrow;
        self
    }

    /// Textual identity, e.g. `"a:right->b:left"`. Duplicated relations share it.
    pub fn key(&self) -> String {
        let suffix = if self.start_arrow { "+start" } else { "" };
        format!(
            "{}:{}->{}:{}{}",
            self.from.key, self.from.anchor, self.to.key, self.to.anchor, suffix
        )
    }
}

/// Everything one container knows about its elements and relations.
///
/// Rectangles are never cached: every resolution re-queries the live accessor.
#[derive(Default)]
pub struct RegistryState {
    origin: Option<Rc<dyn ElementRect>>,
    elements: HashMap<ElementKey, Rc<dyn ElementRect>>,
    relations: Vec<Relation>,
}

impl RegistryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `element` under `key` unless the key is already taken.
    ///
    /// Returns `true` if the element was stored.
    pub fn insert_element(&mut self, key: ElementKey, element: Rc<dyn ElementRect>) -> bool {
        if self.elements.contains_key(&key) {
            return false;
        }
        self.elements.insert(key, element);
        true
    }

    /// Set the origin element unless one is already set.
    pub fn set_origin(&mut self, element: Rc<dyn ElementRect>) -> bool {
        if self.origin.is_some() {
            return false;
        }
        self.origin = Some(element);
        true
    }

    pub fn has_origin(&self) -> bool {
        self.origin.is_some()
    }

    /// Append a relation. Duplicates are kept and drawn twice.
    pub fn push_relation(&mut self, relation: Relation) {
        if self.relations.contains(&relation) {
            tracing::debug!(relation = %relation.key(), "duplicate relation registered");
        }
        self.relations.push(relation);
    }

    pub fn contains_element(&self, key: &str) -> bool {
        self.elements.contains_key(key)
    }

    pub fn element_keys(&self) -> impl Iterator<Item = &ElementKey> + '_ {
        self.elements.keys()
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// Current rectangle of `key`, or [`Rect::ZERO`] if it has not registered yet.
    pub fn rect_of(&self, key: &str) -> Rect {
        self.elements
            .get(key)
            .map(|element| element.bounding_rect())
            .unwrap_or(Rect::ZERO)
    }

    /// Top-left corner of the origin element; `(0, 0)` while there is none.
    pub fn origin_point(&self) -> Point {
        self.origin
            .as_ref()
            .map(|origin| origin.bounding_rect().top_left())
            .unwrap_or(Point::ORIGIN)
    }

    /// Origin-relative anchor point of one relation end.
    pub fn resolve_end(&self, end: &RelationEnd, origin: Point) -> Point {
        let absolute = resolve_anchor_point(self.rect_of(end.key.as_str()), end.anchor);
        to_relative(absolute, origin)
    }

    /// Derive geometry for every relation, in registration order.
    pub fn compute_all_geometries(&self, style: &ArrowStyle) -> Vec<ArrowGeometry> {
        let origin = self.origin_point();
        self.relations
            .iter()
            .map(|relation| {
                let endpoints = ArrowEndpoints {
                    start: self.resolve_end(&relation.from, origin),
                    start_side: relation.from.anchor,
                    end: self.resolve_end(&relation.to, origin),
                    end_side: relation.to.anchor,
                    start_arrow: relation.start_arrow,
                };
                let geometry = compute_arrow_geometry(
                    relation.key(),
                    &endpoints,
                    style.arrow_length,
                    style.stroke_width,
                );
                tracing::trace!(key = %geometry.key, path = %geometry.path, "arrow geometry");
                geometry
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::TrackedElement;

    fn setup_state() -> RegistryState {
        let mut state = RegistryState::new();
        state.insert_element("a".into(), TrackedElement::new(Rect::new(0.0, 0.0, 100.0, 50.0)));
        state.insert_element("b".into(), TrackedElement::new(Rect::new(200.0, 0.0, 100.0, 50.0)));
        state
    }

    #[test]
    fn test_insert_element_first_write_wins() {
        let mut state = setup_state();
        let replaced = state.insert_element("a".into(), TrackedElement::new(Rect::new(9.0, 9.0, 9.0, 9.0)));

        assert!(!replaced);
        assert_eq!(state.element_count(), 2);
        assert_eq!(state.rect_of("a"), Rect::new(0.0, 0.0, 100.0, 50.0));
    }

    #[test]
    fn test_set_origin_first_write_wins() {
        let mut state = RegistryState::new();
        assert_eq!(state.origin_point(), Point::ORIGIN);

        assert!(state.set_origin(TrackedElement::new(Rect::new(10.0, 20.0, 500.0, 500.0))));
        assert!(!state.set_origin(TrackedElement::new(Rect::new(99.0, 99.0, 1.0, 1.0))));
        assert!(state.has_origin());
        assert_eq!(state.origin_point(), Point::new(10.0, 20.0));
    }

    #[test]
    fn test_missing_element_degrades_to_zero_rect() {
        let state = setup_state();
        assert_eq!(state.rect_of("ghost"), Rect::ZERO);
        let end = RelationEnd::new("ghost", AnchorSide::Bottom);
        assert_eq!(state.resolve_end(&end, Point::ORIGIN), Point::ORIGIN);
    }

    #[test]
    fn test_resolve_end_is_origin_relative() {
        let state = setup_state();
        let end = RelationEnd::new("b", AnchorSide::Left);
        assert_eq!(state.resolve_end(&end, Point::new(50.0, 5.0)), Point::new(150.0, 20.0));
    }

    #[test]
    fn test_rects_are_requeried_live() {
        let mut state = RegistryState::new();
        let a = TrackedElement::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        state.insert_element("a".into(), a.clone());

        a.move_to(40.0, 40.0);
        assert_eq!(state.rect_of("a"), Rect::new(40.0, 40.0, 10.0, 10.0));
    }

    #[test]
    fn test_duplicate_relations_are_kept() {
        let mut state = setup_state();
        let relation = Relation::new("a", AnchorSide::Right, "b", AnchorSide::Left);
        state.push_relation(relation.clone());
        state.push_relation(relation);

        let geometries = state.compute_all_geometries(&ArrowStyle::default());
        assert_eq!(geometries.len(), 2);
        assert_eq!(geometries[0], geometries[1]);
    }

    #[test]
    fn test_compute_all_geometries_follows_registration_order() {
        let mut state = setup_state();
        state.push_relation(Relation::new("b", AnchorSide::Left, "a", AnchorSide::Right));
        state.push_relation(Relation::new("a", AnchorSide::Right, "b", AnchorSide::Left));

        let keys: Vec<String> = state
            .compute_all_geometries(&ArrowStyle::default())
            .into_iter()
            .map(|g| g.key)
            .collect();
        assert_eq!(keys, vec!["b:left->a:right", "a:right->b:left"]);
    }

    #[test]
    fn test_relation_key() {
        let relation = Relation::new("a", AnchorSide::Top, "b", AnchorSide::Bottom);
        assert_eq!(relation.key(), "a:top->b:bottom");
        assert_eq!(relation.with_start_arrow(true).key(), "a:top->b:bottom+start");
    }

    #[test]
    fn test_element_key_conversions() {
        let key = ElementKey::from("card");
        assert_eq!(key, ElementKey::new(String::from("card")));
        assert_eq!(key.as_str(), "card");
        assert_eq!(key.to_string(), "card");
    }
}
