//! The arrow container: element registry, relations, and recompute cycle.
//!
//! [`ArrowContainer`] owns the registry state for one overlay and turns it
//! into arrow geometry whenever something may have moved. It is a cheap
//! `Clone` handle so it can be moved into Slint callbacks.
//!
//! # Example
//!
//! ```ignore
//! use slint_connector_arrows::{AnchorSide, ArrowContainer, ArrowStyle, LocalResizeSignal, RectWatcher};
//!
//! let watcher = Rc::new(RectWatcher::new());
//! let resize = LocalResizeSignal::new();
//! let arrows = ArrowContainer::with_notifier(ArrowStyle::default(), watcher.clone());
//! arrows.mount(&resize);
//!
//! arrows.register_parent(root_element);
//! arrows.register_element("source").attach(source_element);
//! arrows.register_element("target").attach(target_element);
//! arrows.register_relation("source", AnchorSide::Right, "target", AnchorSide::Left, false);
//!
//! window.window().on_winit_window_event({
//!     let resize = resize.clone();
//!     move |_, _| { resize.emit(); EventResult::Propagate }
//! });
//!
//! // Bind the computed arrows to the UI
//! let model = Rc::new(VecModel::<ArrowPath>::default());
//! arrows.bind_model(model.clone(), |row| ArrowPath { commands: row.path, color: row.stroke_color });
//! window.set_arrows(ModelRc::from(model));
//! ```

use crate::anchor::AnchorSide;
use crate::arrow::ArrowGeometry;
use crate::error::StyleResult;
use crate::registry::{ElementKey, Relation, RegistryState};
use crate::style::ArrowStyle;
use crate::surface::{ArrowRow, ArrowSurface, ModelSurface};
use crate::tracking::{ChangeCallback, ElementRect, ResizeSignal, ResizeSubscription, SizeNotifier};
use slint::VecModel;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Where a container is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Created; registrations are accepted but no resize listener is attached.
    Uninitialized,
    /// Listening for window resizes.
    Mounted,
    /// Torn down. Further recomputes and registrations are ignored.
    Unmounted,
}

struct ContainerInner {
    state: RefCell<RegistryState>,
    style: RefCell<ArrowStyle>,
    notifier: Option<Rc<dyn SizeNotifier>>,
    geometries: RefCell<Vec<ArrowGeometry>>,
    surface: RefCell<Option<Box<dyn ArrowSurface>>>,
    lifecycle: Cell<Lifecycle>,
    resize_subscription: RefCell<Option<ResizeSubscription>>,
}

impl ContainerInner {
    fn change_callback(self: &Rc<Self>) -> ChangeCallback {
        let weak = Rc::downgrade(self);
        Rc::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.recompute();
            }
        })
    }

    fn accepts_registrations(&self, what: &str) -> bool {
        if self.lifecycle.get() == Lifecycle::Unmounted {
            tracing::warn!(what, "registration on an unmounted arrow container ignored");
            return false;
        }
        true
    }

    fn attach_element(self: &Rc<Self>, key: &ElementKey, element: Rc<dyn ElementRect>) -> bool {
        if !self.accepts_registrations("element") {
            return false;
        }
        let stored = self
            .state
            .borrow_mut()
            .insert_element(key.clone(), element.clone());
        if !stored {
            tracing::debug!(%key, "element already registered");
            return false;
        }

        if let Some(notifier) = &self.notifier {
            notifier.observe(key, element, self.change_callback());
        }
        tracing::debug!(%key, "element registered");
        self.recompute();
        true
    }

    #[tracing::instrument(skip_all)]
    fn recompute(&self) {
        if self.lifecycle.get() == Lifecycle::Unmounted {
            tracing::trace!("recompute after unmount ignored");
            return;
        }

        let style = self.style.borrow().clone();
        let arrows = self.state.borrow().compute_all_geometries(&style);
        tracing::debug!(arrows = arrows.len(), "recomputed arrows");
        *self.geometries.borrow_mut() = arrows.clone();

        // No borrow may be held while the surface runs: it is free to call
        // back into the container.
        let surface = self.surface.borrow_mut().take();
        if let Some(mut surface) = surface {
            surface.render(&arrows, &style);
            self.restore_surface(surface);
        }
    }

    /// Put a surface taken for rendering back, unless one was bound meanwhile.
    fn restore_surface(&self, surface: Box<dyn ArrowSurface>) {
        let mut slot = self.surface.borrow_mut();
        if slot.is_none() {
            *slot = Some(surface);
        }
    }

    fn teardown(&self) {
        if self.lifecycle.get() == Lifecycle::Unmounted {
            return;
        }
        self.lifecycle.set(Lifecycle::Unmounted);

        if let Some(notifier) = &self.notifier {
            let keys: Vec<ElementKey> = self.state.borrow().element_keys().cloned().collect();
            for key in &keys {
                notifier.unobserve(key);
            }
        }

        let subscription = self.resize_subscription.borrow_mut().take();
        drop(subscription);

        let surface = self.surface.borrow_mut().take();
        if let Some(mut surface) = surface {
            surface.clear();
            self.restore_surface(surface);
        }
        tracing::debug!("arrow container unmounted");
    }
}

impl Drop for ContainerInner {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Registry of elements and relations that produces arrow geometry.
///
/// All registration calls trigger a full recompute. Nothing here fails:
/// relations may name elements that have not registered yet, in which case
/// their ends sit at the origin until the element shows up.
#[derive(Clone)]
pub struct ArrowContainer {
    inner: Rc<ContainerInner>,
}

impl Default for ArrowContainer {
    fn default() -> Self {
        Self::new(ArrowStyle::default())
    }
}

impl ArrowContainer {
    /// Create a container without a size notifier. Element moves are only
    /// picked up on resize signals, registrations, or explicit recomputes.
    pub fn new(style: ArrowStyle) -> Self {
        Self::build(style, None)
    }

    /// Create a container whose elements are watched by `notifier`.
    pub fn with_notifier(style: ArrowStyle, notifier: Rc<dyn SizeNotifier>) -> Self {
        Self::build(style, Some(notifier))
    }

    fn build(style: ArrowStyle, notifier: Option<Rc<dyn SizeNotifier>>) -> Self {
        Self {
            inner: Rc::new(ContainerInner {
                state: RefCell::new(RegistryState::new()),
                style: RefCell::new(style),
                notifier,
                geometries: RefCell::new(Vec::new()),
                surface: RefCell::new(None),
                lifecycle: Cell::new(Lifecycle::Uninitialized),
                resize_subscription: RefCell::new(None),
            }),
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.inner.lifecycle.get()
    }

    pub fn style(&self) -> ArrowStyle {
        self.inner.style.borrow().clone()
    }

    /// Replace the style and recompute. Invalid styles are rejected and the
    /// current one is kept.
    pub fn set_style(&self, style: ArrowStyle) -> StyleResult<()> {
        style.validate()?;
        *self.inner.style.borrow_mut() = style;
        self.inner.recompute();
        Ok(())
    }

    /// Attach to the window resize signal and start producing arrows.
    pub fn mount(&self, resize_signal: &dyn ResizeSignal) {
        match self.lifecycle() {
            Lifecycle::Uninitialized => {}
            Lifecycle::Mounted => {
                tracing::debug!("arrow container already mounted");
                return;
            }
            Lifecycle::Unmounted => {
                tracing::warn!("cannot remount an unmounted arrow container");
                return;
            }
        }

        let subscription = resize_signal.subscribe(self.inner.change_callback());
        *self.inner.resize_subscription.borrow_mut() = Some(subscription);
        self.inner.lifecycle.set(Lifecycle::Mounted);
        tracing::debug!("arrow container mounted");
        self.inner.recompute();
    }

    /// Detach every listener and stop recomputing. Idempotent.
    pub fn unmount(&self) {
        self.inner.teardown();
    }

    /// Reserve `key`; the element itself is supplied through [`ElementHandle::attach`].
    pub fn register_element(&self, key: impl Into<ElementKey>) -> ElementHandle {
        ElementHandle {
            key: key.into(),
            container: Rc::downgrade(&self.inner),
        }
    }

    /// Set the element whose top-left corner is the coordinate origin.
    /// Only the first call has an effect.
    pub fn register_parent(&self, element: Rc<dyn ElementRect>) -> bool {
        if !self.inner.accepts_registrations("parent") {
            return false;
        }
        let stored = self.inner.state.borrow_mut().set_origin(element);
        if stored {
            tracing::debug!("origin element registered");
            self.inner.recompute();
        } else {
            tracing::debug!("origin element already registered");
        }
        stored
    }

    /// Declare an arrow from one element side to another.
    pub fn register_relation(
        &self,
        from_key: impl Into<ElementKey>,
        from_anchor: AnchorSide,
        to_key: impl Into<ElementKey>,
        to_anchor: AnchorSide,
        start_arrow: bool,
    ) {
        self.add_relation(
            Relation::new(from_key, from_anchor, to_key, to_anchor).with_start_arrow(start_arrow),
        );
    }

    pub fn add_relation(&self, relation: Relation) {
        if !self.inner.accepts_registrations("relation") {
            return;
        }
        tracing::debug!(relation = %relation.key(), "relation registered");
        self.inner.state.borrow_mut().push_relation(relation);
        self.inner.recompute();
    }

    pub fn relations(&self) -> Vec<Relation> {
        self.inner.state.borrow().relations().to_vec()
    }

    pub fn element_count(&self) -> usize {
        self.inner.state.borrow().element_count()
    }

    pub fn is_registered(&self, key: &str) -> bool {
        self.inner.state.borrow().contains_element(key)
    }

    /// Re-derive all arrows from the current rectangles and hand them to the
    /// bound surface. A no-op once unmounted.
    pub fn recompute(&self) {
        self.inner.recompute();
    }

    /// Derive all arrows from the current rectangles without storing them.
    pub fn compute_all_geometries(&self) -> Vec<ArrowGeometry> {
        let style = self.inner.style.borrow();
        self.inner.state.borrow().compute_all_geometries(&style)
    }

    /// Arrows produced by the last recompute.
    pub fn geometries(&self) -> Vec<ArrowGeometry> {
        self.inner.geometries.borrow().clone()
    }

    /// Callback that recomputes this container; holds only a weak reference.
    ///
    /// ```ignore
    /// window.on_layout_changed(arrows.recompute_callback());
    /// ```
    pub fn recompute_callback(&self) -> impl Fn() + Clone {
        let weak = Rc::downgrade(&self.inner);
        move || {
            if let Some(inner) = weak.upgrade() {
                inner.recompute();
            }
        }
    }

    /// Send every future recompute to `surface`. The current arrows are
    /// rendered immediately.
    pub fn bind_surface(&self, surface: Box<dyn ArrowSurface>) {
        *self.inner.surface.borrow_mut() = Some(surface);
        self.inner.recompute();
    }

    /// Bind to a Slint model for automatic synchronization.
    ///
    /// # Arguments
    ///
    /// * `model` - The VecModel to sync to
    /// * `constructor` - Builds a model row from an [`ArrowRow`]
    pub fn bind_model<P, F>(&self, model: Rc<VecModel<P>>, constructor: F)
    where
        P: Clone + 'static,
        F: Fn(ArrowRow) -> P + 'static,
    {
        self.bind_surface(Box::new(ModelSurface::new(model, constructor)));
    }
}

/// Pending registration of one element; see [`ArrowContainer::register_element`].
#[derive(Clone)]
pub struct ElementHandle {
    key: ElementKey,
    container: Weak<ContainerInner>,
}

impl ElementHandle {
    pub fn key(&self) -> &ElementKey {
        &self.key
    }

    /// Store the live element under this handle's key and start watching it.
    ///
    /// Returns `false` if the key was already attached (the first element
    /// wins), or the container is gone or unmounted.
    pub fn attach(&self, element: Rc<dyn ElementRect>) -> bool {
        match self.container.upgrade() {
            Some(inner) => inner.attach_element(&self.key, element),
            None => false,
        }
    }

    /// Setter callback form of [`attach`](Self::attach).
    pub fn attach_callback(&self) -> impl Fn(Rc<dyn ElementRect>) + Clone {
        let handle = self.clone();
        move |element| {
            handle.attach(element);
        }
    }
}
