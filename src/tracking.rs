//! Element measurement and change notification.
//!
//! The container never measures anything itself. It holds live
//! [`ElementRect`] accessors and re-queries them on every recompute, and it
//! relies on two collaborators to tell it *when* to recompute:
//!
//! - a [`SizeNotifier`], which watches individual elements, and
//! - a [`ResizeSignal`], which fires when the whole window resizes.
//!
//! [`RectWatcher`] and [`LocalResizeSignal`] are in-process implementations
//! of both, suitable for hosts that report geometry through Slint callbacks.
//!
//! # Example
//!
//! ```ignore
//! use slint_connector_arrows::{ArrowContainer, ArrowStyle, RectWatcher, TrackedElement};
//!
//! let watcher = Rc::new(RectWatcher::new());
//! let container = ArrowContainer::with_notifier(ArrowStyle::default(), watcher.clone());
//!
//! let card = TrackedElement::new(Rect::new(0.0, 0.0, 100.0, 50.0));
//! container.register_element("card").attach(card.clone());
//!
//! // Forward Slint geometry reports, then poll once per frame
//! window.on_card_rect_changed(move |x, y, w, h| card.set_rect(Rect::new(x, y, w, h)));
//! watcher.poll();
//! ```

use crate::anchor::Rect;
use crate::registry::ElementKey;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Callback the collaborators invoke to request a recompute.
pub type ChangeCallback = Rc<dyn Fn()>;

/// Live accessor for an element's on-screen rectangle.
pub trait ElementRect {
    /// Current bounding rectangle in window coordinates.
    fn bounding_rect(&self) -> Rect;
}

/// An element whose rectangle is pushed in by the host.
///
/// Typically updated from a Slint `changed` callback or geometry report.
#[derive(Debug, Default)]
pub struct TrackedElement {
    rect: Cell<Rect>,
}

impl TrackedElement {
    pub fn new(rect: Rect) -> Rc<Self> {
        Rc::new(Self {
            rect: Cell::new(rect),
        })
    }

    pub fn set_rect(&self, rect: Rect) {
        self.rect.set(rect);
    }

    /// Shift the element without changing its size.
    pub fn move_to(&self, left: f32, top: f32) {
        let rect = self.rect.get();
        self.rect.set(Rect::new(left, top, rect.width, rect.height));
    }
}

impl ElementRect for TrackedElement {
    fn bounding_rect(&self) -> Rect {
        self.rect.get()
    }
}

/// Adapts a closure into an [`ElementRect`].
pub struct RectFn<F>(pub F);

impl<F> ElementRect for RectFn<F>
where
    F: Fn() -> Rect,
{
    fn bounding_rect(&self) -> Rect {
        (self.0)()
    }
}

/// Watches elements for size or position changes.
pub trait SizeNotifier {
    /// Start watching `element`; `on_change` fires whenever its box changes.
    fn observe(&self, key: &ElementKey, element: Rc<dyn ElementRect>, on_change: ChangeCallback);

    /// Stop watching the element registered under `key`.
    fn unobserve(&self, key: &ElementKey);
}

struct WatchEntry {
    key: ElementKey,
    element: Rc<dyn ElementRect>,
    last_seen: Rect,
    on_change: ChangeCallback,
}

/// Polling [`SizeNotifier`]: compares every observed element's rectangle with
/// the one seen on the previous [`poll`](Self::poll).
#[derive(Default)]
pub struct RectWatcher {
    entries: RefCell<Vec<WatchEntry>>,
}

impl RectWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn is_observing(&self, key: &ElementKey) -> bool {
        self.entries.borrow().iter().any(|entry| &entry.key == key)
    }

    /// Re-measure every observed element and fire callbacks for those that
    /// moved or resized. Returns the number of changed elements.
    pub fn poll(&self) -> usize {
        let fired: Vec<ChangeCallback> = {
            let mut entries = self.entries.borrow_mut();
            entries
                .iter_mut()
                .filter_map(|entry| {
                    let current = entry.element.bounding_rect();
                    if current == entry.last_seen {
                        return None;
                    }
                    tracing::trace!(key = %entry.key, ?current, "element box changed");
                    entry.last_seen = current;
                    Some(entry.on_change.clone())
                })
                .collect()
        };

        // Callbacks may call back into the watcher, so the borrow is released first.
        for callback in &fired {
            callback();
        }
        fired.len()
    }
}

impl SizeNotifier for RectWatcher {
    fn observe(&self, key: &ElementKey, element: Rc<dyn ElementRect>, on_change: ChangeCallback) {
        let last_seen = element.bounding_rect();
        let mut entries = self.entries.borrow_mut();
        entries.retain(|entry| &entry.key != key);
        entries.push(WatchEntry {
            key: key.clone(),
            element,
            last_seen,
            on_change,
        });
    }

    fn unobserve(&self, key: &ElementKey) {
        self.entries.borrow_mut().retain(|entry| &entry.key != key);
    }
}

/// Window-level resize notifications.
pub trait ResizeSignal {
    /// Attach `callback`; it stays attached until the returned guard is dropped.
    fn subscribe(&self, callback: ChangeCallback) -> ResizeSubscription;
}

/// Guard for a [`ResizeSignal`] listener. Dropping it detaches the listener.
#[must_use = "dropping the subscription detaches the listener immediately"]
pub struct ResizeSubscription {
    detach: Option<Box<dyn FnOnce()>>,
}

impl ResizeSubscription {
    pub fn new(detach: impl FnOnce() + 'static) -> Self {
        Self {
            detach: Some(Box::new(detach)),
        }
    }

    /// Detach now. Equivalent to dropping the guard.
    pub fn cancel(self) {}
}

impl Drop for ResizeSubscription {
    fn drop(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

#[derive(Default)]
struct ListenerList {
    next_id: u64,
    listeners: Vec<(u64, ChangeCallback)>,
}

/// In-process [`ResizeSignal`]; the host calls [`emit`](Self::emit) from its
/// window size change handler.
#[derive(Clone, Default)]
pub struct LocalResizeSignal {
    inner: Rc<RefCell<ListenerList>>,
}

impl LocalResizeSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Notify every attached listener.
    pub fn emit(&self) {
        let listeners: Vec<ChangeCallback> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .map(|(_, callback)| callback.clone())
            .collect();
        for callback in listeners {
            callback();
        }
    }
}

impl ResizeSignal for LocalResizeSignal {
    fn subscribe(&self, callback: ChangeCallback) -> ResizeSubscription {
        let id = {
            let mut list = self.inner.borrow_mut();
            let id = list.next_id;
            list.next_id += 1;
            list.listeners.push((id, callback));
            id
        };

        let inner: Weak<RefCell<ListenerList>> = Rc::downgrade(&self.inner);
        ResizeSubscription::new(move || {
            if let Some(inner) = inner.upgrade() {
                inner.borrow_mut().listeners.retain(|(lid, _)| *lid != id);
            }
        })
    }
}
