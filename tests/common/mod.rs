//! Common test utilities for integration tests.

#![allow(dead_code)]

pub mod harness;

use slint_connector_arrows::{ArrowGeometry, ArrowStyle, ArrowSurface};
use std::cell::RefCell;
use std::rc::Rc;

/// Records every render and clear the container sends to its surface.
#[derive(Default, Clone)]
pub struct RenderTracker {
    /// One entry per render call, holding the paths in order.
    pub renders: Rc<RefCell<Vec<Vec<String>>>>,
    /// Stroke width seen on each render.
    pub stroke_widths: Rc<RefCell<Vec<f32>>>,
    /// Count of clear calls
    pub clears: Rc<RefCell<usize>>,
}

impl RenderTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render_count(&self) -> usize {
        self.renders.borrow().len()
    }

    pub fn last_paths(&self) -> Vec<String> {
        self.renders.borrow().last().cloned().unwrap_or_default()
    }
}

impl ArrowSurface for RenderTracker {
    fn render(&mut self, arrows: &[ArrowGeometry], style: &ArrowStyle) {
        self.renders
            .borrow_mut()
            .push(arrows.iter().map(|a| a.path.clone()).collect());
        self.stroke_widths.borrow_mut().push(style.stroke_width);
    }

    fn clear(&mut self) {
        *self.clears.borrow_mut() += 1;
    }
}

/// Install a test-friendly tracing subscriber once per process.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
