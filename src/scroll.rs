//! Infinite Scroll
//!
//! A single window scroll listener keyed to the latest page cursor.
//! It fires at most once per arm, when the viewport reaches the bottom of the document.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;

use crate::models::PageCursor;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportMetrics {
    pub scroll_y: f64,
    pub viewport_height: f64,
    pub document_height: f64,
}

impl ViewportMetrics {
    pub fn at_bottom(&self) -> bool {
        self.scroll_y + self.viewport_height >= self.document_height
    }

    /// Read the live window metrics
    pub fn current() -> Option<Self> {
        let window = web_sys::window()?;
        let scroll_y = window.scroll_y().ok()?;
        let viewport_height = window.inner_height().ok()?.as_f64()?;
        let document_height = window.document()?.body()?.offset_height() as f64;
        Some(Self {
            scroll_y,
            viewport_height,
            document_height,
        })
    }
}

/// Arm/fire state, separate from the DOM listener
#[derive(Debug, Default)]
pub struct ScrollArm {
    cursor: Option<PageCursor>,
}

impl ScrollArm {
    /// Arm for `cursor`, replacing any previous arm
    pub fn arm(&mut self, cursor: PageCursor) {
        self.cursor = Some(cursor);
    }

    pub fn disarm(&mut self) {
        self.cursor = None;
    }

    pub fn is_armed(&self) -> bool {
        self.cursor.is_some()
    }

    /// Returns the cursor and disarms when at the bottom
    pub fn poll(&mut self, metrics: ViewportMetrics) -> Option<PageCursor> {
        if metrics.at_bottom() {
            self.cursor.take()
        } else {
            None
        }
    }
}

/// Binds a [`ScrollArm`] to one `scroll` listener on `window`
#[derive(Default)]
pub struct ScrollTrigger {
    state: Rc<RefCell<ScrollArm>>,
    listener: RefCell<Option<EventListener>>,
}

impl ScrollTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm for `cursor`. The previous listener is dropped, which detaches it.
    /// `on_fire` runs inside the scroll event and must not re-arm synchronously.
    pub fn arm<F>(&self, cursor: PageCursor, on_fire: F)
    where
        F: Fn(PageCursor) + 'static,
    {
        self.state.borrow_mut().arm(cursor);

        let Some(window) = web_sys::window() else {
            log::warn!("[Scroll] No window, pagination listener not attached");
            return;
        };
        let state = Rc::clone(&self.state);
        let listener = EventListener::new(&window, "scroll", move |_| {
            let Some(metrics) = ViewportMetrics::current() else {
                return;
            };
            let fired = state.borrow_mut().poll(metrics);
            if let Some(cursor) = fired {
                log::debug!("[Scroll] Reached bottom, loading page {}", cursor.as_str());
                on_fire(cursor);
            }
        });
        self.listener.replace(Some(listener));
    }

    /// Terminal state: no more pages, or the query is being replaced
    pub fn disarm(&self) {
        self.state.borrow_mut().disarm();
        self.listener.take();
    }

    pub fn is_armed(&self) -> bool {
        self.state.borrow().is_armed()
    }
}
