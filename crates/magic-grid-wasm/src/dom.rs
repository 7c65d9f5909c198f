//! Host capabilities backed by the browser DOM and `window`.

use std::time::Duration;

use magic_grid_core::{ElementTree, HostError, Scheduler, Size, Style, StyleSink};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

fn window() -> Result<Window, HostError> {
    web_sys::window().ok_or(HostError::NoWindow)
}

fn millis(duration: Duration) -> i32 {
    i32::try_from(duration.as_millis()).unwrap_or(i32::MAX)
}

fn scheduler_error(err: JsValue) -> HostError {
    HostError::Scheduler {
        reason: err
            .as_string()
            .unwrap_or_else(|| format!("{:?}", err)),
    }
}

/// The live document: element queries, measurement, and inline styles.
#[derive(Debug, Clone)]
pub struct Dom {
    document: Document,
}

impl Dom {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// The document of the current window.
    pub fn from_window() -> Result<Self, HostError> {
        window()?
            .document()
            .map(Self::new)
            .ok_or(HostError::NoWindow)
    }
}

impl ElementTree for Dom {
    type Node = Element;

    fn query_selector(&self, selector: &str) -> Option<Element> {
        // An invalid selector matches nothing.
        self.document.query_selector(selector).ok().flatten()
    }

    fn children(&self, container: &Element) -> Vec<Element> {
        let children = container.children();
        (0..children.length())
            .filter_map(|i| children.item(i))
            .collect()
    }

    fn measure(&self, node: &Element) -> Size {
        let rect = node.get_bounding_client_rect();
        Size::new(rect.width(), rect.height())
    }
}

impl StyleSink for Dom {
    type Node = Element;

    fn set_style(&self, node: &Element, style: &Style) {
        let Some(element) = node.dyn_ref::<HtmlElement>() else {
            tracing::trace!(tag = %node.tag_name(), "not an HTML element; style skipped");
            return;
        };
        if let Err(err) = element
            .style()
            .set_property(style.property(), &style.value())
        {
            tracing::debug!(?err, %style, "could not set style");
        }
    }
}

/// Registration handed back by [`BrowserScheduler`].
///
/// Owns the JS closure so it stays callable until the registration is
/// cancelled or the handle dropped.
pub enum BrowserHandle {
    Interval {
        id: i32,
        _callback: Closure<dyn FnMut()>,
    },
    Timeout {
        id: i32,
        _callback: Closure<dyn FnMut()>,
    },
    Resize(Closure<dyn FnMut()>),
}

impl std::fmt::Debug for BrowserHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Interval { id, .. } => f.debug_tuple("Interval").field(id).finish(),
            Self::Timeout { id, .. } => f.debug_tuple("Timeout").field(id).finish(),
            Self::Resize(_) => f.write_str("Resize"),
        }
    }
}

/// Timers and resize events on `window`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

impl BrowserScheduler {
    pub fn new() -> Self {
        Self
    }
}

impl Scheduler for BrowserScheduler {
    type Handle = BrowserHandle;

    fn set_interval(
        &self,
        period: Duration,
        callback: Box<dyn FnMut()>,
    ) -> Result<BrowserHandle, HostError> {
        let callback = Closure::wrap(callback);
        let id = window()?
            .set_interval_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                millis(period),
            )
            .map_err(scheduler_error)?;
        Ok(BrowserHandle::Interval {
            id,
            _callback: callback,
        })
    }

    fn clear_interval(&self, handle: BrowserHandle) {
        match (web_sys::window(), handle) {
            (Some(window), BrowserHandle::Interval { id, .. }) => {
                window.clear_interval_with_handle(id)
            }
            (_, handle) => tracing::debug!(?handle, "interval not cleared"),
        }
    }

    fn set_timeout(
        &self,
        delay: Duration,
        callback: Box<dyn FnOnce()>,
    ) -> Result<BrowserHandle, HostError> {
        let callback = Closure::once(move || callback());
        let id = window()?
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                millis(delay),
            )
            .map_err(scheduler_error)?;
        Ok(BrowserHandle::Timeout {
            id,
            _callback: callback,
        })
    }

    fn clear_timeout(&self, handle: BrowserHandle) {
        match (web_sys::window(), handle) {
            (Some(window), BrowserHandle::Timeout { id, .. }) => {
                window.clear_timeout_with_handle(id)
            }
            (_, handle) => tracing::debug!(?handle, "timeout not cleared"),
        }
    }

    fn on_resize(&self, callback: Box<dyn FnMut()>) -> Result<BrowserHandle, HostError> {
        let callback = Closure::wrap(callback);
        window()?
            .add_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())
            .map_err(scheduler_error)?;
        Ok(BrowserHandle::Resize(callback))
    }

    fn remove_resize_listener(&self, handle: BrowserHandle) {
        match (web_sys::window(), handle) {
            (Some(window), BrowserHandle::Resize(callback)) => {
                let removed = window.remove_event_listener_with_callback(
                    "resize",
                    callback.as_ref().unchecked_ref(),
                );
                if let Err(err) = removed {
                    tracing::debug!(?err, "could not remove resize listener");
                }
            }
            (_, handle) => tracing::debug!(?handle, "resize listener not removed"),
        }
    }
}
