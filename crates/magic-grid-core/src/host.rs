//! Capabilities the engine consumes from its host environment.
//!
//! A browser binding implements these over the DOM and `window`; the headless
//! host in `magic-grid-engine` implements them in memory. Implementations are
//! single-threaded and take `&self`; they must never invoke a registered
//! callback synchronously from inside one of these methods.

use std::time::Duration;

use crate::errors::HostError;
use crate::types::{Size, Style};

/// Read access to the element tree.
pub trait ElementTree {
    /// Handle to an element.
    type Node: Clone;

    /// Find the first element matching `selector`.
    fn query_selector(&self, selector: &str) -> Option<Self::Node>;

    /// Child elements of `container`, in document order.
    fn children(&self, container: &Self::Node) -> Vec<Self::Node>;

    /// Current rendered size of `node`.
    fn measure(&self, node: &Self::Node) -> Size;
}

/// Write-only style output.
pub trait StyleSink {
    type Node;

    fn set_style(&self, node: &Self::Node, style: &Style);
}

/// Timers and the resize subscription.
pub trait Scheduler {
    /// Token returned by a registration and consumed by its cancellation.
    type Handle;

    fn set_interval(
        &self,
        period: Duration,
        callback: Box<dyn FnMut()>,
    ) -> Result<Self::Handle, HostError>;

    fn clear_interval(&self, handle: Self::Handle);

    fn set_timeout(
        &self,
        delay: Duration,
        callback: Box<dyn FnOnce()>,
    ) -> Result<Self::Handle, HostError>;

    /// Cancel a pending timeout. Never called for a timeout that already fired.
    fn clear_timeout(&self, handle: Self::Handle);

    /// Subscribe to viewport resize events.
    fn on_resize(&self, callback: Box<dyn FnMut()>) -> Result<Self::Handle, HostError>;

    fn remove_resize_listener(&self, handle: Self::Handle);
}
