//! Lifecycle controller for magic-grid.
//!
//! [`MagicGrid`] binds a masonry layout to a container in a host document. It
//! waits until all items are present, lays them out, and lays them out again
//! after the viewport settles from a resize. The host is abstracted behind the
//! traits in [`magic_grid_core::host`]; [`headless`] provides an in-memory
//! implementation.
//!
//! # Example
//!
//! ```
//! use magic_grid_core::{GridOptions, Size};
//! use magic_grid_engine::headless::{HeadlessDocument, ManualScheduler};
//! use magic_grid_engine::{LifecycleState, MagicGrid};
//!
//! let doc = HeadlessDocument::new();
//! let container = doc.add_container(".gallery", 1000.0);
//! for height in [200.0, 150.0, 300.0] {
//!     doc.append_item(container, Size::new(300.0, height));
//! }
//!
//! let options = GridOptions::new(".gallery").with_items(3);
//! let grid = MagicGrid::new(options, doc.clone(), doc.clone(), ManualScheduler::new()).unwrap();
//!
//! assert_eq!(grid.state(), LifecycleState::Listening);
//! assert_eq!(doc.style(container, "height").as_deref(), Some("325px"));
//! ```

pub mod headless;
mod lifecycle;

pub use lifecycle::{LifecycleState, MagicGrid};
