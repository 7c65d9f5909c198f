//! Masonry layout computation.
//!
//! This crate computes where each item of a masonry grid goes, independent of
//! any rendering surface.
//!
//! # Architecture
//!
//! 1. **Readiness**: decides whether the item set is complete
//! 2. **Column planning**: column count and centering offset from container width
//! 3. **Placement**: assigns items to columns in order, accumulating column heights
//!
//! # Example
//!
//! ```
//! use magic_grid_core::Size;
//! use magic_grid_layout::MasonryLayout;
//!
//! let items = [Size::new(300.0, 200.0), Size::new(300.0, 150.0), Size::new(300.0, 300.0)];
//! let layout = MasonryLayout::new().with_gutter(25.0).layout(1000.0, &items).unwrap();
//!
//! assert_eq!(layout.column_count(), 3);
//! assert_eq!(layout.height, 325.0);
//! ```

mod columns;
mod masonry;
mod placement;
mod readiness;

pub use columns::{plan_columns, shortest, tallest, Column, ColumnPlan, Columns};
pub use masonry::{compute_layout, MasonryLayout};
pub use placement::{place, GridLayout, Placement};
pub use readiness::is_ready;
