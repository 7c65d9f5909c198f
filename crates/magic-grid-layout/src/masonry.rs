//! One complete layout pass: plan columns, then place items.

use std::num::NonZeroUsize;

use magic_grid_core::{ColumnSelection, GridConfig, LayoutError, Size, DEFAULT_GUTTER};

use crate::columns::plan_columns;
use crate::placement::{place, GridLayout};

/// Masonry layout parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MasonryLayout {
    /// Space between columns and between stacked items
    pub gutter: f64,
    /// Upper bound on the column count
    pub max_columns: Option<NonZeroUsize>,
    pub selection: ColumnSelection,
}

impl Default for MasonryLayout {
    fn default() -> Self {
        Self {
            gutter: DEFAULT_GUTTER,
            max_columns: None,
            selection: ColumnSelection::RoundRobin,
        }
    }
}

impl MasonryLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Layout parameters from a validated configuration.
    pub fn from_config(config: &GridConfig) -> Self {
        Self {
            gutter: config.gutter(),
            max_columns: config.max_columns(),
            selection: config.selection(),
        }
    }

    /// Set the gutter.
    pub fn with_gutter(mut self, gutter: f64) -> Self {
        self.gutter = gutter;
        self
    }

    /// Cap the number of columns. Zero removes the cap.
    pub fn with_max_columns(mut self, max_columns: usize) -> Self {
        self.max_columns = NonZeroUsize::new(max_columns);
        self
    }

    /// Set the column selection policy.
    pub fn with_selection(mut self, selection: ColumnSelection) -> Self {
        self.selection = selection;
        self
    }

    /// Lay out items of the given sizes in a container of the given width.
    ///
    /// Column width comes from the first item, so an empty item list has
    /// nothing to measure and is rejected.
    pub fn layout(&self, container_width: f64, items: &[Size]) -> Result<GridLayout, LayoutError> {
        let first = items.first().ok_or(LayoutError::NoItems)?;
        let plan = plan_columns(container_width, first.width, self.gutter, self.max_columns);

        tracing::debug!(
            container_width,
            columns = plan.count(),
            pitch = plan.pitch,
            items = items.len(),
            "computing masonry layout"
        );

        Ok(place(
            items.iter().map(|item| item.height),
            plan,
            self.gutter,
            self.selection,
        ))
    }
}

/// Compute a layout for `items` inside a container of `container_width`.
pub fn compute_layout(
    container_width: f64,
    items: &[Size],
    config: &GridConfig,
) -> Result<GridLayout, LayoutError> {
    MasonryLayout::from_config(config).layout(container_width, items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use magic_grid_core::GridOptions;

    fn sizes(heights: &[f64]) -> Vec<Size> {
        heights.iter().map(|&h| Size::new(300.0, h)).collect()
    }

    #[test]
    fn test_layout_from_config() {
        let config = GridOptions::new(".grid")
            .with_items(4)
            .with_use_min(true)
            .validate()
            .unwrap();

        let layout = compute_layout(1000.0, &sizes(&[200.0, 150.0, 300.0, 50.0]), &config).unwrap();

        assert_eq!(layout.column_count(), 3);
        assert_eq!(layout.placements[3].column, 1);
        assert!((layout.columns[1].height - 250.0).abs() < 0.001);
    }

    #[test]
    fn test_layout_no_items() {
        let result = MasonryLayout::new().layout(1000.0, &[]);
        assert!(matches!(result, Err(LayoutError::NoItems)));
    }

    #[test]
    fn test_max_columns_builder() {
        let layout = MasonryLayout::new()
            .with_gutter(10.0)
            .with_max_columns(2)
            .layout(1000.0, &sizes(&[10.0, 20.0, 30.0]))
            .unwrap();

        assert_eq!(layout.column_count(), 2);
        // Two columns of pitch 310 leave 1000 - 620 + 10 = 390, centered at 195.
        assert!((layout.offset - 195.0).abs() < 0.001);
        assert_eq!(layout.placements[2].column, 0);
    }

    #[test]
    fn test_layout_is_repeatable() {
        let layout = MasonryLayout::new().with_selection(ColumnSelection::Shortest);
        let items = sizes(&[120.0, 80.0, 200.0, 40.0, 90.0]);

        let first = layout.layout(800.0, &items).unwrap();
        let second = layout.layout(800.0, &items).unwrap();
        assert_eq!(first, second);
    }
}
