//! Item placement.

use magic_grid_core::ColumnSelection;

use crate::columns::{shortest, tallest, ColumnPlan, Columns};

/// Position assigned to one item.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    /// Position of the item among the container's children
    pub index: usize,
    pub column: usize,
    pub left: f64,
    pub top: f64,
}

/// Outcome of a layout pass.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridLayout {
    /// One entry per item, in item order
    pub placements: Vec<Placement>,
    /// Columns with their final heights
    pub columns: Columns,
    pub pitch: f64,
    /// Centering offset added to every left edge
    pub offset: f64,
    /// Height of the tallest column
    pub height: f64,
}

impl GridLayout {
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Final height of every column, in index order.
    pub fn column_heights(&self) -> Vec<f64> {
        self.columns.iter().map(|c| c.height).collect()
    }
}

/// Pick the column for item `i`.
fn next_column(columns: &Columns, i: usize, selection: ColumnSelection) -> usize {
    match selection {
        ColumnSelection::RoundRobin => i % columns.len(),
        ColumnSelection::Shortest => shortest(columns),
    }
}

/// Place items, given by height in their natural order, into planned columns.
///
/// Every item lands one gutter below the current bottom of its column, and the
/// column then grows by the item height plus a gutter.
pub fn place(
    heights: impl IntoIterator<Item = f64>,
    plan: ColumnPlan,
    gutter: f64,
    selection: ColumnSelection,
) -> GridLayout {
    let offset = plan.offset();
    let pitch = plan.pitch;
    let mut columns = plan.columns;

    let placements = heights
        .into_iter()
        .enumerate()
        .map(|(i, height)| {
            let target = next_column(&columns, i, selection);
            let column = &mut columns[target];
            let placement = Placement {
                index: i,
                column: column.index,
                left: column.index as f64 * pitch + offset,
                top: column.height + gutter,
            };
            column.height += height + gutter;
            placement
        })
        .collect();

    let height = tallest(&columns);
    tracing::trace!(columns = columns.len(), height, "placed items");

    GridLayout {
        placements,
        columns,
        pitch,
        offset,
        height,
    }
}
