//! Column planning.
//!
//! Derives the number of columns and the horizontal centering offset from the
//! container width. All items are assumed to share the width of the first
//! one; the planner never looks at any other item.

use std::num::NonZeroUsize;

use smallvec::SmallVec;

/// A column being filled during one layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Column {
    pub index: usize,
    /// Accumulated height, including one gutter per placed item
    pub height: f64,
}

/// Columns of a single pass. Most grids have only a handful.
pub type Columns = SmallVec<[Column; 8]>;

/// Result of column planning. Only [`plan_columns`] builds one, so it always
/// holds at least one column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnPlan {
    /// Empty columns in index order
    pub(crate) columns: Columns,
    /// Item width plus gutter
    pub(crate) pitch: f64,
    /// Horizontal space left over after the columns, plus one gutter
    pub(crate) leftover: f64,
}

impl ColumnPlan {
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Item width plus gutter.
    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    /// Horizontal space left over after the columns, plus one gutter.
    pub fn leftover(&self) -> f64 {
        self.leftover
    }

    /// Number of columns, at least one.
    pub fn count(&self) -> usize {
        self.columns.len()
    }

    /// Left margin that centers the columns in the container.
    pub fn offset(&self) -> f64 {
        (self.leftover / 2.0).floor().max(0.0)
    }

    /// Left edge of a column.
    pub fn left(&self, index: usize) -> f64 {
        index as f64 * self.pitch + self.offset()
    }
}

/// Plan columns for a container.
///
/// The count is `floor(container_width / pitch)`, never less than one and
/// capped at `max_columns`. A pitch that is not a positive finite number also
/// yields a single column.
pub fn plan_columns(
    container_width: f64,
    item_width: f64,
    gutter: f64,
    max_columns: Option<NonZeroUsize>,
) -> ColumnPlan {
    let pitch = item_width + gutter;

    let natural = if pitch > 0.0 && pitch.is_finite() && container_width.is_finite() {
        (container_width / pitch).floor()
    } else {
        0.0
    };

    let mut count = if natural >= 1.0 { natural as usize } else { 1 };
    if let Some(max) = max_columns {
        count = count.min(max.get());
    }

    let columns = (0..count).map(|index| Column { index, height: 0.0 }).collect();
    let leftover = container_width - count as f64 * pitch + gutter;

    ColumnPlan { columns, pitch, leftover }
}

/// Index of the shortest column; the lowest index wins ties.
pub fn shortest(columns: &[Column]) -> usize {
    let mut best = 0;
    for (i, column) in columns.iter().enumerate().skip(1) {
        if column.height < columns[best].height {
            best = i;
        }
    }
    best
}

/// Height of the tallest column, zero for no columns.
pub fn tallest(columns: &[Column]) -> f64 {
    columns.iter().map(|c| c.height).fold(0.0_f64, f64::max)
}
