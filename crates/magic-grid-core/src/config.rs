//! Grid configuration.
//!
//! [`GridOptions`] is the raw input as a caller (or a JS object) supplies it:
//! every field optional, keys in camelCase. [`GridOptions::validate`] turns it
//! into a [`GridConfig`], which is immutable and carries strong types for the
//! choices the options encode.

use std::num::NonZeroUsize;
use std::time::Duration;

use crate::errors::ConfigError;

/// Gutter used when the options do not specify one.
pub const DEFAULT_GUTTER: f64 = 25.0;

/// Interval between readiness checks while waiting for items.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Quiet period after the last resize event before relayout.
pub const DEFAULT_RESIZE_DEBOUNCE: Duration = Duration::from_millis(200);

/// Unvalidated grid options.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct GridOptions {
    /// Selector of the container element
    pub container: Option<String>,
    /// Number of items expected before layout starts
    pub items: Option<usize>,
    /// Items are already present; skip the readiness poll
    #[cfg_attr(feature = "serde", serde(rename = "static"))]
    pub static_content: bool,
    /// Space between columns and between stacked items
    pub gutter: Option<f64>,
    /// Upper bound on the number of columns (0 or `false` disables the cap)
    #[cfg_attr(feature = "serde", serde(deserialize_with = "column_cap"))]
    pub max_columns: Option<usize>,
    /// Place each item in the shortest column instead of round-robin
    pub use_min: bool,
    /// Emit a transition hint on items
    pub animate: bool,
    /// Readiness poll interval in milliseconds
    pub poll_interval: Option<u64>,
    /// Resize debounce delay in milliseconds
    pub resize_delay: Option<u64>,
}

/// Accept a column count, `false`, or `null` for `maxColumns`.
#[cfg(feature = "serde")]
fn column_cap<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Cap {
        Count(usize),
        Enabled(bool),
    }

    match Option::<Cap>::deserialize(deserializer)? {
        Some(Cap::Count(count)) => Ok(Some(count)),
        Some(Cap::Enabled(false)) | None => Ok(None),
        Some(Cap::Enabled(true)) => Err(D::Error::custom(
            "maxColumns must be a column count or false",
        )),
    }
}

impl GridOptions {
    /// Start options for the given container selector.
    pub fn new(container: impl Into<String>) -> Self {
        Self {
            container: Some(container.into()),
            ..Default::default()
        }
    }

    /// Parse options from a JSON string.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the expected item count.
    pub fn with_items(mut self, items: usize) -> Self {
        self.items = Some(items);
        self
    }

    /// Mark the content as static.
    pub fn with_static(mut self, static_content: bool) -> Self {
        self.static_content = static_content;
        self
    }

    /// Set the gutter.
    pub fn with_gutter(mut self, gutter: f64) -> Self {
        self.gutter = Some(gutter);
        self
    }

    /// Cap the number of columns.
    pub fn with_max_columns(mut self, max_columns: usize) -> Self {
        self.max_columns = Some(max_columns);
        self
    }

    /// Choose shortest-column placement.
    pub fn with_use_min(mut self, use_min: bool) -> Self {
        self.use_min = use_min;
        self
    }

    /// Enable the transition hint.
    pub fn with_animate(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }

    /// Set the readiness poll interval in milliseconds.
    pub fn with_poll_interval(mut self, millis: u64) -> Self {
        self.poll_interval = Some(millis);
        self
    }

    /// Set the resize debounce delay in milliseconds.
    pub fn with_resize_delay(mut self, millis: u64) -> Self {
        self.resize_delay = Some(millis);
        self
    }

    /// Validate the options.
    ///
    /// A zero item count or column cap counts as absent.
    pub fn validate(self) -> Result<GridConfig, ConfigError> {
        let container = match self.container {
            Some(selector) if !selector.trim().is_empty() => selector,
            _ => return Err(ConfigError::MissingProperty("container")),
        };

        let completeness = if self.static_content {
            Completeness::Static
        } else {
            match self.items.and_then(NonZeroUsize::new) {
                Some(count) => Completeness::Expected(count),
                None => return Err(ConfigError::MissingProperty("items or static")),
            }
        };

        let gutter = match self.gutter {
            None => DEFAULT_GUTTER,
            Some(g) if g.is_finite() && g >= 0.0 => g,
            Some(g) => {
                return Err(ConfigError::InvalidProperty {
                    property: "gutter",
                    reason: format!("expected a non-negative length, got {}", g),
                })
            }
        };

        let poll_interval = match self.poll_interval {
            None => DEFAULT_POLL_INTERVAL,
            Some(0) => {
                return Err(ConfigError::InvalidProperty {
                    property: "pollInterval",
                    reason: "must be greater than zero".to_string(),
                })
            }
            Some(ms) => Duration::from_millis(ms),
        };

        let resize_debounce = self
            .resize_delay
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_RESIZE_DEBOUNCE);

        Ok(GridConfig {
            container,
            completeness,
            gutter,
            max_columns: self.max_columns.and_then(NonZeroUsize::new),
            selection: if self.use_min {
                ColumnSelection::Shortest
            } else {
                ColumnSelection::RoundRobin
            },
            animate: self.animate,
            timings: Timings {
                poll_interval,
                resize_debounce,
            },
        })
    }
}

/// How the engine decides that all items are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Completeness {
    /// Ready once the container holds exactly this many children
    Expected(NonZeroUsize),
    /// Always ready
    Static,
}

/// Column chosen for the next item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColumnSelection {
    /// Item `i` goes to column `i mod count`
    #[default]
    RoundRobin,
    /// Item goes to the shortest column, lowest index on ties
    Shortest,
}

/// Timer settings for the lifecycle controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub poll_interval: Duration,
    pub resize_debounce: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            resize_debounce: DEFAULT_RESIZE_DEBOUNCE,
        }
    }
}

/// Validated, immutable grid configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    container: String,
    completeness: Completeness,
    gutter: f64,
    max_columns: Option<NonZeroUsize>,
    selection: ColumnSelection,
    animate: bool,
    timings: Timings,
}

impl GridConfig {
    /// Selector of the container element.
    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn completeness(&self) -> Completeness {
        self.completeness
    }

    pub fn is_static(&self) -> bool {
        self.completeness == Completeness::Static
    }

    pub fn gutter(&self) -> f64 {
        self.gutter
    }

    pub fn max_columns(&self) -> Option<NonZeroUsize> {
        self.max_columns
    }

    pub fn selection(&self) -> ColumnSelection {
        self.selection
    }

    pub fn animate(&self) -> bool {
        self.animate
    }

    pub fn timings(&self) -> Timings {
        self.timings
    }
}

impl TryFrom<GridOptions> for GridConfig {
    type Error = ConfigError;

    fn try_from(options: GridOptions) -> Result<Self, Self::Error> {
        options.validate()
    }
}
