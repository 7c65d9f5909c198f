//! Error types for the magic-grid engine.

use thiserror::Error;

/// Top-level error type for the magic-grid engine.
#[derive(Debug, Error)]
pub enum GridError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Host(#[from] HostError),
}

/// Errors raised while validating a grid configuration.
///
/// These are the only errors that reach the caller: they abort construction
/// before any element is queried or styled.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing property '{0}' in MagicGrid config")]
    MissingProperty(&'static str),

    #[error("Invalid property '{property}' in MagicGrid config: {reason}")]
    InvalidProperty {
        property: &'static str,
        reason: String,
    },

    #[cfg(feature = "serde")]
    #[error("Invalid MagicGrid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    /// Name of the offending property, if the error refers to one.
    pub fn property(&self) -> Option<&'static str> {
        match self {
            Self::MissingProperty(property) | Self::InvalidProperty { property, .. } => {
                Some(*property)
            }
            #[cfg(feature = "serde")]
            Self::Json(_) => None,
        }
    }
}

/// Errors during a single layout pass.
///
/// The lifecycle controller handles these internally; a failed pass leaves the
/// previous styles in place.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Container '{selector}' is not present in the document")]
    ContainerMissing { selector: String },

    #[error("Container has no items to measure")]
    NoItems,
}

/// Errors reported by the host environment.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Scheduler error: {reason}")]
    Scheduler { reason: String },

    #[error("No global window available")]
    NoWindow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_error_keeps_source_message() {
        let err: GridError = ConfigError::MissingProperty("container").into();
        assert_eq!(err.to_string(), "Missing property 'container' in MagicGrid config");

        let err: GridError = HostError::NoWindow.into();
        assert!(matches!(err, GridError::Host(HostError::NoWindow)));
        assert_eq!(err.to_string(), "No global window available");
    }
}
