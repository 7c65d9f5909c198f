//! Value types shared between the layout, the engine, and host bindings.

use std::fmt;

/// Transition hint applied to items when animation is enabled.
pub const TRANSITION_HINT: &str = "top,left 0.2s ease";

/// Measured size of an element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// CSS positioning scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PositionMode {
    Relative,
    Absolute,
}

impl PositionMode {
    pub fn as_css(&self) -> &'static str {
        match self {
            Self::Relative => "relative",
            Self::Absolute => "absolute",
        }
    }
}

/// A single style directive written to the style sink.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Style {
    Position(PositionMode),
    /// Horizontal offset in pixels
    Left(f64),
    /// Vertical offset in pixels
    Top(f64),
    /// Container height in pixels
    Height(f64),
    Transition(String),
}

impl Style {
    /// CSS property name.
    pub fn property(&self) -> &'static str {
        match self {
            Self::Position(_) => "position",
            Self::Left(_) => "left",
            Self::Top(_) => "top",
            Self::Height(_) => "height",
            Self::Transition(_) => "transition",
        }
    }

    /// CSS value, lengths with a `px` suffix.
    pub fn value(&self) -> String {
        match self {
            Self::Position(mode) => mode.as_css().to_string(),
            Self::Left(px) | Self::Top(px) | Self::Height(px) => format!("{}px", px),
            Self::Transition(hint) => hint.clone(),
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.property(), self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_css() {
        assert_eq!(Style::Left(325.0).value(), "325px");
        assert_eq!(Style::Top(12.5).value(), "12.5px");
        assert_eq!(Style::Height(0.0).to_string(), "height: 0px");
        assert_eq!(
            Style::Position(PositionMode::Absolute).to_string(),
            "position: absolute"
        );
        assert_eq!(
            Style::Transition(TRANSITION_HINT.to_string()).to_string(),
            "transition: top,left 0.2s ease"
        );
    }
}
