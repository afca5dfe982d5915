//! Effective comment style and the mail command vocabulary
//!
//! A comment's style starts from what its decoder declared (motion class and
//! colour), is refined by the whitespace-separated command list attached to
//! it (its "mail"), and may finally be overwritten by active style-script
//! directives. This module holds the style value itself and the mail parser;
//! directive handling lives in [`crate::script`].
//!
//! # Example
//!
//! ```rust
//! use danmaku_core::style::{CommentStyle, MailCommands, Position, SizeClass};
//!
//! let commands = MailCommands::parse("big shita ue red");
//! let style = commands.apply(&CommentStyle::default());
//! assert_eq!(style.position, Position::Top);
//! assert_eq!(style.size, SizeClass::Big);
//! assert_eq!(style.color, 0xFF0000);
//! ```

pub mod color;
pub mod mail;

pub use color::{named_color, parse_hex_color, WHITE};
pub use mail::{CommentFlags, MailCommands, MailToken};

/// Vertical behaviour requested by the style
///
/// Reverse scrolling is not a position: it is only ever forced by a
/// style-script directive or declared by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Position {
    /// Scroll across the canvas (`naka`)
    #[default]
    Scroll,
    /// Stationary, anchored to the top (`ue`)
    Top,
    /// Stationary, anchored to the bottom (`shita`)
    Bottom,
}

impl Position {
    /// Numeric code used by comment sources (`scroll:0, top:1, bottom:2`)
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Scroll => 0,
            Self::Top => 1,
            Self::Bottom => 2,
        }
    }
}

/// Relative size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SizeClass {
    /// Two thirds of the baseline
    Small,
    /// The baseline size
    #[default]
    Medium,
    /// Thirteen ninths of the baseline
    Big,
}

impl SizeClass {
    /// Multiplier applied to the baseline font size
    #[must_use]
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Small => 2.0 / 3.0,
            Self::Medium => 1.0,
            Self::Big => 13.0 / 9.0,
        }
    }
}

/// Font alias selectable from the mail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontAlias {
    /// Whatever face the layout configuration names
    #[default]
    Default,
    /// Proportional gothic face
    Gothic,
    /// Proportional mincho face
    Mincho,
}

impl FontAlias {
    /// Concrete face for this alias, `None` for the configured default
    #[must_use]
    pub const fn face(self) -> Option<&'static str> {
        match self {
            Self::Default => None,
            Self::Gothic => Some("MS PGothic"),
            Self::Mincho => Some("MS PMincho"),
        }
    }
}

/// Effective style of a comment
///
/// Compared by value when directives decide whether a reset is needed.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentStyle {
    /// Requested position class
    pub position: Position,
    /// Relative size class
    pub size: SizeClass,
    /// RGB colour
    pub color: u32,
    /// Font alias
    pub font: FontAlias,
    /// Display duration override in seconds
    pub duration: Option<f64>,
}

impl Default for CommentStyle {
    fn default() -> Self {
        Self {
            position: Position::Scroll,
            size: SizeClass::Medium,
            color: WHITE,
            font: FontAlias::Default,
            duration: None,
        }
    }
}

impl CommentStyle {
    /// Create a style with the given position and colour, other fields default
    #[must_use]
    pub fn new(position: Position, color: u32) -> Self {
        Self {
            position,
            color,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_multipliers() {
        assert!((SizeClass::Small.multiplier() - 2.0 / 3.0).abs() < 1e-12);
        assert!((SizeClass::Medium.multiplier() - 1.0).abs() < 1e-12);
        assert!((SizeClass::Big.multiplier() - 13.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn position_codes() {
        assert_eq!(Position::Scroll.code(), 0);
        assert_eq!(Position::Top.code(), 1);
        assert_eq!(Position::Bottom.code(), 2);
    }

    #[test]
    fn default_style_is_white_scroll() {
        let style = CommentStyle::default();
        assert_eq!(style.position, Position::Scroll);
        assert_eq!(style.color, WHITE);
        assert!(style.duration.is_none());
        assert_eq!(style.font.face(), None);
    }
}
