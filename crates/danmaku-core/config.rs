//! Layout configuration resolved before any scheduling begins
//!
//! `LayoutConfig` carries the canvas geometry, baseline font, display
//! durations and overflow policy shared by the resolver, the scheduler and
//! the emitter. It is validated once up front; nothing downstream re-checks
//! these values.
//!
//! # Example
//!
//! ```rust
//! use danmaku_core::config::{LayoutConfig, RowUnit};
//!
//! let config = LayoutConfig::new(1280, 720)
//!     .with_reserve_blank(40)
//!     .with_reduced(true);
//! config.validate()?;
//! assert_eq!(config.canvas_rows(), 680);
//!
//! let lines = config.clone().with_row_unit(RowUnit::Line).with_reserve_blank(1);
//! assert_eq!(lines.canvas_rows(), 27); // floor(720 / 25) - 1
//! # Ok::<(), danmaku_core::CoreError>(())
//! ```

use crate::{utils::CoreError, Result};
use core::{fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Font size comment sources treat as "normal"
///
/// Raw sizes are authored against this baseline and rescaled to the
/// configured `font_size`.
pub const REFERENCE_FONT_SIZE: f64 = 25.0;

/// Granularity of one scheduler row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum RowUnit {
    /// One row per pixel line; a comment spans `ceil(lines * size)` rows
    #[default]
    Pixel,
    /// One row per baseline text line; a comment spans `lines` rows
    Line,
}

impl FromStr for RowUnit {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pixel" | "px" => Ok(Self::Pixel),
            "line" => Ok(Self::Line),
            other => Err(CoreError::config(format!("unknown row unit '{other}'"))),
        }
    }
}

impl fmt::Display for RowUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pixel => f.write_str("pixel"),
            Self::Line => f.write_str("line"),
        }
    }
}

/// Whether viewer and owner channels compete for the same rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum PoolPolicy {
    /// One row space per motion class, shared by every channel
    #[default]
    Shared,
    /// A separate row space per motion class and channel
    Independent,
}

/// Canvas geometry, timing and overflow settings for one conversion run
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct LayoutConfig {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Rows at the bottom of the canvas that are never allocated
    pub reserve_blank: u32,
    /// Font face written into the subtitle style
    pub font_face: String,
    /// Baseline font size in pixels
    pub font_size: f64,
    /// Global text opacity in `[0, 1]`
    pub alpha: f64,
    /// Seconds a scrolling comment takes to cross the canvas
    pub marquee_duration: f64,
    /// Seconds a stationary comment stays on screen
    pub still_duration: f64,
    /// Drop overflowing comments instead of forcing an overlap
    pub reduced: bool,
    /// Granularity of scheduler rows
    pub row_unit: RowUnit,
    /// Channel pool policy for row tracks
    pub pool_policy: PoolPolicy,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            reserve_blank: 0,
            font_face: "sans-serif".to_string(),
            font_size: REFERENCE_FONT_SIZE,
            alpha: 1.0,
            marquee_duration: 5.0,
            still_duration: 5.0,
            reduced: false,
            row_unit: RowUnit::Pixel,
            pool_policy: PoolPolicy::Shared,
        }
    }
}

impl LayoutConfig {
    /// Create default configuration for a canvas of the given size
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Set the number of reserved bottom rows
    #[must_use]
    pub fn with_reserve_blank(mut self, reserve_blank: u32) -> Self {
        self.reserve_blank = reserve_blank;
        self
    }

    /// Set font face and baseline size
    #[must_use]
    pub fn with_font(mut self, face: impl Into<String>, size: f64) -> Self {
        self.font_face = face.into();
        self.font_size = size;
        self
    }

    /// Set global text opacity
    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set scrolling and stationary display durations
    #[must_use]
    pub fn with_durations(mut self, marquee: f64, still: f64) -> Self {
        self.marquee_duration = marquee;
        self.still_duration = still;
        self
    }

    /// Enable or disable reduced mode
    #[must_use]
    pub fn with_reduced(mut self, reduced: bool) -> Self {
        self.reduced = reduced;
        self
    }

    /// Set row granularity
    #[must_use]
    pub fn with_row_unit(mut self, row_unit: RowUnit) -> Self {
        self.row_unit = row_unit;
        self
    }

    /// Set channel pool policy
    #[must_use]
    pub fn with_pool_policy(mut self, pool_policy: PoolPolicy) -> Self {
        self.pool_policy = pool_policy;
        self
    }

    /// Validate all settings
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Config`] for a zero-sized canvas, non-positive or
    /// non-finite font size or durations, alpha outside `[0, 1]`, or a
    /// reserve that leaves no allocatable row.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CoreError::config(format!(
                "canvas must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(CoreError::config(format!(
                "font size must be positive, got {}",
                self.font_size
            )));
        }
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(CoreError::config(format!(
                "alpha must be within [0, 1], got {}",
                self.alpha
            )));
        }
        for (name, value) in [
            ("marquee duration", self.marquee_duration),
            ("still duration", self.still_duration),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(CoreError::config(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if self.canvas_rows() == 0 {
            return Err(CoreError::config(format!(
                "reserve of {} {} rows leaves no room on a {}px canvas",
                self.reserve_blank, self.row_unit, self.height
            )));
        }
        Ok(())
    }

    /// Pixels covered by one scheduler row
    #[must_use]
    pub fn row_pitch(&self) -> f64 {
        match self.row_unit {
            RowUnit::Pixel => 1.0,
            RowUnit::Line => self.font_size,
        }
    }

    /// Number of allocatable rows: `floor(display_height) - reserve_blank`
    #[must_use]
    pub fn canvas_rows(&self) -> usize {
        let display_height = match self.row_unit {
            RowUnit::Pixel => f64::from(self.height),
            RowUnit::Line => f64::from(self.height) / self.font_size,
        };
        if !display_height.is_finite() {
            return 0;
        }
        (display_height.floor() as usize).saturating_sub(self.reserve_blank as usize)
    }

    /// Factor converting source-relative sizes to canvas pixels
    #[must_use]
    pub fn size_scale(&self) -> f64 {
        self.font_size / REFERENCE_FONT_SIZE
    }
}
