//! Spatial footprint of a comment
//!
//! The scheduler never looks at glyphs. It needs two proxies: how many
//! contiguous rows a comment covers and how wide it is, the latter measured
//! as the longest line's character count times the effective font size.

use crate::config::RowUnit;

/// Rows and width a comment occupies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    /// Number of text lines (`count('\n') + 1`)
    pub line_count: usize,
    /// Contiguous rows required, never less than one
    pub height_rows: usize,
    /// Width proxy in pixels, used by horizontal tracks only
    pub measured_width: f64,
}

impl Footprint {
    /// Create a footprint from explicit row height and width
    ///
    /// `height_rows` is clamped to at least one row.
    #[must_use]
    pub fn new(height_rows: usize, measured_width: f64) -> Self {
        let height_rows = height_rows.max(1);
        Self {
            line_count: height_rows,
            height_rows,
            measured_width,
        }
    }

    /// Measure `text` rendered at `effective_size`
    ///
    /// # Example
    ///
    /// ```rust
    /// use danmaku_core::comment::Footprint;
    /// use danmaku_core::config::RowUnit;
    ///
    /// let footprint = Footprint::measure("hello\nworld!!", 25.0, RowUnit::Pixel);
    /// assert_eq!(footprint.line_count, 2);
    /// assert_eq!(footprint.height_rows, 50);
    /// assert_eq!(footprint.measured_width, 175.0);
    ///
    /// let footprint = Footprint::measure("hello\nworld!!", 25.0, RowUnit::Line);
    /// assert_eq!(footprint.height_rows, 2);
    /// ```
    #[must_use]
    pub fn measure(text: &str, effective_size: f64, unit: RowUnit) -> Self {
        let mut line_count = 0;
        let mut longest = 0;
        for line in text.split('\n') {
            line_count += 1;
            longest = longest.max(line.trim_end_matches('\r').chars().count());
        }

        let height_rows = match unit {
            RowUnit::Pixel => (line_count as f64 * effective_size).ceil() as usize,
            RowUnit::Line => line_count,
        };

        Self {
            line_count,
            height_rows: height_rows.max(1),
            measured_width: longest as f64 * effective_size,
        }
    }
}
