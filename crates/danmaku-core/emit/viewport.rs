//! Mapping of source player coordinates onto the canvas
//!
//! Positioned comments are authored against a fixed player size. The canvas
//! may have a different aspect ratio, so the player is scaled to fit and
//! centred, letterboxed on whichever axis has room to spare.

use crate::comment::Anchor;

/// Player size positioned comments are authored against
pub const SOURCE_PLAYER_SIZE: (f64, f64) = (891.0, 589.0);

/// Scale and offsets fitting the source player into the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Source player width
    pub source_width: f64,
    /// Source player height
    pub source_height: f64,
    /// Uniform scale factor
    pub scale: f64,
    /// Horizontal letterbox offset
    pub offset_x: f64,
    /// Vertical letterbox offset
    pub offset_y: f64,
}

impl Viewport {
    /// Fit a `source` sized player into a `target` sized canvas
    ///
    /// Degenerate sizes produce the identity mapping.
    #[must_use]
    pub fn fit(source: (f64, f64), target: (f64, f64)) -> Self {
        let (source_width, source_height) = source;
        let (target_width, target_height) = target;
        let identity = Self {
            source_width,
            source_height,
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        };
        if source_width <= 0.0 || source_height <= 0.0 || target_height <= 0.0 {
            return identity;
        }

        let source_aspect = source_width / source_height;
        let target_aspect = target_width / target_height;
        if target_aspect < source_aspect {
            let scale = target_width / source_width;
            Self {
                scale,
                offset_y: (target_height - target_width / source_aspect) / 2.0,
                ..identity
            }
        } else if target_aspect > source_aspect {
            let scale = target_height / source_height;
            Self {
                scale,
                offset_x: (target_width - target_height * source_aspect) / 2.0,
                ..identity
            }
        } else {
            Self {
                scale: target_width / source_width,
                ..identity
            }
        }
    }

    /// Fit the standard source player into a canvas
    #[must_use]
    pub fn for_canvas(width: u32, height: u32) -> Self {
        Self::fit(SOURCE_PLAYER_SIZE, (f64::from(width), f64::from(height)))
    }

    /// Map a horizontal coordinate; values up to 1 are fractions of the player
    #[must_use]
    pub fn map_x(&self, x: f64) -> f64 {
        Self::map_axis(x, self.source_width, self.scale, self.offset_x)
    }

    /// Map a vertical coordinate; values up to 1 are fractions of the player
    #[must_use]
    pub fn map_y(&self, y: f64) -> f64 {
        Self::map_axis(y, self.source_height, self.scale, self.offset_y)
    }

    /// Map an anchor to canvas pixels
    #[must_use]
    pub fn map(&self, anchor: Anchor) -> (f64, f64) {
        (self.map_x(anchor.x), self.map_y(anchor.y))
    }

    fn map_axis(value: f64, extent: f64, scale: f64, offset: f64) -> f64 {
        if value > 1.0 {
            scale * value + offset
        } else {
            extent * scale * value + offset
        }
    }
}
