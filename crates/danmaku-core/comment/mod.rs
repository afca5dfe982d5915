//! Comment records
//!
//! [`RawComment`] is what a decoder hands over: a timed text event with its
//! unparsed mail string and whatever motion class the wire format declared.
//! [`Comment`] is the same event after style resolution, carrying its
//! effective text, style and footprint. Only `Comment` reaches the scheduler.

pub mod footprint;

pub use footprint::Footprint;

use crate::{
    config::REFERENCE_FONT_SIZE,
    scheduler::TrackFamily,
    style::{CommentFlags, CommentStyle, Position, WHITE},
    utils::CoreError,
    Result,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Channel a comment was posted on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Channel {
    /// Ordinary viewer comments (pool 0)
    #[default]
    Viewer,
    /// Uploader or privileged comments (pool 1)
    Owner,
}

impl Channel {
    /// Numeric pool id used by comment sources
    #[must_use]
    pub const fn pool(self) -> u8 {
        match self {
            Self::Viewer => 0,
            Self::Owner => 1,
        }
    }
}

/// Visual behaviour of a comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum MotionClass {
    /// Scrolls right to left
    #[default]
    Scroll,
    /// Stationary at the top
    Top,
    /// Stationary at the bottom
    Bottom,
    /// Scrolls left to right
    Reverse,
    /// Placed at caller-supplied coordinates, never scheduled
    Positioned,
}

impl MotionClass {
    /// Row track this class competes in, `None` for positioned comments
    #[must_use]
    pub const fn track_family(self) -> Option<TrackFamily> {
        match self {
            Self::Scroll | Self::Reverse => Some(TrackFamily::Horizontal),
            Self::Top => Some(TrackFamily::Top),
            Self::Bottom => Some(TrackFamily::Bottom),
            Self::Positioned => None,
        }
    }

    /// Whether the comment moves horizontally
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Scroll | Self::Reverse)
    }

    /// Motion class implied by a style position
    #[must_use]
    pub const fn from_position(position: Position) -> Self {
        match position {
            Position::Scroll => Self::Scroll,
            Position::Top => Self::Top,
            Position::Bottom => Self::Bottom,
        }
    }

    /// Style position a decoder-declared class starts from
    #[must_use]
    pub const fn base_position(self) -> Position {
        match self {
            Self::Top => Position::Top,
            Self::Bottom => Position::Bottom,
            Self::Scroll | Self::Reverse | Self::Positioned => Position::Scroll,
        }
    }
}

/// Caller-supplied coordinates of a positioned comment
///
/// Values up to `1.0` are fractions of the source player; larger values are
/// source player pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Anchor {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Anchor {
    /// Create an anchor
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Decoded comment as delivered by a wire-format decoder
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct RawComment {
    /// Seconds from media start
    pub start_time: f64,
    /// Position in decode order
    pub arrival_index: u64,
    /// Comment text, may contain line breaks
    pub text: String,
    /// Unparsed mail command string
    pub mail: String,
    /// Requested font size in source units (25 is normal)
    pub raw_size: f64,
    /// RGB colour declared by the source
    pub color: u32,
    /// Posting channel
    pub channel: Channel,
    /// Motion class declared by the wire format
    pub motion: MotionClass,
    /// Explicit display duration in seconds
    pub duration: Option<f64>,
    /// Coordinates of a positioned comment
    pub anchor: Option<Anchor>,
}

impl Default for RawComment {
    fn default() -> Self {
        Self {
            start_time: 0.0,
            arrival_index: 0,
            text: String::new(),
            mail: String::new(),
            raw_size: REFERENCE_FONT_SIZE,
            color: WHITE,
            channel: Channel::Viewer,
            motion: MotionClass::Scroll,
            duration: None,
            anchor: None,
        }
    }
}

impl RawComment {
    /// Create a plain white scrolling viewer comment
    #[must_use]
    pub fn new(start_time: f64, arrival_index: u64, text: impl Into<String>) -> Self {
        Self {
            start_time,
            arrival_index,
            text: text.into(),
            ..Self::default()
        }
    }

    /// Set the mail command string
    #[must_use]
    pub fn with_mail(mut self, mail: impl Into<String>) -> Self {
        self.mail = mail.into();
        self
    }

    /// Set the posting channel
    #[must_use]
    pub fn with_channel(mut self, channel: Channel) -> Self {
        self.channel = channel;
        self
    }

    /// Set the declared motion class
    #[must_use]
    pub fn with_motion(mut self, motion: MotionClass) -> Self {
        self.motion = motion;
        self
    }

    /// Set the raw font size
    #[must_use]
    pub fn with_size(mut self, raw_size: f64) -> Self {
        self.raw_size = raw_size;
        self
    }

    /// Set the declared colour
    #[must_use]
    pub fn with_color(mut self, color: u32) -> Self {
        self.color = color;
        self
    }

    /// Set an explicit display duration
    #[must_use]
    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = Some(seconds);
        self
    }

    /// Make this a positioned comment at `anchor`
    #[must_use]
    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.motion = MotionClass::Positioned;
        self.anchor = Some(anchor);
        self
    }

    /// Check the record shape the core relies on
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidComment`] for a negative or non-finite
    /// start time or size, a non-positive duration, or a positioned comment
    /// without coordinates.
    pub fn validate(&self) -> Result<()> {
        let index = self.arrival_index;
        if !(self.start_time.is_finite() && self.start_time >= 0.0) {
            return Err(CoreError::invalid_comment(
                index,
                format!("start time {} is not a non-negative number", self.start_time),
            ));
        }
        if !(self.raw_size.is_finite() && self.raw_size > 0.0) {
            return Err(CoreError::invalid_comment(
                index,
                format!("font size {} is not positive", self.raw_size),
            ));
        }
        if let Some(seconds) = self.duration {
            if !(seconds.is_finite() && seconds > 0.0) {
                return Err(CoreError::invalid_comment(
                    index,
                    format!("duration {seconds} is not positive"),
                ));
            }
        }
        if self.motion == MotionClass::Positioned && self.anchor.is_none() {
            return Err(CoreError::invalid_comment(
                index,
                "positioned comment has no coordinates",
            ));
        }
        Ok(())
    }
}

/// Style-resolved comment, ready for scheduling
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    /// Seconds from media start
    pub start_time: f64,
    /// Position in decode order, the tie-break for equal start times
    pub arrival_index: u64,
    /// Effective text after substitutions
    pub text: String,
    /// Effective motion class
    pub motion: MotionClass,
    /// Requested font size in source units
    pub raw_size: f64,
    /// Font size in canvas pixels after scaling
    pub effective_size: f64,
    /// Effective style
    pub style: CommentStyle,
    /// Boolean mail flags
    pub flags: CommentFlags,
    /// Posting channel
    pub channel: Channel,
    /// Coordinates of a positioned comment
    pub anchor: Option<Anchor>,
    /// Rows and width occupied
    pub footprint: Footprint,
}

impl Comment {
    /// Create a comment directly, bypassing style resolution
    ///
    /// Uses the reference font size and a one-row-per-line footprint; adjust
    /// with [`Comment::with_footprint`] when exact geometry matters.
    #[must_use]
    pub fn new(
        start_time: f64,
        arrival_index: u64,
        text: impl Into<String>,
        motion: MotionClass,
    ) -> Self {
        let text = text.into();
        let footprint = Footprint::measure(&text, REFERENCE_FONT_SIZE, crate::config::RowUnit::Line);
        Self {
            start_time,
            arrival_index,
            text,
            motion,
            raw_size: REFERENCE_FONT_SIZE,
            effective_size: REFERENCE_FONT_SIZE,
            style: CommentStyle::new(motion.base_position(), WHITE),
            flags: CommentFlags::empty(),
            channel: Channel::Viewer,
            anchor: None,
            footprint,
        }
    }

    /// Replace the footprint
    #[must_use]
    pub fn with_footprint(mut self, footprint: Footprint) -> Self {
        self.footprint = footprint;
        self
    }

    /// Set a display duration override
    #[must_use]
    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.style.duration = Some(seconds);
        self
    }

    /// Set the posting channel
    #[must_use]
    pub fn with_channel(mut self, channel: Channel) -> Self {
        self.channel = channel;
        self
    }

    /// Effective alpha from the mail flags
    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.flags.alpha()
    }

    /// Seconds on screen: the override if any, else the class default
    #[must_use]
    pub fn display_duration(&self, marquee: f64, still: f64) -> f64 {
        self.style.duration.unwrap_or(if self.motion.is_horizontal() {
            marquee
        } else {
            still
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_comment_validation() {
        assert!(RawComment::new(1.0, 0, "ok").validate().is_ok());
        assert!(RawComment::new(-1.0, 0, "x").validate().is_err());
        assert!(RawComment::new(f64::NAN, 0, "x").validate().is_err());
        assert!(RawComment::new(1.0, 0, "x").with_size(0.0).validate().is_err());
        assert!(RawComment::new(1.0, 0, "x")
            .with_duration(-2.0)
            .validate()
            .is_err());
        assert!(RawComment::new(1.0, 0, "x")
            .with_motion(MotionClass::Positioned)
            .validate()
            .is_err());
        assert!(RawComment::new(1.0, 0, "x")
            .with_anchor(Anchor::new(0.5, 0.5))
            .validate()
            .is_ok());
    }

    #[test]
    fn track_families() {
        assert_eq!(
            MotionClass::Scroll.track_family(),
            MotionClass::Reverse.track_family()
        );
        assert_eq!(MotionClass::Top.track_family(), Some(TrackFamily::Top));
        assert_eq!(MotionClass::Positioned.track_family(), None);
    }

    #[test]
    fn display_duration_prefers_override() {
        let scroll = Comment::new(0.0, 0, "a", MotionClass::Scroll);
        assert!((scroll.display_duration(5.0, 3.0) - 5.0).abs() < f64::EPSILON);
        let top = Comment::new(0.0, 0, "a", MotionClass::Top);
        assert!((top.display_duration(5.0, 3.0) - 3.0).abs() < f64::EPSILON);
        let long = top.with_duration(9.0);
        assert!((long.display_duration(5.0, 3.0) - 9.0).abs() < f64::EPSILON);
    }

    #[test]
    fn direct_comment_footprint_counts_lines() {
        let comment = Comment::new(0.0, 0, "one\ntwo\nthree", MotionClass::Top);
        assert_eq!(comment.footprint.height_rows, 3);
        assert_eq!(comment.style.position, Position::Top);
    }
}
