//! Row-allocation scheduler
//!
//! Assigns every style-resolved comment to a contiguous range of display rows
//! in a single forward pass. Each `(track family, pool)` pair owns an
//! independent [`Track`]; a comment scans its track from row 0 upward for a
//! free run tall enough to hold it. When none exists the overflow policy
//! either drops the comment (reduced mode) or forces it over the rows whose
//! occupant is oldest.
//!
//! Comments must be fed in non-decreasing start time, ties in arrival order.
//! The scheduler keeps no clock of its own and uses no randomness, so a fixed
//! input always yields the same placements.
//!
//! # Example
//!
//! ```rust
//! use danmaku_core::comment::{Comment, MotionClass};
//! use danmaku_core::scheduler::{Placement, Scheduler, SchedulerOptions};
//!
//! let options = SchedulerOptions {
//!     canvas_rows: 1,
//!     reduced: true,
//!     ..SchedulerOptions::default()
//! };
//! let mut scheduler = Scheduler::new(options);
//!
//! let first = Comment::new(0.0, 0, "first", MotionClass::Top);
//! let second = Comment::new(1.0, 1, "second", MotionClass::Top);
//! assert_eq!(scheduler.place(&first), Placement::Placed(0));
//! assert_eq!(scheduler.place(&second), Placement::Dropped);
//! ```

pub mod track;

pub use track::{Occupant, Probe, Track, TrackFamily};

use crate::{
    comment::Comment,
    config::{LayoutConfig, PoolPolicy},
    utils::{create_hash_map, FastMap},
};

/// Key of one independent row space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackKey {
    /// Occupancy rule family
    pub family: TrackFamily,
    /// Channel pool, always 0 under [`PoolPolicy::Shared`]
    pub pool: u8,
}

/// Outcome of placing one comment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Claimed a free run starting at this row
    Placed(usize),
    /// No free run; overlaid onto the rows starting here
    Forced(usize),
    /// No free run in reduced mode; not emitted
    Dropped,
    /// Positioned comment, bypassed the tracks
    Positioned,
}

impl Placement {
    /// Start row, if the comment occupies rows
    #[must_use]
    pub const fn row(self) -> Option<usize> {
        match self {
            Self::Placed(row) | Self::Forced(row) => Some(row),
            Self::Dropped | Self::Positioned => None,
        }
    }

    /// Whether the comment reaches the emitter
    #[must_use]
    pub const fn is_emitted(self) -> bool {
        !matches!(self, Self::Dropped)
    }
}

/// Settings the scheduler reads from the layout configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchedulerOptions {
    /// Canvas width crossed by horizontal comments
    pub canvas_width: f64,
    /// Allocatable rows per track
    pub canvas_rows: usize,
    /// Default horizontal display duration
    pub marquee_duration: f64,
    /// Default stationary display duration
    pub still_duration: f64,
    /// Drop instead of force on overflow
    pub reduced: bool,
    /// Whether channels share row spaces
    pub pool_policy: PoolPolicy,
}

impl Default for SchedulerOptions {
    fn default() -> Self {
        Self::from(&LayoutConfig::default())
    }
}

impl From<&LayoutConfig> for SchedulerOptions {
    fn from(config: &LayoutConfig) -> Self {
        Self {
            canvas_width: f64::from(config.width),
            canvas_rows: config.canvas_rows(),
            marquee_duration: config.marquee_duration,
            still_duration: config.still_duration,
            reduced: config.reduced,
            pool_policy: config.pool_policy,
        }
    }
}

/// Sequential row allocator over all tracks
#[derive(Debug, Clone)]
pub struct Scheduler {
    options: SchedulerOptions,
    tracks: FastMap<TrackKey, Track>,
}

impl Scheduler {
    /// Create a scheduler with empty tracks
    #[must_use]
    pub fn new(options: SchedulerOptions) -> Self {
        Self {
            options,
            tracks: create_hash_map(),
        }
    }

    /// Options this scheduler was built with
    #[must_use]
    pub const fn options(&self) -> &SchedulerOptions {
        &self.options
    }

    /// Track for `key`, if any comment has been placed on it
    #[must_use]
    pub fn track(&self, key: TrackKey) -> Option<&Track> {
        self.tracks.get(&key)
    }

    /// Key of the track `comment` competes in
    #[must_use]
    pub fn track_key(&self, comment: &Comment) -> Option<TrackKey> {
        let family = comment.motion.track_family()?;
        let pool = match self.options.pool_policy {
            PoolPolicy::Shared => 0,
            PoolPolicy::Independent => comment.channel.pool(),
        };
        Some(TrackKey { family, pool })
    }

    /// Place one comment
    ///
    /// Must be called in non-decreasing start time order.
    pub fn place(&mut self, comment: &Comment) -> Placement {
        let Some(key) = self.track_key(comment) else {
            return Placement::Positioned;
        };

        let options = self.options;
        let duration = comment.display_duration(options.marquee_duration, options.still_duration);
        let height = comment.footprint.height_rows;
        let probe = Probe {
            start_time: comment.start_time,
            duration,
            width: comment.footprint.measured_width,
            canvas_width: options.canvas_width,
        };
        let occupant = Occupant {
            start_time: comment.start_time,
            duration,
            width: comment.footprint.measured_width,
            arrival_index: comment.arrival_index,
        };

        let track = self
            .tracks
            .entry(key)
            .or_insert_with(|| Track::new(key.family, options.canvas_rows));

        if let Some(row) = track.find_run(height, &probe) {
            track.claim(row, height, occupant);
            return Placement::Placed(row);
        }

        if options.reduced {
            tracing::debug!(
                index = comment.arrival_index,
                start = comment.start_time,
                family = ?key.family,
                "no free rows, dropping comment"
            );
            return Placement::Dropped;
        }

        let row = track.oldest_start_row(height);
        tracing::debug!(
            index = comment.arrival_index,
            start = comment.start_time,
            family = ?key.family,
            row,
            "no free rows, forcing comment over oldest occupant"
        );
        track.claim(row, height, occupant);
        Placement::Forced(row)
    }
}
