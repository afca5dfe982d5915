//! Emission of placed comments
//!
//! The scheduler's output is handed, in finalisation order, to an
//! [`Emitter`]. The crate ships [`AssWriter`], which renders an Advanced
//! SubStation Alpha script; tests and callers that only want the placements
//! can collect them into a `Vec<PlacedComment>`.

pub mod ass;
pub mod viewport;

pub use ass::AssWriter;
pub use viewport::{Viewport, SOURCE_PLAYER_SIZE};

use crate::{
    comment::{Anchor, Comment},
    Result,
};

/// Where an emitted comment goes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Slot {
    /// Start row assigned by the scheduler
    Row(usize),
    /// Caller-supplied coordinates of a positioned comment
    Anchor(Anchor),
}

/// One comment ready for output
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedComment {
    /// Resolved comment
    pub comment: Comment,
    /// Assigned row or coordinates
    pub slot: Slot,
    /// Seconds on screen
    pub duration: f64,
    /// Overlaid on occupied rows by the overflow policy
    pub forced: bool,
}

impl PlacedComment {
    /// Assigned start row, `None` for positioned comments
    #[must_use]
    pub const fn row(&self) -> Option<usize> {
        match self.slot {
            Slot::Row(row) => Some(row),
            Slot::Anchor(_) => None,
        }
    }

    /// Time the comment leaves the screen
    #[must_use]
    pub fn end_time(&self) -> f64 {
        self.comment.start_time + self.duration
    }
}

/// Sink for placed comments
pub trait Emitter {
    /// Called once before the first comment
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::Emit`] when the sink cannot be written.
    fn begin(&mut self) -> Result<()> {
        Ok(())
    }

    /// Called once per retained comment, in finalisation order
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::Emit`] when the sink cannot be written.
    fn emit(&mut self, placed: PlacedComment) -> Result<()>;

    /// Called once after the last comment
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::Emit`] when the sink cannot be written.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

impl Emitter for Vec<PlacedComment> {
    fn emit(&mut self, placed: PlacedComment) -> Result<()> {
        self.push(placed);
        Ok(())
    }
}
