//! End-to-end conversion
//!
//! [`Converter`] ties the stages together: raw records are checked, put in
//! start-time order, resolved against the shared directive log, optionally
//! filtered, placed by the scheduler and handed to an [`Emitter`].

use crate::{
    comment::{MotionClass, RawComment},
    config::LayoutConfig,
    emit::{AssWriter, Emitter, PlacedComment, Slot},
    scheduler::{Placement, Scheduler, SchedulerOptions},
    script::{DirectiveLog, Resolution, StyleResolver},
    Result,
};

#[cfg(feature = "filter")]
use regex::Regex;

/// Counters for one conversion run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ConversionStats {
    /// Placed on free rows
    pub placed: usize,
    /// Forced over occupied rows
    pub forced: usize,
    /// Dropped for lack of rows in reduced mode
    pub dropped: usize,
    /// Positioned comments passed straight through
    pub positioned: usize,
    /// Directive comments absorbed into the log
    pub directives: usize,
    /// Invisible comments and unknown directives
    pub hidden: usize,
    /// Removed by the text filter
    pub filtered: usize,
    /// Records that failed validation
    pub rejected: usize,
}

impl ConversionStats {
    /// Comments handed to the emitter
    #[must_use]
    pub const fn emitted(&self) -> usize {
        self.placed + self.forced + self.positioned
    }
}

/// Converts raw comment records into placed output
#[derive(Debug, Clone)]
pub struct Converter {
    config: LayoutConfig,
    #[cfg(feature = "filter")]
    filter: Option<Regex>,
}

impl Converter {
    /// Create a converter for a validated layout
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::Config`] if `config` fails validation.
    pub fn new(config: LayoutConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            #[cfg(feature = "filter")]
            filter: None,
        })
    }

    /// Drop comments whose effective text matches `pattern`
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::Filter`] if the pattern does not compile.
    #[cfg(feature = "filter")]
    pub fn with_filter(mut self, pattern: &str) -> Result<Self> {
        self.filter = Some(Regex::new(pattern)?);
        Ok(self)
    }

    /// Layout this converter uses
    #[must_use]
    pub const fn config(&self) -> &LayoutConfig {
        &self.config
    }

    #[cfg(feature = "filter")]
    fn is_filtered(&self, text: &str) -> bool {
        self.filter.as_ref().is_some_and(|re| re.is_match(text))
    }

    #[cfg(not(feature = "filter"))]
    #[allow(clippy::unused_self)]
    fn is_filtered(&self, _text: &str) -> bool {
        false
    }

    /// Run every stage and feed the results to `emitter`
    ///
    /// Invalid records are logged and skipped; they never abort the run.
    ///
    /// # Errors
    ///
    /// Returns whatever error `emitter` reports.
    pub fn convert<E: Emitter>(
        &self,
        comments: &[RawComment],
        emitter: &mut E,
    ) -> Result<ConversionStats> {
        let mut stats = ConversionStats::default();

        let mut ordered: Vec<&RawComment> = Vec::with_capacity(comments.len());
        for raw in comments {
            match raw.validate() {
                Ok(()) => ordered.push(raw),
                Err(err) => {
                    tracing::warn!(%err, "skipping comment record");
                    stats.rejected += 1;
                }
            }
        }
        ordered.sort_by(|a, b| {
            a.start_time
                .total_cmp(&b.start_time)
                .then(a.arrival_index.cmp(&b.arrival_index))
        });

        let resolver = StyleResolver::new(&self.config);
        let mut log = DirectiveLog::new();
        let mut scheduler = Scheduler::new(SchedulerOptions::from(&self.config));

        emitter.begin()?;
        for raw in ordered {
            let comment = match resolver.resolve(raw, &mut log) {
                Resolution::Display(comment) => comment,
                Resolution::Directive => {
                    stats.directives += 1;
                    continue;
                }
                Resolution::Hidden(reason) => {
                    tracing::trace!(index = raw.arrival_index, ?reason, "comment hidden");
                    stats.hidden += 1;
                    continue;
                }
            };

            if self.is_filtered(&comment.text) {
                stats.filtered += 1;
                continue;
            }

            let placement = scheduler.place(&comment);
            let slot = match placement {
                Placement::Placed(row) => {
                    stats.placed += 1;
                    Slot::Row(row)
                }
                Placement::Forced(row) => {
                    stats.forced += 1;
                    Slot::Row(row)
                }
                Placement::Dropped => {
                    stats.dropped += 1;
                    continue;
                }
                Placement::Positioned => match comment.anchor {
                    Some(anchor) if comment.motion == MotionClass::Positioned => {
                        stats.positioned += 1;
                        Slot::Anchor(anchor)
                    }
                    _ => {
                        stats.rejected += 1;
                        continue;
                    }
                },
            };

            let duration = comment
                .display_duration(self.config.marquee_duration, self.config.still_duration);
            emitter.emit(PlacedComment {
                comment,
                slot,
                duration,
                forced: matches!(placement, Placement::Forced(_)),
            })?;
        }
        emitter.finish()?;

        tracing::info!(
            emitted = stats.emitted(),
            forced = stats.forced,
            dropped = stats.dropped,
            directives = stats.directives,
            hidden = stats.hidden,
            filtered = stats.filtered,
            rejected = stats.rejected,
            "conversion finished"
        );
        Ok(stats)
    }

    /// Convert straight to an ASS script
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::Emit`] if the script cannot be written.
    pub fn to_ass(&self, comments: &[RawComment]) -> Result<(String, ConversionStats)> {
        let mut writer = AssWriter::new(&self.config);
        let stats = self.convert(comments, &mut writer)?;
        Ok((writer.into_inner(), stats))
    }
}
