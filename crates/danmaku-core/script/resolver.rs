//! Style resolution
//!
//! Turns a [`RawComment`] into either a displayable [`Comment`], a new
//! directive, or nothing. The mail refines the decoder-declared style, then
//! every directive active at the comment's start time is applied in the order
//! it was declared.

use super::{
    directive::{Directive, DirectiveKind, Window},
    invocation::Invocation,
    DirectiveLog, DEFAULT_DIRECTIVE_DURATION,
};
use crate::{
    comment::{Channel, Comment, Footprint, MotionClass, RawComment},
    config::{LayoutConfig, RowUnit},
    style::{CommentFlags, CommentStyle, MailCommands},
};

/// Why a comment produced no output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HiddenReason {
    /// Mail carried the `invisible` flag
    Invisible,
    /// Directive marker followed by a name no directive answers to
    UnknownDirective,
}

/// Outcome of resolving one raw comment
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Ready for the scheduler
    Display(Comment),
    /// Declared a directive; nothing to display
    Directive,
    /// Not displayed
    Hidden(HiddenReason),
}

/// Resolves effective text, style and footprint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleResolver {
    size_scale: f64,
    row_unit: RowUnit,
}

impl StyleResolver {
    /// Create a resolver for the given layout
    #[must_use]
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            size_scale: config.size_scale(),
            row_unit: config.row_unit,
        }
    }

    /// Resolve `raw` against the directives declared so far
    ///
    /// Directive invocations on the owner channel are appended to `log`.
    pub fn resolve(&self, raw: &RawComment, log: &mut DirectiveLog) -> Resolution {
        let commands = MailCommands::parse(&raw.mail);
        let mut base = CommentStyle::new(raw.motion.base_position(), raw.color);
        base.duration = raw.duration;
        let mut style = commands.apply(&base);

        if raw.channel == Channel::Owner {
            if let Some(invocation) = Invocation::parse(&raw.text) {
                return Self::declare(raw, &invocation, style, log);
            }
        }

        if commands.flags.contains(CommentFlags::INVISIBLE) {
            return Resolution::Hidden(HiddenReason::Invisible);
        }

        let mut text = raw.text.clone();
        let mut reversed = false;
        for directive in log.active_at(raw.start_time) {
            match &directive.kind {
                DirectiveKind::ResetDefault => {
                    if style != directive.style {
                        style = directive.style.clone();
                    }
                }
                DirectiveKind::Substitute(rule) => {
                    if !rule.target.admits(raw.channel) {
                        continue;
                    }
                    if let Some(rewritten) = rule.rewrite(&text) {
                        text = rewritten;
                        if style != directive.style {
                            style = directive.style.clone();
                        }
                    }
                }
                DirectiveKind::ReverseDirection(target) => {
                    if target.admits(raw.channel) {
                        reversed = true;
                    }
                }
            }
        }

        let motion = match raw.motion {
            MotionClass::Positioned => MotionClass::Positioned,
            _ if reversed => MotionClass::Reverse,
            MotionClass::Reverse if style.position == base.position => MotionClass::Reverse,
            _ => MotionClass::from_position(style.position),
        };

        let effective_size = raw.raw_size * self.size_scale * style.size.multiplier();
        let footprint = Footprint::measure(&text, effective_size, self.row_unit);

        Resolution::Display(Comment {
            start_time: raw.start_time,
            arrival_index: raw.arrival_index,
            text,
            motion,
            raw_size: raw.raw_size,
            effective_size,
            style,
            flags: commands.flags,
            channel: raw.channel,
            anchor: raw.anchor,
            footprint,
        })
    }

    fn declare(
        raw: &RawComment,
        invocation: &Invocation<'_>,
        mut style: CommentStyle,
        log: &mut DirectiveLog,
    ) -> Resolution {
        let Some(kind) = invocation.bind() else {
            tracing::warn!(
                index = raw.arrival_index,
                directive = invocation.name,
                "unknown directive, comment hidden"
            );
            return Resolution::Hidden(HiddenReason::UnknownDirective);
        };

        // the mail duration sizes the window; it is not part of the baseline
        let duration = style.duration.take().unwrap_or(DEFAULT_DIRECTIVE_DURATION);
        let window = Window::starting_at(raw.start_time, duration);
        tracing::debug!(
            index = raw.arrival_index,
            kind = kind.label(),
            start = window.start,
            end = window.end,
            "directive declared"
        );
        log.push(Directive {
            kind,
            window,
            style,
            declared_at: raw.arrival_index,
        });
        Resolution::Directive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Position, SizeClass};

    fn resolver() -> StyleResolver {
        StyleResolver::new(&LayoutConfig::default())
    }

    fn display(resolution: Resolution) -> Comment {
        match resolution {
            Resolution::Display(comment) => comment,
            other => panic!("expected a displayable comment, got {other:?}"),
        }
    }

    fn owner(start: f64, index: u64, text: &str) -> RawComment {
        RawComment::new(start, index, text).with_channel(Channel::Owner)
    }

    #[test]
    fn mail_drives_motion_and_size() {
        let mut log = DirectiveLog::new();
        let raw = RawComment::new(0.0, 0, "hi").with_mail("big shita ue");
        let comment = display(resolver().resolve(&raw, &mut log));
        assert_eq!(comment.motion, MotionClass::Top);
        assert_eq!(comment.style.size, SizeClass::Big);
        assert!((comment.effective_size - 25.0 * 13.0 / 9.0).abs() < 1e-9);
    }

    #[test]
    fn invisible_is_hidden() {
        let mut log = DirectiveLog::new();
        let raw = RawComment::new(0.0, 0, "hi").with_mail("invisible");
        assert_eq!(
            resolver().resolve(&raw, &mut log),
            Resolution::Hidden(HiddenReason::Invisible)
        );
    }

    #[test]
    fn viewer_markers_are_plain_text() {
        let mut log = DirectiveLog::new();
        let raw = RawComment::new(0.0, 0, "@置換 a b");
        let comment = display(resolver().resolve(&raw, &mut log));
        assert_eq!(comment.text, "@置換 a b");
        assert!(log.is_empty());
    }

    #[test]
    fn unknown_directive_is_hidden_and_empty_name_is_text() {
        let mut log = DirectiveLog::new();
        assert_eq!(
            resolver().resolve(&owner(0.0, 0, "@ボタン"), &mut log),
            Resolution::Hidden(HiddenReason::UnknownDirective)
        );
        let comment = display(resolver().resolve(&owner(0.0, 1, "@ hello"), &mut log));
        assert_eq!(comment.text, "@ hello");
        assert!(log.is_empty());
    }

    #[test]
    fn directive_window_uses_mail_duration() {
        let mut log = DirectiveLog::new();
        let raw = owner(5.0, 0, "@逆").with_mail("@10");
        assert_eq!(resolver().resolve(&raw, &mut log), Resolution::Directive);
        let window = log.iter().next().map(|d| d.window);
        assert_eq!(window, Some(Window::starting_at(5.0, 10.0)));

        let inside = display(resolver().resolve(&RawComment::new(14.0, 1, "x"), &mut log));
        assert_eq!(inside.motion, MotionClass::Reverse);
        let outside = display(resolver().resolve(&RawComment::new(15.0, 2, "x"), &mut log));
        assert_eq!(outside.motion, MotionClass::Scroll);
    }

    #[test]
    fn reset_default_restores_captured_style() {
        let mut log = DirectiveLog::new();
        let r = resolver();
        assert_eq!(
            r.resolve(&owner(0.0, 0, "@デフォルト").with_mail("ue red"), &mut log),
            Resolution::Directive
        );
        let comment = display(r.resolve(
            &RawComment::new(1.0, 1, "x").with_mail("shita blue small"),
            &mut log,
        ));
        assert_eq!(comment.motion, MotionClass::Top);
        assert_eq!(comment.style.color, 0xFF0000);
        assert_eq!(comment.style.size, SizeClass::Medium);
    }

    #[test]
    fn directive_duration_stays_out_of_restyled_comments() {
        let mut log = DirectiveLog::new();
        let r = resolver();
        r.resolve(&owner(0.0, 0, "@デフォルト").with_mail("@60 red"), &mut log);
        let reset = display(r.resolve(&RawComment::new(1.0, 1, "viewer"), &mut log));
        assert_eq!(reset.style.color, 0xFF0000);
        assert_eq!(reset.style.duration, None);
        assert!((reset.display_duration(5.0, 5.0) - 5.0).abs() < f64::EPSILON);

        let mut log = DirectiveLog::new();
        r.resolve(&owner(0.0, 0, "@置換 a b").with_mail("@45"), &mut log);
        assert_eq!(log.iter().next().map(|d| d.window.end), Some(45.0));
        let rewritten = display(r.resolve(&RawComment::new(1.0, 1, "a"), &mut log));
        assert_eq!(rewritten.text, "b");
        assert_eq!(rewritten.style.duration, None);
        assert!((rewritten.display_duration(5.0, 5.0) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn substitute_respects_target_and_restyles() {
        let mut log = DirectiveLog::new();
        let r = resolver();
        r.resolve(&owner(0.0, 0, "@置換 w 笑 単 コメ").with_mail("ue"), &mut log);

        let viewer = display(r.resolve(&RawComment::new(1.0, 1, "ww"), &mut log));
        assert_eq!(viewer.text, "笑w");
        assert_eq!(viewer.style.position, Position::Top);

        let owned = display(r.resolve(&owner(1.0, 2, "ww"), &mut log));
        assert_eq!(owned.text, "ww");
        assert_eq!(owned.style.position, Position::Scroll);

        let unmatched = display(r.resolve(&RawComment::new(1.0, 3, "abc"), &mut log));
        assert_eq!(unmatched.motion, MotionClass::Scroll);
    }

    #[test]
    fn directives_apply_cumulatively_in_order() {
        let mut log = DirectiveLog::new();
        let r = resolver();
        r.resolve(&owner(0.0, 0, "@置換 a b"), &mut log);
        r.resolve(&owner(0.0, 1, "@置換 b c"), &mut log);
        let comment = display(r.resolve(&RawComment::new(0.5, 2, "a"), &mut log));
        assert_eq!(comment.text, "c");
    }

    #[test]
    fn footprint_uses_scaled_size() {
        let config = LayoutConfig::default().with_font("sans-serif", 50.0);
        let r = StyleResolver::new(&config);
        let mut log = DirectiveLog::new();
        let comment = display(r.resolve(&RawComment::new(0.0, 0, "abcd"), &mut log));
        assert!((comment.effective_size - 50.0).abs() < 1e-9);
        assert!((comment.footprint.measured_width - 200.0).abs() < 1e-9);
        assert_eq!(comment.footprint.height_rows, 50);
    }

    #[test]
    fn declared_reverse_survives_unless_mail_moves_it() {
        let mut log = DirectiveLog::new();
        let r = resolver();
        let raw = RawComment::new(0.0, 0, "x").with_motion(MotionClass::Reverse);
        assert_eq!(display(r.resolve(&raw, &mut log)).motion, MotionClass::Reverse);
        let moved = raw.with_mail("ue");
        assert_eq!(display(r.resolve(&moved, &mut log)).motion, MotionClass::Top);
    }
}
