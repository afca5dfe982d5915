//! Mail command parsing
//!
//! A mail string is a whitespace-separated list of commands. Each command
//! belongs to one category (position, size, colour, font, duration, flag);
//! the vocabulary is a closed table built once and shared by every parse.
//!
//! # Precedence
//!
//! Tokens are scanned in reverse of their declared order and every category
//! is claimed by the first match the scan meets. The last-declared command of
//! each category therefore wins, and the outcome does not depend on how many
//! duplicates precede it: `"big shita ue"` resolves to top, big.
//!
//! Unknown tokens are skipped so newer command sets keep working.

use super::{color, FontAlias, Position, SizeClass};
use crate::utils::{create_hash_map_with_capacity, FastMap};
use std::sync::OnceLock;

bitflags::bitflags! {
    /// Boolean mail flags, recorded apart from the style
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CommentFlags: u8 {
        /// Never displayed
        const INVISIBLE = 1 << 0;
        /// Laid out against the full screen rather than the player area
        const FULL_SCREEN = 1 << 1;
        /// Marks the end of a multi-line comment block
        const END_MARKER = 1 << 2;
        /// Half-transparent live broadcast comment
        const LIVE_ALPHA = 1 << 3;
        /// Half-transparent comment
        const TRANSLUCENT_ALPHA = 1 << 4;
    }
}

impl Default for CommentFlags {
    fn default() -> Self {
        Self::empty()
    }
}

impl CommentFlags {
    /// Effective alpha: one half for live or translucent comments, else opaque
    #[must_use]
    pub fn alpha(self) -> f64 {
        if self.intersects(Self::LIVE_ALPHA | Self::TRANSLUCENT_ALPHA) {
            0.5
        } else {
            1.0
        }
    }
}

/// A recognised mail command and its value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MailToken {
    /// Position command
    Position(Position),
    /// Size command
    Size(SizeClass),
    /// Named or hex colour
    Color(u32),
    /// Font alias command
    Font(FontAlias),
    /// Display duration override in seconds
    Duration(f64),
    /// Boolean flag
    Flag(CommentFlags),
}

impl MailToken {
    /// Classify a single token
    ///
    /// Fixed words come from the shared vocabulary table; hex colours and
    /// durations are recognised by shape.
    #[must_use]
    pub fn classify(token: &str) -> Option<Self> {
        if let Some(known) = vocabulary().get(token) {
            return Some(*known);
        }
        if let Some(rgb) = color::parse_hex_color(token) {
            return Some(Self::Color(rgb));
        }
        parse_duration(token).map(Self::Duration)
    }
}

/// Fixed-word vocabulary, built on first use
fn vocabulary() -> &'static FastMap<&'static str, MailToken> {
    static TABLE: OnceLock<FastMap<&'static str, MailToken>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let words: [(&'static str, MailToken); 14] = [
            ("naka", MailToken::Position(Position::Scroll)),
            ("ue", MailToken::Position(Position::Top)),
            ("shita", MailToken::Position(Position::Bottom)),
            ("small", MailToken::Size(SizeClass::Small)),
            ("medium", MailToken::Size(SizeClass::Medium)),
            ("big", MailToken::Size(SizeClass::Big)),
            ("defont", MailToken::Font(FontAlias::Default)),
            ("gothic", MailToken::Font(FontAlias::Gothic)),
            ("mincho", MailToken::Font(FontAlias::Mincho)),
            ("invisible", MailToken::Flag(CommentFlags::INVISIBLE)),
            ("full", MailToken::Flag(CommentFlags::FULL_SCREEN)),
            ("ender", MailToken::Flag(CommentFlags::END_MARKER)),
            ("_live", MailToken::Flag(CommentFlags::LIVE_ALPHA)),
            ("translucent", MailToken::Flag(CommentFlags::TRANSLUCENT_ALPHA)),
        ];
        let mut table = create_hash_map_with_capacity(words.len() + color::NAMED_COLORS.len());
        table.extend(words);
        table.extend(
            color::NAMED_COLORS
                .iter()
                .map(|&(name, rgb)| (name, MailToken::Color(rgb))),
        );
        table
    })
}

/// Parse `@<seconds>` or `<seconds>sec`
fn parse_duration(token: &str) -> Option<f64> {
    let number = token
        .strip_prefix('@')
        .or_else(|| token.strip_suffix("sec"))?;
    // `f64::from_str` accepts "inf" and "nan"; only plain decimals count here
    if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        return None;
    }
    number
        .parse::<f64>()
        .ok()
        .filter(|seconds| seconds.is_finite() && *seconds > 0.0)
}

/// Commands extracted from one mail string
///
/// Every field is `None` when the mail did not mention that category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MailCommands {
    /// Requested position
    pub position: Option<Position>,
    /// Requested size class
    pub size: Option<SizeClass>,
    /// Requested colour
    pub color: Option<u32>,
    /// Requested font alias
    pub font: Option<FontAlias>,
    /// Requested display duration
    pub duration: Option<f64>,
    /// Boolean flags
    pub flags: CommentFlags,
}

impl MailCommands {
    /// Parse a mail string
    #[must_use]
    pub fn parse(mail: &str) -> Self {
        let mut commands = Self::default();
        for token in mail.split_whitespace().rev() {
            match MailToken::classify(token) {
                Some(MailToken::Position(position)) => claim(&mut commands.position, position),
                Some(MailToken::Size(size)) => claim(&mut commands.size, size),
                Some(MailToken::Color(rgb)) => claim(&mut commands.color, rgb),
                Some(MailToken::Font(font)) => claim(&mut commands.font, font),
                Some(MailToken::Duration(seconds)) => claim(&mut commands.duration, seconds),
                Some(MailToken::Flag(flag)) => commands.flags |= flag,
                None => {}
            }
        }
        commands
    }

    /// Overlay these commands onto `base`
    #[must_use]
    pub fn apply(&self, base: &super::CommentStyle) -> super::CommentStyle {
        super::CommentStyle {
            position: self.position.unwrap_or(base.position),
            size: self.size.unwrap_or(base.size),
            color: self.color.unwrap_or(base.color),
            font: self.font.unwrap_or(base.font),
            duration: self.duration.or(base.duration),
        }
    }
}

fn claim<T>(slot: &mut Option<T>, value: T) {
    if slot.is_none() {
        *slot = Some(value);
    }
}
