//! Directive values
//!
//! A directive is immutable once created. It carries the window it is active
//! in, the style captured from its own mail, and what it does to comments that
//! fall inside the window.

use crate::{comment::Channel, style::CommentStyle};

/// Channels a directive targets before negation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChannelSet {
    /// Every channel (`全`)
    #[default]
    All,
    /// Viewer comments (`コメ`)
    Viewer,
    /// Owner comments (`投コメ`)
    Owner,
}

/// Which channels a directive applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TargetFilter {
    /// Base channel set
    pub base: ChannelSet,
    /// Complement of the base set (`以外` suffix)
    pub negated: bool,
}

impl TargetFilter {
    /// Filter admitting every channel
    pub const ALL: Self = Self {
        base: ChannelSet::All,
        negated: false,
    };

    /// Parse a target argument such as `コメ` or `投コメ以外`
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        let (stem, negated) = match token.strip_suffix("以外") {
            Some(stem) => (stem, true),
            None => (token, false),
        };
        let base = match stem {
            "全" => ChannelSet::All,
            "コメ" => ChannelSet::Viewer,
            "投コメ" => ChannelSet::Owner,
            _ => return None,
        };
        Some(Self { base, negated })
    }

    /// Does the filter admit comments on `channel`
    #[must_use]
    pub fn admits(self, channel: Channel) -> bool {
        let in_base = match self.base {
            ChannelSet::All => true,
            ChannelSet::Viewer => channel == Channel::Viewer,
            ChannelSet::Owner => channel == Channel::Owner,
        };
        in_base != self.negated
    }
}

/// How a substitution keyword is matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatchMode {
    /// Text contains the keyword (`部分一致`)
    #[default]
    Contains,
    /// Text equals the keyword (`完全一致`)
    Exact,
}

impl MatchMode {
    /// Parse a match-mode argument
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "部分一致" => Some(Self::Contains),
            "完全一致" => Some(Self::Exact),
            _ => None,
        }
    }
}

/// What a matching substitution replaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReplaceScope {
    /// First occurrence of the keyword (`単`)
    #[default]
    FirstOccurrence,
    /// The entire comment text (`全`)
    WholeText,
}

impl ReplaceScope {
    /// Parse a scope argument
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "単" => Some(Self::FirstOccurrence),
            "全" => Some(Self::WholeText),
            _ => None,
        }
    }
}

/// Parameters of a text substitution
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubstituteRule {
    /// Text to look for
    pub keyword: String,
    /// Text to put in its place
    pub replacement: String,
    /// Replace the keyword or the whole text
    pub scope: ReplaceScope,
    /// Channels the rule applies to
    pub target: TargetFilter,
    /// Keyword matching mode
    pub match_mode: MatchMode,
}

impl SubstituteRule {
    /// Does `text` match the keyword
    ///
    /// An empty keyword never matches.
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        if self.keyword.is_empty() {
            return false;
        }
        match self.match_mode {
            MatchMode::Contains => text.contains(&self.keyword),
            MatchMode::Exact => text == self.keyword,
        }
    }

    /// Rewritten text, or `None` when the keyword does not match
    #[must_use]
    pub fn rewrite(&self, text: &str) -> Option<String> {
        if !self.matches(text) {
            return None;
        }
        Some(match self.scope {
            ReplaceScope::FirstOccurrence => text.replacen(&self.keyword, &self.replacement, 1),
            ReplaceScope::WholeText => self.replacement.clone(),
        })
    }
}

/// What a directive does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveKind {
    /// Reset matching comments to the captured style (`デフォルト`)
    ResetDefault,
    /// Rewrite text and restyle (`置換`)
    Substitute(SubstituteRule),
    /// Force reverse scrolling (`逆`)
    ReverseDirection(TargetFilter),
}

impl DirectiveKind {
    /// Short name for logs
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::ResetDefault => "reset-default",
            Self::Substitute(_) => "substitute",
            Self::ReverseDirection(_) => "reverse-direction",
        }
    }
}

/// Half-open activity window `[start, end)` in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    /// First second the directive is active
    pub start: f64,
    /// First second it is no longer active
    pub end: f64,
}

impl Window {
    /// Window of `duration` seconds starting at `start`
    #[must_use]
    pub fn starting_at(start: f64, duration: f64) -> Self {
        Self {
            start,
            end: start + duration,
        }
    }

    /// Is `t` inside the window
    #[must_use]
    pub fn contains(&self, t: f64) -> bool {
        self.start <= t && t < self.end
    }
}

/// An immutable style-script directive
#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    /// Effect on comments in the window
    pub kind: DirectiveKind,
    /// Activity window
    pub window: Window,
    /// Style resolved from the directive comment's own mail
    pub style: CommentStyle,
    /// Arrival index of the comment that declared it
    pub declared_at: u64,
}
