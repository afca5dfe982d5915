//! Interval-scoped style scripting
//!
//! Owner-channel comments that start with a directive marker are not shown.
//! They become [`Directive`]s in an append-only [`DirectiveLog`], and every
//! later comment whose start time falls inside a directive's window has its
//! text or style rewritten by it, in declaration order.
//!
//! The log is an ordinary value owned by the caller and passed into
//! [`StyleResolver::resolve`]; there is no process-wide state.
//!
//! # Example
//!
//! ```rust
//! use danmaku_core::comment::{Channel, RawComment};
//! use danmaku_core::config::LayoutConfig;
//! use danmaku_core::script::{DirectiveLog, Resolution, StyleResolver};
//!
//! let resolver = StyleResolver::new(&LayoutConfig::default());
//! let mut log = DirectiveLog::new();
//!
//! let directive = RawComment::new(10.0, 0, "@置換 w 笑").with_channel(Channel::Owner);
//! assert!(matches!(resolver.resolve(&directive, &mut log), Resolution::Directive));
//!
//! let inside = RawComment::new(12.0, 1, "www");
//! match resolver.resolve(&inside, &mut log) {
//!     Resolution::Display(comment) => assert_eq!(comment.text, "笑ww"),
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```

pub mod directive;
pub mod invocation;
pub mod resolver;

pub use directive::{
    ChannelSet, Directive, DirectiveKind, MatchMode, ReplaceScope, SubstituteRule, TargetFilter,
    Window,
};
pub use invocation::Invocation;
pub use resolver::{HiddenReason, Resolution, StyleResolver};

/// Window length of a directive whose mail names no duration
pub const DEFAULT_DIRECTIVE_DURATION: f64 = 30.0;

/// Append-only list of directives in declaration order
#[derive(Debug, Clone, Default)]
pub struct DirectiveLog {
    entries: Vec<Directive>,
}

impl DirectiveLog {
    /// Create an empty log
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a directive
    pub fn push(&mut self, directive: Directive) {
        self.entries.push(directive);
    }

    /// Number of directives declared so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no directive has been declared
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All directives, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Directive> {
        self.entries.iter()
    }

    /// Directives whose window contains `t`, oldest first
    pub fn active_at(&self, t: f64) -> impl Iterator<Item = &Directive> {
        self.entries.iter().filter(move |d| d.window.contains(t))
    }
}

impl Extend<Directive> for DirectiveLog {
    fn extend<I: IntoIterator<Item = Directive>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}
