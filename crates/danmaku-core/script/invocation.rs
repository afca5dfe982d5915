//! Directive invocation parsing
//!
//! An invocation is a marker (`@`, `＠` or `/`) immediately followed by a
//! directive name, then arguments separated by ASCII or ideographic spaces.
//! Arguments are bare tokens or quoted with `"..."`, `'...'` or `「...」`.
//!
//! Arguments bind positionally to the directive's parameter list. A token that
//! fails its parameter's allowed-value check is skipped and the parameter
//! cursor stays put, so the next token is offered to the same parameter.

use super::directive::{DirectiveKind, MatchMode, ReplaceScope, SubstituteRule, TargetFilter};

/// Characters that open a directive invocation
pub const MARKERS: [char; 3] = ['@', '＠', '/'];

/// A parsed invocation, not yet bound to a directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation<'a> {
    /// Directive name
    pub name: &'a str,
    /// Positional arguments with quotes removed
    pub args: Vec<String>,
}

impl<'a> Invocation<'a> {
    /// Parse `text` as an invocation
    ///
    /// Returns `None` when the text does not start with a marker or the
    /// marker is not followed by a name; such text is ordinary comment text.
    #[must_use]
    pub fn parse(text: &'a str) -> Option<Self> {
        let rest = text.strip_prefix(&MARKERS[..])?;
        let name_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let name = &rest[..name_end];
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name,
            args: split_arguments(&rest[name_end..]),
        })
    }

    /// Bind the arguments to the named directive
    ///
    /// Returns `None` for an unknown directive name.
    #[must_use]
    pub fn bind(&self) -> Option<DirectiveKind> {
        match self.name {
            "デフォルト" => Some(DirectiveKind::ResetDefault),
            "置換" => Some(DirectiveKind::Substitute(bind_substitute(&self.args))),
            "逆" => Some(DirectiveKind::ReverseDirection(bind_reverse(&self.args))),
            _ => None,
        }
    }
}

/// Split an argument string on whitespace, honouring quotes
///
/// An unterminated quote runs to the end of the input.
#[must_use]
pub fn split_arguments(input: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        let closing = match c {
            '"' => Some('"'),
            '\'' => Some('\''),
            '「' => Some('」'),
            _ => None,
        };
        let mut arg = String::new();
        if let Some(closing) = closing {
            chars.next();
            for ch in chars.by_ref() {
                if ch == closing {
                    break;
                }
                arg.push(ch);
            }
        } else {
            while let Some(&ch) = chars.peek() {
                if ch.is_whitespace() {
                    break;
                }
                arg.push(ch);
                chars.next();
            }
        }
        args.push(arg);
    }
    args
}

/// Parameters of `置換`, in positional order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SubstituteParam {
    Keyword,
    Replacement,
    Scope,
    Target,
    Match,
}

const SUBSTITUTE_PARAMS: [SubstituteParam; 5] = [
    SubstituteParam::Keyword,
    SubstituteParam::Replacement,
    SubstituteParam::Scope,
    SubstituteParam::Target,
    SubstituteParam::Match,
];

impl SubstituteParam {
    /// Store `arg` into `rule`, returning false when the value is not allowed
    fn bind(self, rule: &mut SubstituteRule, arg: &str) -> bool {
        match self {
            Self::Keyword => rule.keyword = arg.to_string(),
            Self::Replacement => rule.replacement = arg.to_string(),
            Self::Scope => match ReplaceScope::parse(arg) {
                Some(scope) => rule.scope = scope,
                None => return false,
            },
            Self::Target => match TargetFilter::parse(arg) {
                Some(target) => rule.target = target,
                None => return false,
            },
            Self::Match => match MatchMode::parse(arg) {
                Some(mode) => rule.match_mode = mode,
                None => return false,
            },
        }
        true
    }
}

fn bind_substitute(args: &[String]) -> SubstituteRule {
    let mut rule = SubstituteRule::default();
    let mut cursor = 0;
    for arg in args {
        let Some(param) = SUBSTITUTE_PARAMS.get(cursor) else {
            break;
        };
        if param.bind(&mut rule, arg) {
            cursor += 1;
        } else {
            tracing::trace!(argument = %arg, parameter = ?param, "skipping invalid directive argument");
        }
    }
    rule
}

fn bind_reverse(args: &[String]) -> TargetFilter {
    args.iter()
        .find_map(|arg| TargetFilter::parse(arg))
        .unwrap_or_default()
}
