//! Name-matching rules for category groups.
//!
//! A rule is written as one or more alternatives separated by `|`. Each
//! alternative is one of:
//! - `regex:<expr>`: unanchored, case-insensitive, Unicode regular expression
//! - `Seg*Seg`: every `*`-separated segment must occur somewhere in the name
//! - plain text: must occur as a substring of the name
//!
//! Both the file name and the rule text go through [`normalize`] before they
//! are compared.

use regex::{Regex, RegexBuilder};
use std::sync::OnceLock;

/// Prefix marking an alternative as a regular expression.
pub const REGEX_PREFIX: &str = "regex:";

/// Canonicalize a name for comparison.
///
/// Runs of `.`, `_`, `-` and whitespace collapse to a single space, the
/// result is trimmed and lowercased.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for ch in text.chars() {
        if matches!(ch, '.' | '_' | '-') || ch.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(ch);
    }

    out.to_lowercase()
}

/// An invalid regex alternative. Never fatal: the alternative just never matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternWarning {
    pub alternative: String,
    pub message: String,
}

/// One `|`-separated branch of a [`Pattern`].
#[derive(Debug, Clone)]
pub enum Alternative {
    Regex {
        raw: String,
        expression: String,
        compiled: OnceLock<std::result::Result<Regex, String>>,
    },
    Wildcard {
        raw: String,
        segments: Vec<String>,
    },
    Literal {
        raw: String,
        needle: String,
    },
}

impl Alternative {
    fn parse(raw: &str) -> Self {
        if let Some(expression) = raw.strip_prefix(REGEX_PREFIX) {
            Alternative::Regex {
                raw: raw.to_string(),
                expression: expression.to_string(),
                compiled: OnceLock::new(),
            }
        } else if raw.contains('*') {
            let segments = raw
                .split('*')
                .filter(|segment| !segment.trim().is_empty())
                .map(normalize)
                .collect();
            Alternative::Wildcard {
                raw: raw.to_string(),
                segments,
            }
        } else {
            Alternative::Literal {
                raw: raw.to_string(),
                needle: normalize(raw),
            }
        }
    }

    /// The alternative as written in the config, prefix included.
    pub fn raw(&self) -> &str {
        match self {
            Alternative::Regex { raw, .. }
            | Alternative::Wildcard { raw, .. }
            | Alternative::Literal { raw, .. } => raw,
        }
    }

    /// `text` must already be normalized.
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Alternative::Regex { .. } => match self.regex() {
                Ok(regex) => regex.is_match(text),
                Err(_) => false,
            },
            Alternative::Wildcard { segments, .. } => {
                segments.iter().all(|segment| text.contains(segment.as_str()))
            }
            Alternative::Literal { needle, .. } => text.contains(needle.as_str()),
        }
    }

    fn regex(&self) -> std::result::Result<&Regex, &str> {
        let Alternative::Regex {
            expression,
            compiled,
            ..
        } = self
        else {
            return Err("not a regex alternative");
        };

        compiled
            .get_or_init(|| {
                RegexBuilder::new(expression)
                    .case_insensitive(true)
                    .unicode(true)
                    .build()
                    .map_err(|e| {
                        log::debug!("Invalid regex pattern: {}: {}", expression, e);
                        e.to_string()
                    })
            })
            .as_ref()
            .map_err(String::as_str)
    }
}

/// A compiled rule with its specificity score.
#[derive(Debug, Clone)]
pub struct Pattern {
    raw: String,
    alternatives: Vec<Alternative>,
    priority: usize,
}

impl Pattern {
    pub fn new(raw: &str) -> Self {
        let raw = raw.trim();
        let alternatives: Vec<Alternative> = raw
            .split('|')
            .map(str::trim)
            .filter(|alt| !alt.is_empty())
            .map(Alternative::parse)
            .collect();

        let priority = alternatives
            .iter()
            .map(|alt| alt.raw().chars().count())
            .max()
            .unwrap_or_else(|| raw.chars().count());

        Self {
            raw: raw.to_string(),
            alternatives,
            priority,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn alternatives(&self) -> &[Alternative] {
        &self.alternatives
    }

    /// Length in characters of the longest alternative as written.
    ///
    /// Longer rule text is taken to mean a narrower category. This is a
    /// heuristic: a long generic phrase outranks a short precise regex.
    pub fn priority(&self) -> usize {
        self.priority
    }

    /// `text` must already be normalized. A pattern with no alternatives never matches.
    pub fn matches(&self, text: &str) -> bool {
        self.alternatives.iter().any(|alt| alt.matches(text))
    }

    /// Compile every regex alternative and report the ones that fail.
    pub fn warnings(&self) -> Vec<PatternWarning> {
        self.alternatives
            .iter()
            .filter_map(|alt| match alt {
                Alternative::Regex { raw, .. } => alt.regex().err().map(|message| PatternWarning {
                    alternative: raw.clone(),
                    message: message.to_string(),
                }),
                _ => None,
            })
            .collect()
    }
}
