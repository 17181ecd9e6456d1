//! Argument types for message patterns (`Hello {0}, you have {1,number} messages`).
//!
//! Placeholders only carry a position, so every argument resolves to
//! `{Universal}`. The resolver still parses the whole pattern: quoting,
//! nested sub-patterns and the optional format type, and fails on
//! structural errors instead of guessing.

use thiserror::Error;

use super::{ArgumentTypesResolver, MAX_ARGUMENT_INDEX};
use crate::core::data::ArgumentTypeSet;

const FORMAT_TYPES: &[&str] = &["", "number", "date", "time", "choice"];

/// Structural error in a message pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// An argument opened at `offset` (byte position of its `{`) is never closed.
    #[error("unmatched braces in the pattern (argument opened at offset {offset})")]
    UnmatchedBraces { offset: usize },

    #[error("can't parse argument number: \"{text}\"")]
    InvalidArgumentIndex { text: String },

    #[error("negative argument number: {index}")]
    NegativeArgumentIndex { index: i64 },

    #[error("argument number too large: {index}")]
    ArgumentIndexTooLarge { index: i64 },

    #[error("unknown format type: \"{name}\"")]
    UnknownFormatType { name: String },

    #[error("invalid choice pattern: \"{style}\"")]
    InvalidChoiceStyle { style: String },
}

/// One `{index,type,style}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternArgument {
    /// 0-based argument number.
    pub index: usize,
    /// Format type as written, trimmed and lowercased ("" if absent).
    pub format_type: String,
    /// Style as written ("" if absent).
    pub style: String,
}

/// Parse every top-level placeholder of `pattern`, in source order.
pub fn parse_arguments(pattern: &str) -> Result<Vec<PatternArgument>, PatternError> {
    let mut arguments = Vec::new();
    let mut chars = pattern.char_indices().peekable();
    let mut in_quote = false;

    while let Some((offset, ch)) = chars.next() {
        match ch {
            '\'' => {
                if chars.next_if(|&(_, next)| next == '\'').is_none() {
                    in_quote = !in_quote;
                }
            }
            '{' if !in_quote => {
                let segments = read_argument(&mut chars, offset)?;
                arguments.push(make_argument(segments)?);
            }
            // A stray '}' outside an argument is literal text.
            _ => {}
        }
    }

    Ok(arguments)
}

/// Read up to the matching `}`, splitting on the first two top-level commas.
fn read_argument(
    chars: &mut impl Iterator<Item = (usize, char)>,
    offset: usize,
) -> Result<[String; 3], PatternError> {
    let mut segments: [String; 3] = Default::default();
    let mut part = 0;
    let mut depth = 0usize;
    let mut in_quote = false;

    loop {
        let Some((_, ch)) = chars.next() else {
            return Err(PatternError::UnmatchedBraces { offset });
        };

        if in_quote {
            segments[part].push(ch);
            if ch == '\'' {
                in_quote = false;
            }
            continue;
        }

        match ch {
            ',' if part < 2 => part += 1,
            '{' => {
                depth += 1;
                segments[part].push(ch);
            }
            '}' if depth == 0 => return Ok(segments),
            '}' => {
                depth -= 1;
                segments[part].push(ch);
            }
            ' ' if part == 1 && segments[1].is_empty() => {}
            '\'' => {
                in_quote = true;
                segments[part].push(ch);
            }
            _ => segments[part].push(ch),
        }
    }
}

fn make_argument([index, format_type, style]: [String; 3]) -> Result<PatternArgument, PatternError> {
    let number: i64 = index
        .parse()
        .map_err(|_| PatternError::InvalidArgumentIndex { text: index.clone() })?;
    if number < 0 {
        return Err(PatternError::NegativeArgumentIndex { index: number });
    }
    let position = usize::try_from(number)
        .ok()
        .filter(|&position| position < MAX_ARGUMENT_INDEX)
        .ok_or(PatternError::ArgumentIndexTooLarge { index: number })?;

    let keyword = format_type.trim().to_lowercase();
    if !FORMAT_TYPES.contains(&keyword.as_str()) {
        return Err(PatternError::UnknownFormatType { name: format_type });
    }

    if keyword == "choice" {
        validate_choice(&style)?;
    }

    Ok(PatternArgument {
        index: position,
        format_type: keyword,
        style,
    })
}

/// Check a choice style: `limit#text` intervals joined by `|`, limits in
/// ascending order. `<` (exclusive) or `\u{2264}` may replace `#`.
fn validate_choice(style: &str) -> Result<(), PatternError> {
    let invalid = || PatternError::InvalidChoiceStyle {
        style: style.to_string(),
    };

    let mut limit = String::new();
    let mut in_text = false;
    let mut in_quote = false;
    let mut intervals = 0;
    // (value, exclusive); `1<` sorts just after `1#`.
    let mut previous: Option<(f64, bool)> = None;
    let mut chars = style.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\'' {
            if chars.next_if_eq(&'\'').is_none() {
                in_quote = !in_quote;
            }
            continue;
        }
        if in_quote {
            if !in_text {
                limit.push(ch);
            }
            continue;
        }

        match ch {
            '#' | '<' | '\u{2264}' => {
                let value = parse_limit(limit.trim()).ok_or_else(invalid)?;
                let current = (value, ch == '<');
                if previous.is_some_and(|previous| current <= previous) {
                    return Err(invalid());
                }
                previous = Some(current);
                limit.clear();
                in_text = true;
            }
            '|' => {
                if !in_text {
                    return Err(invalid());
                }
                intervals += 1;
                in_text = false;
            }
            _ if !in_text => limit.push(ch),
            _ => {}
        }
    }

    if in_text {
        intervals += 1;
    } else if !limit.trim().is_empty() {
        return Err(invalid());
    }
    if intervals == 0 {
        return Err(invalid());
    }
    Ok(())
}

fn parse_limit(limit: &str) -> Option<f64> {
    match limit {
        "\u{221E}" => Some(f64::INFINITY),
        "-\u{221E}" => Some(f64::NEG_INFINITY),
        _ => limit.parse().ok().filter(|value: &f64| !value.is_nan()),
    }
}

/// Resolver for numbered message patterns (`{0}`, `{1,date,short}`, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatternResolver;

impl PatternResolver {
    pub fn new() -> Self {
        Self
    }
}

impl ArgumentTypesResolver for PatternResolver {
    fn resolve(&self, pattern: &str) -> Result<Vec<ArgumentTypeSet>, PatternError> {
        let count = parse_arguments(pattern)?
            .iter()
            .map(|argument| argument.index + 1)
            .max()
            .unwrap_or(0);
        Ok(vec![ArgumentTypeSet::universal(); count])
    }
}
