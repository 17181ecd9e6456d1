//! Argument types for printf-style format strings.
//!
//! Specifiers have the shape `%[index$][flags][width][.precision][t]conversion`.
//! Arguments are addressed three ways:
//!
//! - explicitly, with `N$` (1-based)
//! - relatively, with the `<` flag, reusing the previous specifier's argument
//! - ordinarily, taking the next argument in sequence
//!
//! Text that does not match the specifier grammar is treated as literal text,
//! so this resolver never fails.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::{ArgumentTypesResolver, MAX_ARGUMENT_INDEX, PatternError};
use crate::core::data::{ArgumentKind, ArgumentTypeSet};

static FORMAT_SPECIFIER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"%([0-9]+\$)?([-#+ 0,(<]*)([0-9]+)?(\.[0-9]+)?([tT])?([a-zA-Z%])")
        .expect("format specifier regex must compile")
});

/// How a specifier selects its argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpecifierIndex {
    /// `%%` and `%n`: consumes no argument.
    Literal,
    /// `<` flag: same argument as the previous specifier.
    Relative,
    /// No index: next argument in sequence.
    Ordinary,
    /// `N$`, stored 0-based.
    Explicit(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FormatSpecifier {
    index: SpecifierIndex,
    kind: ArgumentKind,
}

impl FormatSpecifier {
    /// Returns `None` for specifiers with an unusable explicit index.
    fn from_captures(caps: &Captures<'_>) -> Option<Self> {
        let conversion = caps.get(6)?.as_str().chars().next()?;
        let is_datetime = caps.get(5).is_some();

        let index = if is_literal(conversion) {
            SpecifierIndex::Literal
        } else if let Some(explicit) = caps.get(1) {
            let digits = explicit.as_str().trim_end_matches('$');
            let position: usize = digits.parse().ok()?;
            match position {
                // `0$` names no argument and falls back to the next one in sequence.
                0 => SpecifierIndex::Ordinary,
                _ if position > MAX_ARGUMENT_INDEX => return None,
                _ => SpecifierIndex::Explicit(position - 1),
            }
        } else if caps.get(2).is_some_and(|flags| flags.as_str().contains('<')) {
            SpecifierIndex::Relative
        } else {
            SpecifierIndex::Ordinary
        };

        let kind = if is_datetime {
            ArgumentKind::DateTime
        } else {
            conversion_kind(conversion)
        };

        Some(Self { index, kind })
    }
}

fn is_literal(conversion: char) -> bool {
    conversion == 'n' || conversion == '%'
}

/// Type family accepted by a (non date/time) conversion character.
fn conversion_kind(conversion: char) -> ArgumentKind {
    match conversion {
        'b' | 'B' => ArgumentKind::Boolean,
        'c' | 'C' => ArgumentKind::Character,
        'd' | 'o' | 'x' | 'X' => ArgumentKind::Integer,
        'e' | 'E' | 'g' | 'G' | 'f' | 'a' | 'A' => ArgumentKind::Floating,
        _ => ArgumentKind::Universal,
    }
}

fn parse_specifiers(format: &str) -> Vec<FormatSpecifier> {
    FORMAT_SPECIFIER_REGEX
        .captures_iter(format)
        .filter_map(|caps| FormatSpecifier::from_captures(&caps))
        .collect()
}

/// Resolver for printf-style conversions (`%s`, `%2$d`, `%<tT`, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionResolver;

impl ConversionResolver {
    pub fn new() -> Self {
        Self
    }

    /// Infallible form of [`ArgumentTypesResolver::resolve`].
    pub fn resolve_types(&self, format: &str) -> Vec<ArgumentTypeSet> {
        let mut slots: Vec<Option<ArgumentTypeSet>> = Vec::new();
        let mut last_index: Option<usize> = None;
        let mut next_ordinary = 0;

        for specifier in parse_specifiers(format) {
            let index = match specifier.index {
                SpecifierIndex::Literal => continue,
                // Relative before any argument is a runtime error, not ours.
                SpecifierIndex::Relative => match last_index {
                    Some(index) => index,
                    None => continue,
                },
                SpecifierIndex::Ordinary => {
                    let index = next_ordinary;
                    next_ordinary += 1;
                    index
                }
                SpecifierIndex::Explicit(index) => index,
            };
            last_index = Some(index);
            merge(&mut slots, index, specifier.kind);
        }

        slots
            .into_iter()
            .map(Option::unwrap_or_default)
            .collect()
    }
}

fn merge(slots: &mut Vec<Option<ArgumentTypeSet>>, index: usize, kind: ArgumentKind) {
    if slots.len() <= index {
        slots.resize(index + 1, None);
    }
    let family = ArgumentTypeSet::of(kind);
    if let Some(existing) = &mut slots[index] {
        existing.retain(&family);
    } else {
        slots[index] = Some(family);
    }
}

impl ArgumentTypesResolver for ConversionResolver {
    fn resolve(&self, format: &str) -> Result<Vec<ArgumentTypeSet>, PatternError> {
        Ok(self.resolve_types(format))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn resolve(format: &str) -> Vec<ArgumentTypeSet> {
        ConversionResolver::new().resolve_types(format)
    }

    fn single(format: &str) -> ArgumentKind {
        let types = resolve(format);
        assert_eq!(types.len(), 1, "expected one argument for {:?}", format);
        assert_eq!(types[0].len(), 1);
        types[0].preferred_kind()
    }

    #[test]
    fn test_boolean() {
        assert_eq!(single("prefix %b postfix"), ArgumentKind::Boolean);
        assert_eq!(single("prefix %B postfix"), ArgumentKind::Boolean);
    }

    #[test]
    fn test_object_and_hash() {
        for format in ["%s", "%S", "%h", "%H", "prefix %10.3s postfix"] {
            assert_eq!(single(format), ArgumentKind::Universal, "{}", format);
        }
    }

    #[test]
    fn test_character() {
        assert_eq!(single("%c"), ArgumentKind::Character);
        assert_eq!(single("%C"), ArgumentKind::Character);
    }

    #[test]
    fn test_integer() {
        for format in ["%d", "%o", "%x", "%X", "%-,08d", "%(d"] {
            assert_eq!(single(format), ArgumentKind::Integer, "{}", format);
        }
    }

    #[test]
    fn test_floating() {
        for format in ["%e", "%E", "%g", "%G", "%f", "%.2f", "%a", "%A"] {
            assert_eq!(single(format), ArgumentKind::Floating, "{}", format);
        }
    }

    #[test]
    fn test_datetime() {
        for format in ["%tc", "%Tc", "%tY", "%1$tF"] {
            assert_eq!(single(format), ArgumentKind::DateTime, "{}", format);
        }
    }

    #[test]
    fn test_literals_consume_nothing() {
        assert!(resolve("prefix %% postfix").is_empty());
        assert!(resolve("prefix %n postfix").is_empty());
        assert_eq!(resolve("%% %d %n %s").len(), 2);
    }

    #[test]
    fn test_no_specifiers() {
        assert!(resolve("plain text").is_empty());
        assert!(resolve("").is_empty());
        assert!(resolve("100%").is_empty());
    }

    #[test]
    fn test_explicit_index_conflict_is_universal() {
        let types = resolve("%1$d %1$b");
        assert_eq!(types, vec![ArgumentTypeSet::universal()]);
    }

    #[test]
    fn test_explicit_index_same_family() {
        let types = resolve("%1$d and again %1$x");
        assert_eq!(types, vec![ArgumentTypeSet::of(ArgumentKind::Integer)]);
    }

    #[test]
    fn test_gaps_default_to_universal() {
        let types = resolve("%3$d");
        assert_eq!(
            types,
            vec![
                ArgumentTypeSet::universal(),
                ArgumentTypeSet::universal(),
                ArgumentTypeSet::of(ArgumentKind::Integer),
            ]
        );
    }

    #[test]
    fn test_explicit_index_does_not_advance_ordinal() {
        let types = resolve("%2$b %d %s");
        // %d takes argument 0, %s argument 1 (merged with %2$b)
        assert_eq!(
            types,
            vec![
                ArgumentTypeSet::of(ArgumentKind::Integer),
                ArgumentTypeSet::universal(),
            ]
        );
    }

    #[test]
    fn test_relative_reuses_explicit_index() {
        let types = resolve("%2$tY %<tm %d");
        assert_eq!(
            types,
            vec![
                ArgumentTypeSet::of(ArgumentKind::Integer),
                ArgumentTypeSet::of(ArgumentKind::DateTime),
            ]
        );
    }

    #[test]
    fn test_relative_without_previous_is_ignored() {
        assert!(resolve("%<s").is_empty());
        assert_eq!(resolve("%<s %d"), vec![ArgumentTypeSet::of(ArgumentKind::Integer)]);
    }

    #[test]
    fn test_zero_index_takes_next_argument() {
        assert_eq!(resolve("%0$s"), vec![ArgumentTypeSet::universal()]);
        assert_eq!(
            resolve("%d %0$b"),
            vec![
                ArgumentTypeSet::of(ArgumentKind::Integer),
                ArgumentTypeSet::of(ArgumentKind::Boolean),
            ]
        );
    }

    #[test]
    fn test_index_past_limit_is_skipped() {
        assert!(resolve("%10001$s").is_empty());
        assert_eq!(resolve("%10000$s").len(), 10000);
    }

    #[test]
    fn test_non_ascii_digits_are_literal() {
        assert!(resolve("%\u{0663}s").is_empty());
        assert!(resolve("%\u{0663}$d").is_empty());
        assert!(resolve("%.\u{0661}f").is_empty());
    }

    #[test]
    fn test_complex_format() {
        let types = resolve("%tF %<tT %tF %<tT %s %<s %s %<d %d %<d %<d %2$b%n");
        assert_eq!(
            types,
            vec![
                ArgumentTypeSet::of(ArgumentKind::DateTime),
                ArgumentTypeSet::universal(),
                ArgumentTypeSet::universal(),
                ArgumentTypeSet::universal(),
                ArgumentTypeSet::of(ArgumentKind::Integer),
            ]
        );
    }

    #[test]
    fn test_trait_never_fails() {
        let resolver = ConversionResolver::new();
        assert!(resolver.resolve("%{0} {").is_ok());
    }
}
