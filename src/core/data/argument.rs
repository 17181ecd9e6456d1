use std::{collections::BTreeSet, fmt};

use serde::{Serialize, Serializer, ser::SerializeSeq};

/// Kind of value a format argument position accepts.
///
/// Each variant stands for a whole family of concrete runtime types:
///
/// - `Boolean`: booleans
/// - `Character`: single characters
/// - `Integer`: byte, short, int, long and big integers
/// - `Floating`: float, double and big decimals
/// - `DateTime`: epoch millis, dates and calendars
/// - `Universal`: any value at all
///
/// `Universal` is an ordinary tag, not a supertype: intersecting
/// `{Universal}` with `{Integer}` yields nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArgumentKind {
    Boolean,
    Character,
    Integer,
    Floating,
    DateTime,
    Universal,
}

impl fmt::Display for ArgumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentKind::Boolean => write!(f, "boolean"),
            ArgumentKind::Character => write!(f, "char"),
            ArgumentKind::Integer => write!(f, "integer"),
            ArgumentKind::Floating => write!(f, "float"),
            ArgumentKind::DateTime => write!(f, "date-time"),
            ArgumentKind::Universal => write!(f, "any"),
        }
    }
}

/// Set of argument kinds compatible with one argument position.
///
/// Never empty. Iteration follows the declaration order of [`ArgumentKind`],
/// so output built from a set is reproducible.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArgumentTypeSet {
    kinds: BTreeSet<ArgumentKind>,
}

impl ArgumentTypeSet {
    /// The "accept anything" set: `{Universal}`.
    pub fn universal() -> Self {
        Self::of(ArgumentKind::Universal)
    }

    /// A set holding exactly one kind.
    pub fn of(kind: ArgumentKind) -> Self {
        Self {
            kinds: BTreeSet::from([kind]),
        }
    }

    /// Build a set from any number of kinds. No kinds at all gives `{Universal}`.
    pub fn from_kinds(kinds: impl IntoIterator<Item = ArgumentKind>) -> Self {
        let kinds: BTreeSet<ArgumentKind> = kinds.into_iter().collect();
        if kinds.is_empty() {
            Self::universal()
        } else {
            Self { kinds }
        }
    }

    pub fn kinds(&self) -> impl Iterator<Item = ArgumentKind> + '_ {
        self.kinds.iter().copied()
    }

    pub fn contains(&self, kind: ArgumentKind) -> bool {
        self.kinds.contains(&kind)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// True if this is exactly `{Universal}`.
    pub fn is_universal(&self) -> bool {
        self.kinds.len() == 1 && self.contains(ArgumentKind::Universal)
    }

    /// Intersection of both sets, collapsing to `{Universal}` when nothing is shared.
    pub fn intersect(&self, other: &ArgumentTypeSet) -> ArgumentTypeSet {
        Self::from_kinds(self.kinds.intersection(&other.kinds).copied())
    }

    /// In-place form of [`intersect`](Self::intersect).
    pub fn retain(&mut self, other: &ArgumentTypeSet) {
        self.kinds.retain(|kind| other.kinds.contains(kind));
        if self.kinds.is_empty() {
            self.kinds.insert(ArgumentKind::Universal);
        }
    }

    /// The kind a generated accessor parameter should use.
    ///
    /// Returns the only candidate, or `Universal` when several remain.
    pub fn preferred_kind(&self) -> ArgumentKind {
        match self.kinds.first() {
            Some(kind) if self.kinds.len() == 1 => *kind,
            _ => ArgumentKind::Universal,
        }
    }
}

impl Default for ArgumentTypeSet {
    fn default() -> Self {
        Self::universal()
    }
}

impl From<ArgumentKind> for ArgumentTypeSet {
    fn from(kind: ArgumentKind) -> Self {
        Self::of(kind)
    }
}

impl fmt::Display for ArgumentTypeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, kind) in self.kinds.iter().enumerate() {
            if i > 0 {
                write!(f, "|")?;
            }
            write!(f, "{}", kind)?;
        }
        Ok(())
    }
}

impl Serialize for ArgumentTypeSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.kinds.len()))?;
        for kind in &self.kinds {
            seq.serialize_element(kind)?;
        }
        seq.end()
    }
}
