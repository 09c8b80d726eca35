//! Core types and structures for email-forge

use serde::{Deserialize, Serialize};

/// Optional mutation scheduled for a heavy-path attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationKind {
    SymbolInsertion,
    VowelDrop,
    Leetspeak,
    DigitPrefix,
    DigitSuffix,
}

impl MutationKind {
    /// Every kind, in pipeline order
    pub const ALL: [MutationKind; 5] = [
        MutationKind::SymbolInsertion,
        MutationKind::VowelDrop,
        MutationKind::Leetspeak,
        MutationKind::DigitPrefix,
        MutationKind::DigitSuffix,
    ];
}

impl std::fmt::Display for MutationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MutationKind::SymbolInsertion => write!(f, "symbol_insertion"),
            MutationKind::VowelDrop => write!(f, "vowel_drop"),
            MutationKind::Leetspeak => write!(f, "leetspeak"),
            MutationKind::DigitPrefix => write!(f, "digit_prefix"),
            MutationKind::DigitSuffix => write!(f, "digit_suffix"),
        }
    }
}

/// Unordered set of distinct mutation kinds
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationSet {
    kinds: Vec<MutationKind>,
}

impl MutationSet {
    pub fn new(kinds: impl IntoIterator<Item = MutationKind>) -> Self {
        let mut set = Self::default();
        for kind in kinds {
            if !set.kinds.contains(&kind) {
                set.kinds.push(kind);
            }
        }
        set
    }

    pub fn contains(&self, kind: MutationKind) -> bool {
        self.kinds.contains(&kind)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

/// Lowercase name and surname
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamePair {
    pub name: String,
    pub surname: String,
}

impl NamePair {
    pub fn new(name: impl Into<String>, surname: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            surname: surname.into(),
        }
    }
}

/// Which branch produced an email
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SynthesisPath {
    /// Full pipeline: shortening, insertion, vowel drop, leetspeak, digit affixes
    Heavy,
    /// Letter duplication and surname digits only
    Light,
}

impl std::fmt::Display for SynthesisPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SynthesisPath::Heavy => write!(f, "heavy"),
            SynthesisPath::Light => write!(f, "light"),
        }
    }
}

/// A step that actually changed the username
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppliedMutation {
    Shorten,
    Scheduled(MutationKind),
    DuplicateLetter,
    SurnameDigits,
}

/// Record of the mutations applied during one attempt
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationReport {
    applied: Vec<AppliedMutation>,
}

impl MutationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `mutation` when `applied` is true
    pub fn record(&mut self, mutation: AppliedMutation, applied: bool) {
        if applied {
            self.applied.push(mutation);
        }
    }

    pub fn count(&self) -> usize {
        self.applied.len()
    }

    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }

    pub fn applied(&self) -> &[AppliedMutation] {
        &self.applied
    }
}

/// Result of a mutation step: the new value and whether it counts as applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutated<T> {
    pub value: T,
    pub applied: bool,
}

impl<T> Mutated<T> {
    pub fn changed(value: T) -> Self {
        Self { value, applied: true }
    }

    pub fn unchanged(value: T) -> Self {
        Self { value, applied: false }
    }
}

/// An accepted email together with how it was produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesizedEmail {
    pub email: String,
    pub username: String,
    pub domain: String,
    pub path: SynthesisPath,
    pub mutations: MutationReport,
    /// 1-based attempt that passed the guard
    pub attempt: u32,
}

impl SynthesizedEmail {
    /// Number of ASCII digits in the username
    pub fn digit_count(&self) -> usize {
        count_digits(&self.username)
    }
}

/// Number of ASCII digits in `s`
pub fn count_digits(s: &str) -> usize {
    s.chars().filter(|c| c.is_ascii_digit()).count()
}
