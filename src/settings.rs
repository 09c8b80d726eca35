//! Generator settings
//!
//! A single immutable bag of probabilities, weights and bounds. It is built once,
//! validated, and then shared read-only by every synthesizer call.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::config_error;
use crate::error::{EmailForgeError, Result};

/// Environment variable pointing at a JSON settings file
pub const CONFIG_ENV_VAR: &str = "EMAIL_FORGE_CONFIG";

/// Vowels eligible for leetspeak substitution
pub const VOWELS: &str = "aeiou";

/// How the digit-count clause of the acceptance guard is evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigitGuard {
    /// Accept only when `min_digits <= digits <= max_digits`
    #[default]
    Inclusive,
    /// Reject only when digits exceed both bounds at once.
    ///
    /// Reproduces the historical generator: the upper bound holds, but
    /// usernames with fewer than `min_digits` digits slip through.
    Legacy,
}

impl DigitGuard {
    /// Whether `digits` passes this guard for the given bounds
    pub fn accepts(self, digits: usize, min: usize, max: usize) -> bool {
        match self {
            DigitGuard::Inclusive => (min..=max).contains(&digits),
            DigitGuard::Legacy => !(min < digits && digits > max),
        }
    }
}

impl std::fmt::Display for DigitGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DigitGuard::Inclusive => write!(f, "inclusive"),
            DigitGuard::Legacy => write!(f, "legacy"),
        }
    }
}

/// Character substitution table used by leetspeak
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VowelMap(BTreeMap<char, char>);

impl VowelMap {
    /// Build a map from `(from, to)` pairs
    pub fn new(pairs: impl IntoIterator<Item = (char, char)>) -> Self {
        Self(pairs.into_iter().collect())
    }

    /// Substitute for `c`, if any
    pub fn get(&self, c: char) -> Option<char> {
        self.0.get(&c).copied()
    }

    /// Substitute `c`, leaving unmapped characters untouched
    pub fn translate(&self, c: char) -> char {
        self.get(c).unwrap_or(c)
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, char)> + '_ {
        self.0.iter().map(|(from, to)| (*from, *to))
    }
}

impl Default for VowelMap {
    fn default() -> Self {
        Self::new(VOWELS.chars().zip("12345".chars()))
    }
}

/// Settings for email synthesis.
///
/// Missing fields in a settings file fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Chance the heavy path shortens the name or the surname
    pub shorten_prb: f64,
    /// When shortening, chance the name (rather than the surname) is shortened
    pub shorten_name_prb: f64,
    /// Chance an attempt takes the heavy path
    pub heavy_prb: f64,

    /// Chance of a symbol separator on the heavy path
    pub separator_prb: f64,
    /// Weights for `.`, `_` and `-`
    pub separator_weights: [f64; 3],
    /// Chance of a digit prefix when one is scheduled
    pub prefix_prb: f64,
    /// Chance a digit prefix is a single digit rather than a 1-2 digit run
    pub single_digit_prefix_prb: f64,
    pub domains: Vec<String>,
    pub domain_weights: Vec<f64>,

    /// Chance the inserted junk is a single character rather than a doubled letter
    pub single_char_insertion_prb: f64,
    /// Chance of symbol insertion when leetspeak is scheduled in the same attempt
    pub insertion_with_leetspeak_prb: f64,

    /// Weights for birth year, digit run and 80-99 suffixes
    pub suffix_weights: [f64; 3],
    /// Weights for scheduling 1, 2 or 3 mutations
    pub mutation_count_weights: [f64; 3],

    /// Light path: chance of duplicating a letter
    pub light_duplicate_prb: f64,
    /// Light path: chance of appending digits to the surname
    pub light_suffix_prb: f64,

    #[serde(alias = "min_email_length")]
    pub min_username_length: usize,
    #[serde(alias = "min_digits_in_email")]
    pub min_digits: usize,
    #[serde(alias = "max_digits_in_email")]
    pub max_digits: usize,
    pub digit_guard: DigitGuard,

    pub birth_year_min: u32,
    pub birth_year_max: u32,

    /// Attempts before giving up on a name pair
    pub max_attempts: u32,

    pub vowel_map: VowelMap,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            shorten_prb: 0.4,
            shorten_name_prb: 0.55,
            heavy_prb: 0.8,
            separator_prb: 0.65,
            separator_weights: [0.4, 0.5, 0.1],
            prefix_prb: 0.6,
            single_digit_prefix_prb: 0.55,
            domains: [
                "gmail.com",
                "yahoo.com",
                "hotmail.com",
                "outlook.com",
                "proton.me",
                "protonmail.com",
                "icloud.com",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            // Rough market share
            domain_weights: vec![0.598, 0.055, 0.048, 0.048, 0.012, 0.012, 0.227],
            single_char_insertion_prb: 0.55,
            insertion_with_leetspeak_prb: 0.3,
            suffix_weights: [0.6, 0.25, 0.15],
            mutation_count_weights: [0.5, 0.35, 0.15],
            light_duplicate_prb: 0.9,
            light_suffix_prb: 0.9,
            min_username_length: 8,
            min_digits: 0,
            max_digits: 4,
            digit_guard: DigitGuard::Inclusive,
            birth_year_min: 1900,
            birth_year_max: 2025,
            max_attempts: 10_000,
            vowel_map: VowelMap::default(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file and validate them
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            EmailForgeError::io(e.to_string(), Some(path.to_string_lossy().to_string()))
        })?;

        let settings: Settings = serde_json::from_str(&content)
            .map_err(|e| EmailForgeError::parse(e.to_string(), Some(content)))?;
        settings.validate()?;

        tracing::debug!(path = %path.display(), "Loaded settings file");
        Ok(settings)
    }

    /// Load from `EMAIL_FORGE_CONFIG` when set, defaults otherwise
    pub fn from_env() -> Result<Self> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.trim().is_empty() => Self::from_file(Path::new(path.trim())),
            _ => Ok(Self::default()),
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_json_pretty()?;
        std::fs::write(path, content).map_err(|e| {
            EmailForgeError::io(e.to_string(), Some(path.to_string_lossy().to_string()))
        })
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every probability, weight table and bound
    pub fn validate(&self) -> Result<()> {
        let probabilities = [
            ("shorten_prb", self.shorten_prb),
            ("shorten_name_prb", self.shorten_name_prb),
            ("heavy_prb", self.heavy_prb),
            ("separator_prb", self.separator_prb),
            ("prefix_prb", self.prefix_prb),
            ("single_digit_prefix_prb", self.single_digit_prefix_prb),
            ("single_char_insertion_prb", self.single_char_insertion_prb),
            ("insertion_with_leetspeak_prb", self.insertion_with_leetspeak_prb),
            ("light_duplicate_prb", self.light_duplicate_prb),
            ("light_suffix_prb", self.light_suffix_prb),
        ];
        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(config_error!("{} must be within [0, 1], got {}", name, value));
            }
        }

        validate_weights("separator_weights", &self.separator_weights)?;
        validate_weights("suffix_weights", &self.suffix_weights)?;
        validate_weights("mutation_count_weights", &self.mutation_count_weights)?;
        validate_weights("domain_weights", &self.domain_weights)?;

        if self.domains.is_empty() {
            return Err(config_error!("at least one domain is required"));
        }
        if self.domains.len() != self.domain_weights.len() {
            return Err(config_error!(
                "{} domains but {} domain weights",
                self.domains.len(),
                self.domain_weights.len()
            ));
        }
        if let Some(bad) = self.domains.iter().find(|d| d.is_empty() || d.contains('@')) {
            return Err(config_error!("invalid domain '{}'", bad));
        }

        if self.min_digits > self.max_digits {
            return Err(config_error!(
                "min_digits ({}) exceeds max_digits ({})",
                self.min_digits,
                self.max_digits
            ));
        }
        if self.birth_year_min > self.birth_year_max {
            return Err(config_error!(
                "birth_year_min ({}) exceeds birth_year_max ({})",
                self.birth_year_min,
                self.birth_year_max
            ));
        }
        if self.max_attempts == 0 {
            return Err(config_error!("max_attempts must be at least 1"));
        }
        if self.vowel_map.iter().any(|(from, to)| from == '@' || to == '@') {
            return Err(config_error!("vowel_map may not involve '@'"));
        }

        Ok(())
    }
}

fn validate_weights(name: &str, weights: &[f64]) -> Result<()> {
    if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
        return Err(config_error!("{} must be finite and non-negative", name));
    }
    if weights.iter().sum::<f64>() <= 0.0 {
        return Err(config_error!("{} must have a positive sum", name));
    }
    Ok(())
}
