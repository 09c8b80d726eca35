//! Email synthesizer - the retry loop around the mutation pipeline

use std::sync::Arc;

use rand::Rng;

use super::validator::NameValidator;
use crate::error::{EmailForgeError, Result};
use crate::mutation::{self, chance, Mutated};
use crate::settings::Settings;
use crate::types::{
    count_digits, AppliedMutation, MutationKind, MutationReport, MutationSet, NamePair,
    SynthesisPath, SynthesizedEmail,
};

/// Synthesizes emails from name pairs.
///
/// Holds only read-only state, so one instance can be shared across threads;
/// every call takes its own random source.
#[derive(Clone)]
pub struct EmailSynthesizer {
    settings: Arc<Settings>,
    validator: Arc<NameValidator>,
}

impl EmailSynthesizer {
    /// Create a synthesizer from validated settings
    pub fn new(settings: Settings) -> Result<Self> {
        Self::with_shared(Arc::new(settings))
    }

    /// Create a synthesizer sharing an existing settings value
    pub fn with_shared(settings: Arc<Settings>) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            validator: Arc::new(NameValidator::new()?),
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Generate one email for `name` and `last_name`
    pub fn generate_email<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        name: &str,
        last_name: &str,
    ) -> Result<String> {
        self.synthesize(rng, name, last_name).map(|s| s.email)
    }

    /// Generate one email and report how it was produced
    pub fn synthesize<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        name: &str,
        last_name: &str,
    ) -> Result<SynthesizedEmail> {
        let settings = &*self.settings;
        let pair = self.validator.validate(name, last_name)?;

        // Fixed for the whole call; the light path draws its own separator
        let heavy_separator = mutation::separator(settings, rng, true)?;
        let domain = mutation::domain(settings, rng)?;

        for attempt in 1..=settings.max_attempts {
            let scheduled = mutation::mutation_set(settings, rng)?;

            // Every attempt restarts from the validated pair
            let mut current = pair.clone();
            if current.surname.contains(' ') {
                current.surname = mutation::parse_surname(&current.surname, rng);
            }

            let (path, username, report) = if chance(rng, settings.heavy_prb) {
                let (username, report) =
                    self.heavy_username(current, heavy_separator, &scheduled, rng)?;
                (SynthesisPath::Heavy, username, report)
            } else {
                let (username, report) = self.light_username(current, rng)?;
                (SynthesisPath::Light, username, report)
            };

            if self.accepts(&username) {
                tracing::debug!(
                    attempt = %attempt,
                    path = %path,
                    mutations = %report.count(),
                    "Email accepted"
                );
                return Ok(SynthesizedEmail {
                    email: format!("{}@{}", username, domain),
                    username,
                    domain: domain.to_string(),
                    path,
                    mutations: report,
                    attempt,
                });
            }

            tracing::trace!(
                attempt = %attempt,
                username = %username,
                digits = %count_digits(&username),
                "Candidate rejected"
            );
        }

        tracing::warn!(
            name = %pair.name,
            surname = %pair.surname,
            attempts = %settings.max_attempts,
            "No candidate satisfied the constraints"
        );
        Err(EmailForgeError::exhausted(
            pair.name,
            pair.surname,
            settings.max_attempts,
        ))
    }

    /// Length and digit constraints on the username
    pub fn accepts(&self, username: &str) -> bool {
        let settings = &*self.settings;
        username.chars().count() >= settings.min_username_length
            && settings.digit_guard.accepts(
                count_digits(username),
                settings.min_digits,
                settings.max_digits,
            )
    }

    fn heavy_username<R: Rng + ?Sized>(
        &self,
        mut pair: NamePair,
        separator: &str,
        scheduled: &MutationSet,
        rng: &mut R,
    ) -> Result<(String, MutationReport)> {
        let settings = &*self.settings;
        let mut report = MutationReport::new();

        if chance(rng, settings.shorten_prb) {
            pair = mutation::shorten(&pair, settings, rng);
            report.record(AppliedMutation::Shorten, true);
        }

        let mut body = format!("{}{}{}", pair.name, separator, pair.surname);

        if scheduled.contains(MutationKind::SymbolInsertion) {
            let out = mutation::insert_symbol(&body, scheduled, settings, rng);
            body = record(&mut report, MutationKind::SymbolInsertion, out);
        }
        if scheduled.contains(MutationKind::VowelDrop) {
            let out = mutation::drop_vowels(&body, rng);
            body = record(&mut report, MutationKind::VowelDrop, out);
        }
        if scheduled.contains(MutationKind::Leetspeak) {
            let out = mutation::leetspeak(&body, settings, rng);
            body = record(&mut report, MutationKind::Leetspeak, out);
        }

        // A digit prefix on top of leetspeak reads as bot output
        let prefix = if scheduled.contains(MutationKind::DigitPrefix)
            && !scheduled.contains(MutationKind::Leetspeak)
        {
            let out = mutation::prepend_digits(settings, rng);
            record(&mut report, MutationKind::DigitPrefix, out)
        } else {
            String::new()
        };

        // Never hand back the bare name
        let suffix = if scheduled.contains(MutationKind::DigitSuffix) || report.is_empty() {
            let out = mutation::append_digits(settings, rng, true)?;
            record(&mut report, MutationKind::DigitSuffix, out)
        } else {
            String::new()
        };

        Ok((format!("{}{}{}", prefix, body, suffix), report))
    }

    fn light_username<R: Rng + ?Sized>(
        &self,
        mut pair: NamePair,
        rng: &mut R,
    ) -> Result<(String, MutationReport)> {
        let settings = &*self.settings;
        let mut report = MutationReport::new();
        let separator = mutation::separator(settings, rng, false)?;

        if chance(rng, settings.light_duplicate_prb) {
            let out = mutation::duplicate_letter(&pair, rng);
            report.record(AppliedMutation::DuplicateLetter, out.applied);
            pair = out.value;
        }

        if chance(rng, settings.light_suffix_prb) {
            let out = mutation::append_digits(settings, rng, false)?;
            report.record(AppliedMutation::SurnameDigits, out.applied);
            pair.surname.push_str(&out.value);
        }

        Ok((format!("{}{}{}", pair.name, separator, pair.surname), report))
    }
}

fn record(report: &mut MutationReport, kind: MutationKind, out: Mutated<String>) -> String {
    report.record(AppliedMutation::Scheduled(kind), out.applied);
    out.value
}
