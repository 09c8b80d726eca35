//! Email Forge - plausible email addresses from a person's name
//!
//! Combines a name and surname with separators, shortening, symbol
//! insertion, vowel dropping, leetspeak and digit affixes, then retries until
//! the username meets the configured length and digit constraints.

pub mod batch;
pub mod error;
pub mod mutation;
pub mod settings;
pub mod synth;
pub mod types;

// Re-export commonly used types
pub use error::{EmailForgeError, Result};
pub use settings::{DigitGuard, Settings, VowelMap};
pub use types::{
    AppliedMutation, MutationKind, MutationReport, MutationSet, NamePair, SynthesisPath,
    SynthesizedEmail,
};

// Re-export main functionality
pub use batch::{duplicate_proportion, BatchConfig, BatchGenerator, BatchOutput, BatchReport};
pub use synth::EmailSynthesizer;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
pub fn init() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();
    Ok(())
}

/// Generate one email with default settings and the thread-local random source
pub fn generate_email(name: &str, last_name: &str) -> Result<String> {
    let synthesizer = EmailSynthesizer::new(Settings::default())?;
    synthesizer.generate_email(&mut rand::thread_rng(), name, last_name)
}
