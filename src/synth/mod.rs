//! Email synthesis
//!
//! Validates the name pair, then retries the heavy or light mutation pipeline
//! until the username meets the configured length and digit constraints.

pub mod synthesizer;
pub mod validator;

// Re-export main functionality
pub use synthesizer::EmailSynthesizer;
pub use validator::NameValidator;
