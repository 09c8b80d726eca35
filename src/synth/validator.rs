//! Name validation at the synthesizer boundary

use crate::error::{EmailForgeError, Result};
use crate::types::NamePair;
use crate::validation_error;
use regex::Regex;

/// Name validator
pub struct NameValidator {
    name_pattern: Regex,
    surname_pattern: Regex,
}

impl NameValidator {
    /// Create a new name validator
    pub fn new() -> Result<Self> {
        let name_pattern =
            Regex::new(r"^[a-z]+$").map_err(|e| EmailForgeError::internal(e.to_string()))?;
        let surname_pattern = Regex::new(r"^[a-z]+( [a-z]+)*$")
            .map_err(|e| EmailForgeError::internal(e.to_string()))?;

        Ok(Self {
            name_pattern,
            surname_pattern,
        })
    }

    /// Validate and normalize a name pair.
    ///
    /// Both parts are lowercased and trimmed; whitespace runs in the surname
    /// collapse to single spaces.
    pub fn validate(&self, name: &str, last_name: &str) -> Result<NamePair> {
        let name = name.trim().to_lowercase();
        let surname = last_name
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        if name.is_empty() {
            return Err(validation_error!("First name cannot be empty"));
        }
        if surname.is_empty() {
            return Err(validation_error!("Last name cannot be empty"));
        }

        if !self.name_pattern.is_match(&name) {
            return Err(validation_error!(
                "First name '{}' must contain ASCII letters only",
                name
            ));
        }
        if !self.surname_pattern.is_match(&surname) {
            return Err(validation_error!(
                "Last name '{}' must contain ASCII letters and spaces only",
                surname
            ));
        }

        Ok(NamePair::new(name, surname))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_case_and_spaces() {
        let validator = NameValidator::new().unwrap();
        let pair = validator.validate("  Maria ", "De  La   Cruz").unwrap();
        assert_eq!(pair.name, "maria");
        assert_eq!(pair.surname, "de la cruz");
    }

    #[test]
    fn test_rejects_invalid() {
        let validator = NameValidator::new().unwrap();
        assert!(validator.validate("", "doe").is_err());
        assert!(validator.validate("john", "   ").is_err());
        assert!(validator.validate("j0hn", "doe").is_err());
        assert!(validator.validate("john doe", "smith").is_err());
        assert!(validator.validate("maría", "doe").is_err());
        assert!(validator.validate("john", "o'neil").is_err());
    }

    #[test]
    fn test_error_kind() {
        let validator = NameValidator::new().unwrap();
        let err = validator.validate("john", "d0e").unwrap_err();
        assert!(matches!(err, EmailForgeError::Validation { .. }));
        assert!(err.to_string().contains("d0e"));
    }
}
