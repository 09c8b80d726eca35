//! Mutation library - string and name transformations
//!
//! Every function takes the settings and an injected random source and returns a
//! fresh value. Steps that may or may not fire return [`Mutated`] so the caller
//! can record what actually happened.
//!
//! Structure: separator, domain and mutation-set selection
//! Names: surname parsing, shortening, letter duplication
//! Text: symbol insertion, vowel drop, leetspeak
//! Digits: prefix and suffix generation

mod digits;
mod names;
mod structure;
mod text;

pub use digits::{append_digits, prepend_digits, suffix_with_style, SuffixStyle};
pub use names::{duplicate_at, duplicate_letter, parse_surname, shorten};
pub use structure::{domain, mutation_set, separator, SEPARATORS};
pub use text::{
    drop_vowels, drop_vowels_in, insert_at, insert_symbol, leetspeak, translate_all,
    DOUBLED_JUNK, JUNK_CHARS,
};

pub use crate::types::Mutated;

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use crate::config_error;
use crate::error::Result;

/// `true` with probability `p`
pub(crate) fn chance<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    rng.gen::<f64>() < p
}

/// Index drawn according to `weights`
pub(crate) fn weighted_index<R: Rng + ?Sized>(
    rng: &mut R,
    weights: &[f64],
    what: &str,
) -> Result<usize> {
    let dist = WeightedIndex::new(weights)
        .map_err(|e| config_error!("invalid {} weights: {}", what, e))?;
    Ok(dist.sample(rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_chance_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!((0..100).all(|_| !chance(&mut rng, 0.0)));
        assert!((0..100).all(|_| chance(&mut rng, 1.0)));
    }

    #[test]
    fn test_weighted_index_skips_zero_weights() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..200 {
            assert_eq!(weighted_index(&mut rng, &[0.0, 1.0, 0.0], "test").unwrap(), 1);
        }
        assert!(weighted_index(&mut rng, &[], "empty").is_err());
    }
}
