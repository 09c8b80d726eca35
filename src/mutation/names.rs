//! Name-level mutations: surname parsing, shortening, letter duplication

use rand::Rng;

use super::chance;
use crate::settings::Settings;
use crate::types::{Mutated, NamePair};

/// Joiners used when all surname parts are kept
const SURNAME_JOINERS: [&str; 3] = ["", "_", "."];

/// Reduce a multi-part surname to a single token.
///
/// Uniformly keeps the first part, keeps the second part, or joins every part
/// with one of `""`, `_` or `.`. Single-part surnames are returned as-is.
pub fn parse_surname<R: Rng + ?Sized>(surname: &str, rng: &mut R) -> String {
    let parts: Vec<&str> = surname.split_whitespace().collect();
    if parts.len() < 2 {
        return surname.trim().to_string();
    }

    let joiner = SURNAME_JOINERS[rng.gen_range(0..SURNAME_JOINERS.len())];
    match rng.gen_range(0..3) {
        0 => parts[0].to_string(),
        1 => parts[1].to_string(),
        _ => parts.join(joiner),
    }
}

/// Shorten either the name or the surname.
///
/// A name becomes its first letter or its first `len/2 + 1` or `len/3 + 1`
/// letters; a surname its first letter or its first `len/2 + 1` letters.
pub fn shorten<R: Rng + ?Sized>(pair: &NamePair, settings: &Settings, rng: &mut R) -> NamePair {
    let mut shortened = pair.clone();
    if chance(rng, settings.shorten_name_prb) {
        shortened.name = if rng.gen::<bool>() {
            take_chars(&pair.name, 1)
        } else {
            let divisor = if rng.gen::<bool>() { 2 } else { 3 };
            take_chars(&pair.name, pair.name.chars().count() / divisor + 1)
        };
    } else {
        shortened.surname = if rng.gen::<bool>() {
            take_chars(&pair.surname, 1)
        } else {
            take_chars(&pair.surname, pair.surname.chars().count() / 2 + 1)
        };
    }
    shortened
}

/// Duplicate one random letter of either the name or the surname (50/50)
pub fn duplicate_letter<R: Rng + ?Sized>(pair: &NamePair, rng: &mut R) -> Mutated<NamePair> {
    let mut result = pair.clone();
    let target = if rng.gen::<bool>() {
        &mut result.name
    } else {
        &mut result.surname
    };

    let len = target.chars().count();
    if len == 0 {
        return Mutated::unchanged(result);
    }

    let idx = rng.gen_range(0..len);
    *target = duplicate_at(target, idx);
    Mutated::changed(result)
}

/// Insert a copy of the character at `idx` right after it
pub fn duplicate_at(s: &str, idx: usize) -> String {
    let mut out = String::with_capacity(s.len() + 1);
    for (i, c) in s.chars().enumerate() {
        out.push(c);
        if i == idx {
            out.push(c);
        }
    }
    out
}

fn take_chars(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_parse_surname_outcomes() {
        let allowed = ["doe", "cari", "doe_cari", "doe.cari", "doecari"];
        let mut rng = StdRng::seed_from_u64(21);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            let parsed = parse_surname("doe cari", &mut rng);
            assert!(allowed.contains(&parsed.as_str()), "unexpected {}", parsed);
            seen.insert(parsed);
        }
        assert_eq!(seen.len(), allowed.len());
    }

    #[test]
    fn test_parse_surname_three_parts() {
        let mut rng = StdRng::seed_from_u64(22);
        for _ in 0..200 {
            let parsed = parse_surname("de la cruz", &mut rng);
            assert!(["de", "la", "delacruz", "de_la_cruz", "de.la.cruz"].contains(&parsed.as_str()));
        }
    }

    #[test]
    fn test_parse_surname_single_part() {
        let mut rng = StdRng::seed_from_u64(23);
        assert_eq!(parse_surname("doe", &mut rng), "doe");
    }

    #[test]
    fn test_shorten_name_only() {
        let settings = Settings {
            shorten_name_prb: 1.0,
            ..Default::default()
        };
        let pair = NamePair::new("maria", "carreras");
        let mut rng = StdRng::seed_from_u64(24);
        for _ in 0..200 {
            let short = shorten(&pair, &settings, &mut rng);
            assert_eq!(short.surname, "carreras");
            // 1 char, 5/2+1 = 3 chars or 5/3+1 = 2 chars
            assert!(["m", "mar", "ma"].contains(&short.name.as_str()), "{}", short.name);
        }
    }

    #[test]
    fn test_shorten_surname_only() {
        let settings = Settings {
            shorten_name_prb: 0.0,
            ..Default::default()
        };
        let pair = NamePair::new("maria", "carreras");
        let mut rng = StdRng::seed_from_u64(25);
        for _ in 0..200 {
            let short = shorten(&pair, &settings, &mut rng);
            assert_eq!(short.name, "maria");
            assert!(["c", "carre"].contains(&short.surname.as_str()), "{}", short.surname);
        }
    }

    #[test]
    fn test_duplicate_at() {
        assert_eq!(duplicate_at("doe", 1), "dooe");
        assert_eq!(duplicate_at("doe", 0), "ddoe");
        assert_eq!(duplicate_at("doe", 2), "doee");
        assert_eq!(duplicate_at("doe", 9), "doe");
    }

    #[test]
    fn test_duplicate_letter_grows_one_side() {
        let pair = NamePair::new("john", "doe");
        let mut rng = StdRng::seed_from_u64(26);
        for _ in 0..200 {
            let out = duplicate_letter(&pair, &mut rng);
            assert!(out.applied);
            let grown = out.value.name.len() + out.value.surname.len();
            assert_eq!(grown, 8);
            assert!(out.value.name == "john" || out.value.surname == "doe");
        }
    }

    #[test]
    fn test_duplicate_letter_empty_side() {
        let pair = NamePair::new("", "");
        let mut rng = StdRng::seed_from_u64(27);
        let out = duplicate_letter(&pair, &mut rng);
        assert!(!out.applied);
        assert_eq!(out.value, pair);
    }
}
