//! Digit prefixes and suffixes

use rand::Rng;

use super::{chance, weighted_index};
use crate::error::Result;
use crate::settings::Settings;
use crate::types::Mutated;

/// Kind of digit suffix, in the order of `Settings::suffix_weights`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuffixStyle {
    /// Four-digit year within the configured range
    BirthYear,
    /// One to three digits, each 0-9
    DigitRun,
    /// Two-digit value in 80-99
    EightyNinety,
}

impl SuffixStyle {
    pub const ALL: [SuffixStyle; 3] = [
        SuffixStyle::BirthYear,
        SuffixStyle::DigitRun,
        SuffixStyle::EightyNinety,
    ];
}

/// Maybe produce a digit prefix (1-9 digits only, never a leading zero).
///
/// Counts only when a prefix was produced.
pub fn prepend_digits<R: Rng + ?Sized>(settings: &Settings, rng: &mut R) -> Mutated<String> {
    if !chance(rng, settings.prefix_prb) {
        return Mutated::unchanged(String::new());
    }

    let len = if chance(rng, settings.single_digit_prefix_prb) {
        1
    } else {
        rng.gen_range(1..=2)
    };
    Mutated::changed(digit_run(rng, len, 1))
}

/// Produce a digit suffix. Always counts.
///
/// The heavy path weighs all three styles; otherwise birth year and digit run
/// are equally likely.
pub fn append_digits<R: Rng + ?Sized>(
    settings: &Settings,
    rng: &mut R,
    heavy: bool,
) -> Result<Mutated<String>> {
    let style = if heavy {
        SuffixStyle::ALL[weighted_index(rng, &settings.suffix_weights, "suffix")?]
    } else if rng.gen::<bool>() {
        SuffixStyle::BirthYear
    } else {
        SuffixStyle::DigitRun
    };

    Ok(Mutated::changed(suffix_with_style(style, settings, rng)))
}

/// Digits for one suffix style
pub fn suffix_with_style<R: Rng + ?Sized>(
    style: SuffixStyle,
    settings: &Settings,
    rng: &mut R,
) -> String {
    match style {
        SuffixStyle::BirthYear => rng
            .gen_range(settings.birth_year_min..=settings.birth_year_max)
            .to_string(),
        SuffixStyle::DigitRun => {
            let len = rng.gen_range(1..=3);
            digit_run(rng, len, 0)
        }
        SuffixStyle::EightyNinety => rng.gen_range(80u32..=99).to_string(),
    }
}

fn digit_run<R: Rng + ?Sized>(rng: &mut R, len: usize, lowest: u8) -> String {
    (0..len)
        .map(|_| char::from(b'0' + rng.gen_range(lowest..=9)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_prepend_digits_disabled() {
        let settings = Settings {
            prefix_prb: 0.0,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(41);
        let out = prepend_digits(&settings, &mut rng);
        assert!(!out.applied);
        assert!(out.value.is_empty());
    }

    #[test]
    fn test_prepend_digits_shape() {
        let settings = Settings {
            prefix_prb: 1.0,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let out = prepend_digits(&settings, &mut rng);
            assert!(out.applied);
            assert!((1..=2).contains(&out.value.len()));
            assert!(out.value.chars().all(|c| ('1'..='9').contains(&c)));
        }
    }

    #[test]
    fn test_suffix_styles() {
        let settings = Settings::default();
        let mut rng = StdRng::seed_from_u64(43);
        for _ in 0..300 {
            let year: u32 = suffix_with_style(SuffixStyle::BirthYear, &settings, &mut rng)
                .parse()
                .unwrap();
            assert!((1900..=2025).contains(&year));

            let run = suffix_with_style(SuffixStyle::DigitRun, &settings, &mut rng);
            assert!((1..=3).contains(&run.len()));
            assert!(run.chars().all(|c| c.is_ascii_digit()));

            let short: u32 = suffix_with_style(SuffixStyle::EightyNinety, &settings, &mut rng)
                .parse()
                .unwrap();
            assert!((80..=99).contains(&short));
        }
    }

    #[test]
    fn test_append_digits_always_counts() {
        let settings = Settings::default();
        let mut rng = StdRng::seed_from_u64(44);
        for heavy in [true, false] {
            for _ in 0..200 {
                let out = append_digits(&settings, &mut rng, heavy).unwrap();
                assert!(out.applied);
                assert!((1..=4).contains(&out.value.len()));
            }
        }
    }

    #[test]
    fn test_append_digits_light_never_eighty_ninety_only() {
        // Light suffixes are years (4 digits) or runs (1-3 digits)
        let settings = Settings {
            birth_year_min: 1990,
            birth_year_max: 1990,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(45);
        for _ in 0..200 {
            let out = append_digits(&settings, &mut rng, false).unwrap();
            assert!(out.value == "1990" || out.value.len() <= 3);
        }
    }
}
