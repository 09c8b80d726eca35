//! Character-level mutations on the username body

use rand::Rng;

use super::chance;
use crate::settings::{Settings, VowelMap, VOWELS};
use crate::types::{MutationKind, MutationSet, Mutated};

/// Single characters used as inserted junk
pub const JUNK_CHARS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Doubled-letter tokens used as inserted junk
pub const DOUBLED_JUNK: [&str; 6] = ["xx", "aa", "bb", "yy", "zz", "vv"];

/// Insert one junk token at a random position after the first character.
///
/// When leetspeak is scheduled in the same attempt the insertion only happens
/// with `insertion_with_leetspeak_prb`, and is only counted when it does.
pub fn insert_symbol<R: Rng + ?Sized>(
    text: &str,
    scheduled: &MutationSet,
    settings: &Settings,
    rng: &mut R,
) -> Mutated<String> {
    if text.is_empty() {
        return Mutated::unchanged(String::new());
    }
    if scheduled.contains(MutationKind::Leetspeak)
        && !chance(rng, settings.insertion_with_leetspeak_prb)
    {
        return Mutated::unchanged(text.to_string());
    }

    let len = text.chars().count();
    let pos = rng.gen_range(1..=len);
    let junk = if chance(rng, settings.single_char_insertion_prb) {
        char::from(JUNK_CHARS[rng.gen_range(0..JUNK_CHARS.len())]).to_string()
    } else {
        DOUBLED_JUNK[rng.gen_range(0..DOUBLED_JUNK.len())].to_string()
    };

    Mutated::changed(insert_at(text, pos, &junk))
}

/// Insert `junk` before the character at index `pos` (or at the end)
pub fn insert_at(text: &str, pos: usize, junk: &str) -> String {
    let byte_pos = text
        .char_indices()
        .nth(pos)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    let mut out = String::with_capacity(text.len() + junk.len());
    out.push_str(&text[..byte_pos]);
    out.push_str(junk);
    out.push_str(&text[byte_pos..]);
    out
}

/// Remove vowels from a random non-empty span. Always counts, even when the
/// span held no vowels.
pub fn drop_vowels<R: Rng + ?Sized>(text: &str, rng: &mut R) -> Mutated<String> {
    let len = text.chars().count();
    if len == 0 {
        return Mutated::unchanged(String::new());
    }

    let start = rng.gen_range(0..len);
    let end = rng.gen_range(start + 1..=len);
    Mutated::changed(drop_vowels_in(text, start, end))
}

/// Remove vowels whose char index lies in `[start, end)`
pub fn drop_vowels_in(text: &str, start: usize, end: usize) -> String {
    text.chars()
        .enumerate()
        .filter(|(i, c)| !((start..end).contains(i) && VOWELS.contains(*c)))
        .map(|(_, c)| c)
        .collect()
}

/// Replace vowels with digits.
///
/// Strings longer than five characters only have a half or a third of their
/// positions considered; shorter ones are translated in full.
pub fn leetspeak<R: Rng + ?Sized>(text: &str, settings: &Settings, rng: &mut R) -> Mutated<String> {
    let map = &settings.vowel_map;
    let mut chars: Vec<char> = text.chars().collect();
    let len = chars.len();

    if len <= 5 {
        return Mutated::changed(translate_all(text, map));
    }

    let amount = if rng.gen::<bool>() { len / 2 } else { len / 3 };
    for pos in rand::seq::index::sample(rng, len, amount).iter() {
        if VOWELS.contains(chars[pos]) {
            chars[pos] = map.translate(chars[pos]);
        }
    }

    Mutated::changed(chars.into_iter().collect())
}

/// Translate every mapped character of `text`
pub fn translate_all(text: &str, map: &VowelMap) -> String {
    text.chars().map(|c| map.translate(c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::count_digits;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_insert_at() {
        assert_eq!(insert_at("john", 1, "x"), "jxohn");
        assert_eq!(insert_at("john", 4, "zz"), "johnzz");
        assert_eq!(insert_at("john", 10, "x"), "johnx");
    }

    #[test]
    fn test_insert_symbol_never_at_start() {
        let settings = Settings::default();
        let scheduled = MutationSet::new([MutationKind::SymbolInsertion]);
        let mut rng = StdRng::seed_from_u64(31);
        for _ in 0..500 {
            let out = insert_symbol("john", &scheduled, &settings, &mut rng);
            assert!(out.applied);
            assert!(out.value.starts_with('j'));
            let grown = out.value.len() - 4;
            assert!(grown == 1 || grown == 2);
        }
    }

    #[test]
    fn test_insert_symbol_doubled_junk() {
        let settings = Settings {
            single_char_insertion_prb: 0.0,
            ..Default::default()
        };
        let scheduled = MutationSet::new([MutationKind::SymbolInsertion]);
        let mut rng = StdRng::seed_from_u64(32);
        let out = insert_symbol("ab", &scheduled, &settings, &mut rng);
        assert_eq!(out.value.len(), 4);
        assert!(DOUBLED_JUNK.iter().any(|junk| out.value.contains(junk)));
    }

    #[test]
    fn test_insert_symbol_with_leetspeak() {
        let scheduled = MutationSet::new([MutationKind::SymbolInsertion, MutationKind::Leetspeak]);
        let mut rng = StdRng::seed_from_u64(33);

        let never = Settings {
            insertion_with_leetspeak_prb: 0.0,
            ..Default::default()
        };
        let out = insert_symbol("john", &scheduled, &never, &mut rng);
        assert!(!out.applied);
        assert_eq!(out.value, "john");

        let always = Settings {
            insertion_with_leetspeak_prb: 1.0,
            ..Default::default()
        };
        let out = insert_symbol("john", &scheduled, &always, &mut rng);
        assert!(out.applied);
        assert!(out.value.len() > 4);
    }

    #[test]
    fn test_insert_symbol_empty() {
        let scheduled = MutationSet::new([MutationKind::SymbolInsertion]);
        let mut rng = StdRng::seed_from_u64(34);
        let out = insert_symbol("", &scheduled, &Settings::default(), &mut rng);
        assert!(!out.applied);
        assert!(out.value.is_empty());
    }

    #[test]
    fn test_drop_vowels_in() {
        assert_eq!(drop_vowels_in("john", 1, 4), "jhn");
        assert_eq!(drop_vowels_in("maria_carreras", 0, 5), "mr_carreras");
        assert_eq!(drop_vowels_in("john", 2, 4), "john");
    }

    #[test]
    fn test_drop_vowels_always_counts() {
        let mut rng = StdRng::seed_from_u64(35);
        for _ in 0..200 {
            let out = drop_vowels("mariacarreras", &mut rng);
            assert!(out.applied);
            // Six vowels at most can go
            assert!(out.value.len() <= 13);
            assert!(out.value.len() >= 7);
        }

        let out = drop_vowels("xyz", &mut rng);
        assert!(out.applied);
        assert_eq!(out.value, "xyz");
    }

    #[test]
    fn test_drop_vowels_empty() {
        let mut rng = StdRng::seed_from_u64(36);
        assert!(!drop_vowels("", &mut rng).applied);
    }

    #[test]
    fn test_leetspeak_short_translates_everything() {
        let settings = Settings::default();
        let mut rng = StdRng::seed_from_u64(37);
        let out = leetspeak("apple", &settings, &mut rng);
        assert!(out.applied);
        assert_eq!(out.value, "1ppl2");
        assert_eq!(leetspeak("aeiou", &settings, &mut rng).value, "12345");
    }

    #[test]
    fn test_leetspeak_long_is_partial() {
        let settings = Settings::default();
        let mut rng = StdRng::seed_from_u64(38);
        let text = "aaaaaaaaaaaa";
        for _ in 0..100 {
            let out = leetspeak(text, &settings, &mut rng);
            assert!(out.applied);
            let converted = count_digits(&out.value);
            // 12/2 or 12/3 positions, all of them vowels
            assert!(converted == 6 || converted == 4, "{}", out.value);
            assert!(out.value.chars().all(|c| c == 'a' || c == '1'));
        }
    }

    #[test]
    fn test_leetspeak_leaves_consonants() {
        let settings = Settings::default();
        let mut rng = StdRng::seed_from_u64(39);
        let out = leetspeak("bcdfghjklm", &settings, &mut rng);
        assert_eq!(out.value, "bcdfghjklm");
    }

    #[test]
    fn test_translate_all_custom_map() {
        let map = VowelMap::new([('a', '4'), ('e', '3')]);
        assert_eq!(translate_all("leetspeak", &map), "l33tsp34k");
    }
}
