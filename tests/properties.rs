//! Property tests over arbitrary name pairs

use email_forge::{EmailSynthesizer, Settings};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_generated_emails_meet_constraints(
        name in "[a-z]{2,12}",
        surname in "[a-z]{2,12}( [a-z]{2,8}){0,2}",
        seed in any::<u64>(),
    ) {
        let settings = Settings::default();
        let synth = EmailSynthesizer::new(settings.clone()).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..20 {
            let out = synth.synthesize(&mut rng, &name, &surname).unwrap();
            prop_assert_eq!(out.email.matches('@').count(), 1);
            prop_assert!(!out.username.contains(' '));
            prop_assert!(out.username.chars().count() >= settings.min_username_length);
            prop_assert!(out.digit_count() <= settings.max_digits);
            prop_assert!(settings.domains.contains(&out.domain));
        }
    }

    #[test]
    fn prop_same_seed_same_email(
        name in "[a-z]{2,12}",
        surname in "[a-z]{2,12}",
        seed in any::<u64>(),
    ) {
        let synth = EmailSynthesizer::new(Settings::default()).unwrap();
        let first = synth.generate_email(&mut StdRng::seed_from_u64(seed), &name, &surname).unwrap();
        let second = synth.generate_email(&mut StdRng::seed_from_u64(seed), &name, &surname).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_non_letters_rejected(
        name in "[a-z]{0,4}[0-9@._-][a-z]{0,4}",
        seed in any::<u64>(),
    ) {
        let synth = EmailSynthesizer::new(Settings::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        prop_assert!(synth.generate_email(&mut rng, &name, "doe").is_err());
    }
}
