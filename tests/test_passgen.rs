use rpwgen::passgen::*;
use rpwgen::configtool::{ConfigError, PwGenOptions};
use rpwgen::phonemes::{is_ambiguous, SYMBOLS};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[cfg(test)]
mod tests {
    use super::*;

    const TRIALS: usize = 500;

    fn config(length: usize, flags: FeatureFlags) -> GenerationConfig {
        GenerationConfig::new(length, flags).unwrap()
    }

    fn samples(seed: u64, length: usize, flags: FeatureFlags, count: usize) -> Vec<String> {
        let mut composer = PhonemeComposer::seeded(seed);
        let config = config(length, flags);
        (0..count).map(|_| composer.compose(&config)).collect()
    }

    #[test]
    fn test_compose_exact_length() {
        let combos = [
            FeatureFlags::empty(),
            FeatureFlags::UPPERS,
            FeatureFlags::DIGITS,
            FeatureFlags::SYMBOLS,
            FeatureFlags::UPPERS | FeatureFlags::DIGITS,
            FeatureFlags::REQUIRED,
            FeatureFlags::REQUIRED | FeatureFlags::AMBIGUOUS,
        ];
        let mut composer = PhonemeComposer::seeded(7);
        for length in 1..=24 {
            for flags in combos {
                let config = config(length, flags);
                for _ in 0..20 {
                    let password = composer.compose(&config);
                    assert_eq!(password.chars().count(), length, "{:?} {:?}", password, flags);
                }
            }
        }
    }

    #[test]
    fn test_compose_contains_uppercase() {
        for password in samples(1, 6, FeatureFlags::UPPERS, TRIALS) {
            assert!(password.chars().any(|c| c.is_ascii_uppercase()), "{}", password);
        }
    }

    #[test]
    fn test_compose_contains_digit() {
        for password in samples(2, 5, FeatureFlags::DIGITS, TRIALS) {
            assert!(password.chars().any(|c| c.is_ascii_digit()), "{}", password);
        }
    }

    #[test]
    fn test_compose_contains_symbol() {
        for password in samples(3, 10, FeatureFlags::SYMBOLS, TRIALS) {
            assert!(password.chars().any(|c| SYMBOLS.contains(&c)), "{}", password);
        }
    }

    #[test]
    fn test_compose_avoids_ambiguous() {
        let flags = FeatureFlags::REQUIRED | FeatureFlags::AMBIGUOUS;
        for password in samples(4, 12, flags, TRIALS) {
            assert!(!password.chars().any(is_ambiguous), "{}", password);
        }
    }

    #[test]
    fn test_compose_never_starts_with_not_first_element() {
        for password in samples(5, 8, FeatureFlags::UPPERS | FeatureFlags::DIGITS, 2000) {
            let lower = password.to_ascii_lowercase();
            assert!(!lower.starts_with("gh"), "{}", password);
            assert!(!lower.starts_with("ng"), "{}", password);
        }
    }

    #[test]
    fn test_compose_vowel_runs_and_word_restarts() {
        // 元音之后不接元音双字母；数字之后重新开始，不能接 gh/ng
        for password in samples(12, 16, FeatureFlags::REQUIRED, 5000) {
            let lower: Vec<char> = password.to_ascii_lowercase().chars().collect();
            for (i, run) in lower.windows(3).enumerate() {
                if run.iter().all(|c| "aeiou".contains(*c)) {
                    assert!(i > 0 && lower[i - 1] == 'q' && run[0] == 'u', "{}", password);
                }
            }
            for (i, c) in lower.iter().enumerate() {
                if c.is_ascii_digit() {
                    let rest: String = lower[i + 1..].iter().collect();
                    assert!(!rest.starts_with("gh"), "{}", password);
                    assert!(!rest.starts_with("ng"), "{}", password);
                }
            }
        }
    }

    #[test]
    fn test_compose_starts_with_letter() {
        // 数字和符号只会插在非首个音素之后
        for password in samples(6, 9, FeatureFlags::REQUIRED, TRIALS) {
            let first = password.chars().next().unwrap();
            assert!(first.is_ascii_alphabetic(), "{}", password);
        }
    }

    #[test]
    fn test_compose_injections_never_adjacent() {
        for password in samples(8, 16, FeatureFlags::REQUIRED, TRIALS) {
            let chars: Vec<char> = password.chars().collect();
            for pair in chars.windows(2) {
                assert!(
                    pair[0].is_ascii_alphabetic() || pair[1].is_ascii_alphabetic(),
                    "{}",
                    password
                );
            }
        }
    }

    #[test]
    fn test_compose_plain_is_lowercase_letters() {
        for password in samples(9, 14, FeatureFlags::empty(), TRIALS) {
            assert!(password.chars().all(|c| c.is_ascii_lowercase()), "{}", password);
        }
    }

    #[test]
    fn test_compose_length_eight_uppers_and_digits() {
        let results = samples(10, 8, FeatureFlags::UPPERS | FeatureFlags::DIGITS, 1000);
        let with_upper = results.iter().filter(|p| p.chars().any(|c| c.is_ascii_uppercase())).count();
        let with_digit = results.iter().filter(|p| p.chars().any(|c| c.is_ascii_digit())).count();
        assert!(results.iter().all(|p| p.len() == 8));
        assert!(with_upper > 900);
        assert!(with_digit > 900);
    }

    #[test]
    fn test_seeded_composer_is_deterministic() {
        let flags = FeatureFlags::REQUIRED;
        assert_eq!(samples(42, 10, flags, 50), samples(42, 10, flags, 50));
        assert_ne!(samples(42, 10, flags, 50), samples(43, 10, flags, 50));
    }

    #[test]
    fn test_config_rejects_zero_length() {
        let result = GenerationConfig::new(0, FeatureFlags::empty());
        assert!(matches!(result, Err(ConfigError::InvalidLength(0))));
    }

    #[test]
    fn test_config_clears_unreachable_features() {
        let short = config(2, FeatureFlags::REQUIRED | FeatureFlags::AMBIGUOUS);
        assert_eq!(short.flags(), FeatureFlags::AMBIGUOUS);

        let three = config(3, FeatureFlags::DIGITS | FeatureFlags::UPPERS);
        assert_eq!(three.flags(), FeatureFlags::DIGITS | FeatureFlags::UPPERS);
        assert_eq!(three.length(), 3);

        // 数字和符号同时要求时至少需要五个字符
        let four = config(4, FeatureFlags::REQUIRED);
        assert_eq!(four.flags(), FeatureFlags::DIGITS | FeatureFlags::UPPERS);
        let four_symbols = config(4, FeatureFlags::SYMBOLS);
        assert_eq!(four_symbols.flags(), FeatureFlags::SYMBOLS);

        let five = config(5, FeatureFlags::REQUIRED);
        assert_eq!(five.flags(), FeatureFlags::REQUIRED);
    }

    #[test]
    fn test_compose_short_lengths_terminate() {
        let mut composer = PhonemeComposer::seeded(11);
        for length in 1..=6 {
            let config = config(length, FeatureFlags::REQUIRED);
            for _ in 0..100 {
                assert_eq!(composer.compose(&config).len(), length);
            }
        }
    }

    #[test]
    fn test_pwgen_length_one_is_single_lowercase_letter() {
        let pwgen = PwGen::new(&PwGenOptions::with_length(1));
        assert!(pwgen.config().flags().is_empty());
        for _ in 0..50 {
            let password = pwgen.calculate().into_password().unwrap();
            assert_eq!(password.len(), 1);
            assert!(password.chars().all(|c| c.is_ascii_lowercase()));
        }
    }

    #[test]
    fn test_pwgen_default_password() {
        let pwgen = PwGen::new(&PwGenOptions::default());
        assert_eq!(pwgen.mode(), GenMode::Phonemic);
        let password = match pwgen.calculate() {
            Generated::Phonemic(password) => password,
            Generated::FullyRandom => panic!("expected a phonemic password"),
        };
        assert_eq!(password.len(), 8);
        assert!(password.chars().any(|c| c.is_ascii_uppercase()));
        assert!(password.chars().any(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_pwgen_calculate_with_seeded_rng() {
        let pwgen = PwGen::new(&PwGenOptions { symbols: true, ..PwGenOptions::with_length(12) });
        let first = pwgen.calculate_with(&mut ChaCha8Rng::seed_from_u64(99));
        let second = pwgen.calculate_with(&mut ChaCha8Rng::seed_from_u64(99));
        assert_eq!(first, second);
        let password = first.into_password().unwrap();
        assert!(password.chars().any(|c| SYMBOLS.contains(&c)));
    }

    #[test]
    fn test_pwgen_fully_random_yields_no_password() {
        let secure = PwGen::new(&PwGenOptions { secure: true, ..Default::default() });
        assert_eq!(secure.mode(), GenMode::FullyRandom);
        assert_eq!(secure.calculate(), Generated::FullyRandom);
        assert_eq!(secure.calculate().into_password(), None);

        let no_vowels = PwGen::new(&PwGenOptions { no_vowels: true, ..Default::default() });
        assert_eq!(no_vowels.calculate(), Generated::FullyRandom);
    }
}
