//  ____   ____              ____
// |  _ \ |  _ \ __      __ / ___|  ___  _ __
// | |_) || |_) |\ \ /\ / /| |  _  / _ \| '_ \
// |  _ < |  __/  \ V  V / | |_| ||  __/| | | |
// |_| \_\|_|      \_/\_/   \____| \___||_| |_|
//
// Author : Sidney Zhang <zly@lyzhang.me>
// Date : 2025-08-04
// Version : 0.1.0
// License : Mulan PSL v2
//
// Pronounceable password generator

use bitflags::bitflags;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

use crate::configtool::{ConfigError, PwGenOptions};
use crate::phonemes::{ElementFlags, PhonemeTable, PhoneticElement, contains_ambiguous};

bitflags! {
    /// Features requested for a generated password.
    #[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FeatureFlags: u8 {
        /// At least one digit.
        const DIGITS    = 0b00001;
        /// At least one uppercase letter.
        const UPPERS    = 0b00010;
        /// At least one symbol.
        const SYMBOLS   = 0b00100;
        /// Never emit characters from the ambiguous set.
        const AMBIGUOUS = 0b01000;
        /// No vowels, only honoured by the fully random mode.
        const NO_VOWELS = 0b10000;

        /// Features that must actually be injected before a
        /// candidate is accepted.
        const REQUIRED = Self::DIGITS.bits() | Self::UPPERS.bits() | Self::SYMBOLS.bits();
    }
}

/// Target length and feature flags for one generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationConfig {
    length: usize,
    flags: FeatureFlags,
}

impl GenerationConfig {
    /// Validates the length and drops requirements that a password of
    /// this length can never satisfy. Digits and symbols are only placed
    /// after a non-first element with room left behind it, so each needs
    /// three characters and both together need five; uppercase is not
    /// enforced below three characters.
    pub fn new(length: usize, flags: FeatureFlags) -> Result<Self, ConfigError> {
        if length == 0 {
            return Err(ConfigError::InvalidLength(length));
        }
        Ok(Self::clamped(length, flags))
    }

    /// `length` must be positive.
    pub(crate) fn clamped(length: usize, mut flags: FeatureFlags) -> Self {
        if length <= 2 {
            flags.remove(FeatureFlags::REQUIRED);
        } else if length < 5 && flags.contains(FeatureFlags::DIGITS | FeatureFlags::SYMBOLS) {
            flags.remove(FeatureFlags::SYMBOLS);
        }
        Self { length, flags }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn flags(&self) -> FeatureFlags {
        self.flags
    }
}

/// Where the selection state machine stands before drawing the next element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Seeking {
    /// First element of the attempt.
    Start { want: ElementFlags },
    /// First element after an injected digit.
    AfterDigit { want: ElementFlags },
    /// Mid-word, following an element flagged `prev`.
    Following { want: ElementFlags, prev: ElementFlags },
}

impl Seeking {
    fn want(self) -> ElementFlags {
        match self {
            Seeking::Start { want } | Seeking::AfterDigit { want } | Seeking::Following { want, .. } => want,
        }
    }

    fn prev(self) -> ElementFlags {
        match self {
            Seeking::Following { prev, .. } => prev,
            _ => ElementFlags::empty(),
        }
    }

    fn is_first(self) -> bool {
        !matches!(self, Seeking::Following { .. })
    }

    /// Class, word-start and vowel-run rules.
    fn admits(self, element: &PhoneticElement) -> bool {
        if !element.flags.intersects(self.want()) {
            return false;
        }
        if self.is_first() && element.is_not_first() {
            return false;
        }
        // 元音之后不接元音双字母
        !(self.prev().contains(ElementFlags::VOWEL) && element.is_vowel() && element.is_diphthong())
    }
}

/// One pass from an empty buffer to a full one.
struct Attempt {
    buf: Vec<char>,
    missing: FeatureFlags,
    seeking: Seeking,
}

/// Builds pronounceable passwords from a [`PhonemeTable`].
pub struct PhonemeComposer<'t, R: Rng> {
    table: &'t PhonemeTable,
    rng: R,
}

impl<'t, R: Rng> PhonemeComposer<'t, R> {
    pub fn new(table: &'t PhonemeTable, rng: R) -> Self {
        Self { table, rng }
    }

    /// Produces one password of exactly `config.length()` characters.
    ///
    /// Candidates missing a required feature are discarded and rebuilt
    /// from scratch, so this loops until every requirement is met.
    pub fn compose(&mut self, config: &GenerationConfig) -> String {
        let mut attempts: u32 = 0;
        loop {
            attempts += 1;
            let attempt = self.run_attempt(config);
            let missing = attempt.missing & FeatureFlags::REQUIRED;
            if missing.is_empty() {
                debug!(length = config.length(), attempts, "composed phonemic password");
                return attempt.buf.into_iter().collect();
            }
            trace!(attempt = attempts, ?missing, "discarding candidate");
        }
    }

    fn run_attempt(&mut self, config: &GenerationConfig) -> Attempt {
        let length = config.length();
        let flags = config.flags();
        let avoid_ambiguous = flags.contains(FeatureFlags::AMBIGUOUS);
        let mut attempt = Attempt {
            buf: Vec::with_capacity(length),
            missing: flags & FeatureFlags::REQUIRED,
            seeking: Seeking::Start { want: self.roll_class() },
        };

        while attempt.buf.len() < length {
            let element = self.draw_element(attempt.seeking, length - attempt.buf.len(), avoid_ambiguous);
            let start = attempt.buf.len();
            attempt.buf.extend(element.text.chars());

            if flags.contains(FeatureFlags::UPPERS)
                && (attempt.seeking.is_first() || element.is_consonant())
                && self.chance(2)
            {
                let upper = attempt.buf[start].to_ascii_uppercase();
                if !(avoid_ambiguous && self.table.is_ambiguous(upper)) {
                    attempt.buf[start] = upper;
                    attempt.missing.remove(FeatureFlags::UPPERS);
                }
            }

            if attempt.buf.len() >= length {
                break;
            }

            let first = attempt.seeking.is_first();
            if flags.contains(FeatureFlags::DIGITS) && !first && self.chance(3) {
                let digit = self.draw_char(self.table.digit_alphabet(), avoid_ambiguous);
                attempt.buf.push(digit);
                attempt.missing.remove(FeatureFlags::DIGITS);
                attempt.seeking = Seeking::AfterDigit { want: self.roll_class() };
                continue;
            }

            if flags.contains(FeatureFlags::SYMBOLS) && !first && self.chance(2) {
                let symbol = self.draw_char(self.table.symbol_alphabet(), avoid_ambiguous);
                attempt.buf.push(symbol);
                attempt.missing.remove(FeatureFlags::SYMBOLS);
            }

            attempt.seeking = self.advance(attempt.seeking, element.flags);
        }

        attempt
    }

    fn draw_element(&mut self, seeking: Seeking, room: usize, avoid_ambiguous: bool) -> PhoneticElement {
        let elements = self.table.elements();
        loop {
            let element = *elements.choose(&mut self.rng).expect("phoneme table is never empty");
            if !seeking.admits(&element) || element.len() > room {
                continue;
            }
            if avoid_ambiguous && contains_ambiguous(element.text) {
                continue;
            }
            return element;
        }
    }

    fn draw_char(&mut self, alphabet: &[char], avoid_ambiguous: bool) -> char {
        loop {
            let c = *alphabet.choose(&mut self.rng).expect("alphabets are never empty");
            if !(avoid_ambiguous && self.table.is_ambiguous(c)) {
                return c;
            }
        }
    }

    fn advance(&mut self, seeking: Seeking, flags: ElementFlags) -> Seeking {
        let want = if seeking.want() == ElementFlags::CONSONANT {
            ElementFlags::VOWEL
        } else if seeking.prev().contains(ElementFlags::VOWEL)
            || flags.contains(ElementFlags::DIPHTHONG)
            || self.rng.gen_range(0..10) > 3
        {
            ElementFlags::CONSONANT
        } else {
            ElementFlags::VOWEL
        };
        Seeking::Following { want, prev: flags }
    }

    fn roll_class(&mut self) -> ElementFlags {
        if self.rng.gen_bool(0.5) {
            ElementFlags::VOWEL
        } else {
            ElementFlags::CONSONANT
        }
    }

    /// `tenths` in ten.
    fn chance(&mut self, tenths: u32) -> bool {
        self.rng.gen_range(0..10) < tenths
    }
}

impl PhonemeComposer<'static, SmallRng> {
    /// Composer with a fresh, OS-seeded non-cryptographic generator.
    pub fn from_entropy() -> Self {
        Self::new(PhonemeTable::standard(), SmallRng::from_entropy())
    }
}

impl PhonemeComposer<'static, ChaCha8Rng> {
    /// Reproducible composer: same seed, same passwords.
    pub fn seeded(seed: u64) -> Self {
        Self::new(PhonemeTable::standard(), ChaCha8Rng::seed_from_u64(seed))
    }
}

/// Which generator a [`PwGen`] routes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenMode {
    Phonemic,
    /// Completely random characters. Not implemented.
    FullyRandom,
}

/// Outcome of [`PwGen::calculate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generated {
    Phonemic(String),
    /// The fully random generator was selected; it produces no password.
    FullyRandom,
}

impl Generated {
    pub fn into_password(self) -> Option<String> {
        match self {
            Generated::Phonemic(password) => Some(password),
            Generated::FullyRandom => None,
        }
    }
}

/// Password generator configured from [`PwGenOptions`].
#[derive(Debug, Clone)]
pub struct PwGen {
    mode: GenMode,
    config: GenerationConfig,
}

impl PwGen {
    pub fn new(options: &PwGenOptions) -> Self {
        let (mode, config) = options.normalize();
        Self { mode, config }
    }

    pub fn mode(&self) -> GenMode {
        self.mode
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn calculate(&self) -> Generated {
        self.calculate_with(&mut SmallRng::from_entropy())
    }

    pub fn calculate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Generated {
        match self.mode {
            GenMode::Phonemic => {
                let mut composer = PhonemeComposer::new(PhonemeTable::standard(), rng);
                Generated::Phonemic(composer.compose(&self.config))
            }
            GenMode::FullyRandom => {
                debug!("fully random generation requested");
                Generated::FullyRandom
            }
        }
    }
}
