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
// Phoneme table

use bitflags::bitflags;

bitflags! {
    /// Classification of a phonetic element.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ElementFlags: u8 {
        /// Consonant-like sound (b, ch, th, ...).
        const CONSONANT = 0b0001;
        /// Vowel-like sound (a, ee, oh, ...).
        const VOWEL     = 0b0010;
        /// Multi-letter element.
        const DIPHTHONG = 0b0100;
        /// Must not open a password.
        const NOT_FIRST = 0b1000;
    }
}

/// A short pronounceable unit and its classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhoneticElement {
    pub text: &'static str,
    pub flags: ElementFlags,
}

impl PhoneticElement {
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn is_vowel(&self) -> bool {
        self.flags.contains(ElementFlags::VOWEL)
    }

    pub fn is_consonant(&self) -> bool {
        self.flags.contains(ElementFlags::CONSONANT)
    }

    pub fn is_diphthong(&self) -> bool {
        self.flags.contains(ElementFlags::DIPHTHONG)
    }

    pub fn is_not_first(&self) -> bool {
        self.flags.contains(ElementFlags::NOT_FIRST)
    }
}

// 构建脚本根据 data/phonemes.txt 生成的音素表
include!(concat!(env!("OUT_DIR"), "/phoneme_data.rs"));

/// Characters easily confused with one another when printed.
pub const AMBIGUOUS: &str = "B8G6I1l0OQDS5Z2";

pub const SYMBOLS: [char; 32] = [
    '!', '"', '#', '$', '%', '&', '\'', '(', ')', '*', '+', ',', '-', '.', '/', ':',
    ';', '<', '=', '>', '?', '@', '[', '\\', ']', '^', '_', '`', '{', '|', '}', '~',
];

pub const DIGITS: [char; 10] = ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];

/// The fixed catalog of phonetic elements together with the character
/// classes used to filter and decorate generated passwords.
///
/// There is a single process-wide table, see [`PhonemeTable::standard`].
#[derive(Debug)]
pub struct PhonemeTable {
    elements: &'static [PhoneticElement],
}

static STANDARD_TABLE: PhonemeTable = PhonemeTable { elements: &ELEMENTS };

impl PhonemeTable {
    pub fn standard() -> &'static PhonemeTable {
        &STANDARD_TABLE
    }

    /// Elements in catalog order.
    pub fn elements(&self) -> &[PhoneticElement] {
        self.elements
    }

    pub fn is_ambiguous(&self, c: char) -> bool {
        is_ambiguous(c)
    }

    pub fn symbol_alphabet(&self) -> &'static [char] {
        &SYMBOLS
    }

    pub fn digit_alphabet(&self) -> &'static [char] {
        &DIGITS
    }
}

pub fn is_ambiguous(c: char) -> bool {
    AMBIGUOUS.contains(c)
}

/// Whether any character of `text` is ambiguous.
pub fn contains_ambiguous(text: &str) -> bool {
    text.chars().any(is_ambiguous)
}
