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
// Pronounceable password generator built from phonetic fragments.
//
// The random source is a general-purpose PRNG, not a CSPRNG.

pub mod configtool;
pub mod passgen;
pub mod phonemes;

pub use configtool::{ConfigError, PwGenOptions};
pub use passgen::{FeatureFlags, GenMode, GenerationConfig, Generated, PhonemeComposer, PwGen};
pub use phonemes::{ElementFlags, PhonemeTable, PhoneticElement};
