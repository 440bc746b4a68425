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
// Config Tools

use serde::{Serialize, Deserialize};
use serde_json;
use std::{fmt, fs, path::{Path, PathBuf}};
use dirs::config_dir;
use tracing::{debug, info, warn};

use crate::passgen::{FeatureFlags, GenMode, GenerationConfig};

pub const DEFAULT_LENGTH: usize = 8;

const OPTIONS_FILE: &str = "options.json";

#[derive(Debug)]
pub enum ConfigError {
    InvalidLength(usize),
    IoError(std::io::Error),
    JsonError(serde_json::Error),
    ConfigDirError(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidLength(len) => write!(f, "Invalid password length: {}", len),
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::JsonError(e) => write!(f, "JSON error: {}", e),
            ConfigError::ConfigDirError(msg) => write!(f, "Config directory error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError(e) => Some(e),
            ConfigError::JsonError(e) => Some(e),
            _ => None,
        }
    }
}

/// Generator switches, as accepted by [`crate::passgen::PwGen::new`] and
/// stored in the options file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PwGenOptions {
    /// Password length; 0 falls back to [`DEFAULT_LENGTH`].
    pub length: usize,
    /// Don't include digits.
    pub no_numerals: bool,
    /// Don't include capital letters.
    pub no_capitalize: bool,
    /// Don't use characters that are easily confused when printed,
    /// such as 'l' and '1' or '0' and 'O'.
    pub avoid_ambiguous: bool,
    /// Include at least one capital letter.
    pub capitalize: bool,
    /// Include at least one digit.
    pub numerals: bool,
    /// Completely random, hard-to-memorize passwords.
    pub secure: bool,
    /// Random passwords without vowels.
    pub no_vowels: bool,
    /// Include at least one special character.
    pub symbols: bool,
}

impl Default for PwGenOptions {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            no_numerals: false,
            no_capitalize: false,
            avoid_ambiguous: false,
            capitalize: true,
            numerals: true,
            secure: false,
            no_vowels: false,
            symbols: false,
        }
    }
}

impl PwGenOptions {
    pub fn with_length(length: usize) -> Self {
        Self { length, ..Default::default() }
    }

    /// Feature flags requested by the switches, before length clamping.
    pub fn feature_flags(&self) -> FeatureFlags {
        let mut flags = FeatureFlags::empty();
        if self.capitalize {
            flags |= FeatureFlags::UPPERS;
        }
        if self.numerals {
            flags |= FeatureFlags::DIGITS;
        }
        if self.no_capitalize {
            flags.remove(FeatureFlags::UPPERS);
        }
        if self.no_numerals {
            flags.remove(FeatureFlags::DIGITS);
        }
        if self.avoid_ambiguous {
            flags |= FeatureFlags::AMBIGUOUS;
        }
        if self.symbols {
            flags |= FeatureFlags::SYMBOLS;
        }
        if self.secure {
            flags |= FeatureFlags::DIGITS | FeatureFlags::UPPERS;
        }
        if self.no_vowels {
            flags |= FeatureFlags::NO_VOWELS | FeatureFlags::DIGITS | FeatureFlags::UPPERS;
        }
        flags
    }

    pub fn mode(&self) -> GenMode {
        if self.secure || self.no_vowels {
            GenMode::FullyRandom
        } else {
            GenMode::Phonemic
        }
    }

    /// Maps the switches onto a generator mode and a valid configuration.
    pub fn normalize(&self) -> (GenMode, GenerationConfig) {
        let length = if self.length > 0 { self.length } else { DEFAULT_LENGTH };
        let requested = self.feature_flags();
        let config = GenerationConfig::clamped(length, requested);
        let dropped = requested & FeatureFlags::REQUIRED & !config.flags();
        if !dropped.is_empty() {
            warn!(length, ?dropped, "password too short for requested features");
        }
        (self.mode(), config)
    }
}

pub fn get_config_dir() -> Result<PathBuf, ConfigError> {
    let config_dir = config_dir()
        .ok_or(ConfigError::ConfigDirError("Failed to get config directory".to_string()))?
        .join("rpwgen");
    fs::create_dir_all(&config_dir).map_err(ConfigError::IoError)?;
    Ok(config_dir)
}

pub fn default_options_path() -> Result<PathBuf, ConfigError> {
    Ok(get_config_dir()?.join(OPTIONS_FILE))
}

pub fn load_options(path: &Path) -> Result<PwGenOptions, ConfigError> {
    let data = fs::read_to_string(path).map_err(ConfigError::IoError)?;
    let options = serde_json::from_str(&data).map_err(ConfigError::JsonError)?;
    debug!(path = %path.display(), "loaded generator options");
    Ok(options)
}

pub fn save_options(path: &Path, options: &PwGenOptions) -> Result<(), ConfigError> {
    let data = serde_json::to_string_pretty(options).map_err(ConfigError::JsonError)?;
    fs::write(path, data).map_err(ConfigError::IoError)?;
    info!(path = %path.display(), "saved generator options");
    Ok(())
}

/// Options from the per-user options file, or the defaults when
/// there is no such file yet.
pub fn load_default_options() -> Result<PwGenOptions, ConfigError> {
    load_options_or_default(&default_options_path()?)
}

pub fn load_options_or_default(path: &Path) -> Result<PwGenOptions, ConfigError> {
    if !path.exists() {
        debug!(path = %path.display(), "no options file, using defaults");
        return Ok(PwGenOptions::default());
    }
    load_options(path)
}
