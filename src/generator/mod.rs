//! Boundary and equivalence-class value generation.
//!
//! Random strings are drawn with [`rand::rng`], a ChaCha-based CSPRNG seeded from the
//! operating system. Named boundary constants live in [`boundary`].

pub mod boundary;

use std::{collections::BTreeSet, fmt, str::FromStr};

use rand::Rng;

use crate::error::{config::ConfigError, generator::GeneratorError};

/// Upper bound on redraws performed by [`random_int_missing_from`].
pub const MAX_MISSING_ID_ATTEMPTS: usize = 10_000;

static ASCII_CHARS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
static CYRILLIC_CHARS: &str =
    "АБВГДЕЁЖЗИЙКЛМНОПРСТУФХЦЧШЩЪЫЬЭЮЯабвгдеёжзийклмнопрстуфхцчшщъыьэюяЄІЇҐєіїґЎўЈјЉљЊњЋћЏџ";
static HIEROGLYPH_CHARS: &str =
    "一二三四五六七八九十人口日月山川水火木金土天中大小上下左右本文字学生先年時間国語新聞";
static SPECIAL_CHARS: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Character set a random string is drawn from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Alphabet {
    /// Latin letters and digits
    Ascii,
    /// Cyrillic letters, all outside the ASCII range
    Cyrillic,
    /// Fixed set of CJK ideographs
    Hieroglyph,
    /// ASCII punctuation
    Special,
    Custom(String),
}

impl Alphabet {
    pub fn chars(&self) -> Vec<char> {
        match self {
            Self::Ascii => ASCII_CHARS.chars().collect(),
            Self::Cyrillic => CYRILLIC_CHARS.chars().collect(),
            Self::Hieroglyph => HIEROGLYPH_CHARS.chars().collect(),
            Self::Special => SPECIAL_CHARS.chars().collect(),
            Self::Custom(chars) => chars.chars().collect(),
        }
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascii => f.write_str("ascii"),
            Self::Cyrillic => f.write_str("cyrillic"),
            Self::Hieroglyph => f.write_str("hieroglyph"),
            Self::Special => f.write_str("special"),
            Self::Custom(chars) => write!(f, "custom({})", chars),
        }
    }
}

/// Generate a string of exactly `length` code points drawn uniformly from `alphabet`.
///
/// # Returns
/// - `Ok(String)` - The generated string, empty when `length` is zero
/// - `Err(GeneratorError::NegativeLength)` - `length` was below zero
/// - `Err(GeneratorError::EmptyAlphabet)` - A custom alphabet without characters
pub fn random_string(length: i64, alphabet: &Alphabet) -> Result<String, GeneratorError> {
    if length < 0 {
        return Err(GeneratorError::NegativeLength(length));
    }

    let chars = alphabet.chars();
    if chars.is_empty() {
        return Err(GeneratorError::EmptyAlphabet);
    }

    let mut rng = rand::rng();
    Ok((0..length)
        .map(|_| chars[rng.random_range(0..chars.len())])
        .collect())
}

/// Pick a positive `i32` id that is not in `existing` by random redraws.
///
/// The candidate starts at the number of existing ids and is redrawn uniformly from
/// `[candidate, i32::MAX]` while it collides or is below 1.
pub fn random_int_missing_from(existing: &BTreeSet<i64>) -> Result<i64, GeneratorError> {
    let mut rng = rand::rng();
    let mut candidate = existing.len() as i64;

    for _ in 0..MAX_MISSING_ID_ATTEMPTS {
        if candidate >= 1 && !existing.contains(&candidate) {
            return Ok(candidate);
        }
        let low = candidate.clamp(0, i32::MAX as i64);
        candidate = rng.random_range(low..=i32::MAX as i64);
    }

    Err(GeneratorError::Exhausted {
        existing: existing.len(),
        attempts: MAX_MISSING_ID_ATTEMPTS,
    })
}

/// Deterministic missing id: one past the largest existing id, 1 for an empty set.
pub fn next_missing_id(existing: &BTreeSet<i64>) -> i64 {
    existing.last().map_or(1, |max| (*max).max(0) + 1)
}

/// How a "missing id" is chosen for not-found and invalid foreign key scenarios.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MissingIdStrategy {
    /// `max(existing) + 1`
    #[default]
    Sequential,
    /// [`random_int_missing_from`]
    Random,
}

impl MissingIdStrategy {
    pub fn pick(&self, existing: &BTreeSet<i64>) -> Result<i64, GeneratorError> {
        match self {
            Self::Sequential => Ok(next_missing_id(existing)),
            Self::Random => random_int_missing_from(existing),
        }
    }
}

impl FromStr for MissingIdStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(Self::Sequential),
            "random" => Ok(Self::Random),
            other => Err(ConfigError::InvalidEnvValue {
                var: "HERALD_MISSING_ID_STRATEGY".to_string(),
                reason: format!("expected `sequential` or `random`, got `{}`", other),
            }),
        }
    }
}
