//! Chilean RUT (Rol Único Tributario) validation.
//!
//! A RUT is a 7–8 digit body followed by a check character (`0`–`9` or
//! `K`) derived from the body with the Módulo 11 checksum. Input may carry
//! the usual `.` thousands separators and `-` before the check character;
//! both are ignored.
//!
//! ```
//! use usuarios_core::rut::{is_valid_rut, Rut};
//!
//! assert!(is_valid_rut(Some("12.345.678-5")));
//! assert!(!is_valid_rut(Some("12.345.678-4")));
//! assert!(!is_valid_rut(None));
//!
//! let rut: Rut = "123456785".parse().unwrap();
//! assert_eq!(rut.to_string(), "12.345.678-5");
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Shape of a RUT once `.` and `-` are removed: 7 or 8 ASCII digits and one
/// check character.
pub const RUT_FORMAT_PATTERN: &str = r"^[0-9]{7,8}[0-9Kk]$";

static RUT_FORMAT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(RUT_FORMAT_PATTERN).expect("valid regex"));

/// Shape of a bare body accepted by [`check_character`].
static RUT_BODY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{7,8}$").expect("valid regex"));

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Why a string is not a RUT.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RutError {
    #[error("RUT is empty")]
    Empty,

    #[error("RUT must be 7 or 8 digits followed by a check character (0-9 or K)")]
    Malformed,

    #[error("RUT check character mismatch: expected {expected}, found {found}")]
    CheckMismatch { expected: char, found: char },
}

/// Validate a possibly-absent RUT.
///
/// Returns `false` for `None`, the empty string, anything that does not
/// have the RUT shape after removing `.` and `-`, and bodies whose check
/// character does not match. Never panics.
pub fn is_valid_rut(input: Option<&str>) -> bool {
    input.is_some_and(is_valid)
}

/// Validate a RUT string. See [`is_valid_rut`].
pub fn is_valid(input: &str) -> bool {
    Rut::parse(input).is_ok()
}

/// Compute the check character for a 7–8 digit body.
///
/// Returns `None` when `body` is not 7 or 8 ASCII digits.
pub fn check_character(body: &str) -> Option<char> {
    RUT_BODY_RE.is_match(body).then(|| modulo_11(body))
}

/// Módulo 11 over an all-digit body: weights 2..=7 cycle from the rightmost
/// digit, and `11 - sum % 11` maps 11 to `'0'` and 10 to `'K'`.
fn modulo_11(body: &str) -> char {
    let mut sum: u32 = 0;
    let mut multiplier: u32 = 2;

    for digit in body.bytes().rev().map(|b| u32::from(b - b'0')) {
        sum += digit * multiplier;
        multiplier = if multiplier == 7 { 2 } else { multiplier + 1 };
    }

    match 11 - sum % 11 {
        11 => '0',
        10 => 'K',
        n => char::from(b'0' + n as u8),
    }
}

// ---------------------------------------------------------------------------
// Rut value type
// ---------------------------------------------------------------------------

/// A RUT whose check character has been verified.
///
/// Renders in the canonical `12.345.678-5` form. The body keeps its digits
/// as given, leading zeros included, so the rendering always parses back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rut {
    body: String,
    check: char,
}

impl Rut {
    /// Parse and verify a RUT, with or without `.`/`-` punctuation.
    pub fn parse(input: &str) -> Result<Self, RutError> {
        if input.is_empty() {
            return Err(RutError::Empty);
        }

        let cleaned: String = input.chars().filter(|c| !matches!(c, '.' | '-')).collect();
        if !RUT_FORMAT_RE.is_match(&cleaned) {
            return Err(RutError::Malformed);
        }

        // The regex guarantees an ASCII string of 8 or 9 bytes.
        let (body, check) = cleaned.split_at(cleaned.len() - 1);
        let found = check
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .ok_or(RutError::Malformed)?;

        let expected = modulo_11(body);
        if expected != found {
            return Err(RutError::CheckMismatch { expected, found });
        }

        Ok(Self {
            body: body.to_string(),
            check: found,
        })
    }

    /// Body digits without the check character.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Upper-case check character.
    pub fn check(&self) -> char {
        self.check
    }

    /// Body and check character with no punctuation, e.g. `123456785`.
    pub fn compact(&self) -> String {
        format!("{}{}", self.body, self.check)
    }
}

impl FromStr for Rut {
    type Err = RutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Rut {
    type Error = RutError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Rut> for String {
    fn from(rut: Rut) -> Self {
        rut.to_string()
    }
}

impl fmt::Display for Rut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = &self.body;
        let mut grouped = String::with_capacity(digits.len() + 2);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }
        write!(f, "{grouped}-{}", self.check)
    }
}
