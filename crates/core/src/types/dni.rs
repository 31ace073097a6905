//! Spanish national ID (DNI) check-letter validation.
//!
//! A DNI is eight digits followed by one letter. The letter is a checksum:
//! the eight-digit number modulo 23 indexes into a fixed reference table.
//! Validation is pure and deterministic.

use core::fmt;

use serde::{Deserialize, Serialize};

/// The fixed 23-letter reference table, indexed by `number % 23`.
pub const DNI_CHECK_LETTERS: &[u8; 23] = b"TRWAGMYFPDXBNJZSQVHLCKE";

/// Errors produced by [`Dni::parse`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DniError {
    /// The input is not exactly 8 ASCII digits followed by 1 letter.
    #[error("invalid DNI format (expected 8 digits and 1 letter)")]
    InvalidFormat,
    /// The format is right but the check letter does not match.
    #[error("wrong check letter, expected '{expected}'")]
    WrongCheckLetter {
        /// The letter the digits actually require.
        expected: char,
    },
}

/// A validated DNI: eight digits plus the matching check letter.
///
/// Input is uppercased before validation, so `"00000023t"` and `"00000023T"`
/// are the same DNI.
///
/// ```
/// use tienda_core::{Dni, DniError};
///
/// assert!(Dni::parse("00000023T").is_ok());
/// assert_eq!(
///     Dni::parse("00000023X"),
///     Err(DniError::WrongCheckLetter { expected: 'T' })
/// );
/// assert_eq!(Dni::parse("1234567A"), Err(DniError::InvalidFormat));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dni(String);

impl Dni {
    /// Validate a DNI string.
    ///
    /// The input is uppercased first. It must then match exactly 8 ASCII
    /// digits followed by 1 ASCII uppercase letter, and the letter must be
    /// the one the digits require.
    ///
    /// # Errors
    ///
    /// Returns [`DniError::InvalidFormat`] for anything that is not
    /// 8 digits + 1 letter, and [`DniError::WrongCheckLetter`] (carrying the
    /// expected letter) when only the checksum is wrong.
    pub fn parse(input: &str) -> Result<Self, DniError> {
        let dni = input.to_uppercase();

        let bytes = dni.as_bytes();
        if bytes.len() != 9 {
            return Err(DniError::InvalidFormat);
        }
        let (digits, letter) = bytes.split_at(8);
        if !digits.iter().all(u8::is_ascii_digit) {
            return Err(DniError::InvalidFormat);
        }
        let Some(&letter) = letter.first() else {
            return Err(DniError::InvalidFormat);
        };
        if !letter.is_ascii_uppercase() {
            return Err(DniError::InvalidFormat);
        }

        // 8 digits always fit in a u32
        let number: u32 = dni
            .get(..8)
            .and_then(|s| s.parse().ok())
            .ok_or(DniError::InvalidFormat)?;

        let expected = Self::check_letter(number);
        if char::from(letter) == expected {
            Ok(Self(dni))
        } else {
            Err(DniError::WrongCheckLetter { expected })
        }
    }

    /// The check letter required for a given 8-digit number.
    #[must_use]
    pub fn check_letter(number: u32) -> char {
        let index = (number % 23) as usize;
        DNI_CHECK_LETTERS
            .get(index)
            .copied()
            .map_or('T', char::from)
    }

    /// The validated DNI as a string slice (always uppercase).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Dni {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Dni {
    type Err = DniError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
