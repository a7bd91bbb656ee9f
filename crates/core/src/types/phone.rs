//! Salvadoran phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The input contains no digits at all.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input does not contain exactly eight digits.
    #[error("phone number must have exactly 8 digits (got {digits})")]
    WrongDigitCount {
        /// Number of digits found after stripping.
        digits: usize,
    },
}

/// An eight-digit local phone number.
///
/// Parsing strips every non-digit character first, so `"7123-4567"`,
/// `"7123 4567"`, and `"71234567"` all parse to the same number. The check
/// for exactly eight digits runs on the stripped value. Formatting with a
/// hyphen after the fourth digit is purely presentational and is always
/// reconstructed from the stripped digits.
///
/// ## Examples
///
/// ```
/// use bluefruit_core::Phone;
///
/// let phone = Phone::parse("7123-4567").unwrap();
/// assert_eq!(phone.digits(), "71234567");
/// assert_eq!(phone.to_string(), "7123-4567");
///
/// // Seven digits after stripping: rejected
/// assert!(Phone::parse("7123-45a6b").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Phone(String);

impl Phone {
    /// Number of digits in a valid phone number.
    pub const DIGITS: usize = 8;

    /// Parse a `Phone` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the stripped input is empty or does not contain
    /// exactly eight digits.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let digits: String = s.chars().filter(char::is_ascii_digit).collect();

        if digits.is_empty() {
            return Err(PhoneError::Empty);
        }

        if digits.len() != Self::DIGITS {
            return Err(PhoneError::WrongDigitCount {
                digits: digits.len(),
            });
        }

        Ok(Self(digits))
    }

    /// The bare eight digits, without formatting.
    #[must_use]
    pub fn digits(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    /// Formats as `NNNN-NNNN`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (head, tail) = self.0.split_at(4);
        write!(f, "{head}-{tail}")
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Phone {
    type Error = PhoneError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Phone> for String {
    fn from(phone: Phone) -> Self {
        phone.to_string()
    }
}
