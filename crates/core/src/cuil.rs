//! CUIL normalisation, display formatting and check-digit validation.
//!
//! A CUIL is 11 decimal digits: a two-digit prefix, an eight-digit body and one check digit.
//! The canonical display form is `DD-DDDDDDDD-D`.
//!
//! The free functions here are total and never fail. They back both the live input field
//! ([`crate::cuil_input`]) and the strict [`Cuil`] value type.
//!
//! ## Check digit
//! The first ten digits are weighted with `5,4,3,2,7,6,5,4,3,2`, summed and reduced modulo 11.
//! The check digit is `11 - remainder`, except that `11` maps to `0` and `10` has no check
//! digit at all: a prefix/body with remainder 1 can never form a valid CUIL, whatever the last
//! digit is.

use crate::constants::{CUIL_BODY_LEN, CUIL_CHECK_WEIGHTS, CUIL_LEN, CUIL_PREFIX_LEN};
use crate::error::CuilError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Strips every non-digit character and keeps at most the first 11 digits.
///
/// Excess trailing digits are dropped rather than rejected, which is what a field that is
/// being typed into needs.
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_digit)
        .take(CUIL_LEN)
        .collect()
}

/// Punctuates a digit string according to how many digits it has.
///
/// - up to 2 digits: unchanged
/// - 11 digits: `DD-DDDDDDDD-D`
/// - anything in between: `DD-REST`
pub fn format(digits: &str) -> String {
    let count = digits.chars().count();
    if count <= CUIL_PREFIX_LEN {
        return digits.to_owned();
    }

    let prefix: String = digits.chars().take(CUIL_PREFIX_LEN).collect();
    let rest: String = digits.chars().skip(CUIL_PREFIX_LEN).collect();

    if count == CUIL_LEN {
        let body: String = rest.chars().take(CUIL_BODY_LEN).collect();
        let check: String = rest.chars().skip(CUIL_BODY_LEN).collect();
        format!("{prefix}-{body}-{check}")
    } else {
        format!("{prefix}-{rest}")
    }
}

/// Returns true if `digits` is exactly 11 ASCII digits with a matching check digit.
///
/// Any other length is rejected before the checksum is computed.
pub fn is_valid(digits: &str) -> bool {
    if digits.len() != CUIL_LEN || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let values: Vec<u32> = digits.bytes().map(|b| u32::from(b - b'0')).collect();
    let (leading, check) = values.split_at(CUIL_LEN - 1);

    match expected_check_digit(leading) {
        Some(expected) => expected == check[0],
        None => false,
    }
}

/// `None` when the weighted remainder leaves no usable check digit.
fn expected_check_digit(leading: &[u32]) -> Option<u32> {
    let sum: u32 = leading
        .iter()
        .zip(CUIL_CHECK_WEIGHTS)
        .map(|(digit, weight)| digit * weight)
        .sum();

    match 11 - sum % 11 {
        11 => Some(0),
        10 => None,
        digit => Some(digit),
    }
}

/// A complete CUIL whose check digit has been verified.
///
/// Stored as 11 bare digits; displayed and serialised in the canonical `DD-DDDDDDDD-D` form.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Cuil(String);

impl Cuil {
    /// Parses a CUIL written with or without punctuation.
    ///
    /// Unlike [`normalize`] this does not truncate: 12 digits is an error, not a CUIL.
    ///
    /// # Errors
    ///
    /// - [`CuilError::WrongLength`] if the input does not contain exactly 11 digits.
    /// - [`CuilError::BadCheckDigit`] if the check digit does not match.
    pub fn parse(raw: &str) -> Result<Self, CuilError> {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        if digits.len() != CUIL_LEN {
            return Err(CuilError::WrongLength(digits.len()));
        }
        if !is_valid(&digits) {
            return Err(CuilError::BadCheckDigit);
        }
        Ok(Self(digits))
    }

    /// The 11 digits without punctuation.
    pub fn digits(&self) -> &str {
        &self.0
    }

    /// The two-digit prefix class (for example `20` or `27`).
    pub fn prefix(&self) -> &str {
        &self.0[..CUIL_PREFIX_LEN]
    }

    pub fn formatted(&self) -> String {
        format(&self.0)
    }
}

impl std::fmt::Display for Cuil {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.formatted())
    }
}

impl FromStr for Cuil {
    type Err = CuilError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Cuil {
    type Error = CuilError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Cuil> for String {
    fn from(value: Cuil) -> Self {
        value.formatted()
    }
}
