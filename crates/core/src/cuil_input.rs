//! Per-field state for a CUIL input that reformats itself while the user types.
//!
//! Every keystroke hands the whole raw field text to [`CuilInputState::transition`], which
//! returns the text to render back into the field plus a tri-state validity flag. The
//! transition is pure and total: punctuation and excess digits are dropped, never rejected.

use crate::constants::CUIL_LEN;
use crate::cuil;
use serde::{Deserialize, Serialize};

/// Whether the digits typed so far form a valid CUIL.
///
/// `Unknown` while fewer than 11 digits are present; no judgement is made on partial input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Validity {
    #[default]
    Unknown,
    Valid,
    Invalid,
}

impl std::fmt::Display for Validity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Validity::Unknown => "unknown",
            Validity::Valid => "valid",
            Validity::Invalid => "invalid",
        })
    }
}

/// Displayed value and validity of one CUIL input field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CuilInputState {
    value: String,
    validity: Validity,
}

impl CuilInputState {
    /// The initial state: empty and unknown.
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the state that follows a change of the field text to `raw`.
    ///
    /// The result does not depend on the previous state, so repeating the same input is
    /// idempotent and an empty string restores the initial state.
    pub fn transition(raw: &str) -> Self {
        let digits = cuil::normalize(raw);
        let value = cuil::format(&digits);

        let validity = if digits.len() == CUIL_LEN {
            if cuil::is_valid(&digits) {
                Validity::Valid
            } else {
                Validity::Invalid
            }
        } else {
            Validity::Unknown
        };

        Self { value, validity }
    }

    /// Applies a keystroke in place and returns the new state.
    pub fn handle_change(&mut self, raw: &str) -> &Self {
        *self = Self::transition(raw);
        self
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn validity(&self) -> Validity {
        self.validity
    }
}
