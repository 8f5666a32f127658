use crate::validation::Field;

/// A form could not be turned into a payload.
///
/// The `Display` output is the one message shown to the user. There is no error-code
/// taxonomy beyond these variants; front-ends render `to_string()` and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(Field),
    #[error("an emergency level must be selected")]
    SeverityNotSelected,
    #[error("{0} must be numeric")]
    NotNumeric(Field),
    #[error("member number requires an insurer")]
    MemberNumberWithoutInsurer,
}

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// Strict CUIL parsing failures.
///
/// Only [`crate::Cuil::parse`] produces these; the keystroke path reports validity as data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CuilError {
    #[error("CUIL must have 11 digits, got {0}")]
    WrongLength(usize),
    #[error("CUIL check digit does not match")]
    BadCheckDigit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown emergency level: {0}")]
pub struct ParseSeverityError(pub String);

/// Opaque failure reported by the intake gateway.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct GatewayError(pub String);

impl GatewayError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
