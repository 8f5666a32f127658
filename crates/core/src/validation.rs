//! Field-level checks shared by the form assemblers.
//!
//! Each assembler is an ordered sequence of these checks joined with `?`, so the first
//! failing field is the one reported and nothing after it is evaluated.

use crate::error::{ValidationError, ValidationResult};
use triage_types::NonEmptyText;

/// Form fields that can be named in a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    PatientCuil,
    ClinicalNote,
    NurseFirstName,
    NurseSurname,
    NurseCuil,
    Temperature,
    HeartRate,
    RespiratoryRate,
    Systolic,
    Diastolic,
    Cuil,
    Surname,
    FirstName,
    Street,
    StreetNumber,
    Locality,
    MemberNumber,
}

impl Field {
    /// Label used inside user-facing messages.
    pub fn label(self) -> &'static str {
        match self {
            Field::PatientCuil => "patient CUIL",
            Field::ClinicalNote => "clinical note",
            Field::NurseFirstName => "nurse first name",
            Field::NurseSurname => "nurse surname",
            Field::NurseCuil => "nurse CUIL",
            Field::Temperature => "temperature",
            Field::HeartRate => "heart rate",
            Field::RespiratoryRate => "respiratory rate",
            Field::Systolic => "systolic pressure",
            Field::Diastolic => "diastolic pressure",
            Field::Cuil => "CUIL",
            Field::Surname => "surname",
            Field::FirstName => "first name",
            Field::Street => "street",
            Field::StreetNumber => "street number",
            Field::Locality => "locality",
            Field::MemberNumber => "member number",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Requires a non-blank value and returns it trimmed.
pub(crate) fn required(field: Field, value: &str) -> ValidationResult<NonEmptyText> {
    NonEmptyText::new(value).map_err(|_| ValidationError::Required(field))
}

/// Blank means absent; anything else must be a finite decimal number.
///
/// Hex and binary literals (`0x10`, `0b1`) and `Infinity` are rejected even though a browser's
/// `Number()` accepts them: vitals are entered in decimal and must stay representable in JSON.
pub(crate) fn optional_number(field: Field, value: &str) -> ValidationResult<Option<f64>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    match trimmed.parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(Some(number)),
        _ => Err(ValidationError::NotNumeric(field)),
    }
}

pub(crate) fn whole_number(field: Field, value: &NonEmptyText) -> ValidationResult<u32> {
    value
        .as_str()
        .parse::<u32>()
        .map_err(|_| ValidationError::NotNumeric(field))
}

pub(crate) fn optional_text(value: &str) -> Option<NonEmptyText> {
    NonEmptyText::new(value).ok()
}
