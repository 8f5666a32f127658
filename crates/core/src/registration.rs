//! Patient and nurse registration forms.
//!
//! Same contract as the intake form: ordered checks, first failure wins, trimmed output.
//! CUILs are only required to be non-blank; check-digit feedback belongs to the input field.

use crate::error::{ValidationError, ValidationResult};
use crate::intake::note_unverified_cuil;
use crate::validation::{optional_text, required, whole_number, Field};
use serde::{Deserialize, Serialize};
use triage_types::NonEmptyText;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct NurseRegistrationDraft {
    pub cuil: String,
    pub surname: String,
    pub first_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct NurseRegistrationPayload {
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub cuil: NonEmptyText,
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub surname: NonEmptyText,
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub first_name: NonEmptyText,
}

/// Validates a nurse registration: CUIL, surname, first name.
pub fn assemble_nurse(draft: &NurseRegistrationDraft) -> ValidationResult<NurseRegistrationPayload> {
    let cuil = required(Field::Cuil, &draft.cuil)?;
    let surname = required(Field::Surname, &draft.surname)?;
    let first_name = required(Field::FirstName, &draft.first_name)?;

    note_unverified_cuil(Field::Cuil, &cuil);

    Ok(NurseRegistrationPayload {
        cuil,
        surname,
        first_name,
    })
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct PatientRegistrationDraft {
    pub cuil: String,
    pub surname: String,
    pub first_name: String,
    pub street: String,
    pub street_number: String,
    pub locality: String,
    /// Health insurer code; empty when the patient has none.
    pub insurer_code: String,
    pub member_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub street: NonEmptyText,
    pub number: u32,
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub locality: NonEmptyText,
}

/// Validated patient registration.
///
/// `insurer_code` and `member_number` are either both present or both absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PatientRegistrationPayload {
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub cuil: NonEmptyText,
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub surname: NonEmptyText,
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub first_name: NonEmptyText,
    pub address: Address,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurer_code: Option<NonEmptyText>,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_number: Option<NonEmptyText>,
}

/// Validates a patient registration.
///
/// # Errors
///
/// First failure, in order: CUIL, surname, first name, street, street number (present, then
/// a whole number), locality, then the insurer pairing.
pub fn assemble_patient(
    draft: &PatientRegistrationDraft,
) -> ValidationResult<PatientRegistrationPayload> {
    let cuil = required(Field::Cuil, &draft.cuil)?;
    let surname = required(Field::Surname, &draft.surname)?;
    let first_name = required(Field::FirstName, &draft.first_name)?;
    let street = required(Field::Street, &draft.street)?;
    let number = whole_number(
        Field::StreetNumber,
        &required(Field::StreetNumber, &draft.street_number)?,
    )?;
    let locality = required(Field::Locality, &draft.locality)?;

    let (insurer_code, member_number) = match (
        optional_text(&draft.insurer_code),
        optional_text(&draft.member_number),
    ) {
        (Some(code), Some(member)) => (Some(code), Some(member)),
        (Some(_), None) => return Err(ValidationError::Required(Field::MemberNumber)),
        (None, Some(_)) => return Err(ValidationError::MemberNumberWithoutInsurer),
        (None, None) => (None, None),
    };

    note_unverified_cuil(Field::Cuil, &cuil);

    Ok(PatientRegistrationPayload {
        cuil,
        surname,
        first_name,
        address: Address {
            street,
            number,
            locality,
        },
        insurer_code,
        member_number,
    })
}
