//! Emergency intake drafts and their assembly into submission payloads.
//!
//! [`assemble`] checks the six required fields in a fixed order, then parses the five optional
//! vital signs in a fixed order. The first failure is returned and nothing after it is
//! evaluated, so the user always sees exactly one message.
//!
//! CUIL fields are only required to be non-blank here. The check digit is a concern of the
//! input field ([`crate::cuil_input`]); a completed form whose CUIL fails the check is still
//! accepted, and the mismatch is only logged.

use crate::cuil;
use crate::error::{ValidationError, ValidationResult};
use crate::severity::SeverityLevel;
use crate::validation::{optional_number, required, Field};
use serde::{Deserialize, Serialize};
use triage_types::NonEmptyText;

/// Fields of the intake form, in the order they appear on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntakeField {
    PatientIdentifier,
    Note,
    Severity,
    NurseFirstName,
    NurseSurname,
    NurseIdentifier,
    Temperature,
    HeartRate,
    RespiratoryRate,
    Systolic,
    Diastolic,
}

/// The in-progress intake form. Every field is raw text exactly as captured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct EmergencyIntakeDraft {
    pub patient_identifier: String,
    pub note: String,
    /// Wire name of the selected level, or empty when nothing is selected.
    pub severity: String,
    pub nurse_first_name: String,
    pub nurse_surname: String,
    pub nurse_identifier: String,
    pub temperature: String,
    pub heart_rate: String,
    pub respiratory_rate: String,
    pub systolic: String,
    pub diastolic: String,
}

impl EmergencyIntakeDraft {
    pub fn field(&self, field: IntakeField) -> &str {
        match field {
            IntakeField::PatientIdentifier => &self.patient_identifier,
            IntakeField::Note => &self.note,
            IntakeField::Severity => &self.severity,
            IntakeField::NurseFirstName => &self.nurse_first_name,
            IntakeField::NurseSurname => &self.nurse_surname,
            IntakeField::NurseIdentifier => &self.nurse_identifier,
            IntakeField::Temperature => &self.temperature,
            IntakeField::HeartRate => &self.heart_rate,
            IntakeField::RespiratoryRate => &self.respiratory_rate,
            IntakeField::Systolic => &self.systolic,
            IntakeField::Diastolic => &self.diastolic,
        }
    }

    pub fn set(&mut self, field: IntakeField, value: impl Into<String>) {
        let slot = match field {
            IntakeField::PatientIdentifier => &mut self.patient_identifier,
            IntakeField::Note => &mut self.note,
            IntakeField::Severity => &mut self.severity,
            IntakeField::NurseFirstName => &mut self.nurse_first_name,
            IntakeField::NurseSurname => &mut self.nurse_surname,
            IntakeField::NurseIdentifier => &mut self.nurse_identifier,
            IntakeField::Temperature => &mut self.temperature,
            IntakeField::HeartRate => &mut self.heart_rate,
            IntakeField::RespiratoryRate => &mut self.respiratory_rate,
            IntakeField::Systolic => &mut self.systolic,
            IntakeField::Diastolic => &mut self.diastolic,
        };
        *slot = value.into();
    }

    /// True if nothing has been entered yet.
    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }
}

/// Optional vital signs. Absent values are omitted from the wire form, never sent as empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct VitalSigns {
    /// Degrees Celsius.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Beats per minute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<f64>,
    /// Breaths per minute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub respiratory_rate: Option<f64>,
    /// mmHg.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub systolic: Option<f64>,
    /// mmHg.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diastolic: Option<f64>,
}

impl VitalSigns {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A validated intake, ready to hand to the gateway.
///
/// Only [`assemble`] builds one, so every required field is present and trimmed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct EmergencyIntakePayload {
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    patient_identifier: NonEmptyText,
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    note: NonEmptyText,
    severity: SeverityLevel,
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    nurse_first_name: NonEmptyText,
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    nurse_surname: NonEmptyText,
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    nurse_identifier: NonEmptyText,
    #[serde(flatten)]
    vitals: VitalSigns,
}

impl EmergencyIntakePayload {
    pub fn patient_identifier(&self) -> &str {
        self.patient_identifier.as_str()
    }

    pub fn note(&self) -> &str {
        self.note.as_str()
    }

    pub fn severity(&self) -> SeverityLevel {
        self.severity
    }

    pub fn nurse_first_name(&self) -> &str {
        self.nurse_first_name.as_str()
    }

    pub fn nurse_surname(&self) -> &str {
        self.nurse_surname.as_str()
    }

    pub fn nurse_identifier(&self) -> &str {
        self.nurse_identifier.as_str()
    }

    pub fn vitals(&self) -> &VitalSigns {
        &self.vitals
    }
}

/// Validates a draft and builds the submission payload.
///
/// # Errors
///
/// Returns the first failing check as a [`ValidationError`], in this order:
/// patient CUIL, clinical note, emergency level, nurse first name, nurse surname, nurse CUIL,
/// then temperature, heart rate, respiratory rate, systolic and diastolic pressure.
pub fn assemble(draft: &EmergencyIntakeDraft) -> ValidationResult<EmergencyIntakePayload> {
    let patient_identifier = required(Field::PatientCuil, &draft.patient_identifier)?;
    let note = required(Field::ClinicalNote, &draft.note)?;
    let severity = draft
        .severity
        .trim()
        .parse::<SeverityLevel>()
        .map_err(|_| ValidationError::SeverityNotSelected)?;
    let nurse_first_name = required(Field::NurseFirstName, &draft.nurse_first_name)?;
    let nurse_surname = required(Field::NurseSurname, &draft.nurse_surname)?;
    let nurse_identifier = required(Field::NurseCuil, &draft.nurse_identifier)?;

    let vitals = VitalSigns {
        temperature: optional_number(Field::Temperature, &draft.temperature)?,
        heart_rate: optional_number(Field::HeartRate, &draft.heart_rate)?,
        respiratory_rate: optional_number(Field::RespiratoryRate, &draft.respiratory_rate)?,
        systolic: optional_number(Field::Systolic, &draft.systolic)?,
        diastolic: optional_number(Field::Diastolic, &draft.diastolic)?,
    };

    note_unverified_cuil(Field::PatientCuil, &patient_identifier);
    note_unverified_cuil(Field::NurseCuil, &nurse_identifier);

    Ok(EmergencyIntakePayload {
        patient_identifier,
        note,
        severity,
        nurse_first_name,
        nurse_surname,
        nurse_identifier,
        vitals,
    })
}

/// Advisory only: submission proceeds whatever the outcome.
pub(crate) fn note_unverified_cuil(field: Field, value: &NonEmptyText) {
    if !cuil::is_valid(&cuil::normalize(value.as_str())) {
        tracing::debug!(field = %field, "CUIL check digit not verified; accepted as captured");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_draft() -> EmergencyIntakeDraft {
        EmergencyIntakeDraft {
            patient_identifier: "20-12345678-3".into(),
            note: "chest pain".into(),
            severity: "Critica".into(),
            nurse_first_name: "Ana".into(),
            nurse_surname: "Diaz".into(),
            nurse_identifier: "27-00000000-0".into(),
            ..Default::default()
        }
    }

    fn message(draft: &EmergencyIntakeDraft) -> String {
        assemble(draft).expect_err("should be rejected").to_string()
    }

    #[test]
    fn test_all_required_and_blank_vitals_omits_every_vital() {
        let payload = assemble(&complete_draft()).expect("valid draft");
        assert!(payload.vitals().is_empty());

        let json = serde_json::to_value(&payload).expect("serialise");
        let keys: Vec<&str> = json
            .as_object()
            .expect("object")
            .keys()
            .map(String::as_str)
            .collect();
        for vital in [
            "temperature",
            "heartRate",
            "respiratoryRate",
            "systolic",
            "diastolic",
        ] {
            assert!(!keys.contains(&vital), "{vital} must be omitted");
        }
    }

    #[test]
    fn test_end_to_end_payload_shape() {
        let draft = EmergencyIntakeDraft {
            temperature: "37.5".into(),
            ..complete_draft()
        };

        let payload = assemble(&draft).expect("valid draft");
        let json = serde_json::to_value(&payload).expect("serialise");

        assert_eq!(
            json,
            serde_json::json!({
                "patientIdentifier": "20-12345678-3",
                "note": "chest pain",
                "severity": "Critica",
                "nurseFirstName": "Ana",
                "nurseSurname": "Diaz",
                "nurseIdentifier": "27-00000000-0",
                "temperature": 37.5
            })
        );
    }

    #[test]
    fn test_required_fields_are_trimmed() {
        let draft = EmergencyIntakeDraft {
            note: "  chest pain\n".into(),
            nurse_first_name: " Ana ".into(),
            severity: " Urgencia Menor ".into(),
            ..complete_draft()
        };

        let payload = assemble(&draft).expect("valid draft");
        assert_eq!(payload.note(), "chest pain");
        assert_eq!(payload.nurse_first_name(), "Ana");
        assert_eq!(payload.severity(), SeverityLevel::MinorUrgent);
    }

    #[test]
    fn test_required_checks_run_in_order() {
        let mut draft = EmergencyIntakeDraft {
            temperature: "abc".into(),
            ..Default::default()
        };
        assert_eq!(message(&draft), "patient CUIL is required");

        draft.patient_identifier = "20-12345678-3".into();
        assert_eq!(message(&draft), "clinical note is required");

        draft.note = "chest pain".into();
        assert_eq!(message(&draft), "an emergency level must be selected");

        draft.severity = "Critica".into();
        assert_eq!(message(&draft), "nurse first name is required");

        draft.nurse_first_name = "Ana".into();
        assert_eq!(message(&draft), "nurse surname is required");

        draft.nurse_surname = "Diaz".into();
        assert_eq!(message(&draft), "nurse CUIL is required");

        draft.nurse_identifier = "27-00000000-0".into();
        assert_eq!(message(&draft), "temperature must be numeric");
    }

    #[test]
    fn test_blank_nurse_surname_wins_over_bad_vitals() {
        let draft = EmergencyIntakeDraft {
            nurse_surname: "   ".into(),
            temperature: "hot".into(),
            diastolic: "low".into(),
            ..complete_draft()
        };
        assert_eq!(
            assemble(&draft),
            Err(ValidationError::Required(Field::NurseSurname))
        );
    }

    #[test]
    fn test_unknown_severity_counts_as_not_selected() {
        let draft = EmergencyIntakeDraft {
            severity: "Very bad".into(),
            ..complete_draft()
        };
        assert_eq!(assemble(&draft), Err(ValidationError::SeverityNotSelected));
    }

    #[test]
    fn test_non_numeric_temperature_names_temperature() {
        let draft = EmergencyIntakeDraft {
            temperature: "abc".into(),
            ..complete_draft()
        };
        let err = assemble(&draft).expect_err("non-numeric temperature");
        assert_eq!(err, ValidationError::NotNumeric(Field::Temperature));
        assert!(err.to_string().contains("temperature"));
    }

    #[test]
    fn test_first_bad_vital_is_reported() {
        let draft = EmergencyIntakeDraft {
            temperature: "37".into(),
            heart_rate: "".into(),
            respiratory_rate: "fast".into(),
            systolic: "high".into(),
            ..complete_draft()
        };
        assert_eq!(
            assemble(&draft),
            Err(ValidationError::NotNumeric(Field::RespiratoryRate))
        );
    }

    #[test]
    fn test_all_vitals_parsed() {
        let draft = EmergencyIntakeDraft {
            temperature: "38.2".into(),
            heart_rate: "110".into(),
            respiratory_rate: "22".into(),
            systolic: "90".into(),
            diastolic: " 60 ".into(),
            ..complete_draft()
        };
        let payload = assemble(&draft).expect("valid draft");
        assert_eq!(
            *payload.vitals(),
            VitalSigns {
                temperature: Some(38.2),
                heart_rate: Some(110.0),
                respiratory_rate: Some(22.0),
                systolic: Some(90.0),
                diastolic: Some(60.0),
            }
        );
    }

    #[test]
    fn test_failed_cuil_check_digit_does_not_block_assembly() {
        let draft = complete_draft();
        assert!(!cuil::is_valid(&cuil::normalize(&draft.nurse_identifier)));
        assert!(assemble(&draft).is_ok());
    }

    #[test]
    fn test_draft_set_and_blank() {
        let mut draft = EmergencyIntakeDraft::default();
        assert!(draft.is_blank());

        draft.set(IntakeField::HeartRate, "72");
        assert_eq!(draft.field(IntakeField::HeartRate), "72");
        assert!(!draft.is_blank());
    }

    #[test]
    fn test_draft_deserialises_with_missing_fields() {
        let draft: EmergencyIntakeDraft =
            serde_json::from_str(r#"{"patientIdentifier": "20-12345678-6"}"#)
                .expect("partial draft");
        assert_eq!(draft.patient_identifier, "20-12345678-6");
        assert!(draft.note.is_empty());
    }
}
