//! # Triage Core
//!
//! Validation and identity normalisation for emergency-room intake.
//!
//! This crate contains pure data operations only:
//! - CUIL normalisation, formatting and check-digit validation ([`cuil`])
//! - The per-keystroke CUIL input state machine ([`cuil_input`])
//! - Intake, patient and nurse form assembly with first-failure-wins validation
//!   ([`intake`], [`registration`])
//! - The waiting-list snapshot and the intake desk that orders submission before refresh
//!   ([`waiting_list`], [`desk`])
//!
//! **No transport concerns**: HTTP servers, clients and CLI parsing belong in `api-rest`,
//! `triage-cli` or the embedding application. Network access reaches the core only through the
//! [`IntakeGateway`] trait.

pub mod constants;
pub mod cuil;
pub mod cuil_input;
pub mod desk;
pub mod error;
pub mod intake;
pub mod registration;
pub mod severity;
pub mod validation;
pub mod waiting_list;

pub use constants::*;
pub use cuil::Cuil;
pub use cuil_input::{CuilInputState, Validity};
pub use desk::{IntakeDesk, IntakeGateway, Notice};
pub use error::{
    CuilError, GatewayError, ParseSeverityError, SubmitError, ValidationError, ValidationResult,
};
pub use intake::{assemble, EmergencyIntakeDraft, EmergencyIntakePayload, IntakeField, VitalSigns};
pub use registration::{
    assemble_nurse, assemble_patient, Address, NurseRegistrationDraft, NurseRegistrationPayload,
    PatientRegistrationDraft, PatientRegistrationPayload,
};
pub use severity::SeverityLevel;
pub use validation::Field;
pub use waiting_list::{WaitingList, WaitingListEntry};

// Re-export the shared validated text type.
pub use triage_types::NonEmptyText;
