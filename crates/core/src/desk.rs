//! The emergency intake desk: form state, one notice, and the waiting list.
//!
//! [`IntakeDesk`] is the caller side of the intake pipeline. It owns no I/O itself; the
//! network goes through an [`IntakeGateway`] supplied by the embedding application.
//!
//! Ordering on submit: assemble once, register with the gateway, and only after that returns
//! clear the form and refresh the waiting list. A failed registration never triggers a
//! refresh and never re-runs assembly.

use crate::constants::INTAKE_REGISTERED_MESSAGE;
use crate::cuil_input::CuilInputState;
use crate::error::{GatewayError, SubmitError};
use crate::intake::{assemble, EmergencyIntakeDraft, EmergencyIntakePayload, IntakeField};
use crate::waiting_list::{WaitingList, WaitingListEntry};
use chrono::Utc;

/// Backend operations the desk depends on.
pub trait IntakeGateway {
    /// Registers a validated intake.
    fn register_intake(&self, payload: &EmergencyIntakePayload) -> Result<(), GatewayError>;

    /// Fetches the current pending intakes, in backend order.
    fn pending_intakes(&self) -> Result<Vec<WaitingListEntry>, GatewayError>;
}

impl<G: IntakeGateway + ?Sized> IntakeGateway for &G {
    fn register_intake(&self, payload: &EmergencyIntakePayload) -> Result<(), GatewayError> {
        (**self).register_intake(payload)
    }

    fn pending_intakes(&self) -> Result<Vec<WaitingListEntry>, GatewayError> {
        (**self).pending_intakes()
    }
}

/// The single message shown to the user. A new notice always replaces the previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Success(message) | Notice::Error(message) => message,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

pub struct IntakeDesk<G> {
    gateway: G,
    draft: EmergencyIntakeDraft,
    patient_cuil: CuilInputState,
    nurse_cuil: CuilInputState,
    notice: Option<Notice>,
    waiting_list: WaitingList,
}

impl<G: IntakeGateway> IntakeDesk<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            draft: EmergencyIntakeDraft::default(),
            patient_cuil: CuilInputState::new(),
            nurse_cuil: CuilInputState::new(),
            notice: None,
            waiting_list: WaitingList::new(),
        }
    }

    /// Records a change to one field.
    ///
    /// CUIL fields go through the formatter and the draft stores the formatted text.
    pub fn update(&mut self, field: IntakeField, raw: &str) {
        let value = match field {
            IntakeField::PatientIdentifier => self.patient_cuil.handle_change(raw).value(),
            IntakeField::NurseIdentifier => self.nurse_cuil.handle_change(raw).value(),
            _ => raw,
        }
        .to_owned();
        self.draft.set(field, value);
    }

    pub fn draft(&self) -> &EmergencyIntakeDraft {
        &self.draft
    }

    pub fn patient_cuil(&self) -> &CuilInputState {
        &self.patient_cuil
    }

    pub fn nurse_cuil(&self) -> &CuilInputState {
        &self.nurse_cuil
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn waiting_list(&self) -> &WaitingList {
        &self.waiting_list
    }

    /// True once anything has been typed into the form.
    pub fn has_data(&self) -> bool {
        !self.draft.is_blank()
    }

    /// Discards the form and any notice. The waiting list is kept.
    pub fn clear(&mut self) {
        self.reset_form();
        self.notice = None;
    }

    /// Validates the form and registers it with the gateway.
    ///
    /// On success the form is cleared and the waiting list refreshed; a refresh failure then
    /// replaces the success notice but does not undo the registration.
    ///
    /// # Errors
    ///
    /// - [`SubmitError::Validation`] if the form is incomplete; the gateway is not called.
    /// - [`SubmitError::Gateway`] if registration fails; the form is kept for another attempt.
    pub fn submit(&mut self) -> Result<EmergencyIntakePayload, SubmitError> {
        self.notice = None;

        let payload = match assemble(&self.draft) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!("intake rejected: {err}");
                self.notice = Some(Notice::Error(err.to_string()));
                return Err(err.into());
            }
        };

        if let Err(err) = self.gateway.register_intake(&payload) {
            tracing::warn!("intake registration failed: {err}");
            self.notice = Some(Notice::Error(err.to_string()));
            return Err(err.into());
        }

        tracing::info!(severity = %payload.severity(), "emergency intake registered");
        self.notice = Some(Notice::Success(INTAKE_REGISTERED_MESSAGE.to_string()));
        self.reset_form();
        // A refresh failure is already recorded as the notice.
        let _ = self.refresh();

        Ok(payload)
    }

    /// Fetches a fresh waiting list. On failure the previous list stays and the error becomes
    /// the notice.
    pub fn refresh(&mut self) -> Result<usize, GatewayError> {
        let snapshot = self.gateway.pending_intakes();
        match self.waiting_list.apply(snapshot, Utc::now()) {
            Ok(count) => {
                tracing::debug!(count, "waiting list refreshed");
                Ok(count)
            }
            Err(err) => {
                tracing::warn!("waiting list refresh failed: {err}");
                self.notice = Some(Notice::Error(err.to_string()));
                Err(err)
            }
        }
    }

    fn reset_form(&mut self) {
        self.draft = EmergencyIntakeDraft::default();
        self.patient_cuil.reset();
        self.nurse_cuil.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::VitalSigns;
    use crate::validation::Field;
    use crate::ValidationError;
    use std::cell::RefCell;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Register(String),
        Pending,
    }

    /// Records calls in order and replays scripted outcomes.
    #[derive(Default)]
    struct RecordingGateway {
        calls: RefCell<Vec<Call>>,
        pending: RefCell<Vec<WaitingListEntry>>,
        fail_register: Option<String>,
        fail_pending: Option<String>,
    }

    impl IntakeGateway for RecordingGateway {
        fn register_intake(&self, payload: &EmergencyIntakePayload) -> Result<(), GatewayError> {
            self.calls
                .borrow_mut()
                .push(Call::Register(payload.patient_identifier().to_string()));
            if let Some(message) = &self.fail_register {
                return Err(GatewayError::new(message.clone()));
            }
            self.pending.borrow_mut().push(WaitingListEntry {
                patient_identifier: payload.patient_identifier().to_string(),
                severity: payload.severity().to_string(),
                note: payload.note().to_string(),
                vitals: *payload.vitals(),
                ..Default::default()
            });
            Ok(())
        }

        fn pending_intakes(&self) -> Result<Vec<WaitingListEntry>, GatewayError> {
            self.calls.borrow_mut().push(Call::Pending);
            match &self.fail_pending {
                Some(message) => Err(GatewayError::new(message.clone())),
                None => Ok(self.pending.borrow().clone()),
            }
        }
    }

    fn fill(desk: &mut IntakeDesk<&RecordingGateway>) {
        desk.update(IntakeField::PatientIdentifier, "20123456786");
        desk.update(IntakeField::Note, "chest pain");
        desk.update(IntakeField::Severity, "Critica");
        desk.update(IntakeField::NurseFirstName, "Ana");
        desk.update(IntakeField::NurseSurname, "Diaz");
        desk.update(IntakeField::NurseIdentifier, "27000000006");
        desk.update(IntakeField::Temperature, "37.5");
    }

    #[test]
    fn test_update_formats_cuil_fields() {
        let gateway = RecordingGateway::default();
        let mut desk = IntakeDesk::new(&gateway);

        desk.update(IntakeField::PatientIdentifier, "2012345678");
        assert_eq!(desk.draft().patient_identifier, "20-12345678");
        assert_eq!(desk.patient_cuil().validity(), crate::Validity::Unknown);

        desk.update(IntakeField::PatientIdentifier, "20-12345678-6");
        assert_eq!(desk.patient_cuil().validity(), crate::Validity::Valid);

        desk.update(IntakeField::Note, "  kept as typed ");
        assert_eq!(desk.draft().note, "  kept as typed ");
        assert!(desk.has_data());
    }

    #[test]
    fn test_submit_registers_then_refreshes() {
        let gateway = RecordingGateway::default();
        let mut desk = IntakeDesk::new(&gateway);
        fill(&mut desk);

        let payload = desk.submit().expect("registered");
        assert_eq!(payload.vitals().temperature, Some(37.5));

        assert_eq!(
            *gateway.calls.borrow(),
            vec![Call::Register("20-12345678-6".into()), Call::Pending]
        );
        assert_eq!(
            desk.notice(),
            Some(&Notice::Success("emergency intake registered".into()))
        );
        assert!(!desk.has_data());
        assert_eq!(desk.patient_cuil(), &CuilInputState::new());
        assert_eq!(desk.waiting_list().entries().len(), 1);
        assert_eq!(desk.waiting_list().entries()[0].severity, "Critica");
    }

    #[test]
    fn test_invalid_form_never_reaches_gateway() {
        let gateway = RecordingGateway::default();
        let mut desk = IntakeDesk::new(&gateway);
        fill(&mut desk);
        desk.update(IntakeField::NurseSurname, "  ");

        let err = desk.submit().expect_err("incomplete");
        assert_eq!(
            err,
            SubmitError::Validation(ValidationError::Required(Field::NurseSurname))
        );
        assert!(gateway.calls.borrow().is_empty());
        assert_eq!(
            desk.notice().map(Notice::message),
            Some("nurse surname is required")
        );
        assert!(desk.has_data());
    }

    #[test]
    fn test_gateway_failure_keeps_form_and_skips_refresh() {
        let gateway = RecordingGateway {
            fail_register: Some("backend said no".into()),
            ..Default::default()
        };
        let mut desk = IntakeDesk::new(&gateway);
        fill(&mut desk);

        let err = desk.submit().expect_err("gateway failure");
        assert!(matches!(err, SubmitError::Gateway(_)));
        assert_eq!(
            *gateway.calls.borrow(),
            vec![Call::Register("20-12345678-6".into())]
        );
        assert_eq!(
            desk.notice(),
            Some(&Notice::Error("backend said no".into()))
        );
        assert_eq!(desk.draft().temperature, "37.5");
    }

    #[test]
    fn test_refresh_failure_after_success_replaces_notice() {
        let gateway = RecordingGateway {
            fail_pending: Some("list unavailable".into()),
            ..Default::default()
        };
        let mut desk = IntakeDesk::new(&gateway);
        fill(&mut desk);

        desk.submit().expect("registration itself succeeded");
        let notice = desk.notice().expect("notice");
        assert!(notice.is_error());
        assert_eq!(notice.message(), "list unavailable");
        assert!(!desk.has_data());
        assert!(desk.waiting_list().is_empty());
        assert_eq!(desk.waiting_list().refreshed_at(), None);
    }

    #[test]
    fn test_new_message_replaces_previous() {
        let gateway = RecordingGateway::default();
        let mut desk = IntakeDesk::new(&gateway);

        desk.submit().expect_err("empty form");
        assert_eq!(
            desk.notice().map(Notice::message),
            Some("patient CUIL is required")
        );

        fill(&mut desk);
        desk.submit().expect("registered");
        assert_eq!(
            desk.notice().map(Notice::message),
            Some("emergency intake registered")
        );
    }

    #[test]
    fn test_clear_resets_form_and_notice_but_not_list() {
        let gateway = RecordingGateway::default();
        gateway.pending.borrow_mut().push(WaitingListEntry {
            patient_surname: "Perez".into(),
            vitals: VitalSigns::default(),
            ..Default::default()
        });
        let mut desk = IntakeDesk::new(&gateway);
        desk.refresh().expect("refresh");

        desk.update(IntakeField::NurseIdentifier, "27");
        desk.submit().expect_err("incomplete");
        desk.clear();

        assert!(desk.notice().is_none());
        assert!(!desk.has_data());
        assert_eq!(desk.nurse_cuil(), &CuilInputState::new());
        assert_eq!(desk.waiting_list().entries().len(), 1);
    }
}
