//! The waiting list of pending emergency intakes, as last reported by the gateway.
//!
//! Entries are opaque display data: they are kept in the order the backend returned them and
//! are neither validated nor re-sorted by severity here.

use crate::constants::NO_PENDING_INTAKES_MESSAGE;
use crate::error::GatewayError;
use crate::intake::VitalSigns;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct WaitingListEntry {
    pub patient_first_name: String,
    pub patient_surname: String,
    pub patient_identifier: String,
    /// Emergency level as the backend names it.
    pub severity: String,
    pub note: String,
    #[serde(flatten)]
    pub vitals: VitalSigns,
}

/// Last good snapshot of the waiting list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaitingList {
    entries: Vec<WaitingListEntry>,
    refreshed_at: Option<DateTime<Utc>>,
}

impl WaitingList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies the outcome of a fetch.
    ///
    /// A successful snapshot replaces the entries (an empty one included). A failure leaves the
    /// previous entries untouched and is handed back to the caller.
    pub fn apply(
        &mut self,
        snapshot: Result<Vec<WaitingListEntry>, GatewayError>,
        at: DateTime<Utc>,
    ) -> Result<usize, GatewayError> {
        let entries = snapshot?;
        self.entries = entries;
        self.refreshed_at = Some(at);
        Ok(self.entries.len())
    }

    pub fn entries(&self) -> &[WaitingListEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// When the entries were last replaced, or `None` if never fetched.
    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.refreshed_at
    }

    /// Text to show instead of the list when there is nothing pending.
    pub fn empty_message(&self) -> Option<&'static str> {
        self.is_empty().then_some(NO_PENDING_INTAKES_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(surname: &str, severity: &str) -> WaitingListEntry {
        WaitingListEntry {
            patient_first_name: "Juan".into(),
            patient_surname: surname.into(),
            patient_identifier: "20-12345678-6".into(),
            severity: severity.into(),
            note: "fall".into(),
            vitals: VitalSigns::default(),
        }
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, hour, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn test_snapshot_keeps_backend_order() {
        let mut list = WaitingList::new();
        let count = list
            .apply(
                Ok(vec![entry("Perez", "Sin Urgencia"), entry("Lopez", "Critica")]),
                at(9),
            )
            .expect("snapshot");

        assert_eq!(count, 2);
        assert_eq!(list.entries()[0].patient_surname, "Perez");
        assert_eq!(list.entries()[1].patient_surname, "Lopez");
        assert_eq!(list.refreshed_at(), Some(at(9)));
        assert_eq!(list.empty_message(), None);
    }

    #[test]
    fn test_empty_snapshot_is_not_an_error() {
        let mut list = WaitingList::new();
        list.apply(Ok(vec![entry("Perez", "Urgencia")]), at(9))
            .expect("snapshot");
        list.apply(Ok(vec![]), at(10)).expect("empty snapshot");

        assert!(list.is_empty());
        assert_eq!(list.empty_message(), Some("no pending intakes"));
        assert_eq!(list.refreshed_at(), Some(at(10)));
    }

    #[test]
    fn test_failure_keeps_last_good_entries() {
        let mut list = WaitingList::new();
        list.apply(Ok(vec![entry("Perez", "Urgencia")]), at(9))
            .expect("snapshot");

        let err = list
            .apply(Err(GatewayError::new("backend unavailable")), at(10))
            .expect_err("failure");
        assert_eq!(err.to_string(), "backend unavailable");
        assert_eq!(list.entries().len(), 1);
        assert_eq!(list.refreshed_at(), Some(at(9)));
    }

    #[test]
    fn test_entry_deserialises_flat_vitals() {
        let entry: WaitingListEntry = serde_json::from_str(
            r#"{
                "patientFirstName": "Juan",
                "patientSurname": "Perez",
                "patientIdentifier": "20-12345678-6",
                "severity": "Emergencia",
                "note": "fall",
                "heartRate": 98
            }"#,
        )
        .expect("entry");
        assert_eq!(entry.vitals.heart_rate, Some(98.0));
        assert_eq!(entry.vitals.temperature, None);
    }
}
