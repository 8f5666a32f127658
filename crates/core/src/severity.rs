//! Triage severity levels.

use crate::error::ParseSeverityError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Closed set of emergency levels.
///
/// Ordering follows severity: `Critical > Emergency > Urgent > MinorUrgent > NonUrgent`.
/// Variants are declared least severe first so the derived `Ord` matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum SeverityLevel {
    #[serde(rename = "Sin Urgencia")]
    NonUrgent,
    #[serde(rename = "Urgencia Menor")]
    MinorUrgent,
    #[serde(rename = "Urgencia")]
    Urgent,
    #[serde(rename = "Emergencia")]
    Emergency,
    #[serde(rename = "Critica")]
    Critical,
}

impl SeverityLevel {
    /// All levels, most severe first (the order offered to the user).
    pub const ALL: [SeverityLevel; 5] = [
        SeverityLevel::Critical,
        SeverityLevel::Emergency,
        SeverityLevel::Urgent,
        SeverityLevel::MinorUrgent,
        SeverityLevel::NonUrgent,
    ];

    /// The name exchanged with the backend.
    pub fn wire_name(self) -> &'static str {
        match self {
            SeverityLevel::Critical => "Critica",
            SeverityLevel::Emergency => "Emergencia",
            SeverityLevel::Urgent => "Urgencia",
            SeverityLevel::MinorUrgent => "Urgencia Menor",
            SeverityLevel::NonUrgent => "Sin Urgencia",
        }
    }
}

impl std::fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for SeverityLevel {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SeverityLevel::ALL
            .into_iter()
            .find(|level| level.wire_name() == s)
            .ok_or_else(|| ParseSeverityError(s.to_string()))
    }
}
