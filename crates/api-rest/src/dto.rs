//! Request and response bodies that exist only on the REST surface.
//!
//! Form drafts and payloads are the core types themselves.

use serde::{Deserialize, Serialize};
use triage_core::SeverityLevel;
use utoipa::ToSchema;

/// One keystroke's worth of CUIL input.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CuilInputReq {
    /// Full text of the field after the keystroke.
    pub raw: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CuilCheckReq {
    pub cuil: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CuilCheckRes {
    /// Every digit found in the input, untruncated.
    pub digits: String,
    /// Display form of the first 11 digits.
    pub formatted: String,
    pub valid: bool,
    /// Two-digit prefix class; present only when valid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Why the CUIL was rejected; absent when valid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// The single message returned when a form is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ValidationRes {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SeverityLevelsRes {
    /// Most severe first.
    pub levels: Vec<SeverityLevel>,
}
