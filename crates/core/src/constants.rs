//! Constants used throughout the triage core crate.
//!
//! User-facing texts that are not tied to a single validation failure live here so every
//! front-end shows the same wording.

/// Number of digits in a complete CUIL.
pub const CUIL_LEN: usize = 11;

/// Number of digits in the CUIL prefix (the part before the first hyphen).
pub const CUIL_PREFIX_LEN: usize = 2;

/// Number of digits in the CUIL body (between the two hyphens).
pub const CUIL_BODY_LEN: usize = 8;

/// Weights applied to the first ten CUIL digits when computing the check digit.
pub const CUIL_CHECK_WEIGHTS: [u32; 10] = [5, 4, 3, 2, 7, 6, 5, 4, 3, 2];

/// Notice shown after an emergency intake has been accepted by the gateway.
pub const INTAKE_REGISTERED_MESSAGE: &str = "emergency intake registered";

/// Text shown in place of an empty waiting list.
pub const NO_PENDING_INTAKES_MESSAGE: &str = "no pending intakes";
