//! # API REST
//!
//! REST API for the triage intake pipeline.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON bodies, status codes, CORS)
//!
//! Every handler is a stateless wrapper over `triage-core`. Validation failures come back as
//! `422 Unprocessable Entity` with a single `{message}` body, and so do bodies that fail to
//! deserialize (with the status axum assigns to the rejection).

#![warn(rust_2018_idioms)]

pub mod config;
pub mod dto;
pub mod error;
pub mod health;

use axum::{
    response::Json,
    routing::{get, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use config::RestConfig;
use dto::{CuilCheckReq, CuilCheckRes, CuilInputReq, SeverityLevelsRes, ValidationRes};
use error::{ApiError, JsonBody};
use health::{HealthRes, HealthService};
use triage_core::{
    cuil, Address, Cuil, CuilInputState, EmergencyIntakeDraft, EmergencyIntakePayload,
    NurseRegistrationDraft, NurseRegistrationPayload, PatientRegistrationDraft,
    PatientRegistrationPayload, SeverityLevel, Validity, VitalSigns,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        severity_levels,
        cuil_input,
        cuil_check,
        validate_intake,
        validate_patient,
        validate_nurse,
    ),
    components(schemas(
        HealthRes,
        SeverityLevelsRes,
        SeverityLevel,
        CuilInputReq,
        CuilInputState,
        Validity,
        CuilCheckReq,
        CuilCheckRes,
        ValidationRes,
        EmergencyIntakeDraft,
        EmergencyIntakePayload,
        VitalSigns,
        PatientRegistrationDraft,
        PatientRegistrationPayload,
        Address,
        NurseRegistrationDraft,
        NurseRegistrationPayload,
    ))
)]
pub struct ApiDoc;

/// Builds the REST router, including Swagger UI and the configured CORS policy.
pub fn router(config: &RestConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/severity-levels", get(severity_levels))
        .route("/cuil/input", post(cuil_input))
        .route("/cuil/check", post(cuil_check))
        .route("/intakes/validate", post(validate_intake))
        .route("/patients/validate", post(validate_patient))
        .route("/nurses/validate", post(validate_nurse))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(config.cors_layer())
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for monitoring and load balancers.
#[axum::debug_handler]
async fn health() -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/severity-levels",
    responses(
        (status = 200, description = "Emergency levels, most severe first", body = SeverityLevelsRes)
    )
)]
#[axum::debug_handler]
async fn severity_levels() -> Json<SeverityLevelsRes> {
    Json(SeverityLevelsRes {
        levels: SeverityLevel::ALL.to_vec(),
    })
}

#[utoipa::path(
    post,
    path = "/cuil/input",
    request_body = CuilInputReq,
    responses(
        (status = 200, description = "Formatted value and validity after the keystroke", body = CuilInputState),
        (status = 400, description = "Malformed JSON body", body = ValidationRes)
    )
)]
/// Runs one transition of the CUIL input state machine.
///
/// Malformed input degrades to fewer digits; only an unreadable body is rejected.
#[axum::debug_handler]
async fn cuil_input(
    JsonBody(req): JsonBody<CuilInputReq>,
) -> Result<Json<CuilInputState>, ApiError> {
    Ok(Json(CuilInputState::transition(&req.raw)))
}

#[utoipa::path(
    post,
    path = "/cuil/check",
    request_body = CuilCheckReq,
    responses(
        (status = 200, description = "Strict CUIL check result", body = CuilCheckRes),
        (status = 400, description = "Malformed JSON body", body = ValidationRes)
    )
)]
/// Checks a complete CUIL. The verdict is reported in the body, never as an error status.
#[axum::debug_handler]
async fn cuil_check(
    JsonBody(req): JsonBody<CuilCheckReq>,
) -> Result<Json<CuilCheckRes>, ApiError> {
    let digits: String = req.cuil.chars().filter(char::is_ascii_digit).collect();
    let formatted = cuil::format(&cuil::normalize(&req.cuil));

    let res = match Cuil::parse(&req.cuil) {
        Ok(cuil) => CuilCheckRes {
            digits,
            formatted,
            valid: true,
            prefix: Some(cuil.prefix().to_owned()),
            reason: None,
        },
        Err(err) => CuilCheckRes {
            digits,
            formatted,
            valid: false,
            prefix: None,
            reason: Some(err.to_string()),
        },
    };
    Ok(Json(res))
}

#[utoipa::path(
    post,
    path = "/intakes/validate",
    request_body = EmergencyIntakeDraft,
    responses(
        (status = 200, description = "Submission-ready intake", body = EmergencyIntakePayload),
        (status = 400, description = "Malformed JSON body", body = ValidationRes),
        (status = 422, description = "The first failing field, or a field of the wrong JSON type", body = ValidationRes)
    )
)]
/// Validates an emergency intake draft and returns the payload to submit.
#[axum::debug_handler]
async fn validate_intake(
    JsonBody(draft): JsonBody<EmergencyIntakeDraft>,
) -> Result<Json<EmergencyIntakePayload>, ApiError> {
    Ok(Json(triage_core::assemble(&draft)?))
}

#[utoipa::path(
    post,
    path = "/patients/validate",
    request_body = PatientRegistrationDraft,
    responses(
        (status = 200, description = "Submission-ready patient registration", body = PatientRegistrationPayload),
        (status = 400, description = "Malformed JSON body", body = ValidationRes),
        (status = 422, description = "The first failing field, or a field of the wrong JSON type", body = ValidationRes)
    )
)]
#[axum::debug_handler]
async fn validate_patient(
    JsonBody(draft): JsonBody<PatientRegistrationDraft>,
) -> Result<Json<PatientRegistrationPayload>, ApiError> {
    Ok(Json(triage_core::assemble_patient(&draft)?))
}

#[utoipa::path(
    post,
    path = "/nurses/validate",
    request_body = NurseRegistrationDraft,
    responses(
        (status = 200, description = "Submission-ready nurse registration", body = NurseRegistrationPayload),
        (status = 400, description = "Malformed JSON body", body = ValidationRes),
        (status = 422, description = "The first failing field, or a field of the wrong JSON type", body = ValidationRes)
    )
)]
#[axum::debug_handler]
async fn validate_nurse(
    JsonBody(draft): JsonBody<NurseRegistrationDraft>,
) -> Result<Json<NurseRegistrationPayload>, ApiError> {
    Ok(Json(triage_core::assemble_nurse(&draft)?))
}
