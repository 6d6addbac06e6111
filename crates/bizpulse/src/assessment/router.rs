use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::intake::AuditInput;
use super::report::AssessmentReport;
use super::sector::{normalize_sector, Sector};
use super::simulation::ScenarioType;
use super::{AssessmentEngine, AssessmentError};
use crate::import::{FieldValueImporter, ImportError};

/// Router builder exposing the assessment, simulation and sector endpoints.
pub fn assessment_router(engine: Arc<AssessmentEngine>) -> Router {
    Router::new()
        .route("/api/v1/assessments", post(assess_handler))
        .route("/api/v1/assessments/import", post(import_handler))
        .route("/api/v1/simulations", post(simulate_handler))
        .route("/api/v1/sectors", get(sectors_handler))
        .route("/api/v1/sectors/resolve", post(resolve_sector_handler))
        .with_state(engine)
}

#[derive(Debug, Deserialize)]
pub struct SimulationRequest {
    pub scenario: ScenarioType,
    pub audit: AuditInput,
    #[serde(default)]
    pub deltas: BTreeMap<String, f64>,
}

#[derive(Debug, Deserialize)]
pub struct SectorResolveRequest {
    #[serde(default)]
    pub sector: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SectorEntry {
    pub id: &'static str,
    pub label: &'static str,
    pub default_variant: &'static str,
    pub variants: &'static [&'static str],
}

pub(crate) async fn assess_handler(
    State(engine): State<Arc<AssessmentEngine>>,
    body: Bytes,
) -> Response {
    let input: AuditInput = match serde_json::from_slice(&body) {
        Ok(input) => input,
        Err(error) => return bad_request(error.to_string()),
    };
    assessment_response(&engine, input)
}

pub(crate) async fn import_handler(
    State(engine): State<Arc<AssessmentEngine>>,
    body: String,
) -> Response {
    match FieldValueImporter::from_str(&body) {
        Ok(record) => assessment_response(&engine, AuditInput::from(record)),
        Err(ImportError::Validation(issues)) => {
            let payload = json!({
                "error": "audit export rejected",
                "issues": issues,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn simulate_handler(
    State(engine): State<Arc<AssessmentEngine>>,
    body: Bytes,
) -> Response {
    let request: SimulationRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(error) => return bad_request(error.to_string()),
    };

    match engine.simulate(request.audit, request.scenario, &request.deltas) {
        Ok(Some(result)) => (StatusCode::OK, axum::Json(result)).into_response(),
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => assessment_error_response(error),
    }
}

pub(crate) async fn sectors_handler() -> Response {
    let sectors: Vec<SectorEntry> = Sector::ALL
        .into_iter()
        .map(|sector| SectorEntry {
            id: sector.id(),
            label: sector.label(),
            default_variant: sector.default_variant(),
            variants: sector.variants(),
        })
        .collect();
    (StatusCode::OK, axum::Json(sectors)).into_response()
}

pub(crate) async fn resolve_sector_handler(
    axum::Json(request): axum::Json<SectorResolveRequest>,
) -> Response {
    let resolution = normalize_sector(request.sector.as_deref());
    (StatusCode::OK, axum::Json(resolution)).into_response()
}

fn assessment_response(engine: &AssessmentEngine, input: AuditInput) -> Response {
    match engine.assess(input) {
        Ok(assessment) => {
            let report = AssessmentReport::from_assessment(&assessment, Local::now().date_naive());
            (StatusCode::OK, axum::Json(report)).into_response()
        }
        Err(error) => assessment_error_response(error),
    }
}

fn assessment_error_response(error: AssessmentError) -> Response {
    match error {
        AssessmentError::Invalid(issues) => {
            let payload = json!({
                "error": "invalid audit input",
                "issues": issues,
            });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        AssessmentError::Benchmark(error) => bad_request(error.to_string()),
    }
}

fn bad_request(message: String) -> Response {
    let payload = json!({
        "error": message,
    });
    (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
}
