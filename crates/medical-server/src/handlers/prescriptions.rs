use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use medical_core::dto::{validate_dosage, PrescriptionDto, PrescriptionMedicationDto};
use medical_core::mapper;
use medical_core::service::{PrescriptionMedicationService, PrescriptionService};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/prescriptions", get(list_prescriptions))
        .route(
            "/prescriptions/:id",
            get(get_prescription)
                .put(update_prescription)
                .delete(delete_prescription),
        )
        .route(
            "/prescriptions/:id/medications/:medication_id",
            post(add_medication),
        )
        .route(
            "/prescription-medications/:id",
            get(get_entry).delete(delete_entry),
        )
        .route("/prescription-medications/:id/dosage", put(update_dosage))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DosageParams {
    dosage: String,
}

async fn list_prescriptions(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<PrescriptionDto>>> {
    let db = state.db()?;
    let prescriptions = PrescriptionService::new(&db).get_all()?;
    Ok(Json(
        prescriptions
            .iter()
            .map(mapper::to_prescription_dto)
            .collect(),
    ))
}

async fn get_prescription(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<PrescriptionDto>> {
    let db = state.db()?;
    let prescription = PrescriptionService::new(&db).get_by_id(id)?;
    Ok(Json(mapper::to_prescription_dto(&prescription)))
}

async fn update_prescription(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(dto): ApiJson<PrescriptionDto>,
) -> ApiResult<Json<PrescriptionDto>> {
    dto.validate_update()?;
    let db = state.db()?;
    let updated = PrescriptionService::new(&db).update(id, &mapper::to_prescription(&dto))?;
    Ok(Json(mapper::to_prescription_dto(&updated)))
}

async fn delete_prescription(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    let db = state.db()?;
    PrescriptionService::new(&db).delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn add_medication(
    State(state): State<AppState>,
    ApiPath((prescription_id, medication_id)): ApiPath<(i64, i64)>,
    ApiQuery(params): ApiQuery<DosageParams>,
) -> ApiResult<Json<PrescriptionDto>> {
    validate_dosage(&params.dosage)?;
    let db = state.db()?;
    let prescription = PrescriptionService::new(&db).add_medication(
        prescription_id,
        medication_id,
        &params.dosage,
    )?;
    Ok(Json(mapper::to_prescription_dto(&prescription)))
}

async fn get_entry(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<PrescriptionMedicationDto>> {
    let db = state.db()?;
    let entry = PrescriptionMedicationService::new(&db).get_by_id(id)?;
    Ok(Json(mapper::to_prescription_medication_dto(&entry)))
}

async fn update_dosage(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(params): ApiQuery<DosageParams>,
) -> ApiResult<Json<PrescriptionMedicationDto>> {
    validate_dosage(&params.dosage)?;
    let db = state.db()?;
    let entry = PrescriptionMedicationService::new(&db).update_dosage(id, &params.dosage)?;
    Ok(Json(mapper::to_prescription_medication_dto(&entry)))
}

async fn delete_entry(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    let db = state.db()?;
    PrescriptionMedicationService::new(&db).delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}
