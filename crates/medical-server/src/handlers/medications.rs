use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use medical_core::dto::{MedicationDto, Validate};
use medical_core::mapper;
use medical_core::service::MedicationService;

use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/medications", get(list_medications).post(create_medication))
        .route(
            "/medications/:id",
            get(get_medication)
                .put(update_medication)
                .delete(delete_medication),
        )
}

async fn list_medications(State(state): State<AppState>) -> ApiResult<Json<Vec<MedicationDto>>> {
    let db = state.db()?;
    let medications = MedicationService::new(&db).get_all()?;
    Ok(Json(medications.iter().map(mapper::to_medication_dto).collect()))
}

async fn get_medication(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<MedicationDto>> {
    let db = state.db()?;
    let medication = MedicationService::new(&db).get_by_id(id)?;
    Ok(Json(mapper::to_medication_dto(&medication)))
}

async fn create_medication(
    State(state): State<AppState>,
    ApiJson(dto): ApiJson<MedicationDto>,
) -> ApiResult<(StatusCode, Json<MedicationDto>)> {
    dto.validate()?;
    let db = state.db()?;
    let created = MedicationService::new(&db).create(&mapper::to_medication(&dto))?;
    Ok((StatusCode::CREATED, Json(mapper::to_medication_dto(&created))))
}

async fn update_medication(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(dto): ApiJson<MedicationDto>,
) -> ApiResult<Json<MedicationDto>> {
    dto.validate()?;
    let db = state.db()?;
    let updated = MedicationService::new(&db).update(id, &mapper::to_medication(&dto))?;
    Ok(Json(mapper::to_medication_dto(&updated)))
}

async fn delete_medication(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    let db = state.db()?;
    MedicationService::new(&db).delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}
