use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use medical_core::dto::{PatientDto, Validate};
use medical_core::mapper;
use medical_core::service::PatientService;

use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/patients", get(list_patients).post(create_patient))
        .route(
            "/patients/:id",
            get(get_patient).put(update_patient).delete(delete_patient),
        )
}

async fn create_patient(
    State(state): State<AppState>,
    ApiJson(dto): ApiJson<PatientDto>,
) -> ApiResult<(StatusCode, Json<PatientDto>)> {
    dto.validate()?;
    let db = state.db()?;
    let created = PatientService::new(&db).create(&mapper::to_patient(&dto))?;
    Ok((StatusCode::CREATED, Json(mapper::to_patient_dto(&created))))
}

async fn list_patients(State(state): State<AppState>) -> ApiResult<Json<Vec<PatientDto>>> {
    let db = state.db()?;
    let patients = PatientService::new(&db).get_all()?;
    Ok(Json(patients.iter().map(mapper::to_patient_dto).collect()))
}

async fn get_patient(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<PatientDto>> {
    let db = state.db()?;
    let patient = PatientService::new(&db).get_by_id(id)?;
    Ok(Json(mapper::to_patient_dto(&patient)))
}

async fn update_patient(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(dto): ApiJson<PatientDto>,
) -> ApiResult<Json<PatientDto>> {
    dto.validate()?;
    let db = state.db()?;
    let updated = PatientService::new(&db).update(id, &mapper::to_patient(&dto))?;
    Ok(Json(mapper::to_patient_dto(&updated)))
}

async fn delete_patient(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    let db = state.db()?;
    PatientService::new(&db).delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}
