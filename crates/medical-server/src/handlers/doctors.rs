use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use medical_core::dto::{DoctorDto, Validate};
use medical_core::mapper;
use medical_core::models::Doctor;
use medical_core::service::DoctorService;

use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/doctors", get(list_doctors).post(create_doctor))
        .route(
            "/doctors/:id",
            get(get_doctor).put(update_doctor).delete(delete_doctor),
        )
        .route(
            "/doctors/specialization/:id",
            get(list_doctors_by_specialization),
        )
}

fn to_dtos(doctors: &[Doctor]) -> Vec<DoctorDto> {
    doctors.iter().map(mapper::to_doctor_dto).collect()
}

async fn list_doctors(State(state): State<AppState>) -> ApiResult<Json<Vec<DoctorDto>>> {
    let db = state.db()?;
    let doctors = DoctorService::new(&db).get_all()?;
    Ok(Json(to_dtos(&doctors)))
}

async fn get_doctor(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<DoctorDto>> {
    let db = state.db()?;
    let doctor = DoctorService::new(&db).get_by_id(id)?;
    Ok(Json(mapper::to_doctor_dto(&doctor)))
}

async fn create_doctor(
    State(state): State<AppState>,
    ApiJson(dto): ApiJson<DoctorDto>,
) -> ApiResult<(StatusCode, Json<DoctorDto>)> {
    dto.validate()?;
    let db = state.db()?;
    let created = DoctorService::new(&db).create(&mapper::to_doctor(&dto))?;
    Ok((StatusCode::CREATED, Json(mapper::to_doctor_dto(&created))))
}

async fn update_doctor(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(dto): ApiJson<DoctorDto>,
) -> ApiResult<Json<DoctorDto>> {
    dto.validate()?;
    let db = state.db()?;
    let updated = DoctorService::new(&db).update(id, &mapper::to_doctor(&dto))?;
    Ok(Json(mapper::to_doctor_dto(&updated)))
}

async fn delete_doctor(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    let db = state.db()?;
    DoctorService::new(&db).delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_doctors_by_specialization(
    State(state): State<AppState>,
    ApiPath(specialization_id): ApiPath<i64>,
) -> ApiResult<Json<Vec<DoctorDto>>> {
    let db = state.db()?;
    let doctors = DoctorService::new(&db).get_by_specialization(specialization_id)?;
    Ok(Json(to_dtos(&doctors)))
}
