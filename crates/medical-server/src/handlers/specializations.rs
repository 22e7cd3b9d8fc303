use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use medical_core::dto::{SpecializationDto, Validate};
use medical_core::mapper;
use medical_core::service::SpecializationService;

use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/specializations",
            get(list_specializations).post(create_specialization),
        )
        .route(
            "/specializations/:id",
            get(get_specialization)
                .put(update_specialization)
                .delete(delete_specialization),
        )
}

async fn list_specializations(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<SpecializationDto>>> {
    let db = state.db()?;
    let specializations = SpecializationService::new(&db).get_all()?;
    Ok(Json(
        specializations
            .iter()
            .map(mapper::to_specialization_dto)
            .collect(),
    ))
}

/// The specialization with the doctors holding it.
async fn get_specialization(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<SpecializationDto>> {
    let db = state.db()?;
    let (specialization, doctors) = SpecializationService::new(&db).get_with_doctors(id)?;
    Ok(Json(mapper::to_specialization_dto_with_doctors(
        &specialization,
        &doctors,
    )))
}

async fn create_specialization(
    State(state): State<AppState>,
    ApiJson(dto): ApiJson<SpecializationDto>,
) -> ApiResult<(StatusCode, Json<SpecializationDto>)> {
    dto.validate()?;
    let db = state.db()?;
    let created = SpecializationService::new(&db).create(&mapper::to_specialization(&dto))?;
    Ok((
        StatusCode::CREATED,
        Json(mapper::to_specialization_dto(&created)),
    ))
}

async fn update_specialization(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(dto): ApiJson<SpecializationDto>,
) -> ApiResult<Json<SpecializationDto>> {
    dto.validate()?;
    let db = state.db()?;
    let updated =
        SpecializationService::new(&db).update(id, &mapper::to_specialization(&dto))?;
    Ok(Json(mapper::to_specialization_dto(&updated)))
}

async fn delete_specialization(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    let db = state.db()?;
    SpecializationService::new(&db).delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}
