use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use medical_core::dto::{AppointmentDto, PrescriptionDto, Validate};
use medical_core::mapper;
use medical_core::models::Appointment;
use medical_core::service::{AppointmentService, PrescriptionService, ServiceError};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/appointments",
            get(list_appointments).post(create_appointment),
        )
        .route(
            "/appointments/:id",
            get(get_appointment)
                .put(update_appointment)
                .delete(delete_appointment),
        )
        .route("/appointments/patient/:id", get(list_by_patient))
        .route("/appointments/doctor/:id", get(list_by_doctor))
        .route("/appointments/:id/prescriptions", post(create_prescription))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PrescriptionParams {
    instructions: Option<String>,
}

fn to_dtos(appointments: &[Appointment]) -> Vec<AppointmentDto> {
    appointments.iter().map(mapper::to_appointment_dto).collect()
}

async fn list_appointments(State(state): State<AppState>) -> ApiResult<Json<Vec<AppointmentDto>>> {
    let db = state.db()?;
    let appointments = AppointmentService::new(&db).get_all()?;
    Ok(Json(to_dtos(&appointments)))
}

async fn get_appointment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<AppointmentDto>> {
    let db = state.db()?;
    let appointment = AppointmentService::new(&db).get_by_id(id)?;
    Ok(Json(mapper::to_appointment_dto(&appointment)))
}

async fn create_appointment(
    State(state): State<AppState>,
    ApiJson(dto): ApiJson<AppointmentDto>,
) -> ApiResult<(StatusCode, Json<AppointmentDto>)> {
    dto.validate()?;
    let db = state.db()?;
    let created = AppointmentService::new(&db).create(&mapper::to_appointment(&dto))?;
    Ok((StatusCode::CREATED, Json(mapper::to_appointment_dto(&created))))
}

async fn update_appointment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(dto): ApiJson<AppointmentDto>,
) -> ApiResult<Json<AppointmentDto>> {
    dto.validate_update()?;
    let db = state.db()?;
    let updated = AppointmentService::new(&db).update(id, &mapper::to_appointment(&dto))?;
    Ok(Json(mapper::to_appointment_dto(&updated)))
}

async fn delete_appointment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    let db = state.db()?;
    AppointmentService::new(&db).delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// 404 when the patient is unknown or has no appointments.
async fn list_by_patient(
    State(state): State<AppState>,
    ApiPath(patient_id): ApiPath<i64>,
) -> ApiResult<Json<Vec<AppointmentDto>>> {
    let db = state.db()?;
    let appointments = AppointmentService::new(&db).get_by_patient(patient_id)?;
    if appointments.is_empty() {
        return Err(ServiceError::NoAppointmentsForPatient(patient_id).into());
    }
    Ok(Json(to_dtos(&appointments)))
}

/// 404 when the doctor is unknown or has no appointments.
async fn list_by_doctor(
    State(state): State<AppState>,
    ApiPath(doctor_id): ApiPath<i64>,
) -> ApiResult<Json<Vec<AppointmentDto>>> {
    let db = state.db()?;
    let appointments = AppointmentService::new(&db).get_by_doctor(doctor_id)?;
    if appointments.is_empty() {
        return Err(ServiceError::NoAppointmentsForDoctor(doctor_id).into());
    }
    Ok(Json(to_dtos(&appointments)))
}

async fn create_prescription(
    State(state): State<AppState>,
    ApiPath(appointment_id): ApiPath<i64>,
    ApiQuery(params): ApiQuery<PrescriptionParams>,
) -> ApiResult<(StatusCode, Json<PrescriptionDto>)> {
    let db = state.db()?;
    let created = PrescriptionService::new(&db).create(appointment_id, params.instructions)?;
    Ok((StatusCode::CREATED, Json(mapper::to_prescription_dto(&created))))
}
