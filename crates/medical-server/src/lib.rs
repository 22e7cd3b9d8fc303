//! Medical Server - REST API over medical-core
//!
//! All resource routes live under `/api`; `/health` sits outside it.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;

use std::sync::{Arc, Mutex, MutexGuard};

use axum::routing::get;
use axum::{Json, Router};
use medical_core::Database;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::{ApiError, ApiResult};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Database>>,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
        }
    }

    /// Lock the database for the rest of the request. Never hold the guard
    /// across an `.await`.
    pub fn db(&self) -> ApiResult<MutexGuard<'_, Database>> {
        self.db
            .lock()
            .map_err(|_| ApiError::Internal("database lock poisoned".into()))
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .merge(handlers::patients::routes())
        .merge(handlers::doctors::routes())
        .merge(handlers::specializations::routes())
        .merge(handlers::appointments::routes())
        .merge(handlers::prescriptions::routes())
        .merge(handlers::medications::routes());

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
