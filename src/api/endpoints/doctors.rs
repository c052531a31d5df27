//! Doctor directory endpoints.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, ApiResponse};
use crate::models::{Doctor, DoctorFilter};

#[derive(Debug, Default, Deserialize)]
pub struct DoctorListQuery {
    pub specialty: Option<String>,
    pub hospital: Option<String>,
}

/// `GET /api/doctors`
pub async fn list(
    State(ctx): State<ApiContext>,
    Query(query): Query<DoctorListQuery>,
) -> Json<ApiResponse<Vec<Doctor>>> {
    let filter = DoctorFilter {
        specialty: query.specialty.filter(|v| !v.is_empty()),
        hospital: query.hospital.filter(|v| !v.is_empty()),
    };
    Json(ApiResponse::data(ctx.core.directory().list(&filter)))
}

/// `GET /api/doctors/:id`
pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Doctor>>, ApiError> {
    let doctor = ctx
        .core
        .directory()
        .get(&id)
        .ok_or_else(|| ApiError::NotFound("Doctor not found".into()))?;
    Ok(Json(ApiResponse::data(doctor)))
}

/// `GET /api/doctors/list/specialties`
pub async fn specialties(State(ctx): State<ApiContext>) -> Json<ApiResponse<Vec<&'static str>>> {
    Json(ApiResponse::data(ctx.core.directory().specialties()))
}
