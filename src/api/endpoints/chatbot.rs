//! Assistant endpoints.
//!
//! - `POST /api/chatbot/message`: canned reply for a message
//! - `GET /api/chatbot/tips`: one random health tip

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::ApiResponse;
use crate::assistant::{self, AssistantReply, HealthTip};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageRequest {
    pub message: Option<String>,
    pub patient_id: Option<String>,
}

/// `POST /api/chatbot/message`
pub async fn message(
    payload: Result<Json<ChatMessageRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<AssistantReply>>, ApiError> {
    let Json(req) = payload?;
    let message = req
        .message
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Message is required".into()))?;

    tracing::debug!(patient_id = ?req.patient_id, "Assistant message received");
    Ok(Json(ApiResponse::data(assistant::respond(&message))))
}

/// `GET /api/chatbot/tips`
pub async fn tip() -> Json<ApiResponse<&'static HealthTip>> {
    Json(ApiResponse::data(assistant::random_tip()))
}
