use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::{
    extractors::AppJson,
    models::{answer::SubmitAnswerRequest, hint::VerifyQrRequest, CreateSessionRequest},
    services::{session_service::SessionService, AppState},
};

pub async fn create_session(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<CreateSessionRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    tracing::info!(
        "Creating session for hunt_id={}, reservation_id={}",
        req.hunt_id,
        req.reservation_id
    );

    let service = SessionService::new(&state);
    let response = service.create_session(req).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let service = SessionService::new(&state);
    let session = service.get_session(&session_id).await?;
    Ok((StatusCode::OK, Json(session)))
}

pub async fn activate_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    tracing::info!("Activating session: {}", session_id);

    let service = SessionService::new(&state);
    let session = service.activate(&session_id).await?;
    Ok((StatusCode::OK, Json(session)))
}

pub async fn submit_answer(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
    AppJson(req): AppJson<SubmitAnswerRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    tracing::info!("Submitting answer for session: {}", session_id);

    let service = SessionService::new(&state);
    let response = service.submit_answer(&session_id, req).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub async fn request_hint(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let service = SessionService::new(&state);
    let reveal = service.request_hint(&session_id).await?;
    Ok((StatusCode::OK, Json(reveal)))
}

pub async fn verify_qr(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
    AppJson(req): AppJson<VerifyQrRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let service = SessionService::new(&state);
    let result = service.verify_qr(&session_id, &req.token).await?;
    Ok((StatusCode::OK, Json(result)))
}

pub async fn abandon_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    tracing::info!("Abandoning session: {}", session_id);

    let service = SessionService::new(&state);
    let session = service.abandon(&session_id).await?;
    Ok((StatusCode::OK, Json(session)))
}

pub async fn get_summary(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let service = SessionService::new(&state);
    let summary = service.summary(&session_id).await?;
    Ok((StatusCode::OK, Json(summary)))
}
