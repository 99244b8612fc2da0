use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::{
    extractors::AppJson,
    models::reservation::{CreateReservationRequest, ReservationQuery},
    services::{reservation_service::ReservationService, AppState},
};

pub async fn list_reservations(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReservationQuery>,
) -> impl IntoResponse {
    let service = ReservationService::new(&state);
    Json(service.search(query.search.as_deref()).await)
}

pub async fn get_reservation(
    State(state): State<Arc<AppState>>,
    Path(reservation_id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let service = ReservationService::new(&state);
    let detail = service.detail(&reservation_id).await?;
    Ok((StatusCode::OK, Json(detail)))
}

pub async fn create_reservation(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<CreateReservationRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    tracing::info!(
        "Creating reservation: type={:?}, group_size={}, date={}",
        req.activity_type,
        req.group_size,
        req.date
    );

    let service = ReservationService::new(&state);
    let reservation = service.create(req).await?;
    Ok((StatusCode::CREATED, Json(reservation)))
}
