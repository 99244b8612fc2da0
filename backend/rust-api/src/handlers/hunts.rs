use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::{
    models::{HuntDetailView, HuntSummaryView},
    services::AppState,
};

pub async fn list_hunts(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let hunts: Vec<HuntSummaryView> = state.catalog.list().map(HuntSummaryView::from).collect();
    Json(hunts)
}

pub async fn get_hunt(
    State(state): State<Arc<AppState>>,
    Path(hunt_id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let hunt = state.catalog.get(&hunt_id)?;
    Ok((StatusCode::OK, Json(HuntDetailView::from(hunt))))
}
