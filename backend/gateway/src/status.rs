//! Client status pings.

use axum::{extract::State, Json};
use serde::Deserialize;

use roaster_core::StatusCheck;

use crate::error::Result;
use crate::server::GatewayState;

#[derive(Debug, Deserialize)]
pub struct StatusCheckCreate {
    pub client_name: String,
}

/// Handler for `POST /api/status`
pub async fn create_status(
    State(state): State<GatewayState>,
    Json(input): Json<StatusCheckCreate>,
) -> Result<Json<StatusCheck>> {
    let check = state.analyzer.record_status(&input.client_name).await?;
    Ok(Json(check))
}

/// Handler for `GET /api/status`
pub async fn list_status(State(state): State<GatewayState>) -> Result<Json<Vec<StatusCheck>>> {
    Ok(Json(state.analyzer.list_status().await?))
}
