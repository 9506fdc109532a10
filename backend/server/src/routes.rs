use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::Value;
#[cfg(feature = "verbose")]
use tracing::info;

use crate::{error::AppError, state::AppState};

#[derive(Deserialize)]
pub struct KeyQuery {
    key: Option<String>,
}

#[derive(Deserialize)]
pub struct Upload {
    key: String,
    data: Value,
}

pub async fn get_data_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<KeyQuery>,
) -> Result<Json<Value>, AppError> {
    let key = query.key.ok_or(AppError::MalformedPayload)?;

    Ok(Json(state.store.read(&key).await?))
}

pub async fn post_data_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Upload>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(upload) = payload.map_err(|_| AppError::MalformedPayload)?;

    state.store.write(&upload.key, &upload.data).await?;

    #[cfg(feature = "verbose")]
    info!("Replaced collection {}", upload.key);

    Ok(StatusCode::OK)
}
