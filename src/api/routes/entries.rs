//! Entry routes
//!
//! The board's read and write surface.
//!
//! - GET  /api/v1/entries - active entries, newest first
//! - POST /api/v1/entries - submit a new entry
//! - POST /api/v1/entries/:id/codes/:slot/toggle - flip one used-flag

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::{CreateEntryRequest, EntryListResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::store::{CodeSlot, Entry, NewEntry};

/// GET /api/v1/entries
///
/// Serves the live view's cached list; never hits the store directly.
pub async fn list_entries(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<EntryListResponse>> {
    let entries = state.view.entries().await;

    Ok(Json(EntryListResponse {
        total: entries.len(),
        loading: state.view.is_loading(),
        entries,
    }))
}

/// POST /api/v1/entries
///
/// Submit a new entry. Validation failures return 400 before any store
/// call; the stored entry comes back with id and creation time assigned.
pub async fn create_entry(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateEntryRequest>,
) -> ApiResult<(StatusCode, Json<Entry>)> {
    let entry = state
        .view
        .submit(NewEntry {
            user_name: req.user_name,
            code_1: req.code_1,
            code_2: req.code_2,
            code_3: req.code_3,
            message: req.message,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

/// POST /api/v1/entries/:id/codes/:slot/toggle
///
/// Flip the used-flag of one code slot (1..=3). The new state reaches
/// clients through the push channel, not through this response.
pub async fn toggle_code(
    State(state): State<Arc<AppState>>,
    Path((id, slot)): Path<(String, u8)>,
) -> ApiResult<StatusCode> {
    let slot = CodeSlot::from_number(slot)
        .ok_or_else(|| ApiError::NotFound(format!("Code slot {}", slot)))?;

    state.view.toggle_used(&id, slot).await?;

    Ok(StatusCode::NO_CONTENT)
}
