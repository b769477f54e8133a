//! Announcement route
//!
//! - GET /api/v1/announcement - banner text plus the fixed external link

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::AnnouncementResponse;
use crate::api::state::AppState;

/// GET /api/v1/announcement
pub async fn get_announcement(State(state): State<Arc<AppState>>) -> Json<AnnouncementResponse> {
    Json(AnnouncementResponse {
        text: state.announcement.text.clone(),
        link: state.announcement.link.clone(),
    })
}
