//! Data transfer objects
//!
//! Request and response types for the API endpoints.
//! Entries themselves serialize with their store field names (`user_name`,
//! `code_1..3`, `is_used_1..3`, `message`, `created_at`), matching the
//! original wire format of the entry collection.

use serde::{Deserialize, Serialize};

use crate::store::Entry;

// ============================================
// ENTRY DTOs
// ============================================

/// Submit request: name, up to three codes, a message
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEntryRequest {
    /// Display name (trimmed; at most 10 characters)
    pub user_name: String,
    #[serde(default)]
    pub code_1: String,
    #[serde(default)]
    pub code_2: String,
    #[serde(default)]
    pub code_3: String,
    /// Message (trimmed; at most 100 characters)
    pub message: String,
}

/// Active entries, newest first
#[derive(Debug, Serialize)]
pub struct EntryListResponse {
    /// Number of active entries
    pub total: usize,
    /// True until the initial load completes
    pub loading: bool,
    pub entries: Vec<Entry>,
}

// ============================================
// ANNOUNCEMENT DTO
// ============================================

/// Announcement banner content
#[derive(Debug, Serialize)]
pub struct AnnouncementResponse {
    /// Banner text
    pub text: String,
    /// Fixed external link
    pub link: String,
}

// ============================================
// HEALTH DTO
// ============================================

/// Full health status
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy or unhealthy
    pub status: String,
    /// Store status: ok or error
    pub store: String,
    /// Active entries currently in view
    pub active_entries: usize,
    /// Open WebSocket connections
    pub ws_connections: usize,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Crate version
    pub version: String,
}
