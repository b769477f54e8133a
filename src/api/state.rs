//! Application state
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::config::AnnouncementConfig;
use crate::store::EntryStore;
use crate::view::BoardView;
use crate::websocket::{BoardHub, HubConfig};

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Entry store (health checks; all reads and writes go through the view)
    pub store: Arc<dyn EntryStore>,
    /// The live entry view serving the board
    pub view: Arc<BoardView>,
    /// WebSocket connection hub for the push channel
    pub hub: Arc<BoardHub>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Announcement banner content
    pub announcement: Arc<AnnouncementConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState with a default hub
    pub fn new(
        store: Arc<dyn EntryStore>,
        view: Arc<BoardView>,
        config: ApiConfig,
        announcement: AnnouncementConfig,
    ) -> Self {
        Self {
            store,
            view,
            hub: Arc::new(BoardHub::new(HubConfig::default())),
            config: Arc::new(config),
            announcement: Arc::new(announcement),
            start_time: Instant::now(),
        }
    }

    /// Create AppState with custom WebSocket hub configuration
    pub fn with_hub_config(
        store: Arc<dyn EntryStore>,
        view: Arc<BoardView>,
        config: ApiConfig,
        announcement: AnnouncementConfig,
        hub_config: HubConfig,
    ) -> Self {
        Self {
            store,
            view,
            hub: Arc::new(BoardHub::new(hub_config)),
            config: Arc::new(config),
            announcement: Arc::new(announcement),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8090,
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
