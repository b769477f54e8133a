//! # Codeboard
//!
//! A small community bulletin board: visitors submit a name, up to three
//! referral codes, and a short message. Submissions stay visible to everyone
//! for a five-minute rolling window, kept live through push notifications
//! plus a local expiry sweep, and anyone can mark a code as used.
//!
//! ## Modules
//!
//! - [`store`]: SQLite-backed entry collection with change notifications
//! - [`view`]: the live entry view (load, subscribe, sweep, submit, toggle)
//! - [`api`]: REST API server with Axum
//! - [`websocket`]: push channel fanning change events out to visitors
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use codeboard::store::{EntryStore, NewEntry, SqliteStore};
//! use codeboard::view::{BoardConfig, BoardView};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store: Arc<dyn EntryStore> = Arc::new(SqliteStore::open_in_memory()?);
//!     let view = Arc::new(BoardView::new(Arc::clone(&store), BoardConfig::default()));
//!
//!     // Initial load, change listener, and expiry sweep
//!     view.start().await;
//!
//!     view.submit(NewEntry {
//!         user_name: "Ana".to_string(),
//!         code_1: "A123".to_string(),
//!         message: "hola a todos".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//!     println!("{} active entries", view.active_count().await);
//!
//!     view.stop();
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod store;
pub mod view;
pub mod websocket;

// Re-export top-level types for convenience
pub use store::{
    ChangeEvent, ChangeKind, CodeSlot, Entry, EntryStore, NewEntry, SqliteStore, StoreError,
    StoreResult,
};

pub use view::{BoardConfig, BoardView, ViewError, ViewResult};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use websocket::{
    spawn_change_forwarder, BoardHub, ClientMessage, HubConfig, HubError, ServerMessage,
    websocket_handler,
};

pub use config::{AnnouncementConfig, Config, ConfigError};
