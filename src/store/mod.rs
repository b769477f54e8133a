//! Entry store
//!
//! The backing store for the community board: a flat collection of entries
//! plus a change-notification channel. The live view consumes the store
//! through the [`EntryStore`] trait and never inspects notification payloads;
//! it re-fetches on every event.
//!
//! Rows are never deleted by this component. Expiry is a view-side filter,
//! so the store contract is only: time-windowed read, append, and a
//! single-flag partial update.

pub mod error;
pub mod sqlite;
pub mod types;

pub use error::{StoreError, StoreResult};
pub use sqlite::SqliteStore;
pub use types::{ChangeEvent, ChangeKind, CodeSlot, Entry, NewEntry};

use async_trait::async_trait;
use tokio::sync::broadcast;

/// Contract between the live view and the backing store
///
/// Mirrors the external query/insert/update/subscribe interface the board
/// depends on, so the view treats persistence as a black box.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// All entries with `created_at > cutoff_ms`, newest first
    async fn recent_since(&self, cutoff_ms: i64) -> StoreResult<Vec<Entry>>;

    /// Append one entry; id and creation time are assigned by the store,
    /// all three used-flags start false
    async fn insert(&self, new: NewEntry) -> StoreResult<Entry>;

    /// Set one used-flag on the matching entry, leaving every other field
    /// untouched
    async fn set_code_used(&self, id: &str, slot: CodeSlot, used: bool) -> StoreResult<()>;

    /// Receive one event per mutation of the entry collection
    fn subscribe(&self) -> broadcast::Receiver<ChangeEvent>;
}
