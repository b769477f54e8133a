//! Board view
//!
//! [`BoardView`] owns the current entry list, the store subscription, and
//! the sweep timer, with an explicit `start()`/`stop()` lifecycle. `stop()`
//! releases both background tasks deterministically; in-flight store calls
//! are not cancelled.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex as StdMutex};

use tokio::sync::{broadcast, RwLock};
use tokio::task::JoinHandle;

use super::error::{ViewError, ViewResult};
use crate::store::types::now_ms;
use crate::store::{CodeSlot, Entry, EntryStore, NewEntry};

/// Maximum length of a submitter name
pub const MAX_NAME_LEN: usize = 10;
/// Maximum length of a message
pub const MAX_MESSAGE_LEN: usize = 100;

/// Configuration for view behavior
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// How long an entry stays visible after creation (seconds)
    pub active_window_secs: u64,
    /// How often the local expiry sweep runs (seconds)
    pub sweep_interval_secs: u64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            active_window_secs: 5 * 60,
            sweep_interval_secs: 10,
        }
    }
}

impl BoardConfig {
    /// Active window in milliseconds
    pub fn window_ms(&self) -> i64 {
        self.active_window_secs as i64 * 1000
    }
}

/// The live entry view
///
/// State machine is `loading → ready`, with `ready` re-entered after every
/// Load; the view stays ready indefinitely.
pub struct BoardView {
    store: Arc<dyn EntryStore>,
    entries: RwLock<Vec<Entry>>,
    loading: AtomicBool,
    config: BoardConfig,
    tasks: StdMutex<Vec<JoinHandle<()>>>,
}

impl BoardView {
    /// Create a view over a store; call [`start`](Self::start) to go live
    pub fn new(store: Arc<dyn EntryStore>, config: BoardConfig) -> Self {
        Self {
            store,
            entries: RwLock::new(Vec::new()),
            loading: AtomicBool::new(true),
            config,
            tasks: StdMutex::new(Vec::new()),
        }
    }

    /// Snapshot of the active entries, newest first
    pub async fn entries(&self) -> Vec<Entry> {
        self.entries.read().await.clone()
    }

    /// Number of active entries
    pub async fn active_count(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the initial load has not yet completed
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// Start the view: initial load, then the change listener and the
    /// expiry sweep as background tasks
    pub async fn start(self: &Arc<Self>) {
        self.load().await;

        let mut tasks = self.tasks.lock().unwrap_or_else(|e| e.into_inner());

        let listener = Arc::clone(self);
        tasks.push(tokio::spawn(async move {
            listener.run_change_listener().await;
        }));

        let sweeper = Arc::clone(self);
        tasks.push(tokio::spawn(async move {
            sweeper.run_sweeper().await;
        }));

        tracing::info!(
            window_secs = self.config.active_window_secs,
            sweep_secs = self.config.sweep_interval_secs,
            "Board view started"
        );
    }

    /// Stop the view, releasing the subscription and the sweep timer
    pub fn stop(&self) {
        let mut tasks = self.tasks.lock().unwrap_or_else(|e| e.into_inner());
        for task in tasks.drain(..) {
            task.abort();
        }
        tracing::info!("Board view stopped");
    }

    /// Load: replace the whole in-memory list from the store
    ///
    /// On failure the previous list stays untouched and only a warning is
    /// logged, so transient network blips never blank the board. Either way
    /// the loading flag clears.
    pub async fn load(&self) {
        let cutoff = now_ms() - self.config.window_ms();

        match self.store.recent_since(cutoff).await {
            Ok(list) => {
                tracing::debug!(count = list.len(), "Loaded active entries");
                *self.entries.write().await = list;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Entry load failed, keeping previous list");
            }
        }

        self.loading.store(false, Ordering::Release);
    }

    /// Sweep: drop expired entries from the in-memory list
    ///
    /// Purely local. Never contacts the store and never adds entries, so a
    /// missed change notification still cannot keep an expired entry on
    /// screen past the next tick.
    pub async fn sweep(&self) {
        let cutoff = now_ms() - self.config.window_ms();

        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|entry| entry.created_at > cutoff);

        let removed = before - entries.len();
        if removed > 0 {
            tracing::debug!(removed, remaining = entries.len(), "Swept expired entries");
        }
    }

    /// Submit: validate a draft and append it to the store
    ///
    /// All fields are trimmed first. The inserted entry is not merged into
    /// the local list; the store's change notification re-surfaces it.
    pub async fn submit(&self, draft: NewEntry) -> ViewResult<Entry> {
        let draft = NewEntry {
            user_name: draft.user_name.trim().to_string(),
            code_1: draft.code_1.trim().to_string(),
            code_2: draft.code_2.trim().to_string(),
            code_3: draft.code_3.trim().to_string(),
            message: draft.message.trim().to_string(),
        };

        validate_draft(&draft)?;

        let entry = self.store.insert(draft).await?;
        tracing::info!(entry_id = %entry.id, user = %entry.user_name, "Entry published");

        Ok(entry)
    }

    /// Toggle Used: flip one used-flag on an entry in the active view
    ///
    /// Reads the current flag from the local cache, then issues a single
    /// partial update. No optimistic mutation; the change notification
    /// reflects the new state.
    pub async fn toggle_used(&self, id: &str, slot: CodeSlot) -> ViewResult<()> {
        let current = {
            let entries = self.entries.read().await;
            entries
                .iter()
                .find(|entry| entry.id == id)
                .map(|entry| entry.is_used(slot))
                .ok_or_else(|| ViewError::UnknownEntry(id.to_string()))?
        };

        match self.store.set_code_used(id, slot, !current).await {
            Ok(()) => Ok(()),
            Err(crate::store::StoreError::EntryNotFound(id)) => {
                // Cached locally but gone from the store
                Err(ViewError::UnknownEntry(id))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn run_change_listener(self: Arc<Self>) {
        let mut rx = self.store.subscribe();

        loop {
            match rx.recv().await {
                Ok(event) => {
                    tracing::debug!(kind = ?event.kind, entry_id = %event.entry_id, "Change notification");
                    self.load().await;
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    // The payload never mattered; one refetch covers all
                    // skipped events
                    tracing::warn!(skipped, "Change listener lagged, refetching");
                    self.load().await;
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Change channel closed, listener exiting");
                    break;
                }
            }
        }
    }

    async fn run_sweeper(self: Arc<Self>) {
        let interval = std::time::Duration::from_secs(self.config.sweep_interval_secs);
        let mut ticker = tokio::time::interval(interval);

        // Skip the first immediate tick
        ticker.tick().await;

        loop {
            ticker.tick().await;
            self.sweep().await;
        }
    }
}

/// Validate a trimmed draft before any store call
fn validate_draft(draft: &NewEntry) -> ViewResult<()> {
    if draft.user_name.is_empty() {
        return Err(ViewError::Validation("Name cannot be empty".to_string()));
    }

    if draft.user_name.chars().count() > MAX_NAME_LEN {
        return Err(ViewError::Validation(format!(
            "Name exceeds maximum length of {} characters",
            MAX_NAME_LEN
        )));
    }

    if draft.message.is_empty() {
        return Err(ViewError::Validation("Message cannot be empty".to_string()));
    }

    if draft.message.chars().count() > MAX_MESSAGE_LEN {
        return Err(ViewError::Validation(format!(
            "Message exceeds maximum length of {} characters",
            MAX_MESSAGE_LEN
        )));
    }

    if draft.codes().iter().all(|code| code.is_empty()) {
        return Err(ViewError::Validation(
            "At least one code is required".to_string(),
        ));
    }

    Ok(())
}
