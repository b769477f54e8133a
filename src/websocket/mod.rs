//! Realtime fan-out
//!
//! The push channel visitors hold open. Every mutation of the entry
//! collection becomes a `change` message to every connected client; clients
//! respond by re-fetching the entry list, never by patching.

pub mod handler;
pub mod hub;
pub mod messages;

pub use handler::websocket_handler;
pub use hub::{BoardHub, ConnectionId, HubConfig, HubError};
pub use messages::{ClientMessage, ServerMessage};

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::store::EntryStore;

/// Bridge store change events into the connection hub
///
/// Runs until the store's change channel closes. A lagged receiver only
/// skips notifications, which clients tolerate by design.
pub fn spawn_change_forwarder(
    store: Arc<dyn EntryStore>,
    hub: Arc<BoardHub>,
) -> JoinHandle<()> {
    let mut rx = store.subscribe();

    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    hub.publish(ServerMessage::change(&event)).await;
                }
                Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Change forwarder lagged");
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => {
                    tracing::info!("Change channel closed, forwarder exiting");
                    break;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{NewEntry, SqliteStore};
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_forwarder_publishes_store_changes() {
        let store = Arc::new(SqliteStore::open_in_memory().unwrap());
        let hub = Arc::new(BoardHub::new(HubConfig::default()));

        let (tx, mut rx) = mpsc::unbounded_channel();
        hub.register(tx).await.unwrap();

        let task = spawn_change_forwarder(store.clone(), Arc::clone(&hub));

        use crate::store::EntryStore as _;
        let entry = store
            .insert(NewEntry {
                user_name: "Ana".to_string(),
                code_1: "A1".to_string(),
                code_2: String::new(),
                code_3: String::new(),
                message: "hola".to_string(),
            })
            .await
            .unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(100)).await;

        match rx.try_recv().unwrap() {
            ServerMessage::Change { entry_id, .. } => assert_eq!(entry_id, entry.id),
            other => panic!("Expected change message, got {:?}", other),
        }

        task.abort();
    }
}
