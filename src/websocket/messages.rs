//! WebSocket message types
//!
//! JSON messages exchanged with board visitors. Clients do not inspect
//! change payloads beyond "something changed"; they re-fetch the entry list
//! on any `change` message.

use serde::{Deserialize, Serialize};

use crate::store::{ChangeEvent, ChangeKind};

/// Messages sent from client to server
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Ping for keepalive
    Ping,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Connection established
    Connected {
        /// Unique connection identifier
        connection_id: String,
    },
    /// The entry collection changed; re-fetch the list
    Change {
        /// What kind of mutation happened
        kind: ChangeKind,
        /// Which entry it touched
        entry_id: String,
    },
    /// Pong response to ping
    Pong,
    /// Error message
    Error {
        /// Error description
        message: String,
    },
}

impl ServerMessage {
    /// Build a change message from a store event
    pub fn change(event: &ChangeEvent) -> Self {
        ServerMessage::Change {
            kind: event.kind,
            entry_id: event.entry_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_message_deserialize_ping() {
        let json = r#"{"type": "ping"}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        assert!(matches!(msg, ClientMessage::Ping));
    }

    #[test]
    fn test_client_message_rejects_unknown_type() {
        let json = r#"{"type": "subscribe"}"#;
        assert!(serde_json::from_str::<ClientMessage>(json).is_err());
    }

    #[test]
    fn test_server_message_serialize_change() {
        let msg = ServerMessage::change(&ChangeEvent::inserted("abc-123"));
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"type\":\"change\""));
        assert!(json.contains("\"kind\":\"inserted\""));
        assert!(json.contains("\"entry_id\":\"abc-123\""));
    }

    #[test]
    fn test_server_message_serialize_connected() {
        let msg = ServerMessage::Connected {
            connection_id: "abc-123".to_string(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"type\":\"connected\""));
        assert!(json.contains("\"connection_id\":\"abc-123\""));
    }
}
