//! Core data types for the entry store
//!
//! This module defines the types shared by the store, the live view, and the
//! API layer:
//! - `Entry`: one community submission as persisted by the store
//! - `NewEntry`: the fields a submitter provides
//! - `CodeSlot`: which of the three code positions an operation targets
//! - `ChangeEvent`: a notification that the entry collection changed

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// One community submission
///
/// The flat `code_N` / `is_used_N` field layout mirrors the wire format of
/// the entry collection: up to three independent code strings, each with its
/// own used-flag. Empty code strings mean "slot not filled".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    /// Opaque unique identifier, assigned by the store at creation
    pub id: String,
    /// Display name of the submitter
    pub user_name: String,
    pub code_1: String,
    pub code_2: String,
    pub code_3: String,
    pub is_used_1: bool,
    pub is_used_2: bool,
    pub is_used_3: bool,
    /// Short free-form message
    pub message: String,
    /// Creation time in epoch milliseconds, assigned by the store
    pub created_at: i64,
}

impl Entry {
    /// Get the code string in a slot
    pub fn code(&self, slot: CodeSlot) -> &str {
        match slot {
            CodeSlot::One => &self.code_1,
            CodeSlot::Two => &self.code_2,
            CodeSlot::Three => &self.code_3,
        }
    }

    /// Get the used-flag for a slot
    pub fn is_used(&self, slot: CodeSlot) -> bool {
        match slot {
            CodeSlot::One => self.is_used_1,
            CodeSlot::Two => self.is_used_2,
            CodeSlot::Three => self.is_used_3,
        }
    }

    /// Check whether this entry is still inside the active window
    pub fn is_active(&self, now_ms: i64, window_ms: i64) -> bool {
        now_ms - self.created_at < window_ms
    }

    /// Age of the entry relative to `now_ms`, in milliseconds
    pub fn age_ms(&self, now_ms: i64) -> i64 {
        now_ms - self.created_at
    }
}

/// Fields provided by a submitter for a new entry
///
/// Used-flags are not part of this type: they always start false, and ids
/// and timestamps are assigned by the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewEntry {
    pub user_name: String,
    pub code_1: String,
    pub code_2: String,
    pub code_3: String,
    pub message: String,
}

impl NewEntry {
    /// Iterate the three code strings in slot order
    pub fn codes(&self) -> [&str; 3] {
        [&self.code_1, &self.code_2, &self.code_3]
    }
}

/// Which of the three code positions an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeSlot {
    One,
    Two,
    Three,
}

impl CodeSlot {
    /// All slots in order
    pub fn all() -> &'static [CodeSlot] {
        &[CodeSlot::One, CodeSlot::Two, CodeSlot::Three]
    }

    /// Parse a 1-based slot number (the form numbers its code fields 1..3)
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(CodeSlot::One),
            2 => Some(CodeSlot::Two),
            3 => Some(CodeSlot::Three),
            _ => None,
        }
    }

    /// 1-based slot number
    pub fn number(&self) -> u8 {
        match self {
            CodeSlot::One => 1,
            CodeSlot::Two => 2,
            CodeSlot::Three => 3,
        }
    }

    /// Column name of the used-flag for this slot
    pub fn used_column(&self) -> &'static str {
        match self {
            CodeSlot::One => "is_used_1",
            CodeSlot::Two => "is_used_2",
            CodeSlot::Three => "is_used_3",
        }
    }
}

impl std::fmt::Display for CodeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// What kind of mutation a change event describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Inserted,
    Updated,
    Deleted,
}

/// Notification that the entry collection changed
///
/// Consumers treat the collection as dirty and re-fetch; the payload exists
/// for logging and for forwarding to WebSocket clients, not for patching.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEvent {
    pub kind: ChangeKind,
    pub entry_id: String,
}

impl ChangeEvent {
    pub fn inserted(entry_id: impl Into<String>) -> Self {
        Self {
            kind: ChangeKind::Inserted,
            entry_id: entry_id.into(),
        }
    }

    pub fn updated(entry_id: impl Into<String>) -> Self {
        Self {
            kind: ChangeKind::Updated,
            entry_id: entry_id.into(),
        }
    }
}

/// Current time in epoch milliseconds
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry(created_at: i64) -> Entry {
        Entry {
            id: "a".to_string(),
            user_name: "Ana".to_string(),
            code_1: "A1".to_string(),
            code_2: String::new(),
            code_3: String::new(),
            is_used_1: false,
            is_used_2: false,
            is_used_3: false,
            message: "hola".to_string(),
            created_at,
        }
    }

    #[test]
    fn test_slot_from_number() {
        assert_eq!(CodeSlot::from_number(1), Some(CodeSlot::One));
        assert_eq!(CodeSlot::from_number(3), Some(CodeSlot::Three));
        assert_eq!(CodeSlot::from_number(0), None);
        assert_eq!(CodeSlot::from_number(4), None);
    }

    #[test]
    fn test_slot_used_column() {
        assert_eq!(CodeSlot::One.used_column(), "is_used_1");
        assert_eq!(CodeSlot::Two.used_column(), "is_used_2");
        assert_eq!(CodeSlot::Three.used_column(), "is_used_3");
    }

    #[test]
    fn test_entry_is_active_boundary() {
        let window = 5 * 60 * 1000;
        let entry = sample_entry(1_000_000);

        // One minute old: active
        assert!(entry.is_active(1_000_000 + 60_000, window));
        // Four minutes old: still active
        assert!(entry.is_active(1_000_000 + 4 * 60_000, window));
        // Exactly at the window edge: no longer active (strict less-than)
        assert!(!entry.is_active(1_000_000 + window, window));
        // Six minutes old: expired
        assert!(!entry.is_active(1_000_000 + 6 * 60_000, window));
    }

    #[test]
    fn test_entry_slot_accessors() {
        let entry = sample_entry(0);
        assert_eq!(entry.code(CodeSlot::One), "A1");
        assert_eq!(entry.code(CodeSlot::Two), "");
        assert!(!entry.is_used(CodeSlot::One));
    }

    #[test]
    fn test_entry_json_field_names() {
        let entry = sample_entry(42);
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"user_name\":\"Ana\""));
        assert!(json.contains("\"code_1\":\"A1\""));
        assert!(json.contains("\"is_used_1\":false"));
        assert!(json.contains("\"created_at\":42"));
    }
}
