//! Note records

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Attribute names reserved for the record's key and bookkeeping
pub const USER_ID: &str = "userId";
pub const NOTE_ID: &str = "noteId";
pub const CREATED_AT: &str = "createdAt";

/// A note as stored in the table. Content fields other than the key are
/// kept as-is and flattened next to it when serialized.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub user_id: String,
    pub note_id: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Note {
    pub fn new(user_id: impl Into<String>, note_id: impl Into<String>) -> Self {
        Note {
            user_id: user_id.into(),
            note_id: note_id.into(),
            attributes: Map::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    pub fn key(&self) -> NoteKey {
        NoteKey::new(self.user_id.clone(), self.note_id.clone())
    }
}

/// Primary key of a note: partition `userId`, sort `noteId`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NoteKey {
    pub user_id: String,
    pub note_id: String,
}

impl NoteKey {
    pub fn new(user_id: impl Into<String>, note_id: impl Into<String>) -> Self {
        NoteKey {
            user_id: user_id.into(),
            note_id: note_id.into(),
        }
    }
}

/// True when `name` is one of the attributes callers may not write
pub fn is_reserved(name: &str) -> bool {
    name == USER_ID || name == NOTE_ID || name == CREATED_AT
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn content_is_flattened_next_to_the_key() {
        let note = Note::new("u1", "n1").with_attribute("content", json!("hello"));
        assert_eq!(
            serde_json::to_value(&note).expect("serializable"),
            json!({ "userId": "u1", "noteId": "n1", "content": "hello" })
        );
    }

    #[test]
    fn unknown_fields_land_in_attributes() {
        let note: Note = serde_json::from_value(json!({
            "userId": "u1",
            "noteId": "n1",
            "attachment": "cat.png",
            "createdAt": 1_600_000_000_000u64,
        }))
        .expect("valid note");
        assert_eq!(note.key(), NoteKey::new("u1", "n1"));
        assert_eq!(note.attributes.get("attachment"), Some(&json!("cat.png")));
        assert_eq!(note.attributes.get(CREATED_AT), Some(&json!(1_600_000_000_000u64)));
    }

    #[test]
    fn key_attributes_are_reserved() {
        assert!(is_reserved("userId"));
        assert!(is_reserved("createdAt"));
        assert!(!is_reserved("content"));
    }
}
