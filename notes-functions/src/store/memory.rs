use futures_util::future::{self, BoxFuture, FutureExt};
use serde_json::{Map, Value};
use std::{
    collections::BTreeMap,
    sync::{Mutex, MutexGuard},
};

use super::{NoteStore, StoreError, StoreResult};
use crate::note::{Note, NoteKey};

/// A process-local table ordered by key, for tests and local runs
#[derive(Debug, Default)]
pub struct MemoryNoteStore {
    notes: Mutex<BTreeMap<NoteKey, Note>>,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_notes<I>(notes: I) -> Self
    where
        I: IntoIterator<Item = Note>,
    {
        MemoryNoteStore {
            notes: Mutex::new(notes.into_iter().map(|note| (note.key(), note)).collect()),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().map(|notes| notes.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, BTreeMap<NoteKey, Note>>> {
        self.notes
            .lock()
            .map_err(|_| StoreError::Backend("memory store lock poisoned".into()))
    }
}

impl NoteStore for MemoryNoteStore {
    fn put(&self, note: Note) -> BoxFuture<'_, StoreResult<()>> {
        let result = self.lock().map(|mut notes| {
            notes.insert(note.key(), note);
        });
        future::ready(result).boxed()
    }

    fn get(&self, key: NoteKey) -> BoxFuture<'_, StoreResult<Option<Note>>> {
        let result = self.lock().map(|notes| notes.get(&key).cloned());
        future::ready(result).boxed()
    }

    fn query(&self, user_id: String) -> BoxFuture<'_, StoreResult<Vec<Note>>> {
        let result = self.lock().map(|notes| {
            notes
                .values()
                .filter(|note| note.user_id == user_id)
                .cloned()
                .collect()
        });
        future::ready(result).boxed()
    }

    fn update(&self, key: NoteKey, changes: Map<String, Value>) -> BoxFuture<'_, StoreResult<Option<Note>>> {
        let result = self.lock().map(|mut notes| {
            notes.get_mut(&key).map(|note| {
                note.attributes.extend(changes);
                note.clone()
            })
        });
        future::ready(result).boxed()
    }

    fn delete(&self, key: NoteKey) -> BoxFuture<'_, StoreResult<()>> {
        let result = self.lock().map(|mut notes| {
            notes.remove(&key);
        });
        future::ready(result).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn query_only_returns_the_users_notes_in_key_order() {
        let store = MemoryNoteStore::with_notes(vec![
            Note::new("u1", "n2"),
            Note::new("u2", "n1"),
            Note::new("u1", "n1"),
        ]);
        let notes = store.query("u1".into()).await.expect("query");
        let ids: Vec<_> = notes.iter().map(|n| n.note_id.as_str()).collect();
        assert_eq!(ids, vec!["n1", "n2"]);
    }

    #[tokio::test]
    async fn update_merges_into_existing_notes_only() {
        let store = MemoryNoteStore::with_notes(vec![Note::new("u1", "n1").with_attribute("content", json!("old"))]);
        let mut changes = Map::new();
        changes.insert("content".into(), json!("new"));

        let updated = store
            .update(NoteKey::new("u1", "n1"), changes.clone())
            .await
            .expect("update");
        assert_eq!(updated.and_then(|n| n.attributes.get("content").cloned()), Some(json!("new")));

        let missing = store.update(NoteKey::new("u1", "n9"), changes).await.expect("update");
        assert_eq!(missing, None);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = MemoryNoteStore::with_notes(vec![Note::new("u1", "n1")]);
        store.delete(NoteKey::new("u1", "n1")).await.expect("delete");
        store.delete(NoteKey::new("u1", "n1")).await.expect("delete again");
        assert!(store.is_empty());
    }
}
