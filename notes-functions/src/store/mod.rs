//! Persistence of notes
//!
//! Endpoints only talk to a [`NoteStore`]. Each call is a single atomic
//! operation of the backing table; nothing is cached in process.

use futures_util::future::BoxFuture;
use notes_handler::NoteError;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::note::{Note, NoteKey};

mod dynamo;
mod memory;

pub use self::{dynamo::DynamoNoteStore, memory::MemoryNoteStore};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// The backing service rejected or failed the request.
    #[error("{0}")]
    Backend(String),

    /// A stored item could not be read back as a note.
    #[error("malformed item: {0}")]
    Malformed(String),
}

impl From<StoreError> for NoteError {
    fn from(err: StoreError) -> Self {
        NoteError::unclassified(err.to_string())
    }
}

/// Key-value access to the notes table
pub trait NoteStore: Send + Sync {
    /// Write `note`, replacing any note with the same key.
    fn put(&self, note: Note) -> BoxFuture<'_, StoreResult<()>>;

    fn get(&self, key: NoteKey) -> BoxFuture<'_, StoreResult<Option<Note>>>;

    /// All notes of `user_id`, in the order the store returns them.
    fn query(&self, user_id: String) -> BoxFuture<'_, StoreResult<Vec<Note>>>;

    /// Set `changes` on an existing note and return the result, or `None`
    /// when no note has that key.
    fn update(&self, key: NoteKey, changes: Map<String, Value>) -> BoxFuture<'_, StoreResult<Option<Note>>>;

    /// Remove the note. Deleting a missing note succeeds.
    fn delete(&self, key: NoteKey) -> BoxFuture<'_, StoreResult<()>>;
}
