use chrono::Utc;
use futures_util::future::{BoxFuture, FutureExt};
use notes_handler::{Endpoint, Invocation, NoteError, NoteEvent};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use super::content;
use crate::{
    identity::IdentityResolver,
    note::{Note, CREATED_AT},
    store::NoteStore,
};

/// Stores the request body as a new note with a fresh id and returns it
pub struct CreateNote {
    store: Arc<dyn NoteStore>,
    identity: Arc<dyn IdentityResolver>,
}

impl CreateNote {
    pub fn new(store: Arc<dyn NoteStore>, identity: Arc<dyn IdentityResolver>) -> Self {
        CreateNote { store, identity }
    }

    fn build(&self, event: &NoteEvent) -> Result<Note, NoteError> {
        let user_id = self.identity.resolve(event)?;
        let mut note = Note::new(user_id, Uuid::new_v4().to_string());
        note.attributes = content(event)?;
        note.attributes
            .insert(CREATED_AT.to_string(), Value::from(Utc::now().timestamp_millis()));
        Ok(note)
    }
}

impl Endpoint for CreateNote {
    type Output = Note;
    type Fut = BoxFuture<'static, Result<Note, NoteError>>;

    fn call(&self, event: NoteEvent, _: Invocation) -> Self::Fut {
        let note = self.build(&event);
        let store = Arc::clone(&self.store);
        async move {
            let note = note?;
            store.put(note.clone()).await?;
            info!(note_id = %note.note_id, "created note");
            Ok::<Note, NoteError>(note)
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{identity::CognitoIdentity, note::NoteKey, store::MemoryNoteStore};
    use notes_handler::handler;
    use serde_json::json;

    #[tokio::test]
    async fn stores_and_returns_the_new_note() {
        let store = Arc::new(MemoryNoteStore::new());
        let endpoint = CreateNote::new(store.clone(), Arc::new(CognitoIdentity));
        let event = NoteEvent::default()
            .with_identity_id("u1")
            .with_body(r#"{"content":"hello","attachment":null}"#);

        let note = endpoint.call(event, Invocation::default()).await.expect("created");

        assert_eq!(note.user_id, "u1");
        assert!(Uuid::parse_str(&note.note_id).is_ok());
        assert_eq!(note.attributes.get("content"), Some(&json!("hello")));
        assert_eq!(note.attributes.get("attachment"), Some(&Value::Null));
        assert!(note.attributes.get(CREATED_AT).map_or(false, Value::is_i64));

        let stored = store.get(NoteKey::new("u1", note.note_id.clone())).await.expect("get");
        assert_eq!(stored, Some(note));
    }

    #[tokio::test]
    async fn each_note_gets_its_own_id() {
        let store = Arc::new(MemoryNoteStore::new());
        let wrapped = handler(CreateNote::new(store.clone(), Arc::new(CognitoIdentity)), |_: &str| {});
        for _ in 0..2 {
            let event = NoteEvent::default().with_identity_id("u1").with_body("{}");
            assert_eq!(wrapped.invoke(event, Invocation::default()).await.status_code, 200);
        }
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn invalid_bodies_are_bad_requests() {
        let store = Arc::new(MemoryNoteStore::new());
        let wrapped = handler(CreateNote::new(store.clone(), Arc::new(CognitoIdentity)), |_: &str| {});
        let event = NoteEvent::default()
            .with_identity_id("u1")
            .with_body(r#"{"userId":"someone-else"}"#);

        let res = wrapped.invoke(event, Invocation::default()).await;

        assert_eq!(res.status_code, 400);
        assert!(store.is_empty());
    }
}
