use futures_util::future::{BoxFuture, FutureExt};
use notes_handler::{Endpoint, Invocation, NoteError, NoteEvent};
use std::sync::Arc;

use super::note_key;
use crate::{identity::IdentityResolver, store::NoteStore};

/// Removes one note. Deleting a note that does not exist still succeeds.
pub struct DeleteNote {
    store: Arc<dyn NoteStore>,
    identity: Arc<dyn IdentityResolver>,
}

impl DeleteNote {
    pub fn new(store: Arc<dyn NoteStore>, identity: Arc<dyn IdentityResolver>) -> Self {
        DeleteNote { store, identity }
    }
}

impl Endpoint for DeleteNote {
    type Output = ();
    type Fut = BoxFuture<'static, Result<(), NoteError>>;

    fn call(&self, event: NoteEvent, _: Invocation) -> Self::Fut {
        let key = note_key(self.identity.as_ref(), &event);
        let store = Arc::clone(&self.store);
        async move {
            store.delete(key?).await?;
            Ok::<(), NoteError>(())
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{endpoints::testing::ScriptedStore, identity::PathParameter, note::NoteKey};
    use notes_handler::{handler, MemoryLog};

    fn delete_event() -> NoteEvent {
        NoteEvent::default().with_path_parameters(vec![("userId", "u1"), ("id", "n1")].into_iter().collect())
    }

    #[tokio::test]
    async fn deletes_by_user_and_note_id() {
        let store = Arc::new(ScriptedStore::default());
        let log = MemoryLog::new();
        let wrapped = handler(
            DeleteNote::new(store.clone(), Arc::new(PathParameter::new("userId"))),
            log.clone(),
        );

        let res = wrapped.invoke(delete_event(), Invocation::default()).await;

        assert_eq!(res.status_code, 200);
        assert_eq!(res.body, "");
        assert_eq!(*store.deleted.lock().expect("lock"), vec![NoteKey::new("u1", "n1")]);
        assert!(log.messages().is_empty());
    }

    #[tokio::test]
    async fn store_failures_propagate_as_500() {
        let store = Arc::new(ScriptedStore::failing("throttled"));
        let log = MemoryLog::new();
        let wrapped = handler(
            DeleteNote::new(store, Arc::new(PathParameter::new("userId"))),
            log.clone(),
        );

        let res = wrapped.invoke(delete_event(), Invocation::default()).await;

        assert_eq!(res.status_code, 500);
        assert_eq!(res.body, r#"{"error":"throttled"}"#);
        assert_eq!(log.messages(), vec!["Server Error - throttled"]);
    }

    #[tokio::test]
    async fn missing_note_id_never_reaches_the_store() {
        let store = Arc::new(ScriptedStore::default());
        let endpoint = DeleteNote::new(store.clone(), Arc::new(PathParameter::new("userId")));

        let event = NoteEvent::default().with_path_parameters(vec![("userId", "u1")].into_iter().collect());
        let err = endpoint.call(event, Invocation::default()).await.expect_err("bad request");

        assert_eq!(err.status_code().as_u16(), 400);
        assert!(store.calls().is_empty());
    }
}
