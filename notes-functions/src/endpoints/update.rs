use futures_util::future::{BoxFuture, FutureExt};
use notes_handler::{Endpoint, Invocation, NoteError, NoteEvent};
use std::sync::Arc;

use super::{content, note_key};
use crate::{identity::IdentityResolver, note::Note, store::NoteStore};

/// Sets the body's fields on an existing note and returns the result
pub struct UpdateNote {
    store: Arc<dyn NoteStore>,
    identity: Arc<dyn IdentityResolver>,
}

impl UpdateNote {
    pub fn new(store: Arc<dyn NoteStore>, identity: Arc<dyn IdentityResolver>) -> Self {
        UpdateNote { store, identity }
    }
}

impl Endpoint for UpdateNote {
    type Output = Note;
    type Fut = BoxFuture<'static, Result<Note, NoteError>>;

    fn call(&self, event: NoteEvent, _: Invocation) -> Self::Fut {
        let request = note_key(self.identity.as_ref(), &event).and_then(|key| {
            let changes = content(&event)?;
            if changes.is_empty() {
                return Err(NoteError::bad_request("nothing to update"));
            }
            Ok((key, changes))
        });
        let store = Arc::clone(&self.store);
        async move {
            let (key, changes) = request?;
            store
                .update(key, changes)
                .await?
                .ok_or_else(|| NoteError::not_found("Item not found."))
        }
        .boxed()
    }
}
