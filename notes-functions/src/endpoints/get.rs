use futures_util::future::{BoxFuture, FutureExt};
use notes_handler::{Endpoint, Invocation, NoteError, NoteEvent};
use std::sync::Arc;

use super::note_key;
use crate::{identity::IdentityResolver, note::Note, store::NoteStore};

pub struct GetNote {
    store: Arc<dyn NoteStore>,
    identity: Arc<dyn IdentityResolver>,
}

impl GetNote {
    pub fn new(store: Arc<dyn NoteStore>, identity: Arc<dyn IdentityResolver>) -> Self {
        GetNote { store, identity }
    }
}

impl Endpoint for GetNote {
    type Output = Note;
    type Fut = BoxFuture<'static, Result<Note, NoteError>>;

    fn call(&self, event: NoteEvent, _: Invocation) -> Self::Fut {
        let key = note_key(self.identity.as_ref(), &event);
        let store = Arc::clone(&self.store);
        async move {
            store
                .get(key?)
                .await?
                .ok_or_else(|| NoteError::not_found("Item not found."))
        }
        .boxed()
    }
}
