use futures_util::future::{BoxFuture, FutureExt};
use notes_handler::{Endpoint, Invocation, NoteError, NoteEvent};
use std::sync::Arc;

use crate::{identity::IdentityResolver, note::Note, store::NoteStore};

/// Lists every note of the resolved user, in store order.
///
/// Store failures are reported as API errors carrying the store's message.
pub struct ListNotes {
    store: Arc<dyn NoteStore>,
    identity: Arc<dyn IdentityResolver>,
}

impl ListNotes {
    pub fn new(store: Arc<dyn NoteStore>, identity: Arc<dyn IdentityResolver>) -> Self {
        ListNotes { store, identity }
    }
}

impl Endpoint for ListNotes {
    type Output = Vec<Note>;
    type Fut = BoxFuture<'static, Result<Vec<Note>, NoteError>>;

    fn call(&self, event: NoteEvent, _: Invocation) -> Self::Fut {
        let user_id = self.identity.resolve(&event);
        let store = Arc::clone(&self.store);
        async move {
            store
                .query(user_id?)
                .await
                .map_err(|err| NoteError::api(err.to_string()))
        }
        .boxed()
    }
}
