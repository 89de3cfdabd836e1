use notes_functions::{
    endpoints::{CreateNote, DeleteNote, ListNotes},
    identity::{CognitoIdentity, PathParameter},
    store::{MemoryNoteStore, NoteStore},
    telemetry,
};
use notes_handler::{handler, Invocation, NoteEvent, TracingLog};
use std::sync::Arc;

// Runs the endpoints against an in-memory table and prints each envelope.
#[tokio::main]
async fn main() -> Result<(), serde_json::Error> {
    telemetry::init();
    let store: Arc<dyn NoteStore> = Arc::new(MemoryNoteStore::new());

    let create = handler(CreateNote::new(store.clone(), Arc::new(CognitoIdentity)), TracingLog);
    let list = handler(ListNotes::new(store.clone(), Arc::new(CognitoIdentity)), TracingLog);
    let delete = handler(DeleteNote::new(store, Arc::new(PathParameter::new("userId"))), TracingLog);

    let created = create
        .invoke(
            NoteEvent::default()
                .with_identity_id("local-user")
                .with_body(r#"{"content":"hello from rust"}"#),
            Invocation::default(),
        )
        .await;
    println!("{}", serde_json::to_string_pretty(&created)?);

    let listed = list
        .invoke(NoteEvent::default().with_identity_id("local-user"), Invocation::default())
        .await;
    println!("{}", serde_json::to_string_pretty(&listed)?);

    // no note id: rejected before touching the store
    let rejected = delete
        .invoke(
            NoteEvent::default().with_path_parameters(vec![("userId", "local-user")].into_iter().collect()),
            Invocation::default(),
        )
        .await;
    println!("{}", serde_json::to_string_pretty(&rejected)?);
    Ok(())
}
