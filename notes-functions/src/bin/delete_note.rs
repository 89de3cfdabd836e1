use notes_functions::{
    config::Config,
    endpoints::DeleteNote,
    identity::{PathParameter, USER_ID_PARAM},
    store::DynamoNoteStore,
    telemetry,
};
use notes_handler::{handler, run, TracingLog};
use std::sync::Arc;

// routed as DELETE /notes/{userId}/{id}
#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    telemetry::init();
    let config = Config::from_env()?;
    let store = Arc::new(DynamoNoteStore::from_config(&config).await);
    run(handler(DeleteNote::new(store, Arc::new(PathParameter::new(USER_ID_PARAM))), TracingLog)).await
}
