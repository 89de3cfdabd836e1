use notes_functions::{config::Config, endpoints::ListNotes, identity, store::DynamoNoteStore, telemetry};
use notes_handler::{handler, run, TracingLog};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    telemetry::init();
    let config = Config::from_env()?;
    let store = Arc::new(DynamoNoteStore::from_config(&config).await);
    run(handler(ListNotes::new(store, identity::resolver(config.identity)), TracingLog)).await
}
