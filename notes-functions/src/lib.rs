//! Notes CRUD functions backed by DynamoDB.
//!
//! Every binary in this crate wires one endpoint from [`endpoints`] to a
//! [`store::DynamoNoteStore`] and serves it through
//! [`notes_handler::run`]:
//!
//! ```rust,no_run
//! use notes_functions::{config::Config, endpoints::ListNotes, identity, store::DynamoNoteStore, telemetry};
//! use notes_handler::{handler, run, TracingLog};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), lambda_runtime::Error> {
//!     telemetry::init();
//!     let config = Config::from_env()?;
//!     let store = Arc::new(DynamoNoteStore::from_config(&config).await);
//!     let endpoint = ListNotes::new(store, identity::resolver(config.identity));
//!     run(handler(endpoint, TracingLog)).await
//! }
//! ```

pub mod config;
pub mod endpoints;
pub mod identity;
pub mod note;
pub mod store;
pub mod telemetry;
