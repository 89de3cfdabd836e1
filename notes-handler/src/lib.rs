//! Uniform request handling for the notes Lambda functions.
//!
//! Every endpoint is an [`Endpoint`]: it receives a [`NoteEvent`] and an
//! [`Invocation`] and returns a serializable value or a [`NoteError`].
//! [`handler`] wraps an endpoint into a [`Handler`], the single place where
//! results and failures become a [`NoteResponse`] envelope with CORS headers.
//!
//! ```rust,no_run
//! use notes_handler::{endpoint_fn, handler, run, Invocation, NoteError, NoteEvent, TracingLog};
//!
//! async fn hello(_: NoteEvent, _: Invocation) -> Result<&'static str, NoteError> {
//!     Ok("hello")
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), lambda_runtime::Error> {
//!     run(handler(endpoint_fn(hello), TracingLog)).await
//! }
//! ```

use aws_lambda_events::event::apigw::ApiGatewayProxyRequest;
use lambda_runtime::{service_fn, LambdaEvent};
use serde::Serialize;
use std::{future::Future, sync::Arc};
use tracing::Instrument;

pub mod error;
pub mod log;
pub mod request;
pub mod response;

pub use crate::{
    error::{ErrorKind, NoteError},
    log::{ErrorLog, MemoryLog, TracingLog},
    request::{Invocation, NoteEvent, StrMap},
    response::{CorsHeaders, NoteResponse},
};

/// Business logic for one operation
pub trait Endpoint {
    /// Value returned on success, serialized into the response body.
    /// Zero-sized values serializing to `null`, such as `()`, leave the
    /// body empty; anything else is always valid JSON.
    type Output: Serialize;
    /// Future resolved by [`Endpoint::call`]
    type Fut: Future<Output = Result<Self::Output, NoteError>> + Send;

    /// Run the operation for one event
    fn call(&self, event: NoteEvent, context: Invocation) -> Self::Fut;
}

/// Returns an [`Endpoint`] backed by an async function or closure
pub fn endpoint_fn<F, Fut, Out>(f: F) -> EndpointFn<F>
where
    F: Fn(NoteEvent, Invocation) -> Fut,
    Fut: Future<Output = Result<Out, NoteError>> + Send,
    Out: Serialize,
{
    EndpointFn { f }
}

/// An [`Endpoint`] implemented by a closure
#[derive(Clone, Debug)]
pub struct EndpointFn<F> {
    f: F,
}

impl<F, Fut, Out> Endpoint for EndpointFn<F>
where
    F: Fn(NoteEvent, Invocation) -> Fut,
    Fut: Future<Output = Result<Out, NoteError>> + Send,
    Out: Serialize,
{
    type Output = Out;
    type Fut = Fut;

    fn call(&self, event: NoteEvent, context: Invocation) -> Self::Fut {
        (self.f)(event, context)
    }
}

/// Wraps an endpoint so every outcome becomes a [`NoteResponse`]
pub fn handler<E, L>(endpoint: E, log: L) -> Handler<E>
where
    E: Endpoint,
    L: ErrorLog + 'static,
{
    Handler {
        endpoint,
        log: Arc::new(log),
    }
}

/// Terminal error boundary around an [`Endpoint`]
pub struct Handler<E> {
    endpoint: E,
    log: Arc<dyn ErrorLog>,
}

impl<E> Handler<E>
where
    E: Endpoint,
{
    /// Run the endpoint and shape its outcome. Never fails.
    pub async fn invoke(&self, event: NoteEvent, context: Invocation) -> NoteResponse {
        let outcome = self
            .endpoint
            .call(event, context)
            .await
            .and_then(|result| NoteResponse::success(&result));
        match outcome {
            Ok(response) => response,
            Err(err) => {
                self.log.error(&format!("Server Error - {}", err.message()));
                NoteResponse::failure(&err)
            }
        }
    }
}

/// Starts the Lambda runtime loop, feeding API Gateway proxy events
/// through `handler` until the process is frozen or killed.
pub async fn run<E>(handler: Handler<E>) -> Result<(), lambda_runtime::Error>
where
    E: Endpoint,
{
    let handler = &handler;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<ApiGatewayProxyRequest>| async move {
        let context = Invocation::from(&event.context);
        let span = tracing::info_span!(
            "invocation",
            request_id = %context.request_id,
            deadline = context.deadline
        );
        let response = handler.invoke(event.payload.into(), context).instrument(span).await;
        Ok::<NoteResponse, lambda_runtime::Error>(response)
    }))
    .await
}
