//! Resolving the user a request acts for

use notes_handler::{NoteError, NoteEvent};
use std::sync::Arc;

use crate::config::IdentitySource;

/// Parameter name carrying the user id in queries and paths
pub const USER_ID_PARAM: &str = "userId";

/// Derives the owning user id from an event
pub trait IdentityResolver: Send + Sync {
    fn resolve(&self, event: &NoteEvent) -> Result<String, NoteError>;
}

/// Reads the Cognito identity id API Gateway attaches to IAM-authorized
/// requests
#[derive(Debug, Default, Clone, Copy)]
pub struct CognitoIdentity;

impl IdentityResolver for CognitoIdentity {
    fn resolve(&self, event: &NoteEvent) -> Result<String, NoteError> {
        event
            .identity_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .ok_or_else(|| NoteError::unauthorized("no authenticated identity on request"))
    }
}

/// Trusts whatever the client put in a query parameter
#[derive(Debug, Clone)]
pub struct QueryParameter {
    name: String,
}

impl QueryParameter {
    pub fn new(name: impl Into<String>) -> Self {
        QueryParameter { name: name.into() }
    }
}

impl IdentityResolver for QueryParameter {
    fn resolve(&self, event: &NoteEvent) -> Result<String, NoteError> {
        event
            .query_string_parameters
            .get(&self.name)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .ok_or_else(|| NoteError::unauthorized(format!("missing `{}` query parameter", self.name)))
    }
}

/// Reads the user from a path parameter, as routed by `/notes/{userId}/{id}`
#[derive(Debug, Clone)]
pub struct PathParameter {
    name: String,
}

impl PathParameter {
    pub fn new(name: impl Into<String>) -> Self {
        PathParameter { name: name.into() }
    }
}

impl IdentityResolver for PathParameter {
    fn resolve(&self, event: &NoteEvent) -> Result<String, NoteError> {
        event.path_parameters.require(&self.name).map(str::to_string)
    }
}

/// The resolver configured by `source`
pub fn resolver(source: IdentitySource) -> Arc<dyn IdentityResolver> {
    match source {
        IdentitySource::Cognito => Arc::new(CognitoIdentity),
        IdentitySource::QueryParameter => Arc::new(QueryParameter::new(USER_ID_PARAM)),
    }
}
