//! API Gateway request adaptations
//!
//! Endpoints never see the raw proxy event. The runtime adapter converts an
//! [`ApiGatewayProxyRequest`] into a [`NoteEvent`] and the Lambda context into
//! an [`Invocation`] before the wrapper runs.

use aws_lambda_events::event::apigw::ApiGatewayProxyRequest;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::collections::HashMap;

use crate::error::NoteError;

/// A read-only view of single-valued string parameters
#[derive(Default, Debug, Clone, PartialEq)]
pub struct StrMap(HashMap<String, String>);

impl StrMap {
    /// Return the value associated with `key`, if any
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return the value associated with `key` or a bad request naming
    /// the missing parameter
    pub fn require(&self, key: &str) -> Result<&str, NoteError> {
        self.get(key).ok_or_else(|| {
            NoteError::bad_request(format!("missing parameter `{}`", key))
                .with_description("a required request parameter was not supplied")
        })
    }
}

impl From<HashMap<String, String>> for StrMap {
    fn from(inner: HashMap<String, String>) -> Self {
        StrMap(inner)
    }
}

impl<K, V> std::iter::FromIterator<(K, V)> for StrMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        StrMap(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// The parts of an incoming HTTP event an endpoint may read
#[derive(Default, Debug, Clone, PartialEq)]
pub struct NoteEvent {
    pub path_parameters: StrMap,
    pub query_string_parameters: StrMap,
    /// Cognito identity id attached by API Gateway for IAM-authorized routes
    pub identity_id: Option<String>,
    /// Request body, already base64 decoded when the gateway encoded it
    pub body: Option<String>,
}

impl NoteEvent {
    pub fn with_path_parameters(mut self, params: StrMap) -> Self {
        self.path_parameters = params;
        self
    }

    pub fn with_query_string_parameters(mut self, params: StrMap) -> Self {
        self.query_string_parameters = params;
        self
    }

    pub fn with_identity_id(mut self, id: impl Into<String>) -> Self {
        self.identity_id = Some(id.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Converts API Gateway proxy events into `NoteEvent`s
impl From<ApiGatewayProxyRequest> for NoteEvent {
    fn from(ag: ApiGatewayProxyRequest) -> Self {
        // multi-valued query string parameters are always a super
        // set of singly valued query string parameters,
        // when present, multi-valued query string parameters are preferred
        let query = if ag.multi_value_query_string_parameters.is_empty() {
            &ag.query_string_parameters
        } else {
            &ag.multi_value_query_string_parameters
        };
        let mut query_string_parameters = HashMap::new();
        for (key, value) in query.iter() {
            query_string_parameters
                .entry(key.to_string())
                .or_insert_with(|| value.to_string());
        }

        let base64 = ag.is_base64_encoded;
        let body = ag.body.map(|b| decode_body(base64, b));

        NoteEvent {
            path_parameters: StrMap::from(ag.path_parameters),
            query_string_parameters: StrMap::from(query_string_parameters),
            identity_id: ag.request_context.identity.cognito_identity_id,
            body,
        }
    }
}

/// Undecodable payloads are passed through untouched and rejected later
/// when the endpoint parses them.
fn decode_body(base64: bool, body: String) -> String {
    if !base64 {
        return body;
    }
    match STANDARD.decode(&body).map(String::from_utf8) {
        Ok(Ok(decoded)) => decoded,
        _ => body,
    }
}

/// Per-invocation metadata taken from the Lambda context
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Invocation {
    pub request_id: String,
    /// Execution deadline in epoch milliseconds
    pub deadline: u64,
}

impl From<&lambda_runtime::Context> for Invocation {
    fn from(ctx: &lambda_runtime::Context) -> Self {
        Invocation {
            request_id: ctx.request_id.clone(),
            deadline: ctx.deadline,
        }
    }
}
