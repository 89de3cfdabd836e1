//! Response types

use http::StatusCode;
use serde::Serialize;

use crate::error::NoteError;

/// Representation of the envelope returned to API Gateway
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NoteResponse {
    pub status_code: u16,
    pub body: String,
    pub headers: CorsHeaders,
}

/// Fixed CORS headers attached to every response
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CorsHeaders {
    #[serde(rename = "Access-Control-Allow-Origin")]
    pub allow_origin: &'static str,
    #[serde(rename = "Access-Control-Allow-Credentials")]
    pub allow_credentials: bool,
}

impl Default for CorsHeaders {
    fn default() -> Self {
        CorsHeaders {
            allow_origin: "*",
            allow_credentials: true,
        }
    }
}

/// Body of every failed response
#[derive(Serialize, Debug)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

impl NoteResponse {
    fn new(status: StatusCode, body: String) -> Self {
        NoteResponse {
            status_code: status.as_u16(),
            body,
            headers: CorsHeaders::default(),
        }
    }

    /// A 200 whose body is the JSON serialization of `value`.
    ///
    /// Zero-sized values serializing to `null`, such as `()` or unit
    /// structs, produce an empty body. An explicit `null` or `None` is
    /// still written as `null`.
    pub fn success<T>(value: &T) -> Result<Self, NoteError>
    where
        T: Serialize + ?Sized,
    {
        let json = serde_json::to_value(value)?;
        let body = if json.is_null() && std::mem::size_of_val(value) == 0 {
            String::new()
        } else {
            serde_json::to_string(&json)?
        };
        Ok(NoteResponse::new(StatusCode::OK, body))
    }

    /// An error envelope carrying the status mapped from `err`
    pub fn failure(err: &NoteError) -> Self {
        let body = ErrorBody {
            error: err.message(),
            description: err.description(),
        };
        // two borrowed strings always serialize
        let body = serde_json::to_string(&body).unwrap_or_default();
        NoteResponse::new(err.status_code(), body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serialize_success_envelope() {
        let res = NoteResponse::success(&json!({ "hello": "notes" })).expect("serializable");
        assert_eq!(
            serde_json::to_string(&res).expect("failed to serialize response"),
            r#"{"statusCode":200,"body":"{\"hello\":\"notes\"}","headers":{"Access-Control-Allow-Origin":"*","Access-Control-Allow-Credentials":true}}"#
        );
    }

    #[test]
    fn unit_results_have_empty_bodies() {
        let res = NoteResponse::success(&()).expect("serializable");
        assert_eq!(res.status_code, 200);
        assert_eq!(res.body, "");
    }

    #[test]
    fn explicit_nulls_stay_valid_json() {
        let res = NoteResponse::success(&serde_json::Value::Null).expect("serializable");
        assert_eq!(res.body, "null");
        let res = NoteResponse::success(&None::<String>).expect("serializable");
        assert_eq!(res.body, "null");
    }

    #[test]
    fn sequences_keep_their_order() {
        let res = NoteResponse::success(&vec!["n2", "n1"]).expect("serializable");
        assert_eq!(res.body, r#"["n2","n1"]"#);
    }

    #[test]
    fn serialize_error_without_description() {
        let res = NoteResponse::failure(&NoteError::api("timeout"));
        assert_eq!(res.status_code, 500);
        assert_eq!(res.body, r#"{"error":"timeout"}"#);
    }

    #[test]
    fn serialize_error_with_description() {
        let res = NoteResponse::failure(&NoteError::bad_request("missing parameter `id`").with_description("path"));
        assert_eq!(res.status_code, 400);
        assert_eq!(
            res.body,
            r#"{"error":"missing parameter `id`","description":"path"}"#
        );
        assert_eq!(res.headers, CorsHeaders::default());
    }
}
