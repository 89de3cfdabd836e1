//! One endpoint per notes operation
//!
//! Each endpoint holds the store and identity resolver it was built with,
//! extracts its parameters from the [`NoteEvent`] and issues a single store
//! call. Wrap them with [`notes_handler::handler`] to serve them.

use notes_handler::{NoteError, NoteEvent};
use serde_json::{Map, Value};

use crate::{
    identity::IdentityResolver,
    note::{is_reserved, NoteKey},
};

mod create;
mod delete;
mod get;
mod list;
mod update;

pub use self::{create::CreateNote, delete::DeleteNote, get::GetNote, list::ListNotes, update::UpdateNote};

/// Path parameter carrying the note id
pub const NOTE_ID_PARAM: &str = "id";

fn note_key(identity: &dyn IdentityResolver, event: &NoteEvent) -> Result<NoteKey, NoteError> {
    let user_id = identity.resolve(event)?;
    let note_id = event.path_parameters.require(NOTE_ID_PARAM)?;
    Ok(NoteKey::new(user_id, note_id))
}

/// The request body as a JSON object of content fields
fn content(event: &NoteEvent) -> Result<Map<String, Value>, NoteError> {
    let body = event
        .body
        .as_deref()
        .filter(|body| !body.trim().is_empty())
        .ok_or_else(|| NoteError::bad_request("missing request body"))?;
    let fields = match serde_json::from_str(body) {
        Ok(Value::Object(fields)) => fields,
        Ok(_) => {
            return Err(NoteError::bad_request("request body must be a JSON object"));
        }
        Err(err) => {
            return Err(NoteError::bad_request("request body is not valid JSON").with_description(err.to_string()));
        }
    };
    if let Some(name) = fields.keys().find(|name| is_reserved(name)) {
        return Err(NoteError::bad_request(format!("`{}` cannot be set", name))
            .with_description("key and timestamp attributes are managed by the service"));
    }
    Ok(fields)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::QueryParameter;
    use notes_handler::ErrorKind;
    use serde_json::json;

    fn event_with_body(body: &str) -> NoteEvent {
        NoteEvent::default().with_body(body)
    }

    #[test]
    fn keys_combine_identity_and_path() {
        let event = NoteEvent::default()
            .with_query_string_parameters(vec![("userId", "u1")].into_iter().collect())
            .with_path_parameters(vec![("id", "n1")].into_iter().collect());
        assert_eq!(
            note_key(&QueryParameter::new("userId"), &event),
            Ok(NoteKey::new("u1", "n1"))
        );
    }

    #[test]
    fn content_must_be_a_json_object() {
        let fields = content(&event_with_body(r#"{"content":"hello"}"#)).expect("object");
        assert_eq!(fields.get("content"), Some(&json!("hello")));

        for body in &["", "[1,2]", "{not json"] {
            let err = content(&event_with_body(body)).expect_err("rejected");
            assert_eq!(err.kind(), ErrorKind::BadRequest, "body {:?}", body);
        }
        assert!(content(&NoteEvent::default()).is_err());
    }

    #[test]
    fn content_may_not_touch_reserved_attributes() {
        let err = content(&event_with_body(r#"{"noteId":"mine"}"#)).expect_err("reserved");
        assert_eq!(err.message(), "`noteId` cannot be set");
    }
}
