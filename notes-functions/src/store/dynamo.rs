use aws_sdk_dynamodb::{
    error::DisplayErrorContext,
    types::{AttributeValue, ReturnValue},
    Client,
};
use futures_util::future::{BoxFuture, FutureExt};
use serde_json::{Map, Number, Value};
use std::collections::HashMap;
use tracing::debug;

use super::{NoteStore, StoreError, StoreResult};
use crate::{
    config::Config,
    note::{Note, NoteKey, NOTE_ID, USER_ID},
};

type Item = HashMap<String, AttributeValue>;

/// Notes table in DynamoDB, partitioned by `userId` and sorted by `noteId`
#[derive(Debug, Clone)]
pub struct DynamoNoteStore {
    client: Client,
    table_name: String,
}

impl DynamoNoteStore {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        DynamoNoteStore {
            client,
            table_name: table_name.into(),
        }
    }

    /// Build a client from the ambient AWS configuration (credentials,
    /// region) for the table named in `config`.
    pub async fn from_config(config: &Config) -> Self {
        let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(Client::new(&sdk_config), config.table_name.clone())
    }

    async fn query_all(&self, user_id: String) -> StoreResult<Vec<Note>> {
        let mut notes = Vec::new();
        let mut start_key = None;
        loop {
            let output = self
                .client
                .query()
                .table_name(&self.table_name)
                .key_condition_expression("userId = :userId")
                .expression_attribute_values(":userId", AttributeValue::S(user_id.clone()))
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(backend)?;
            for item in output.items() {
                notes.push(from_item(item)?);
            }
            match output.last_evaluated_key() {
                Some(key) if !key.is_empty() => start_key = Some(key.clone()),
                _ => break,
            }
        }
        debug!(count = notes.len(), "queried notes");
        Ok(notes)
    }

    async fn update_existing(&self, key: NoteKey, changes: Map<String, Value>) -> StoreResult<Option<Note>> {
        if changes.is_empty() {
            return self.get_one(key).await;
        }
        let mut assignments = Vec::with_capacity(changes.len());
        let mut request = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .set_key(Some(key_item(&key)))
            .condition_expression("attribute_exists(noteId)")
            .return_values(ReturnValue::AllNew);
        for (i, (name, value)) in changes.into_iter().enumerate() {
            let name_ref = format!("#a{}", i);
            let value_ref = format!(":v{}", i);
            assignments.push(format!("{} = {}", name_ref, value_ref));
            request = request
                .expression_attribute_names(name_ref, name)
                .expression_attribute_values(value_ref, to_attribute(value));
        }
        let result = request
            .update_expression(format!("SET {}", assignments.join(", ")))
            .send()
            .await;
        match result {
            Ok(output) => output.attributes().map(from_item).transpose(),
            Err(err) => {
                let err = err.into_service_error();
                if err.is_conditional_check_failed_exception() {
                    Ok(None)
                } else {
                    Err(backend(err))
                }
            }
        }
    }

    async fn get_one(&self, key: NoteKey) -> StoreResult<Option<Note>> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .set_key(Some(key_item(&key)))
            .send()
            .await
            .map_err(backend)?;
        output.item().map(from_item).transpose()
    }
}

impl NoteStore for DynamoNoteStore {
    fn put(&self, note: Note) -> BoxFuture<'_, StoreResult<()>> {
        async move {
            self.client
                .put_item()
                .table_name(&self.table_name)
                .set_item(Some(to_item(note)))
                .send()
                .await
                .map_err(backend)?;
            Ok(())
        }
        .boxed()
    }

    fn get(&self, key: NoteKey) -> BoxFuture<'_, StoreResult<Option<Note>>> {
        self.get_one(key).boxed()
    }

    fn query(&self, user_id: String) -> BoxFuture<'_, StoreResult<Vec<Note>>> {
        self.query_all(user_id).boxed()
    }

    fn update(&self, key: NoteKey, changes: Map<String, Value>) -> BoxFuture<'_, StoreResult<Option<Note>>> {
        self.update_existing(key, changes).boxed()
    }

    fn delete(&self, key: NoteKey) -> BoxFuture<'_, StoreResult<()>> {
        async move {
            let output = self
                .client
                .delete_item()
                .table_name(&self.table_name)
                .set_key(Some(key_item(&key)))
                .send()
                .await
                .map_err(backend)?;
            debug!(result = ?output, "deleted note");
            Ok(())
        }
        .boxed()
    }
}

fn backend<E>(err: E) -> StoreError
where
    E: std::error::Error,
{
    StoreError::Backend(DisplayErrorContext(err).to_string())
}

fn key_item(key: &NoteKey) -> Item {
    let mut item = HashMap::with_capacity(2);
    item.insert(USER_ID.to_string(), AttributeValue::S(key.user_id.clone()));
    item.insert(NOTE_ID.to_string(), AttributeValue::S(key.note_id.clone()));
    item
}

fn to_item(note: Note) -> Item {
    let mut item = key_item(&note.key());
    for (name, value) in note.attributes {
        item.insert(name, to_attribute(value));
    }
    item
}

fn from_item(item: &Item) -> StoreResult<Note> {
    let mut object = Map::with_capacity(item.len());
    for (name, value) in item {
        object.insert(name.clone(), from_attribute(value)?);
    }
    serde_json::from_value(Value::Object(object)).map_err(|err| StoreError::Malformed(err.to_string()))
}

fn to_attribute(value: Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s),
        Value::Array(values) => AttributeValue::L(values.into_iter().map(to_attribute).collect()),
        Value::Object(fields) => AttributeValue::M(fields.into_iter().map(|(k, v)| (k, to_attribute(v))).collect()),
    }
}

/// DynamoDB numbers carry up to 38 significant digits. They are read as
/// `serde_json` numbers: integers fitting in 64 bits stay exact, anything
/// larger or fractional becomes an `f64` and may lose precision.
fn from_attribute(value: &AttributeValue) -> StoreResult<Value> {
    let json = match value {
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::N(n) => Value::Number(parse_number(n)?),
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::L(values) => Value::Array(values.iter().map(from_attribute).collect::<StoreResult<_>>()?),
        AttributeValue::M(fields) => Value::Object(
            fields
                .iter()
                .map(|(k, v)| from_attribute(v).map(|v| (k.clone(), v)))
                .collect::<StoreResult<_>>()?,
        ),
        AttributeValue::Ss(values) => Value::Array(values.iter().cloned().map(Value::String).collect()),
        AttributeValue::Ns(values) => Value::Array(
            values
                .iter()
                .map(|n| parse_number(n).map(Value::Number))
                .collect::<StoreResult<_>>()?,
        ),
        other => {
            return Err(StoreError::Malformed(format!(
                "unsupported attribute type {:?}",
                other
            )))
        }
    };
    Ok(json)
}

fn parse_number(n: &str) -> StoreResult<Number> {
    n.parse::<Number>()
        .map_err(|_| StoreError::Malformed(format!("invalid number `{}`", n)))
}
