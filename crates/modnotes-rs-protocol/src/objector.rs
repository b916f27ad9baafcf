//! Turns raw response payloads into typed records.
//!
//! Dispatch is by shape: note payloads carry both `user_note_data` and
//! `mod_action_data`, creations are wrapped in `{"created": ..}`, and reddit
//! objects use the `{"kind": .., "data": ..}` envelope.

use crate::note::NoteRecord;
use crate::thing::Thing;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Errors raised while decoding a payload.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// The payload matched a known shape but failed to decode.
    #[error("failed to decode payload: {0}")]
    Decode(#[from] serde_json::Error),
    /// The payload matched no known shape.
    #[error("unrecognized payload: {0}")]
    Unrecognized(String),
}

/// Result of objectifying a payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Objectified {
    /// JSON `null`, e.g. a bulk lookup slot with no note.
    Absent,
    Note(Box<NoteRecord>),
    Thing(Box<Thing>),
    Listing(Vec<Thing>),
}

impl Objectified {
    /// Narrow to an optional note, rejecting other shapes.
    pub fn into_note(self) -> Result<Option<NoteRecord>, ProtocolError> {
        match self {
            Objectified::Absent => Ok(None),
            Objectified::Note(note) => Ok(Some(*note)),
            Objectified::Thing(thing) => Err(ProtocolError::Unrecognized(format!(
                "expected mod note, found {}",
                thing.kind_name()
            ))),
            Objectified::Listing(_) => Err(ProtocolError::Unrecognized(
                "expected mod note, found listing".to_string(),
            )),
        }
    }
}

/// One page of the notes listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotePage {
    #[serde(default)]
    pub mod_notes: Vec<Value>,
    #[serde(default)]
    pub start_cursor: Option<String>,
    #[serde(default)]
    pub end_cursor: Option<String>,
    #[serde(default)]
    pub has_next_page: bool,
}

impl NotePage {
    /// Cursor for the following page, if the server reports one.
    pub fn next_cursor(&self) -> Option<&str> {
        if self.has_next_page {
            self.end_cursor.as_deref()
        } else {
            None
        }
    }
}

/// Response of the bulk latest-note lookup: one slot per requested pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkNoteResponse {
    #[serde(default)]
    pub mod_notes: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Thing>,
}

/// Decode a payload into the richest known type.
pub fn objectify(value: Value) -> Result<Objectified, ProtocolError> {
    let map = match value {
        Value::Null => return Ok(Objectified::Absent),
        Value::Object(map) => map,
        other => {
            return Err(ProtocolError::Unrecognized(format!(
                "expected object, found {}",
                json_kind(&other)
            )));
        }
    };

    if map.contains_key("user_note_data") && map.contains_key("mod_action_data") {
        let note: NoteRecord = serde_json::from_value(Value::Object(map))?;
        return Ok(Objectified::Note(Box::new(note)));
    }

    if map.len() == 1 {
        if let Some(created) = map.get("created") {
            if created.is_object() {
                return objectify(created.clone());
            }
        }
    }

    let kind = map.get("kind").and_then(Value::as_str).map(str::to_owned);
    match kind.as_deref() {
        Some("Listing") => {
            let data = map.get("data").cloned().unwrap_or(Value::Null);
            let listing: ListingData = serde_json::from_value(data)?;
            Ok(Objectified::Listing(listing.children))
        }
        Some(_) => {
            let thing: Thing = serde_json::from_value(Value::Object(map))?;
            Ok(Objectified::Thing(Box::new(thing)))
        }
        None => {
            let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
            keys.sort_unstable();
            Err(ProtocolError::Unrecognized(format!(
                "object with keys [{}]",
                keys.join(", ")
            )))
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::{NotePage, Objectified, ProtocolError, objectify};
    use crate::thing::Thing;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    fn note(id: &str) -> Value {
        json!({
            "id": id,
            "type": "NOTE",
            "created_at": 1,
            "subreddit": "redditdev",
            "user": "spez",
            "operator": "bboe",
            "user_note_data": { "note": "hi", "label": null, "reddit_id": null },
            "mod_action_data": {}
        })
    }

    #[test]
    fn null_is_absent() {
        assert_eq!(objectify(Value::Null).expect("absent"), Objectified::Absent);
    }

    #[test]
    fn unwraps_created_envelope() {
        let created = objectify(json!({ "created": note("ModNote_1") }))
            .expect("objectify")
            .into_note()
            .expect("note")
            .expect("present");
        assert_eq!(created.id, "ModNote_1");
    }

    #[test]
    fn decodes_listing_children() {
        let listing = objectify(json!({
            "kind": "Listing",
            "data": {
                "after": null,
                "children": [{
                    "kind": "t2",
                    "data": { "id": "t2_1w72", "name": "spez" }
                }]
            }
        }))
        .expect("listing");
        let Objectified::Listing(children) = listing else {
            panic!("expected listing");
        };
        assert_eq!(children.len(), 1);
        assert!(matches!(children[0], Thing::Redditor(_)));
    }

    #[test]
    fn unknown_shape_is_reported() {
        let err = objectify(json!({ "foo": 1, "bar": 2 })).expect_err("unrecognized");
        let ProtocolError::Unrecognized(message) = err else {
            panic!("expected unrecognized");
        };
        assert_eq!(message, "object with keys [bar, foo]");
    }

    #[test]
    fn thing_is_not_a_note() {
        let thing = objectify(json!({
            "kind": "t5",
            "data": { "display_name": "redditdev" }
        }))
        .expect("thing");
        assert!(thing.into_note().is_err());
    }

    #[test]
    fn next_cursor_requires_next_page() {
        let page: NotePage = serde_json::from_value(json!({
            "mod_notes": [],
            "end_cursor": "abc",
            "has_next_page": false
        }))
        .expect("page");
        assert_eq!(page.next_cursor(), None);
    }
}
