use modnotes_rs_protocol::{Comment, Submission};
use serde_json::{Value, json};

/// Plain note payload in the server's nested shape.
pub fn note_json(id: &str, subreddit: &str, user: &str) -> Value {
    json!({
        "id": id,
        "type": "NOTE",
        "created_at": 1_652_000_000,
        "subreddit": subreddit,
        "subreddit_id": "t5_test",
        "user": user,
        "user_id": "t2_test",
        "operator": "mod_account",
        "operator_id": "t2_mod",
        "cursor": format!("cursor-{id}"),
        "user_note_data": {
            "note": format!("note {id}"),
            "label": null,
            "reddit_id": null
        },
        "mod_action_data": {
            "action": null,
            "reddit_id": null,
            "details": null,
            "description": null
        }
    })
}

/// One page of the notes listing.
pub fn listing_page(notes: Vec<Value>, end_cursor: Option<&str>, has_next_page: bool) -> Value {
    json!({
        "mod_notes": notes,
        "start_cursor": null,
        "end_cursor": end_cursor,
        "has_next_page": has_next_page
    })
}

/// Bulk lookup response; use `Value::Null` for pairs without a note.
pub fn bulk_page(entries: Vec<Value>) -> Value {
    json!({ "mod_notes": entries })
}

/// Note creation response envelope.
pub fn created(note: Value) -> Value {
    json!({ "created": note })
}

/// `api/info` listing wrapping the given thing payloads.
pub fn info_listing(children: Vec<Value>) -> Value {
    json!({
        "kind": "Listing",
        "data": { "after": null, "before": null, "children": children }
    })
}

pub fn submission(id: &str, subreddit: &str, author: &str) -> Submission {
    Submission {
        id: id.to_string(),
        name: format!("t3_{id}"),
        author: Some(author.to_string()),
        subreddit: subreddit.to_string(),
        title: Some(format!("submission {id}")),
    }
}

pub fn comment(id: &str, subreddit: &str, author: &str) -> Comment {
    Comment {
        id: id.to_string(),
        name: format!("t1_{id}"),
        author: Some(author.to_string()),
        subreddit: subreddit.to_string(),
        link_id: None,
        body: Some(format!("comment {id}")),
    }
}
