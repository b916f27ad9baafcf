use modnotes_rs_core::{DeleteNotes, ModNotesError, NewNote, NoteTargetExt, RedditClient};
use modnotes_rs_protocol::{Method, NoteLabel};
use modnotes_rs_test_utils::{
    RecordingTransport, created, info_listing, listing_page, note_json,
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::sync::Arc;

/// A bare fullname is looked up to find its subreddit and author.
#[test]
fn create_resolves_fullname_through_info() {
    let transport = Arc::new(RecordingTransport::with_responses(vec![
        info_listing(vec![json!({
            "kind": "t1",
            "data": {
                "id": "xyz",
                "name": "t1_xyz",
                "author": "bboe",
                "subreddit": "test"
            }
        })]),
        created(note_json("ModNote_7", "test", "bboe")),
    ]));
    let notes = RedditClient::new(transport.clone()).mod_notes();
    let note = notes
        .create(NewNote::new("warned").thing("t1_xyz"))
        .expect("create");
    assert_eq!(note.id, "ModNote_7");
    assert_eq!(note.note.as_deref(), Some("note ModNote_7"));

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].path, "api/info");
    assert_eq!(requests[1].method, Method::Post);
    assert_eq!(requests[1].form_field("subreddit"), Some("test"));
    assert_eq!(requests[1].form_field("user"), Some("bboe"));
    assert_eq!(requests[1].form_field("thing"), Some("t1_xyz"));
}

/// Created notes carry the fields that were sent.
#[test]
fn create_round_trips_fields() {
    let mut payload = note_json("ModNote_8", "redditdev", "spez");
    payload["user_note_data"]["note"] = json!("be nice");
    payload["user_note_data"]["label"] = json!("HELPFUL_USER");
    let transport = Arc::new(RecordingTransport::with_responses(vec![created(payload)]));
    let notes = RedditClient::new(transport).subreddit_notes("redditdev");
    let note = notes
        .create(
            NewNote::new("be nice")
                .redditor("spez")
                .label(NoteLabel::HelpfulUser),
        )
        .expect("create");
    assert_eq!(note.subreddit, "redditdev");
    assert_eq!(note.user, "spez");
    assert_eq!(note.note.as_deref(), Some("be nice"));
    assert_eq!(note.label, Some(NoteLabel::HelpfulUser));
}

/// Deleting everything pages through the listing and deletes each note.
#[test]
fn delete_all_walks_every_note() {
    let transport = Arc::new(RecordingTransport::with_responses(vec![
        listing_page(
            vec![
                note_json("n1", "redditdev", "spez"),
                note_json("n2", "redditdev", "spez"),
            ],
            Some("cursor-n2"),
            true,
        ),
        Value::Null,
        Value::Null,
        listing_page(vec![note_json("n3", "redditdev", "spez")], None, false),
        Value::Null,
    ]));
    let notes = RedditClient::new(transport.clone()).subreddit_notes("redditdev");
    let deleted = notes.delete(DeleteNotes::all("spez")).expect("delete all");
    assert_eq!(deleted, 3);

    let deleted_ids: Vec<String> = transport
        .requests()
        .iter()
        .filter(|request| request.method == Method::Delete)
        .filter_map(|request| request.query_param("note_id").map(str::to_string))
        .collect();
    assert_eq!(deleted_ids, vec!["n1", "n2", "n3"]);
    assert!(transport
        .requests()
        .iter()
        .filter(|request| request.method == Method::Get)
        .all(|request| request.query_param("limit") == Some("100")));
}

/// Neither a note id nor delete_all is an argument error.
#[test]
fn delete_without_target_is_argument_error() {
    let transport = Arc::new(RecordingTransport::new());
    let notes = RedditClient::new(transport.clone()).subreddit_notes("redditdev");
    let err = notes.delete(DeleteNotes::default()).unwrap_err();
    assert!(matches!(err, ModNotesError::InvalidArguments(_)));
    assert_eq!(transport.request_count(), 0);
}

/// A fetched note can be deleted through the handle it came from.
#[test]
fn fetched_note_deletes_itself() {
    let transport = Arc::new(RecordingTransport::with_responses(vec![
        listing_page(vec![note_json("n1", "test", "bboe")], None, false),
        Value::Null,
    ]));
    let client = RedditClient::new(transport.clone());
    let notes = client.subreddit_notes("test");
    let note = notes
        .listing("test", "bboe", Default::default())
        .next()
        .expect("note")
        .expect("ok");
    notes.delete_note(note).expect("delete");
    let request = transport.last_request().expect("request");
    assert_eq!(request.method, Method::Delete);
    assert_eq!(request.query_param("note_id"), Some("n1"));
}

/// Notes added through a submission land on its author.
#[test]
fn submission_add_note() {
    let transport = Arc::new(RecordingTransport::with_responses(vec![created(note_json(
        "ModNote_9",
        "redditdev",
        "spez",
    ))]));
    let client = RedditClient::new(transport.clone());
    let submission = modnotes_rs_test_utils::submission("abc", "redditdev", "spez");
    let note = submission.add_note(&client, "nice post", None).expect("note");
    assert_eq!(note.user, "spez");
    let request = transport.last_request().expect("request");
    assert_eq!(request.form_field("label"), None);
    assert_eq!(request.form_field("thing"), Some("t3_abc"));
}
