//! Note helpers on comments and submissions.

use crate::client::RedditClient;
use crate::error::ModNotesError;
use crate::listing::ListingOptions;
use crate::note::ModNote;
use crate::notes::AllNotes;
use crate::query::authored_pair;
use crate::writer::{NewNote, NoteThing};
use modnotes_rs_protocol::{Authored, NoteLabel};

/// Notes on the author of a piece of content, scoped to its subreddit.
pub trait NoteTargetExt {
    /// Create a note on the author, linked to this content.
    fn add_note(
        &self,
        client: &RedditClient,
        note: impl Into<String>,
        label: Option<NoteLabel>,
    ) -> Result<ModNote, ModNotesError>;

    /// Every note on the author in this content's subreddit.
    fn author_notes(
        &self,
        client: &RedditClient,
        options: ListingOptions,
    ) -> Result<AllNotes, ModNotesError>;
}

impl<T> NoteTargetExt for T
where
    T: Authored + Clone + Into<NoteThing>,
{
    fn add_note(
        &self,
        client: &RedditClient,
        note: impl Into<String>,
        label: Option<NoteLabel>,
    ) -> Result<ModNote, ModNotesError> {
        let mut new = NewNote::new(note).thing(self.clone());
        new.label = label;
        client.subreddit_notes(self.subreddit()).create(new)
    }

    fn author_notes(
        &self,
        client: &RedditClient,
        options: ListingOptions,
    ) -> Result<AllNotes, ModNotesError> {
        let pair = authored_pair(self)?;
        Ok(AllNotes::new(client.clone(), vec![pair], options))
    }
}

#[cfg(test)]
mod tests {
    use super::NoteTargetExt;
    use crate::client::RedditClient;
    use crate::error::ModNotesError;
    use crate::listing::ListingOptions;
    use modnotes_rs_protocol::NoteLabel;
    use modnotes_rs_test_utils::{
        RecordingTransport, comment, created, listing_page, note_json, submission,
    };
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    #[test]
    fn comment_add_note_targets_author() {
        let transport = Arc::new(RecordingTransport::with_responses(vec![created(note_json(
            "ModNote_1", "test", "bboe",
        ))]));
        let client = RedditClient::new(transport.clone());
        let note = comment("def", "test", "bboe")
            .add_note(&client, "be nice", Some(NoteLabel::AbuseWarning))
            .expect("note");
        assert_eq!(note.user, "bboe");
        let request = transport.last_request().expect("request");
        assert_eq!(request.form_field("user"), Some("bboe"));
        assert_eq!(request.form_field("subreddit"), Some("test"));
        assert_eq!(request.form_field("thing"), Some("t1_def"));
        assert_eq!(request.form_field("label"), Some("ABUSE_WARNING"));
    }

    #[test]
    fn submission_author_notes_lists_pair() {
        let transport = Arc::new(RecordingTransport::with_responses(vec![listing_page(
            vec![note_json("n1", "redditdev", "spez")],
            None,
            false,
        )]));
        let client = RedditClient::new(transport.clone());
        let notes: Vec<_> = submission("abc", "redditdev", "spez")
            .author_notes(&client, ListingOptions::new())
            .expect("notes")
            .collect::<Result<_, _>>()
            .expect("listing");
        assert_eq!(notes.len(), 1);
        let request = transport.last_request().expect("request");
        assert_eq!(request.query_param("subreddit"), Some("redditdev"));
        assert_eq!(request.query_param("user"), Some("spez"));
    }

    #[test]
    fn deleted_author_cannot_be_noted() {
        let client = RedditClient::new(Arc::new(RecordingTransport::new()));
        let mut orphan = comment("def", "test", "bboe");
        orphan.author = None;
        let err = orphan
            .author_notes(&client, ListingOptions::new())
            .err()
            .expect("error");
        assert!(matches!(err, ModNotesError::Config(_)));
    }
}
