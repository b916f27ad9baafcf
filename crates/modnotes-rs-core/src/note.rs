//! Live note handle: a record plus the client that fetched it.

use crate::client::RedditClient;
use crate::error::ModNotesError;
use log::info;
use modnotes_rs_protocol::{ApiRequest, NoteRecord, api_path};
use std::fmt;
use std::ops::Deref;

/// A fetched or created note that can still be acted on.
///
/// Dereferences to its [`NoteRecord`]. [`ModNote::delete`] consumes the
/// handle, so a deleted note cannot be mutated again.
#[derive(Clone)]
pub struct ModNote {
    record: NoteRecord,
    client: RedditClient,
}

impl ModNote {
    pub fn new(record: NoteRecord, client: RedditClient) -> Self {
        Self { record, client }
    }

    pub fn record(&self) -> &NoteRecord {
        &self.record
    }

    pub fn into_record(self) -> NoteRecord {
        self.record
    }

    /// Delete this note on the server.
    pub fn delete(self) -> Result<(), ModNotesError> {
        let request = delete_request(&self.record.subreddit, &self.record.user, &self.record.id);
        self.client.delete(request)?;
        info!(
            "mod note deleted (subreddit={}, user={}, id={})",
            self.record.subreddit, self.record.user, self.record.id
        );
        Ok(())
    }
}

/// Delete request for one note.
pub(crate) fn delete_request(subreddit: &str, user: &str, note_id: &str) -> ApiRequest {
    ApiRequest::delete(api_path::MOD_NOTES)
        .query("user", user)
        .query("subreddit", subreddit)
        .query("note_id", note_id)
}

impl Deref for ModNote {
    type Target = NoteRecord;

    fn deref(&self) -> &NoteRecord {
        &self.record
    }
}

impl PartialEq for ModNote {
    fn eq(&self, other: &Self) -> bool {
        self.record == other.record
    }
}

impl fmt::Debug for ModNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ModNote").field(&self.record).finish()
    }
}

impl fmt::Display for ModNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.record, f)
    }
}
