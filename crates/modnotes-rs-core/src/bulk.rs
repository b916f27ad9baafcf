//! Latest note for many (subreddit, user) pairs in as few requests as possible.

use crate::client::RedditClient;
use crate::error::ModNotesError;
use crate::note::ModNote;
use log::{debug, warn};
use modnotes_rs_protocol::{
    ApiRequest, BULK_CHUNK_SIZE, BulkNoteResponse, NoteRecord, RedditorRef, SubredditRef,
    api_path, objectify,
};
use std::collections::{HashMap, VecDeque};

type PairKey = (String, String);

/// Lazy iterator yielding one entry per requested pair, in input order.
///
/// Pairs are sent in chunks of [`BULK_CHUNK_SIZE`]; a chunk is requested only
/// when the previous one has been fully yielded. Pairs without a note yield
/// `None`.
pub struct BulkNotes {
    client: RedditClient,
    pairs: Vec<(SubredditRef, RedditorRef)>,
    next_chunk: usize,
    buffer: VecDeque<Option<ModNote>>,
    failed: bool,
}

impl BulkNotes {
    /// Pair `subreddits[i]` with `users[i]`; both lists must be the same length.
    pub fn new(
        client: RedditClient,
        subreddits: Vec<SubredditRef>,
        users: Vec<RedditorRef>,
    ) -> Result<Self, ModNotesError> {
        if subreddits.len() != users.len() {
            return Err(ModNotesError::InvalidArguments(format!(
                "subreddits and users must be the same length (subreddits={}, users={})",
                subreddits.len(),
                users.len()
            )));
        }
        Ok(Self::from_pairs(
            client,
            subreddits.into_iter().zip(users).collect(),
        ))
    }

    pub fn from_pairs(client: RedditClient, pairs: Vec<(SubredditRef, RedditorRef)>) -> Self {
        Self {
            client,
            pairs,
            next_chunk: 0,
            buffer: VecDeque::new(),
            failed: false,
        }
    }

    /// Number of requests still to be made.
    pub fn pending_requests(&self) -> usize {
        self.pairs.len().saturating_sub(self.next_chunk).div_ceil(BULK_CHUNK_SIZE)
    }

    fn fetch_chunk(&mut self) -> Result<(), ModNotesError> {
        let start = self.next_chunk;
        let end = (start + BULK_CHUNK_SIZE).min(self.pairs.len());
        let chunk = &self.pairs[start..end];

        let subreddits = join(chunk.iter().map(|(subreddit, _)| subreddit.as_str()));
        let users = join(chunk.iter().map(|(_, user)| user.as_str()));
        let request = ApiRequest::get(api_path::MOD_NOTES_BULK)
            .query("subreddits", subreddits)
            .query("users", users);
        let response: BulkNoteResponse = serde_json::from_value(self.client.get(request)?)?;
        if response.mod_notes.len() != chunk.len() {
            warn!(
                "bulk response size differs from request (requested={}, received={})",
                chunk.len(),
                response.mod_notes.len()
            );
        }

        let mut found: HashMap<PairKey, NoteRecord> = HashMap::new();
        for entry in response.mod_notes {
            if let Some(record) = objectify(entry)?.into_note()? {
                found
                    .entry(pair_key(&record.subreddit, &record.user))
                    .or_insert(record);
            }
        }
        let matched = found.len();
        for (subreddit, user) in chunk {
            let note = found
                .get(&pair_key(subreddit.as_str(), user.as_str()))
                .cloned()
                .map(|record| ModNote::new(record, self.client.clone()));
            self.buffer.push_back(note);
        }
        debug!(
            "bulk chunk fetched (offset={}, pairs={}, notes={})",
            start,
            chunk.len(),
            matched
        );
        self.next_chunk = end;
        Ok(())
    }
}

impl Iterator for BulkNotes {
    type Item = Result<Option<ModNote>, ModNotesError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.buffer.pop_front() {
                return Some(Ok(entry));
            }
            if self.failed || self.next_chunk >= self.pairs.len() {
                return None;
            }
            if let Err(err) = self.fetch_chunk() {
                self.failed = true;
                return Some(Err(err));
            }
        }
    }
}

fn join<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(",")
}

fn pair_key(subreddit: &str, user: &str) -> PairKey {
    (subreddit.to_lowercase(), user.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::BulkNotes;
    use crate::client::RedditClient;
    use crate::error::ModNotesError;
    use modnotes_rs_protocol::TransportError;
    use modnotes_rs_test_utils::{FailingTransport, RecordingTransport, bulk_page, note_json};
    use pretty_assertions::assert_eq;
    use serde_json::Value;
    use std::sync::Arc;

    #[test]
    fn mismatched_lengths_are_rejected() {
        let client = RedditClient::new(Arc::new(RecordingTransport::new()));
        let err = BulkNotes::new(client, vec!["a".into(), "b".into()], vec!["x".into()])
            .err()
            .expect("error");
        assert!(matches!(err, ModNotesError::InvalidArguments(_)));
    }

    #[test]
    fn absent_slots_yield_none_in_order() {
        let transport = Arc::new(RecordingTransport::with_responses(vec![bulk_page(vec![
            note_json("n1", "RedditDev", "spez"),
            Value::Null,
            note_json("n3", "test", "bboe"),
        ])]));
        let client = RedditClient::new(transport.clone());
        let bulk = BulkNotes::new(
            client,
            vec!["redditdev".into(), "redditdev".into(), "test".into()],
            vec!["spez".into(), "bboe".into(), "bboe".into()],
        )
        .expect("bulk");
        assert_eq!(bulk.pending_requests(), 1);
        let ids: Vec<Option<String>> = bulk
            .map(|entry| entry.expect("entry").map(|note| note.id.clone()))
            .collect();
        assert_eq!(ids, vec![Some("n1".to_string()), None, Some("n3".to_string())]);

        let request = transport.last_request().expect("request");
        assert_eq!(request.path, "api/mod/notes/recent");
        assert_eq!(request.query_param("subreddits"), Some("redditdev,redditdev,test"));
        assert_eq!(request.query_param("users"), Some("spez,bboe,bboe"));
    }

    #[test]
    fn reordered_response_is_recorrelated() {
        let transport = Arc::new(RecordingTransport::with_responses(vec![bulk_page(vec![
            note_json("second", "test", "bboe"),
            note_json("first", "redditdev", "spez"),
        ])]));
        let client = RedditClient::new(transport);
        let ids: Vec<Option<String>> = BulkNotes::new(
            client,
            vec!["redditdev".into(), "test".into()],
            vec!["spez".into(), "bboe".into()],
        )
        .expect("bulk")
        .map(|entry| entry.expect("entry").map(|note| note.id.clone()))
        .collect();
        assert_eq!(
            ids,
            vec![Some("first".to_string()), Some("second".to_string())]
        );
    }

    #[test]
    fn rejected_chunk_is_transport_error_then_ends() {
        let client = RedditClient::new(Arc::new(FailingTransport::new(403)));
        let mut bulk =
            BulkNotes::new(client, vec!["redditdev".into()], vec!["spez".into()]).expect("bulk");
        let Some(Err(ModNotesError::Transport(TransportError::Status { status, .. }))) = bulk.next()
        else {
            panic!("expected transport status error");
        };
        assert_eq!(status, 403);
        assert!(bulk.next().is_none());
    }

    #[test]
    fn empty_input_makes_no_request() {
        let transport = Arc::new(RecordingTransport::new());
        let client = RedditClient::new(transport.clone());
        let bulk = BulkNotes::new(client, vec![], vec![]).expect("bulk");
        assert_eq!(bulk.count(), 0);
        assert_eq!(transport.request_count(), 0);
    }
}
