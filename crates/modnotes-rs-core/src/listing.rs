//! Paginated listing of one user's notes in one subreddit.

use crate::client::RedditClient;
use crate::error::ModNotesError;
use crate::note::ModNote;
use log::debug;
use modnotes_rs_protocol::{
    ApiRequest, MAX_PAGE_SIZE, NotePage, NoteType, RedditorRef, SubredditRef, api_path,
    objectify,
};
use std::collections::VecDeque;

/// Parameters the listing sets itself; passthrough params cannot override them.
const MANAGED_PARAMS: &[&str] = &["subreddit", "user", "limit", "filter", "before"];

/// Cap on the total number of notes a listing yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListingLimit {
    /// Use the client's configured limit.
    #[default]
    ClientDefault,
    Max(usize),
    Unbounded,
}

/// Per-call listing settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingOptions {
    pub limit: ListingLimit,
    /// Restrict the listing to one note type.
    pub filter: Option<NoteType>,
    /// Extra query parameters sent with every page request.
    pub params: Vec<(String, String)>,
}

impl ListingOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = ListingLimit::Max(limit);
        self
    }

    pub fn unbounded(mut self) -> Self {
        self.limit = ListingLimit::Unbounded;
        self
    }

    pub fn filter(mut self, filter: NoteType) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }
}

/// Client-wide listing defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingDefaults {
    /// Total notes yielded when a call sets no limit; `None` means no cap.
    pub limit: Option<usize>,
    pub page_size: usize,
}

/// Lazy iterator over one (subreddit, user) pair's notes, newest first.
///
/// A page is requested only once the previous one is drained. After an error
/// the iterator is exhausted.
pub struct ListingGenerator {
    client: RedditClient,
    subreddit: SubredditRef,
    user: RedditorRef,
    filter: Option<NoteType>,
    params: Vec<(String, String)>,
    limit: Option<usize>,
    page_size: usize,
    buffer: VecDeque<ModNote>,
    cursor: Option<String>,
    yielded: usize,
    started: bool,
    exhausted: bool,
}

impl ListingGenerator {
    pub fn new(
        client: RedditClient,
        subreddit: SubredditRef,
        user: RedditorRef,
        options: ListingOptions,
    ) -> Self {
        let defaults = client.listing_defaults();
        let limit = match options.limit {
            ListingLimit::ClientDefault => defaults.limit,
            ListingLimit::Max(limit) => Some(limit),
            ListingLimit::Unbounded => None,
        };
        Self {
            client,
            subreddit,
            user,
            filter: options.filter,
            params: options.params,
            limit,
            page_size: defaults.page_size.clamp(1, MAX_PAGE_SIZE),
            buffer: VecDeque::new(),
            cursor: None,
            yielded: 0,
            started: false,
            exhausted: false,
        }
    }

    pub fn subreddit(&self) -> &SubredditRef {
        &self.subreddit
    }

    pub fn user(&self) -> &RedditorRef {
        &self.user
    }

    fn remaining(&self) -> Option<usize> {
        self.limit.map(|limit| limit.saturating_sub(self.yielded))
    }

    fn page_request(&self) -> ApiRequest {
        let page_limit = match self.remaining() {
            Some(remaining) => remaining.min(self.page_size),
            None => self.page_size,
        };
        let mut request = ApiRequest::get(api_path::MOD_NOTES)
            .query("subreddit", self.subreddit.as_str())
            .query("user", self.user.as_str())
            .query("limit", page_limit.to_string());
        if let Some(filter) = self.filter {
            request = request.query("filter", filter.as_str());
        }
        if let Some(cursor) = &self.cursor {
            request = request.query("before", cursor.as_str());
        }
        for (key, value) in &self.params {
            if MANAGED_PARAMS.contains(&key.as_str()) {
                debug!("ignoring managed listing param (key={})", key);
                continue;
            }
            request = request.query(key.as_str(), value.as_str());
        }
        request
    }

    fn fetch_page(&mut self) -> Result<(), ModNotesError> {
        let response = self.client.get(self.page_request())?;
        let page: NotePage = serde_json::from_value(response)?;
        self.started = true;

        for entry in page.mod_notes.iter().cloned() {
            if let Some(record) = objectify(entry)?.into_note()? {
                self.buffer
                    .push_back(ModNote::new(record, self.client.clone()));
            }
        }
        // An empty page cannot advance the cursor.
        self.cursor = if self.buffer.is_empty() {
            None
        } else {
            page.next_cursor().map(str::to_owned)
        };
        debug!(
            "listing page fetched (subreddit={}, user={}, notes={}, has_next={})",
            self.subreddit,
            self.user,
            self.buffer.len(),
            self.cursor.is_some()
        );
        Ok(())
    }
}

impl Iterator for ListingGenerator {
    type Item = Result<ModNote, ModNotesError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.exhausted || self.remaining() == Some(0) {
                return None;
            }
            if let Some(note) = self.buffer.pop_front() {
                self.yielded += 1;
                return Some(Ok(note));
            }
            if self.started && self.cursor.is_none() {
                self.exhausted = true;
                return None;
            }
            if let Err(err) = self.fetch_page() {
                self.exhausted = true;
                return Some(Err(err));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ListingGenerator, ListingOptions};
    use crate::client::RedditClient;
    use modnotes_rs_config::NotesConfig;
    use modnotes_rs_protocol::{NoteType, TransportError};
    use modnotes_rs_test_utils::{RecordingTransport, listing_page, note_json};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn generator(
        transport: Arc<RecordingTransport>,
        config: NotesConfig,
        options: ListingOptions,
    ) -> ListingGenerator {
        let client = RedditClient::with_notes_config(transport, &config);
        ListingGenerator::new(client, "redditdev".into(), "spez".into(), options)
    }

    #[test]
    fn follows_cursor_until_last_page() {
        let transport = Arc::new(RecordingTransport::with_responses(vec![
            listing_page(
                vec![note_json("n1", "redditdev", "spez"), note_json("n2", "redditdev", "spez")],
                Some("cursor-n2"),
                true,
            ),
            listing_page(vec![note_json("n3", "redditdev", "spez")], Some("cursor-n3"), false),
        ]));
        let ids: Vec<String> = generator(transport.clone(), NotesConfig::default(), ListingOptions::new())
            .map(|note| note.expect("note").id.clone())
            .collect();
        assert_eq!(ids, vec!["n1", "n2", "n3"]);

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].query_param("before"), None);
        assert_eq!(requests[0].query_param("limit"), Some("100"));
        assert_eq!(requests[1].query_param("before"), Some("cursor-n2"));
    }

    #[test]
    fn no_request_until_first_pull() {
        let transport = Arc::new(RecordingTransport::new());
        let _listing = generator(transport.clone(), NotesConfig::default(), ListingOptions::new());
        assert_eq!(transport.request_count(), 0);
    }

    #[test]
    fn limit_caps_total_and_page_request() {
        let config = NotesConfig {
            page_size: 2,
            ..NotesConfig::default()
        };
        let transport = Arc::new(RecordingTransport::with_responses(vec![
            listing_page(
                vec![note_json("n1", "redditdev", "spez"), note_json("n2", "redditdev", "spez")],
                Some("cursor-n2"),
                true,
            ),
            listing_page(vec![note_json("n3", "redditdev", "spez")], Some("cursor-n3"), true),
        ]));
        let notes: Vec<_> = generator(transport.clone(), config, ListingOptions::new().limit(3))
            .collect::<Result<_, _>>()
            .expect("notes");
        assert_eq!(notes.len(), 3);
        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].query_param("limit"), Some("2"));
        assert_eq!(requests[1].query_param("limit"), Some("1"));
    }

    #[test]
    fn oversized_page_size_is_clamped() {
        let config = NotesConfig {
            page_size: 500,
            listing_limit: None,
            ..NotesConfig::default()
        };
        let transport = Arc::new(RecordingTransport::with_responses(vec![listing_page(
            vec![],
            None,
            false,
        )]));
        assert_eq!(generator(transport.clone(), config, ListingOptions::new()).count(), 0);
        assert_eq!(
            transport.last_request().expect("request").query_param("limit"),
            Some("100")
        );
    }

    #[test]
    fn filter_and_passthrough_params_are_sent() {
        let transport = Arc::new(RecordingTransport::with_responses(vec![listing_page(
            vec![],
            None,
            false,
        )]));
        let options = ListingOptions::new()
            .filter(NoteType::Ban)
            .param("user", "someone_else")
            .param("extra", "1");
        assert_eq!(generator(transport.clone(), NotesConfig::default(), options).count(), 0);
        let request = transport.last_request().expect("request");
        assert_eq!(request.query_param("filter"), Some("BAN"));
        assert_eq!(request.query_param("user"), Some("spez"));
        assert_eq!(request.query_param("extra"), Some("1"));
    }

    #[test]
    fn error_ends_the_listing() {
        let transport = Arc::new(RecordingTransport::new());
        transport.push_error(TransportError::Status {
            status: 403,
            body: "forbidden".to_string(),
        });
        let mut listing = generator(transport.clone(), NotesConfig::default(), ListingOptions::new());
        assert!(matches!(listing.next(), Some(Err(_))));
        assert!(listing.next().is_none());
        assert_eq!(transport.request_count(), 1);
    }
}
