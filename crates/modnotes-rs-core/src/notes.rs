//! Entry point for reading mod notes.

use crate::bulk::BulkNotes;
use crate::client::RedditClient;
use crate::error::ModNotesError;
use crate::listing::{ListingGenerator, ListingOptions};
use crate::note::ModNote;
use crate::query::{self, NoteQuery, QueryOptions};
use log::debug;
use modnotes_rs_protocol::{RedditorRef, SubredditRef};
use std::collections::VecDeque;

/// Mod notes accessor, optionally bound to a default subreddit.
///
/// The bound subreddit is fixed at construction and only consulted when a
/// call names no subreddit of its own.
#[derive(Debug, Clone)]
pub struct ModNotes {
    client: RedditClient,
    subreddit: Option<SubredditRef>,
}

impl ModNotes {
    pub fn new(client: RedditClient, subreddit: Option<SubredditRef>) -> Self {
        Self { client, subreddit }
    }

    /// The bound subreddit, if any.
    pub fn subreddit(&self) -> Option<&SubredditRef> {
        self.subreddit.as_ref()
    }

    pub fn client(&self) -> &RedditClient {
        &self.client
    }

    /// Fetch notes for the given query.
    ///
    /// Every item is resolved before any request is issued, so invalid input
    /// fails without network traffic. Single items default to every note for
    /// the pair; collections default to the latest note per pair.
    pub fn query(
        &self,
        query: impl Into<NoteQuery>,
        options: QueryOptions,
    ) -> Result<NoteResults, ModNotesError> {
        let resolved = query::resolve(query.into(), &options, self.subreddit.as_ref())?;
        debug!(
            "note query resolved (pairs={}, all_notes={})",
            resolved.pairs.len(),
            resolved.all_notes
        );
        if resolved.all_notes {
            Ok(NoteResults::All(AllNotes::new(
                self.client.clone(),
                resolved.pairs,
                options.listing,
            )))
        } else {
            Ok(NoteResults::Latest(BulkNotes::from_pairs(
                self.client.clone(),
                resolved.pairs,
            )))
        }
    }

    /// Notes for several redditors in the explicit or bound subreddit.
    pub fn redditors<I, T>(
        &self,
        redditors: I,
        options: QueryOptions,
    ) -> Result<NoteResults, ModNotesError>
    where
        I: IntoIterator<Item = T>,
        T: Into<RedditorRef>,
    {
        let items = redditors
            .into_iter()
            .map(|redditor| query::NoteItem::Redditor(redditor.into()));
        self.query(NoteQuery::many(items), options)
    }

    /// Notes for one redditor across several subreddits.
    pub fn subreddits<I, T>(
        &self,
        subreddits: I,
        redditor: impl Into<RedditorRef>,
        options: QueryOptions,
    ) -> Result<NoteResults, ModNotesError>
    where
        I: IntoIterator<Item = T>,
        T: Into<SubredditRef>,
    {
        let redditor = redditor.into();
        let items = subreddits
            .into_iter()
            .map(|subreddit| query::NoteItem::Pair(subreddit.into(), redditor.clone()));
        self.query(NoteQuery::many(items), options)
    }

    /// Latest note for each `subreddits[i]`/`users[i]` pair.
    pub fn bulk(
        &self,
        subreddits: Vec<SubredditRef>,
        users: Vec<RedditorRef>,
    ) -> Result<BulkNotes, ModNotesError> {
        BulkNotes::new(self.client.clone(), subreddits, users)
    }

    /// Every note for one user in one subreddit.
    pub fn listing(
        &self,
        subreddit: impl Into<SubredditRef>,
        user: impl Into<RedditorRef>,
        options: ListingOptions,
    ) -> ListingGenerator {
        ListingGenerator::new(self.client.clone(), subreddit.into(), user.into(), options)
    }
}

/// Outcome of [`ModNotes::query`].
pub enum NoteResults {
    /// Every note, pair after pair.
    All(AllNotes),
    /// Latest note per pair; `None` where a pair has none.
    Latest(BulkNotes),
}

impl NoteResults {
    pub fn is_latest(&self) -> bool {
        matches!(self, NoteResults::Latest(_))
    }

    /// Drop absence markers and yield only notes.
    pub fn notes(self) -> impl Iterator<Item = Result<ModNote, ModNotesError>> {
        self.filter_map(Result::transpose)
    }
}

impl Iterator for NoteResults {
    type Item = Result<Option<ModNote>, ModNotesError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            NoteResults::All(notes) => notes.next().map(|note| note.map(Some)),
            NoteResults::Latest(notes) => notes.next(),
        }
    }
}

/// Every note for a sequence of pairs, one listing after another.
///
/// A pair's listing starts only once the previous pair's is drained. An error
/// ends the whole sequence.
pub struct AllNotes {
    client: RedditClient,
    pairs: VecDeque<(SubredditRef, RedditorRef)>,
    options: ListingOptions,
    current: Option<ListingGenerator>,
    failed: bool,
}

impl AllNotes {
    pub fn new(
        client: RedditClient,
        pairs: Vec<(SubredditRef, RedditorRef)>,
        options: ListingOptions,
    ) -> Self {
        Self {
            client,
            pairs: pairs.into(),
            options,
            current: None,
            failed: false,
        }
    }
}

impl Iterator for AllNotes {
    type Item = Result<ModNote, ModNotesError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.failed {
                return None;
            }
            if let Some(listing) = self.current.as_mut() {
                match listing.next() {
                    Some(Err(err)) => {
                        self.failed = true;
                        return Some(Err(err));
                    }
                    Some(note) => return Some(note),
                    None => self.current = None,
                }
            }
            let (subreddit, user) = self.pairs.pop_front()?;
            self.current = Some(ListingGenerator::new(
                self.client.clone(),
                subreddit,
                user,
                self.options.clone(),
            ));
        }
    }
}
