//! Query input model and its resolution into (subreddit, user) pairs.

use crate::error::ModNotesError;
use crate::listing::ListingOptions;
use modnotes_rs_protocol::{
    Authored, Comment, Redditor, RedditorRef, Submission, SubredditRef, Thing,
};

/// One input to a notes query.
#[derive(Debug, Clone, PartialEq)]
pub enum NoteItem {
    /// A bare username or user handle.
    Redditor(RedditorRef),
    /// A reddit object; comments and submissions resolve through their author.
    Thing(Thing),
    /// An explicit (subreddit, user) pair.
    Pair(SubredditRef, RedditorRef),
}

impl NoteItem {
    pub fn pair(subreddit: impl Into<SubredditRef>, user: impl Into<RedditorRef>) -> Self {
        NoteItem::Pair(subreddit.into(), user.into())
    }
}

impl From<&str> for NoteItem {
    fn from(value: &str) -> Self {
        NoteItem::Redditor(value.into())
    }
}

impl From<String> for NoteItem {
    fn from(value: String) -> Self {
        NoteItem::Redditor(value.into())
    }
}

impl From<RedditorRef> for NoteItem {
    fn from(value: RedditorRef) -> Self {
        NoteItem::Redditor(value)
    }
}

impl From<Thing> for NoteItem {
    fn from(value: Thing) -> Self {
        NoteItem::Thing(value)
    }
}

impl From<Redditor> for NoteItem {
    fn from(value: Redditor) -> Self {
        NoteItem::Thing(Thing::Redditor(value))
    }
}

impl From<Comment> for NoteItem {
    fn from(value: Comment) -> Self {
        NoteItem::Thing(Thing::Comment(value))
    }
}

impl From<Submission> for NoteItem {
    fn from(value: Submission) -> Self {
        NoteItem::Thing(Thing::Submission(value))
    }
}

impl From<(SubredditRef, RedditorRef)> for NoteItem {
    fn from((subreddit, user): (SubredditRef, RedditorRef)) -> Self {
        NoteItem::Pair(subreddit, user)
    }
}

/// A single item or a collection of items.
#[derive(Debug, Clone, PartialEq)]
pub enum NoteQuery {
    Single(NoteItem),
    Many(Vec<NoteItem>),
}

impl NoteQuery {
    pub fn single(item: impl Into<NoteItem>) -> Self {
        NoteQuery::Single(item.into())
    }

    pub fn many<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<NoteItem>,
    {
        NoteQuery::Many(items.into_iter().map(Into::into).collect())
    }

    /// Whether the query fetches every note when `all_notes` is unset.
    pub fn all_notes_by_default(&self) -> bool {
        matches!(self, NoteQuery::Single(_))
    }
}

impl From<NoteItem> for NoteQuery {
    fn from(value: NoteItem) -> Self {
        NoteQuery::Single(value)
    }
}

impl From<&str> for NoteQuery {
    fn from(value: &str) -> Self {
        NoteQuery::Single(value.into())
    }
}

impl From<Thing> for NoteQuery {
    fn from(value: Thing) -> Self {
        NoteQuery::Single(value.into())
    }
}

impl<T: Into<NoteItem>> From<Vec<T>> for NoteQuery {
    fn from(value: Vec<T>) -> Self {
        NoteQuery::many(value)
    }
}

/// Options for [`crate::ModNotes::query`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOptions {
    /// Every note per pair (`true`) or only the latest (`false`); `None`
    /// picks the default for the query shape.
    pub all_notes: Option<bool>,
    /// Subreddit for bare user identifiers, overriding the bound one.
    pub subreddit: Option<SubredditRef>,
    pub listing: ListingOptions,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all_notes(mut self, all_notes: bool) -> Self {
        self.all_notes = Some(all_notes);
        self
    }

    pub fn subreddit(mut self, subreddit: impl Into<SubredditRef>) -> Self {
        self.subreddit = Some(subreddit.into());
        self
    }

    pub fn listing(mut self, listing: ListingOptions) -> Self {
        self.listing = listing;
        self
    }
}

/// A fully resolved query, ready to fetch.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ResolvedQuery {
    pub pairs: Vec<(SubredditRef, RedditorRef)>,
    pub all_notes: bool,
}

/// Resolve every item up front; fails before any request is made.
pub(crate) fn resolve(
    query: NoteQuery,
    options: &QueryOptions,
    bound: Option<&SubredditRef>,
) -> Result<ResolvedQuery, ModNotesError> {
    let all_notes = options
        .all_notes
        .unwrap_or_else(|| query.all_notes_by_default());
    let subreddit = options.subreddit.as_ref().or(bound);
    let pairs = match query {
        NoteQuery::Single(item) => vec![resolve_item(item, subreddit)?],
        NoteQuery::Many(items) => items
            .into_iter()
            .map(|item| resolve_item(item, subreddit))
            .collect::<Result<_, _>>()?,
    };
    Ok(ResolvedQuery { pairs, all_notes })
}

fn resolve_item(
    item: NoteItem,
    subreddit: Option<&SubredditRef>,
) -> Result<(SubredditRef, RedditorRef), ModNotesError> {
    match item {
        NoteItem::Pair(subreddit, user) => Ok((subreddit, user)),
        NoteItem::Redditor(user) => Ok((require_subreddit(subreddit)?, user)),
        NoteItem::Thing(Thing::Redditor(redditor)) => {
            Ok((require_subreddit(subreddit)?, RedditorRef::from(&redditor)))
        }
        NoteItem::Thing(Thing::Comment(comment)) => authored_pair(&comment),
        NoteItem::Thing(Thing::Submission(submission)) => authored_pair(&submission),
        NoteItem::Thing(thing @ (Thing::Subreddit(_) | Thing::Message(_))) => {
            Err(ModNotesError::UnsupportedItem {
                kind: thing.kind_name().to_string(),
            })
        }
    }
}

fn require_subreddit(subreddit: Option<&SubredditRef>) -> Result<SubredditRef, ModNotesError> {
    subreddit.cloned().ok_or_else(|| {
        ModNotesError::Config(
            "`subreddit` must be provided when querying by redditor".to_string(),
        )
    })
}

/// (subreddit, author) of a comment or submission.
pub(crate) fn authored_pair<T: Authored>(
    thing: &T,
) -> Result<(SubredditRef, RedditorRef), ModNotesError> {
    let author = thing.author().ok_or_else(|| {
        ModNotesError::Config(format!("{} has no author", thing.fullname()))
    })?;
    Ok((thing.subreddit(), author))
}
