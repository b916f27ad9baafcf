//! Creating and deleting notes.

use crate::error::ModNotesError;
use crate::listing::ListingOptions;
use crate::note::{ModNote, delete_request};
use crate::notes::{AllNotes, ModNotes};
use crate::query::authored_pair;
use log::{info, warn};
use modnotes_rs_protocol::{
    ApiRequest, Comment, NoteLabel, RedditorRef, Submission, SubredditRef, Thing, api_path,
    objectify,
};

/// The object a new note is attached to.
#[derive(Debug, Clone, PartialEq)]
pub enum NoteThing {
    /// Fullname such as `t3_abc123`; fetched only if its details are needed.
    Fullname(String),
    Submission(Submission),
    Comment(Comment),
}

impl NoteThing {
    pub fn fullname(&self) -> &str {
        match self {
            NoteThing::Fullname(fullname) => fullname,
            NoteThing::Submission(submission) => &submission.name,
            NoteThing::Comment(comment) => &comment.name,
        }
    }
}

impl From<&str> for NoteThing {
    fn from(value: &str) -> Self {
        NoteThing::Fullname(value.to_string())
    }
}

impl From<String> for NoteThing {
    fn from(value: String) -> Self {
        NoteThing::Fullname(value)
    }
}

impl From<Submission> for NoteThing {
    fn from(value: Submission) -> Self {
        NoteThing::Submission(value)
    }
}

impl From<Comment> for NoteThing {
    fn from(value: Comment) -> Self {
        NoteThing::Comment(value)
    }
}

/// A note to create.
#[derive(Debug, Clone, PartialEq)]
pub struct NewNote {
    pub note: String,
    pub redditor: Option<RedditorRef>,
    pub label: Option<NoteLabel>,
    pub subreddit: Option<SubredditRef>,
    pub thing: Option<NoteThing>,
    /// Additional form fields; these replace same-named fields.
    pub extra: Vec<(String, String)>,
}

impl NewNote {
    pub fn new(note: impl Into<String>) -> Self {
        Self {
            note: note.into(),
            redditor: None,
            label: None,
            subreddit: None,
            thing: None,
            extra: Vec::new(),
        }
    }

    pub fn redditor(mut self, redditor: impl Into<RedditorRef>) -> Self {
        self.redditor = Some(redditor.into());
        self
    }

    pub fn label(mut self, label: NoteLabel) -> Self {
        self.label = Some(label);
        self
    }

    pub fn subreddit(mut self, subreddit: impl Into<SubredditRef>) -> Self {
        self.subreddit = Some(subreddit.into());
        self
    }

    pub fn thing(mut self, thing: impl Into<NoteThing>) -> Self {
        self.thing = Some(thing.into());
        self
    }

    pub fn extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push((key.into(), value.into()));
        self
    }
}

/// Which notes to delete.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteNotes {
    pub redditor: Option<RedditorRef>,
    pub note_id: Option<String>,
    /// Delete every note of `redditor` instead of a single one.
    pub delete_all: bool,
    pub subreddit: Option<SubredditRef>,
}

impl DeleteNotes {
    /// Delete one note by id.
    pub fn note(redditor: impl Into<RedditorRef>, note_id: impl Into<String>) -> Self {
        Self {
            redditor: Some(redditor.into()),
            note_id: Some(note_id.into()),
            ..Self::default()
        }
    }

    /// Delete every note on a redditor.
    pub fn all(redditor: impl Into<RedditorRef>) -> Self {
        Self {
            redditor: Some(redditor.into()),
            delete_all: true,
            ..Self::default()
        }
    }

    pub fn in_subreddit(mut self, subreddit: impl Into<SubredditRef>) -> Self {
        self.subreddit = Some(subreddit.into());
        self
    }
}

/// Subreddit and author known from the attached thing.
#[derive(Debug, Default)]
struct ThingContext {
    fullname: Option<String>,
    subreddit: Option<SubredditRef>,
    author: Option<RedditorRef>,
}

impl ThingContext {
    fn from_authored(fullname: &str, pair: (SubredditRef, RedditorRef)) -> Self {
        Self {
            fullname: Some(fullname.to_string()),
            subreddit: Some(pair.0),
            author: Some(pair.1),
        }
    }
}

impl ModNotes {
    /// Create a note and return it.
    ///
    /// The subreddit comes from the note, then the attached thing, then the
    /// bound subreddit; the redditor from the note, then the thing's author.
    pub fn create(&self, new: NewNote) -> Result<ModNote, ModNotesError> {
        let needs_details = new.subreddit.is_none() || new.redditor.is_none();
        let context = match &new.thing {
            None => ThingContext::default(),
            Some(NoteThing::Fullname(fullname)) if !needs_details => ThingContext {
                fullname: Some(fullname.clone()),
                ..ThingContext::default()
            },
            Some(NoteThing::Fullname(fullname)) => self.lookup_thing(fullname)?,
            Some(NoteThing::Submission(submission)) => {
                ThingContext::from_authored(&submission.name, authored_pair(submission)?)
            }
            Some(NoteThing::Comment(comment)) => {
                ThingContext::from_authored(&comment.name, authored_pair(comment)?)
            }
        };

        let subreddit = new
            .subreddit
            .or(context.subreddit)
            .or_else(|| self.subreddit().cloned())
            .ok_or_else(|| {
                ModNotesError::Config("either `subreddit` or `thing` must be provided".to_string())
            })?;
        let redditor = new.redditor.or(context.author).ok_or_else(|| {
            ModNotesError::Config("either `redditor` or `thing` must be provided".to_string())
        })?;

        let mut request = ApiRequest::post(api_path::MOD_NOTES)
            .form("user", redditor.as_str())
            .form("subreddit", subreddit.as_str())
            .form("note", new.note);
        if let Some(label) = new.label {
            request = request.form("label", label.as_str());
        }
        if let Some(fullname) = context.fullname {
            request = request.form("thing", fullname);
        }
        for (key, value) in new.extra {
            request = request.form(key, value);
        }

        let response = self.client().post(request)?;
        let record = objectify(response)?.into_note()?.ok_or_else(|| {
            ModNotesError::InvalidResponse("creation response carried no note".to_string())
        })?;
        info!(
            "mod note created (subreddit={}, user={}, id={})",
            record.subreddit, record.user, record.id
        );
        Ok(ModNote::new(record, self.client().clone()))
    }

    fn lookup_thing(&self, fullname: &str) -> Result<ThingContext, ModNotesError> {
        match self.client().info(fullname)? {
            Thing::Submission(submission) => Ok(ThingContext::from_authored(
                &submission.name,
                authored_pair(&submission)?,
            )),
            Thing::Comment(comment) => Ok(ThingContext::from_authored(
                &comment.name,
                authored_pair(&comment)?,
            )),
            other => Err(ModNotesError::UnsupportedItem {
                kind: other.kind_name().to_string(),
            }),
        }
    }

    /// Delete one note, or every note on a redditor; returns how many were deleted.
    pub fn delete(&self, request: DeleteNotes) -> Result<usize, ModNotesError> {
        let DeleteNotes {
            redditor,
            note_id,
            delete_all,
            subreddit,
        } = request;

        if delete_all {
            let redditor = redditor.ok_or_else(|| {
                ModNotesError::InvalidArguments(
                    "`redditor` must be provided with `delete_all`".to_string(),
                )
            })?;
            let subreddit = self.delete_subreddit(subreddit)?;
            return self.delete_every_note(subreddit, redditor);
        }

        let (Some(redditor), Some(note_id)) = (redditor, note_id) else {
            return Err(ModNotesError::InvalidArguments(
                "either `redditor` and `note_id`, or `redditor` and `delete_all` must be provided"
                    .to_string(),
            ));
        };
        let subreddit = self.delete_subreddit(subreddit)?;
        self.client()
            .delete(delete_request(subreddit.as_str(), redditor.as_str(), &note_id))?;
        info!(
            "mod note deleted (subreddit={}, user={}, id={})",
            subreddit, redditor, note_id
        );
        Ok(1)
    }

    /// Delete a previously fetched note.
    pub fn delete_note(&self, note: ModNote) -> Result<(), ModNotesError> {
        note.delete()
    }

    fn delete_subreddit(
        &self,
        subreddit: Option<SubredditRef>,
    ) -> Result<SubredditRef, ModNotesError> {
        subreddit
            .or_else(|| self.subreddit().cloned())
            .ok_or_else(|| ModNotesError::Config("`subreddit` must be provided".to_string()))
    }

    fn delete_every_note(
        &self,
        subreddit: SubredditRef,
        redditor: RedditorRef,
    ) -> Result<usize, ModNotesError> {
        let notes = AllNotes::new(
            self.client().clone(),
            vec![(subreddit.clone(), redditor.clone())],
            ListingOptions::new().unbounded(),
        );
        let mut deleted = 0;
        for note in notes {
            if let Err(err) = note.and_then(ModNote::delete) {
                warn!(
                    "deleting all notes stopped early (subreddit={}, user={}, deleted={})",
                    subreddit, redditor, deleted
                );
                return Err(err);
            }
            deleted += 1;
        }
        info!(
            "all mod notes deleted (subreddit={}, user={}, deleted={})",
            subreddit, redditor, deleted
        );
        Ok(deleted)
    }
}
