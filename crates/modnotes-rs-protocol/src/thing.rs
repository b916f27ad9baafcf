//! Reddit "things" and the lightweight name references used to address them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Author placeholder the server uses once an account is deleted.
const DELETED_AUTHOR: &str = "[deleted]";

/// Subreddit addressed by display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubredditRef(String);

impl SubredditRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubredditRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SubredditRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SubredditRef {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&Subreddit> for SubredditRef {
    fn from(value: &Subreddit) -> Self {
        Self::new(value.display_name.clone())
    }
}

/// Redditor addressed by username.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RedditorRef(String);

impl RedditorRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RedditorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RedditorRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RedditorRef {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&Redditor> for RedditorRef {
    fn from(value: &Redditor) -> Self {
        Self::new(value.name.clone())
    }
}

/// Comment payload (`t1`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    /// Fullname, e.g. `t1_abc123`.
    pub name: String,
    #[serde(default)]
    pub author: Option<String>,
    pub subreddit: String,
    #[serde(default)]
    pub link_id: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

/// Submission payload (`t3`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: String,
    /// Fullname, e.g. `t3_abc123`.
    pub name: String,
    #[serde(default)]
    pub author: Option<String>,
    pub subreddit: String,
    #[serde(default)]
    pub title: Option<String>,
}

/// Account payload (`t2`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Redditor {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

/// Private message payload (`t4`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub subreddit: Option<String>,
}

/// Subreddit payload (`t5`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subreddit {
    #[serde(default)]
    pub id: Option<String>,
    /// Fullname, e.g. `t5_2qizd`.
    #[serde(default)]
    pub name: Option<String>,
    pub display_name: String,
}

/// Any object the server wraps in a `{"kind": .., "data": ..}` envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data")]
pub enum Thing {
    #[serde(rename = "t1")]
    Comment(Comment),
    #[serde(rename = "t2")]
    Redditor(Redditor),
    #[serde(rename = "t3")]
    Submission(Submission),
    #[serde(rename = "t4")]
    Message(Message),
    #[serde(rename = "t5")]
    Subreddit(Subreddit),
}

impl Thing {
    /// Human-readable kind, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Thing::Comment(_) => "Comment",
            Thing::Redditor(_) => "Redditor",
            Thing::Submission(_) => "Submission",
            Thing::Message(_) => "Message",
            Thing::Subreddit(_) => "Subreddit",
        }
    }

    /// Fullname of the thing when the payload carries one.
    pub fn fullname(&self) -> Option<&str> {
        match self {
            Thing::Comment(comment) => Some(&comment.name),
            Thing::Submission(submission) => Some(&submission.name),
            Thing::Message(message) => Some(&message.name),
            Thing::Redditor(redditor) => redditor.id.as_deref(),
            Thing::Subreddit(subreddit) => subreddit.name.as_deref(),
        }
    }
}

/// Posted content that belongs to a subreddit and has an author.
pub trait Authored {
    fn fullname(&self) -> &str;
    fn subreddit_name(&self) -> &str;
    fn raw_author(&self) -> Option<&str>;

    /// Author name, `None` when the account is deleted.
    fn author(&self) -> Option<RedditorRef> {
        self.raw_author()
            .filter(|name| !name.is_empty() && *name != DELETED_AUTHOR)
            .map(RedditorRef::from)
    }

    fn subreddit(&self) -> SubredditRef {
        SubredditRef::from(self.subreddit_name())
    }
}

impl Authored for Comment {
    fn fullname(&self) -> &str {
        &self.name
    }

    fn subreddit_name(&self) -> &str {
        &self.subreddit
    }

    fn raw_author(&self) -> Option<&str> {
        self.author.as_deref()
    }
}

impl Authored for Submission {
    fn fullname(&self) -> &str {
        &self.name
    }

    fn subreddit_name(&self) -> &str {
        &self.subreddit
    }

    fn raw_author(&self) -> Option<&str> {
        self.author.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::{Authored, RedditorRef, Thing};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn decodes_submission_envelope() {
        let thing: Thing = serde_json::from_value(json!({
            "kind": "t3",
            "data": {
                "id": "uflrmv",
                "name": "t3_uflrmv",
                "author": "spez",
                "subreddit": "redditdev",
                "title": "hello"
            }
        }))
        .expect("thing");
        let Thing::Submission(submission) = &thing else {
            panic!("expected submission");
        };
        assert_eq!(submission.author(), Some(RedditorRef::from("spez")));
        assert_eq!(submission.subreddit().as_str(), "redditdev");
        assert_eq!(thing.kind_name(), "Submission");
        assert_eq!(thing.fullname(), Some("t3_uflrmv"));
    }

    #[test]
    fn deleted_author_is_absent() {
        let thing: Thing = serde_json::from_value(json!({
            "kind": "t1",
            "data": {
                "id": "abc",
                "name": "t1_abc",
                "author": "[deleted]",
                "subreddit": "redditdev"
            }
        }))
        .expect("thing");
        let Thing::Comment(comment) = thing else {
            panic!("expected comment");
        };
        assert_eq!(comment.author(), None);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let result = serde_json::from_value::<Thing>(json!({ "kind": "more", "data": {} }));
        assert!(result.is_err());
    }
}
