//! Mod note records as returned by the notes endpoints.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label a moderator can attach to a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NoteLabel {
    BotBan,
    PermaBan,
    Ban,
    AbuseWarning,
    SpamWarning,
    SpamWatch,
    SolidContributor,
    HelpfulUser,
}

impl NoteLabel {
    /// Wire name of the label.
    pub fn as_str(&self) -> &'static str {
        match self {
            NoteLabel::BotBan => "BOT_BAN",
            NoteLabel::PermaBan => "PERMA_BAN",
            NoteLabel::Ban => "BAN",
            NoteLabel::AbuseWarning => "ABUSE_WARNING",
            NoteLabel::SpamWarning => "SPAM_WARNING",
            NoteLabel::SpamWatch => "SPAM_WATCH",
            NoteLabel::SolidContributor => "SOLID_CONTRIBUTOR",
            NoteLabel::HelpfulUser => "HELPFUL_USER",
        }
    }
}

impl fmt::Display for NoteLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of entry in a user's note history.
///
/// Plain notes are `Note`; everything else is a moderator action log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NoteType {
    Note,
    Approval,
    Removal,
    Ban,
    Mute,
    Invite,
    Spam,
    ContentChange,
    ModAction,
}

impl NoteType {
    /// Wire name of the type, also accepted as the listing `filter`.
    pub fn as_str(&self) -> &'static str {
        match self {
            NoteType::Note => "NOTE",
            NoteType::Approval => "APPROVAL",
            NoteType::Removal => "REMOVAL",
            NoteType::Ban => "BAN",
            NoteType::Mute => "MUTE",
            NoteType::Invite => "INVITE",
            NoteType::Spam => "SPAM",
            NoteType::ContentChange => "CONTENT_CHANGE",
            NoteType::ModAction => "MOD_ACTION",
        }
    }
}

impl fmt::Display for NoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Note payload exactly as the server sends it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawModNote {
    pub id: String,
    #[serde(rename = "type")]
    pub note_type: NoteType,
    pub created_at: i64,
    pub subreddit: String,
    #[serde(default)]
    pub subreddit_id: Option<String>,
    pub user: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub operator: String,
    #[serde(default)]
    pub operator_id: Option<String>,
    #[serde(default)]
    pub cursor: Option<String>,
    pub user_note_data: UserNoteData,
    pub mod_action_data: ModActionData,
}

/// Moderator-authored part of a note.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserNoteData {
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub label: Option<NoteLabel>,
    #[serde(default)]
    pub reddit_id: Option<String>,
}

/// Action-log part of a note.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ModActionData {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub reddit_id: Option<String>,
}

/// Flattened, immutable view of one mod note or action log entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "RawModNote", into = "RawModNote")]
pub struct NoteRecord {
    /// Stable identifier, unique within the subreddit.
    pub id: String,
    /// Moderator action this entry represents, absent for plain notes.
    pub action: Option<String>,
    /// Creation time as Unix seconds.
    pub created_at: i64,
    /// Action-specific detail.
    pub description: Option<String>,
    /// Extra detail such as a ban duration.
    pub details: Option<String>,
    pub label: Option<NoteLabel>,
    /// Name of the moderator who authored the entry.
    pub moderator: String,
    pub moderator_id: Option<String>,
    /// Note text, at most 250 characters (enforced by the server).
    pub note: Option<String>,
    /// Fullname of the linked post or comment.
    pub reddit_id: Option<String>,
    pub note_type: NoteType,
    pub subreddit: String,
    pub subreddit_id: Option<String>,
    /// Name of the user the entry is about.
    pub user: String,
    pub user_id: Option<String>,
    /// Listing position of the entry, when it came from a listing.
    pub cursor: Option<String>,
}

impl NoteRecord {
    /// Creation time as a UTC timestamp.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.created_at, 0).single()
    }

    /// Whether this entry is a moderator-authored note rather than an action log.
    pub fn is_user_note(&self) -> bool {
        self.note_type == NoteType::Note
    }
}

impl From<RawModNote> for NoteRecord {
    fn from(raw: RawModNote) -> Self {
        let reddit_id = raw
            .user_note_data
            .reddit_id
            .or(raw.mod_action_data.reddit_id);
        Self {
            id: raw.id,
            action: raw.mod_action_data.action,
            created_at: raw.created_at,
            description: raw.mod_action_data.description,
            details: raw.mod_action_data.details,
            label: raw.user_note_data.label,
            moderator: raw.operator,
            moderator_id: raw.operator_id,
            note: raw.user_note_data.note,
            reddit_id,
            note_type: raw.note_type,
            subreddit: raw.subreddit,
            subreddit_id: raw.subreddit_id,
            user: raw.user,
            user_id: raw.user_id,
            cursor: raw.cursor,
        }
    }
}

impl From<NoteRecord> for RawModNote {
    fn from(record: NoteRecord) -> Self {
        let (note_reddit_id, action_reddit_id) = if record.is_user_note() {
            (record.reddit_id, None)
        } else {
            (None, record.reddit_id)
        };
        Self {
            id: record.id,
            note_type: record.note_type,
            created_at: record.created_at,
            subreddit: record.subreddit,
            subreddit_id: record.subreddit_id,
            user: record.user,
            user_id: record.user_id,
            operator: record.moderator,
            operator_id: record.moderator_id,
            cursor: record.cursor,
            user_note_data: UserNoteData {
                note: record.note,
                label: record.label,
                reddit_id: note_reddit_id,
            },
            mod_action_data: ModActionData {
                action: record.action,
                description: record.description,
                details: record.details,
                reddit_id: action_reddit_id,
            },
        }
    }
}

impl fmt::Display for NoteRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}
