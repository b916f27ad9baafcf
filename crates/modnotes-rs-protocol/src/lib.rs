//! Wire protocol types for mod notes: records, reddit things, payload
//! decoding, and the request primitive the client is built on.

mod note;
mod objector;
mod thing;
mod transport;

pub use note::{ModActionData, NoteLabel, NoteRecord, NoteType, RawModNote, UserNoteData};
pub use objector::{BulkNoteResponse, NotePage, Objectified, ProtocolError, objectify};
pub use thing::{
    Authored, Comment, Message, Redditor, RedditorRef, Submission, Subreddit, SubredditRef, Thing,
};
pub use transport::{ApiRequest, Method, Transport, TransportError};

/// Endpoint paths, relative to the API base URL.
pub mod api_path {
    /// Notes listing (GET), creation (POST) and deletion (DELETE).
    pub const MOD_NOTES: &str = "api/mod/notes";
    /// Latest note per (subreddit, user) pair.
    pub const MOD_NOTES_BULK: &str = "api/mod/notes/recent";
    /// Lookup of things by fullname.
    pub const INFO: &str = "api/info";
}

/// Maximum pairs accepted by one bulk lookup request.
pub const BULK_CHUNK_SIZE: usize = 500;
/// Maximum notes the listing endpoint returns per page.
pub const MAX_PAGE_SIZE: usize = 100;
