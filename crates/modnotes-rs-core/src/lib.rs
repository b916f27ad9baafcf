//! Mod notes client: reading, bulk lookup, creation and deletion.
//!
//! All calls are blocking and go through a [`RedditClient`], which wraps a
//! [`modnotes_rs_protocol::Transport`]. Listings and bulk lookups are lazy
//! iterators that issue a request only when their buffered results run out.

mod bulk;
mod client;
pub mod error;
mod ext;
mod http;
mod listing;
mod note;
mod notes;
mod query;
mod writer;

pub use bulk::BulkNotes;
pub use client::RedditClient;
pub use error::ModNotesError;
pub use ext::NoteTargetExt;
pub use http::HttpTransport;
pub use listing::{ListingDefaults, ListingGenerator, ListingLimit, ListingOptions};
pub use note::ModNote;
pub use notes::{AllNotes, ModNotes, NoteResults};
pub use query::{NoteItem, NoteQuery, QueryOptions};
pub use writer::{DeleteNotes, NewNote, NoteThing};
