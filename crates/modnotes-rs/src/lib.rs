//! Public SDK surface for mod notes.
//!
//! This crate re-exports the core building blocks and provides a small
//! initialization helper to keep consumer setup consistent.

/// Configuration model and layered loading.
pub use modnotes_rs_config as config;
/// Client, listings, bulk lookup, dispatcher and writer.
pub use modnotes_rs_core as core;
/// Wire types and the transport primitive.
pub use modnotes_rs_protocol as protocol;

pub use modnotes_rs_core::{
    DeleteNotes, ModNote, ModNotes, ModNotesError, NewNote, NoteItem, NoteQuery, NoteResults,
    NoteTargetExt, QueryOptions, RedditClient,
};
pub use modnotes_rs_protocol::{NoteLabel, NoteRecord, NoteType};

/// Initialize logging using env_logger if the "logging" feature is enabled.
///
/// This is a no-op if the feature is not enabled. Binaries are still expected
/// to call this early in startup to ensure log output is wired up.
#[inline]
pub fn init_logging() {
    #[cfg(feature = "logging")]
    {
        let _ = env_logger::try_init();
    }
}
