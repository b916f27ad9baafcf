//! Test helpers shared across mod notes crates.

pub mod fixtures;
pub mod transport;

pub use fixtures::{
    bulk_page, comment, created, info_listing, listing_page, note_json, submission,
};
pub use transport::{FailingTransport, RecordingTransport};
