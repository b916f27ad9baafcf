//! Shared client handle every note operation goes through.

use crate::error::ModNotesError;
use crate::http::HttpTransport;
use crate::listing::ListingDefaults;
use crate::notes::ModNotes;
use log::debug;
use modnotes_rs_config::{ModNotesConfig, NotesConfig};
use modnotes_rs_protocol::{ApiRequest, Objectified, SubredditRef, Thing, Transport, api_path, objectify};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Cheaply cloneable client: a transport plus listing defaults.
#[derive(Clone)]
pub struct RedditClient {
    transport: Arc<dyn Transport>,
    defaults: ListingDefaults,
    subreddit: Option<SubredditRef>,
}

impl RedditClient {
    /// Client with default listing settings and no bound subreddit.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_notes_config(transport, &NotesConfig::default())
    }

    /// Client over the given transport, taking defaults from `config`.
    pub fn with_notes_config(transport: Arc<dyn Transport>, config: &NotesConfig) -> Self {
        Self {
            transport,
            defaults: ListingDefaults {
                limit: config.listing_limit,
                page_size: config.page_size,
            },
            subreddit: config.subreddit.clone().map(SubredditRef::from),
        }
    }

    /// Client talking HTTP as described by `config`.
    pub fn from_config(config: &ModNotesConfig) -> Result<Self, ModNotesError> {
        config
            .validate()
            .map_err(|err| ModNotesError::Config(err.to_string()))?;
        let transport = HttpTransport::new(&config.api)?;
        Ok(Self::with_notes_config(Arc::new(transport), &config.notes))
    }

    pub fn listing_defaults(&self) -> ListingDefaults {
        self.defaults
    }

    /// Notes handle bound to the configured subreddit, if any.
    pub fn mod_notes(&self) -> ModNotes {
        ModNotes::new(self.clone(), self.subreddit.clone())
    }

    /// Notes handle bound to `subreddit`.
    pub fn subreddit_notes(&self, subreddit: impl Into<SubredditRef>) -> ModNotes {
        ModNotes::new(self.clone(), Some(subreddit.into()))
    }

    /// Send a request and return the decoded body.
    pub fn send(&self, request: ApiRequest) -> Result<Value, ModNotesError> {
        debug!(
            "api request (method={}, path={}, params={})",
            request.method,
            request.path,
            request.query.len() + request.form.len()
        );
        Ok(self.transport.send(&request)?)
    }

    pub fn get(&self, request: ApiRequest) -> Result<Value, ModNotesError> {
        self.send(request)
    }

    pub fn post(&self, request: ApiRequest) -> Result<Value, ModNotesError> {
        self.send(request)
    }

    pub fn delete(&self, request: ApiRequest) -> Result<Value, ModNotesError> {
        self.send(request)
    }

    /// Look up a single thing by fullname.
    pub fn info(&self, fullname: &str) -> Result<Thing, ModNotesError> {
        let response = self.send(ApiRequest::get(api_path::INFO).query("id", fullname))?;
        match objectify(response)? {
            Objectified::Listing(children) => children.into_iter().next().ok_or_else(|| {
                ModNotesError::InvalidResponse(format!("no thing found for {fullname}"))
            }),
            Objectified::Thing(thing) => Ok(*thing),
            _ => Err(ModNotesError::InvalidResponse(format!(
                "unexpected info response for {fullname}"
            ))),
        }
    }
}

impl fmt::Debug for RedditClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedditClient")
            .field("defaults", &self.defaults)
            .field("subreddit", &self.subreddit)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::RedditClient;
    use modnotes_rs_config::NotesConfig;
    use modnotes_rs_protocol::Thing;
    use modnotes_rs_test_utils::{RecordingTransport, info_listing};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn info_returns_first_child() {
        let transport = Arc::new(RecordingTransport::with_responses(vec![info_listing(vec![
            json!({
                "kind": "t3",
                "data": { "id": "abc", "name": "t3_abc", "author": "spez", "subreddit": "redditdev" }
            }),
        ])]));
        let client = RedditClient::new(transport.clone());
        let thing = client.info("t3_abc").expect("info");
        let Thing::Submission(submission) = thing else {
            panic!("expected submission");
        };
        assert_eq!(submission.subreddit, "redditdev");
        let request = transport.last_request().expect("request");
        assert_eq!(request.path, "api/info");
        assert_eq!(request.query_param("id"), Some("t3_abc"));
    }

    #[test]
    fn info_with_empty_listing_is_invalid_response() {
        let transport = Arc::new(RecordingTransport::with_responses(vec![info_listing(vec![])]));
        let client = RedditClient::new(transport);
        assert!(client.info("t3_missing").is_err());
    }

    #[test]
    fn bound_subreddit_comes_from_config() {
        let config = NotesConfig {
            subreddit: Some("redditdev".to_string()),
            ..NotesConfig::default()
        };
        let client =
            RedditClient::with_notes_config(Arc::new(RecordingTransport::new()), &config);
        assert_eq!(
            client.mod_notes().subreddit().map(|s| s.as_str()),
            Some("redditdev")
        );
        assert_eq!(client.listing_defaults().limit, Some(100));
    }
}
