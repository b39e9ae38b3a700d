use serde::{Deserialize, Serialize};

/// Number of comments shown on one page of the results table
pub const ITEMS_PER_PAGE: usize = 20;

/// Shortest query (in characters) that is sent to the endpoint.
/// The empty query is the one exception and is always sent.
pub const MIN_QUERY_CHARS: usize = 4;

/// Body previews longer than this are cut and suffixed with "..."
pub const BODY_PREVIEW_CHARS: usize = 64;

/// Default quiet period before a typed query is searched
pub const DEFAULT_DEBOUNCE_MS: u64 = 1000;

/// A comment record as returned by the search endpoint
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub body: String,
}

impl Comment {
    pub fn new(
        id: u64,
        name: impl Into<String>,
        email: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            body: body.into(),
        }
    }
}
