//! Comment search endpoint client
//!
//! Issues `GET <base-url>?q=<query>` and decodes the JSON array of comments.
//! Non-2xx responses and transport or decode failures are mapped onto
//! [`FetchError`], whose `Display` output is the text shown to the user.

use crate::types::Comment;
use async_trait::async_trait;
use std::time::Duration;
use url::Url;

/// Shown when a transport failure carries no description of its own
pub const GENERIC_FETCH_ERROR: &str = "An error occurred while fetching data.";

/// Failure of a single request to the search endpoint
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The endpoint answered with a non-success status
    #[error("HTTP error! status: {0}")]
    Status(u16),

    /// The request never produced a usable response
    #[error("{}", .0.as_deref().unwrap_or(GENERIC_FETCH_ERROR))]
    Transport(Option<String>),
}

impl FetchError {
    /// Transport failure described by `description`; blank descriptions
    /// fall back to the generic message.
    pub fn transport(description: impl ToString) -> Self {
        let description = description.to_string();
        if description.trim().is_empty() {
            FetchError::Transport(None)
        } else {
            FetchError::Transport(Some(description))
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        match error.status() {
            Some(status) if !status.is_success() => FetchError::Status(status.as_u16()),
            _ => FetchError::transport(error),
        }
    }
}

/// Source of comment search results
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentSource: Send + Sync {
    /// Run one search; exactly one request is issued per call
    async fn search(&self, query: &str) -> Result<Vec<Comment>, FetchError>;
}

/// [`CommentSource`] backed by the remote HTTP endpoint
#[derive(Debug, Clone)]
pub struct HttpCommentSource {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpCommentSource {
    pub fn new(base_url: Url, timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("comment-search/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Full request URL for `query`, with the query form-encoded as `q`
    pub fn request_url(&self, query: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut().append_pair("q", query);
        url
    }
}

#[async_trait]
impl CommentSource for HttpCommentSource {
    async fn search(&self, query: &str) -> Result<Vec<Comment>, FetchError> {
        let url = self.request_url(query);
        log::info!("Fetching comments: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            log::warn!("Search endpoint answered with status {}", status);
            return Err(FetchError::Status(status.as_u16()));
        }

        let comments: Vec<Comment> = response.json().await?;
        log::debug!("Received {} comments for '{}'", comments.len(), query);
        Ok(comments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(base: &str) -> HttpCommentSource {
        HttpCommentSource::new(Url::parse(base).unwrap(), Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn test_request_url_encodes_query() {
        let source = source("https://jsonplaceholder.typicode.com/comments");
        assert_eq!(
            source.request_url("testing").as_str(),
            "https://jsonplaceholder.typicode.com/comments?q=testing"
        );
        assert_eq!(
            source.request_url("a&b c").as_str(),
            "https://jsonplaceholder.typicode.com/comments?q=a%26b+c"
        );
    }

    #[test]
    fn test_request_url_with_empty_query() {
        let source = source("https://jsonplaceholder.typicode.com/comments");
        assert_eq!(
            source.request_url("").as_str(),
            "https://jsonplaceholder.typicode.com/comments?q="
        );
    }

    #[test]
    fn test_request_url_keeps_existing_parameters() {
        let source = source("http://localhost:8080/comments?postId=1");
        assert_eq!(
            source.request_url("abcd").as_str(),
            "http://localhost:8080/comments?postId=1&q=abcd"
        );
    }

    #[test]
    fn test_fetch_error_messages() {
        assert_eq!(FetchError::Status(500).to_string(), "HTTP error! status: 500");
        assert_eq!(
            FetchError::transport("Network error").to_string(),
            "Network error"
        );
        assert_eq!(FetchError::transport("").to_string(), GENERIC_FETCH_ERROR);
        assert_eq!(FetchError::Transport(None).to_string(), GENERIC_FETCH_ERROR);
    }
}
