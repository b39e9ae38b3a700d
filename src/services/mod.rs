//! Services module
//!
//! External collaborators the search controller talks to. The only one is
//! the comment search endpoint, reached through the [`CommentSource`] trait
//! so that tests can substitute a fake endpoint.

pub mod comment_source;

pub use comment_source::{CommentSource, FetchError, HttpCommentSource, GENERIC_FETCH_ERROR};

#[cfg(test)]
pub use comment_source::MockCommentSource;
