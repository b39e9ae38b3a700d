//! Text shown by the widget
//!
//! Formatting of result rows and the fixed labels of the search surface,
//! kept free of any terminal types so it can be checked directly.

use crate::search_controller::PageWindow;
use crate::types::{Comment, BODY_PREVIEW_CHARS};

pub const HEADING: &str = "Search Comments";
pub const PLACEHOLDER: &str = "Search comments...";
pub const LOADING_TEXT: &str = "Loading Comments...";
pub const NO_COMMENTS: &str = "No Comments...";
pub const ELLIPSIS: &str = "...";
pub const COLUMN_HEADERS: [&str; 4] = ["Sr.No", "Name", "Email", "Body"];

/// Label of the submit button
pub fn submit_label(loading: bool) -> &'static str {
    if loading {
        "Searching..."
    } else {
        "Search"
    }
}

/// Cut a comment body to its preview length, appending "..." when cut
pub fn truncate_body(body: &str) -> String {
    match body.char_indices().nth(BODY_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}{}", &body[..cut], ELLIPSIS),
        None => body.to_string(),
    }
}

/// One formatted row of the results table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    /// Absolute 1-based position in the full result set
    pub sr_no: usize,
    pub name: String,
    pub email: String,
    pub body: String,
    /// Untruncated body, shown for the selected row
    pub title: String,
}

impl ResultRow {
    pub fn new(sr_no: usize, comment: &Comment) -> Self {
        Self {
            sr_no,
            name: comment.name.clone(),
            email: comment.email.clone(),
            body: truncate_body(&comment.body),
            title: comment.body.clone(),
        }
    }

    pub fn cells(&self) -> [String; 4] {
        [
            self.sr_no.to_string(),
            self.name.clone(),
            self.email.clone(),
            self.body.clone(),
        ]
    }
}

/// Rows for the comments of one page window
pub fn result_rows(window: &PageWindow<'_>) -> Vec<ResultRow> {
    window
        .comments
        .iter()
        .enumerate()
        .map(|(offset, comment)| ResultRow::new(window.first_serial + offset, comment))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONG_BODY: &str =
        "This is a very long comment that exceeds 64 characters and should be truncated in the UI.";

    #[test]
    fn test_long_body_is_truncated() {
        assert_eq!(
            truncate_body(LONG_BODY),
            "This is a very long comment that exceeds 64 characters and shoul..."
        );
    }

    #[test]
    fn test_short_body_is_unchanged() {
        assert_eq!(truncate_body("This is a comment"), "This is a comment");
        let exactly = "x".repeat(64);
        assert_eq!(truncate_body(&exactly), exactly);
        let one_more = "x".repeat(65);
        assert_eq!(truncate_body(&one_more), format!("{}...", "x".repeat(64)));
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let body = "é".repeat(70);
        assert_eq!(truncate_body(&body), format!("{}...", "é".repeat(64)));
    }

    #[test]
    fn test_rows_keep_full_body_as_title() {
        let comment = Comment::new(3, "Bob", "bob@example.com", LONG_BODY);
        let row = ResultRow::new(21, &comment);
        assert_eq!(row.sr_no, 21);
        assert_eq!(row.title, LONG_BODY);
        assert!(row.body.ends_with("..."));
        assert_eq!(row.cells()[0], "21");
    }

    #[test]
    fn test_rows_number_from_window_start() {
        let comments: Vec<Comment> = (21..=25)
            .map(|i| Comment::new(i, "n", "e", "b"))
            .collect();
        let window = PageWindow {
            first_serial: 21,
            comments: &comments,
        };
        let serials: Vec<usize> = result_rows(&window).iter().map(|r| r.sr_no).collect();
        assert_eq!(serials, vec![21, 22, 23, 24, 25]);
    }

    #[test]
    fn test_submit_label() {
        assert_eq!(submit_label(false), "Search");
        assert_eq!(submit_label(true), "Searching...");
    }
}
