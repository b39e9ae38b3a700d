pub mod config;
pub mod display;
pub mod pagination;
pub mod search_controller;
pub mod search_debouncer;
pub mod services;
pub mod tui;
pub mod types;

// 公開API
pub use config::{Cli, ConfigError, SearchConfig};
pub use pagination::{compute_visible_pages, PageControl, PageItem, Pagination};
pub use search_controller::{
    FetchCompletion, PageWindow, QueryState, SearchController, SearchError, SearchPhase,
};
pub use search_debouncer::SearchDebouncer;
pub use services::{CommentSource, FetchError, HttpCommentSource};
pub use tui::{run_tui, TuiEngine};
pub use types::*;
