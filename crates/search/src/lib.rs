//! In-document find/replace for plain-text buffers.

mod buffer;
mod engine;
mod matcher;
mod state;
mod status;

pub use buffer::{SearchHost, TextBuffer};
pub use engine::{SearchConfig, SearchEngine, SearchMode};
pub use matcher::{SearchMatch, SearchResults};
pub use state::SearchSession;
pub use status::{ReplaceOutcome, SearchStatus};
