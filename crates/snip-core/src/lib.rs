//! snip-core: snippet corpus segmentation and retrieval
//!
//! A corpus is a directory tree of flat text files. Each file is split into
//! blocks on `-----` delimiter lines; a block's first non-blank line is its
//! title. Retrieval is two-phase: list titles for a query, let an external
//! selector pick one, then resolve the pick back to the exact block body.

pub mod config;
pub mod consts;
pub mod corpus;
pub mod filter;
pub mod query;
pub mod segment;
pub mod session;

pub use config::{Config, OutputKind, ResolvePolicy};
pub use consts::*;
pub use corpus::{Corpus, SnippetFile};
pub use filter::ContentFilter;
pub use query::Query;
pub use segment::{Block, BlockId};
pub use session::{Candidate, Outcome, Resolved, Selection, Selector, Session};

#[derive(Debug, thiserror::Error)]
pub enum SnipError {
    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Invalid content pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("No snippet found for: {title}")]
    NotFound { title: String },

    #[error("Selector error: {0}")]
    Selector(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SnipError>;
